// tests/property/main.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use autoignore::block::IgnoreFileContent;
use autoignore::scope::WriteMode;
use autoignore::{EXIT_CLEAN, EXIT_ERROR};
use autoignore_test_utils::builders::{run_tree, MockRepo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    File,
    Symlink,
    IgnoreFile,
}

// Random trees: directories are named from {a, b}, leaves from {x, y}, so a
// name is never both a directory and a leaf.
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Kind>> {
    let dirs = proptest::collection::vec(prop_oneof![Just("a"), Just("b")], 0..4);
    let leaf = prop_oneof![
        Just(("x", Kind::File)),
        Just(("x", Kind::Symlink)),
        Just(("y", Kind::Symlink)),
        Just((".gitignore", Kind::IgnoreFile)),
    ];
    proptest::collection::vec((dirs, leaf), 0..24).prop_map(|items| {
        items
            .into_iter()
            .map(|(dirs, (name, kind))| {
                let mut rel: Vec<&str> = dirs;
                rel.push(name);
                (rel.join("/"), kind)
            })
            .collect()
    })
}

fn build(tree: &BTreeMap<String, Kind>) -> MockRepo {
    tree.iter().fold(MockRepo::new("/repo"), |repo, (rel, kind)| match kind {
        Kind::File => repo.with_file(rel, "data\n"),
        Kind::Symlink => repo.with_symlink(rel, "elsewhere"),
        Kind::IgnoreFile => repo.with_file(rel, "keep-me\n"),
    })
}

/// Directory of the nearest ignore file at or above `path`'s parent.
fn owner_of(root: &Path, path: &Path, scopes: &BTreeSet<PathBuf>) -> Option<PathBuf> {
    path.ancestors()
        .skip(1)
        .take_while(|dir| dir.starts_with(root))
        .find(|dir| scopes.contains(*dir))
        .map(Path::to_path_buf)
}

proptest! {
    #[test]
    fn every_symlink_lands_in_exactly_its_nearest_scope(tree in tree_strategy()) {
        let repo = build(&tree);
        let root = repo.root().to_path_buf();

        let out = run_tree(repo.shared(), &root, WriteMode::Write);
        prop_assert_ne!(out.summary.exit_code(), EXIT_ERROR);

        let scopes: BTreeSet<PathBuf> = tree
            .iter()
            .filter(|(_, kind)| **kind == Kind::IgnoreFile)
            .filter_map(|(rel, _)| root.join(rel).parent().map(Path::to_path_buf))
            .collect();

        let mut expected: BTreeMap<PathBuf, BTreeSet<String>> =
            scopes.iter().map(|dir| (dir.clone(), BTreeSet::new())).collect();
        for (rel, kind) in &tree {
            if *kind != Kind::Symlink {
                continue;
            }
            let path = root.join(rel);
            if let Some(dir) = owner_of(&root, &path, &scopes) {
                let entry = path.strip_prefix(&dir).unwrap().to_string_lossy().into_owned();
                expected.get_mut(&dir).unwrap().insert(format!("/{entry}"));
            }
        }

        for (dir, entries) in &expected {
            let ignore_path = dir.join(".gitignore");
            let text = repo.fs().contents(&ignore_path).unwrap();
            let content = IgnoreFileContent::parse(&ignore_path, &text).unwrap();

            prop_assert_eq!(&content.preamble, &vec!["keep-me".to_string()]);
            let managed: BTreeSet<String> = content.managed.iter().cloned().collect();
            prop_assert_eq!(managed.len(), content.managed.len());
            prop_assert_eq!(&managed, entries);
        }
    }

    #[test]
    fn second_pass_changes_nothing(tree in tree_strategy()) {
        let repo = build(&tree);

        run_tree(repo.shared(), repo.root(), WriteMode::Write);
        let snapshot: Vec<Option<String>> = tree
            .keys()
            .map(|rel| repo.fs().contents(repo.path(rel)))
            .collect();

        let again = run_tree(repo.shared(), repo.root(), WriteMode::Write);
        prop_assert_eq!(again.summary.exit_code(), EXIT_CLEAN);

        let after: Vec<Option<String>> = tree
            .keys()
            .map(|rel| repo.fs().contents(repo.path(rel)))
            .collect();
        prop_assert_eq!(snapshot, after);
    }
}

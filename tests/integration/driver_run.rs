// tests/integration/driver_run.rs

use std::error::Error;

use autoignore::block::{BLOCK_FOOTER, BLOCK_HEADER};
use autoignore::errors::AutoIgnoreError;
use autoignore::scope::WriteMode;
use autoignore::{EXIT_CHANGED, EXIT_CLEAN, EXIT_ERROR};
use autoignore_test_utils::builders::{ignore_text, run_tree, run_tree_with, MockRepo};
use autoignore_test_utils::fakes::{SetPredicate, SetPredicateFactory};
use autoignore_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn sample_repo() -> MockRepo {
    MockRepo::new("/repo")
        .with_file(".gitignore", "target/\n")
        .with_file("README.md", "# readme\n")
        .with_symlink("docs-link", "README.md")
        .with_file("sub/.gitignore", &ignore_text(&[], Some(&["/link"]), &[]))
        .with_symlink("sub/link", "../README.md")
}

#[test]
fn run_reports_every_scope_and_flags_change() -> TestResult {
    init_tracing();

    let repo = sample_repo();
    let out = run_tree(repo.shared(), repo.root(), WriteMode::Write);

    assert!(out.summary.failures.is_empty());
    assert!(out.summary.changed());
    assert_eq!(out.summary.exit_code(), EXIT_CHANGED);
    assert_eq!(
        out.stdout,
        "/repo/.gitignore:\n\tAdditions:\n\t\t/docs-link\n\tDeletions:\n\
         /repo/sub/.gitignore:\n\tNo changes\n"
    );

    assert_eq!(
        repo.read(".gitignore"),
        format!("target/\n{BLOCK_HEADER}\n/docs-link\n{BLOCK_FOOTER}\n")
    );
    Ok(())
}

#[test]
fn nested_symlink_only_lands_in_nearest_scope() -> TestResult {
    let repo = sample_repo();
    run_tree(repo.shared(), repo.root(), WriteMode::Write);

    assert!(!repo.read(".gitignore").contains("/sub/link"));
    assert_eq!(
        repo.read("sub/.gitignore"),
        ignore_text(&[], Some(&["/link"]), &[])
    );
    Ok(())
}

#[test]
fn second_run_is_clean() -> TestResult {
    let repo = sample_repo();

    let first = run_tree(repo.shared(), repo.root(), WriteMode::Write);
    assert_eq!(first.summary.exit_code(), EXIT_CHANGED);

    let second = run_tree(repo.shared(), repo.root(), WriteMode::Write);
    assert_eq!(second.summary.exit_code(), EXIT_CLEAN);
    assert!(second.summary.reports.iter().all(|r| !r.changed()));
    Ok(())
}

#[test]
fn removing_symlink_cleans_entry_on_next_run() -> TestResult {
    let repo = sample_repo();
    run_tree(repo.shared(), repo.root(), WriteMode::Write);

    repo.remove("sub/link");
    let out = run_tree(repo.shared(), repo.root(), WriteMode::Write);

    assert_eq!(out.summary.exit_code(), EXIT_CHANGED);
    let sub = &out.summary.reports[1];
    assert_eq!(sub.deletions, vec!["/link"]);
    assert_eq!(repo.read("sub/.gitignore"), "");
    Ok(())
}

#[test]
fn check_mode_reports_without_writing() -> TestResult {
    let repo = sample_repo();

    let out = run_tree(repo.shared(), repo.root(), WriteMode::DryRun);
    assert_eq!(out.summary.exit_code(), EXIT_CHANGED);
    assert_eq!(repo.read(".gitignore"), "target/\n");

    // Nothing was written, so the change is still pending.
    let again = run_tree(repo.shared(), repo.root(), WriteMode::DryRun);
    assert_eq!(again.summary.exit_code(), EXIT_CHANGED);
    Ok(())
}

#[test]
fn tree_without_ignore_files_is_clean_and_silent() -> TestResult {
    let repo = MockRepo::new("/repo").with_symlink("link", "nowhere");

    let out = run_tree(repo.shared(), repo.root(), WriteMode::Write);

    assert!(out.summary.reports.is_empty());
    assert_eq!(out.summary.exit_code(), EXIT_CLEAN);
    assert_eq!(out.stdout, "");
    Ok(())
}

#[test]
fn malformed_scope_is_isolated() -> TestResult {
    init_tracing();

    let bad_text = format!("{BLOCK_HEADER}\n/x\n");
    let repo = sample_repo()
        .with_file("broken/.gitignore", &bad_text)
        .with_symlink("broken/x", "../README.md");

    let out = run_tree(repo.shared(), repo.root(), WriteMode::Write);

    assert_eq!(out.summary.exit_code(), EXIT_ERROR);
    assert_eq!(out.summary.failures.len(), 1);
    assert!(matches!(
        out.summary.failures[0].error,
        AutoIgnoreError::MalformedBlock { line: 1, .. }
    ));
    assert!(out.stdout.contains("/repo/broken/.gitignore:\n\tError: Malformed managed block"));

    // The broken file is left alone; the healthy scopes were processed.
    assert_eq!(repo.read("broken/.gitignore"), bad_text);
    assert!(repo.read(".gitignore").contains("/docs-link"));
    assert!(!repo.read(".gitignore").contains("/broken/x"));
    Ok(())
}

#[test]
fn write_back_runs_even_when_predicate_cannot_be_built() -> TestResult {
    let repo = MockRepo::new("/repo")
        .with_file(".gitignore", "")
        .with_symlink("a", "b")
        .with_file(
            "pkg/.gitignore",
            &format!("{BLOCK_HEADER}\n\n/kept\n{BLOCK_FOOTER}\n"),
        );
    let factory = SetPredicateFactory::new(SetPredicate::new([repo.path("a")]))
        .failing_for(repo.path("pkg"));

    let out = run_tree_with(repo.fs(), repo.root(), &factory, WriteMode::Write);

    assert_eq!(out.summary.exit_code(), EXIT_ERROR);
    assert_eq!(out.summary.failures.len(), 1);
    assert_eq!(out.summary.failures[0].ignore_path, repo.path("pkg/.gitignore"));
    assert_eq!(out.summary.reports.len(), 1);
    assert_eq!(out.summary.reports[0].insertions, vec!["/a"]);

    // Entries untouched, but the file was still normalized on the way out.
    assert_eq!(
        repo.read("pkg/.gitignore"),
        format!("{BLOCK_HEADER}\n/kept\n{BLOCK_FOOTER}\n")
    );
    Ok(())
}

#[test]
fn unchanged_scope_keeps_file_bytes() -> TestResult {
    for text in ["target/\r\n*.log\r\n", "target/"] {
        let repo = MockRepo::new("/repo").with_file(".gitignore", text);

        let out = run_tree(repo.shared(), repo.root(), WriteMode::Write);

        assert_eq!(out.summary.exit_code(), EXIT_CLEAN);
        assert_eq!(out.stdout, "/repo/.gitignore:\n\tNo changes\n");
        assert_eq!(repo.read(".gitignore"), text);
    }
    Ok(())
}

#[test]
fn crlf_file_gets_crlf_block() -> TestResult {
    let repo = MockRepo::new("/repo")
        .with_file(".gitignore", "target/\r\n")
        .with_symlink("link", "target");

    run_tree(repo.shared(), repo.root(), WriteMode::Write);

    assert_eq!(
        repo.read(".gitignore"),
        format!("target/\r\n{BLOCK_HEADER}\r\n/link\r\n{BLOCK_FOOTER}\r\n")
    );
    let again = run_tree(repo.shared(), repo.root(), WriteMode::Write);
    assert_eq!(again.summary.exit_code(), EXIT_CLEAN);
    Ok(())
}

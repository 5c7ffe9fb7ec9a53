// tests/integration/config_loading.rs

use std::error::Error;
use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use autoignore::config::{load_and_validate, load_for_root, ConfigFile, RawConfigFile};
use autoignore::errors::AutoIgnoreError;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{text}").unwrap();
    file
}

fn expect_config_error(text: &str, fragment: &str) {
    let file = write_config(text);
    match load_and_validate(file.path()) {
        Err(AutoIgnoreError::ConfigError(msg)) => {
            assert!(msg.contains(fragment), "expected {fragment:?} in {msg:?}");
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(cfg) => panic!("Expected error, got Ok({:?})", cfg),
    }
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let file = write_config("");
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.ignore_file(), ".gitignore");
    assert_eq!(cfg.metadata_dir(), ".git");
    assert!(cfg.predicate_section().symlinks);
    assert!(cfg.predicate_section().patterns.is_empty());
    Ok(())
}

#[test]
fn all_sections_are_read() -> TestResult {
    let file = write_config(
        r#"
[config]
ignore_file = ".ignore"
metadata_dir = ".hg"

[predicate]
symlinks = false
patterns = ["gen/**", "*.pyc"]
"#,
    );
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.ignore_file(), ".ignore");
    assert_eq!(cfg.metadata_dir(), ".hg");
    assert!(!cfg.predicate_section().symlinks);
    assert_eq!(cfg.predicate_section().patterns, vec!["gen/**", "*.pyc"]);
    Ok(())
}

#[test]
fn unknown_keys_are_rejected_naming_the_file() {
    let file = write_config("[config]\nignorefile = \".gitignore\"\n");
    match load_and_validate(file.path()) {
        Err(err @ AutoIgnoreError::ConfigParse { .. }) => {
            let msg = err.to_string();
            assert!(msg.contains(&format!("{:?}", file.path())), "{msg}");
        }
        other => panic!("Expected ConfigParse error, got: {:?}", other),
    }
}

#[test]
fn ignore_file_must_be_plain_name() {
    expect_config_error("[config]\nignore_file = \"sub/.gitignore\"\n", "plain file name");
    expect_config_error("[config]\nignore_file = \"\"\n", "must not be empty");
    expect_config_error("[config]\nmetadata_dir = \"..\"\n", "[config].metadata_dir");
}

#[test]
fn predicate_must_enable_something() {
    expect_config_error("[predicate]\nsymlinks = false\n", "nothing would ever be ignored");
}

#[test]
fn invalid_glob_is_a_config_error() {
    expect_config_error("[predicate]\npatterns = [\"gen/[\"]\n", "[predicate].patterns");
}

#[test]
fn validation_error_names_the_file() {
    let file = write_config("[predicate]\nsymlinks = false\n");
    let msg = load_and_validate(file.path()).unwrap_err().to_string();
    assert!(msg.contains(&format!("{:?}", file.path())), "{msg}");
}

#[test]
fn defaults_validate_through_try_from() -> TestResult {
    let cfg = ConfigFile::try_from(RawConfigFile::default())?;
    assert_eq!(cfg.ignore_file(), ConfigFile::default().ignore_file());
    Ok(())
}

#[test]
fn root_config_is_optional() -> TestResult {
    let dir = tempdir()?;
    let cfg = load_for_root(dir.path(), None)?;
    assert_eq!(cfg.ignore_file(), ".gitignore");
    Ok(())
}

#[test]
fn root_config_is_picked_up() -> TestResult {
    let dir = tempdir()?;
    std::fs::write(
        dir.path().join("autoignore.toml"),
        "[predicate]\npatterns = [\"out/*\"]\n",
    )?;

    let cfg = load_for_root(dir.path(), None)?;
    assert_eq!(cfg.predicate_section().patterns, vec!["out/*"]);
    Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> TestResult {
    let dir = tempdir()?;
    let missing = dir.path().join("nope.toml");

    match load_for_root(dir.path(), Some(missing.as_path())) {
        Err(err @ AutoIgnoreError::ConfigRead { .. }) => {
            assert!(err.to_string().contains("nope.toml"), "{err}");
        }
        other => panic!("Expected ConfigRead error, got: {:?}", other),
    }
    Ok(())
}

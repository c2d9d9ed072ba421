use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const ALICE_KEY: &str = include_str!("../fixtures/alice.asc");
#[allow(dead_code)]
pub const BOB_KEY: &str = include_str!("../fixtures/bob.asc");

/// Create a temporary working directory populated with `files` (relative path, contents).
pub fn create_workspace(files: &[(&str, &[u8])]) -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    for (relative, contents) in files {
        write_file(temp.path(), relative, contents);
    }
    temp
}

/// Write `contents` to `dir/relative`, creating parent folders.
pub fn write_file(dir: &Path, relative: &str, contents: &[u8]) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(path, contents).expect("failed to write file");
}

/// Number of entries directly inside `dir`.
#[allow(dead_code)]
pub fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).expect("failed to read dir").count()
}

/// Convenience helper for spawning the pgp-blueprints binary via assert_cmd.
#[allow(dead_code)]
pub fn pgp_cmd() -> Command {
    cargo_bin_cmd!("pgp-blueprints")
}

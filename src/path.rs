//! # Path Resolution
//!
//! Folder and file names arrive from the command line as plain strings. This
//! module turns them into canonical relative (or absolute) paths using purely
//! lexical rules; the filesystem is never consulted.
//!
//! - [`normalize`] collapses `.`, `..` and duplicate separators.
//! - [`clean_folder_name`] strips leading and trailing `/` before normalizing.
//!   An empty result means "the working directory".
//! - [`combine`] joins a cleaned folder and a file name.

use std::path::PathBuf;

const SEPARATOR: char = '/';

/// Lexically normalize a `/`-separated path.
///
/// An empty path normalizes to `"."`. A `..` that would climb above the root of
/// an absolute path is dropped; on a relative path it is kept.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with(SEPARATOR);
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split(SEPARATOR) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Strip leading/trailing separators and normalize what is left.
pub fn clean_folder_name(raw: &str) -> String {
    let trimmed = raw.trim_matches(SEPARATOR);
    if trimmed.is_empty() {
        String::new()
    } else {
        normalize(trimmed)
    }
}

/// Join `folder` and `file`, then normalize. An empty folder yields `normalize(file)`.
pub fn combine(folder: &str, file: &str) -> String {
    if folder.is_empty() {
        normalize(file)
    } else {
        normalize(&format!("{folder}{SEPARATOR}{file}"))
    }
}

/// A folder/file pair as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSpec {
    folder: String,
    file: String,
}

impl PathSpec {
    /// The folder name is cleaned on construction.
    pub fn new(folder: &str, file: &str) -> Self {
        Self {
            folder: clean_folder_name(folder),
            file: file.to_string(),
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Normalized `folder/file`.
    pub fn combined(&self) -> String {
        combine(&self.folder, &self.file)
    }

    /// The combined path as a [`PathBuf`].
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.combined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_duplicates_and_dots() {
        assert_eq!(normalize("a//b/./c"), "a/b/c");
        assert_eq!(normalize("a/b/../c"), "a/c");
        assert_eq!(normalize("./a/"), "a");
    }

    #[test]
    fn test_normalize_parent_handling() {
        assert_eq!(normalize("../a"), "../a");
        assert_eq!(normalize("a/../../b"), "../b");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("a/.."), ".");
    }

    #[test]
    fn test_normalize_absolute_and_empty() {
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//tmp///x/"), "/tmp/x");
    }

    #[test]
    fn test_clean_folder_name_strips_separators() {
        assert_eq!(clean_folder_name("/out/nested/"), "out/nested");
        assert_eq!(clean_folder_name("out//nested"), "out/nested");
        assert_eq!(clean_folder_name("///"), "");
        assert_eq!(clean_folder_name(""), "");
    }

    #[test]
    fn test_clean_folder_name_is_idempotent() {
        let inputs = [
            "", "/", "a", "/a/", "a//b", "a/./b/", "a/../b", "../x", "a/..", "//x//y//", ".",
        ];
        for input in inputs {
            let once = clean_folder_name(input);
            assert_eq!(clean_folder_name(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_clean_folder_name_has_no_edge_separators() {
        for input in ["/a/b/", "a//b//", "//a"] {
            let cleaned = clean_folder_name(input);
            assert!(!cleaned.starts_with('/'));
            assert!(!cleaned.ends_with('/'));
            assert!(!cleaned.contains("//"));
        }
    }

    #[test]
    fn test_combine_without_folder_is_normalized_file() {
        for file in ["a.txt", "./a.txt", "dir//a.txt", "x/../a.txt", ""] {
            assert_eq!(combine("", file), normalize(file));
        }
    }

    #[test]
    fn test_combine_with_folder() {
        assert_eq!(combine("out", "a.pgp"), "out/a.pgp");
        assert_eq!(combine("out/nested", "../a.pgp"), "out/a.pgp");
    }

    #[test]
    fn test_combine_empty_file_does_not_error() {
        assert_eq!(combine("out", ""), "out");
    }

    #[test]
    fn test_path_spec_cleans_folder() {
        let spec = PathSpec::new("/in//data/", "report.csv");
        assert_eq!(spec.folder(), "in/data");
        assert_eq!(spec.file(), "report.csv");
        assert_eq!(spec.combined(), "in/data/report.csv");
        assert_eq!(spec.to_path_buf(), PathBuf::from("in/data/report.csv"));
    }
}

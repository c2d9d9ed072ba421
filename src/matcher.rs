//! # File Discovery
//!
//! Regex-mode sources are found by walking the working directory (or a
//! subfolder of it) and keeping every regular file whose absolute path
//! contains a match for the pattern.
//!
//! Matching is a substring search, not a full match: `\.txt$` matches
//! `/home/me/data/a.txt`, and so does `data`. Results keep the order the
//! filesystem yields them in, which is not necessarily sorted.

use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::path::clean_folder_name;

/// Every regular file reachable from `working_dir/source_folder`, as absolute paths.
///
/// Directories are descended into but never returned. Symlinks are followed,
/// so a link to a file is listed under the link's path. Entries that cannot be
/// read are skipped. A missing root yields an empty list.
pub fn list_files(working_dir: &Path, source_folder: &str) -> Vec<PathBuf> {
    let root = match clean_folder_name(source_folder).as_str() {
        "" | "." => working_dir.to_path_buf(),
        folder => working_dir.join(folder),
    };
    debug!(root = %root.display(), "scanning for files");

    WalkDir::new(&root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| absolute(entry.into_path()))
        .collect()
}

/// Paths for which `pattern` finds a match anywhere in the path string.
pub fn filter_by_regex<I>(paths: I, pattern: &Regex) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .filter(|path| pattern.is_match(&path.to_string_lossy()))
        .collect()
}

/// [`list_files`] followed by [`filter_by_regex`].
pub fn find_matches(working_dir: &Path, source_folder: &str, pattern: &Regex) -> Vec<PathBuf> {
    let matches = filter_by_regex(list_files(working_dir, source_folder), pattern);
    debug!(pattern = %pattern, count = matches.len(), "regex matches");
    matches
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

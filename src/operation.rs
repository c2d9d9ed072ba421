use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::{MatchType, OnMultipleMatches, Operation, OperationConfig};
use crate::error::{PgpError, Result};
use crate::matcher::find_matches;

/// One source file and the path its output is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Resolve sources, pair each with its destination and make sure the
/// destination folder exists.
///
/// Nothing is created when resolution or planning fails.
pub fn prepare_transfers(config: &OperationConfig, operation: Operation) -> Result<Vec<Transfer>> {
    let sources = prepare_sources(config, operation)?;
    let transfers = plan_destinations(config, operation, sources)?;
    ensure_destination_folder(config)?;
    Ok(transfers)
}

/// Resolve the source files for `operation`.
///
/// In regex mode this prints the match count, then applies the
/// multiple-match policy. The returned paths are absolute and in the order
/// they should be processed.
pub fn prepare_sources(config: &OperationConfig, operation: Operation) -> Result<Vec<PathBuf>> {
    match config.match_type {
        MatchType::ExactMatch => Ok(vec![config
            .working_dir
            .join(config.source_relative_path())]),
        MatchType::RegexMatch => {
            let pattern = Regex::new(config.source.file())?;
            let matches = find_matches(&config.working_dir, config.source.folder(), &pattern);
            println!(
                "{} files found. Preparing to {}",
                matches.len(),
                operation.verb()
            );

            if matches.is_empty() {
                return Err(PgpError::NoMatchFound(config.source.file().to_string()));
            }
            apply_policy(matches, config.on_multiple_matches)
        }
    }
}

/// Pair every source with its destination.
///
/// Under `all-to-directory` two sources mapping to the same output (same file
/// name in different subfolders) are rejected, since one would overwrite the
/// other.
pub fn plan_destinations(
    config: &OperationConfig,
    operation: Operation,
    sources: Vec<PathBuf>,
) -> Result<Vec<Transfer>> {
    let transfers = sources
        .into_iter()
        .map(|source| {
            let destination = config.destination_path(operation, &source)?;
            Ok(Transfer {
                source,
                destination,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if config.on_multiple_matches == OnMultipleMatches::AllToDirectory {
        let mut seen = HashSet::new();
        for transfer in &transfers {
            if !seen.insert(&transfer.destination) {
                return Err(PgpError::InvalidArguments(format!(
                    "several matches would be written to {}",
                    transfer.destination.display()
                )));
            }
        }
    }

    Ok(transfers)
}

/// Narrow `matches` down to the files that will actually be processed.
pub fn apply_policy(matches: Vec<PathBuf>, policy: OnMultipleMatches) -> Result<Vec<PathBuf>> {
    match policy {
        OnMultipleMatches::FirstOnly => Ok(matches.into_iter().take(1).collect()),
        OnMultipleMatches::LastOnly | OnMultipleMatches::AllToDirectory => Ok(matches),
        OnMultipleMatches::Error if matches.len() > 1 => {
            Err(PgpError::MultipleMatches(matches.len()))
        }
        OnMultipleMatches::Error => Ok(matches),
    }
}

/// Create the destination folder (and parents) when a non-empty one was given.
pub fn ensure_destination_folder(config: &OperationConfig) -> Result<()> {
    if config.destination_folder.is_empty() {
        return Ok(());
    }

    let dir = config.destination_dir();
    if !dir.exists() {
        info!(path = %dir.display(), "creating destination folder");
        fs::create_dir_all(&dir)?;
    } else {
        debug!(path = %dir.display(), "destination folder exists");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeySource;
    use tempfile::TempDir;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn regex_config(temp: &TempDir, pattern: &str) -> OperationConfig {
        OperationConfig::new(
            Operation::Decrypt,
            temp.path(),
            pattern,
            KeySource::Inline(String::new()),
        )
        .with_match_type(MatchType::RegexMatch)
        .with_destination("", Some("out.txt".into()))
    }

    #[test]
    fn test_first_only_keeps_first() {
        let selected = apply_policy(paths(&["a", "b", "c"]), OnMultipleMatches::FirstOnly).unwrap();
        assert_eq!(selected, paths(&["a"]));
    }

    #[test]
    fn test_last_only_keeps_all_in_order() {
        let selected = apply_policy(paths(&["a", "b"]), OnMultipleMatches::LastOnly).unwrap();
        assert_eq!(selected, paths(&["a", "b"]));
    }

    #[test]
    fn test_error_policy() {
        let result = apply_policy(paths(&["a", "b"]), OnMultipleMatches::Error);
        assert!(matches!(result, Err(PgpError::MultipleMatches(2))));

        let selected = apply_policy(paths(&["a"]), OnMultipleMatches::Error).unwrap();
        assert_eq!(selected, paths(&["a"]));
    }

    #[test]
    fn test_exact_match_resolves_relative_to_working_dir() {
        let temp = TempDir::new().unwrap();
        let config = OperationConfig::new(
            Operation::Encrypt,
            temp.path(),
            "a.txt",
            KeySource::Inline(String::new()),
        )
        .with_source_folder("in//")
        .with_destination("", Some("a.pgp".into()));

        let transfers = prepare_transfers(&config, Operation::Encrypt).unwrap();
        assert_eq!(
            transfers,
            vec![Transfer {
                source: temp.path().join("in/a.txt"),
                destination: temp.path().join("a.pgp"),
            }]
        );
    }

    #[test]
    fn test_regex_zero_matches_is_no_match_found() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), b"a").unwrap();

        let result = prepare_sources(&regex_config(&temp, r"\.csv$"), Operation::Decrypt);
        assert!(matches!(result, Err(PgpError::NoMatchFound(_))));
    }

    #[test]
    fn test_regex_invalid_pattern() {
        let temp = TempDir::new().unwrap();

        let result = prepare_sources(&regex_config(&temp, "(unclosed"), Operation::Decrypt);
        assert!(matches!(result, Err(PgpError::InvalidPattern(_))));
    }

    #[test]
    fn test_ensure_destination_folder_creates_nested() {
        let temp = TempDir::new().unwrap();
        let config = regex_config(&temp, ".*").with_destination("out/nested", Some("x".into()));

        ensure_destination_folder(&config).unwrap();
        assert!(temp.path().join("out/nested").is_dir());

        // Already existing is fine.
        ensure_destination_folder(&config).unwrap();
    }

    #[test]
    fn test_plan_rejects_colliding_outputs() {
        let temp = TempDir::new().unwrap();
        let config = regex_config(&temp, r"\.txt$")
            .with_destination("out", None)
            .with_policy(OnMultipleMatches::AllToDirectory);
        let sources = vec![temp.path().join("in/a.txt"), temp.path().join("in/sub/a.txt")];

        let result = plan_destinations(&config, Operation::Decrypt, sources);
        assert!(matches!(result, Err(PgpError::InvalidArguments(_))));
    }

    #[test]
    fn test_plan_last_only_shares_destination() {
        let temp = TempDir::new().unwrap();
        let config = regex_config(&temp, r"\.txt$").with_policy(OnMultipleMatches::LastOnly);
        let sources = vec![temp.path().join("a.txt"), temp.path().join("b.txt")];

        let transfers = plan_destinations(&config, Operation::Decrypt, sources).unwrap();
        assert_eq!(transfers.len(), 2);
        assert!(transfers
            .iter()
            .all(|t| t.destination == temp.path().join("out.txt")));
    }
}

//! # Operation Configuration
//!
//! Every command-line flag maps onto one field of [`OperationConfig`].
//!
//! | flag | field | default |
//! |---|---|---|
//! | `--source-file-name-match-type` | `match_type` | `exact_match` |
//! | `--source-folder-name` | `source.folder()` | `''` (working directory) |
//! | `--source-file-name` | `source.file()` | required |
//! | `--destination-file-name` | `destination_file_name` | none |
//! | `--destination-folder-name` | `destination_folder` | `''` (working directory) |
//! | `--pgp-private-key` / `--pgp-private-key-file` | `key` | one required |
//! | `--on-multiple-matches` | `on_multiple_matches` | per operation |

use clap::ValueEnum;
use std::path::{Path, PathBuf};

use crate::error::{PgpError, Result};
use crate::key::KeySource;
use crate::path::{clean_folder_name, combine, PathSpec};

/// How `--source-file-name` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchType {
    /// A literal file name relative to the source folder.
    #[default]
    #[value(name = "exact_match")]
    ExactMatch,
    /// A regular expression searched for in absolute file paths.
    #[value(name = "regex_match")]
    RegexMatch,
}

/// What to do when a regex matches more than one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnMultipleMatches {
    /// Process only the first file in enumeration order.
    FirstOnly,
    /// Process every file in order, each overwriting the destination; the last one survives.
    LastOnly,
    /// Write one output per match into the destination folder.
    AllToDirectory,
    /// Refuse to run when more than one file matches.
    Error,
}

/// The two operations the binary exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

/// Extension given to files produced by `all-to-directory` encryption.
pub const ENCRYPTED_EXTENSION: &str = "pgp";

const KNOWN_ENCRYPTED_EXTENSIONS: [&str; 3] = ["pgp", "gpg", "asc"];

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }

    /// Policy used when none is given.
    pub fn default_policy(self) -> OnMultipleMatches {
        match self {
            Operation::Encrypt => OnMultipleMatches::LastOnly,
            Operation::Decrypt => OnMultipleMatches::FirstOnly,
        }
    }

    /// Output file name derived from a source file name.
    pub fn derived_name(self, source_name: &str) -> String {
        match self {
            Operation::Encrypt => format!("{source_name}.{ENCRYPTED_EXTENSION}"),
            Operation::Decrypt => Path::new(source_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext| {
                    KNOWN_ENCRYPTED_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                })
                .and_then(|_| Path::new(source_name).file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{source_name}.decrypted")),
        }
    }
}

/// Flat configuration for one encrypt or decrypt invocation.
#[derive(Debug, Clone)]
pub struct OperationConfig {
    /// Base for every relative path. The binary uses the process cwd.
    pub working_dir: PathBuf,
    pub match_type: MatchType,
    pub source: PathSpec,
    /// Cleaned destination folder; empty means the working directory.
    pub destination_folder: String,
    pub destination_file_name: Option<String>,
    pub on_multiple_matches: OnMultipleMatches,
    pub key: KeySource,
}

impl OperationConfig {
    /// Configuration with the documented defaults for `operation`.
    pub fn new(
        operation: Operation,
        working_dir: impl Into<PathBuf>,
        source_file_name: impl Into<String>,
        key: KeySource,
    ) -> Self {
        let source_file_name: String = source_file_name.into();
        Self {
            working_dir: working_dir.into(),
            match_type: MatchType::default(),
            source: PathSpec::new("", &source_file_name),
            destination_folder: String::new(),
            destination_file_name: None,
            on_multiple_matches: operation.default_policy(),
            key,
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    pub fn with_source_folder(mut self, folder: &str) -> Self {
        self.source = PathSpec::new(folder, self.source.file());
        self
    }

    pub fn with_destination(mut self, folder: &str, file_name: Option<String>) -> Self {
        self.destination_folder = clean_folder_name(folder);
        self.destination_file_name = file_name;
        self
    }

    pub fn with_policy(mut self, policy: OnMultipleMatches) -> Self {
        self.on_multiple_matches = policy;
        self
    }

    /// Reject combinations that cannot produce an output path.
    pub fn validate(&self) -> Result<()> {
        if self.source.file().is_empty() {
            return Err(PgpError::InvalidArguments(
                "--source-file-name must not be empty".into(),
            ));
        }

        let needs_file_name = self.on_multiple_matches != OnMultipleMatches::AllToDirectory;
        let has_file_name = self
            .destination_file_name
            .as_deref()
            .is_some_and(|name| !name.is_empty());
        if needs_file_name && !has_file_name {
            return Err(PgpError::InvalidArguments(
                "--destination-file-name is required unless --on-multiple-matches is all-to-directory"
                    .into(),
            ));
        }

        Ok(())
    }

    /// The exact-match source path, relative to the working directory.
    pub fn source_relative_path(&self) -> String {
        self.source.combined()
    }

    /// Destination path as displayed to the user: `folder/file` normalized,
    /// or just the folder in `all-to-directory` mode.
    pub fn destination_display(&self) -> String {
        match (&self.destination_file_name, self.on_multiple_matches) {
            (Some(name), policy) if policy != OnMultipleMatches::AllToDirectory => {
                combine(&self.destination_folder, name)
            }
            _ => combine(&self.destination_folder, ""),
        }
    }

    /// Absolute destination folder.
    pub fn destination_dir(&self) -> PathBuf {
        self.working_dir.join(combine(&self.destination_folder, ""))
    }

    /// Where the output for `source` is written.
    pub fn destination_path(&self, operation: Operation, source: &Path) -> Result<PathBuf> {
        let file_name = match self.on_multiple_matches {
            OnMultipleMatches::AllToDirectory => {
                let source_name = source
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        PgpError::InvalidArguments(format!(
                            "source path has no file name: {}",
                            source.display()
                        ))
                    })?;
                operation.derived_name(&source_name)
            }
            _ => self
                .destination_file_name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    PgpError::InvalidArguments("--destination-file-name is required".into())
                })?,
        };

        Ok(self
            .working_dir
            .join(combine(&self.destination_folder, &file_name)))
    }
}

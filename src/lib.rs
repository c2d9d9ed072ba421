//! # pgp-blueprints
//!
//! Encrypt and decrypt files with an OpenPGP key from the command line.
//!
//! A source file is selected either by exact name or by a regular expression
//! searched for in the absolute paths of every file under the working
//! directory. The output is written to a destination folder (created when
//! missing) under a fixed file name.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo build --release
//! # Binary will be at target/release/pgp-blueprints
//! ```
//!
//! ### Encrypt
//!
//! ```bash
//! pgp-blueprints encrypt \
//!     --source-file-name report.csv \
//!     --destination-folder-name outbox \
//!     --destination-file-name report.csv.pgp \
//!     --pgp-private-key "$(cat secret.asc)"
//! ```
//!
//! ### Decrypt the first file matching a pattern
//!
//! ```bash
//! pgp-blueprints decrypt \
//!     --source-file-name-match-type regex_match \
//!     --source-folder-name inbox \
//!     --source-file-name '\.pgp$' \
//!     --destination-file-name report.csv \
//!     --pgp-private-key-file secret.asc
//! ```
//!
//! ## Multiple matches
//!
//! A regex may match several files. `--on-multiple-matches` decides what
//! happens:
//!
//! - `first-only` (decrypt default): only the first file in enumeration order
//! - `last-only` (encrypt default): every file in turn, each overwriting the
//!   destination, so the last one is what remains
//! - `all-to-directory`: one output per match, named after the source
//! - `error`: fail unless exactly one file matched
//!
//! Zero matches is always an error.
//!
//! ## Exit Status
//!
//! | code | meaning |
//! |---|---|
//! | 0 | success |
//! | 1 | unknown error |
//! | 2 | invalid arguments |
//! | 3 | key could not be parsed |
//! | 4 | source file not found / nothing matched |
//! | 5 | encryption or decryption failed |
//! | 6 | I/O error |
//!
//! ## Module Overview
//!
//! - [`path`] - Folder/file name normalization and joining
//! - [`matcher`] - Recursive file discovery and regex filtering
//! - [`crypto`] - OpenPGP key parsing, encryption and decryption (rPGP)
//! - [`key`] - Loading key material from a flag or a file
//! - [`config`] - The flat per-invocation configuration
//! - [`operation`] - Source resolution and destination preparation
//! - [`commands`] - The `encrypt` and `decrypt` operations
//! - [`error`] - Error types and exit codes
//!
//! ## Testing
//!
//! ```bash
//! # Unit tests
//! cargo test --lib
//!
//! # Library-level workflows
//! cargo test --test operation_test
//!
//! # Binary, driven through assert_cmd
//! cargo test --test cli_test
//! ```
//!
//! Test keys live in `tests/fixtures/` and were produced with GnuPG, as were
//! the encrypted fixtures used to check interoperability.

pub mod commands;
pub mod config;
pub mod crypto;
pub mod error;
pub mod key;
pub mod matcher;
pub mod operation;
pub mod path;

// Re-export commonly used types
pub use config::{MatchType, OnMultipleMatches, Operation, OperationConfig};
pub use crypto::{DecryptedPayload, PgpKey};
pub use error::{PgpError, Result};
pub use key::KeySource;

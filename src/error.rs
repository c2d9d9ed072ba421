use std::path::PathBuf;
use thiserror::Error;

/// Process exit statuses.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const UNKNOWN_ERROR: i32 = 1;
    /// Matches the status clap uses for usage errors.
    pub const INVALID_ARGUMENTS: i32 = 2;
    pub const KEY_PARSE_ERROR: i32 = 3;
    pub const FILE_NOT_FOUND: i32 = 4;
    pub const CRYPTO_ERROR: i32 = 5;
    pub const IO_ERROR: i32 = 6;
}

#[derive(Error, Debug)]
pub enum PgpError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to parse PGP key: {0}")]
    KeyParse(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No files matched the pattern '{0}'")]
    NoMatchFound(String),

    #[error("{0} files matched but only a single match is allowed")]
    MultipleMatches(usize),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PgpError {
    /// Exit status reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PgpError::InvalidArguments(_)
            | PgpError::InvalidPattern(_)
            | PgpError::MultipleMatches(_) => exit_code::INVALID_ARGUMENTS,
            PgpError::KeyParse(_) => exit_code::KEY_PARSE_ERROR,
            PgpError::FileNotFound(_) | PgpError::NoMatchFound(_) => exit_code::FILE_NOT_FOUND,
            PgpError::Crypto(_) => exit_code::CRYPTO_ERROR,
            PgpError::Io(_) => exit_code::IO_ERROR,
        }
    }

    /// Map an I/O error on `path`, turning `NotFound` into [`PgpError::FileNotFound`].
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            PgpError::FileNotFound(path.into())
        } else {
            PgpError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, PgpError>;

/// Exit status for a finished run. A panic is reported as an unknown error.
pub fn exit_status(outcome: &std::thread::Result<Result<()>>) -> i32 {
    match outcome {
        Ok(Ok(())) => exit_code::SUCCESS,
        Ok(Err(e)) => e.exit_code(),
        Err(_) => exit_code::UNKNOWN_ERROR,
    }
}

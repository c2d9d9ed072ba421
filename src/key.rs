//! # Key Material
//!
//! The secret key reaches the process either inline on the command line
//! (`--pgp-private-key`, armored text) or from a file
//! (`--pgp-private-key-file`, armored or binary). Either way it is loaded
//! once, parsed into a [`PgpKey`], used for one operation and dropped at exit.
//! Nothing is cached or written back.

use crate::crypto::PgpKey;
use crate::error::{PgpError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the secret key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Key material passed directly as a string.
    Inline(String),
    /// Path to a file holding the key.
    File(PathBuf),
}

impl KeySource {
    /// Build from the two mutually exclusive CLI flags.
    pub fn from_args(inline: Option<String>, file: Option<PathBuf>) -> Result<Self> {
        match (inline, file) {
            (Some(material), None) => Ok(KeySource::Inline(material)),
            (None, Some(path)) => Ok(KeySource::File(path)),
            (Some(_), Some(_)) => Err(PgpError::InvalidArguments(
                "--pgp-private-key and --pgp-private-key-file are mutually exclusive".into(),
            )),
            (None, None) => Err(PgpError::InvalidArguments(
                "a PGP private key is required (--pgp-private-key or --pgp-private-key-file)"
                    .into(),
            )),
        }
    }

    /// Raw key bytes. Relative file paths resolve against `working_dir`.
    pub fn read(&self, working_dir: &Path) -> Result<Vec<u8>> {
        match self {
            KeySource::Inline(material) => Ok(material.as_bytes().to_vec()),
            KeySource::File(path) => {
                let path = working_dir.join(path);
                debug!(path = %path.display(), "reading key file");

                let mut file = File::open(&path).map_err(|e| PgpError::from_io(e, &path))?;
                let mut key_bytes = Vec::new();
                file.read_to_end(&mut key_bytes)?;
                Ok(key_bytes)
            }
        }
    }

    /// Read and parse the key.
    pub fn load(&self, working_dir: &Path) -> Result<PgpKey> {
        let material = self.read(working_dir)?;
        if material.iter().all(u8::is_ascii_whitespace) {
            return Err(PgpError::KeyParse("key material is empty".into()));
        }
        PgpKey::parse(&material)
    }
}

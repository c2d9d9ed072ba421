use crate::config::{Operation, OperationConfig};
use crate::crypto::{DecryptedPayload, PgpKey};
use crate::error::{PgpError, Result};
use crate::operation::prepare_transfers;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decrypt the configured source file with the private key.
///
/// With the default `first-only` policy only the first regex match is
/// decrypted; the rest are ignored. Returns the paths written.
pub fn decrypt(config: &OperationConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let key = config.key.load(&config.working_dir)?;

    let transfers = prepare_transfers(config, Operation::Decrypt)?;

    let mut written = Vec::with_capacity(transfers.len());
    for transfer in transfers {
        decrypt_file(&key, &transfer.source, &transfer.destination)?;
        written.push(transfer.destination);
    }

    println!("File was decrypted into {}", config.destination_display());

    Ok(written)
}

/// Decrypt one file, overwriting `destination`.
pub fn decrypt_file(key: &PgpKey, source: &Path, destination: &Path) -> Result<DecryptedPayload> {
    let ciphertext = fs::read(source).map_err(|e| PgpError::from_io(e, source))?;
    let payload = key.decrypt(&ciphertext)?;

    match &payload {
        DecryptedPayload::Text(text) => {
            debug!(destination = %destination.display(), "writing text payload");
            fs::write(destination, text)?;
        }
        DecryptedPayload::Binary(bytes) => {
            debug!(destination = %destination.display(), "writing binary payload");
            fs::write(destination, bytes)?;
        }
    }

    Ok(payload)
}

use crate::config::{Operation, OperationConfig};
use crate::crypto::PgpKey;
use crate::error::{PgpError, Result};
use crate::operation::prepare_transfers;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encrypt the configured source file(s) to the key's public component.
///
/// With the default `last-only` policy every regex match is encrypted into the
/// same destination in turn, so only the last match's ciphertext remains.
/// Returns the paths written, one per processed source.
pub fn encrypt(config: &OperationConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let key = config.key.load(&config.working_dir)?;

    let transfers = prepare_transfers(config, Operation::Encrypt)?;

    let mut written = Vec::with_capacity(transfers.len());
    for transfer in transfers {
        encrypt_file(&key, &transfer.source, &transfer.destination)?;
        written.push(transfer.destination);
    }

    println!(
        "All files were encrypted into {}",
        config.destination_display()
    );

    Ok(written)
}

/// Encrypt one file, overwriting `destination`.
pub fn encrypt_file(key: &PgpKey, source: &Path, destination: &Path) -> Result<()> {
    let plaintext = fs::read(source).map_err(|e| PgpError::from_io(e, source))?;
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let ciphertext = key.encrypt(&file_name, plaintext)?;

    fs::write(destination, &ciphertext)?;

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes = ciphertext.len(),
        "encrypted file"
    );
    Ok(())
}

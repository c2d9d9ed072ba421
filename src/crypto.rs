//! # OpenPGP Operations
//!
//! Thin wrapper over [rPGP](https://docs.rs/pgp) exposing the three calls the
//! commands need: parse a secret key, encrypt bytes to it, decrypt a message
//! with it.
//!
//! ## Encryption
//!
//! - **Recipient**: first secret subkey whose self-signature allows
//!   encryption, otherwise the primary key
//! - **Container**: SEIPD v1 with AES-256
//! - **Output**: binary OpenPGP packets, literal data tagged binary
//!
//! ## Decryption
//!
//! Armored and binary messages are both accepted. Compressed payloads are
//! inflated. The literal data packet's mode decides whether the result is
//! [`DecryptedPayload::Text`] or [`DecryptedPayload::Binary`].
//!
//! Keys protected by a passphrase are unlocked with an empty password only.

use pgp::{
    composed::{Deserializable, Message, MessageBuilder, SignedSecretKey, SignedSecretSubKey},
    crypto::sym::SymmetricKeyAlgorithm,
    errors::Error as PgpLibError,
    packet::{DataMode, KeyFlags, PublicKey, PublicSubkey},
    types::Password,
};
use rand::rngs::OsRng;
use tracing::debug;

use crate::error::{PgpError, Result};

const ARMOR_PREFIX: &[u8] = b"-----BEGIN";

/// Plaintext recovered from a message, tagged by the literal data mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptedPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl DecryptedPayload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DecryptedPayload::Text(text) => text.as_bytes(),
            DecryptedPayload::Binary(bytes) => bytes,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DecryptedPayload::Text(_))
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed OpenPGP secret key. Its public half is used for encryption.
#[derive(Debug, Clone)]
pub struct PgpKey {
    key: SignedSecretKey,
}

impl PgpKey {
    /// Parse armored or binary secret key material.
    pub fn parse(material: &[u8]) -> Result<Self> {
        let trimmed = trim_leading_whitespace(material);

        let key = if trimmed.starts_with(ARMOR_PREFIX) {
            let text = std::str::from_utf8(trimmed)
                .map_err(|e| PgpError::KeyParse(format!("armored key is not UTF-8: {e}")))?;
            SignedSecretKey::from_string(text).map(|(key, _headers)| key)
        } else {
            SignedSecretKey::from_bytes(trimmed)
        }
        .map_err(|e| PgpError::KeyParse(e.to_string()))?;

        debug!(subkeys = key.secret_subkeys.len(), "parsed secret key");
        Ok(Self { key })
    }

    /// The underlying rPGP key.
    pub fn signed_secret_key(&self) -> &SignedSecretKey {
        &self.key
    }

    /// Encrypt `plaintext` to this key's public component.
    ///
    /// `file_name` is recorded in the literal data packet.
    pub fn encrypt(&self, file_name: &str, plaintext: Vec<u8>) -> Result<Vec<u8>> {
        let mut rng = OsRng;
        let mut builder = MessageBuilder::from_bytes(file_name.to_string(), plaintext)
            .seipd_v1(&mut rng, SymmetricKeyAlgorithm::AES256);

        match select_recipient_key(&self.key) {
            RecipientKey::Primary(pk) => builder.encrypt_to_key(&mut rng, pk),
            RecipientKey::Subkey(subkey) => builder.encrypt_to_key(&mut rng, subkey),
        }
        .map_err(map_pgp_err)?;

        let mut encrypted = Vec::new();
        builder
            .to_writer(&mut rng, &mut encrypted)
            .map_err(map_pgp_err)?;

        Ok(encrypted)
    }

    /// Decrypt an armored or binary OpenPGP message.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<DecryptedPayload> {
        let trimmed = trim_leading_whitespace(ciphertext);

        let message = if trimmed.starts_with(ARMOR_PREFIX) {
            Message::from_armor(trimmed).map(|(message, _headers)| message)
        } else {
            Message::from_bytes(trimmed)
        }
        .map_err(|e| PgpError::Crypto(format!("not an OpenPGP message: {e}")))?;

        let mut message = message
            .decrypt(&Password::empty(), &self.key)
            .map_err(map_pgp_err)?;
        if message.is_compressed() {
            message = message.decompress().map_err(map_pgp_err)?;
        }

        let data = message
            .as_data_vec()
            .map_err(|e| PgpError::Crypto(e.to_string()))?;
        let textual = message
            .literal_data_header()
            .is_some_and(|header| matches!(header.mode(), DataMode::Text | DataMode::Utf8));

        let payload = if textual {
            match String::from_utf8(data) {
                Ok(text) => DecryptedPayload::Text(text),
                Err(e) => DecryptedPayload::Binary(e.into_bytes()),
            }
        } else {
            DecryptedPayload::Binary(data)
        };

        debug!(bytes = payload.len(), text = payload.is_text(), "decrypted message");
        Ok(payload)
    }
}

enum RecipientKey<'a> {
    Primary(&'a PublicKey),
    Subkey(&'a PublicSubkey),
}

fn select_recipient_key(key: &SignedSecretKey) -> RecipientKey<'_> {
    key.secret_subkeys
        .iter()
        .find(|subkey| subkey_supports_encryption(subkey))
        .map(|subkey| RecipientKey::Subkey(subkey.key.public_key()))
        .unwrap_or_else(|| RecipientKey::Primary(key.primary_key.public_key()))
}

fn subkey_supports_encryption(subkey: &SignedSecretSubKey) -> bool {
    subkey
        .signatures
        .iter()
        .any(|sig| key_flags_allow_encryption(&sig.key_flags()))
}

fn key_flags_allow_encryption(flags: &KeyFlags) -> bool {
    flags.encrypt_comms() || flags.encrypt_storage()
}

fn trim_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn map_pgp_err(err: PgpLibError) -> PgpError {
    PgpError::Crypto(err.to_string())
}

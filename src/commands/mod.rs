pub mod decrypt;
pub mod encrypt;

pub use decrypt::{decrypt, decrypt_file};
pub use encrypt::{encrypt, encrypt_file};

//! Encryption tools

mod aes_cipher;

pub use aes_cipher::{AesTool, decrypt, encrypt};

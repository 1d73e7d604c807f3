//! aes-encrypt tool - passphrase AES-256-CBC in the OpenSSL `Salted__` format

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const SALT_MAGIC: &[u8; 8] = b"Salted__";
const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

/// EVP_BytesToKey with MD5 and a single iteration
pub fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut material = Vec::with_capacity(KEY_LEN + IV_LEN);
    let mut previous: Vec<u8> = Vec::new();
    while material.len() < KEY_LEN + IV_LEN {
        let mut block = previous.clone();
        block.extend_from_slice(passphrase);
        block.extend_from_slice(salt);
        previous = md5::compute(&block).0.to_vec();
        material.extend_from_slice(&previous);
    }

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&material[..KEY_LEN]);
    iv.copy_from_slice(&material[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}

pub fn encrypt_with_salt(plaintext: &str, passphrase: &str, salt: [u8; SALT_LEN]) -> Result<String> {
    let (key, iv) = derive_key_iv(passphrase.as_bytes(), &salt);
    let cipher = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| OktoolsError::Crypto(format!("cipher setup failed: {}", e)))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut out = Vec::with_capacity(SALT_MAGIC.len() + SALT_LEN + ciphertext.len());
    out.extend_from_slice(SALT_MAGIC);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(out))
}

/// Encrypt with a fresh random salt
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill(&mut salt);
    encrypt_with_salt(plaintext, passphrase, salt)
}

pub fn decrypt(encoded: &str, passphrase: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let raw = STANDARD
        .decode(compact)
        .map_err(|e| OktoolsError::InvalidInput(format!("ciphertext is not valid base64: {}", e)))?;

    let header = SALT_MAGIC.len() + SALT_LEN;
    if raw.len() <= header || &raw[..SALT_MAGIC.len()] != SALT_MAGIC {
        return Err(OktoolsError::InvalidInput(
            "ciphertext is missing the Salted__ header".to_string(),
        ));
    }

    let (key, iv) = derive_key_iv(passphrase.as_bytes(), &raw[SALT_MAGIC.len()..header]);
    let cipher = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|e| OktoolsError::Crypto(format!("cipher setup failed: {}", e)))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&raw[header..])
        .map_err(|_| OktoolsError::Crypto("wrong key or corrupted data".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| OktoolsError::Crypto("wrong key or corrupted data".to_string()))
}

pub struct AesTool;

impl Tool for AesTool {
    fn id(&self) -> &'static str {
        "aes-encrypt"
    }

    fn name(&self) -> &'static str {
        "AES Encrypt/Decrypt"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Encryption
    }

    fn description(&self) -> &'static str {
        "AES-256 encryption and decryption"
    }

    fn icon(&self) -> &'static str {
        "🔐"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["encrypt", "decrypt"], "default": "encrypt" },
                "key": { "type": "string", "description": "Passphrase" }
            },
            "required": ["key"]
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let key = options.require_str("key")?;
        match options.choice("mode", "encrypt", &["encrypt", "decrypt"])? {
            "decrypt" => decrypt(require_input(input, "the ciphertext")?, &key),
            _ => {
                if input.is_empty() {
                    return Err(OktoolsError::InvalidInput("please enter text to encrypt".to_string()));
                }
                log::debug!("Encrypting {} bytes", input.len());
                encrypt(input, &key)
            }
        }
    }
}

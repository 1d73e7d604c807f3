//! password-generator tool

use rand::Rng;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Which character classes a password draws from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl PasswordPolicy {
    fn from_options(options: &ToolOptions) -> Result<Self> {
        Ok(Self {
            length: options.uint_in("length", 16, 8..=64)? as usize,
            uppercase: options.bool_or("uppercase", true)?,
            lowercase: options.bool_or("lowercase", true)?,
            numbers: options.bool_or("numbers", true)?,
            symbols: options.bool_or("symbols", true)?,
        })
    }

    /// Concatenated alphabet of the enabled classes
    pub fn alphabet(&self) -> Vec<char> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, chars)| chars.chars())
        .collect()
    }
}

pub fn generate_password<R: Rng + ?Sized>(rng: &mut R, policy: &PasswordPolicy) -> Result<String> {
    let alphabet = policy.alphabet();
    if alphabet.is_empty() {
        return Err(OktoolsError::InvalidInput(
            "select at least one character type".to_string(),
        ));
    }
    Ok((0..policy.length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect())
}

pub struct PasswordGeneratorTool;

impl Tool for PasswordGeneratorTool {
    fn id(&self) -> &'static str {
        "password-generator"
    }

    fn name(&self) -> &'static str {
        "Password Generator"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Utilities
    }

    fn description(&self) -> &'static str {
        "Generate secure random passwords"
    }

    fn icon(&self) -> &'static str {
        "🔑"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "length": { "type": "integer", "minimum": 8, "maximum": 64, "default": 16 },
                "uppercase": { "type": "boolean", "default": true },
                "lowercase": { "type": "boolean", "default": true },
                "numbers": { "type": "boolean", "default": true },
                "symbols": { "type": "boolean", "default": true }
            }
        })
    }

    fn process(&self, _input: &str, options: &ToolOptions) -> Result<String> {
        let policy = PasswordPolicy::from_options(options)?;
        // ThreadRng is a CSPRNG seeded from the OS
        generate_password(&mut rand::rng(), &policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_length_and_alphabet() {
        let policy = PasswordPolicy {
            length: 32,
            symbols: false,
            ..Default::default()
        };
        let password = generate_password(&mut StdRng::seed_from_u64(1), &policy).unwrap();
        assert_eq!(password.chars().count(), 32);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_digits_only() {
        let policy = PasswordPolicy {
            length: 8,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };
        let password = generate_password(&mut StdRng::seed_from_u64(2), &policy).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_no_classes_is_error() {
        let opts = ToolOptions::new()
            .with("uppercase", false)
            .with("lowercase", false)
            .with("numbers", false)
            .with("symbols", false);
        assert!(PasswordGeneratorTool.process("", &opts).is_err());
    }

    #[test]
    fn test_length_range() {
        assert!(PasswordGeneratorTool.process("", &ToolOptions::new().with("length", 7)).is_err());
        assert!(PasswordGeneratorTool.process("", &ToolOptions::new().with("length", 65)).is_err());
        let out = PasswordGeneratorTool.process("", &ToolOptions::new()).unwrap();
        assert_eq!(out.chars().count(), 16);
    }
}

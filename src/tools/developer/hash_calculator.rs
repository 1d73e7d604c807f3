//! hash-calculator tool

use serde_json::Value;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

/// Supported digests in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "").as_str() {
            "MD5" => Some(Self::Md5),
            "SHA1" => Some(Self::Sha1),
            "SHA256" => Some(Self::Sha256),
            "SHA512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// Lowercase hex digest of `data`
    pub fn digest(&self, data: &[u8]) -> String {
        match self {
            Self::Md5 => format!("{:x}", md5::compute(data)),
            Self::Sha1 => hex::encode(Sha1::digest(data)),
            Self::Sha256 => hex::encode(Sha256::digest(data)),
            Self::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

fn parse_algorithms(list: &str) -> Result<Vec<HashAlgorithm>> {
    let mut algos = Vec::new();
    for name in list.split(',').filter(|s| !s.trim().is_empty()) {
        let algo = HashAlgorithm::from_str(name).ok_or_else(|| {
            OktoolsError::option("algorithms", format!("unknown algorithm '{}'", name.trim()))
        })?;
        if !algos.contains(&algo) {
            algos.push(algo);
        }
    }
    if algos.is_empty() {
        return Err(OktoolsError::option("algorithms", "select at least one algorithm"));
    }
    algos.sort();
    Ok(algos)
}

pub struct HashCalculatorTool;

impl Tool for HashCalculatorTool {
    fn id(&self) -> &'static str {
        "hash-calculator"
    }

    fn name(&self) -> &'static str {
        "Hash Calculator"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Calculate MD5, SHA1, SHA256, SHA512 hashes"
    }

    fn icon(&self) -> &'static str {
        "#️⃣"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "algorithms": {
                    "type": "string",
                    "default": "MD5,SHA256",
                    "description": "Comma separated list of MD5, SHA1, SHA256, SHA512"
                }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        if input.is_empty() {
            return Err(OktoolsError::InvalidInput(
                "enter text to calculate hashes".to_string(),
            ));
        }
        let algos = parse_algorithms(&options.str_or("algorithms", "MD5,SHA256")?)?;
        Ok(algos
            .iter()
            .map(|a| format!("{}: {}", a.label(), a.digest(input.as_bytes())))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

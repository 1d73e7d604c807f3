//! Error types for oktools
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while running a tool
#[derive(Debug, Error)]
pub enum OktoolsError {
    /// No tool registered under this id
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Input text was rejected by the tool
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An option was missing, of the wrong type, or out of range
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    /// Structured input (XML, cron, JWT, ...) could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Encryption or decryption failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Preference storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Malformed host message
    #[error("Message error: {0}")]
    Message(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid regular expression
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl OktoolsError {
    /// Shorthand for an option error
    pub fn option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for oktools operations
pub type Result<T> = std::result::Result<T, OktoolsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_error() {
        let err = OktoolsError::ToolNotFound("nope".to_string());
        assert_eq!(err.to_string(), "Tool not found: nope");
    }

    #[test]
    fn test_invalid_input_error() {
        let err = OktoolsError::InvalidInput("empty input".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty input");
    }

    #[test]
    fn test_invalid_option_error() {
        let err = OktoolsError::option("indent", "must be between 1 and 8");
        assert_eq!(err.to_string(), "Invalid option 'indent': must be between 1 and 8");
    }

    #[test]
    fn test_parse_error() {
        let err = OktoolsError::Parse("unclosed tag".to_string());
        assert_eq!(err.to_string(), "Parse error: unclosed tag");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OktoolsError = io_err.into();
        assert!(matches!(err, OktoolsError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: OktoolsError = json_err.into();
        assert!(matches!(err, OktoolsError::Json(_)));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err: OktoolsError = regex_err.into();
        assert!(matches!(err, OktoolsError::Regex(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(OktoolsError::InvalidInput("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}

//! Error handling for the stubforge code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! A write suppressed by the ignore policy is never an error: generators report
//! it as an absent result instead.
//!
//! # Examples
//!
//! ```
//! use stubforge_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("missing namespace"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for stubforge generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stubforge generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// OpenAPI error
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// A `$ref` pointer that does not have the expected component shape
    #[error("Unsupported reference '{reference}' (expected {expected}<Name>)")]
    UnsupportedReference {
        /// The pointer as written in the document
        reference: String,
        /// The prefix the pointer should have started with
        expected: &'static str,
    },

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Invalid ignore pattern
    #[error("Invalid ignore pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new unsupported reference error
    pub fn unsupported_reference<S: Into<String>>(reference: S, expected: &'static str) -> Self {
        Self::UnsupportedReference {
            reference: reference.into(),
            expected,
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_reference_message() {
        let err = Error::unsupported_reference("#/definitions/Pet", "#/components/schemas/");
        assert_eq!(
            err.to_string(),
            "Unsupported reference '#/definitions/Pet' (expected #/components/schemas/<Name>)"
        );
    }

    #[test]
    fn test_string_conversion() {
        let err: Error = "bad".into();
        assert!(matches!(err, Error::Config(ref s) if s == "bad"));
    }
}

//! Error types for model analysis and pricing
//!
//! Every error carries a code for categorization. Only a few of them are
//! ever visible to callers of the analyze→price pipeline: parser-internal
//! failures are absorbed by the analyzer and turned into a fallback
//! analysis with an explanatory note.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: Upload admission (rejected before parsing)
//! - **E3xxx**: Parser-internal failures (converted to fallback data)
//! - **E4xxx**: Serialization and configuration errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading file
//! - `E2001`: Unsupported file format
//! - `E2002`: Upload exceeds size ceiling
//! - `E3001`: Malformed mesh content
//! - `E3002`: XML scan error
//! - `E3003`: Unsupported format variant
//! - `E4001`: JSON error
//! - `E4002`: Invalid pricing configuration

use std::io;
use thiserror::Error;

/// Result type for analysis and pricing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing or pricing a model
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading the file
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// File extension is not one of the supported mesh formats
    ///
    /// **Error Code**: E2001
    ///
    /// **Suggestions**:
    /// - Export the model as .obj, .dae, .stl or .ply
    #[error("[E2001] Unsupported format '{0}'. Use: .obj, .dae, .stl, .ply")]
    UnsupportedFormat(String),

    /// Upload is larger than the configured ceiling
    ///
    /// **Error Code**: E2002
    #[error("[E2002] File too large: {size_bytes} bytes exceeds the {limit_mb} MB limit")]
    FileTooLarge {
        /// Size of the rejected upload
        size_bytes: u64,
        /// Configured ceiling in megabytes
        limit_mb: u64,
    },

    /// Mesh content could not be interpreted
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Truncated or corrupted upload
    /// - Non-numeric header counts
    /// - Missing format signature
    #[error("[E3001] Parse error: {0}")]
    Parse(String),

    /// XML scanning error
    ///
    /// **Error Code**: E3002
    #[error("[E3002] XML scan error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Format variant recognized but not decoded
    ///
    /// **Error Code**: E3003
    ///
    /// **Common Causes**:
    /// - Binary STL payloads
    #[error("[E3003] Unsupported feature: {0}")]
    Unsupported(String),

    /// JSON serialization or deserialization error
    ///
    /// **Error Code**: E4001
    #[error("[E4001] JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown material, accessory quality or complexity code
    ///
    /// **Error Code**: E4002
    #[error("[E4002] Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::Parse(format!("Failed to parse floating-point number: {}", err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::Parse(format!("Failed to parse integer: {}", err))
    }
}

impl Error {
    /// Create a Parse error with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "PLY vertex count")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "integer")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::Parse(format!(
            "Failed to parse '{}': expected {}, got '{}'",
            field_name, expected_type, value
        ))
    }

    /// Create an InvalidConfiguration error for an unknown code
    ///
    /// # Arguments
    /// * `kind` - What was being resolved (e.g., "material")
    /// * `value` - The unrecognized code
    /// * `allowed` - The accepted codes
    pub fn unknown_code(kind: &str, value: &str, allowed: &[&str]) -> Self {
        Error::InvalidConfiguration(format!(
            "Unknown {} '{}'. Must be one of: {}",
            kind,
            value,
            allowed.join(", ")
        ))
    }

    /// Whether the error is an admission rejection (raised before parsing)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_) | Error::FileTooLarge { .. }
        )
    }
}

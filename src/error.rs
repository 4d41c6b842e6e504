//! Centralized error types
//!
//! Only configuration and sink setup can fail. Logging calls themselves
//! never return an error.
//! Use `Result<T>` as shorthand for `std::result::Result<T, TagLogError>`.

use std::fmt;
use std::path::PathBuf;

/// All taglog errors
#[derive(Debug)]
pub enum TagLogError {
    // === IO ===
    /// File system operation failed (config read, sink file open, export write)
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Config ===
    /// Config file is not valid TOML or does not match the schema
    ConfigParse { path: PathBuf, reason: String },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },
    /// Scheme name not present in the config
    UnknownScheme { name: String },
}

impl std::error::Error for TagLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for TagLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::ConfigParse { path, reason } => {
                write!(f, "Cannot parse config {}: {}", path.display(), reason)
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::UnknownScheme { name } => write!(f, "Unknown scheme: {}", name),
        }
    }
}

/// Alias for Result with TagLogError
pub type Result<T> = std::result::Result<T, TagLogError>;

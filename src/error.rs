//! Error types and Result aliases for folioterm
//!
//! Command-level failures (unknown command, missing argument, unknown file)
//! never surface here: the session turns them into log entries. These errors
//! only cover construction and host I/O.

use std::fmt;
use std::path::PathBuf;

use crate::content::ContentError;

/// Result type alias for folioterm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for folioterm
#[derive(Debug)]
pub enum Error {
    // === Registry errors ===
    /// Command name is empty or contains whitespace
    InvalidCommandName {
        name: String,
    },

    /// Alias target is not registered
    CommandNotFound {
        command: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === Theme errors ===
    /// Palette not found
    PaletteNotFound {
        name: String,
    },

    /// Palette color could not be parsed
    InvalidColor {
        value: String,
    },

    // === Content errors ===
    /// Persona content failed to load or validate
    Content(ContentError),

    // === External effects ===
    /// Opening an external resource failed
    OpenFailed {
        url: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// JSON errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Registry errors
            Error::InvalidCommandName { name } => {
                write!(f, "Invalid command name '{}': must be a non-empty token without whitespace", name)
            }
            Error::CommandNotFound { command } => {
                write!(f, "Command '{}' is not registered", command)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // Theme errors
            Error::PaletteNotFound { name } => write!(f, "Palette '{}' not found", name),
            Error::InvalidColor { value } => {
                write!(f, "Invalid color '{}': expected #rrggbb", value)
            }

            Error::Content(err) => write!(f, "Content error: {}", err),

            Error::OpenFailed { url, reason } => {
                write!(f, "Failed to open '{}': {}", url, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Content(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<ContentError> for Error {
    fn from(err: ContentError) -> Self {
        Error::Content(err)
    }
}

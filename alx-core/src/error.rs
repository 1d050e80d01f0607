// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for alx

use thiserror::Error;

use crate::Operation;

/// Result type alias
pub type AlxResult<T> = Result<T, AlxError>;

/// Main error type
#[derive(Error, Debug)]
pub enum AlxError {
    #[error("Unknown option for {operation}: {option}")]
    UnknownOption { operation: Operation, option: String },

    #[error("Invalid option for {operation}: {message}")]
    InvalidOption { operation: Operation, message: String },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlxError {
    /// Whether the error was caused by the option values handed to a constructor.
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            AlxError::UnknownOption { .. }
                | AlxError::InvalidOption { .. }
                | AlxError::InvalidMode(_)
                | AlxError::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_option_error() {
        let err = AlxError::UnknownOption {
            operation: Operation::Delete,
            option: "force".into(),
        };
        assert!(err.is_option_error());
        assert!(AlxError::InvalidMode("888".into()).is_option_error());

        assert!(!AlxError::InvalidPath("".into()).is_option_error());
        assert!(!AlxError::Config("missing host".into()).is_option_error());
    }

    #[test]
    fn test_error_display() {
        let err = AlxError::UnknownOption {
            operation: Operation::CreateFile,
            option: "blocksize".into(),
        };
        assert_eq!(format!("{}", err), "Unknown option for create-file: blocksize");

        let err = AlxError::InvalidPath("a\0b".into());
        assert!(format!("{}", err).starts_with("Invalid path"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "options.toml");
        let alx_err: AlxError = io_err.into();
        assert!(matches!(alx_err, AlxError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let alx_err: AlxError = json_err.into();
        assert!(matches!(alx_err, AlxError::Json(_)));
    }
}

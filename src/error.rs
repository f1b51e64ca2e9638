//! Error types for secretbundle operations

use crate::schema::PathError;
use crate::validate::ValidationReport;

/// The main error type for loading and validating secret bundles.
///
/// Error messages carry field paths and source names only; no variant ever
/// embeds a secret value.
///
/// `Display` and `Error` are implemented by hand rather than derived with
/// `thiserror` because the `UnknownPath` variant's `source` field is a plain
/// `String` (the name of the secrets source file), not an error cause.
#[derive(Debug)]
pub enum SecretsError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    UnknownPath { path: String, source: String },
    NotAString { path: String },
    UnknownRole(String),
    Path(PathError),
    Validation(ValidationReport),
}

impl std::fmt::Display for SecretsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretsError::Io(err) => write!(f, "IO error: {err}"),
            SecretsError::Toml(err) => write!(f, "TOML parsing error: {err}"),
            SecretsError::Json(err) => write!(f, "JSON error: {err}"),
            SecretsError::UnknownPath { path, source } => {
                write!(f, "unknown secret path '{path}' in source '{source}'")
            }
            SecretsError::NotAString { path } => {
                write!(f, "secret at '{path}' must be a TOML string")
            }
            SecretsError::UnknownRole(role) => write!(f, "unknown role '{role}'"),
            SecretsError::Path(err) => std::fmt::Display::fmt(err, f),
            SecretsError::Validation(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for SecretsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SecretsError::Io(err) => Some(err),
            SecretsError::Toml(err) => Some(err),
            SecretsError::Json(err) => Some(err),
            SecretsError::UnknownPath { .. }
            | SecretsError::NotAString { .. }
            | SecretsError::UnknownRole(_) => None,
            SecretsError::Path(err) => std::error::Error::source(err),
            SecretsError::Validation(err) => std::error::Error::source(err),
        }
    }
}

impl From<std::io::Error> for SecretsError {
    fn from(err: std::io::Error) -> Self {
        SecretsError::Io(err)
    }
}

impl From<toml::de::Error> for SecretsError {
    fn from(err: toml::de::Error) -> Self {
        SecretsError::Toml(err)
    }
}

impl From<serde_json::Error> for SecretsError {
    fn from(err: serde_json::Error) -> Self {
        SecretsError::Json(err)
    }
}

impl From<PathError> for SecretsError {
    fn from(err: PathError) -> Self {
        SecretsError::Path(err)
    }
}

impl From<ValidationReport> for SecretsError {
    fn from(err: ValidationReport) -> Self {
        SecretsError::Validation(err)
    }
}

/// A type alias for `Result<T, SecretsError>`
///
/// This provides a convenient shorthand for functions that return
/// a result with a `SecretsError` as the error type.
pub type Result<T> = std::result::Result<T, SecretsError>;

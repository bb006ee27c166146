//! Secrets file loading.
//!
//! A missing or malformed secrets file is logged and treated as an empty
//! document. Every other failure is returned to the caller.

use serde_json::Value;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::SecretsDocument;

/// Default secrets file name, relative to the base directory
pub const SECRETS_FILE_NAME: &str = "secrets.json";

/// Secrets loading errors
#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("Secrets file not found: {}", path.display())]
    FileMissing { path: PathBuf },

    #[error("Malformed secrets file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Secrets file {} is not valid UTF-8", path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Secrets file {} must contain a JSON object, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Failed to read secrets file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SecretsError {
    /// Whether startup may continue with an empty document.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::FileMissing { .. } | Self::Parse { .. })
    }
}

/// Which branch a secrets load took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsStatus {
    /// The document was read and parsed
    Loaded { keys: usize },
    /// The file does not exist
    Missing,
    /// The file is not valid JSON; `detail` is the parser message
    Malformed { detail: String },
}

impl SecretsStatus {
    /// Whether the document came from the file
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

impl fmt::Display for SecretsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { keys } => write!(f, "loaded ({keys} keys)"),
            Self::Missing => f.write_str("missing"),
            Self::Malformed { detail } => write!(f, "malformed: {detail}"),
        }
    }
}

/// Result of [`load_secrets`]
#[derive(Debug, Clone, PartialEq)]
pub struct SecretsLoad {
    /// File that was read
    pub path: PathBuf,
    /// Parsed document, empty on fallback
    pub document: SecretsDocument,
    /// Which branch was taken
    pub status: SecretsStatus,
}

/// Read and parse a secrets file, returning every failure.
pub fn read_secrets(path: impl AsRef<Path>) -> Result<SecretsDocument, SecretsError> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SecretsError::FileMissing {
                path: path.to_path_buf(),
            }
        } else {
            SecretsError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let text = String::from_utf8(bytes).map_err(|source| SecretsError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|source| SecretsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(document) => Ok(document),
        other => Err(SecretsError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// Load a secrets file, falling back to an empty document when the file
/// is missing or malformed.
pub fn load_secrets(path: impl AsRef<Path>) -> Result<SecretsLoad, SecretsError> {
    let path = path.as_ref().to_path_buf();

    let (document, status) = match read_secrets(&path) {
        Ok(document) => {
            let keys = document.len();
            tracing::info!(path = %path.display(), keys, "secrets file loaded");
            (document, SecretsStatus::Loaded { keys })
        }
        Err(SecretsError::FileMissing { .. }) => {
            tracing::warn!(
                path = %path.display(),
                "secrets file not found; continuing without secrets"
            );
            (SecretsDocument::new(), SecretsStatus::Missing)
        }
        Err(SecretsError::Parse { source, .. }) => {
            let detail = source.to_string();
            tracing::warn!(
                path = %path.display(),
                error = %detail,
                line = source.line(),
                column = source.column(),
                "secrets file is not valid JSON; continuing without secrets"
            );
            (SecretsDocument::new(), SecretsStatus::Malformed { detail })
        }
        Err(err) => return Err(err),
    };

    Ok(SecretsLoad {
        path,
        document,
        status,
    })
}

/// JSON type name used in diagnostics
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

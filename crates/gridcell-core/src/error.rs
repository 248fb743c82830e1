//! Error types for GridCell

use thiserror::Error;

/// The main error type for GridCell operations
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unique constraint violation: {field} = {value} already exists")]
    UniqueConstraintViolation { field: String, value: String },

    #[error("Invalid field type for '{field}': expected {expected}, got {got}")]
    InvalidFieldType {
        field: String,
        expected: String,
        got: String,
    },

    #[error("Invalid geometry in '{field}': {reason}")]
    InvalidGeometry { field: String, reason: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Value out of range: {field} = {value}")]
    ValueOutOfRange { field: String, value: String },

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for GridCell operations
pub type Result<T> = std::result::Result<T, GridError>;

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        GridError::TomlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::JsonError(err.to_string())
    }
}

impl GridError {
    /// Name of the record field this error is about, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            GridError::MissingField(field)
            | GridError::UniqueConstraintViolation { field, .. }
            | GridError::InvalidFieldType { field, .. }
            | GridError::InvalidGeometry { field, .. }
            | GridError::ValueOutOfRange { field, .. } => Some(field),
            _ => None,
        }
    }
}

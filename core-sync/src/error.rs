use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Invariant violated for {path}: {field} is missing")]
    InvariantViolation { field: String, path: String },

    #[error("Invalid path: {path:?}")]
    InvalidPath { path: String },

    #[error("Invalid checksum for {path}: {checksum:?}")]
    InvalidChecksum {
        path: String,
        checksum: Option<String>,
    },
}

impl MetadataError {
    /// Field path named by an invariant violation
    pub fn violated_field(&self) -> Option<&str> {
        match self {
            MetadataError::InvariantViolation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;

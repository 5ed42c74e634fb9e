use thiserror::Error;

#[derive(Debug, Error)]
pub enum LbopError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid participation policy: {field} — {reason}")]
    InvalidPolicy { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LbopError {
    fn from(e: serde_json::Error) -> Self {
        LbopError::SerializationError(e.to_string())
    }
}

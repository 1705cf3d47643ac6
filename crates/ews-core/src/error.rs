use thiserror::Error;

#[derive(Debug, Error)]
pub enum EwsError {
    /// The workbook layout is not one of the recognised conventions, or it
    /// holds no sheet the extractor can work with.
    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EwsError {
    fn from(e: serde_json::Error) -> Self {
        EwsError::Serialization(e.to_string())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Photo not available: {0}")]
    PhotoUnavailable(String),

    #[error("Failed to decode image '{0}': {1}")]
    ImageDecode(String, String),

    #[error("Path security violation: {0}")]
    PathSecurityViolation(String),

    #[error("Failed to serialize PDF: {0}")]
    SerializationError(String),

    #[error("Failed to write report: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

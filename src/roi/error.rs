/// Errors that can occur while reading or writing ROI files
#[derive(Debug, thiserror::Error)]
pub enum RoiError {
    /// I/O error reading or writing the file
    #[error("Failed to access ROI file: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Content is not a valid ROI file
    #[error("Invalid ROI file: {0}")]
    InvalidFormat(String),
}

use std::path::PathBuf;

/// Errors that can occur while reading or writing workbook files
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from calamine while reading an xlsx workbook
    #[error("Failed to read workbook: {0}")]
    ReadError(#[from] calamine::XlsxError),

    /// Error from rust_xlsxwriter while building an xlsx workbook
    #[error("Failed to write workbook: {0}")]
    WriteError(#[from] rust_xlsxwriter::XlsxError),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Finished workbook could not be moved into place
    #[error("Failed to persist {path}: {source}")]
    PersistError {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// File extension is not a supported sheet format
    #[error("Unsupported sheet format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Sheet exceeds the workbook row/column limits
    #[error("Sheet '{0}' exceeds workbook size limits")]
    TooLarge(String),
}

/// Errors that can occur during a metadata or ROI transfer
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Error from the ISA codec
    #[error("ISA metadata error: {0}")]
    IsaError(#[from] crate::isa::IsaError),

    /// Error reading or writing a workbook
    #[error("Workbook error: {0}")]
    WorkbookError(#[from] crate::workbook::WorkbookError),

    /// Error from the object store
    #[error("Store error: {0}")]
    StoreError(#[from] crate::store::StoreError),

    /// Error reading or writing an ROI file
    #[error("ROI error: {0}")]
    RoiError(#[from] crate::roi::RoiError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur while encoding or decoding ISA metadata
#[derive(Debug, thiserror::Error)]
pub enum IsaError {
    /// Unrecognized ISA scope name
    #[error("Unknown ISA scope '{0}'. Valid options: investigation, study, assay")]
    UnknownScope(String),

    /// Unrecognized assay catalogue revision
    #[error("Unknown assay catalogue revision '{0}'. Valid options: legacy, arc")]
    UnknownRevision(String),

    /// Unrecognized value layout
    #[error("Unknown value layout '{0}'. Valid options: columns, joined")]
    UnknownLayout(String),

    /// Workbook file name too short to derive a sheet name from
    #[error("Cannot derive a sheet name from file name '{0}'")]
    InvalidFileName(String),
}

use std::path::Path;

use super::{RawSheet, WorkbookError};

/// Read a header-less CSV or TSV file as a single sheet
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawSheet>, WorkbookError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(vec![RawSheet { name, rows }])
}

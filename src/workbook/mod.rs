//! # Workbook Files
//!
//! Reads and writes the header-less sheets produced by the ISA codec. Workbooks
//! are `.xlsx` files with one or more worksheets; header-less `.csv` and `.tsv`
//! files are accepted on input as single-sheet workbooks.
//!
//! Writes go to a temporary file next to the destination which is only moved
//! into place once the workbook is complete, so an interrupted export never
//! leaves a truncated file behind.

mod delimited;
mod error;
mod xlsx;

use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::isa::Sheet;

pub use error::WorkbookError;
pub use xlsx::cell_text;

/// Cell text of one worksheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    /// Worksheet name
    pub name: String,
    /// Rows of cell text, blank cells as empty strings
    pub rows: Vec<Vec<String>>,
}

/// File formats a sheet can be read from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetFormat {
    /// Office Open XML workbook
    Xlsx,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl SheetFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, WorkbookError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" => Ok(SheetFormat::Xlsx),
            "csv" => Ok(SheetFormat::Csv),
            "tsv" | "tab" => Ok(SheetFormat::Tsv),
            _ => Err(WorkbookError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read all sheets of a workbook
pub fn read_workbook(path: &Path) -> Result<Vec<RawSheet>, WorkbookError> {
    if !path.exists() {
        return Err(WorkbookError::NotFound(path.to_path_buf()));
    }

    let format = SheetFormat::from_path(path)?;
    debug!("Reading {} as {:?}", path.display(), format);

    match format {
        SheetFormat::Xlsx => xlsx::read_xlsx(path),
        SheetFormat::Csv => delimited::read_delimited(path, b','),
        SheetFormat::Tsv => delimited::read_delimited(path, b'\t'),
    }
}

/// Write sheets to an xlsx workbook, replacing any existing file
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<(), WorkbookError> {
    let bytes = xlsx::xlsx_bytes(sheets)?;
    write_atomically(path, &bytes).map_err(|source| WorkbookError::PersistError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Write bytes through a temporary file in the destination directory
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(&dir)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::SheetRow;
    use tempfile::tempdir;

    fn sample_sheet() -> Sheet {
        Sheet {
            name: "isa_study".to_string(),
            width: 2,
            rows: vec![
                SheetRow::Header("STUDY".to_string()),
                SheetRow::Data {
                    key: "Study Title".to_string(),
                    values: vec!["Mice".to_string(), "12".to_string()],
                },
                SheetRow::Data {
                    key: "Study Identifier".to_string(),
                    values: vec![String::new(), "s1".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SheetFormat::from_path(Path::new("isa.study.xlsx")).unwrap(),
            SheetFormat::Xlsx
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("export.CSV")).unwrap(),
            SheetFormat::Csv
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("export.tsv")).unwrap(),
            SheetFormat::Tsv
        );
        assert!(SheetFormat::from_path(Path::new("isa.study.ods")).is_err());
        assert!(SheetFormat::from_path(Path::new("isa")).is_err());
    }

    #[test]
    fn test_xlsx_write_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("isa.study.xlsx");

        write_workbook(&path, &[sample_sheet()]).unwrap();
        let sheets = read_workbook(&path).unwrap();

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, "isa_study");
        assert_eq!(sheets[0].rows.len(), 3);
        assert_eq!(sheets[0].rows[0][0], "STUDY");
        assert_eq!(sheets[0].rows[1][1], "Mice");
        assert_eq!(sheets[0].rows[1][2], "12");
        assert_eq!(sheets[0].rows[2][1], "");
        assert_eq!(sheets[0].rows[2][2], "s1");
    }

    #[test]
    fn test_read_tsv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("isa.assay.tsv");
        std::fs::write(&path, "ASSAY\t\nMeasurement Type\timaging\tconfocal\n").unwrap();

        let sheets = read_workbook(&path).unwrap();

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, "isa.assay");
        assert_eq!(sheets[0].rows[0], vec!["ASSAY", ""]);
        assert_eq!(sheets[0].rows[1], vec!["Measurement Type", "imaging", "confocal"]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_workbook(Path::new("/nonexistent/isa.study.xlsx")).unwrap_err();
        assert!(matches!(err, WorkbookError::NotFound(_)));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("isa.study.xlsx");
        std::fs::write(&path, b"stale").unwrap();

        write_workbook(&path, &[sample_sheet()]).unwrap();

        assert_eq!(read_workbook(&path).unwrap()[0].rows.len(), 3);
    }

    #[test]
    fn test_write_atomically_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("isa.study.xlsx");

        let err = write_workbook(&path, &[sample_sheet()]).unwrap_err();
        assert!(matches!(err, WorkbookError::PersistError { .. }));
    }
}

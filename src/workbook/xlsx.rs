use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use log::debug;
use rust_xlsxwriter::Workbook;
use std::path::Path;

use super::{RawSheet, WorkbookError};
use crate::isa::Sheet;

/// Read every worksheet of an xlsx workbook as text rows
pub fn read_xlsx(path: &Path) -> Result<Vec<RawSheet>, WorkbookError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let rows = range_rows(&range);
        debug!("Read sheet '{}' with {} rows", name, rows.len());
        sheets.push(RawSheet { name, rows });
    }

    Ok(sheets)
}

/// Rows of a range as strings, re-anchored at column A.
///
/// calamine ranges start at the first used cell, so a sheet whose first column
/// is blank would otherwise shift every key into the value columns.
fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let offset = range.start().map_or(0, |(_, col)| col as usize);
    range
        .rows()
        .map(|cells| {
            let mut row = vec![String::new(); offset];
            row.extend(cells.iter().map(cell_text));
            row
        })
        .collect()
}

/// Text of a single cell. Blank cells become empty strings.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(dt) => dt.clone(),
        Data::DurationIso(d) => d.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

/// Build an xlsx workbook with one worksheet per sheet, as bytes
pub fn xlsx_bytes(sheets: &[Sheet]) -> Result<Vec<u8>, WorkbookError> {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (r, cells) in sheet.to_matrix().iter().enumerate() {
            let row = u32::try_from(r).map_err(|_| WorkbookError::TooLarge(sheet.name.clone()))?;
            for (c, cell) in cells.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let col =
                    u16::try_from(c).map_err(|_| WorkbookError::TooLarge(sheet.name.clone()))?;
                worksheet.write_string(row, col, cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

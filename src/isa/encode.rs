use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::bucket::MetadataBucket;
use super::namespace::section_label;
use super::values::value_tokens;
use super::IsaError;

/// Longest worksheet name a workbook accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// How an entry's values are laid out across cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueLayout {
    /// One cell per value
    #[default]
    Columns,
    /// All values joined with `", "` into a single cell
    Joined,
}

impl fmt::Display for ValueLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueLayout::Columns => write!(f, "columns"),
            ValueLayout::Joined => write!(f, "joined"),
        }
    }
}

impl FromStr for ValueLayout {
    type Err = IsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "columns" => Ok(ValueLayout::Columns),
            "joined" => Ok(ValueLayout::Joined),
            _ => Err(IsaError::UnknownLayout(s.to_string())),
        }
    }
}

/// One row of an ISA sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRow {
    /// Section header, labelled with the namespace's last component
    Header(String),
    /// Key followed by its value cells
    Data {
        /// Entry key
        key: String,
        /// Value cells, not yet padded
        values: Vec<String>,
    },
}

impl SheetRow {
    /// Cells of this row padded or truncated to `width` value columns
    pub fn cells(&self, width: usize) -> Vec<String> {
        let mut cells = Vec::with_capacity(width + 1);
        match self {
            SheetRow::Header(label) => cells.push(label.clone()),
            SheetRow::Data { key, values } => {
                cells.push(key.clone());
                cells.extend(values.iter().take(width).cloned());
            }
        }
        cells.resize(width + 1, String::new());
        cells
    }
}

/// A header-less sheet ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Worksheet name
    pub name: String,
    /// Number of value columns after the key column
    pub width: usize,
    /// Rows in output order
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    /// Rectangular cell matrix of the sheet
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|row| row.cells(self.width)).collect()
    }
}

/// Worksheet name for a workbook file name.
///
/// Takes the first three characters, an underscore, then everything from the
/// fifth character with the `.xlsx` extension removed: `isa.study.xlsx` becomes
/// `isa_study`. The result is capped at [`MAX_SHEET_NAME_LEN`] characters.
pub fn sheet_name(file_name: &str) -> Result<String, IsaError> {
    let stem = file_name.strip_suffix(".xlsx").unwrap_or(file_name);
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < 5 {
        return Err(IsaError::InvalidFileName(file_name.to_string()));
    }

    let name: String = chars[..3]
        .iter()
        .chain(std::iter::once(&'_'))
        .chain(chars[4..].iter())
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    Ok(name)
}

/// Flatten a bucket into sheet rows.
///
/// Returns `None` for an empty bucket, in which case no workbook should be
/// written. In [`ValueLayout::Columns`] the sheet is as wide as the longest
/// value list in the bucket.
pub fn encode_bucket_to_sheet(
    bucket: &MetadataBucket,
    layout: ValueLayout,
    file_name: &str,
) -> Result<Option<Sheet>, IsaError> {
    if bucket.is_empty() {
        return Ok(None);
    }

    let mut rows = Vec::new();
    let mut width = 0;

    for (namespace, entries) in bucket {
        rows.push(SheetRow::Header(section_label(namespace).to_string()));

        for (key, values) in entries {
            let mut tokens = value_tokens(values);
            if layout == ValueLayout::Joined {
                tokens = vec![tokens.join(", ")];
            }
            width = width.max(tokens.len());
            rows.push(SheetRow::Data {
                key: key.clone(),
                values: tokens,
            });
        }
    }

    Ok(Some(Sheet {
        name: sheet_name(file_name)?,
        width,
        rows,
    }))
}

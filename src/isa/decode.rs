use indexmap::IndexMap;

use super::bucket::{Entries, MetadataBucket};
use super::namespace::Scope;
use super::values::{quote_values, trim_trailing_empty};

/// Decoder position within a sheet
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// No section header seen yet, rows are ignored
    NoNamespace,
    /// Rows belong to this namespace
    InNamespace(String),
}

/// True if a first cell names a section: non-empty and entirely upper case
pub fn is_section_header(cell: &str) -> bool {
    let cell = cell.trim();
    cell.chars().any(char::is_uppercase) && !cell.chars().any(char::is_lowercase)
}

/// Decode the rows of one sheet.
///
/// See [`decode_rows_into`] for the row rules.
pub fn decode_sheet_to_bucket(rows: &[Vec<String>], scope: Scope) -> MetadataBucket {
    let mut bucket = MetadataBucket::new();
    decode_rows_into(&mut bucket, rows, scope);
    bucket
}

/// Decode the rows of one sheet into an existing bucket.
///
/// A row whose first cell is upper case opens the namespace
/// `ARC:ISA:<SCOPE>:<cell>`. Following rows are entries of that namespace:
/// trimmed first cell as key, remaining cells as values with the trailing
/// empty run removed. Rows before the first header and rows with an empty key
/// are skipped.
pub fn decode_rows_into(bucket: &mut MetadataBucket, rows: &[Vec<String>], scope: Scope) {
    let mut cursor = Cursor::NoNamespace;

    for row in rows {
        let Some((first, rest)) = row.split_first() else {
            continue;
        };

        if is_section_header(first) {
            let namespace = scope.namespace(first.trim());
            bucket.reset_namespace(&namespace);
            cursor = Cursor::InNamespace(namespace);
            continue;
        }

        let Cursor::InNamespace(namespace) = &cursor else {
            continue;
        };

        let key = first.trim();
        if key.is_empty() {
            continue;
        }

        let mut values: Vec<String> = rest.iter().map(|v| v.trim().to_string()).collect();
        trim_trailing_empty(&mut values);
        bucket.insert(namespace, key, values);
    }
}

/// Key → quoted value string map as uploaded to the object store
pub fn annotation_map(entries: &Entries) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(key, values)| (key.clone(), quote_values(values)))
        .collect()
}

use anyhow::{Context, Result};
use std::path::PathBuf;

use omero_isa::isa::{annotation_map, decode_rows_into, section_label, MetadataBucket, Scope};
use omero_isa::workbook::read_workbook;

/// Display the sections of a workbook and the values that would be uploaded
pub fn run(file: PathBuf, scope: Scope) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let sheets = read_workbook(&file).context("Failed to read workbook")?;
    let mut bucket = MetadataBucket::new();
    for sheet in &sheets {
        decode_rows_into(&mut bucket, &sheet.rows, scope);
    }

    println!("ISA Workbook Information");
    println!("========================");
    println!("File: {}", file.display());
    println!("Scope: {}", scope);
    println!();

    println!("Sheets:");
    for sheet in &sheets {
        println!("  {} ({} rows)", sheet.name, sheet.rows.len());
    }
    println!();

    if bucket.is_empty() {
        println!("No sections found.");
        return Ok(());
    }

    println!("Sections:");
    for (namespace, entries) in &bucket {
        println!("  [{}] {}", section_label(namespace), namespace);
        for (key, value) in annotation_map(entries) {
            println!("    {}: {}", key, value);
        }
    }

    Ok(())
}

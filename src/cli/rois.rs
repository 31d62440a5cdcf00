use anyhow::{Context, Result};
use log::warn;
use std::path::PathBuf;

use omero_isa::store::parse_object_id;
use omero_isa::transfer::{export_rois, import_rois};

use super::config::Config;
use super::connection::{connect, ConnectionArgs};

/// Write ROI files for a Dataset or Image
pub fn run_export(
    id: &str,
    output_dir: PathBuf,
    connection: ConnectionArgs,
    config: Config,
) -> Result<()> {
    let id = match parse_object_id(id) {
        Ok(id) => id,
        Err(e) => {
            warn!("{}", e);
            println!("Invalid ID '{}'. Nothing exported.", id);
            return Ok(());
        }
    };

    let settings = connection.resolve(config.connection)?;
    let session = connect(&settings)?;
    let written = export_rois(&*session, id, &output_dir)
        .with_context(|| format!("Failed to export ROIs of {}", id))?;
    session.close().context("Failed to close the OMERO session")?;

    if written.is_empty() {
        println!("No Dataset or Image with ID {}.", id);
    }
    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Save ROI files onto the images they were exported from or retargeted to
pub fn run_import(files: &[PathBuf], connection: ConnectionArgs, config: Config) -> Result<()> {
    let settings = connection.resolve(config.connection)?;
    let mut session = connect(&settings)?;

    for path in files {
        match import_rois(&mut *session, path) {
            Ok(Some(count)) => println!("{}: {} ROIs imported", path.display(), count),
            Ok(None) => println!("{}: target image not found", path.display()),
            Err(e) => {
                warn!("Error importing {}: {}", path.display(), e);
                println!("{}: failed ({})", path.display(), e);
            }
        }
    }

    session.close().context("Failed to save changes to OMERO")?;
    Ok(())
}

use anyhow::{Context, Result};
use log::warn;
use std::path::PathBuf;

use omero_isa::isa::Scope;
use omero_isa::store::parse_object_id;
use omero_isa::transfer::{import_metadata, target_kind, FileOutcome};

use super::config::Config;
use super::connection::{connect, ConnectionArgs};

/// Upload workbooks of one scope onto a Project or Dataset
pub fn run(
    scope: Scope,
    id: &str,
    files: &[PathBuf],
    connection: ConnectionArgs,
    config: Config,
) -> Result<()> {
    let kind = target_kind(scope);
    let id = match parse_object_id(id) {
        Ok(id) => id,
        Err(e) => {
            warn!("{}", e);
            println!("Invalid OMERO ID '{}'. Nothing imported.", id);
            return Ok(());
        }
    };

    let settings = connection.resolve(config.connection)?;
    let mut session = connect(&settings)?;
    let report = import_metadata(&mut *session, scope, id, files)
        .with_context(|| format!("Failed to import metadata onto {} {}", kind, id))?;
    session.close().context("Failed to save changes to OMERO")?;

    let Some(target) = &report.target else {
        println!("{} with ID {} not found. Nothing imported.", kind, id);
        return Ok(());
    };

    println!("Import into {} {} ({})", target.kind, target.id, target.name);
    println!("=================");
    for (path, outcome) in &report.files {
        match outcome {
            FileOutcome::Applied(n) => println!("  {}: {} annotations", path.display(), n),
            FileOutcome::Empty => println!("  {}: no {} sections", path.display(), scope),
            FileOutcome::Failed(reason) => println!("  {}: failed ({})", path.display(), reason),
        }
    }
    println!("Total annotations created: {}", report.annotations_created());

    Ok(())
}

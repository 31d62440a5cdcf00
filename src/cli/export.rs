use anyhow::{Context, Result};
use log::warn;
use std::path::PathBuf;

use omero_isa::isa::{AssayRevision, Catalogues, ValueLayout};
use omero_isa::store::{parse_object_id, ObjectKind};
use omero_isa::transfer::{fetch_metadata, save_metadata, ExportOptions};

use super::config::{Config, ExportConfig};
use super::connection::{connect, ConnectionArgs};

/// Export settings given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub layout: Option<ValueLayout>,
    pub extra_layout: Option<ValueLayout>,
    pub assay_revision: Option<AssayRevision>,
}

impl Overrides {
    /// Flags over config values over defaults
    fn into_options(self, config: ExportConfig) -> ExportOptions {
        let defaults = ExportOptions::default();
        let revision = self
            .assay_revision
            .or(config.assay_revision)
            .unwrap_or_default();

        ExportOptions {
            output_dir: self
                .output_dir
                .or(config.output_dir)
                .unwrap_or(defaults.output_dir),
            layout: self
                .layout
                .or(config.value_layout)
                .unwrap_or(defaults.layout),
            extra_layout: self
                .extra_layout
                .or(config.extra_value_layout)
                .unwrap_or(defaults.extra_layout),
            catalogues: Catalogues::new(revision),
        }
    }
}

/// Export the metadata of one Project or Dataset to workbooks
pub fn run(
    id: &str,
    kind: ObjectKind,
    overrides: Overrides,
    connection: ConnectionArgs,
    config: Config,
) -> Result<()> {
    let id = match parse_object_id(id) {
        Ok(id) => id,
        Err(e) => {
            warn!("{}", e);
            println!("Invalid {} ID '{}'. Nothing exported.", kind, id);
            return Ok(());
        }
    };

    let options = overrides.into_options(config.export);
    let settings = connection.resolve(config.connection)?;

    let session = connect(&settings)?;
    let metadata = fetch_metadata(&*session, kind, id, &options.catalogues)
        .with_context(|| format!("Failed to fetch metadata of {} {}", kind, id))?;
    session.close().context("Failed to close the OMERO session")?;

    let report = save_metadata(&metadata, &options).context("Failed to write workbooks")?;

    println!("Export of {} {}", kind, id);
    println!("=================");
    for path in &report.written {
        println!("  Wrote   {}", path.display());
    }
    for bucket in &report.skipped {
        println!("  Skipped {} (no metadata)", bucket.file_name());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let overrides = Overrides {
            layout: Some(ValueLayout::Joined),
            ..Default::default()
        };
        let config = ExportConfig {
            output_dir: Some(PathBuf::from("from-config")),
            value_layout: Some(ValueLayout::Columns),
            extra_value_layout: None,
            assay_revision: Some(AssayRevision::Arc),
        };

        let options = overrides.into_options(config);
        assert_eq!(options.output_dir, PathBuf::from("from-config"));
        assert_eq!(options.layout, ValueLayout::Joined);
        assert_eq!(options.extra_layout, ValueLayout::Joined);
        assert_eq!(options.catalogues.assay_revision(), AssayRevision::Arc);
    }

    #[test]
    fn test_defaults_without_config() {
        let options = Overrides::default().into_options(ExportConfig::default());
        assert_eq!(options.output_dir, PathBuf::from("."));
        assert_eq!(options.layout, ValueLayout::Columns);
        assert_eq!(options.catalogues.assay_revision(), AssayRevision::Legacy);
    }
}

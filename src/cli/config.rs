//! TOML configuration file support.
//!
//! Connection details and export defaults can live in a config file instead of
//! being passed as flags on every run:
//!
//! ```toml
//! # omero-isa.toml
//! [connection]
//! host = "file:///data/omero-snapshot.json"
//! username = "alice"
//!
//! [export]
//! output_dir = "metadata"
//! value_layout = "columns"
//! extra_value_layout = "joined"
//! assay_revision = "arc"
//! ```
//!
//! Command-line flags and `OMERO_*` environment variables take precedence.

use anyhow::{Context, Result};
use omero_isa::isa::{AssayRevision, ValueLayout};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for omero-isa.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Object store connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Workbook export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Connection settings; any missing value is prompted for.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectionConfig {
    /// Server host or snapshot location.
    pub host: Option<String>,

    /// User name.
    pub username: Option<String>,

    /// Password. Prefer the OMERO_PASSWORD environment variable.
    pub password: Option<String>,
}

/// Configuration for the export command.
#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// Directory the workbooks are written to.
    pub output_dir: Option<PathBuf>,

    /// Value layout of the ISA workbooks.
    pub value_layout: Option<ValueLayout>,

    /// Value layout of ExtraMetadata.xlsx.
    pub extra_value_layout: Option<ValueLayout>,

    /// Assay catalogue revision (legacy or arc).
    pub assay_revision: Option<AssayRevision>,
}

impl Config {
    /// Load configuration from an optional TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

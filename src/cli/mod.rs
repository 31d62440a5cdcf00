use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use omero_isa::isa::{AssayRevision, Scope, ValueLayout};
use omero_isa::store::ObjectKind;
use std::path::PathBuf;

mod config;
mod connection;
mod export;
mod import;
mod inspect;
mod rois;

use config::Config;
use connection::ConnectionArgs;

/// omero-isa - ISA metadata workbooks for OMERO projects and datasets
#[derive(Parser)]
#[command(name = "omero-isa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// ISA scope of a workbook.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScopeArg {
    /// Investigation sections, attached to a Project
    Investigation,
    /// Study sections, attached to a Project
    Study,
    /// Assay sections, attached to a Dataset
    Assay,
}

/// Cell layout for multi-value entries.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LayoutArg {
    /// One cell per value
    Columns,
    /// All values joined into a single cell
    Joined,
}

/// Assay section catalogue revision.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RevisionArg {
    /// Seven assay sections
    Legacy,
    /// Adds ASSAY PERFORMERS
    Arc,
}

/// Object type to export from.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum KindArg {
    /// OMERO Project
    #[default]
    Project,
    /// OMERO Dataset
    Dataset,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Investigation => Scope::Investigation,
            ScopeArg::Study => Scope::Study,
            ScopeArg::Assay => Scope::Assay,
        }
    }
}

impl From<LayoutArg> for ValueLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Columns => ValueLayout::Columns,
            LayoutArg::Joined => ValueLayout::Joined,
        }
    }
}

impl From<RevisionArg> for AssayRevision {
    fn from(arg: RevisionArg) -> Self {
        match arg {
            RevisionArg::Legacy => AssayRevision::Legacy,
            RevisionArg::Arc => AssayRevision::Arc,
        }
    }
}

impl From<KindArg> for ObjectKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Project => ObjectKind::Project,
            KindArg::Dataset => ObjectKind::Dataset,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export ISA metadata of a Project or Dataset to xlsx workbooks
    Export {
        /// Project or Dataset ID
        #[arg(value_name = "ID")]
        id: String,

        /// Object type the ID refers to
        #[arg(long = "object-type", default_value = "project", value_enum)]
        kind: KindArg,

        /// Output directory for the workbooks
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Cell layout of the ISA workbooks
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,

        /// Cell layout of ExtraMetadata.xlsx
        #[arg(long, value_enum)]
        extra_layout: Option<LayoutArg>,

        /// Assay catalogue revision used for classification
        #[arg(long, value_enum)]
        assay_revision: Option<RevisionArg>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Import ISA workbooks onto a Project (investigation, study) or Dataset (assay)
    Import {
        /// ISA scope of the workbooks
        #[arg(short = 's', long, value_enum)]
        scope: ScopeArg,

        /// Target Project or Dataset ID
        #[arg(long)]
        id: String,

        /// Workbooks to import (.xlsx, .csv or .tsv)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Show the sections of a workbook as they would be uploaded
    Inspect {
        /// Workbook path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// ISA scope used to qualify section headers
        #[arg(short = 's', long, default_value = "investigation", value_enum)]
        scope: ScopeArg,
    },

    /// Export the ROIs of a Dataset or Image to JSON files
    ExportRois {
        /// Dataset or Image ID
        #[arg(value_name = "ID")]
        id: String,

        /// Output directory
        #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Import ROI JSON files onto the images they name
    ImportRois {
        /// ROI files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Export {
            id,
            kind,
            output_dir,
            layout,
            extra_layout,
            assay_revision,
            connection,
        } => export::run(
            &id,
            ObjectKind::from(kind),
            export::Overrides {
                output_dir,
                layout: layout.map(ValueLayout::from),
                extra_layout: extra_layout.map(ValueLayout::from),
                assay_revision: assay_revision.map(AssayRevision::from),
            },
            connection,
            config,
        ),
        Commands::Import {
            scope,
            id,
            files,
            connection,
        } => import::run(Scope::from(scope), &id, &files, connection, config),
        Commands::Inspect { file, scope } => inspect::run(file, Scope::from(scope)),
        Commands::ExportRois {
            id,
            output_dir,
            connection,
        } => rois::run_export(&id, output_dir, connection, config),
        Commands::ImportRois { files, connection } => {
            rois::run_import(&files, connection, config)
        }
    }
}

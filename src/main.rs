//! # omero-isa
//!
//! Command-line tool for moving ISA metadata and ROIs between OMERO and local
//! files.
//!
//! ## Usage
//!
//! ```bash
//! # Export the ISA workbooks of Project 1270
//! omero-isa export 1270 --host omero.json -u alice -o metadata/
//!
//! # Upload an edited study workbook back onto the project
//! omero-isa import -s study --id 1270 metadata/isa.study.xlsx
//!
//! # Preview what a workbook would upload
//! omero-isa inspect -s assay metadata/isa.assay.xlsx
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}

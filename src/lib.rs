//! # omero-isa - ISA Metadata Transfer for OMERO
//!
//! `omero-isa` moves ISA (Investigation / Study / Assay) metadata between an
//! OMERO-style bio-imaging object store and local spreadsheet workbooks, and
//! carries the JSON interchange format for regions of interest.
//!
//! ## Key Features
//!
//! - **Namespaced Key-Value Metadata**: Map annotations under
//!   `ARC:ISA:<SCOPE>:<SECTION>` namespaces are sorted into Investigation,
//!   Study and Assay buckets in catalogue order; everything else is kept as
//!   extra metadata.
//!
//! - **Round-Trippable Workbooks**: Each bucket becomes a header-less sheet of
//!   section headers and key/value rows. Reading the sheet back restores the
//!   same namespaces, keys and value lists.
//!
//! - **Multi-Value Fields**: Values that the store holds as quoted token lists
//!   (`'a', ' ', 'b'`) are spread over columns on export and re-quoted on
//!   import, keeping interior blanks aligned.
//!
//! - **ROI Interchange**: Typed model of the ROI JSON file used to move shapes
//!   between images.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omero_isa::store::{ConnectionSettings, ObjectKind, Session, SnapshotStore};
//! use omero_isa::transfer::{export_metadata, ExportOptions};
//!
//! let settings = ConnectionSettings::new("server.json", "alice", "secret");
//! let session = Session::new(SnapshotStore::connect(&settings)?);
//!
//! let report = export_metadata(&*session, ObjectKind::Project, 1270, &ExportOptions::default())?;
//! for path in &report.written {
//!     println!("Wrote {}", path.display());
//! }
//! session.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`isa`]: Namespace catalogues, bucket classification and the sheet codec
//! - [`workbook`]: xlsx/csv/tsv reading and atomic xlsx writing
//! - [`store`]: Object store trait, connection settings and a JSON snapshot store
//! - [`transfer`]: Export and import operations with per-file error reporting
//! - [`roi`]: ROI interchange file model
//!
//! ## Workbook Layout
//!
//! | File | Sheet | Content |
//! |------|-------|---------|
//! | isa.investigation.xlsx | isa_investigation | Investigation sections |
//! | isa.study.xlsx | isa_study | Study sections |
//! | isa.assay.xlsx | isa_assay | Assay sections |
//! | ExtraMetadata.xlsx | Ext_aMetadata | All other namespaces |
//!
//! A workbook is only written when its bucket holds at least one namespace.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod isa;
pub mod roi;
pub mod store;
pub mod transfer;
pub mod workbook;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::isa::{
        annotation_map, classify_and_collect, decode_sheet_to_bucket, encode_bucket_to_sheet,
        AssayRevision, Bucket, Catalogues, IsaError, IsaMetadata, MapAnnotation, MetadataBucket,
        Scope, Sheet, SheetRow, ValueLayout,
    };
    pub use crate::roi::{Geometry, Roi, RoiError, RoiFile, Shape};
    pub use crate::store::{
        ConnectionSettings, MetadataStore, ObjectKind, ObjectRef, Session, SnapshotStore,
        StoreError,
    };
    pub use crate::transfer::{
        apply_metadata, export_metadata, extract_metadata, fetch_metadata, import_metadata,
        save_metadata, ExportOptions, ExportReport, ImportReport, TransferError,
    };
    pub use crate::workbook::{read_workbook, write_workbook, RawSheet, WorkbookError};
}

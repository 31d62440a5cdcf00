//! # Transfer Operations
//!
//! Moves ISA metadata and ROIs between a [`MetadataStore`] and local files.
//!
//! Failures are graded: a missing target object or an unreadable input file is
//! logged and yields an empty result so the rest of the run can continue, while
//! store and output errors are returned to the caller. An empty bucket is not
//! an error; its workbook is simply not written.

mod error;
mod rois;

use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::isa::{
    annotation_map, classify_and_collect, decode_rows_into, encode_bucket_to_sheet, Bucket,
    Catalogues, IsaMetadata, MetadataBucket, Scope, ValueLayout,
};
use crate::store::{MetadataStore, ObjectKind, ObjectRef, StoreError};
use crate::workbook::{read_workbook, write_workbook, WorkbookError};

pub use error::TransferError;
pub use rois::{export_image_rois, export_rois, import_rois};

/// Object type that metadata of a scope is attached to
pub fn target_kind(scope: Scope) -> ObjectKind {
    match scope {
        Scope::Investigation | Scope::Study => ObjectKind::Project,
        Scope::Assay => ObjectKind::Dataset,
    }
}

/// Settings for writing metadata workbooks
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the workbooks are written to
    pub output_dir: PathBuf,
    /// Value layout of the ISA workbooks
    pub layout: ValueLayout,
    /// Value layout of the extra metadata workbook
    pub extra_layout: ValueLayout,
    /// Section catalogues used for classification
    pub catalogues: Catalogues,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            layout: ValueLayout::Columns,
            extra_layout: ValueLayout::Joined,
            catalogues: Catalogues::default(),
        }
    }
}

/// Outcome of writing the metadata workbooks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Workbooks written, in bucket order
    pub written: Vec<PathBuf>,
    /// Buckets without metadata, for which no workbook was written
    pub skipped: Vec<Bucket>,
}

/// Fetch and classify the map annotations of an object.
///
/// An object that does not exist is logged and yields four empty buckets.
pub fn fetch_metadata<S: MetadataStore + ?Sized>(
    store: &S,
    kind: ObjectKind,
    id: i64,
    catalogues: &Catalogues,
) -> Result<IsaMetadata, StoreError> {
    let Some(object) = store.get_object(kind, id)? else {
        warn!("{} with ID {} not found", kind, id);
        return Ok(IsaMetadata::new());
    };

    let annotations = store.list_annotations(&object)?;
    info!(
        "Fetched {} annotations from {} {} ({})",
        annotations.len(),
        kind,
        id,
        object.name
    );

    Ok(classify_and_collect(&annotations, catalogues))
}

/// Write one workbook per non-empty bucket into the output directory
pub fn save_metadata(
    metadata: &IsaMetadata,
    options: &ExportOptions,
) -> Result<ExportReport, TransferError> {
    let mut report = ExportReport::default();

    for (bucket, data) in metadata.iter() {
        let file_name = bucket.file_name();
        let layout = match bucket {
            Bucket::Other => options.extra_layout,
            _ => options.layout,
        };

        let Some(sheet) = encode_bucket_to_sheet(data, layout, file_name)? else {
            info!("No relevant metadata found for {}", file_name);
            report.skipped.push(bucket);
            continue;
        };

        fs::create_dir_all(&options.output_dir)?;
        let path = options.output_dir.join(file_name);
        write_workbook(&path, &[sheet])?;
        info!("Wrote {} namespaces to {}", data.len(), path.display());
        report.written.push(path);
    }

    Ok(report)
}

/// Fetch an object's metadata and write its workbooks
pub fn export_metadata<S: MetadataStore + ?Sized>(
    store: &S,
    kind: ObjectKind,
    id: i64,
    options: &ExportOptions,
) -> Result<ExportReport, TransferError> {
    let metadata = fetch_metadata(store, kind, id, &options.catalogues)?;
    save_metadata(&metadata, options)
}

/// Decode every sheet of a workbook into one bucket
pub fn try_extract_metadata(path: &Path, scope: Scope) -> Result<MetadataBucket, WorkbookError> {
    let mut bucket = MetadataBucket::new();
    for sheet in read_workbook(path)? {
        decode_rows_into(&mut bucket, &sheet.rows, scope);
    }
    Ok(bucket)
}

/// Decode a workbook, logging read failures and returning an empty bucket
pub fn extract_metadata(path: &Path, scope: Scope) -> MetadataBucket {
    try_extract_metadata(path, scope).unwrap_or_else(|e| {
        error!("Error reading {}: {}", path.display(), e);
        MetadataBucket::new()
    })
}

/// Upload a bucket as one map annotation per namespace, returning the count
pub fn apply_metadata<S: MetadataStore + ?Sized>(
    store: &mut S,
    object: &ObjectRef,
    bucket: &MetadataBucket,
) -> Result<usize, StoreError> {
    let mut created = 0;
    for (namespace, entries) in bucket {
        store.create_map_annotation(object, &annotation_map(entries), namespace)?;
        created += 1;
    }
    info!(
        "Applied {} namespaces to {} {}",
        created, object.kind, object.id
    );
    Ok(created)
}

/// What happened to one input file of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Metadata uploaded as this many annotations
    Applied(usize),
    /// File read, but it held no sections
    Empty,
    /// File could not be read
    Failed(String),
}

/// Outcome of importing workbooks onto an object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Target object, `None` if it was not found
    pub target: Option<ObjectRef>,
    /// Per-file results, in input order
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl ImportReport {
    /// Total annotations created
    pub fn annotations_created(&self) -> usize {
        self.files
            .iter()
            .map(|(_, outcome)| match outcome {
                FileOutcome::Applied(n) => *n,
                _ => 0,
            })
            .sum()
    }
}

/// Upload workbooks of one scope onto the Project or Dataset with `id`.
///
/// A missing target is logged and nothing is read. Each file is handled on its
/// own: an unreadable file is logged and skipped.
pub fn import_metadata<S: MetadataStore + ?Sized>(
    store: &mut S,
    scope: Scope,
    id: i64,
    files: &[PathBuf],
) -> Result<ImportReport, TransferError> {
    let kind = target_kind(scope);
    let Some(object) = store.get_object(kind, id)? else {
        warn!("Invalid OMERO ID: {} {} not found", kind, id);
        return Ok(ImportReport::default());
    };

    let mut report = ImportReport {
        target: Some(object.clone()),
        files: Vec::with_capacity(files.len()),
    };

    for path in files {
        let outcome = match try_extract_metadata(path, scope) {
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                FileOutcome::Failed(e.to_string())
            }
            Ok(bucket) if bucket.is_empty() => {
                info!("No {} sections found in {}", scope, path.display());
                FileOutcome::Empty
            }
            Ok(bucket) => {
                let created = apply_metadata(store, &object, &bucket)?;
                info!(
                    "Metadata from {} uploaded to {} {}",
                    path.display(),
                    kind,
                    id
                );
                FileOutcome::Applied(created)
            }
        };
        report.files.push((path.clone(), outcome));
    }

    Ok(report)
}

//! # ISA Metadata Codec
//!
//! Converts namespaced key-value annotations into header-less spreadsheet rows
//! and back. Metadata is grouped into four buckets: the Investigation, Study and
//! Assay sections of the ARC ISA layout, plus everything else.
//!
//! ## Sheet Layout
//!
//! ```text
//! STUDY                        <- section header (namespace after its last ':')
//! Study Identifier | s1        <- key followed by one cell per value
//! Study Title      | Mouse | 2
//! STUDY CONTACTS
//! Last Name        | Doe   |   | Roe
//! ```
//!
//! Decoding turns every upper-case first cell back into the namespace
//! `ARC:ISA:<SCOPE>:<cell>`. Values are kept as plain strings internally; the
//! quoted `'a', ' ', 'b'` form only exists in the object store.

mod bucket;
mod decode;
mod encode;
mod error;
mod namespace;
pub mod values;


pub use bucket::{classify_and_collect, Entries, IsaMetadata, MapAnnotation, MetadataBucket};
pub use decode::{annotation_map, decode_rows_into, decode_sheet_to_bucket, is_section_header};
pub use encode::{encode_bucket_to_sheet, sheet_name, Sheet, SheetRow, ValueLayout, MAX_SHEET_NAME_LEN};
pub use error::IsaError;
pub use namespace::{
    section_label, AssayRevision, Bucket, Catalogues, Scope, ASSAY_NAMESPACES,
    ASSAY_NAMESPACES_ARC, INVESTIGATION_NAMESPACES, NAMESPACE_PREFIX, NO_NAMESPACE,
    STUDY_NAMESPACES,
};

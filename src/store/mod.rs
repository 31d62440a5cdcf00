//! # Object Store
//!
//! The remote side of a transfer: an OMERO-style server holding Projects,
//! Datasets and Images, each carrying key-value map annotations and, for
//! images, ROIs. [`MetadataStore`] is the seam the transfer operations are
//! written against; [`SnapshotStore`] implements it over a JSON file for offline
//! work and tests.

mod error;
mod session;
mod snapshot;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::isa::MapAnnotation;
use crate::roi::Roi;

pub use error::StoreError;
pub use session::{ConnectionSettings, Session};
pub use snapshot::{Snapshot, SnapshotObject, SnapshotStore};

/// Types of object metadata can be attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Top-level container of datasets
    Project,
    /// Container of images
    Dataset,
    /// A single image
    Image,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Project => write!(f, "Project"),
            ObjectKind::Dataset => write!(f, "Dataset"),
            ObjectKind::Image => write!(f, "Image"),
        }
    }
}

impl FromStr for ObjectKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "project" => Ok(ObjectKind::Project),
            "dataset" => Ok(ObjectKind::Dataset),
            "image" => Ok(ObjectKind::Image),
            _ => Err(StoreError::UnknownKind(s.to_string())),
        }
    }
}

/// Handle to a resolved object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Object type
    pub kind: ObjectKind,
    /// Object id
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Operations the transfer tools need from an object store
pub trait MetadataStore {
    /// Look up an object by type and id. `Ok(None)` if it does not exist.
    fn get_object(&self, kind: ObjectKind, id: i64) -> Result<Option<ObjectRef>, StoreError>;

    /// Map annotations of an object, in server order
    fn list_annotations(&self, object: &ObjectRef) -> Result<Vec<MapAnnotation>, StoreError>;

    /// Attach a new map annotation under a namespace
    fn create_map_annotation(
        &mut self,
        object: &ObjectRef,
        values: &IndexMap<String, String>,
        namespace: &str,
    ) -> Result<(), StoreError>;

    /// Direct children of a container, e.g. the images of a dataset
    fn list_children(&self, object: &ObjectRef) -> Result<Vec<ObjectRef>, StoreError>;

    /// ROIs attached to an image
    fn list_rois(&self, image: &ObjectRef) -> Result<Vec<Roi>, StoreError>;

    /// Save a new ROI on an image, returning its assigned id
    fn save_roi(&mut self, image: &ObjectRef, roi: Roi) -> Result<i64, StoreError>;

    /// Release the connection. Must be safe to call more than once.
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Parse a user-supplied object id
pub fn parse_object_id(input: &str) -> Result<i64, StoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(StoreError::InvalidId(input.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| StoreError::InvalidId(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        assert_eq!(parse_object_id("1270").unwrap(), 1270);
        assert_eq!(parse_object_id(" 42 ").unwrap(), 42);
        assert!(parse_object_id("-1").is_err());
        assert!(parse_object_id("12a").is_err());
        assert!(parse_object_id("").is_err());
        assert!(parse_object_id("99999999999999999999999").is_err());
    }

    #[test]
    fn test_object_kind_from_str() {
        assert_eq!(ObjectKind::from_str("Project").unwrap(), ObjectKind::Project);
        assert_eq!(ObjectKind::from_str("dataset").unwrap(), ObjectKind::Dataset);
        assert!(ObjectKind::from_str("plate").is_err());
        assert_eq!(ObjectKind::Image.to_string(), "Image");
    }
}

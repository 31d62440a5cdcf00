use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::{ConnectionSettings, MetadataStore, ObjectKind, ObjectRef, StoreError};
use crate::isa::MapAnnotation;
use crate::roi::Roi;
use crate::workbook::write_atomically;

/// Serialized state of a store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All objects, in listing order
    #[serde(default)]
    pub objects: Vec<SnapshotObject>,

    /// Accepted user → password pairs. Empty accepts any login.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub credentials: IndexMap<String, String>,
}

/// One object of a snapshot with everything attached to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotObject {
    /// Object type
    pub kind: ObjectKind,
    /// Object id, unique per type
    pub id: i64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Map annotations in creation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<MapAnnotation>,
    /// ROIs, for images
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rois: Vec<Roi>,
    /// Ids of child objects (datasets of a project, images of a dataset)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<i64>,
}

impl SnapshotObject {
    /// Object without annotations or children
    pub fn new(kind: ObjectKind, id: i64, name: &str) -> Self {
        Self {
            kind,
            id,
            name: name.to_string(),
            annotations: Vec::new(),
            rois: Vec::new(),
            children: Vec::new(),
        }
    }

    fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            kind: self.kind,
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Snapshot {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up an object
    pub fn find(&self, kind: ObjectKind, id: i64) -> Option<&SnapshotObject> {
        self.objects.iter().find(|o| o.kind == kind && o.id == id)
    }

    fn find_mut(&mut self, kind: ObjectKind, id: i64) -> Option<&mut SnapshotObject> {
        self.objects.iter_mut().find(|o| o.kind == kind && o.id == id)
    }

    fn next_roi_id(&self) -> i64 {
        self.objects
            .iter()
            .flat_map(|o| o.rois.iter())
            .filter_map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Object store backed by a JSON snapshot file.
///
/// Changes are kept in memory and written back on [`MetadataStore::close`].
#[derive(Debug)]
pub struct SnapshotStore {
    path: Option<PathBuf>,
    snapshot: Snapshot,
    dirty: bool,
    closed: bool,
}

impl SnapshotStore {
    /// Open the snapshot named by `settings.host` (a path or `file://` URL).
    ///
    /// A missing or unreadable snapshot, or credentials the snapshot does not
    /// accept, are reported as [`StoreError::Connection`].
    pub fn connect(settings: &ConnectionSettings) -> Result<Self, StoreError> {
        let path = snapshot_path(&settings.host);
        let connection_error = |reason: String| StoreError::Connection {
            host: settings.host.clone(),
            reason,
        };

        let content = fs::read_to_string(&path).map_err(|e| connection_error(e.to_string()))?;
        let snapshot =
            Snapshot::from_json(&content).map_err(|e| connection_error(e.to_string()))?;

        if !snapshot.credentials.is_empty()
            && snapshot.credentials.get(&settings.username) != Some(&settings.password)
        {
            return Err(connection_error(format!(
                "authentication failed for user '{}'",
                settings.username
            )));
        }

        info!(
            "Connected to {} as {} ({} objects)",
            path.display(),
            settings.username,
            snapshot.objects.len()
        );

        Ok(Self {
            path: Some(path),
            snapshot,
            dirty: false,
            closed: false,
        })
    }

    /// Store over an in-memory snapshot that is never written to disk
    pub fn in_memory(snapshot: Snapshot) -> Self {
        Self {
            path: None,
            snapshot,
            dirty: false,
            closed: false,
        }
    }

    /// Current state, including unsaved changes
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Write pending changes back to the snapshot file
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            self.dirty = false;
            return Ok(());
        };
        if !self.dirty {
            return Ok(());
        }

        write_atomically(path, self.snapshot.to_json()?.as_bytes())?;
        debug!("Flushed snapshot to {}", path.display());
        self.dirty = false;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    fn object_mut(&mut self, object: &ObjectRef) -> Result<&mut SnapshotObject, StoreError> {
        self.snapshot
            .find_mut(object.kind, object.id)
            .ok_or(StoreError::NotFound {
                kind: object.kind,
                id: object.id,
            })
    }

    fn object(&self, object: &ObjectRef) -> Result<&SnapshotObject, StoreError> {
        self.snapshot
            .find(object.kind, object.id)
            .ok_or(StoreError::NotFound {
                kind: object.kind,
                id: object.id,
            })
    }
}

impl MetadataStore for SnapshotStore {
    fn get_object(&self, kind: ObjectKind, id: i64) -> Result<Option<ObjectRef>, StoreError> {
        self.ensure_open()?;
        Ok(self.snapshot.find(kind, id).map(SnapshotObject::object_ref))
    }

    fn list_annotations(&self, object: &ObjectRef) -> Result<Vec<MapAnnotation>, StoreError> {
        self.ensure_open()?;
        Ok(self.object(object)?.annotations.clone())
    }

    fn create_map_annotation(
        &mut self,
        object: &ObjectRef,
        values: &IndexMap<String, String>,
        namespace: &str,
    ) -> Result<(), StoreError> {
        self.ensure_open()?;
        let annotation = MapAnnotation {
            namespace: Some(namespace.to_string()),
            values: values
                .iter()
                .map(|(key, value)| vec![key.clone(), value.clone()])
                .collect(),
        };
        self.object_mut(object)?.annotations.push(annotation);
        self.dirty = true;
        debug!(
            "Created annotation {} with {} keys on {} {}",
            namespace,
            values.len(),
            object.kind,
            object.id
        );
        Ok(())
    }

    fn list_children(&self, object: &ObjectRef) -> Result<Vec<ObjectRef>, StoreError> {
        self.ensure_open()?;
        let child_kind = match object.kind {
            ObjectKind::Project => ObjectKind::Dataset,
            ObjectKind::Dataset => ObjectKind::Image,
            ObjectKind::Image => return Ok(Vec::new()),
        };

        Ok(self
            .object(object)?
            .children
            .iter()
            .filter_map(|id| self.snapshot.find(child_kind, *id))
            .map(SnapshotObject::object_ref)
            .collect())
    }

    fn list_rois(&self, image: &ObjectRef) -> Result<Vec<Roi>, StoreError> {
        self.ensure_open()?;
        Ok(self.object(image)?.rois.clone())
    }

    fn save_roi(&mut self, image: &ObjectRef, mut roi: Roi) -> Result<i64, StoreError> {
        self.ensure_open()?;
        let id = self.snapshot.next_roi_id();
        roi.id = Some(id);
        for shape in &mut roi.shapes {
            shape.id = None;
        }
        self.object_mut(image)?.rois.push(roi);
        self.dirty = true;
        Ok(id)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Ok(());
        }
        self.flush()?;
        self.closed = true;
        debug!("Snapshot store closed");
        Ok(())
    }
}

fn snapshot_path(host: &str) -> PathBuf {
    PathBuf::from(host.strip_prefix("file://").unwrap_or(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::{Geometry, Shape};
    use crate::store::Session;
    use std::path::Path;
    use tempfile::tempdir;

    fn sample_snapshot() -> Snapshot {
        let mut project = SnapshotObject::new(ObjectKind::Project, 1, "Mouse brain");
        project.annotations.push(
            MapAnnotation::new("ARC:ISA:STUDY:STUDY").with_item("Study Title", ["Mice"]),
        );
        project.children.push(10);

        let mut dataset = SnapshotObject::new(ObjectKind::Dataset, 10, "Slices");
        dataset.children = vec![100, 101, 999];

        Snapshot {
            objects: vec![
                project,
                dataset,
                SnapshotObject::new(ObjectKind::Image, 100, "slice 1"),
                SnapshotObject::new(ObjectKind::Image, 101, "slice 2"),
            ],
            credentials: IndexMap::new(),
        }
    }

    fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> PathBuf {
        let path = dir.join("server.json");
        fs::write(&path, snapshot.to_json().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_get_object() {
        let store = SnapshotStore::in_memory(sample_snapshot());

        let project = store.get_object(ObjectKind::Project, 1).unwrap().unwrap();
        assert_eq!(project.name, "Mouse brain");
        assert!(store.get_object(ObjectKind::Dataset, 1).unwrap().is_none());
        assert!(store.get_object(ObjectKind::Project, 404).unwrap().is_none());
    }

    #[test]
    fn test_list_children_skips_missing() {
        let store = SnapshotStore::in_memory(sample_snapshot());
        let dataset = store.get_object(ObjectKind::Dataset, 10).unwrap().unwrap();

        let images = store.list_children(&dataset).unwrap();
        let ids: Vec<i64> = images.iter().map(|i| i.id).collect();

        assert_eq!(ids, vec![100, 101]);
    }

    #[test]
    fn test_connect_missing_file() {
        let settings = ConnectionSettings::new("/nonexistent/server.json", "alice", "secret");
        let err = SnapshotStore::connect(&settings).unwrap_err();
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    #[test]
    fn test_connect_checks_credentials() {
        let dir = tempdir().unwrap();
        let mut snapshot = sample_snapshot();
        snapshot
            .credentials
            .insert("alice".to_string(), "secret".to_string());
        let path = write_snapshot(dir.path(), &snapshot);
        let host = format!("file://{}", path.display());

        assert!(SnapshotStore::connect(&ConnectionSettings::new(&host, "alice", "secret")).is_ok());
        assert!(matches!(
            SnapshotStore::connect(&ConnectionSettings::new(&host, "alice", "wrong")),
            Err(StoreError::Connection { .. })
        ));
        assert!(SnapshotStore::connect(&ConnectionSettings::new(&host, "bob", "secret")).is_err());
    }

    #[test]
    fn test_annotations_persist_on_close() {
        let dir = tempdir().unwrap();
        let path = write_snapshot(dir.path(), &sample_snapshot());
        let settings = ConnectionSettings::new(&path.to_string_lossy(), "alice", "secret");

        let mut store = SnapshotStore::connect(&settings).unwrap();
        let project = store.get_object(ObjectKind::Project, 1).unwrap().unwrap();
        let mut values = IndexMap::new();
        values.insert("Design Type".to_string(), "'randomized'".to_string());
        store
            .create_map_annotation(&project, &values, "ARC:ISA:STUDY:STUDY DESIGN DESCRIPTORS")
            .unwrap();
        store.close().unwrap();
        assert!(matches!(
            store.get_object(ObjectKind::Project, 1),
            Err(StoreError::Closed)
        ));

        let reopened = SnapshotStore::connect(&settings).unwrap();
        let annotations = reopened.list_annotations(&project).unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(
            annotations[1].values,
            vec![vec!["Design Type".to_string(), "'randomized'".to_string()]]
        );
    }

    #[test]
    fn test_session_flushes_on_drop() {
        let dir = tempdir().unwrap();
        let path = write_snapshot(dir.path(), &sample_snapshot());
        let settings = ConnectionSettings::new(&path.to_string_lossy(), "alice", "secret");

        {
            let mut session = Session::new(SnapshotStore::connect(&settings).unwrap());
            let image = session.get_object(ObjectKind::Image, 100).unwrap().unwrap();
            session
                .save_roi(
                    &image,
                    Roi {
                        id: None,
                        shapes: vec![Shape::new(Geometry::Point { x: 1.0, y: 2.0 })],
                    },
                )
                .unwrap();
        }

        let reopened = SnapshotStore::connect(&settings).unwrap();
        let image = reopened.get_object(ObjectKind::Image, 100).unwrap().unwrap();
        let rois = reopened.list_rois(&image).unwrap();
        assert_eq!(rois.len(), 1);
        assert_eq!(rois[0].id, Some(1));
    }

    #[test]
    fn test_roi_ids_increase() {
        let mut store = SnapshotStore::in_memory(sample_snapshot());
        let first = store.get_object(ObjectKind::Image, 100).unwrap().unwrap();
        let second = store.get_object(ObjectKind::Image, 101).unwrap().unwrap();

        assert_eq!(store.save_roi(&first, Roi::default()).unwrap(), 1);
        assert_eq!(store.save_roi(&second, Roi::default()).unwrap(), 2);
        assert_eq!(store.save_roi(&first, Roi::default()).unwrap(), 3);
    }

    #[test]
    fn test_annotation_on_missing_object() {
        let mut store = SnapshotStore::in_memory(sample_snapshot());
        let ghost = ObjectRef {
            kind: ObjectKind::Dataset,
            id: 77,
            name: String::new(),
        };

        let err = store
            .create_map_annotation(&ghost, &IndexMap::new(), "ARC:ISA:ASSAY:ASSAY")
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 77, .. }));
    }
}

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::TransferError;
use crate::roi::{roi_file_name, RoiFile};
use crate::store::{MetadataStore, ObjectKind, ObjectRef, StoreError};

/// Collect the ROIs of one image into an interchange file
pub fn export_image_rois<S: MetadataStore + ?Sized>(
    store: &S,
    image: &ObjectRef,
) -> Result<RoiFile, StoreError> {
    Ok(RoiFile {
        image_id: image.id,
        rois: store.list_rois(image)?,
    })
}

fn write_image_rois<S: MetadataStore + ?Sized>(
    store: &S,
    image: &ObjectRef,
    dir: &Path,
) -> Result<PathBuf, TransferError> {
    let file = export_image_rois(store, image)?;
    let path = dir.join(roi_file_name(&image.name, image.id));
    file.write_file(&path)?;
    info!(
        "ROIs exported to {} ({} ROIs, {} shapes)",
        path.display(),
        file.rois.len(),
        file.shape_count()
    );
    Ok(path)
}

/// Export ROIs for a Dataset or Image id.
///
/// The id is tried as a Dataset first; a dataset's images are written into a
/// folder named after it. Otherwise it is tried as an Image. An id matching
/// neither is logged and nothing is written.
pub fn export_rois<S: MetadataStore + ?Sized>(
    store: &S,
    id: i64,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, TransferError> {
    if let Some(dataset) = store.get_object(ObjectKind::Dataset, id)? {
        let folder = output_dir.join(dataset.name.replace(' ', "_"));
        fs::create_dir_all(&folder)?;

        let mut written = Vec::new();
        for image in store.list_children(&dataset)? {
            written.push(write_image_rois(store, &image, &folder)?);
        }
        return Ok(written);
    }

    if let Some(image) = store.get_object(ObjectKind::Image, id)? {
        fs::create_dir_all(output_dir)?;
        return Ok(vec![write_image_rois(store, &image, output_dir)?]);
    }

    warn!("Invalid ID {}. No Dataset or Image found.", id);
    Ok(Vec::new())
}

/// Save the ROIs of an interchange file onto its image.
///
/// Returns the number of ROIs created, or `None` if the image named by the
/// file does not exist.
pub fn import_rois<S: MetadataStore + ?Sized>(
    store: &mut S,
    path: &Path,
) -> Result<Option<usize>, TransferError> {
    let file = RoiFile::from_file(path)?;

    let Some(image) = store.get_object(ObjectKind::Image, file.image_id)? else {
        warn!("Image with ID {} not found", file.image_id);
        return Ok(None);
    };

    let count = file.rois.len();
    for roi in file.rois {
        store.save_roi(&image, roi)?;
    }
    info!("ROIs successfully imported for Image ID {}", image.id);
    Ok(Some(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::{Geometry, Roi, Shape};
    use crate::store::{Snapshot, SnapshotObject, SnapshotStore};
    use tempfile::tempdir;

    fn store() -> SnapshotStore {
        let mut dataset = SnapshotObject::new(ObjectKind::Dataset, 3, "Time lapse");
        dataset.children = vec![30, 31];

        let mut image = SnapshotObject::new(ObjectKind::Image, 30, "frame 0");
        image.rois.push(Roi {
            id: Some(4),
            shapes: vec![
                Shape::new(Geometry::Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: 8.0,
                    height: 8.0,
                }),
                Shape::new(Geometry::Polyline {
                    points: "0,0 4,4 8,0".to_string(),
                }),
            ],
        });

        SnapshotStore::in_memory(Snapshot {
            objects: vec![
                dataset,
                image,
                SnapshotObject::new(ObjectKind::Image, 31, "frame 1"),
            ],
            credentials: Default::default(),
        })
    }

    #[test]
    fn test_export_dataset_writes_folder() {
        let dir = tempdir().unwrap();
        let written = export_rois(&store(), 3, dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            written[0],
            dir.path().join("Time_lapse").join("frame_0_ID30_rois.json")
        );

        let file = RoiFile::from_file(&written[0]).unwrap();
        assert_eq!(file.image_id, 30);
        assert_eq!(file.shape_count(), 2);
        assert!(RoiFile::from_file(&written[1]).unwrap().rois.is_empty());
    }

    #[test]
    fn test_export_single_image() {
        let dir = tempdir().unwrap();
        let written = export_rois(&store(), 31, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("frame_1_ID31_rois.json")]);
    }

    #[test]
    fn test_export_unknown_id() {
        let dir = tempdir().unwrap();
        assert!(export_rois(&store(), 404, dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_import_onto_image() {
        let dir = tempdir().unwrap();
        let mut store = store();
        let written = export_rois(&store, 30, dir.path()).unwrap();

        let mut file = RoiFile::from_file(&written[0]).unwrap();
        file.image_id = 31;
        let path = dir.path().join("moved.json");
        file.write_file(&path).unwrap();

        assert_eq!(import_rois(&mut store, &path).unwrap(), Some(1));

        let target = store.get_object(ObjectKind::Image, 31).unwrap().unwrap();
        let rois = store.list_rois(&target).unwrap();
        assert_eq!(rois.len(), 1);
        assert_eq!(rois[0].id, Some(5));
        assert_eq!(rois[0].shapes.len(), 2);
    }

    #[test]
    fn test_import_missing_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rois.json");
        RoiFile::new(999).write_file(&path).unwrap();

        assert_eq!(import_rois(&mut store(), &path).unwrap(), None);
    }
}

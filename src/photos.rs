//! Photo resource collaborator.
//!
//! The store keeps photo URIs as opaque strings; creating and deleting the
//! underlying resource is delegated here. Deletion is idempotent: a missing
//! resource is not an error.

use crate::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// External file-management collaborator for photo resources.
pub trait PhotoStore: Send {
    /// Copies a captured photo from its transient source into permanent
    /// storage and returns the permanent URI.
    fn persist(&self, source: &str) -> Result<String>;

    /// Deletes the resource behind a URI. Idempotent.
    fn remove(&self, uri: &str) -> Result<()>;
}

/// Filesystem photo storage under a single directory.
///
/// Persisted photos are named `geo_{millis}.jpg`.
pub struct DirPhotoStore {
    dir: PathBuf,
}

impl DirPhotoStore {
    /// Creates a photo store rooted at the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::OperationFailed {
            operation: "create_photos_dir".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self { dir })
    }
}

impl PhotoStore for DirPhotoStore {
    fn persist(&self, source: &str) -> Result<String> {
        let filename = format!("geo_{}.jpg", crate::current_timestamp_millis());
        let dest = self.dir.join(&filename);
        fs::copy(source, &dest).map_err(|e| Error::OperationFailed {
            operation: "copy_photo".to_string(),
            cause: format!("{source}: {e}"),
        })?;
        tracing::debug!(photo = %dest.display(), "photo copied to permanent storage");
        Ok(dest.to_string_lossy().into_owned())
    }

    fn remove(&self, uri: &str) -> Result<()> {
        match fs::remove_file(uri) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::OperationFailed {
                operation: "delete_photo".to_string(),
                cause: format!("{uri}: {e}"),
            }),
        }
    }
}

/// Photo store that keeps nothing. Used for imported datasets and tests,
/// where records have no photo resource to manage.
pub struct NullPhotoStore;

impl PhotoStore for NullPhotoStore {
    fn persist(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }

    fn remove(&self, _uri: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_copies_with_geo_prefix() {
        let src_dir = tempfile::tempdir().unwrap();
        let photo_dir = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("shot.jpg");
        std::fs::write(&source, b"jpegdata").unwrap();

        let store = DirPhotoStore::with_create(photo_dir.path()).unwrap();
        let uri = store.persist(&source.to_string_lossy()).unwrap();
        assert!(uri.contains("geo_"));
        assert!(uri.ends_with(".jpg"));
        assert_eq!(std::fs::read(&uri).unwrap(), b"jpegdata");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirPhotoStore::with_create(dir.path()).unwrap();
        let missing = dir.path().join("geo_0.jpg");
        store.remove(&missing.to_string_lossy()).unwrap();
        store.remove(&missing.to_string_lossy()).unwrap();
    }
}

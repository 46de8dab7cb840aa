//! Amenity image storage.
//!
//! Uploads themselves arrive through a separate service. This side only
//! needs to know whether a referenced file exists and to release it when
//! its amenity is deleted or its image is replaced.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::amenity::is_managed_image;

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Invalid image reference: {0:?}")]
    InvalidReference(String),

    #[error("Image store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage for amenity image files.
///
/// References are the opaque strings stored in `amenities.image`. External
/// URLs and the placeholder are not managed and are ignored by every
/// operation.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Remove the referenced image. Returns `true` if a file was removed.
    /// Missing files and unmanaged references are a no-op.
    async fn release(&self, reference: &str) -> Result<bool, ImageStoreError>;

    /// Whether the referenced image currently exists.
    async fn contains(&self, reference: &str) -> Result<bool, ImageStoreError>;
}

/// [`ImageStore`] backed by a directory on the local filesystem.
///
/// A reference such as `1700000000_kubo.jpg` or
/// `/uploads/am_images/1700000000_kubo.jpg` maps to
/// `{base_dir}/1700000000_kubo.jpg`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    base_dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map a reference to a path under `base_dir`, rejecting traversal.
    fn resolve(&self, reference: &str) -> Result<PathBuf, ImageStoreError> {
        let name = reference
            .trim()
            .trim_start_matches(crate::amenity::IMAGE_ROUTE_PREFIX)
            .trim_start_matches('/');

        let rel = Path::new(name);
        let only_normal = rel.components().all(|c| matches!(c, Component::Normal(_)));
        if name.is_empty() || !only_normal {
            return Err(ImageStoreError::InvalidReference(reference.to_string()));
        }
        Ok(self.base_dir.join(rel))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn release(&self, reference: &str) -> Result<bool, ImageStoreError> {
        if !is_managed_image(reference) {
            return Ok(false);
        }
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Image file released");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn contains(&self, reference: &str) -> Result<bool, ImageStoreError> {
        if !is_managed_image(reference) {
            return Ok(false);
        }
        let path = self.resolve(reference)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn release_removes_managed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"img").unwrap();
        let store = LocalImageStore::new(dir.path());

        assert!(store.contains("a.jpg").await.unwrap());
        assert!(store.release("a.jpg").await.unwrap());
        assert!(!store.contains("a.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn release_accepts_route_prefixed_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"img").unwrap();
        let store = LocalImageStore::new(dir.path());

        assert!(store.release("/uploads/am_images/b.png").await.unwrap());
    }

    #[tokio::test]
    async fn release_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());
        assert!(!store.release("gone.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn unmanaged_references_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.jpg"), b"img").unwrap();
        let store = LocalImageStore::new(dir.path());

        assert!(!store.release("default.jpg").await.unwrap());
        assert!(!store.release("https://cdn.example.com/x.jpg").await.unwrap());
        assert!(dir.path().join("default.jpg").exists());
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());
        assert_matches!(
            store.release("../etc/passwd").await,
            Err(ImageStoreError::InvalidReference(_))
        );
    }
}

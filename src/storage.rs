//! Image storage for car and part photos.
//!
//! Uploaded files are written under a configurable directory and served back
//! as static files. Handlers only see the [`ImageStore`] trait, so tests can
//! point the store at a temporary directory.

use crate::errors::ApiError;
use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

/// Destination for uploaded image bytes.
///
/// `store` returns the public URL path under which the saved file will be
/// served, e.g. `/uploads/4a9f….jpg`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, ApiError>;
}

/// Filesystem-backed [`ImageStore`].
///
/// Files get random UUID names so uploads can never collide or overwrite each
/// other, and the original client filename never reaches the disk.
pub struct FsImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, ApiError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|err| {
            ApiError::internal(
                "failed to store the uploaded image",
                Some(format!("create_dir_all {}: {err}", self.root.display())),
            )
        })?;

        let name = format!("{}.{extension}", Uuid::new_v4());
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes).await.map_err(|err| {
            ApiError::internal(
                "failed to store the uploaded image",
                Some(format!("write {}: {err}", path.display())),
            )
        })?;

        Ok(format!("{}/{name}", self.public_prefix))
    }
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bytes::Bytes;

use crate::domain::repository::BlobStore;
use crate::error::ApiError;

/// Blob store backed by one flat directory. Keys are bare file names.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ApiError> {
        let is_plain_name = Path::new(key).file_name().is_some_and(|name| name == key);
        if !is_plain_name {
            return Err(anyhow::anyhow!("blob key is not a plain file name: {key:?}").into());
        }
        Ok(self.root.join(key))
    }
}

impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), ApiError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("create image directory")?;
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("write blob {}", path.display()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, ApiError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove blob {}", path.display()))
                .into()),
        }
    }
}

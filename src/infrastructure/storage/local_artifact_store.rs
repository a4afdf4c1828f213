use std::path::PathBuf;
use std::sync::Arc;

use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError};

pub struct LocalArtifactStore {
    inner: Arc<LocalFileSystem>,
    base_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_dir: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&base_dir).map_err(ArtifactStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_dir)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_dir,
        })
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), ArtifactStoreError> {
        let store_path = StorePath::from(name);
        self.inner
            .put(&store_path, PutPayload::from(data.to_vec()))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    async fn fetch(&self, name: &str) -> Result<Vec<u8>, ArtifactStoreError> {
        let store_path = StorePath::from(name);
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| ArtifactStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

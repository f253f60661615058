use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Stages uploads on the local filesystem under the analysis workspace root,
/// one directory per task.
pub struct LocalStagingStore {
    fs: LocalFileSystem,
    root: PathBuf,
}

impl LocalStagingStore {
    pub fn new(root: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&root)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        Ok(Self { fs, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn location(path: &StoragePath) -> ObjectPath {
    ObjectPath::from(path.as_str())
}

async fn abandon(upload: &mut dyn MultipartUpload, path: &StoragePath) {
    if let Err(e) = upload.abort().await {
        tracing::warn!(error = %e, path = %path, "Failed to abort partial upload");
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    #[tracing::instrument(skip(self, stream), fields(path = %path))]
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        let mut upload = self
            .fs
            .put_multipart(&location(path))
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let mut written = 0u64;
        while let Some(next) = stream.next().await {
            let chunk = match next {
                Ok(chunk) => chunk,
                Err(e) => {
                    abandon(upload.as_mut(), path).await;
                    return Err(e.into());
                }
            };
            let len = chunk.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(chunk)).await {
                abandon(upload.as_mut(), path).await;
                return Err(StagingStoreError::UploadFailed(e.to_string()));
            }
            written += len;
        }

        upload
            .complete()
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(bytes = written, "Staged upload written");
        Ok(written)
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        match self.fs.delete(&location(path)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(StagingStoreError::DeleteFailed(e.to_string())),
        }
    }
}

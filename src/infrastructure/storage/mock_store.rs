use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Discards uploads. Used when staging is disabled and in tests.
pub struct MockStagingStore;

#[async_trait::async_trait]
impl StagingStore for MockStagingStore {
    async fn store(
        &self,
        _path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        let mut total = 0u64;
        while let Some(chunk) = stream.next().await {
            total += chunk?.len() as u64;
        }
        Ok(total)
    }

    async fn delete(&self, _path: &StoragePath) -> Result<(), StagingStoreError> {
        Ok(())
    }
}

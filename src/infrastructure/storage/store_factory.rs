use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::presentation::config::WorkspaceSettings;

use super::local_store::LocalStagingStore;
use super::mock_store::MockStagingStore;

pub struct StagingStoreFactory;

impl StagingStoreFactory {
    pub fn create(
        settings: &WorkspaceSettings,
    ) -> Result<Arc<dyn StagingStore>, StagingStoreError> {
        if !settings.staging_enabled {
            tracing::info!("Upload staging disabled");
            return Ok(Arc::new(MockStagingStore));
        }

        let root = PathBuf::from(&settings.root);
        let store = LocalStagingStore::new(root)?;
        tracing::info!(root = %store.root().display(), "Staging uploads on local filesystem");
        Ok(Arc::new(store))
    }
}

use std::sync::Arc;

use crate::application::ports::AccessTokenVerifier;
use crate::application::services::TaskService;

/// Paging and upload limits applied at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct ApiLimits {
    pub default_page_size: usize,
    pub max_upload_bytes: usize,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_upload_bytes: 64 * 1024 * 1024,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub token_verifier: Arc<dyn AccessTokenVerifier>,
    pub limits: ApiLimits,
}

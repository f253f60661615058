mod access_token_verifier;
mod report_generator;
mod repository_error;
mod staging_store;
mod task_repository;

pub use access_token_verifier::{AccessTokenVerifier, AuthError};
pub use report_generator::{ReportError, ReportGenerator};
pub use repository_error::RepositoryError;
pub use staging_store::{StagingStore, StagingStoreError};
pub use task_repository::{TaskFilter, TaskRepository};

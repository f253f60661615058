
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use protocol_analysis::application::ports::{
    AccessTokenVerifier, ReportGenerator, StagingStore, TaskRepository,
};
use protocol_analysis::application::services::{LifecycleSimulator, TaskService, UploadedFile};
use protocol_analysis::domain::{
    AuthenticatedUser, DocumentFormat, DocumentMeta, Task, TaskId, TaskKind,
};
use protocol_analysis::infrastructure::auth::StaticTokenVerifier;
use protocol_analysis::infrastructure::persistence::InMemoryTaskRepository;
use protocol_analysis::infrastructure::storage::MockStagingStore;
use protocol_analysis::presentation::{ApiLimits, AppState};

pub use multipart::{Part, multipart_body};
pub use reports::{FailingReportGenerator, FixedReportGenerator, fixed_report};

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const ANALYST_TOKEN: &str = "test-analyst-token";

pub struct TestContext {
    pub repository: Arc<InMemoryTaskRepository>,
    pub simulator: LifecycleSimulator,
    pub service: Arc<TaskService>,
}

pub fn test_context(capacity: usize, generator: Arc<dyn ReportGenerator>) -> TestContext {
    test_context_with_store(capacity, generator, Arc::new(MockStagingStore))
}

pub fn test_context_with_store(
    capacity: usize,
    generator: Arc<dyn ReportGenerator>,
    staging_store: Arc<dyn StagingStore>,
) -> TestContext {
    let repository = Arc::new(InMemoryTaskRepository::new(capacity));
    let dyn_repository: Arc<dyn TaskRepository> = repository.clone();
    let simulator = LifecycleSimulator::new(Arc::clone(&dyn_repository), generator);
    let service = Arc::new(TaskService::new(
        dyn_repository,
        staging_store,
        simulator.clone(),
        50,
    ));
    TestContext {
        repository,
        simulator,
        service,
    }
}

pub fn test_verifier() -> Arc<dyn AccessTokenVerifier> {
    Arc::new(StaticTokenVerifier::new([
        (ADMIN_TOKEN.to_string(), user("1", "admin")),
        (ANALYST_TOKEN.to_string(), user("2", "analyst")),
    ]))
}

pub fn test_state(ctx: &TestContext) -> AppState {
    AppState {
        task_service: Arc::clone(&ctx.service),
        token_verifier: test_verifier(),
        limits: ApiLimits {
            default_page_size: 10,
            max_upload_bytes: 1024 * 1024,
        },
    }
}

pub fn user(id: &str, name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: id.to_string(),
        username: name.to_string(),
    }
}

pub fn sample_task(kind: TaskKind) -> Task {
    Task::new(
        TaskId::new(),
        kind,
        "TLS 1.3 handshake".to_string(),
        DocumentMeta::new("rfc8446.pdf".to_string(), 2048, DocumentFormat::Pdf),
        "admin".to_string(),
    )
}

/// A task submitted `minutes_ago` minutes before now.
pub fn task_submitted_at(kind: TaskKind, minutes_ago: i64) -> Task {
    let mut task = sample_task(kind);
    let at: DateTime<Utc> = Utc::now() - Duration::minutes(minutes_ago);
    task.submitted_at = at;
    task.updated_at = at;
    task
}

pub fn upload(filename: &str, content_type: Option<&str>, data: &[u8]) -> UploadedFile {
    UploadedFile {
        filename: filename.to_string(),
        content_type: content_type.map(String::from),
        data: bytes::Bytes::copy_from_slice(data),
    }
}

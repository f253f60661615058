use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;

use crate::application::ports::{
    RepositoryError, StagingStore, StagingStoreError, TaskFilter, TaskRepository,
};
use crate::domain::{
    AnalysisReport, ArchiveFormat, DocumentFormat, DocumentMeta, StoragePath, Task, TaskId,
    TaskKind, TaskStatus,
};

use super::{LifecyclePlan, LifecycleSimulator};

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

#[derive(Debug, Clone)]
pub struct NewComplianceTask {
    pub owner: String,
    pub name: Option<String>,
    pub document: UploadedFile,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewStaticAnalysisJob {
    pub owner: String,
    pub name: Option<String>,
    pub code_archive: UploadedFile,
    pub dockerfile: UploadedFile,
    pub rules: UploadedFile,
    pub config: UploadedFile,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TaskQuery {
    pub kind: TaskKind,
    pub statuses: Option<Vec<TaskStatus>>,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task {id} is not ready: status is {status}")]
    NotReady { id: TaskId, status: TaskStatus },
    #[error("task {id} failed: {message}")]
    Failed { id: TaskId, message: String },
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("staging store: {0}")]
    Staging(#[from] StagingStoreError),
}

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    staging_store: Arc<dyn StagingStore>,
    simulator: LifecycleSimulator,
    max_page_size: usize,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        staging_store: Arc<dyn StagingStore>,
        simulator: LifecycleSimulator,
        max_page_size: usize,
    ) -> Self {
        Self {
            repository,
            staging_store,
            simulator,
            max_page_size: max_page_size.max(1),
        }
    }

    pub fn simulator(&self) -> &LifecycleSimulator {
        &self.simulator
    }

    #[tracing::instrument(
        skip(self, input),
        fields(owner = %input.owner, filename = %input.document.filename)
    )]
    pub async fn submit_compliance_task(
        &self,
        input: NewComplianceTask,
    ) -> Result<Task, TaskServiceError> {
        let document = &input.document;
        if document.data.is_empty() {
            return Err(TaskServiceError::InvalidInput(
                "Uploaded document is empty".to_string(),
            ));
        }
        let format =
            DocumentFormat::detect(document.content_type.as_deref(), &document.filename)
                .ok_or_else(|| TaskServiceError::UnsupportedFormat(document.filename.clone()))?;

        let id = TaskId::new();
        let name = display_name(input.name, &document.filename);
        let meta = DocumentMeta::new(document.filename.clone(), document.size(), format);

        let artifacts = self.stage(id, [("document", &input.document)]).await?;
        let task = Task::new(id, TaskKind::ProtocolCompliance, name, meta, input.owner)
            .with_tags(normalize_tags(input.tags))
            .with_artifacts(artifacts);

        self.register(task).await
    }

    #[tracing::instrument(
        skip(self, input),
        fields(owner = %input.owner, archive = %input.code_archive.filename)
    )]
    pub async fn submit_static_analysis(
        &self,
        input: NewStaticAnalysisJob,
    ) -> Result<Task, TaskServiceError> {
        if ArchiveFormat::from_filename(&input.code_archive.filename).is_none() {
            return Err(TaskServiceError::InvalidInput(format!(
                "Code archive must be .zip, .tar, .tar.gz or .tgz: {}",
                input.code_archive.filename
            )));
        }
        if input.code_archive.data.is_empty() {
            return Err(TaskServiceError::InvalidInput(
                "Code archive is empty".to_string(),
            ));
        }
        if input.dockerfile.data.is_empty() {
            return Err(TaskServiceError::InvalidInput(
                "Dockerfile is empty".to_string(),
            ));
        }
        serde_json::from_slice::<serde_json::Value>(&input.rules.data).map_err(|e| {
            TaskServiceError::InvalidInput(format!("Rules file is not valid JSON: {}", e))
        })?;
        let config_text = std::str::from_utf8(&input.config.data).map_err(|e| {
            TaskServiceError::InvalidInput(format!("Config file is not valid UTF-8: {}", e))
        })?;
        toml::from_str::<toml::Table>(config_text).map_err(|e| {
            TaskServiceError::InvalidInput(format!("Config file is not valid TOML: {}", e))
        })?;

        let id = TaskId::new();
        let name = display_name(input.name, &input.code_archive.filename);
        let meta = DocumentMeta::new(
            input.code_archive.filename.clone(),
            input.code_archive.size(),
            DocumentFormat::Archive,
        );
        let notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let artifacts = self
            .stage(
                id,
                [
                    ("code_archive", &input.code_archive),
                    ("dockerfile", &input.dockerfile),
                    ("rules", &input.rules),
                    ("config", &input.config),
                ],
            )
            .await?;
        let task = Task::new(id, TaskKind::StaticAnalysis, name, meta, input.owner)
            .with_notes(notes)
            .with_artifacts(artifacts);

        self.register(task).await
    }

    pub async fn list(&self, query: TaskQuery) -> Result<Page<Task>, TaskServiceError> {
        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, self.max_page_size);

        let mut filter = TaskFilter::kind(query.kind);
        if let Some(statuses) = query.statuses {
            filter = filter.with_statuses(statuses);
        }

        let tasks = self.repository.list(&filter).await?;
        let total = tasks.len();
        let items = tasks
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Ok(Page {
            items,
            total,
            page,
            page_size,
        })
    }

    pub async fn get(&self, id: TaskId, kind: TaskKind) -> Result<Task, TaskServiceError> {
        match self.repository.get_by_id(id).await? {
            Some(task) if task.kind == kind => Ok(task),
            _ => Err(TaskServiceError::NotFound(id)),
        }
    }

    /// The report of a completed task. Never returns partial data.
    pub async fn result(
        &self,
        id: TaskId,
        kind: TaskKind,
    ) -> Result<(Task, AnalysisReport), TaskServiceError> {
        let task = self.get(id, kind).await?;
        match (task.status, task.result.clone()) {
            (TaskStatus::Completed, Some(report)) => Ok((task, report)),
            (TaskStatus::Failed, _) => Err(TaskServiceError::Failed {
                id,
                message: task
                    .error_message
                    .unwrap_or_else(|| "unknown error".to_string()),
            }),
            (status, _) => Err(TaskServiceError::NotReady { id, status }),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: TaskId, kind: TaskKind) -> Result<Task, TaskServiceError> {
        self.get(id, kind).await?;
        self.simulator.cancel(id).await;
        let task = self
            .repository
            .delete(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        self.discard_artifacts(&task).await;
        tracing::info!(task_id = %id, "Task deleted");
        Ok(task)
    }

    async fn register(&self, task: Task) -> Result<Task, TaskServiceError> {
        // Registered before the insert so a concurrent eviction always finds the timer.
        self.simulator
            .schedule(task.id, LifecyclePlan::for_kind(task.kind))
            .await;

        let evicted = match self.repository.create(&task).await {
            Ok(evicted) => evicted,
            Err(e) => {
                self.simulator.cancel(task.id).await;
                self.discard_artifacts(&task).await;
                return Err(e.into());
            }
        };

        for old in &evicted {
            self.simulator.cancel(old.id).await;
            self.discard_artifacts(old).await;
            tracing::info!(task_id = %old.id, "Evicted oldest task beyond capacity");
        }

        tracing::info!(
            task_id = %task.id,
            kind = %task.kind,
            name = %task.name,
            "Task queued"
        );
        Ok(task)
    }

    async fn stage<'a>(
        &self,
        id: TaskId,
        files: impl IntoIterator<Item = (&'static str, &'a UploadedFile)>,
    ) -> Result<Vec<StoragePath>, TaskServiceError> {
        let mut staged = Vec::new();
        for (role, file) in files {
            let path = StoragePath::new(&id, role, &file.filename);
            let chunk = file.data.clone();
            let result = self
                .staging_store
                .store(&path, Box::pin(stream::iter([Ok::<_, io::Error>(chunk)])))
                .await;
            match result {
                Ok(bytes) => {
                    tracing::debug!(path = %path, bytes, "Upload staged");
                    staged.push(path);
                }
                Err(e) => {
                    for path in &staged {
                        let _ = self.staging_store.delete(path).await;
                    }
                    return Err(e.into());
                }
            }
        }
        Ok(staged)
    }

    async fn discard_artifacts(&self, task: &Task) {
        for path in &task.artifacts {
            if let Err(e) = self.staging_store.delete(path).await {
                tracing::warn!(error = %e, path = %path, "Failed to delete staged artifact");
            }
        }
    }
}

fn display_name(name: Option<String>, filename: &str) -> String {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| filename.to_string())
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags
        .iter()
        .flat_map(|t| t.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        if !out.iter().any(|existing| existing == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

use chrono::{DateTime, Utc};

use super::{AnalysisReport, DocumentMeta, StoragePath, TaskId, TaskKind, TaskStatus};

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub kind: TaskKind,
    pub name: String,
    pub document: DocumentMeta,
    pub status: TaskStatus,
    pub progress: u8,
    pub stage: Option<String>,
    pub tags: Vec<String>,
    pub owner: String,
    pub notes: Option<String>,
    pub artifacts: Vec<StoragePath>,
    pub result: Option<AnalysisReport>,
    pub error_message: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial update applied by the lifecycle simulator. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub status: Option<TaskStatus>,
    pub progress: Option<u8>,
    pub stage: Option<String>,
    pub result: Option<AnalysisReport>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskTransitionError {
    #[error("task already {0}")]
    AlreadyTerminal(TaskStatus),
    #[error("cannot move from {from} to {to}")]
    Backwards { from: TaskStatus, to: TaskStatus },
    #[error("completed task requires a result")]
    MissingResult,
}

impl Task {
    pub fn new(
        id: TaskId,
        kind: TaskKind,
        name: String,
        document: DocumentMeta,
        owner: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            kind,
            name,
            document,
            status: TaskStatus::Queued,
            progress: 0,
            stage: None,
            tags: Vec::new(),
            owner,
            notes: None,
            artifacts: Vec::new(),
            result: None,
            error_message: None,
            submitted_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_artifacts(mut self, artifacts: Vec<StoragePath>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Shallow-merges `patch`, keeping status and progress monotonic.
    /// On error the task is left unchanged.
    pub fn apply(
        &mut self,
        patch: TaskPatch,
        now: DateTime<Utc>,
    ) -> Result<(), TaskTransitionError> {
        if self.status.is_terminal() {
            return Err(TaskTransitionError::AlreadyTerminal(self.status));
        }

        let next_status = patch.status.unwrap_or(self.status);
        if !self.status.can_advance_to(next_status) {
            return Err(TaskTransitionError::Backwards {
                from: self.status,
                to: next_status,
            });
        }
        if next_status == TaskStatus::Completed
            && patch.result.is_none()
            && self.result.is_none()
        {
            return Err(TaskTransitionError::MissingResult);
        }

        self.status = next_status;
        if let Some(progress) = patch.progress {
            self.progress = self.progress.max(progress.min(100));
        }
        if patch.stage.is_some() {
            self.stage = patch.stage;
        }
        if patch.result.is_some() {
            self.result = patch.result;
        }
        if patch.error_message.is_some() {
            self.error_message = patch.error_message;
        }

        if next_status == TaskStatus::Completed {
            self.progress = 100;
        }
        if next_status.is_terminal() {
            self.completed_at = Some(now);
        }
        self.updated_at = now;

        Ok(())
    }
}

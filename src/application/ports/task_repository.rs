use async_trait::async_trait;

use crate::domain::{Task, TaskId, TaskKind, TaskPatch, TaskStatus};

use super::RepositoryError;

/// Selection applied by [`TaskRepository::list`]. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub kind: Option<TaskKind>,
    pub statuses: Option<Vec<TaskStatus>>,
}

impl TaskFilter {
    pub fn kind(kind: TaskKind) -> Self {
        Self {
            kind: Some(kind),
            statuses: None,
        }
    }

    pub fn with_statuses(mut self, statuses: Vec<TaskStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        let kind_ok = self.kind.is_none_or(|k| k == task.kind);
        let status_ok = self
            .statuses
            .as_ref()
            .is_none_or(|set| set.contains(&task.status));
        kind_ok && status_ok
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores `task` as the newest entry. Returns the tasks evicted to stay
    /// within capacity, oldest first.
    async fn create(&self, task: &Task) -> Result<Vec<Task>, RepositoryError>;

    /// Matching tasks, newest submission first.
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, RepositoryError>;

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Returns `Ok(None)` when the id is unknown.
    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Option<Task>, RepositoryError>;

    async fn delete(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;
}

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{RepositoryError, TaskFilter, TaskRepository};
use crate::domain::{Task, TaskId, TaskPatch};

/// Process-local task store holding at most `capacity` tasks, newest first.
pub struct InMemoryTaskRepository {
    tasks: RwLock<VecDeque<Task>>,
    capacity: usize,
}

impl InMemoryTaskRepository {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tasks: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    async fn create(&self, task: &Task) -> Result<Vec<Task>, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "duplicate task id {}",
                task.id
            )));
        }

        tasks.push_front(task.clone());

        let mut evicted = Vec::new();
        while tasks.len() > self.capacity {
            if let Some(oldest) = tasks.pop_back() {
                evicted.push(oldest);
            }
        }
        evicted.reverse();

        Ok(evicted)
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, RepositoryError> {
        let tasks = self.tasks.read().await;
        let mut matching: Vec<Task> = tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(matching)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    #[instrument(skip(self, patch), fields(task_id = %id))]
    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Option<Task>, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        task.apply(patch, Utc::now())
            .map_err(|e| RepositoryError::ConstraintViolation(e.to_string()))?;

        Ok(Some(task.clone()))
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn delete(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        let position = tasks.iter().position(|t| t.id == id);
        Ok(position.and_then(|i| tasks.remove(i)))
    }
}

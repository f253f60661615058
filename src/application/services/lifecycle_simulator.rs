use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::Instrument;

use crate::application::ports::{ReportGenerator, TaskRepository};
use crate::domain::{TaskId, TaskPatch, TaskStatus};

use super::LifecyclePlan;

type TimerRegistry = Arc<Mutex<HashMap<TaskId, JoinHandle<()>>>>;

/// Drives each scheduled task through its [`LifecyclePlan`] on a background timer.
#[derive(Clone)]
pub struct LifecycleSimulator {
    repository: Arc<dyn TaskRepository>,
    report_generator: Arc<dyn ReportGenerator>,
    timers: TimerRegistry,
}

impl LifecycleSimulator {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        report_generator: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            repository,
            report_generator,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn schedule(&self, task_id: TaskId, plan: LifecyclePlan) {
        // Held across spawn + insert so the timer cannot deregister before it is registered.
        let mut timers = self.timers.lock().await;

        let span = tracing::info_span!("task_lifecycle", task_id = %task_id);
        let run = run_plan(
            Arc::clone(&self.repository),
            Arc::clone(&self.report_generator),
            Arc::clone(&self.timers),
            task_id,
            plan,
            Instant::now(),
        )
        .instrument(span);

        if let Some(previous) = timers.insert(task_id, tokio::spawn(run)) {
            previous.abort();
        }
    }

    /// Aborts the pending timer for `task_id`. Returns whether one was pending.
    pub async fn cancel(&self, task_id: TaskId) -> bool {
        match self.timers.lock().await.remove(&task_id) {
            Some(handle) => {
                handle.abort();
                tracing::debug!(task_id = %task_id, "Lifecycle timer cancelled");
                true
            }
            None => false,
        }
    }

    pub async fn is_pending(&self, task_id: TaskId) -> bool {
        self.timers.lock().await.contains_key(&task_id)
    }

    pub async fn pending_count(&self) -> usize {
        self.timers.lock().await.len()
    }

    pub async fn cancel_all(&self) {
        let mut timers = self.timers.lock().await;
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }
}

async fn run_plan(
    repository: Arc<dyn TaskRepository>,
    report_generator: Arc<dyn ReportGenerator>,
    timers: TimerRegistry,
    task_id: TaskId,
    plan: LifecyclePlan,
    started: Instant,
) {
    for step in plan.steps() {
        sleep_until(started + step.at).await;
        let patch = TaskPatch {
            status: Some(TaskStatus::Processing),
            progress: Some(step.progress),
            stage: Some(step.stage.clone()),
            ..TaskPatch::default()
        };
        if !apply(repository.as_ref(), task_id, patch).await {
            timers.lock().await.remove(&task_id);
            return;
        }
    }

    sleep_until(started + plan.completes_at()).await;
    let patch = match repository.get_by_id(task_id).await {
        Ok(Some(task)) => match report_generator.generate(&task) {
            Ok(report) => TaskPatch {
                status: Some(TaskStatus::Completed),
                progress: Some(100),
                stage: Some("Completed".to_string()),
                result: Some(report),
                ..TaskPatch::default()
            },
            Err(e) => {
                tracing::warn!(error = %e, "Report generation failed");
                TaskPatch {
                    status: Some(TaskStatus::Failed),
                    stage: Some("Failed".to_string()),
                    error_message: Some(e.to_string()),
                    ..TaskPatch::default()
                }
            }
        },
        Ok(None) => {
            tracing::debug!("Task removed before completion");
            timers.lock().await.remove(&task_id);
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load task for completion");
            timers.lock().await.remove(&task_id);
            return;
        }
    };

    apply(repository.as_ref(), task_id, patch).await;
    timers.lock().await.remove(&task_id);
}

/// Applies one lifecycle patch. Returns `false` when the plan should stop.
async fn apply(repository: &dyn TaskRepository, task_id: TaskId, patch: TaskPatch) -> bool {
    match repository.update(task_id, patch).await {
        Ok(Some(task)) => {
            tracing::debug!(
                status = %task.status,
                progress = task.progress,
                "Task status transition"
            );
            if task.status.is_terminal() {
                tracing::info!(status = %task.status, "Task finished");
                return false;
            }
            true
        }
        Ok(None) => {
            tracing::debug!("Task no longer exists, stopping lifecycle");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "Lifecycle update rejected");
            false
        }
    }
}

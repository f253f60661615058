use serde::{Deserialize, Serialize};

use crate::application::services::Page;
use crate::domain::{AnalysisReport, DocumentFormat, Task, TaskId, TaskKind, TaskStatus};

use super::envelope::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub filename: String,
    pub size: u64,
    pub format: DocumentFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub kind: TaskKind,
    pub name: String,
    pub document: DocumentResponse,
    pub status: TaskStatus,
    pub progress: u8,
    pub stage: Option<String>,
    pub tags: Vec<String>,
    pub owner: String,
    pub notes: Option<String>,
    pub error_message: Option<String>,
    pub has_result: bool,
    pub submitted_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            kind: task.kind,
            name: task.name,
            document: DocumentResponse {
                filename: task.document.filename,
                size: task.document.size_bytes,
                format: task.document.format,
            },
            status: task.status,
            progress: task.progress,
            stage: task.stage,
            tags: task.tags,
            owner: task.owner,
            notes: task.notes,
            error_message: task.error_message,
            has_result: task.result.is_some(),
            submitted_at: task.submitted_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
            completed_at: task.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl From<Page<Task>> for PageResponse<TaskResponse> {
    fn from(page: Page<Task>) -> Self {
        Self {
            items: page.items.into_iter().map(TaskResponse::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub task_id: String,
    pub name: String,
    pub completed_at: Option<String>,
    pub report: AnalysisReport,
}

impl ResultResponse {
    pub fn new(task: &Task, report: AnalysisReport) -> Self {
        Self {
            task_id: task.id.to_string(),
            name: task.name.clone(),
            completed_at: task.completed_at.map(|t| t.to_rfc3339()),
            report,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub page: Option<usize>,
    #[serde(rename = "pageSize", alias = "page_size")]
    pub page_size: Option<usize>,
    /// Comma-separated status set, e.g. `queued,processing`.
    pub status: Option<String>,
}

impl ListTasksQuery {
    pub fn statuses(&self) -> Result<Option<Vec<TaskStatus>>, ApiError> {
        let Some(raw) = self.status.as_deref() else {
            return Ok(None);
        };
        let statuses = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<TaskStatus>().map_err(ApiError::bad_request))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(if statuses.is_empty() {
            None
        } else {
            Some(statuses)
        })
    }
}

/// Unknown and malformed ids are both reported as not found.
pub fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse::<TaskId>()
        .map_err(|_| ApiError::not_found(format!("task not found: {}", raw)))
}

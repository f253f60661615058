use axum::Extension;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::application::services::{NewStaticAnalysisJob, TaskQuery};
use crate::domain::{AuthenticatedUser, Task, TaskKind, TaskStatus};
use crate::presentation::state::AppState;

use super::envelope::{ApiError, success};
use super::multipart_form::MultipartForm;
use super::task_response::{
    ListTasksQuery, PageResponse, ResultResponse, TaskResponse, parse_task_id,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProgressResponse {
    pub job_id: String,
    pub status: TaskStatus,
    pub progress: u8,
    pub stage: Option<String>,
    pub error_message: Option<String>,
    pub updated_at: String,
}

impl From<Task> for JobProgressResponse {
    fn from(task: Task) -> Self {
        Self {
            job_id: task.id.to_string(),
            status: task.status,
            progress: task.progress,
            stage: task.stage,
            error_message: task.error_message,
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

#[tracing::instrument(skip(state, user, multipart), fields(user = %user.username))]
pub async fn submit_static_analysis_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let form = MultipartForm::read(multipart).await?;

    let job = NewStaticAnalysisJob {
        owner: user.username,
        name: form.text("name"),
        code_archive: form.require_file("codeArchive")?,
        dockerfile: form.require_file("dockerfile")?,
        rules: form.require_file("rules")?,
        config: form.require_file("config")?,
        notes: form.text("notes"),
    };

    let task = state.task_service.submit_static_analysis(job).await?;
    Ok(success(StatusCode::ACCEPTED, TaskResponse::from(task)))
}

#[tracing::instrument(skip(state))]
pub async fn job_progress_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(&job_id)?;
    let task = state.task_service.get(id, TaskKind::StaticAnalysis).await?;
    Ok(success(StatusCode::OK, JobProgressResponse::from(task)))
}

#[tracing::instrument(skip(state))]
pub async fn job_result_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(&job_id)?;
    let (task, report) = state
        .task_service
        .result(id, TaskKind::StaticAnalysis)
        .await?;
    Ok(success(StatusCode::OK, ResultResponse::new(&task, report)))
}

#[tracing::instrument(skip(state, query))]
pub async fn job_history_handler(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let page = state
        .task_service
        .list(TaskQuery {
            kind: TaskKind::StaticAnalysis,
            statuses: query.statuses()?,
            page: query.page.unwrap_or(1),
            page_size: query.page_size.unwrap_or(state.limits.default_page_size),
        })
        .await?;

    Ok(success(StatusCode::OK, PageResponse::from(page)))
}

use axum::Extension;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::application::services::{NewComplianceTask, TaskQuery};
use crate::domain::{AuthenticatedUser, TaskKind};
use crate::presentation::state::AppState;

use super::envelope::{ApiError, success};
use super::multipart_form::MultipartForm;
use super::task_response::{
    ListTasksQuery, PageResponse, ResultResponse, TaskResponse, parse_task_id,
};

#[derive(Debug, Default, Deserialize)]
pub struct ResultQuery {
    #[serde(default)]
    pub download: bool,
}

#[tracing::instrument(skip(state, query))]
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let page = state
        .task_service
        .list(TaskQuery {
            kind: TaskKind::ProtocolCompliance,
            statuses: query.statuses()?,
            page: query.page.unwrap_or(1),
            page_size: query.page_size.unwrap_or(state.limits.default_page_size),
        })
        .await?;

    Ok(success(StatusCode::OK, PageResponse::from(page)))
}

#[tracing::instrument(skip(state, user, multipart), fields(user = %user.username))]
pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let form = MultipartForm::read(multipart).await?;

    let document = form.require_file("file")?;
    let task = state
        .task_service
        .submit_compliance_task(NewComplianceTask {
            owner: user.username,
            name: form.text("name"),
            document,
            tags: form.texts("tags"),
        })
        .await?;

    Ok(success(StatusCode::ACCEPTED, TaskResponse::from(task)))
}

#[tracing::instrument(skip(state))]
pub async fn get_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(&task_id)?;
    let task = state
        .task_service
        .get(id, TaskKind::ProtocolCompliance)
        .await?;
    Ok(success(StatusCode::OK, TaskResponse::from(task)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(&task_id)?;
    let task = state
        .task_service
        .delete(id, TaskKind::ProtocolCompliance)
        .await?;
    Ok(success(StatusCode::OK, TaskResponse::from(task)))
}

/// Serves the report as an envelope, or as a JSON attachment with `?download=true`.
#[tracing::instrument(skip(state, query))]
pub async fn task_result_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    query: Result<Query<ResultQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let id = parse_task_id(&task_id)?;
    let (task, report) = state
        .task_service
        .result(id, TaskKind::ProtocolCompliance)
        .await?;
    let body = ResultResponse::new(&task, report);

    if !query.download {
        return Ok(success(StatusCode::OK, body));
    }

    let bytes = serde_json::to_vec_pretty(&body).map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode result: {}", e),
        )
    })?;
    let disposition = format!("attachment; filename=\"{}-result.json\"", task.id);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

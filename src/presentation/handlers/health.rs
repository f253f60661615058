use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use super::envelope::success;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> impl IntoResponse {
    success(
        StatusCode::OK,
        HealthResponse {
            status: "healthy".to_string(),
        },
    )
}

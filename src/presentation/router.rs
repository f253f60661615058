use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_task_handler, delete_task_handler, get_task_handler, health_handler,
    job_history_handler, job_progress_handler, job_result_handler, list_tasks_handler,
    require_bearer_auth, submit_static_analysis_handler, task_result_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route(
            "/api/protocol-compliance/tasks",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route(
            "/api/protocol-compliance/tasks/{task_id}",
            get(get_task_handler).delete(delete_task_handler),
        )
        .route(
            "/api/protocol-compliance/tasks/{task_id}/result",
            get(task_result_handler),
        )
        .route(
            "/api/protocol-compliance/static-analysis",
            post(submit_static_analysis_handler),
        )
        .route(
            "/api/protocol-compliance/static-analysis/history",
            get(job_history_handler),
        )
        .route(
            "/api/protocol-compliance/static-analysis/{job_id}/progress",
            get(job_progress_handler),
        )
        .route(
            "/api/protocol-compliance/static-analysis/{job_id}/result",
            get(job_result_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api)
        .layer(DefaultBodyLimit::max(state.limits.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

mod auth;
mod compliance_tasks;
mod envelope;
mod health;
mod multipart_form;
mod static_analysis;
mod task_response;

pub use auth::require_bearer_auth;
pub use compliance_tasks::{
    create_task_handler, delete_task_handler, get_task_handler, list_tasks_handler,
    task_result_handler,
};
pub use envelope::{ApiError, Envelope};
pub use health::health_handler;
pub use static_analysis::{
    job_history_handler, job_progress_handler, job_result_handler,
    submit_static_analysis_handler,
};

mod analysis_report;
mod document;
mod storage_path;
mod task;
mod task_id;
mod task_kind;
mod task_status;
mod user;

pub use analysis_report::{AnalysisReport, Finding, Severity};
pub use document::{ArchiveFormat, DocumentFormat, DocumentMeta};
pub use storage_path::StoragePath;
pub use task::{Task, TaskPatch, TaskTransitionError};
pub use task_id::TaskId;
pub use task_kind::TaskKind;
pub use task_status::TaskStatus;
pub use user::AuthenticatedUser;

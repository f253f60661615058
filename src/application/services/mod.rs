mod lifecycle_plan;
mod lifecycle_simulator;
mod task_service;

pub use lifecycle_plan::{LifecyclePlan, LifecycleStep};
pub use lifecycle_simulator::LifecycleSimulator;
pub use task_service::{
    NewComplianceTask, NewStaticAnalysisJob, Page, TaskQuery, TaskService, TaskServiceError,
    UploadedFile,
};

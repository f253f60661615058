use crate::domain::{AnalysisReport, Task};

/// Produces the result payload for a task reaching its terminal lifecycle step.
pub trait ReportGenerator: Send + Sync {
    fn generate(&self, task: &Task) -> Result<AnalysisReport, ReportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("analysis backend failed: {0}")]
    BackendFailed(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

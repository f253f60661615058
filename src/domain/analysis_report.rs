use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub rule: String,
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

/// Result payload attached to a completed task.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: String,
    pub total_checks: u32,
    pub passed: u32,
    pub failed: u32,
    pub warnings: u32,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn is_consistent(&self) -> bool {
        self.passed + self.failed + self.warnings == self.total_checks
            && self.findings.len() as u32 == self.failed + self.warnings
    }
}

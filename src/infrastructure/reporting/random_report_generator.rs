use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::application::ports::{ReportError, ReportGenerator};
use crate::domain::{AnalysisReport, Finding, Severity, Task, TaskKind};

use super::catalog::{COMPLIANCE_CHECKS, CheckTemplate, STATIC_ANALYSIS_CHECKS};

/// Synthesizes plausible reports from a fixed catalog of checks.
///
/// With a non-zero `failure_rate` a fraction of tasks end in a simulated
/// backend failure instead of a report.
pub struct RandomReportGenerator {
    rng: Mutex<StdRng>,
    failure_rate: f64,
}

impl RandomReportGenerator {
    pub fn new(failure_rate: f64) -> Self {
        Self::from_rng(StdRng::from_entropy(), failure_rate)
    }

    pub fn with_seed(seed: u64, failure_rate: f64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), failure_rate)
    }

    fn from_rng(rng: StdRng, failure_rate: f64) -> Self {
        Self {
            rng: Mutex::new(rng),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomReportGenerator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ReportGenerator for RandomReportGenerator {
    fn generate(&self, task: &Task) -> Result<AnalysisReport, ReportError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ReportError::BackendFailed("random source unavailable".to_string()))?;

        if self.failure_rate > 0.0 && rng.gen_bool(self.failure_rate) {
            return Err(ReportError::BackendFailed(match task.kind {
                TaskKind::ProtocolCompliance => {
                    "verification engine exited before producing a report".to_string()
                }
                TaskKind::StaticAnalysis => {
                    "analysis container exited with status 137".to_string()
                }
            }));
        }

        let catalog = match task.kind {
            TaskKind::ProtocolCompliance => COMPLIANCE_CHECKS,
            TaskKind::StaticAnalysis => STATIC_ANALYSIS_CHECKS,
        };

        let total_checks: u32 = rng.gen_range(24..=64);
        let failed: u32 = rng.gen_range(0..=4);
        let warnings: u32 = rng.gen_range(0..=6);
        let passed = total_checks - failed - warnings;

        let mut findings = Vec::with_capacity((failed + warnings) as usize);
        for n in 0..failed + warnings {
            let check = catalog.choose(&mut *rng).ok_or_else(|| {
                ReportError::InvalidInput("empty check catalog".to_string())
            })?;
            let severity = if n < failed {
                check.severity
            } else {
                Severity::Low
            };
            findings.push(finding(task, check, severity, n + 1, &mut *rng));
        }

        let summary = format!(
            "{} of {} checks passed for {} ({} failed, {} warnings)",
            passed, total_checks, task.name, failed, warnings
        );

        Ok(AnalysisReport {
            summary,
            total_checks,
            passed,
            failed,
            warnings,
            findings,
        })
    }
}

fn finding(
    task: &Task,
    check: &CheckTemplate,
    severity: Severity,
    ordinal: u32,
    rng: &mut StdRng,
) -> Finding {
    let location = match task.kind {
        TaskKind::ProtocolCompliance => format!(
            "{} §{}.{} ({})",
            task.document.filename,
            rng.gen_range(1..=12),
            rng.gen_range(1..=9),
            check.location_hint
        ),
        TaskKind::StaticAnalysis => format!("{}:{}", check.location_hint, rng.gen_range(10..=900)),
    };

    Finding {
        id: format!("F-{:03}", ordinal),
        rule: check.rule.to_string(),
        severity,
        location,
        message: check.message.to_string(),
    }
}

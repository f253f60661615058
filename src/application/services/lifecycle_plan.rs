use std::time::Duration;

use crate::domain::TaskKind;

/// One intermediate progress update, fired `at` after scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleStep {
    pub at: Duration,
    pub progress: u8,
    pub stage: String,
}

/// Ordered progress steps followed by the terminal step at `completes_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecyclePlan {
    steps: Vec<LifecycleStep>,
    completes_at: Duration,
}

impl LifecyclePlan {
    pub fn new(mut steps: Vec<LifecycleStep>, completes_at: Duration) -> Self {
        steps.sort_by_key(|s| s.at);
        let completes_at = steps
            .last()
            .map_or(completes_at, |last| completes_at.max(last.at));
        Self {
            steps,
            completes_at,
        }
    }

    pub fn for_kind(kind: TaskKind) -> Self {
        match kind {
            TaskKind::ProtocolCompliance => Self::protocol_compliance(),
            TaskKind::StaticAnalysis => Self::static_analysis(),
        }
    }

    pub fn protocol_compliance() -> Self {
        Self::new(
            vec![
                step(600, 35, "Parsing specification"),
                step(1600, 68, "Checking message formats"),
                step(2800, 85, "Checking state transitions"),
            ],
            Duration::from_millis(4200),
        )
    }

    pub fn static_analysis() -> Self {
        Self::new(
            vec![
                step(800, 20, "Unpacking code archive"),
                step(2000, 45, "Building analysis image"),
                step(3400, 75, "Running rule set"),
                step(4600, 90, "Collecting findings"),
            ],
            Duration::from_millis(5600),
        )
    }

    pub fn steps(&self) -> &[LifecycleStep] {
        &self.steps
    }

    pub fn completes_at(&self) -> Duration {
        self.completes_at
    }
}

fn step(at_ms: u64, progress: u8, stage: &str) -> LifecycleStep {
    LifecycleStep {
        at: Duration::from_millis(at_ms),
        progress,
        stage: stage.to_string(),
    }
}

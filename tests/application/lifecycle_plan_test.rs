use std::time::Duration;

use protocol_analysis::application::services::{LifecyclePlan, LifecycleStep};
use protocol_analysis::domain::TaskKind;

#[test]
fn given_compliance_plan_when_inspected_then_matches_fixed_delay_table() {
    let plan = LifecyclePlan::protocol_compliance();

    let table: Vec<(u128, u8)> = plan
        .steps()
        .iter()
        .map(|s| (s.at.as_millis(), s.progress))
        .collect();

    assert_eq!(table, vec![(600, 35), (1600, 68), (2800, 85)]);
    assert_eq!(plan.completes_at(), Duration::from_millis(4200));
}

#[test]
fn given_any_kind_when_building_plan_then_progress_is_increasing_and_below_full() {
    for kind in [TaskKind::ProtocolCompliance, TaskKind::StaticAnalysis] {
        let plan = LifecyclePlan::for_kind(kind);
        let progress: Vec<u8> = plan.steps().iter().map(|s| s.progress).collect();

        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert!(progress.iter().all(|p| *p < 100));
        assert!(plan.steps().iter().all(|s| s.at <= plan.completes_at()));
    }
}

#[test]
fn given_unsorted_steps_when_building_plan_then_steps_are_ordered_and_completion_follows() {
    let plan = LifecyclePlan::new(
        vec![
            LifecycleStep {
                at: Duration::from_millis(900),
                progress: 80,
                stage: "late".to_string(),
            },
            LifecycleStep {
                at: Duration::from_millis(100),
                progress: 10,
                stage: "early".to_string(),
            },
        ],
        Duration::from_millis(500),
    );

    assert_eq!(plan.steps()[0].stage, "early");
    assert_eq!(plan.completes_at(), Duration::from_millis(900));
}

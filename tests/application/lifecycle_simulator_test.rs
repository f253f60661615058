use std::sync::Arc;
use std::time::Duration;

use protocol_analysis::application::ports::TaskRepository;
use protocol_analysis::application::services::LifecyclePlan;
use protocol_analysis::domain::{TaskId, TaskKind, TaskStatus};

use crate::helpers::{FailingReportGenerator, FixedReportGenerator, sample_task, test_context};

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn given_scheduled_task_when_time_passes_then_follows_delay_table() {
    let ctx = test_context(10, Arc::new(FixedReportGenerator));
    let task = sample_task(TaskKind::ProtocolCompliance);
    ctx.repository.create(&task).await.unwrap();

    ctx.simulator
        .schedule(task.id, LifecyclePlan::protocol_compliance())
        .await;

    advance(700).await;
    let current = ctx.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(current.status, TaskStatus::Processing);
    assert_eq!(current.progress, 35);

    advance(1000).await;
    let current = ctx.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(current.progress, 68);

    advance(1200).await;
    let current = ctx.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(current.progress, 85);
    assert!(current.result.is_none());
    assert!(ctx.simulator.is_pending(task.id).await);

    advance(1500).await;
    let current = ctx.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(current.status, TaskStatus::Completed);
    assert_eq!(current.progress, 100);
    assert!(current.result.is_some());
    assert!(!ctx.simulator.is_pending(task.id).await);
}

#[tokio::test(start_paused = true)]
async fn given_failing_report_generator_when_plan_finishes_then_task_fails() {
    let ctx = test_context(10, Arc::new(FailingReportGenerator));
    let task = sample_task(TaskKind::StaticAnalysis);
    ctx.repository.create(&task).await.unwrap();

    ctx.simulator
        .schedule(task.id, LifecyclePlan::static_analysis())
        .await;
    advance(6000).await;

    let current = ctx.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(current.status, TaskStatus::Failed);
    assert!(current.result.is_none());
    assert!(
        current
            .error_message
            .as_deref()
            .unwrap()
            .contains("container exited")
    );
    assert_eq!(ctx.simulator.pending_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn given_cancelled_timer_when_time_passes_then_task_stays_queued() {
    let ctx = test_context(10, Arc::new(FixedReportGenerator));
    let task = sample_task(TaskKind::ProtocolCompliance);
    ctx.repository.create(&task).await.unwrap();
    ctx.simulator
        .schedule(task.id, LifecyclePlan::protocol_compliance())
        .await;

    assert!(ctx.simulator.cancel(task.id).await);
    advance(5000).await;

    let current = ctx.repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(current.status, TaskStatus::Queued);
    assert_eq!(current.progress, 0);
}

#[tokio::test(start_paused = true)]
async fn given_unknown_task_when_first_step_fires_then_timer_stops() {
    let ctx = test_context(10, Arc::new(FixedReportGenerator));
    let missing = TaskId::new();

    ctx.simulator
        .schedule(missing, LifecyclePlan::protocol_compliance())
        .await;
    advance(700).await;

    assert!(!ctx.simulator.is_pending(missing).await);
    assert!(ctx.repository.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn given_task_deleted_mid_plan_when_time_passes_then_no_record_reappears() {
    let ctx = test_context(10, Arc::new(FixedReportGenerator));
    let task = sample_task(TaskKind::ProtocolCompliance);
    ctx.repository.create(&task).await.unwrap();
    ctx.simulator
        .schedule(task.id, LifecyclePlan::protocol_compliance())
        .await;

    advance(700).await;
    ctx.repository.delete(task.id).await.unwrap();
    advance(5000).await;

    assert!(ctx.repository.get_by_id(task.id).await.unwrap().is_none());
    assert_eq!(ctx.simulator.pending_count().await, 0);
}

#[tokio::test]
async fn given_no_pending_timer_when_cancelling_then_returns_false() {
    let ctx = test_context(10, Arc::new(FixedReportGenerator));
    assert!(!ctx.simulator.cancel(TaskId::new()).await);
}

use protocol_analysis::application::ports::{RepositoryError, TaskFilter, TaskRepository};
use protocol_analysis::domain::{TaskId, TaskKind, TaskPatch, TaskStatus};
use protocol_analysis::infrastructure::persistence::InMemoryTaskRepository;

use crate::helpers::{sample_task, task_submitted_at};

#[tokio::test]
async fn given_capacity_when_creating_beyond_it_then_oldest_are_evicted_first() {
    let repository = InMemoryTaskRepository::new(2);
    let oldest = task_submitted_at(TaskKind::ProtocolCompliance, 30);
    let middle = task_submitted_at(TaskKind::ProtocolCompliance, 20);
    let newest = task_submitted_at(TaskKind::ProtocolCompliance, 10);

    assert!(repository.create(&oldest).await.unwrap().is_empty());
    assert!(repository.create(&middle).await.unwrap().is_empty());
    let evicted = repository.create(&newest).await.unwrap();

    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].id, oldest.id);
    assert_eq!(repository.len().await, 2);
    assert!(repository.get_by_id(oldest.id).await.unwrap().is_none());
}

#[tokio::test]
async fn given_duplicate_id_when_creating_then_constraint_violation() {
    let repository = InMemoryTaskRepository::new(5);
    let task = sample_task(TaskKind::ProtocolCompliance);
    repository.create(&task).await.unwrap();

    let err = repository.create(&task).await.unwrap_err();

    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
}

#[tokio::test]
async fn given_tasks_when_listing_then_sorted_newest_submission_first() {
    let repository = InMemoryTaskRepository::new(10);
    let old = task_submitted_at(TaskKind::ProtocolCompliance, 60);
    let new = task_submitted_at(TaskKind::ProtocolCompliance, 1);
    let mid = task_submitted_at(TaskKind::ProtocolCompliance, 30);
    for task in [&new, &old, &mid] {
        repository.create(task).await.unwrap();
    }

    let listed = repository.list(&TaskFilter::default()).await.unwrap();

    let ids: Vec<TaskId> = listed.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![new.id, mid.id, old.id]);
}

#[tokio::test]
async fn given_status_filter_when_listing_then_returns_only_matching_statuses() {
    let repository = InMemoryTaskRepository::new(10);
    let queued = task_submitted_at(TaskKind::ProtocolCompliance, 3);
    let mut processing = task_submitted_at(TaskKind::ProtocolCompliance, 2);
    processing.status = TaskStatus::Processing;
    let mut failed = task_submitted_at(TaskKind::ProtocolCompliance, 1);
    failed.status = TaskStatus::Failed;
    for task in [&queued, &processing, &failed] {
        repository.create(task).await.unwrap();
    }

    let filter = TaskFilter::kind(TaskKind::ProtocolCompliance)
        .with_statuses(vec![TaskStatus::Queued, TaskStatus::Failed]);
    let listed = repository.list(&filter).await.unwrap();

    let ids: Vec<TaskId> = listed.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![failed.id, queued.id]);
}

#[tokio::test]
async fn given_kind_filter_when_listing_then_other_kinds_are_excluded() {
    let repository = InMemoryTaskRepository::new(10);
    repository
        .create(&sample_task(TaskKind::ProtocolCompliance))
        .await
        .unwrap();
    repository
        .create(&sample_task(TaskKind::StaticAnalysis))
        .await
        .unwrap();

    let listed = repository
        .list(&TaskFilter::kind(TaskKind::StaticAnalysis))
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].kind, TaskKind::StaticAnalysis);
}

#[tokio::test]
async fn given_existing_task_when_updating_then_returns_merged_task() {
    let repository = InMemoryTaskRepository::new(10);
    let task = sample_task(TaskKind::ProtocolCompliance);
    repository.create(&task).await.unwrap();

    let updated = repository
        .update(
            task.id,
            TaskPatch {
                status: Some(TaskStatus::Processing),
                progress: Some(35),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, TaskStatus::Processing);
    assert_eq!(updated.progress, 35);
    assert!(updated.updated_at >= task.updated_at);
}

#[tokio::test]
async fn given_unknown_id_when_updating_then_returns_none() {
    let repository = InMemoryTaskRepository::new(10);

    let result = repository
        .update(TaskId::new(), TaskPatch::default())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn given_backwards_transition_when_updating_then_constraint_violation() {
    let repository = InMemoryTaskRepository::new(10);
    let mut task = sample_task(TaskKind::ProtocolCompliance);
    task.status = TaskStatus::Processing;
    repository.create(&task).await.unwrap();

    let err = repository
        .update(
            task.id,
            TaskPatch {
                status: Some(TaskStatus::Queued),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
    let stored = repository.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TaskStatus::Processing);
}

#[tokio::test]
async fn given_existing_task_when_deleting_then_it_is_returned_and_removed() {
    let repository = InMemoryTaskRepository::new(10);
    let task = sample_task(TaskKind::ProtocolCompliance);
    repository.create(&task).await.unwrap();

    let removed = repository.delete(task.id).await.unwrap();

    assert_eq!(removed.map(|t| t.id), Some(task.id));
    assert!(repository.is_empty().await);
    assert!(repository.delete(task.id).await.unwrap().is_none());
}

#[test]
fn given_zero_capacity_when_creating_repository_then_keeps_at_least_one() {
    let repository = InMemoryTaskRepository::new(0);
    assert_eq!(repository.capacity(), 1);
}

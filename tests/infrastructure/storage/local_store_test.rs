use std::io;

use bytes::Bytes;
use futures::stream;
use futures::stream::BoxStream;

use protocol_analysis::application::ports::{StagingStore, StagingStoreError};
use protocol_analysis::domain::{StoragePath, TaskId};
use protocol_analysis::infrastructure::storage::LocalStagingStore;

fn create_test_store() -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn byte_stream(chunks: Vec<&'static str>) -> BoxStream<'static, Result<Bytes, io::Error>> {
    Box::pin(stream::iter(
        chunks.into_iter().map(|c| Ok(Bytes::from(c))),
    ))
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_lands_under_task_directory() {
    let (dir, store) = create_test_store();
    let task_id = TaskId::new();
    let path = StoragePath::new(&task_id, "dockerfile", "Dockerfile");

    let size = store
        .store(&path, byte_stream(vec!["FROM debian", ":bookworm\n"]))
        .await
        .unwrap();

    assert_eq!(size, 21);
    let on_disk = dir
        .path()
        .join(task_id.to_string())
        .join("dockerfile")
        .join("Dockerfile");
    assert_eq!(
        std::fs::read_to_string(on_disk).unwrap(),
        "FROM debian:bookworm\n"
    );
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_file_is_removed() {
    let (dir, store) = create_test_store();
    let path = StoragePath::new(&TaskId::new(), "code_archive", "src.zip");
    store
        .store(&path, byte_stream(vec!["PK"]))
        .await
        .unwrap();

    store.delete(&path).await.unwrap();

    assert!(!dir.path().join(path.as_str()).exists());
}

#[tokio::test]
async fn given_missing_file_when_deleting_then_succeeds() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::new(&TaskId::new(), "rules", "rules.json");

    store.delete(&path).await.unwrap();
}

#[tokio::test]
async fn given_failing_stream_when_storing_then_returns_io_error() {
    let (dir, store) = create_test_store();
    let path = StoragePath::new(&TaskId::new(), "document", "broken.bin");
    let chunks = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away")),
    ];

    let err = store
        .store(&path, Box::pin(stream::iter(chunks)))
        .await
        .unwrap_err();

    assert!(matches!(err, StagingStoreError::Io(_)));
    assert!(!dir.path().join(path.as_str()).exists());
}

//! Tests for async task runtime primitives.

use futures::{StreamExt, TryStreamExt};
use delivery_metrics::runtime::{AsyncStream, AsyncTask};

#[tokio::test]
async fn test_async_task_spawn_async() {
    let task = AsyncTask::spawn_async(async { 42 });
    let result = task.await.unwrap();
    assert_eq!(result, 42);
}

#[tokio::test]
async fn test_dropped_sender_is_an_error() {
    let (tx, rx) = tokio::sync::oneshot::channel::<u32>();
    drop(tx);
    assert!(AsyncTask::new(rx).await.is_err());
}

#[tokio::test]
async fn test_async_stream_ends_when_producer_drops() {
    let (tx, mut stream) = AsyncStream::channel();
    tx.send(1).unwrap();
    tx.send(2).unwrap();
    drop(tx);

    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn test_async_stream_from_producer() {
    let (tx, stream) = AsyncStream::channel();
    tokio::spawn(async move {
        for page in 0..3u32 {
            if tx.send(Ok::<u32, String>(page)).is_err() {
                return;
            }
        }
    });

    let items: Vec<u32> = stream.try_collect().await.unwrap();
    assert_eq!(items, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_async_stream_stops_at_first_error() {
    let (tx, stream) = AsyncStream::channel();
    for item in [Ok(1), Err("page 2 failed"), Ok(3)] {
        tx.send(item).unwrap();
    }
    drop(tx);

    let result: Result<Vec<i32>, &str> = stream.try_collect().await;
    assert_eq!(result, Err("page 2 failed"));
}

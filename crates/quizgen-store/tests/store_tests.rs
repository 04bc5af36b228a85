//! Integration tests for the chunk store implementations

use quizgen_chunking::{Chunk, ChunkMetadata, ChunkSet};
use quizgen_config::StoreConfig;
use quizgen_store::{ChunkStore, MemoryChunkStore, MockChunkStore, StorageError};
use std::sync::Arc;
use std::time::Duration;

fn sample_set(marker: &str) -> ChunkSet {
    let text = format!("chunk for {marker}");
    ChunkSet::new(vec![Chunk {
        chunk_id: 0,
        char_count: text.chars().count(),
        token_count: 4,
        overlap_with_previous: 0,
        metadata: ChunkMetadata::new(),
        text,
    }])
}

#[tokio::test]
async fn stored_sets_read_back_intact() {
    let store = MemoryChunkStore::new(8, Duration::from_secs(60)).expect("valid capacity");

    store
        .put("notes.pdf", sample_set("notes.pdf"))
        .await
        .expect("put succeeds");

    let fetched = store.get("notes.pdf").await.expect("get succeeds");
    let set = fetched.expect("entry present");
    assert_eq!(set.chunks.len(), 1);
    assert_eq!(set.chunks[0].text, "chunk for notes.pdf");
    assert_eq!(set.stats.total_chunks, 1);
}

#[test]
fn missing_keys_read_as_none() {
    tokio_test::block_on(async {
        let store = MemoryChunkStore::new(8, Duration::from_secs(60)).expect("valid capacity");
        let fetched = store.get("never-stored.txt").await.expect("get succeeds");
        assert!(fetched.is_none());
    });
}

#[tokio::test]
async fn putting_twice_replaces_the_entry() {
    let store = MemoryChunkStore::new(8, Duration::from_secs(60)).expect("valid capacity");

    store.put("doc", sample_set("first")).await.expect("put");
    store.put("doc", sample_set("second")).await.expect("put");

    let set = store.get("doc").await.expect("get").expect("present");
    assert_eq!(set.chunks[0].text, "chunk for second");
    assert_eq!(store.len().await.expect("len"), 1);
}

#[tokio::test]
async fn removal_reports_whether_an_entry_existed() {
    let store = MemoryChunkStore::new(8, Duration::from_secs(60)).expect("valid capacity");

    store.put("doc", sample_set("doc")).await.expect("put");
    assert!(store.remove("doc").await.expect("remove"));
    assert!(!store.remove("doc").await.expect("remove"));
    assert!(store.is_empty().await.expect("is_empty"));
}

#[tokio::test]
async fn entries_expire_after_the_ttl() {
    let store = MemoryChunkStore::new(8, Duration::from_millis(40)).expect("valid capacity");

    store.put("doc", sample_set("doc")).await.expect("put");
    assert!(store.get("doc").await.expect("get").is_some());

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(store.get("doc").await.expect("get").is_none());
}

#[tokio::test]
async fn purge_drops_expired_entries_in_bulk() {
    let store = MemoryChunkStore::new(8, Duration::from_millis(40)).expect("valid capacity");

    store.put("a", sample_set("a")).await.expect("put");
    store.put("b", sample_set("b")).await.expect("put");
    tokio::time::sleep(Duration::from_millis(80)).await;
    store.put("c", sample_set("c")).await.expect("put");

    let purged = store.purge_expired().expect("purge succeeds");
    assert_eq!(purged, 2);
    assert_eq!(store.len().await.expect("len"), 1);
    assert!(store.get("c").await.expect("get").is_some());
}

#[tokio::test]
async fn capacity_evicts_the_least_recently_used_entry() {
    let store = MemoryChunkStore::new(2, Duration::from_secs(60)).expect("valid capacity");

    store.put("a", sample_set("a")).await.expect("put");
    store.put("b", sample_set("b")).await.expect("put");
    store.put("c", sample_set("c")).await.expect("put");

    assert_eq!(store.len().await.expect("len"), 2);
    assert!(store.get("a").await.expect("get").is_none());
    assert!(store.get("b").await.expect("get").is_some());
    assert!(store.get("c").await.expect("get").is_some());
}

#[test]
fn zero_capacity_is_a_configuration_error() {
    let result = MemoryChunkStore::new(0, Duration::from_secs(60));
    assert!(matches!(result, Err(StorageError::Configuration(_))));
}

#[tokio::test]
async fn store_builds_from_central_config() {
    let store = MemoryChunkStore::from_config(&StoreConfig::default()).expect("valid config");
    store.put("doc", sample_set("doc")).await.expect("put");
    assert_eq!(store.len().await.expect("len"), 1);
}

#[tokio::test]
async fn implementations_are_interchangeable_behind_the_trait() {
    let stores: Vec<Arc<dyn ChunkStore>> = vec![
        Arc::new(MemoryChunkStore::new(8, Duration::from_secs(60)).expect("valid capacity")),
        Arc::new(MockChunkStore::new()),
    ];

    for store in stores {
        store.put("doc", sample_set("doc")).await.expect("put");
        assert!(store.get("doc").await.expect("get").is_some());
        assert_eq!(store.len().await.expect("len"), 1);
    }
}

#[tokio::test]
async fn mock_store_injects_a_single_failure() {
    let store = MockChunkStore::new();
    store.fail_next("disk on fire");

    let result = store.put("doc", sample_set("doc")).await;
    assert!(matches!(result, Err(StorageError::Unexpected { .. })));
    if let Err(e) = result {
        assert!(e.to_string().contains("disk on fire"));
    }

    // The failure is one-shot.
    store.put("doc", sample_set("doc")).await.expect("put");
    assert!(store.get("doc").await.expect("get").is_some());
}

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;

use livemirror::watcher::sync_registry;
use livemirror::{MemorySource, Registry, Watcher};

mod common;
use common::{session_json, session_record};

#[tokio::test]
async fn test_watcher_first_fetch() {
    let source = Arc::new(MemorySource::new());
    source.put_session(session_record(session_json("ses_A")));
    let mut watcher = Watcher::new("ses_A".to_string(), source.clone());

    assert!(watcher.fetch().await.unwrap());
    assert!(!watcher.fetch().await.unwrap());

    let session = watcher.session().unwrap();
    assert_eq!(2, session.connection_count());
    let alice = session.connection("con_ALICE").unwrap();
    let publisher = alice.publisher("str_CAM_ALICE").unwrap();
    assert_eq!(Some((640, 480)), publisher.dimensions());
    assert!(alice.is_subscribed_to("str_CAM_BOB"));
}

#[tokio::test]
async fn test_watcher_stream_closed() {
    let source = Arc::new(MemorySource::new());
    source.put_session(session_record(session_json("ses_A")));
    let mut watcher = Watcher::new("ses_A".to_string(), source.clone());
    watcher.fetch().await.unwrap();

    let mut value = session_json("ses_A");
    value["connections"]["content"][1]["publishers"] = json!([]);
    value["connections"]["content"][0]["subscribers"] = json!([]);
    source.put_session(session_record(value));

    assert!(watcher.fetch().await.unwrap());
    let session = watcher.session().unwrap();
    assert_eq!(0, session.connection("con_BOB").unwrap().publisher_count());
    assert_eq!(1, session.connection("con_ALICE").unwrap().publisher_count());
    assert_eq!(
        0,
        session
            .connection("con_ALICE")
            .unwrap()
            .subscribers()
            .count()
    );
}

#[tokio::test]
async fn test_watcher_token_change_is_not_a_change() {
    let source = Arc::new(MemorySource::new());
    source.put_session(session_record(session_json("ses_A")));
    let mut watcher = Watcher::new("ses_A".to_string(), source.clone());
    watcher.fetch().await.unwrap();

    let mut value = session_json("ses_A");
    value["connections"]["content"][0]["token"] = json!("wss://localhost:4443?token=tok_NEW");
    source.put_session(session_record(value));

    assert!(!watcher.fetch().await.unwrap());
    let alice = watcher.session().unwrap().connection("con_ALICE").unwrap();
    assert_eq!(
        Some("wss://localhost:4443?token=tok_NEW"),
        alice.token.as_deref()
    );
}

#[tokio::test]
async fn test_watcher_session_gone() {
    let source = Arc::new(MemorySource::new());
    source.put_session(session_record(session_json("ses_A")));
    let mut watcher = Watcher::new("ses_A".to_string(), source.clone());
    watcher.fetch().await.unwrap();

    source.remove_session("ses_A");

    assert!(watcher.fetch().await.unwrap_err().is_not_found());
    assert!(watcher.session().is_none());
}

#[tokio::test]
async fn test_watcher_fetch_connection() {
    let source = Arc::new(MemorySource::new());
    source.put_session(session_record(session_json("ses_A")));
    let mut watcher = Watcher::new("ses_A".to_string(), source.clone());

    // no mirror yet, falls back to a full fetch
    assert!(watcher.fetch_connection("con_BOB").await.unwrap());
    assert!(!watcher.fetch_connection("con_BOB").await.unwrap());

    let mut value = session_json("ses_A");
    value["connections"]["content"][1]["publishers"][0]["hasAudio"] = json!(false);
    source.put_session(session_record(value));
    assert!(watcher.fetch_connection("con_BOB").await.unwrap());

    let mut value = session_json("ses_A");
    value["connections"]["content"]
        .as_array_mut()
        .unwrap()
        .remove(1);
    source.put_session(session_record(value));
    assert!(watcher
        .fetch_connection("con_BOB")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(watcher.session().unwrap().connection("con_BOB").is_none());
}

#[tokio::test]
async fn test_watcher_watch_reports_changes() {
    let source = Arc::new(MemorySource::new());
    source.put_session(session_record(session_json("ses_A")));
    let watcher = Watcher::new("ses_A".to_string(), source.clone());
    let (tx, mut rx) = mpsc::channel(4);
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(watcher.watch(Duration::from_millis(10), Some(tx), async move {
        let _ = stop_rx.await;
    }));

    let session = rx.recv().await.unwrap();
    assert_eq!("ses_A", session.session_id);
    assert_eq!(2, session.connection_count());

    let mut value = session_json("ses_A");
    value["recording"] = json!(true);
    source.put_session(session_record(value));

    let session = rx.recv().await.unwrap();
    assert_eq!(Some(true), session.recording);

    stop_tx.send(()).unwrap();
    let watcher = handle.await.unwrap();
    assert_eq!(Some(true), watcher.session().unwrap().recording);
}

#[tokio::test]
async fn test_registry_sync() {
    let source = MemorySource::new();
    source.put_session(session_record(session_json("ses_A")));
    source.put_session(session_record(session_json("ses_B")));
    let mut registry = Registry::new();

    assert!(sync_registry(&mut registry, &source).await.unwrap());
    assert!(!sync_registry(&mut registry, &source).await.unwrap());
    let ids: Vec<&str> = registry.sessions().map(|s| s.session_id.as_str()).collect();
    assert_eq!(vec!["ses_A", "ses_B"], ids);

    source.remove_session("ses_A");
    assert!(sync_registry(&mut registry, &source).await.unwrap());
    assert!(registry.session("ses_A").is_none());
    assert_eq!(1, registry.len());
}

//! Dispatch tests plus reconnect tests against a loopback socket server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use campusloop_common::UserId;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use super::*;
use crate::protocol::{kinds, Envelope};

fn offline_channel() -> EventChannel {
    EventChannel::new(EventChannelConfig::new("ws://127.0.0.1:9/ws"))
}

fn recorder() -> (Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    (Arc::clone(&log), log)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn handlers_run_in_registration_order() {
    let mut channel = offline_channel();
    let (log, seen) = recorder();
    for tag in ["first", "second", "third"] {
        let log = Arc::clone(&log);
        channel.on(kinds::NEW_ERRAND, move |_| log.lock().unwrap().push(tag.to_string()));
    }

    let invoked = channel.dispatch(&Envelope::new(kinds::NEW_ERRAND, json!({})));
    assert_eq!(invoked, 3);
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn off_removes_only_that_handler() {
    let mut channel = offline_channel();
    let (log, seen) = recorder();
    let log_a = Arc::clone(&log);
    let a = channel.on(kinds::NEW_MESSAGE, move |_| log_a.lock().unwrap().push("a".into()));
    let log_b = Arc::clone(&log);
    channel.on(kinds::NEW_MESSAGE, move |_| log_b.lock().unwrap().push("b".into()));

    assert!(channel.off(kinds::NEW_MESSAGE, a));
    assert!(!channel.off(kinds::NEW_MESSAGE, a));
    assert!(!channel.off(kinds::EMERGENCY_STATE, a));

    channel.dispatch_text(r#"{"type":"NEW_MESSAGE","payload":{}}"#);
    assert_eq!(*seen.lock().unwrap(), vec!["b"]);
    assert_eq!(channel.handler_count(kinds::NEW_MESSAGE), 1);
}

#[test]
fn handlers_only_see_their_kind() {
    let mut channel = offline_channel();
    let (log, seen) = recorder();
    channel.on(kinds::EMERGENCY_STATE, move |payload| {
        log.lock().unwrap().push(payload["message"].as_str().unwrap_or("").to_string())
    });

    assert_eq!(channel.dispatch_text(r#"{"type":"NEW_ERRAND","payload":{}}"#), 0);
    assert_eq!(
        channel.dispatch_text(r#"{"type":"EMERGENCY_STATE","payload":{"message":"drill"}}"#),
        1
    );
    assert_eq!(*seen.lock().unwrap(), vec!["drill"]);
}

#[test]
fn malformed_frames_are_dropped() {
    let mut channel = offline_channel();
    let (log, seen) = recorder();
    channel.on(kinds::NEW_ERRAND, move |_| log.lock().unwrap().push("hit".into()));

    assert_eq!(channel.dispatch_text("{{{ not json"), 0);
    assert_eq!(channel.dispatch_text(r#"["NEW_ERRAND"]"#), 0);
    assert_eq!(channel.dispatch_text(r#"{"payload":{}}"#), 0);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn identity_goes_into_query() {
    let config = EventChannelConfig::new("ws://campus/ws");
    assert_eq!(config.connection_url(None), "ws://campus/ws");
    assert_eq!(
        config.connection_url(Some(&UserId::from("user 1"))),
        "ws://campus/ws?user_id=user%201"
    );
    let config = EventChannelConfig::new("ws://campus/ws?v=2");
    assert_eq!(
        config.connection_url(Some(&UserId::from("u"))),
        "ws://campus/ws?v=2&user_id=u"
    );
}

#[tokio::test]
async fn idle_channel_never_reports_status() {
    let mut channel = offline_channel();
    let waited = tokio::time::timeout(Duration::from_millis(50), channel.next_status()).await;
    assert!(waited.is_err());
    assert!(!channel.is_running());
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

const STEP: Duration = Duration::from_secs(5);

async fn expect_status(channel: &mut EventChannel) -> ChannelStatus {
    tokio::time::timeout(STEP, channel.next_status())
        .await
        .expect("status within timeout")
        .expect("channel still running")
}

#[tokio::test]
async fn reconnects_after_server_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut queries = Vec::new();
        for round in 0..2u64 {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let frame = Envelope::new("PING", json!({ "round": round })).to_json();
            ws.send(Message::Text(frame.into())).await.unwrap();
            ws.close(None).await.unwrap();
            while let Some(Ok(_)) = ws.next().await {}
            queries.push(round);
        }
        queries
    });

    let config = EventChannelConfig::new(format!("ws://{addr}/ws"))
        .with_reconnect_delay(Duration::from_millis(50));
    let mut channel = EventChannel::new(config);
    let rounds = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&rounds);
    channel.on("PING", move |payload| {
        sink.lock().unwrap().push(payload["round"].as_u64().unwrap_or(99))
    });

    assert!(channel.connect(Some(&UserId::from("u1"))));
    assert!(!channel.connect(None), "second connect is a no-op");

    assert_eq!(expect_status(&mut channel).await, ChannelStatus::Connected);
    assert!(channel.is_connected());
    assert_eq!(expect_status(&mut channel).await, ChannelStatus::Disconnected);
    assert!(!channel.is_connected());
    assert_eq!(expect_status(&mut channel).await, ChannelStatus::Connected);
    assert_eq!(expect_status(&mut channel).await, ChannelStatus::Disconnected);

    assert_eq!(*rounds.lock().unwrap(), vec![0, 1]);
    channel.disconnect();
    assert!(!channel.is_running());
    assert_eq!(server.await.unwrap(), vec![0, 1]);
}

#[tokio::test]
async fn unreachable_server_keeps_retrying() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = EventChannelConfig::new(format!("ws://{addr}/ws"))
        .with_reconnect_delay(Duration::from_millis(20));
    let mut channel = EventChannel::new(config);
    assert!(channel.connect(None));

    let waited = tokio::time::timeout(Duration::from_millis(200), channel.next_status()).await;
    assert!(waited.is_err(), "no status while every attempt fails");
    assert!(channel.is_running());
    channel.disconnect();
}

#[tokio::test]
async fn bad_url_is_retried_not_fatal() {
    let config = EventChannelConfig::new("not a url at all")
        .with_reconnect_delay(Duration::from_millis(20));
    let mut channel = EventChannel::new(config);
    assert!(channel.connect(None));
    let waited = tokio::time::timeout(Duration::from_millis(100), channel.next_status()).await;
    assert!(waited.is_err());
    assert!(channel.is_running());
}

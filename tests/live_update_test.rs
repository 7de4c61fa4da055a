///! Tests for the live-update fan-out and the notification wire format.
///!
///! The LiveServer is exercised directly (no WebSocket transport needed):
///! it is the piece with actual concurrency shape, and its contract is
///! at-most-once, no-filtering, no-backpressure broadcast.
use whatsapp_dashboard_backend::live::protocol::{NewMessagePayload, ServerEvent};
use whatsapp_dashboard_backend::live::server::LiveServer;
use whatsapp_dashboard_backend::models::messages::Direction;

fn sample_event() -> ServerEvent {
    ServerEvent::NewMessage {
        message_wamid: Some("wamid.TEST".to_string()),
        display_phone: "15551234567".to_string(),
        text_body: "hi".to_string(),
        timestamp_unix: 1_722_470_400,
        direction: Direction::Outbound,
    }
}

#[tokio::test]
async fn test_broadcast_reaches_every_open_channel() {
    let server = LiveServer::new();

    let (_id_a, mut rx_a) = server.join().await;
    let (_id_b, mut rx_b) = server.join().await;
    let (_id_c, mut rx_c) = server.join().await;
    assert_eq!(server.client_count().await, 3);

    server.broadcast(sample_event()).await;

    // Broadcast completes within the same task iteration — the events are
    // already queued, no further await needed before draining.
    for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
        let event = rx.try_recv().expect("client should have the event");
        let ServerEvent::NewMessage { text_body, .. } = event;
        assert_eq!(text_body, "hi");
    }
}

#[tokio::test]
async fn test_departed_channel_is_skipped_and_others_undisturbed() {
    let server = LiveServer::new();

    let (id_a, mut rx_a) = server.join().await;
    let (_id_b, mut rx_b) = server.join().await;

    server.leave(id_a).await;
    assert_eq!(server.client_count().await, 1);

    server.broadcast(sample_event()).await;

    assert!(rx_a.try_recv().is_err());
    assert!(rx_b.try_recv().is_ok());
}

#[tokio::test]
async fn test_events_with_no_listeners_are_lost() {
    // At-most-once: nothing buffers a broadcast that nobody is connected
    // for. A late joiner starts with an empty queue and must poll the
    // read model to catch up.
    let server = LiveServer::new();

    server.broadcast(sample_event()).await;

    let (_id, mut rx) = server.join().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_dropped_receiver_does_not_break_broadcast() {
    let server = LiveServer::new();

    let (_id_gone, rx_gone) = server.join().await;
    let (_id_live, mut rx_live) = server.join().await;
    drop(rx_gone);

    // The dead handle is skipped silently; the live one still receives.
    server.broadcast(sample_event()).await;
    assert!(rx_live.try_recv().is_ok());
}

#[test]
fn test_server_event_wire_shape() {
    let json = serde_json::to_value(sample_event()).unwrap();

    assert_eq!(json["type"], "new_message");
    assert_eq!(json["message_wamid"], "wamid.TEST");
    assert_eq!(json["display_phone"], "15551234567");
    assert_eq!(json["text_body"], "hi");
    assert_eq!(json["timestamp_unix"], 1_722_470_400);
    assert_eq!(json["direction"], "outbound");
}

#[test]
fn test_notification_payload_decodes() {
    // Exactly what the insert trigger publishes.
    let raw = r#"{
        "message_wamid": "wamid.ABC",
        "display_phone": "15551234567",
        "text_body": "hello there",
        "timestamp_unix": 1722470400,
        "direction": "inbound"
    }"#;

    let payload: NewMessagePayload = serde_json::from_str(raw).unwrap();
    assert_eq!(payload.message_wamid.as_deref(), Some("wamid.ABC"));
    assert_eq!(payload.direction, Direction::Inbound);

    let ServerEvent::NewMessage { display_phone, .. } = ServerEvent::from(payload);
    assert_eq!(display_phone, "15551234567");
}

#[test]
fn test_unacknowledged_message_has_null_wamid() {
    let raw = r#"{
        "message_wamid": null,
        "display_phone": "15551234567",
        "text_body": "pending",
        "timestamp_unix": 1722470400,
        "direction": "outbound"
    }"#;

    let payload: NewMessagePayload = serde_json::from_str(raw).unwrap();
    assert!(payload.message_wamid.is_none());
}

#[test]
fn test_malformed_payload_is_rejected() {
    let result = serde_json::from_str::<NewMessagePayload>("not json at all");
    assert!(result.is_err());

    // A valid JSON object missing required fields is also rejected.
    let result = serde_json::from_str::<NewMessagePayload>(r#"{"text_body": "x"}"#);
    assert!(result.is_err());
}

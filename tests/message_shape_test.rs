///! Tests for the message row -> API DTO mapping: the dashboard always
///! receives one canonical shape (`message` is a plain string, direction
///! uses the incoming/outgoing spelling).
use uuid::Uuid;

use whatsapp_dashboard_backend::models::messages::{Direction, MessageResponse, Model};

fn row(direction: Direction, wamid: Option<&str>) -> Model {
    Model {
        id: Uuid::new_v4(),
        contact_id: Uuid::new_v4(),
        message_wamid: wamid.map(|s| s.to_string()),
        text_body: "hi".to_string(),
        direction,
        timestamp_unix: 1_722_470_400,
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn test_outbound_row_maps_to_outgoing() {
    let response = MessageResponse::from_row(row(Direction::Outbound, Some("wamid.X")), "15551234567");

    assert_eq!(response.id, "wamid.X");
    assert_eq!(response.phone_number, "+15551234567");
    assert_eq!(response.message, "hi");
    assert_eq!(response.timestamp, 1_722_470_400);
    assert_eq!(response.direction, "outgoing");
}

#[test]
fn test_inbound_row_maps_to_incoming() {
    let response = MessageResponse::from_row(row(Direction::Inbound, Some("wamid.Y")), "15551234567");
    assert_eq!(response.direction, "incoming");
}

#[test]
fn test_unacknowledged_row_falls_back_to_row_id() {
    let unacked = row(Direction::Outbound, None);
    let row_id = unacked.id;

    let response = MessageResponse::from_row(unacked, "15551234567");
    assert_eq!(response.id, row_id.to_string());
}

#[test]
fn test_api_json_is_camel_case() {
    let response = MessageResponse::from_row(row(Direction::Inbound, Some("wamid.Z")), "15551234567");
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["phoneNumber"], "+15551234567");
    assert_eq!(json["direction"], "incoming");
    assert!(json.get("phone_number").is_none());
}

#[test]
fn test_direction_storage_spelling() {
    // Stored and notified as inbound/outbound; only the API layer
    // translates to incoming/outgoing.
    assert_eq!(serde_json::to_value(Direction::Inbound).unwrap(), "inbound");
    assert_eq!(serde_json::to_value(Direction::Outbound).unwrap(), "outbound");
    assert_eq!(Direction::Inbound.as_api_str(), "incoming");
    assert_eq!(Direction::Outbound.as_api_str(), "outgoing");
}

use serde::{Deserialize, Serialize};

use crate::models::messages::Direction;

/// JSON payload the store's `new_message` notification trigger emits for
/// every inserted message row. `display_phone` is the owning contact's
/// `wa_id`; `message_wamid` is NULL until the provider acknowledges.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessagePayload {
    pub message_wamid: Option<String>,
    pub display_phone: String,
    pub text_body: String,
    pub timestamp_unix: i64,
    pub direction: Direction,
}

/// Events the server pushes to live-update clients. The channel is
/// one-way: clients send no domain messages, only transport frames.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A message row was inserted; the payload mirrors the row shape.
    NewMessage {
        message_wamid: Option<String>,
        display_phone: String,
        text_body: String,
        timestamp_unix: i64,
        direction: Direction,
    },
}

impl From<NewMessagePayload> for ServerEvent {
    fn from(p: NewMessagePayload) -> Self {
        ServerEvent::NewMessage {
            message_wamid: p.message_wamid,
            display_phone: p.display_phone,
            text_body: p.text_body,
            timestamp_unix: p.timestamp_unix,
            direction: p.direction,
        }
    }
}

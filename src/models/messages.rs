use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message direction stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[sea_orm(string_value = "inbound")]
    Inbound,
    #[sea_orm(string_value = "outbound")]
    Outbound,
}

impl Direction {
    /// The spelling the dashboard API uses ("incoming"/"outgoing"),
    /// as opposed to the stored "inbound"/"outbound".
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "incoming",
            Direction::Outbound => "outgoing",
        }
    }
}

/// SeaORM entity for the `messages` table.
///
/// Rows are immutable once written. `message_wamid` is the provider-assigned
/// identifier and stays NULL until the provider acknowledges the message.
/// `timestamp_unix` is the display ordering key; `created_at` breaks ties.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contact_id: Uuid,
    pub message_wamid: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub text_body: String,
    pub direction: Direction,
    pub timestamp_unix: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contacts::Entity",
        from = "Column::ContactId",
        to = "super::contacts::Column::Id"
    )]
    Contact,
}

impl Related<super::contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// DTO for inserting a new message (used by the send path).
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub contact_id: Uuid,
    pub message_wamid: Option<String>,
    pub text_body: String,
    pub direction: Direction,
    pub timestamp_unix: i64,
}

/// Request body for POST /api/send-message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub phone_number: Option<String>,
    pub message: Option<String>,
}

/// One message as the dashboard API renders it.
///
/// `message` is always a plain string (the historical string-or-object
/// ambiguity is gone) and `direction` uses the API spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub phone_number: String,
    pub message: String,
    pub timestamp: i64,
    pub direction: String,
}

impl MessageResponse {
    /// Build the API shape from a message row and its contact's `wa_id`.
    /// Falls back to the row id when the provider never assigned a wamid.
    pub fn from_row(row: Model, wa_id: &str) -> Self {
        Self {
            id: row.message_wamid.unwrap_or_else(|| row.id.to_string()),
            phone_number: format!("+{wa_id}"),
            message: row.text_body,
            timestamp: row.timestamp_unix,
            direction: row.direction.as_api_str().to_string(),
        }
    }
}

/// Last-message preview embedded in a conversation summary.
#[derive(Debug, Clone, Serialize)]
pub struct LastMessage {
    pub text: String,
    pub timestamp: i64,
}

/// Contact display info embedded in a conversation summary.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationContact {
    pub name: Option<String>,
}

/// Response item for the conversations list endpoint.
///
/// A conversation is derived, never stored: one contact, its latest
/// message, and the inbound-message count (served as `unreadCount`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub phone_number: String,
    pub contact: ConversationContact,
    pub last_message: Option<LastMessage>,
    pub unread_count: i64,
}

/// Query parameters for the recent-messages endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentMessagesQuery {
    pub limit: Option<u64>,
}

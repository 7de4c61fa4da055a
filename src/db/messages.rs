use sea_orm::*;
use uuid::Uuid;

use crate::models::contacts;
use crate::models::messages::{self, CreateMessage};

/// One row cap for every message read path.
pub const MESSAGE_QUERY_LIMIT: u64 = 100;

/// Insert a new message. The contact row must already exist
/// (see `contacts::find_or_create_contact`); the insert fires the
/// `new_message` notification trigger as a side effect.
pub async fn insert_message(
    db: &DatabaseConnection,
    input: CreateMessage,
) -> Result<messages::Model, DbErr> {
    let new_message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        contact_id: Set(input.contact_id),
        message_wamid: Set(input.message_wamid),
        text_body: Set(input.text_body),
        direction: Set(input.direction),
        timestamp_unix: Set(input.timestamp_unix),
        created_at: Set(chrono::Utc::now()),
    };

    new_message.insert(db).await
}

/// Fetch the most recent messages for a contact, returned oldest-first.
///
/// The newest `MESSAGE_QUERY_LIMIT` rows are selected descending and then
/// reversed, so a long history drops the oldest messages rather than the
/// newest. Ties on `timestamp_unix` fall back to insertion order.
pub async fn get_messages_for_contact(
    db: &DatabaseConnection,
    contact_id: Uuid,
) -> Result<Vec<messages::Model>, DbErr> {
    let mut rows = messages::Entity::find()
        .filter(messages::Column::ContactId.eq(contact_id))
        .order_by_desc(messages::Column::TimestampUnix)
        .order_by_desc(messages::Column::CreatedAt)
        .limit(MESSAGE_QUERY_LIMIT)
        .all(db)
        .await?;

    rows.reverse();
    Ok(rows)
}

/// Fetch the newest messages across all contacts, paired with their
/// contact rows, newest first.
pub async fn get_recent_messages(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<(messages::Model, Option<contacts::Model>)>, DbErr> {
    messages::Entity::find()
        .find_also_related(contacts::Entity)
        .order_by_desc(messages::Column::TimestampUnix)
        .order_by_desc(messages::Column::CreatedAt)
        .limit(Ord::min(limit, MESSAGE_QUERY_LIMIT))
        .all(db)
        .await
}

/// Raw row for the conversations aggregate query.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ConversationRow {
    pub wa_id: String,
    pub profile_name: Option<String>,
    pub last_message_text: Option<String>,
    pub last_message_timestamp: Option<i64>,
    pub inbound_count: i64,
}

/// Build conversation summaries for all known contacts in one aggregate
/// query: the latest message and the inbound count per contact, ordered by
/// last-message timestamp descending with empty conversations last.
pub async fn get_conversation_summaries(
    db: &DatabaseConnection,
) -> Result<Vec<ConversationRow>, DbErr> {
    let sql = r#"
        SELECT
            c.wa_id,
            c.profile_name,
            (SELECT m.text_body FROM messages m
              WHERE m.contact_id = c.id
              ORDER BY m.timestamp_unix DESC, m.created_at DESC
              LIMIT 1) AS last_message_text,
            (SELECT m.timestamp_unix FROM messages m
              WHERE m.contact_id = c.id
              ORDER BY m.timestamp_unix DESC, m.created_at DESC
              LIMIT 1) AS last_message_timestamp,
            (SELECT COUNT(*) FROM messages m
              WHERE m.contact_id = c.id AND m.direction = 'inbound') AS inbound_count
        FROM contacts c
        ORDER BY last_message_timestamp DESC NULLS LAST
    "#;

    ConversationRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .all(db)
        .await
}

use sea_orm::*;

/// Headline counters for the landing dashboard.
#[derive(Debug, Clone, FromQueryResult)]
pub struct StatsRow {
    pub total_contacts: i64,
    pub total_messages: i64,
    pub active_chats: i64,
    pub messages_last_24h: i64,
    pub active_contacts_7d: i64,
}

/// One recent conversation with enough context for the dashboard list.
#[derive(Debug, Clone, FromQueryResult)]
pub struct RecentChatRow {
    pub phone_number: String,
    pub profile_name: Option<String>,
    pub last_message_text: Option<String>,
    pub last_message_timestamp: Option<i64>,
    pub last_message_direction: Option<String>,
    pub unread_count: i64,
    pub message_count: i64,
}

/// Messages-per-hour bucket over the last 24 hours.
#[derive(Debug, Clone, FromQueryResult)]
pub struct HourlyRow {
    pub hour: i32,
    pub count: i64,
}

/// Coarse message-type buckets derived from body heuristics.
#[derive(Debug, Clone, FromQueryResult)]
pub struct MessageTypesRow {
    pub media_count: i64,
    pub document_count: i64,
    pub total_count: i64,
}

pub async fn get_stats(db: &DatabaseConnection) -> Result<StatsRow, DbErr> {
    let sql = r#"
        SELECT
            (SELECT COUNT(DISTINCT contact_id) FROM messages) AS total_contacts,
            (SELECT COUNT(*) FROM messages) AS total_messages,
            (SELECT COUNT(DISTINCT wa_id) FROM contacts) AS active_chats,
            (SELECT COUNT(*) FROM messages
              WHERE timestamp_unix > extract(epoch FROM now() - interval '24 hours')) AS messages_last_24h,
            (SELECT COUNT(DISTINCT contact_id) FROM messages
              WHERE timestamp_unix > extract(epoch FROM now() - interval '7 days')) AS active_contacts_7d
    "#;

    StatsRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("dashboard stats".to_string()))
}

/// Count contacts whose latest message is inbound — conversations waiting
/// on a reply.
pub async fn get_pending_count(db: &DatabaseConnection) -> Result<i64, DbErr> {
    #[derive(FromQueryResult)]
    struct PendingRow {
        pending_count: i64,
    }

    let sql = r#"
        SELECT COUNT(*) AS pending_count
        FROM contacts c
        WHERE (
            SELECT m.direction FROM messages m
            WHERE m.contact_id = c.id
            ORDER BY m.timestamp_unix DESC, m.created_at DESC
            LIMIT 1
        ) = 'inbound'
    "#;

    let row = PendingRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .one(db)
        .await?;

    Ok(row.map(|r| r.pending_count).unwrap_or(0))
}

pub async fn get_recent_chats(db: &DatabaseConnection) -> Result<Vec<RecentChatRow>, DbErr> {
    let sql = r#"
        SELECT
            c.wa_id AS phone_number,
            c.profile_name,
            (SELECT m.text_body FROM messages m
              WHERE m.contact_id = c.id
              ORDER BY m.timestamp_unix DESC, m.created_at DESC
              LIMIT 1) AS last_message_text,
            (SELECT m.timestamp_unix FROM messages m
              WHERE m.contact_id = c.id
              ORDER BY m.timestamp_unix DESC, m.created_at DESC
              LIMIT 1) AS last_message_timestamp,
            (SELECT m.direction FROM messages m
              WHERE m.contact_id = c.id
              ORDER BY m.timestamp_unix DESC, m.created_at DESC
              LIMIT 1) AS last_message_direction,
            (SELECT COUNT(*) FROM messages m
              WHERE m.contact_id = c.id AND m.direction = 'inbound') AS unread_count,
            (SELECT COUNT(*) FROM messages m
              WHERE m.contact_id = c.id) AS message_count
        FROM contacts c
        ORDER BY last_message_timestamp DESC NULLS LAST
        LIMIT 10
    "#;

    RecentChatRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .all(db)
        .await
}

pub async fn get_hourly_activity(db: &DatabaseConnection) -> Result<Vec<HourlyRow>, DbErr> {
    let sql = r#"
        SELECT
            EXTRACT(HOUR FROM to_timestamp(timestamp_unix))::int AS hour,
            COUNT(*) AS count
        FROM messages
        WHERE timestamp_unix > extract(epoch FROM now() - interval '24 hours')
        GROUP BY hour
        ORDER BY hour
    "#;

    HourlyRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .all(db)
        .await
}

pub async fn get_message_types(db: &DatabaseConnection) -> Result<MessageTypesRow, DbErr> {
    let sql = r#"
        SELECT
            COUNT(CASE WHEN text_body LIKE '%http%' OR text_body LIKE '%image%' THEN 1 END) AS media_count,
            COUNT(CASE WHEN text_body LIKE '%pdf%' OR text_body LIKE '%doc%' THEN 1 END) AS document_count,
            COUNT(*) AS total_count
        FROM messages
    "#;

    MessageTypesRow::find_by_statement(Statement::from_string(DbBackend::Postgres, sql))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("message type counts".to_string()))
}

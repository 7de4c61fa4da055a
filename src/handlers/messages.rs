use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::db::contacts as contact_db;
use crate::db::messages as message_db;
use crate::gateway::WhatsAppClient;
use crate::models::messages::{
    CreateMessage, Direction, MessageResponse, RecentMessagesQuery, SendMessageRequest,
};

/// Default page size for the recent-messages feed.
const RECENT_MESSAGES_DEFAULT: u64 = 50;

/// Destination numbers must look like `+` followed by 10-15 digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    match phone.strip_prefix('+') {
        Some(digits) => {
            (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// The provider-side identifier is the number without the leading `+`.
pub fn normalize_wa_id(phone: &str) -> &str {
    phone.strip_prefix('+').unwrap_or(phone)
}

/// POST /api/send-message — `{phoneNumber, message}`
///
/// Validates the input, submits the message through the provider gateway,
/// then records it: contact upserted by `wa_id`, one immutable outbound
/// message row. The two writes are not atomic with the send — a failure
/// between them leaves at most an orphan contact row, which the upsert
/// makes benign.
pub async fn send_message(
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<WhatsAppClient>,
    body: web::Json<SendMessageRequest>,
) -> impl Responder {
    let body = body.into_inner();

    let (phone_number, message) = match (body.phone_number.as_deref(), body.message.as_deref()) {
        (Some(p), Some(m)) if !p.is_empty() && !m.is_empty() => (p, m),
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Phone number and message are required",
            }));
        }
    };

    if !is_valid_phone_number(phone_number) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid phone number format. Use format: +1234567890",
        }));
    }

    let wa_id = normalize_wa_id(phone_number);

    // One best-effort provider call; nothing is persisted if it fails.
    let message_id = match gateway.send_text(wa_id, message).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Error sending message: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string(),
            }));
        }
    };

    let contact = match contact_db::find_or_create_contact(db.get_ref(), wa_id, None).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to upsert contact {wa_id}: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to save message",
            }));
        }
    };

    let input = CreateMessage {
        contact_id: contact.id,
        message_wamid: Some(message_id.clone()),
        text_body: message.to_string(),
        direction: Direction::Outbound,
        timestamp_unix: chrono::Utc::now().timestamp(),
    };

    if let Err(e) = message_db::insert_message(db.get_ref(), input).await {
        tracing::error!("Failed to persist outbound message: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to save message",
        }));
    }

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "messageId": message_id,
    }))
}

/// GET /api/messages?limit=N — newest messages across all contacts.
pub async fn get_recent_messages(
    db: web::Data<DatabaseConnection>,
    query: web::Query<RecentMessagesQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(RECENT_MESSAGES_DEFAULT);

    match message_db::get_recent_messages(db.get_ref(), limit).await {
        Ok(rows) => {
            let messages: Vec<MessageResponse> = rows
                .into_iter()
                .map(|(msg, contact)| {
                    let wa_id = contact.map(|c| c.wa_id).unwrap_or_default();
                    MessageResponse::from_row(msg, &wa_id)
                })
                .collect();
            HttpResponse::Ok().json(serde_json::json!({ "messages": messages }))
        }
        Err(e) => {
            tracing::error!("Error fetching messages: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch messages",
            }))
        }
    }
}

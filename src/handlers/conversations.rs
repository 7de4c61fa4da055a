use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::db::contacts as contact_db;
use crate::db::messages as message_db;
use crate::handlers::messages::normalize_wa_id;
use crate::models::messages::{
    ConversationContact, ConversationSummary, LastMessage, MessageResponse,
};

/// GET /api/conversations
///
/// Conversation summaries for every known contact, most recently active
/// first. Summaries are recomputed on every read, never stored.
pub async fn get_conversations(db: web::Data<DatabaseConnection>) -> impl Responder {
    match message_db::get_conversation_summaries(db.get_ref()).await {
        Ok(rows) => {
            let conversations: Vec<ConversationSummary> = rows
                .into_iter()
                .map(|row| {
                    let last_message = match (row.last_message_text, row.last_message_timestamp) {
                        (Some(text), Some(timestamp)) => Some(LastMessage { text, timestamp }),
                        _ => None,
                    };
                    ConversationSummary {
                        id: row.wa_id.clone(),
                        phone_number: format!("+{}", row.wa_id),
                        contact: ConversationContact {
                            name: row.profile_name,
                        },
                        last_message,
                        unread_count: row.inbound_count,
                    }
                })
                .collect();

            HttpResponse::Ok().json(serde_json::json!({ "conversations": conversations }))
        }
        Err(e) => {
            tracing::error!("Error fetching conversations: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch conversations",
            }))
        }
    }
}

/// GET /api/conversations/{id}/messages
///
/// Ordered message history for one contact. The id is the phone number
/// with or without the leading `+`. An unknown number yields an empty
/// list, not a 404 — the conversation simply has no history yet.
pub async fn get_conversation_messages(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    let wa_id = normalize_wa_id(&id).to_string();

    let contact = match contact_db::get_contact_by_wa_id(db.get_ref(), &wa_id).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Error fetching contact {wa_id}: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch messages",
            }));
        }
    };

    let Some(contact) = contact else {
        return HttpResponse::Ok().json(serde_json::json!({ "messages": [] }));
    };

    match message_db::get_messages_for_contact(db.get_ref(), contact.id).await {
        Ok(rows) => {
            let messages: Vec<MessageResponse> = rows
                .into_iter()
                .map(|row| MessageResponse::from_row(row, &contact.wa_id))
                .collect();
            HttpResponse::Ok().json(serde_json::json!({ "messages": messages }))
        }
        Err(e) => {
            tracing::error!("Error fetching messages for {wa_id}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch messages",
            }))
        }
    }
}

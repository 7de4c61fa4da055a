use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::db::dashboard as dashboard_db;

/// A contact counts as "online" if its last message is this recent.
const ONLINE_WINDOW_SECS: i64 = 10 * 60;

/// GET /api/dashboard — aggregate statistics for the landing page.
pub async fn get_dashboard(db: web::Data<DatabaseConnection>) -> impl Responder {
    let db = db.get_ref();

    let result = async {
        let stats = dashboard_db::get_stats(db).await?;
        let pending = dashboard_db::get_pending_count(db).await?;
        let recent = dashboard_db::get_recent_chats(db).await?;
        let hourly = dashboard_db::get_hourly_activity(db).await?;
        let types = dashboard_db::get_message_types(db).await?;
        Ok::<_, sea_orm::DbErr>((stats, pending, recent, hourly, types))
    }
    .await;

    let (stats, pending, recent, hourly, types) = match result {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Error fetching dashboard data: {e}");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch dashboard data",
            }));
        }
    };

    let now = chrono::Utc::now().timestamp();

    let recent_chats: Vec<serde_json::Value> = recent
        .into_iter()
        .map(|row| {
            let time = row
                .last_message_timestamp
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_default();
            let online = row
                .last_message_timestamp
                .map(|ts| now - ts < ONLINE_WINDOW_SECS)
                .unwrap_or(false);

            json!({
                "name": row.profile_name.unwrap_or_else(|| row.phone_number.clone()),
                "phoneNumber": row.phone_number,
                "time": time,
                "lastMessage": row.last_message_text.unwrap_or_default(),
                "lastMessageDirection": row.last_message_direction,
                "unreadCount": row.unread_count,
                "messageCount": row.message_count,
                "status": if online { "Online" } else { "Offline" },
            })
        })
        .collect();

    let mut hourly_activity = serde_json::Map::new();
    for row in hourly {
        hourly_activity.insert(row.hour.to_string(), json!(row.count));
    }

    let text_count = types.total_count - types.media_count - types.document_count;

    HttpResponse::Ok().json(json!({
        "stats": {
            "activeChats": stats.active_chats,
            "totalMessages": stats.total_messages,
            "contacts": stats.total_contacts,
            "messagesLast24h": stats.messages_last_24h,
            "activeContacts7d": stats.active_contacts_7d,
            "pendingResponses": pending,
            // TODO: derive from inbound->outbound reply pairs.
            "avgResponseTime": "5m",
        },
        "recentChats": recent_chats,
        "hourlyActivity": hourly_activity,
        "messageTypes": {
            "text": text_count,
            "media": types.media_count,
            "document": types.document_count,
            "other": 0,
        },
    }))
}

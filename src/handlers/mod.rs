pub mod config;
pub mod conversations;
pub mod dashboard;
pub mod messages;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Conversation read model ──
    cfg.service(
        web::resource("/conversations")
            .route(web::get().to(conversations::get_conversations)),
    );
    cfg.service(
        web::resource("/conversations/{id}/messages")
            .route(web::get().to(conversations::get_conversation_messages)),
    );

    // ── Messages: outbound send + recent feed ──
    cfg.service(
        web::resource("/send-message")
            .route(web::post().to(messages::send_message)),
    );
    cfg.service(
        web::resource("/messages")
            .route(web::get().to(messages::get_recent_messages)),
    );

    // ── Dashboard aggregates ──
    cfg.service(
        web::resource("/dashboard")
            .route(web::get().to(dashboard::get_dashboard)),
    );

    // ── Provider configuration status ──
    cfg.service(
        web::resource("/config")
            .route(web::get().to(config::get_config))
            .route(web::post().to(config::post_config)),
    );

    // ── Live-update channel ──
    cfg.service(
        web::resource("/ws")
            .route(web::get().to(crate::live::session::ws_connect)),
    );
}

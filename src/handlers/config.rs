use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;

use crate::config::ProviderConfig;

#[derive(Debug, Deserialize)]
pub struct ConfigAction {
    pub action: Option<String>,
}

/// GET /api/config — report whether provider credentials are present.
/// Only the status leaves the process, never the values.
pub async fn get_config(config: web::Data<ProviderConfig>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "hasConfig": config.has_config(),
    }))
}

/// POST /api/config — `{action}`
///
/// `action: "test"` validates that the credential set is complete; any
/// other action is acknowledged without effect.
pub async fn post_config(
    config: web::Data<ProviderConfig>,
    body: web::Json<ConfigAction>,
) -> impl Responder {
    if !config.is_complete() {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "WhatsApp API configuration is incomplete",
        }));
    }

    if body.action.as_deref() == Some("test") {
        return HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Configuration is valid",
        }));
    }

    HttpResponse::Ok().json(serde_json::json!({ "success": true }))
}

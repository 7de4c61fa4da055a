use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use whatsapp_dashboard_backend::config::ProviderConfig;
use whatsapp_dashboard_backend::gateway::WhatsAppClient;
use whatsapp_dashboard_backend::handlers;
use whatsapp_dashboard_backend::live::relay;
use whatsapp_dashboard_backend::live::server::LiveServer;
use whatsapp_dashboard_backend::{create_pool, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let pool = create_pool().await;
    Migrator::up(&pool, None)
        .await
        .expect("Failed to run migrations");
    let db_data = web::Data::new(pool);
    tracing::info!("Database connection established");

    let provider_config = ProviderConfig::from_env();
    if !provider_config.is_complete() {
        tracing::warn!("WhatsApp provider credentials are incomplete; sends will fail");
    }
    let gateway_data = web::Data::new(WhatsAppClient::new(provider_config.clone()));
    let config_data = web::Data::new(provider_config);

    // Shared registry of open live-update channels.
    let live_server = Arc::new(LiveServer::new());
    let live_data = web::Data::new(live_server.clone());

    // The change relay holds its own LISTEN connection, separate from the
    // request pool, and forwards store notifications to every channel.
    actix_web::rt::spawn(relay::run(db::database_url(), live_server));

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(gateway_data.clone())
            .app_data(config_data.clone())
            .app_data(live_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}

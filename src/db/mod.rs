pub mod contacts;
pub mod dashboard;
pub mod messages;

use sea_orm::{Database, DatabaseConnection};
use std::env;

/// Assemble the Postgres connection URL.
///
/// `DATABASE_URL` wins when set; otherwise the URL is built from the
/// individual `DB_*` variables (empty strings and port 5432 are the only
/// defaults).
pub fn database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    let user = env::var("DB_USER").unwrap_or_default();
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let host = env::var("DB_SERVER").unwrap_or_default();
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let name = env::var("DB_NAME").unwrap_or_default();

    format!("postgres://{user}:{password}@{host}:{port}/{name}")
}

/// Create a SeaORM database connection pool.
pub async fn create_pool() -> DatabaseConnection {
    Database::connect(&database_url())
        .await
        .expect("Failed to connect to database")
}

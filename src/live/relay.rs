use sqlx::postgres::PgListener;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::live::protocol::{NewMessagePayload, ServerEvent};
use crate::live::server::LiveServer;

/// Notification channel the message-insert trigger publishes on.
pub const NOTIFY_CHANNEL: &str = "new_message";

/// Fixed pause before reconnecting after the LISTEN connection drops.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Long-running relay task: holds one dedicated LISTEN connection to the
/// store and rebroadcasts every `new_message` notification to all open
/// live-update channels.
///
/// Delivery is at-most-once. On any connection failure the relay sleeps
/// `RECONNECT_DELAY` and resubscribes; notifications emitted while it was
/// disconnected are gone — clients reconcile by polling the read model.
pub async fn run(database_url: String, live_server: Arc<LiveServer>) {
    loop {
        if let Err(e) = listen_and_forward(&database_url, &live_server).await {
            warn!(
                "Store notification connection failed: {e}; reconnecting in {}s",
                RECONNECT_DELAY.as_secs()
            );
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Connect, subscribe, and forward notifications until the connection
/// errors out.
async fn listen_and_forward(
    database_url: &str,
    live_server: &LiveServer,
) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect(database_url).await?;
    listener.listen(NOTIFY_CHANNEL).await?;
    info!("Connected to PostgreSQL, listening on '{NOTIFY_CHANNEL}'");

    loop {
        let notification = listener.recv().await?;

        match serde_json::from_str::<NewMessagePayload>(notification.payload()) {
            Ok(payload) => {
                // Forward in delivery order, same task iteration — the
                // relay adds no buffering of its own.
                live_server.broadcast(ServerEvent::from(payload)).await;
            }
            Err(e) => {
                warn!("Ignoring malformed '{NOTIFY_CHANNEL}' payload: {e}");
            }
        }
    }
}

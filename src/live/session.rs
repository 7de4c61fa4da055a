use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;
use tracing::debug;

use crate::live::protocol::ServerEvent;
use crate::live::server::LiveServer;

/// GET /api/ws
///
/// Upgrades the HTTP connection to a WebSocket and registers it as a
/// live-update channel. The channel carries server pushes only; client
/// frames other than transport-level ping/close are ignored.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    live_server: web::Data<Arc<LiveServer>>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    let (session_id, rx) = live_server.join().await;
    debug!("Live-update client {session_id} connected");

    let live_server_clone = live_server.get_ref().clone();
    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        session_id,
        live_server_clone,
    ));

    Ok(response)
}

/// Drives one live-update channel: forwards pushed events to the client
/// and answers transport frames until either side disconnects.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
    session_id: Uuid,
    live_server: Arc<LiveServer>,
) {
    loop {
        tokio::select! {
            // Incoming frame from the client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    // No client->server domain messages exist on this
                    // channel; text and binary frames are dropped.
                    _ => {}
                }
            }
            // Event pushed by the change relay.
            Some(event) = rx.recv() => {
                let json = match serde_json::to_string(&event) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    live_server.leave(session_id).await;
    let _ = session.close(None).await;
    debug!("Live-update client {session_id} disconnected");
}

use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::live::protocol::ServerEvent;

/// Registry of all open live-update channels.
///
/// Every connected browser session gets one entry. Events are fanned out
/// to every client with no per-client filtering, no backpressure, and no
/// delivery acknowledgment — a client that is gone simply misses the
/// event and reconciles through its own polling.
pub struct LiveServer {
    /// session_id -> sender half of the session's event queue
    clients: RwLock<HashMap<Uuid, mpsc::UnboundedSender<ServerEvent>>>,
}

impl LiveServer {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new live-update channel.
    /// Returns the session id and the receiver the WebSocket session
    /// should drain.
    pub async fn join(&self) -> (Uuid, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();

        self.clients.write().await.insert(session_id, tx);

        (session_id, rx)
    }

    /// Remove a channel after its WebSocket session ends.
    pub async fn leave(&self, session_id: Uuid) {
        self.clients.write().await.remove(&session_id);
    }

    /// Push an event to every open channel.
    pub async fn broadcast(&self, event: ServerEvent) {
        let clients = self.clients.read().await;
        for sender in clients.values() {
            // A failed send means the receiver was dropped (disconnected).
            // The session's cleanup path removes the handle.
            let _ = sender.send(event.clone());
        }
    }

    /// Number of currently open channels.
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

impl Default for LiveServer {
    fn default() -> Self {
        Self::new()
    }
}

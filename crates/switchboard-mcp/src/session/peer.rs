//! The outbound half of the transport contract.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::types::JsonRpcNotification;

/// Receives every message the server wants written to the transport.
pub type OutboundReceiver = mpsc::UnboundedReceiver<Value>;

/// Sends responses and notifications to the connected client.
///
/// Sends never block and are never acknowledged.
#[derive(Debug, Clone)]
pub struct Peer {
    tx: mpsc::UnboundedSender<Value>,
}

impl Peer {
    /// Create a peer and the receiver the transport drains.
    pub fn channel() -> (Self, OutboundReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, message: Value) {
        if self.tx.send(message).is_err() {
            tracing::warn!("Transport closed, dropping outbound message");
        }
    }

    pub fn notify(&self, method: &str, params: impl Serialize) {
        let params = match serde_json::to_value(params) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("Failed to serialize {method} params: {e}");
                return;
            }
        };
        match serde_json::to_value(JsonRpcNotification::new(method, Some(params))) {
            Ok(v) => self.send(v),
            Err(e) => tracing::error!("Failed to serialize {method} notification: {e}"),
        }
    }
}

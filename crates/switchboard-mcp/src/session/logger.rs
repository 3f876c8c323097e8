//! Forwards handler log messages to the client as `notifications/message`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde_json::Value;
use switchboard::{LogLevel, LogSink, RegistryError, RegistryResult};

use super::{Peer, SharedSessionState};
use crate::types::{LogMessageParams, LOG_MESSAGE_METHOD};

fn level_to_u8(level: LogLevel) -> u8 {
    match level {
        LogLevel::Debug => 0,
        LogLevel::Info => 1,
        LogLevel::Warning => 2,
        LogLevel::Error => 3,
    }
}

/// The session-bound [`LogSink`] handed to every `CallContext`.
pub struct SessionLogger {
    name: String,
    state: SharedSessionState,
    peer: Peer,
    min_level: Arc<AtomicU8>,
}

impl SessionLogger {
    pub fn new(name: impl Into<String>, state: SharedSessionState, peer: Peer) -> Self {
        Self {
            name: name.into(),
            state,
            peer,
            min_level: Arc::new(AtomicU8::new(level_to_u8(LogLevel::Debug))),
        }
    }

    /// Drop messages below `level` from now on.
    pub fn set_level(&self, level: LogLevel) {
        self.min_level.store(level_to_u8(level), Ordering::SeqCst);
        tracing::info!("Client log level set to {level}");
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level_to_u8(level) >= self.min_level.load(Ordering::SeqCst)
    }
}

impl LogSink for SessionLogger {
    fn log(&self, level: LogLevel, message: &str) -> RegistryResult<()> {
        if !self.state.is_serving() {
            return Err(RegistryError::SessionNotReady);
        }
        if !self.enabled(level) {
            return Ok(());
        }
        self.peer.notify(
            LOG_MESSAGE_METHOD,
            LogMessageParams {
                level,
                logger: Some(self.name.clone()),
                data: Value::String(message.to_string()),
            },
        );
        Ok(())
    }
}

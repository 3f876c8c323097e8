//! Dispatcher lifecycle: `Unconnected → Negotiating → Serving`.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::types::{McpError, McpResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Registries are populated but `connect()` has not been called.
    Unconnected,
    /// Handlers are bound; waiting for the `initialize` handshake.
    Negotiating,
    /// Handshake complete; requests are routed to registries.
    Serving,
}

impl SessionState {
    fn as_u8(self) -> u8 {
        match self {
            SessionState::Unconnected => 0,
            SessionState::Negotiating => 1,
            SessionState::Serving => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => SessionState::Unconnected,
            1 => SessionState::Negotiating,
            _ => SessionState::Serving,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Unconnected => "unconnected",
            SessionState::Negotiating => "negotiating",
            SessionState::Serving => "serving",
        };
        f.write_str(name)
    }
}

/// Session state shared between the dispatcher and the session logger.
#[derive(Debug, Clone)]
pub struct SharedSessionState(Arc<AtomicU8>);

impl Default for SharedSessionState {
    fn default() -> Self {
        Self(Arc::new(AtomicU8::new(SessionState::Unconnected.as_u8())))
    }
}

impl SharedSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> SessionState {
        SessionState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub fn is_serving(&self) -> bool {
        self.get() == SessionState::Serving
    }

    /// Move from `from` to `to`, failing if the current state is not `from`.
    pub fn advance(&self, from: SessionState, to: SessionState) -> McpResult<()> {
        self.0
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| tracing::info!("Session state: {from} -> {to}"))
            .map_err(|actual| {
                McpError::SessionNotReady(format!(
                    "cannot move to {to} from {}",
                    SessionState::from_u8(actual)
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        let state = SharedSessionState::new();
        assert_eq!(state.get(), SessionState::Unconnected);

        state
            .advance(SessionState::Unconnected, SessionState::Negotiating)
            .unwrap();
        state
            .advance(SessionState::Negotiating, SessionState::Serving)
            .unwrap();
        assert!(state.is_serving());
    }

    #[test]
    fn test_skipping_a_state_fails() {
        let state = SharedSessionState::new();
        let err = state
            .advance(SessionState::Negotiating, SessionState::Serving)
            .unwrap_err();
        assert!(err.to_string().contains("unconnected"));
        assert_eq!(state.get(), SessionState::Unconnected);
    }

    #[test]
    fn test_clones_share_state() {
        let a = SharedSessionState::new();
        let b = a.clone();
        a.advance(SessionState::Unconnected, SessionState::Negotiating)
            .unwrap();
        assert_eq!(b.get(), SessionState::Negotiating);
    }
}

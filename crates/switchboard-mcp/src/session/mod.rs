//! Session lifecycle, outbound messaging, and log forwarding.

pub mod logger;
pub mod peer;
pub mod state;

pub use logger::SessionLogger;
pub use peer::{OutboundReceiver, Peer};
pub use state::{SessionState, SharedSessionState};

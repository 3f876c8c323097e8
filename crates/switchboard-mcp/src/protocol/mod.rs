//! MCP protocol handling: capability negotiation, routing, and dispatch.

pub mod handler;
pub mod negotiation;
pub mod router;
pub mod validator;

pub use handler::ProtocolHandler;
pub use negotiation::{CapabilitySet, NegotiatedCapabilities};
pub use router::{Route, Router};

//! Switchboard MCP server: serves a registry of tools, prompts, resources,
//! and roots to a single client over stdio.

pub mod catalog;
pub mod config;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use catalog::build_registries;
pub use config::{resolve_roots, ServerConfig};
pub use protocol::ProtocolHandler;
pub use session::Peer;
pub use transport::StdioTransport;

//! Switchboard: capability registries and URI resolution for MCP servers.
//!
//! Tools, prompts, static resources, resource templates, and roots are
//! registered once through [`RegistryBuilder`] and then served read-only.

pub mod builder;
pub mod context;
pub mod handler;
pub mod prompts;
pub mod registry;
pub mod resources;
pub mod roots;
pub mod template;
pub mod tools;
pub mod types;

pub use builder::{Registries, RegistryBuilder};
pub use context::{CallContext, LogSink, TracingSink};
pub use prompts::{Prompt, PromptConfig, PromptManager};
pub use registry::{Keyed, NamedRegistry};
pub use resources::{ResourceManager, ResourceTemplate, StaticResource};
pub use roots::RootsManager;
pub use template::UriTemplate;
pub use tools::{Tool, ToolConfig, ToolManager};
pub use types::*;

//! Built-in tools.

pub mod add;
pub mod echo;
pub mod read_resource;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use switchboard::{Arguments, RegistryBuilder, ToolConfig};

/// Declared configs of every built-in tool, in registration order.
pub fn configs() -> Vec<ToolConfig> {
    vec![echo::config(), add::config(), read_resource::config()]
}

pub fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .tool(echo::config(), echo::execute)
        .tool(add::config(), add::execute)
        .tool(read_resource::config(), read_resource::execute)
}

/// Deserialize tool arguments into a typed parameter struct.
fn params<T: DeserializeOwned>(tool: &str, args: Arguments) -> anyhow::Result<T> {
    serde_json::from_value(Value::Object(args))
        .with_context(|| format!("invalid arguments for {tool}"))
}

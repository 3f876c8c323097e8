//! Assembles the built-in tools, prompts, resources, and roots.

use switchboard::Registries;

use crate::config::ServerConfig;
use crate::types::McpResult;
use crate::{prompts, resources, tools};

/// Register the whole built-in catalog for `config`.
pub fn build_registries(config: &ServerConfig) -> McpResult<Registries> {
    let builder = Registries::builder().roots(config.roots.iter().cloned());
    let builder = tools::register(builder);
    let builder = prompts::register(builder);
    let builder = resources::register(builder, config);
    Ok(builder.build()?)
}

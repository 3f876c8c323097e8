//! Resource: switchboard://server/info

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use switchboard::ResourceInfo;

use crate::config::ServerConfig;

pub const URI: &str = "switchboard://server/info";

/// Static facts about this server, captured at startup.
#[derive(Debug, Clone)]
pub struct ServerSummary {
    pub name: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub tools: Vec<String>,
    pub prompts: Vec<String>,
    pub roots: usize,
}

impl ServerSummary {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            version: config.version.clone(),
            started_at: Utc::now(),
            tools: crate::tools::configs().into_iter().map(|c| c.name).collect(),
            prompts: crate::prompts::configs().into_iter().map(|c| c.name).collect(),
            roots: config.roots.len(),
        }
    }
}

pub fn info() -> ResourceInfo {
    ResourceInfo {
        uri: URI.to_string(),
        name: "Server info".to_string(),
        description: Some("Name, version, uptime, and catalog of this server".to_string()),
        mime_type: Some("application/json".to_string()),
    }
}

pub async fn read(summary: Arc<ServerSummary>) -> anyhow::Result<String> {
    let now = Utc::now();
    let content = json!({
        "name": summary.name,
        "version": summary.version,
        "started_at": summary.started_at,
        "uptime_seconds": (now - summary.started_at).num_seconds(),
        "tools": summary.tools,
        "prompts": summary.prompts,
        "root_count": summary.roots,
    });
    Ok(serde_json::to_string_pretty(&content)?)
}

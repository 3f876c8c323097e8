//! Resource template: switchboard://roots/{index}

use std::sync::Arc;

use anyhow::Context;
use switchboard::{Root, TemplateInfo, TemplateVariables};

pub fn info() -> TemplateInfo {
    TemplateInfo {
        uri_template: "switchboard://roots/{index}".to_string(),
        name: "Workspace root".to_string(),
        description: Some("One configured workspace root, by zero-based index".to_string()),
        mime_type: Some("application/json".to_string()),
    }
}

pub async fn read(roots: Arc<Vec<Root>>, vars: TemplateVariables) -> anyhow::Result<String> {
    let raw = vars.get("index").map(String::as_str).unwrap_or_default();
    let index: usize = raw
        .parse()
        .with_context(|| format!("root index must be a non-negative integer, got {raw:?}"))?;
    let root = roots
        .get(index)
        .with_context(|| format!("no root at index {index} ({} configured)", roots.len()))?;
    Ok(serde_json::to_string_pretty(root)?)
}

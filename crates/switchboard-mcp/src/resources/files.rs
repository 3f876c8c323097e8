//! Resource template: file://{path}
//!
//! Reads files that live under one of the configured `file://` roots.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use switchboard::{Content, Root, TemplateInfo, TemplateVariables};

/// Largest file the template will return, in bytes.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub fn info() -> TemplateInfo {
    TemplateInfo {
        uri_template: "file://{path}".to_string(),
        name: "File".to_string(),
        description: Some("A file inside one of the workspace roots".to_string()),
        mime_type: None,
    }
}

pub async fn read(roots: Arc<Vec<Root>>, vars: TemplateVariables) -> anyhow::Result<Content> {
    let raw = vars.get("path").map(String::as_str).unwrap_or_default();
    let path = tokio::fs::canonicalize(raw)
        .await
        .with_context(|| format!("cannot open {raw}"))?;

    if !is_under_roots(&path, &roots).await {
        anyhow::bail!("{} is outside the workspace roots", path.display());
    }

    read_capped(&path, MAX_FILE_BYTES).await
}

/// Read `path` as text or blob, refusing files larger than `limit` bytes.
async fn read_capped(path: &Path, limit: u64) -> anyhow::Result<Content> {
    let len = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    if len > limit {
        anyhow::bail!(
            "{} is {len} bytes, larger than the {limit} byte limit",
            path.display()
        );
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(match String::from_utf8(bytes) {
        Ok(text) => Content::Text(text),
        Err(e) => Content::Blob(e.into_bytes()),
    })
}

async fn is_under_roots(path: &Path, roots: &[Root]) -> bool {
    for root in roots {
        let Some(root_path) = root.uri.strip_prefix("file://").map(PathBuf::from) else {
            continue;
        };
        if let Ok(root_path) = tokio::fs::canonicalize(&root_path).await {
            if path.starts_with(&root_path) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_files_over_the_limit_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "0123456789").unwrap();

        let err = read_capped(&path, 4).await.unwrap_err();
        assert!(
            format!("{err:#}").contains("10 bytes, larger than the 4 byte limit"),
            "{err:#}"
        );

        let content = read_capped(&path, 10).await.unwrap();
        assert_eq!(content.as_text(), Some("0123456789"));
    }
}

//! Configuration loading and resolution.

use std::ffi::OsString;
use std::path::Path;

use switchboard::Root;

use crate::types::{McpError, McpResult, SERVER_NAME, SERVER_VERSION};

/// Environment variable listing root paths, separated like `PATH`.
pub const ROOTS_ENV: &str = "SWITCHBOARD_ROOTS";

const DEFAULT_INSTRUCTIONS: &str = "Switchboard exposes a small catalog: echo/add tools, \
     summarize/review prompts, a server info resource, and file:// and \
     switchboard://roots/{index} resource templates over the configured roots.";

/// Everything the server needs to know before registering its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
    pub roots: Vec<Root>,
}

impl ServerConfig {
    /// Resolve from CLI flags, the environment, and the working directory.
    pub fn resolve(name: Option<String>, roots: &[String]) -> McpResult<Self> {
        Ok(Self {
            name: name.unwrap_or_else(|| SERVER_NAME.to_string()),
            version: SERVER_VERSION.to_string(),
            instructions: Some(DEFAULT_INSTRUCTIONS.to_string()),
            roots: resolve_roots(roots)?,
        })
    }
}

/// Resolve the workspace roots.
///
/// Explicit values win, then `SWITCHBOARD_ROOTS`, then the current directory.
pub fn resolve_roots(explicit: &[String]) -> McpResult<Vec<Root>> {
    let cwd = std::env::current_dir().map_err(McpError::Io)?;
    Ok(resolve_roots_from(
        explicit,
        std::env::var_os(ROOTS_ENV),
        &cwd,
    ))
}

/// [`resolve_roots`] with the environment and working directory supplied.
pub fn resolve_roots_from(explicit: &[String], env: Option<OsString>, cwd: &Path) -> Vec<Root> {
    if !explicit.is_empty() {
        return explicit.iter().map(|value| to_root(value, cwd)).collect();
    }

    if let Some(env) = env.filter(|v| !v.is_empty()) {
        let roots: Vec<Root> = std::env::split_paths(&env)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| to_root(&p.to_string_lossy(), cwd))
            .collect();
        if !roots.is_empty() {
            tracing::debug!("Roots from {ROOTS_ENV}: {}", roots.len());
            return roots;
        }
    }

    vec![to_root(&cwd.to_string_lossy(), cwd)]
}

/// Turn a path or URI into a root. Values with a scheme are kept verbatim.
fn to_root(value: &str, cwd: &Path) -> Root {
    if value.contains("://") {
        return Root::new(value, None);
    }

    let path = Path::new(value);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    Root::new(path_to_uri(&absolute), name)
}

/// `file://` URI for an absolute path.
pub fn path_to_uri(path: &Path) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        format!("file://{display}")
    } else {
        format!("file:///{display}")
    }
}

//! Message framing for newline-delimited JSON.

use serde::Serialize;
use serde_json::Value;

use crate::types::{JsonRpcMessage, McpError, McpResult};

/// Parse a single line of text as a JSON-RPC message.
///
/// Batches are not supported and are rejected as invalid requests, as is
/// an `id` that is not a string, number, or null.
pub fn parse_message(line: &str) -> McpResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(McpError::ParseError("Empty message".to_string()));
    }
    if trimmed.starts_with('[') {
        return Err(McpError::InvalidRequest(
            "Batch requests are not supported".to_string(),
        ));
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| McpError::ParseError(e.to_string()))?;

    // Without this an unusable id would decode as a notification and go unanswered.
    if let Some(id) = value.get("id") {
        if !matches!(id, Value::String(_) | Value::Number(_) | Value::Null) {
            return Err(McpError::InvalidRequest(format!(
                "id must be a string, number, or null, got {id}"
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| McpError::InvalidRequest(e.to_string()))
}

/// Serialize a message to a single JSON line with a trailing newline.
///
/// `serde_json` escapes embedded newlines, so one message is always one line.
pub fn frame_message<T: Serialize>(message: &T) -> McpResult<String> {
    let mut json = serde_json::to_string(message)?;
    json.push('\n');
    Ok(json)
}

//! JSON-RPC envelope checks applied before dispatch.

use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// Validate that a JSON-RPC request is well-formed.
pub fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(McpError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }

    if request.method.starts_with("rpc.") {
        return Err(McpError::InvalidRequest(format!(
            "Method names beginning with \"rpc.\" are reserved: {}",
            request.method
        )));
    }

    match &request.params {
        None | Some(Value::Object(_)) | Some(Value::Array(_)) => Ok(()),
        Some(other) => Err(McpError::InvalidRequest(format!(
            "params must be an object or array, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_well_formed() {
        let req = JsonRpcRequest::new(1, "tools/list", Some(json!({})));
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_rejects_bad_envelopes() {
        let mut req = JsonRpcRequest::new(1, "ping", None);
        req.jsonrpc = "1.0".to_string();
        assert!(validate_request(&req).is_err());

        let req = JsonRpcRequest::new(1, "", None);
        assert!(validate_request(&req).is_err());

        let req = JsonRpcRequest::new(1, "rpc.discover", None);
        assert!(validate_request(&req).is_err());

        let req = JsonRpcRequest::new(1, "ping", Some(json!(42)));
        assert!(matches!(
            validate_request(&req),
            Err(McpError::InvalidRequest(_))
        ));
    }
}

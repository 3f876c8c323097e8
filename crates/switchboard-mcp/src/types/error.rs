//! Error types and JSON-RPC error codes for the MCP server.

use switchboard::RegistryError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP-specific error codes.
pub mod mcp_error_codes {
    pub const RESOURCE_NOT_FOUND: i32 = -32802;
    pub const TOOL_NOT_FOUND: i32 = -32803;
    pub const PROMPT_NOT_FOUND: i32 = -32804;
    pub const MISSING_ARGUMENT: i32 = -32805;
    pub const TOOL_EXECUTION: i32 = -32806;
    pub const PROMPT_EXECUTION: i32 = -32807;
    pub const RESOURCE_ERROR: i32 = -32808;
    pub const SESSION_NOT_READY: i32 = -32809;
}

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource error: {0}")]
    ResourceError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    #[error("Prompt execution failed: {0}")]
    PromptExecution(String),

    /// An operation that needs a live session ran before the handshake finished.
    #[error("Session not ready: {0}")]
    SessionNotReady(String),

    /// Registration or handshake failed; the server cannot continue.
    #[error("Negotiation failed: {0}")]
    NegotiationFailed(String),

    #[error("Registration error: {0}")]
    Registration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) => INTERNAL_ERROR,
            McpError::ResourceNotFound(_) => RESOURCE_NOT_FOUND,
            McpError::ResourceError(_) => RESOURCE_ERROR,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::PromptNotFound(_) => PROMPT_NOT_FOUND,
            McpError::MissingArgument(_) => MISSING_ARGUMENT,
            McpError::ToolExecution(_) => TOOL_EXECUTION,
            McpError::PromptExecution(_) => PROMPT_EXECUTION,
            McpError::SessionNotReady(_) => SESSION_NOT_READY,
            McpError::NegotiationFailed(_)
            | McpError::Registration(_)
            | McpError::Io(_) => INTERNAL_ERROR,
            McpError::Json(_) => PARSE_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<RegistryError> for McpError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::ResourceNotFound(uri) => McpError::ResourceNotFound(uri),
            RegistryError::Resource(msg) => McpError::ResourceError(msg),
            RegistryError::ToolNotFound(name) => McpError::ToolNotFound(name),
            RegistryError::PromptNotFound(name) => McpError::PromptNotFound(name),
            RegistryError::MissingArgument(param) => McpError::MissingArgument(param),
            RegistryError::ToolExecution(msg) => McpError::ToolExecution(msg),
            RegistryError::PromptExecution(msg) => McpError::PromptExecution(msg),
            RegistryError::SessionNotReady => {
                McpError::SessionNotReady("handshake has not completed".to_string())
            }
            e @ (RegistryError::DuplicateResource(_)
            | RegistryError::DuplicateTool(_)
            | RegistryError::DuplicatePrompt(_)
            | RegistryError::InvalidTemplate { .. }) => McpError::Registration(e.to_string()),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_errors_keep_their_meaning() {
        let e: McpError = RegistryError::MissingArgument("b".to_string()).into();
        assert_eq!(e.code(), mcp_error_codes::MISSING_ARGUMENT);
        assert_eq!(e.to_string(), "Missing required argument: b");

        let e: McpError = RegistryError::ToolExecution("exploded".to_string()).into();
        assert!(e.to_string().contains("exploded"));

        let e: McpError = RegistryError::DuplicateTool("add".to_string()).into();
        assert!(matches!(e, McpError::Registration(ref m) if m.contains("add")));
    }

    #[test]
    fn test_json_rpc_error_shape() {
        let err = McpError::MethodNotFound("tools/list".to_string())
            .to_json_rpc_error(RequestId::from(9));
        assert_eq!(err.error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(err.id, RequestId::from(9));
        assert_eq!(err.jsonrpc, "2.0");
    }
}

//! Core data types for Switchboard registries.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments passed to a tool or prompt handler.
pub type Arguments = serde_json::Map<String, Value>;

/// Variables captured from a URI by a resource template.
pub type TemplateVariables = HashMap<String, String>;

/// The declared type of a tool or prompt input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SemanticType {
    /// The JSON Schema `type` keyword for this input type.
    pub fn json_type(&self) -> &'static str {
        match self {
            SemanticType::String => "string",
            SemanticType::Number => "number",
            SemanticType::Integer => "integer",
            SemanticType::Boolean => "boolean",
            SemanticType::Object => "object",
            SemanticType::Array => "array",
        }
    }
}

/// A single declared input of a tool or prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub semantic_type: SemanticType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InputSpec {
    pub fn required(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            required: true,
            description: None,
        }
    }

    pub fn optional(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            required: false,
            ..Self::required(name, semantic_type)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Check that every required input is present in `args`.
///
/// Returns the name of the first missing input in declaration order.
/// Undeclared keys are ignored.
pub fn first_missing_input<'a>(inputs: &'a [InputSpec], args: &Arguments) -> Option<&'a str> {
    inputs
        .iter()
        .find(|spec| spec.required && !args.contains_key(&spec.name))
        .map(|spec| spec.name.as_str())
}

/// A workspace root advertised to the peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Root {
    pub fn new(uri: impl Into<String>, name: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            name,
        }
    }
}

/// Metadata of a static resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Metadata of a resource template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub uri_template: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Content produced by a resource handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Blob(Vec<u8>),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Blob(_) => None,
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Blob(bytes)
    }
}

/// The result of reading a resource by URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: Option<String>,
    pub content: Content,
}

/// Opaque correlation token attached to one request.
///
/// Any JSON string or number is accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgressToken {
    String(String),
    Number(serde_json::Number),
}

impl From<i64> for ProgressToken {
    fn from(n: i64) -> Self {
        ProgressToken::Number(n.into())
    }
}

impl fmt::Display for ProgressToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressToken::String(s) => write!(f, "{s}"),
            ProgressToken::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Severity of a log message pushed to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerce a handler's return value to response text.
///
/// Strings are used verbatim, `null` becomes empty, anything else is
/// rendered as compact JSON.
pub fn coerce_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Errors that can occur in the registry core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    #[error("Duplicate prompt: {0}")]
    DuplicatePrompt(String),

    #[error("Invalid URI template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource error: {0}")]
    Resource(String),

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

    #[error("Session not ready")]
    SessionNotReady,
}

/// Convenience result type.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_first_missing_input_in_declaration_order() {
        let inputs = vec![
            InputSpec::required("a", SemanticType::Number),
            InputSpec::optional("label", SemanticType::String),
            InputSpec::required("b", SemanticType::Number),
        ];

        assert_eq!(first_missing_input(&inputs, &args(json!({}))), Some("a"));
        assert_eq!(first_missing_input(&inputs, &args(json!({"a": 1}))), Some("b"));
        assert_eq!(first_missing_input(&inputs, &args(json!({"a": 1, "b": 2}))), None);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let inputs = vec![InputSpec::required("a", SemanticType::Number)];
        let extra = args(json!({"a": 1, "unexpected": true}));
        assert_eq!(first_missing_input(&inputs, &extra), None);
    }

    #[test]
    fn test_coerce_to_text() {
        assert_eq!(coerce_to_text(json!("plain")), "plain");
        assert_eq!(coerce_to_text(Value::Null), "");
        assert_eq!(coerce_to_text(json!(3)), "3");
        assert_eq!(coerce_to_text(json!({"k": [1, 2]})), r#"{"k":[1,2]}"#);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.to_string(), "warning");
    }
}

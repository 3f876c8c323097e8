//! Tool registration, argument validation, and invocation.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::context::CallContext;
use crate::handler::{tool_fn, ToolFn};
use crate::registry::{Keyed, NamedRegistry};
use crate::types::{
    coerce_to_text, first_missing_input, Arguments, InputSpec, RegistryError, RegistryResult,
    SemanticType,
};

/// Declared metadata of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
}

impl ToolConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            inputs: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a required input.
    pub fn input(mut self, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.inputs.push(InputSpec::required(name, semantic_type));
        self
    }

    pub fn optional_input(mut self, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.inputs.push(InputSpec::optional(name, semantic_type));
        self
    }

    /// Declare an input with a full spec, e.g. one carrying a description.
    pub fn input_spec(mut self, spec: InputSpec) -> Self {
        self.inputs.push(spec);
        self
    }

    /// Render the declared inputs as a JSON Schema object.
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for spec in &self.inputs {
            let mut property = json!({ "type": spec.semantic_type.json_type() });
            if let Some(description) = &spec.description {
                property["description"] = json!(description);
            }
            properties.insert(spec.name.clone(), property);
        }

        let required: Vec<&str> = self
            .inputs
            .iter()
            .filter(|s| s.required)
            .map(|s| s.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A registered tool: metadata plus its handler.
pub struct Tool {
    pub config: ToolConfig,
    handler: ToolFn,
}

impl Tool {
    pub fn new<F, Fut, R>(config: ToolConfig, handler: F) -> Self
    where
        F: Fn(Arguments, CallContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<Value>,
    {
        Self {
            config,
            handler: tool_fn(handler),
        }
    }
}

impl Keyed for Tool {
    fn key(&self) -> &str {
        &self.config.name
    }
}

/// Name-keyed registry of tools.
#[derive(Default)]
pub struct ToolManager {
    tools: NamedRegistry<Tool>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique; a second registration is rejected.
    pub fn add(&mut self, tool: Tool) -> RegistryResult<()> {
        tracing::debug!("Registering tool {}", tool.config.name);
        self.tools
            .insert(tool)
            .map_err(|t| RegistryError::DuplicateTool(t.config.name))
    }

    pub fn list(&self) -> Vec<ToolConfig> {
        self.tools.iter().map(|t| t.config.clone()).collect()
    }

    pub fn get_config(&self, name: &str) -> Option<&ToolConfig> {
        self.tools.get(name).map(|t| &t.config)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate `args` and run the named tool, returning its output as text.
    ///
    /// Only required inputs are checked; undeclared keys reach the handler
    /// untouched.
    pub async fn call(
        &self,
        name: &str,
        args: Arguments,
        ctx: CallContext,
    ) -> RegistryResult<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| RegistryError::ToolNotFound(name.to_string()))?;

        if let Some(missing) = first_missing_input(&tool.config.inputs, &args) {
            return Err(RegistryError::MissingArgument(missing.to_string()));
        }

        tracing::debug!("Calling tool {name}");
        let value = (tool.handler)(args, ctx)
            .await
            .map_err(|e| RegistryError::ToolExecution(format!("{e:#}")))?;

        Ok(coerce_to_text(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TracingSink;
    use crate::resources::ResourceManager;
    use std::sync::Arc;

    fn ctx() -> CallContext {
        CallContext::new(None, Arc::new(TracingSink), Arc::new(ResourceManager::new()))
    }

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    fn add_tool() -> Tool {
        Tool::new(
            ToolConfig::new("add")
                .description("Add two numbers")
                .input("a", SemanticType::Number)
                .input("b", SemanticType::Number),
            |args, _ctx| async move {
                let a = args["a"].as_f64().unwrap_or_default();
                let b = args["b"].as_f64().unwrap_or_default();
                Ok(a + b)
            },
        )
    }

    #[test]
    fn test_missing_required_argument() {
        let mut tools = ToolManager::new();
        tools.add(add_tool()).unwrap();

        let err = tokio_test::block_on(tools.call("add", args(json!({"a": 1})), ctx())).unwrap_err();
        assert_eq!(err, RegistryError::MissingArgument("b".to_string()));
    }

    #[test]
    fn test_call_returns_handler_result_as_text() {
        let mut tools = ToolManager::new();
        tools.add(add_tool()).unwrap();

        let out = tokio_test::block_on(tools.call("add", args(json!({"a": 1, "b": 2})), ctx()))
            .unwrap();
        assert_eq!(out, "3.0");
    }

    #[test]
    fn test_extra_arguments_pass_through() {
        let mut tools = ToolManager::new();
        tools
            .add(Tool::new(
                ToolConfig::new("keys").input("a", SemanticType::String),
                |args, _ctx| async move {
                    let keys: Vec<String> = args.keys().cloned().collect();
                    Ok(keys.join(","))
                },
            ))
            .unwrap();

        let out = tokio_test::block_on(tools.call(
            "keys",
            args(json!({"a": "x", "extra": 1})),
            ctx(),
        ))
        .unwrap();
        assert!(out.contains("extra"));
    }

    #[test]
    fn test_unknown_tool() {
        let tools = ToolManager::new();
        let err = tokio_test::block_on(tools.call("nope", Arguments::new(), ctx())).unwrap_err();
        assert_eq!(err, RegistryError::ToolNotFound("nope".to_string()));
    }

    #[test]
    fn test_handler_error_becomes_execution_error() {
        let mut tools = ToolManager::new();
        tools
            .add(Tool::new(ToolConfig::new("fail"), |_args, _ctx| async {
                Err::<Value, _>(anyhow::anyhow!("exploded"))
            }))
            .unwrap();

        let err = tokio_test::block_on(tools.call("fail", Arguments::new(), ctx())).unwrap_err();
        assert_eq!(err, RegistryError::ToolExecution("exploded".to_string()));
    }

    #[test]
    fn test_execution_error_keeps_cause_chain() {
        use anyhow::Context as _;

        let mut tools = ToolManager::new();
        tools
            .add(Tool::new(ToolConfig::new("save"), |_args, _ctx| async {
                let written: anyhow::Result<Value> = Err(anyhow::anyhow!("disk full"));
                written.context("saving report")
            }))
            .unwrap();

        let err = tokio_test::block_on(tools.call("save", Arguments::new(), ctx())).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ToolExecution("saving report: disk full".to_string())
        );
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let mut tools = ToolManager::new();
        tools.add(add_tool()).unwrap();
        assert_eq!(
            tools.add(add_tool()).unwrap_err(),
            RegistryError::DuplicateTool("add".to_string())
        );
        assert_eq!(tools.len(), 1);
    }

    #[test]
    fn test_input_schema() {
        let config = ToolConfig::new("search")
            .input("query", SemanticType::String)
            .optional_input("limit", SemanticType::Integer);

        assert_eq!(
            config.input_schema(),
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "limit": { "type": "integer" }
                },
                "required": ["query"]
            })
        );
    }

    #[test]
    fn test_list_is_idempotent() {
        let mut tools = ToolManager::new();
        tools.add(add_tool()).unwrap();
        tools
            .add(Tool::new(ToolConfig::new("noop"), |_a, _c| async { Ok(Value::Null) }))
            .unwrap();

        let names: Vec<_> = tools.list().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["add", "noop"]);
        assert_eq!(tools.list(), tools.list());
    }
}

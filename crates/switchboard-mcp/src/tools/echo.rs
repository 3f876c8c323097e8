//! Tool: echo. Return the given text unchanged.

use serde::Deserialize;
use serde_json::Value;
use switchboard::{Arguments, CallContext, InputSpec, SemanticType, ToolConfig};

#[derive(Debug, Deserialize)]
struct EchoParams {
    text: String,
}

pub fn config() -> ToolConfig {
    ToolConfig::new("echo")
        .description("Return the given text unchanged")
        .input_spec(
            InputSpec::required("text", SemanticType::String).describe("Text to echo back"),
        )
}

pub async fn execute(args: Arguments, _ctx: CallContext) -> anyhow::Result<Value> {
    let params: EchoParams = super::params("echo", args)?;
    Ok(Value::String(params.text))
}

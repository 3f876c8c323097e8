//! Tool: add. Sum two numbers.

use serde::Deserialize;
use serde_json::{json, Value};
use switchboard::{Arguments, CallContext, InputSpec, SemanticType, ToolConfig};

#[derive(Debug, Deserialize)]
struct AddParams {
    a: f64,
    b: f64,
}

pub fn config() -> ToolConfig {
    ToolConfig::new("add")
        .description("Add two numbers")
        .input_spec(InputSpec::required("a", SemanticType::Number).describe("First addend"))
        .input_spec(InputSpec::required("b", SemanticType::Number).describe("Second addend"))
}

pub async fn execute(args: Arguments, ctx: CallContext) -> anyhow::Result<Value> {
    let params: AddParams = super::params("add", args)?;
    let sum = params.a + params.b;
    if !sum.is_finite() {
        anyhow::bail!("{} + {} does not fit in a finite number", params.a, params.b);
    }
    ctx.debug(format!("add: {} + {} = {sum}", params.a, params.b))?;
    Ok(json!(sum))
}

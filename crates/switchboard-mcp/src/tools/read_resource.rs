//! Tool: read_resource. Read a resource from inside a tool call.

use serde::Deserialize;
use serde_json::Value;
use switchboard::{
    Arguments, CallContext, Content, InputSpec, RegistryError, SemanticType, ToolConfig,
};

#[derive(Debug, Deserialize)]
struct ReadParams {
    uri: String,
}

pub fn config() -> ToolConfig {
    ToolConfig::new("read_resource")
        .description("Read a registered resource and return its text")
        .input_spec(
            InputSpec::required("uri", SemanticType::String).describe("URI of the resource"),
        )
}

pub async fn execute(args: Arguments, ctx: CallContext) -> anyhow::Result<Value> {
    let params: ReadParams = super::params("read_resource", args)?;

    match ctx.progress_token() {
        Some(token) => ctx.info(format!("Reading {} (progress token {token})", params.uri))?,
        None => ctx.info(format!("Reading {}", params.uri))?,
    }

    let contents = match ctx.read_resource(&params.uri).await {
        Ok(contents) => contents,
        Err(RegistryError::ResourceNotFound(uri)) => {
            ctx.warning(format!("No resource matches {uri}"))?;
            return Err(RegistryError::ResourceNotFound(uri).into());
        }
        Err(e) => return Err(e.into()),
    };

    let text = match contents.content {
        Content::Text(text) => text,
        Content::Blob(bytes) => format!("<{} bytes of binary content>", bytes.len()),
    };
    Ok(Value::String(text))
}

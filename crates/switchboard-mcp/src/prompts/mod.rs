//! Built-in prompts.

pub mod review;
pub mod summarize;

use switchboard::{Arguments, PromptConfig, RegistryBuilder};

pub fn configs() -> Vec<PromptConfig> {
    vec![summarize::config(), review::config()]
}

pub fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .prompt(summarize::config(), summarize::expand)
        .prompt(review::config(), review::expand)
}

/// String value of an argument. Non-string values are rendered as JSON.
fn arg(args: &Arguments, name: &str) -> Option<String> {
    args.get(name).map(|v| match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

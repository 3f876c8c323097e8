//! Prompt: summarize. Ask for a summary of a topic.

use switchboard::{Arguments, InputSpec, PromptConfig, SemanticType};

pub fn config() -> PromptConfig {
    PromptConfig::new("summarize")
        .description("Summarize a topic")
        .input_spec(
            InputSpec::required("topic", SemanticType::String).describe("What to summarize"),
        )
        .input_spec(
            InputSpec::optional("style", SemanticType::String)
                .describe("Tone or format, e.g. \"bullet points\""),
        )
}

pub async fn expand(args: Arguments) -> anyhow::Result<String> {
    let topic = super::arg(&args, "topic").unwrap_or_default();
    let style = super::arg(&args, "style").unwrap_or_else(|| "a short paragraph".to_string());

    Ok(format!(
        "Summarize the following topic as {style}.\n\n\
         Topic: {topic}\n\n\
         Keep only the points a newcomer needs, and say so if the topic is too vague to summarize."
    ))
}

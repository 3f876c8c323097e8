//! Prompt: review. Ask for a code review.

use switchboard::{Arguments, InputSpec, PromptConfig, SemanticType};

pub fn config() -> PromptConfig {
    PromptConfig::new("review")
        .description("Review a piece of code")
        .input_spec(InputSpec::required("code", SemanticType::String).describe("Code to review"))
        .input_spec(
            InputSpec::optional("language", SemanticType::String)
                .describe("Programming language of the code"),
        )
}

pub async fn expand(args: Arguments) -> anyhow::Result<String> {
    let code = super::arg(&args, "code").unwrap_or_default();
    if code.trim().is_empty() {
        anyhow::bail!("'code' must not be empty");
    }
    let language = super::arg(&args, "language").unwrap_or_default();

    Ok(format!(
        "Review this {lang}code.\n\n\
         ```{language}\n{code}\n```\n\n\
         Please:\n\
         1. Point out bugs and unhandled edge cases\n\
         2. Flag unclear names or structure\n\
         3. Suggest concrete fixes, smallest first",
        lang = if language.is_empty() {
            String::new()
        } else {
            format!("{language} ")
        },
    ))
}

//! Prompt registration and expansion.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::handler::{prompt_fn, PromptFn};
use crate::registry::{Keyed, NamedRegistry};
use crate::types::{
    first_missing_input, Arguments, InputSpec, RegistryError, RegistryResult, SemanticType,
};

/// Declared metadata of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
}

impl PromptConfig {
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

    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(InputSpec::required(name, SemanticType::String));
        self
    }

    pub fn optional_input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(InputSpec::optional(name, SemanticType::String));
        self
    }

    pub fn input_spec(mut self, spec: InputSpec) -> Self {
        self.inputs.push(spec);
        self
    }
}

pub struct Prompt {
    pub config: PromptConfig,
    handler: PromptFn,
}

impl Prompt {
    pub fn new<F, Fut, R>(config: PromptConfig, handler: F) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<String>,
    {
        Self {
            config,
            handler: prompt_fn(handler),
        }
    }
}

impl Keyed for Prompt {
    fn key(&self) -> &str {
        &self.config.name
    }
}

#[derive(Default)]
pub struct PromptManager {
    prompts: NamedRegistry<Prompt>,
}

impl PromptManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, prompt: Prompt) -> RegistryResult<()> {
        tracing::debug!("Registering prompt {}", prompt.config.name);
        self.prompts
            .insert(prompt)
            .map_err(|p| RegistryError::DuplicatePrompt(p.config.name))
    }

    pub fn list(&self) -> Vec<PromptConfig> {
        self.prompts.iter().map(|p| p.config.clone()).collect()
    }

    pub fn get_config(&self, name: &str) -> Option<&PromptConfig> {
        self.prompts.get(name).map(|p| &p.config)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Validate `args` and expand the named prompt to its message text.
    pub async fn call(&self, name: &str, args: Arguments) -> RegistryResult<String> {
        let prompt = self
            .prompts
            .get(name)
            .ok_or_else(|| RegistryError::PromptNotFound(name.to_string()))?;

        if let Some(missing) = first_missing_input(&prompt.config.inputs, &args) {
            return Err(RegistryError::MissingArgument(missing.to_string()));
        }

        (prompt.handler)(args)
            .await
            .map_err(|e| RegistryError::PromptExecution(format!("{e:#}")))
    }
}

//! Explicit registration step that assembles all registries before serving.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::context::CallContext;
use crate::prompts::{Prompt, PromptConfig, PromptManager};
use crate::resources::{ResourceManager, ResourceTemplate, StaticResource};
use crate::roots::RootsManager;
use crate::tools::{Tool, ToolConfig, ToolManager};
use crate::types::{
    Arguments, Content, RegistryError, RegistryResult, ResourceInfo, Root, TemplateInfo,
    TemplateVariables,
};

/// Every registry a server exposes. Read-only once built.
#[derive(Default)]
pub struct Registries {
    pub tools: ToolManager,
    pub prompts: PromptManager,
    pub resources: Arc<ResourceManager>,
    pub roots: RootsManager,
}

impl Registries {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }
}

/// Collects registrations; the first failure is reported by [`build`](Self::build).
#[derive(Default)]
pub struct RegistryBuilder {
    tools: ToolManager,
    prompts: PromptManager,
    resources: ResourceManager,
    roots: RootsManager,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, result: RegistryResult<()>) {
        if let Err(e) = result {
            tracing::warn!("Registration failed: {e}");
            self.error.get_or_insert(e);
        }
    }

    pub fn tool<F, Fut, R>(mut self, config: ToolConfig, handler: F) -> Self
    where
        F: Fn(Arguments, CallContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<Value>,
    {
        let result = self.tools.add(Tool::new(config, handler));
        self.record(result);
        self
    }

    pub fn prompt<F, Fut, R>(mut self, config: PromptConfig, handler: F) -> Self
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<String>,
    {
        let result = self.prompts.add(Prompt::new(config, handler));
        self.record(result);
        self
    }

    pub fn resource<F, Fut, C>(mut self, info: ResourceInfo, handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<C>> + Send + 'static,
        C: Into<Content>,
    {
        let result = self.resources.add_resource(StaticResource::new(info, handler));
        self.record(result);
        self
    }

    pub fn template<F, Fut, C>(mut self, info: TemplateInfo, handler: F) -> Self
    where
        F: Fn(TemplateVariables) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<C>> + Send + 'static,
        C: Into<Content>,
    {
        let result = ResourceTemplate::new(info, handler)
            .and_then(|template| self.resources.add_template(template));
        self.record(result);
        self
    }

    pub fn root(mut self, root: Root) -> Self {
        self.roots.add(root);
        self
    }

    pub fn roots(mut self, roots: impl IntoIterator<Item = Root>) -> Self {
        for root in roots {
            self.roots.add(root);
        }
        self
    }

    pub fn build(self) -> RegistryResult<Registries> {
        if let Some(e) = self.error {
            return Err(e);
        }
        tracing::info!(
            "Registries built: {} tools, {} prompts, {} resources, {} templates, {} roots",
            self.tools.len(),
            self.prompts.len(),
            self.resources.resource_count(),
            self.resources.template_count(),
            self.roots.len()
        );
        Ok(Registries {
            tools: self.tools,
            prompts: self.prompts,
            resources: Arc::new(self.resources),
            roots: self.roots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(uri: &str) -> ResourceInfo {
        ResourceInfo {
            uri: uri.to_string(),
            name: "r".to_string(),
            description: None,
            mime_type: None,
        }
    }

    #[test]
    fn test_build_collects_everything() {
        let registries = Registries::builder()
            .tool(ToolConfig::new("t"), |_a, _c| async { Ok("ok") })
            .prompt(PromptConfig::new("p"), |_a| async { Ok("text") })
            .resource(info("mem://r"), || async { Ok("body") })
            .template(
                TemplateInfo {
                    uri_template: "mem://items/{id}".to_string(),
                    name: "items".to_string(),
                    description: None,
                    mime_type: None,
                },
                |vars| async move { Ok(vars["id"].clone()) },
            )
            .root(Root::new("file:///work", None))
            .build()
            .unwrap();

        assert_eq!(registries.tools.len(), 1);
        assert_eq!(registries.prompts.len(), 1);
        assert_eq!(registries.resources.resource_count(), 1);
        assert_eq!(registries.resources.template_count(), 1);
        assert_eq!(registries.roots.len(), 1);
    }

    #[test]
    fn test_first_error_is_reported() {
        let result = Registries::builder()
            .resource(info("mem://dup"), || async { Ok("one") })
            .resource(info("mem://dup"), || async { Ok("two") })
            .tool(ToolConfig::new("t"), |_a, _c| async { Ok("ok") })
            .tool(ToolConfig::new("t"), |_a, _c| async { Ok("ok") })
            .build();

        match result {
            Err(e) => assert_eq!(e, RegistryError::DuplicateResource("mem://dup".to_string())),
            Ok(_) => panic!("expected duplicate resource error"),
        }
    }

    #[test]
    fn test_empty_builder() {
        let registries = RegistryBuilder::new().build().unwrap();
        assert!(registries.tools.is_empty());
        assert!(registries.prompts.is_empty());
        assert!(registries.resources.is_empty());
        assert!(registries.roots.is_empty());
    }
}

//! Static resources and resource templates, with URI resolution.

use std::future::Future;

use crate::handler::{resource_fn, template_fn, ResourceFn, TemplateFn};
use crate::registry::{Keyed, NamedRegistry};
use crate::template::UriTemplate;
use crate::types::{
    Content, RegistryError, RegistryResult, ResourceContents, ResourceInfo, TemplateInfo,
    TemplateVariables,
};

/// A resource served from a fixed URI.
pub struct StaticResource {
    pub info: ResourceInfo,
    handler: ResourceFn,
}

impl StaticResource {
    pub fn new<F, Fut, C>(info: ResourceInfo, handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<C>> + Send + 'static,
        C: Into<Content>,
    {
        Self {
            info,
            handler: resource_fn(handler),
        }
    }
}

impl Keyed for StaticResource {
    fn key(&self) -> &str {
        &self.info.uri
    }
}

/// A family of resources served through one handler.
pub struct ResourceTemplate {
    pub info: TemplateInfo,
    pattern: UriTemplate,
    handler: TemplateFn,
}

impl ResourceTemplate {
    /// Compile `info.uri_template`; fails for malformed patterns.
    pub fn new<F, Fut, C>(info: TemplateInfo, handler: F) -> RegistryResult<Self>
    where
        F: Fn(TemplateVariables) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<C>> + Send + 'static,
        C: Into<Content>,
    {
        let pattern = UriTemplate::parse(&info.uri_template)?;
        Ok(Self {
            info,
            pattern,
            handler: template_fn(handler),
        })
    }

    pub fn pattern(&self) -> &UriTemplate {
        &self.pattern
    }
}

/// Owns static resources (unique by URI) and templates (matched in order).
#[derive(Default)]
pub struct ResourceManager {
    resources: NamedRegistry<StaticResource>,
    templates: Vec<ResourceTemplate>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a static resource; its URI must not already be registered.
    pub fn add_resource(&mut self, resource: StaticResource) -> RegistryResult<()> {
        tracing::debug!("Registering resource {}", resource.info.uri);
        self.resources
            .insert(resource)
            .map_err(|r| RegistryError::DuplicateResource(r.info.uri))
    }

    /// Append a template. Overlapping patterns are allowed; earlier ones win.
    pub fn add_template(&mut self, template: ResourceTemplate) -> RegistryResult<()> {
        tracing::debug!("Registering resource template {}", template.pattern);
        self.templates.push(template);
        Ok(())
    }

    pub fn list_resources(&self) -> Vec<ResourceInfo> {
        self.resources.iter().map(|r| r.info.clone()).collect()
    }

    pub fn list_templates(&self) -> Vec<TemplateInfo> {
        self.templates.iter().map(|t| t.info.clone()).collect()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.templates.is_empty()
    }

    /// Read the resource named by `uri`.
    ///
    /// Static resources are checked first; templates are only consulted
    /// when no static resource has this exact URI.
    pub async fn get(&self, uri: &str) -> RegistryResult<ResourceContents> {
        if let Some(resource) = self.resources.get(uri) {
            tracing::debug!("Reading static resource {uri}");
            let content = (resource.handler)()
                .await
                .map_err(|e| RegistryError::Resource(format!("{e:#}")))?;
            return Ok(ResourceContents {
                uri: uri.to_string(),
                mime_type: resource.info.mime_type.clone(),
                content,
            });
        }

        for template in &self.templates {
            if let Some(vars) = template.pattern.matches(uri) {
                tracing::debug!("Resource {uri} matched template {}", template.pattern);
                let content = (template.handler)(vars)
                    .await
                    .map_err(|e| RegistryError::Resource(format!("{e:#}")))?;
                return Ok(ResourceContents {
                    uri: uri.to_string(),
                    mime_type: template.info.mime_type.clone(),
                    content,
                });
            }
        }

        Err(RegistryError::ResourceNotFound(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn info(uri: &str) -> ResourceInfo {
        ResourceInfo {
            uri: uri.to_string(),
            name: uri.to_string(),
            description: None,
            mime_type: Some("text/plain".to_string()),
        }
    }

    fn template_info(pattern: &str) -> TemplateInfo {
        TemplateInfo {
            uri_template: pattern.to_string(),
            name: pattern.to_string(),
            description: None,
            mime_type: Some("text/plain".to_string()),
        }
    }

    fn example_manager() -> ResourceManager {
        let mut mgr = ResourceManager::new();
        mgr.add_resource(StaticResource::new(info("file://a.txt"), || async {
            Ok("hello")
        }))
        .unwrap();
        mgr.add_template(
            ResourceTemplate::new(template_info("file://{name}.log"), |vars| async move {
                Ok(format!("log:{}", vars["name"]))
            })
            .unwrap(),
        )
        .unwrap();
        mgr
    }

    #[test]
    fn test_static_then_template_then_missing() {
        let mgr = example_manager();
        tokio_test::block_on(async {
            let a = mgr.get("file://a.txt").await.unwrap();
            assert_eq!(a.content, Content::Text("hello".to_string()));
            assert_eq!(a.mime_type.as_deref(), Some("text/plain"));

            let log = mgr.get("file://x.log").await.unwrap();
            assert_eq!(log.content.as_text(), Some("log:x"));
            assert_eq!(log.uri, "file://x.log");

            let missing = mgr.get("file://missing").await.unwrap_err();
            assert_eq!(missing, RegistryError::ResourceNotFound("file://missing".to_string()));
        });
    }

    #[test]
    fn test_static_resource_shadows_templates() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let mut mgr = ResourceManager::new();
        mgr.add_template(
            ResourceTemplate::new(template_info("file://{name}"), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok("from template") }
            })
            .unwrap(),
        )
        .unwrap();
        mgr.add_resource(StaticResource::new(info("file://fixed"), || async {
            Ok("from static")
        }))
        .unwrap();

        let out = tokio_test::block_on(mgr.get("file://fixed")).unwrap();
        assert_eq!(out.content.as_text(), Some("from static"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_earlier_template_wins() {
        let mut mgr = ResourceManager::new();
        mgr.add_template(
            ResourceTemplate::new(template_info("data://{id}"), |_| async { Ok("first") }).unwrap(),
        )
        .unwrap();
        mgr.add_template(
            ResourceTemplate::new(template_info("data://{id}"), |_| async { Ok("second") })
                .unwrap(),
        )
        .unwrap();

        for _ in 0..3 {
            let out = tokio_test::block_on(mgr.get("data://7")).unwrap();
            assert_eq!(out.content.as_text(), Some("first"));
        }
        assert_eq!(mgr.template_count(), 2);
    }

    #[test]
    fn test_duplicate_static_uri_rejected() {
        let mut mgr = example_manager();
        let err = mgr
            .add_resource(StaticResource::new(info("file://a.txt"), || async { Ok("again") }))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateResource("file://a.txt".to_string()));

        let out = tokio_test::block_on(mgr.get("file://a.txt")).unwrap();
        assert_eq!(out.content.as_text(), Some("hello"));
    }

    #[test]
    fn test_handler_failure_preserves_message() {
        let mut mgr = ResourceManager::new();
        mgr.add_resource(StaticResource::new(info("file://broken"), || async {
            Err::<String, _>(anyhow::anyhow!("disk on fire"))
        }))
        .unwrap();

        let err = tokio_test::block_on(mgr.get("file://broken")).unwrap_err();
        assert_eq!(err, RegistryError::Resource("disk on fire".to_string()));
    }

    #[test]
    fn test_template_failure_keeps_cause_chain() {
        use anyhow::Context as _;

        let mut mgr = ResourceManager::new();
        mgr.add_template(
            ResourceTemplate::new(template_info("db://{table}"), |vars| async move {
                let rows: anyhow::Result<String> = Err(anyhow::anyhow!("connection refused"));
                rows.with_context(|| format!("querying {}", vars["table"]))
            })
            .unwrap(),
        )
        .unwrap();

        let err = tokio_test::block_on(mgr.get("db://users")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Resource("querying users: connection refused".to_string())
        );
    }

    #[test]
    fn test_listing_is_stable_and_ordered() {
        let mut mgr = example_manager();
        mgr.add_resource(StaticResource::new(info("file://b.txt"), || async { Ok("b") }))
            .unwrap();

        let first = mgr.list_resources();
        let second = mgr.list_resources();
        assert_eq!(first, second);
        let uris: Vec<_> = first.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec!["file://a.txt", "file://b.txt"]);

        let templates = mgr.list_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].uri_template, "file://{name}.log");
    }

    #[test]
    fn test_blob_content() {
        let mut mgr = ResourceManager::new();
        mgr.add_resource(StaticResource::new(info("bin://raw"), || async {
            Ok(vec![0u8, 159, 146, 150])
        }))
        .unwrap();
        let out = tokio_test::block_on(mgr.get("bin://raw")).unwrap();
        assert_eq!(out.content, Content::Blob(vec![0, 159, 146, 150]));
        assert!(out.content.as_text().is_none());
    }

    #[test]
    fn test_malformed_template_rejected() {
        let err = ResourceTemplate::new(template_info("file://{name"), |_| async { Ok("x") })
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::InvalidTemplate { .. }));
    }
}

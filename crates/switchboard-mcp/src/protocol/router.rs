//! Binds request methods to registries according to the capability set.

use std::fmt;

use crate::types::{McpError, McpResult};

use super::negotiation::CapabilitySet;

/// A request kind that can be routed to a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    ListResources,
    ListResourceTemplates,
    ReadResource,
    ListTools,
    CallTool,
    ListPrompts,
    GetPrompt,
    ListRoots,
    SetLogLevel,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::ListResources,
        Route::ListResourceTemplates,
        Route::ReadResource,
        Route::ListTools,
        Route::CallTool,
        Route::ListPrompts,
        Route::GetPrompt,
        Route::ListRoots,
        Route::SetLogLevel,
    ];

    pub fn method(&self) -> &'static str {
        match self {
            Route::ListResources => "resources/list",
            Route::ListResourceTemplates => "resources/templates/list",
            Route::ReadResource => "resources/read",
            Route::ListTools => "tools/list",
            Route::CallTool => "tools/call",
            Route::ListPrompts => "prompts/list",
            Route::GetPrompt => "prompts/get",
            Route::ListRoots => "roots/list",
            Route::SetLogLevel => "logging/setLevel",
        }
    }

    pub fn from_method(method: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.method() == method)
    }

    fn enabled_by(&self, caps: &CapabilitySet) -> bool {
        match self {
            Route::ListResources => caps.resources,
            Route::ListResourceTemplates => caps.resource_templates,
            Route::ReadResource => caps.any_resources(),
            Route::ListTools | Route::CallTool => caps.tools,
            Route::ListPrompts | Route::GetPrompt => caps.prompts,
            Route::ListRoots => caps.roots,
            Route::SetLogLevel => caps.logging,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// The set of bound routes. Built once per connection.
#[derive(Debug, Clone)]
pub struct Router {
    bound: Vec<Route>,
}

impl Router {
    pub fn bind(caps: &CapabilitySet) -> Self {
        let bound: Vec<Route> = Route::ALL
            .into_iter()
            .filter(|route| route.enabled_by(caps))
            .collect();
        for route in &bound {
            tracing::debug!("Bound {route}");
        }
        Self { bound }
    }

    pub fn is_bound(&self, route: Route) -> bool {
        self.bound.contains(&route)
    }

    pub fn routes(&self) -> &[Route] {
        &self.bound
    }

    /// Look up the route for `method`, or fail with `Method not found`.
    pub fn resolve(&self, method: &str) -> McpResult<Route> {
        Route::from_method(method)
            .filter(|route| self.is_bound(*route))
            .ok_or_else(|| McpError::MethodNotFound(method.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_only_binds_set_level() {
        let router = Router::bind(&CapabilitySet {
            logging: true,
            ..Default::default()
        });
        assert_eq!(router.routes(), &[Route::SetLogLevel]);
        assert!(matches!(
            router.resolve("tools/list"),
            Err(McpError::MethodNotFound(_))
        ));
    }

    #[test]
    fn test_templates_bind_read_but_not_list() {
        let router = Router::bind(&CapabilitySet {
            resource_templates: true,
            logging: true,
            ..Default::default()
        });
        assert_eq!(router.resolve("resources/read").unwrap(), Route::ReadResource);
        assert_eq!(
            router.resolve("resources/templates/list").unwrap(),
            Route::ListResourceTemplates
        );
        assert!(router.resolve("resources/list").is_err());
    }

    #[test]
    fn test_unknown_method_is_not_found() {
        let router = Router::bind(&CapabilitySet {
            tools: true,
            prompts: true,
            resources: true,
            resource_templates: true,
            roots: true,
            logging: true,
        });
        assert_eq!(router.routes().len(), Route::ALL.len());
        assert!(router.resolve("sampling/createMessage").is_err());
    }
}

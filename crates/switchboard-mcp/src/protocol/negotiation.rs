//! Capability advertisement and the `initialize` handshake.

use switchboard::Registries;

use crate::types::{
    ClientCapabilities, Implementation, InitializeParams, InitializeResult, LoggingCapability,
    PromptsCapability, ResourcesCapability, RootsCapability, ServerCapabilities,
    ToolsCapability, MCP_VERSION,
};

/// Which capabilities the populated registries support.
///
/// Computed once at connect time; registries never change afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    pub tools: bool,
    pub prompts: bool,
    pub resources: bool,
    pub resource_templates: bool,
    pub roots: bool,
    pub logging: bool,
}

impl CapabilitySet {
    pub fn from_registries(registries: &Registries) -> Self {
        let set = Self {
            tools: !registries.tools.is_empty(),
            prompts: !registries.prompts.is_empty(),
            resources: registries.resources.resource_count() > 0,
            resource_templates: registries.resources.template_count() > 0,
            roots: !registries.roots.is_empty(),
            logging: true,
        };
        tracing::debug!("Capability set: {set:?}");
        set
    }

    /// True when `resources/read` has anything to serve.
    pub fn any_resources(&self) -> bool {
        self.resources || self.resource_templates
    }

    pub fn to_server_capabilities(&self) -> ServerCapabilities {
        ServerCapabilities {
            logging: self.logging.then(LoggingCapability::default),
            prompts: self.prompts.then(PromptsCapability::default),
            resources: self.any_resources().then(ResourcesCapability::default),
            tools: self.tools.then(ToolsCapability::default),
            roots: self.roots.then(RootsCapability::default),
        }
    }
}

/// What the client declared during `initialize`.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedCapabilities {
    pub client: ClientCapabilities,
    pub client_info: Option<Implementation>,
    pub protocol_version: Option<String>,
}

impl NegotiatedCapabilities {
    pub fn negotiate(
        &mut self,
        params: InitializeParams,
        capabilities: &CapabilitySet,
        server_info: Implementation,
        instructions: Option<String>,
    ) -> InitializeResult {
        if params.protocol_version != MCP_VERSION {
            tracing::warn!(
                "Client requested protocol version {}, server supports {}. Proceeding with server version.",
                params.protocol_version,
                MCP_VERSION
            );
        }

        tracing::info!(
            "Initialized with client: {} v{}",
            params.client_info.name,
            params.client_info.version
        );

        self.client = params.capabilities;
        self.client_info = Some(params.client_info);
        self.protocol_version = Some(params.protocol_version);

        InitializeResult::new(
            capabilities.to_server_capabilities(),
            server_info,
            instructions,
        )
    }
}

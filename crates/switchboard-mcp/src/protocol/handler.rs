//! Request dispatcher: drives the session lifecycle and routes JSON-RPC
//! messages to the registries.

use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use switchboard::{CallContext, LogSink, RegistryError, Registries};
use tokio::sync::Mutex;

use crate::session::{Peer, SessionLogger, SessionState, SharedSessionState};
use crate::types::*;

use super::negotiation::{CapabilitySet, NegotiatedCapabilities};
use super::router::{Route, Router};
use super::validator::validate_request;

/// Routes incoming messages for a single session.
pub struct ProtocolHandler {
    registries: Arc<Registries>,
    peer: Peer,
    state: SharedSessionState,
    logger: Arc<SessionLogger>,
    capabilities: OnceLock<CapabilitySet>,
    router: OnceLock<Router>,
    negotiated: Mutex<NegotiatedCapabilities>,
    server_info: Implementation,
    instructions: Option<String>,
    failure: OnceLock<String>,
}

impl ProtocolHandler {
    pub fn new(registries: Arc<Registries>, peer: Peer) -> Self {
        let state = SharedSessionState::new();
        let logger = Arc::new(SessionLogger::new(SERVER_NAME, state.clone(), peer.clone()));
        Self {
            registries,
            peer,
            state,
            logger,
            capabilities: OnceLock::new(),
            router: OnceLock::new(),
            negotiated: Mutex::new(NegotiatedCapabilities::default()),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            instructions: None,
            failure: OnceLock::new(),
        }
    }

    /// Override the name and version reported in the `initialize` response.
    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.server_info = Implementation {
            name: name.into(),
            version: version.into(),
        };
        self
    }

    pub fn with_instructions(mut self, instructions: Option<String>) -> Self {
        self.instructions = instructions;
        self
    }

    /// Bind handlers for every populated registry and wait for `initialize`.
    pub fn connect(&self) -> McpResult<()> {
        self.state
            .advance(SessionState::Unconnected, SessionState::Negotiating)
            .map_err(|_| McpError::InvalidRequest("connect() called twice".to_string()))?;

        let caps = CapabilitySet::from_registries(&self.registries);
        let router = Router::bind(&caps);
        tracing::info!("Connected; {} routes bound", router.routes().len());

        // Both cells are only written here, behind the state transition above.
        let _ = self.capabilities.set(caps);
        let _ = self.router.set(router);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn is_serving(&self) -> bool {
        self.state.is_serving()
    }

    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    pub fn capabilities(&self) -> Option<&CapabilitySet> {
        self.capabilities.get()
    }

    /// The handshake failure that ended this session, if any.
    pub fn fatal_error(&self) -> Option<McpError> {
        self.failure
            .get()
            .map(|reason| McpError::NegotiationFailed(reason.clone()))
    }

    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => Some(self.handle_request(req).await),
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif).await;
                None
            }
            _ => {
                tracing::warn!("Received unexpected message type from client");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        if let Err(e) = validate_request(&request) {
            return serde_json::to_value(e.to_json_rpc_error(request.id)).unwrap_or_default();
        }

        let id = request.id.clone();
        let result = self.dispatch_request(request).await;

        match result {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id, value)).unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Request {id} failed: {e}");
                serde_json::to_value(e.to_json_rpc_error(id)).unwrap_or_default()
            }
        }
    }

    async fn dispatch_request(&self, request: JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => return self.handle_initialize(request.params).await,
            "ping" => return Ok(Value::Object(serde_json::Map::new())),
            _ => {}
        }

        if !self.is_serving() {
            return Err(McpError::SessionNotReady(format!(
                "{} received while {}",
                request.method,
                self.state()
            )));
        }

        let route = match self.router.get() {
            Some(router) => router.resolve(&request.method)?,
            None => return Err(McpError::MethodNotFound(request.method)),
        };

        match route {
            Route::ListResources => self.handle_resources_list(),
            Route::ListResourceTemplates => self.handle_resource_templates_list(),
            Route::ReadResource => self.handle_resources_read(request.params).await,
            Route::ListTools => self.handle_tools_list(),
            Route::CallTool => self.handle_tools_call(request.params).await,
            Route::ListPrompts => self.handle_prompts_list(),
            Route::GetPrompt => self.handle_prompts_get(request.params).await,
            Route::ListRoots => self.handle_roots_list(),
            Route::SetLogLevel => self.handle_set_level(request.params),
        }
    }

    async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                tracing::info!("Client acknowledged initialization");
            }
            "notifications/cancelled" => {
                match parse_params::<CancelledParams>(notification.params, "cancel") {
                    Ok(p) => tracing::info!(
                        "Client cancelled request {} ({}); cancellation is not supported",
                        p.request_id,
                        p.reason.as_deref().unwrap_or("no reason")
                    ),
                    Err(e) => tracing::warn!("Malformed cancellation: {e}"),
                }
            }
            _ => {
                tracing::debug!("Unknown notification: {}", notification.method);
            }
        }
    }

    async fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        match self.state() {
            SessionState::Negotiating => {}
            SessionState::Serving => {
                return Err(McpError::InvalidRequest(
                    "Session is already initialized".to_string(),
                ))
            }
            SessionState::Unconnected => {
                return Err(self.fail(McpError::SessionNotReady(
                    "initialize received before connect".to_string(),
                )))
            }
        }

        let init_params: InitializeParams =
            parse_params(params, "Initialize").map_err(|e| self.fail(e))?;

        let caps = self.capabilities.get().copied().unwrap_or_default();
        let result = self.negotiated.lock().await.negotiate(
            init_params,
            &caps,
            self.server_info.clone(),
            self.instructions.clone(),
        );

        self.state
            .advance(SessionState::Negotiating, SessionState::Serving)
            .map_err(|e| self.fail(e))?;

        to_result(result)
    }

    /// Record a handshake failure. The error is still answered; the
    /// transport stops right after.
    fn fail(&self, error: McpError) -> McpError {
        tracing::error!("Negotiation failed: {error}");
        let _ = self.failure.set(error.to_string());
        error
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        to_result(ToolListResult {
            tools: self
                .registries
                .tools
                .list()
                .into_iter()
                .map(ToolDefinition::from)
                .collect(),
            next_cursor: None,
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = parse_params(params, "Tool call")?;
        let logger: Arc<dyn LogSink> = self.logger.clone();
        let ctx = CallContext::new(
            call_params.progress_token(),
            logger,
            Arc::clone(&self.registries.resources),
        );

        let text = self
            .registries
            .tools
            .call(
                &call_params.name,
                call_params.arguments.unwrap_or_default(),
                ctx,
            )
            .await?;

        to_result(ToolCallResult::text(text))
    }

    fn handle_resources_list(&self) -> McpResult<Value> {
        to_result(ResourceListResult {
            resources: self
                .registries
                .resources
                .list_resources()
                .into_iter()
                .map(ResourceDefinition::from)
                .collect(),
            next_cursor: None,
        })
    }

    fn handle_resource_templates_list(&self) -> McpResult<Value> {
        to_result(ResourceTemplateListResult {
            resource_templates: self
                .registries
                .resources
                .list_templates()
                .into_iter()
                .map(ResourceTemplateDefinition::from)
                .collect(),
            next_cursor: None,
        })
    }

    async fn handle_resources_read(&self, params: Option<Value>) -> McpResult<Value> {
        let read_params: ResourceReadParams = parse_params(params, "Resource read")?;

        let content = match self.registries.resources.get(&read_params.uri).await {
            Ok(contents) => ResourceContent::from(contents),
            Err(RegistryError::ResourceNotFound(uri)) => {
                tracing::debug!("No resource matches {uri}");
                ResourceContent::not_found(&uri)
            }
            Err(e) => return Err(e.into()),
        };

        to_result(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn handle_prompts_list(&self) -> McpResult<Value> {
        to_result(PromptListResult {
            prompts: self
                .registries
                .prompts
                .list()
                .into_iter()
                .map(PromptDefinition::from)
                .collect(),
            next_cursor: None,
        })
    }

    async fn handle_prompts_get(&self, params: Option<Value>) -> McpResult<Value> {
        let get_params: PromptGetParams = parse_params(params, "Prompt get")?;
        let prompts = &self.registries.prompts;

        let text = prompts
            .call(&get_params.name, get_params.arguments.unwrap_or_default())
            .await?;
        let description = prompts
            .get_config(&get_params.name)
            .and_then(|config| config.description.clone());

        to_result(PromptGetResult::single(description, text))
    }

    fn handle_roots_list(&self) -> McpResult<Value> {
        to_result(RootListResult {
            roots: self.registries.roots.list(),
        })
    }

    fn handle_set_level(&self, params: Option<Value>) -> McpResult<Value> {
        let level_params: SetLevelParams = parse_params(params, "Set level")?;
        self.logger.set_level(level_params.level);
        Ok(Value::Object(serde_json::Map::new()))
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>, what: &str) -> McpResult<T> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams(format!("{what} params required")))
}

fn to_result<T: Serialize>(result: T) -> McpResult<Value> {
    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

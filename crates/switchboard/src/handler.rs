//! Boxed async handler types stored in the registries.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::context::CallContext;
use crate::types::{Arguments, Content, TemplateVariables};

/// A boxed, sendable future returned by every registered handler.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Tool handler: receives validated arguments and a per-call context.
pub type ToolFn = Arc<dyn Fn(Arguments, CallContext) -> BoxFuture<anyhow::Result<Value>> + Send + Sync>;

/// Prompt handler: receives validated arguments only.
pub type PromptFn = Arc<dyn Fn(Arguments) -> BoxFuture<anyhow::Result<String>> + Send + Sync>;

/// Static resource handler.
pub type ResourceFn = Arc<dyn Fn() -> BoxFuture<anyhow::Result<Content>> + Send + Sync>;

/// Resource template handler: receives the variables captured from the URI.
pub type TemplateFn =
    Arc<dyn Fn(TemplateVariables) -> BoxFuture<anyhow::Result<Content>> + Send + Sync>;

pub fn tool_fn<F, Fut, R>(handler: F) -> ToolFn
where
    F: Fn(Arguments, CallContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<Value>,
{
    Arc::new(move |args, ctx| {
        let fut = handler(args, ctx);
        Box::pin(async move { fut.await.map(Into::into) })
    })
}

pub fn prompt_fn<F, Fut, R>(handler: F) -> PromptFn
where
    F: Fn(Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<String>,
{
    Arc::new(move |args| {
        let fut = handler(args);
        Box::pin(async move { fut.await.map(Into::into) })
    })
}

pub fn resource_fn<F, Fut, C>(handler: F) -> ResourceFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<C>> + Send + 'static,
    C: Into<Content>,
{
    Arc::new(move || {
        let fut = handler();
        Box::pin(async move { fut.await.map(Into::into) })
    })
}

pub fn template_fn<F, Fut, C>(handler: F) -> TemplateFn
where
    F: Fn(TemplateVariables) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<C>> + Send + 'static,
    C: Into<Content>,
{
    Arc::new(move |vars| {
        let fut = handler(vars);
        Box::pin(async move { fut.await.map(Into::into) })
    })
}

//! Per-invocation context handed to tool handlers.

use std::sync::Arc;

use crate::resources::ResourceManager;
use crate::types::{LogLevel, ProgressToken, RegistryResult, ResourceContents};

/// Destination for log messages emitted by handlers.
///
/// Implementations must not block: logging is fire-and-forget.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str) -> RegistryResult<()>;
}

/// A [`LogSink`] that writes to `tracing` instead of a connected peer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str) -> RegistryResult<()> {
        match level {
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
        Ok(())
    }
}

/// Built fresh for every tool call and dropped when the call completes.
pub struct CallContext {
    progress_token: Option<ProgressToken>,
    logger: Arc<dyn LogSink>,
    resources: Arc<ResourceManager>,
}

impl CallContext {
    pub fn new(
        progress_token: Option<ProgressToken>,
        logger: Arc<dyn LogSink>,
        resources: Arc<ResourceManager>,
    ) -> Self {
        Self {
            progress_token,
            logger,
            resources,
        }
    }

    /// The correlation token of the request, if the caller sent one.
    pub fn progress_token(&self) -> Option<&ProgressToken> {
        self.progress_token.as_ref()
    }

    /// Push a log message to the session.
    ///
    /// Fails with `SessionNotReady` if the session has not finished its
    /// handshake.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) -> RegistryResult<()> {
        self.logger.log(level, message.as_ref())
    }

    pub fn debug(&self, message: impl AsRef<str>) -> RegistryResult<()> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl AsRef<str>) -> RegistryResult<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn warning(&self, message: impl AsRef<str>) -> RegistryResult<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: impl AsRef<str>) -> RegistryResult<()> {
        self.log(LogLevel::Error, message)
    }

    /// Read a resource from the registry while the tool runs.
    pub async fn read_resource(&self, uri: &str) -> RegistryResult<ResourceContents> {
        self.resources.get(uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::StaticResource;
    use crate::types::{RegistryError, ResourceInfo};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl LogSink for RecordingSink {
        fn log(&self, level: LogLevel, message: &str) -> RegistryResult<()> {
            self.lines.lock().unwrap().push((level, message.to_string()));
            Ok(())
        }
    }

    struct ClosedSink;

    impl LogSink for ClosedSink {
        fn log(&self, _level: LogLevel, _message: &str) -> RegistryResult<()> {
            Err(RegistryError::SessionNotReady)
        }
    }

    fn resources() -> Arc<ResourceManager> {
        let mut mgr = ResourceManager::new();
        mgr.add_resource(StaticResource::new(
            ResourceInfo {
                uri: "mem://greeting".to_string(),
                name: "Greeting".to_string(),
                description: None,
                mime_type: None,
            },
            || async { Ok("hi") },
        ))
        .unwrap();
        Arc::new(mgr)
    }

    #[test]
    fn test_logs_reach_sink() {
        let sink = Arc::new(RecordingSink::default());
        let ctx = CallContext::new(
            Some(ProgressToken::from(4)),
            sink.clone(),
            resources(),
        );

        ctx.info("started").unwrap();
        ctx.error("boom").unwrap();

        let lines = sink.lines.lock().unwrap();
        assert_eq!(
            *lines,
            vec![
                (LogLevel::Info, "started".to_string()),
                (LogLevel::Error, "boom".to_string()),
            ]
        );
        assert_eq!(ctx.progress_token(), Some(&ProgressToken::from(4)));
    }

    #[test]
    fn test_log_before_session_ready_fails() {
        let ctx = CallContext::new(None, Arc::new(ClosedSink), resources());
        assert_eq!(ctx.warning("too early"), Err(RegistryError::SessionNotReady));
        assert!(ctx.progress_token().is_none());
    }

    #[test]
    fn test_read_resource_through_context() {
        let ctx = CallContext::new(None, Arc::new(TracingSink), resources());
        let out = tokio_test::block_on(ctx.read_resource("mem://greeting")).unwrap();
        assert_eq!(out.content.as_text(), Some("hi"));

        let missing = tokio_test::block_on(ctx.read_resource("mem://nope")).unwrap_err();
        assert_eq!(missing, RegistryError::ResourceNotFound("mem://nope".to_string()));
    }
}

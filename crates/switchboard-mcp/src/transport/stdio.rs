//! Stdio transport: reads JSON-RPC from stdin, writes to stdout.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::protocol::ProtocolHandler;
use crate::session::OutboundReceiver;
use crate::types::{McpError, McpResult, RequestId};

use super::framing;

/// Line-delimited JSON-RPC over a reader/writer pair, stdio by default.
pub struct StdioTransport {
    handler: Arc<ProtocolHandler>,
    outbound: OutboundReceiver,
}

impl StdioTransport {
    pub fn new(handler: Arc<ProtocolHandler>, outbound: OutboundReceiver) -> Self {
        Self { handler, outbound }
    }

    /// Run the transport loop on stdin/stdout.
    pub async fn run(self) -> McpResult<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Run the transport loop over arbitrary streams.
    ///
    /// Returns when `reader` reaches EOF and every in-flight request has been
    /// answered, or right after answering a failed handshake.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let writer_task = tokio::spawn(
            write_loop(self.outbound, writer, shutdown_rx).instrument(tracing::Span::current()),
        );

        let result = read_loop(&self.handler, reader).await;

        let _ = shutdown_tx.send(());
        match writer_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Writer stopped with error: {e}"),
            Err(e) => tracing::warn!("Writer task panicked: {e}"),
        }

        result
    }
}

async fn read_loop<R>(handler: &Arc<ProtocolHandler>, reader: R) -> McpResult<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut in_flight = JoinSet::new();

    tracing::info!("Stdio transport started");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(McpError::Io)? else {
                    tracing::info!("EOF on stdin, shutting down");
                    break;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let msg = match framing::parse_message(trimmed) {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!("Parse error: {e}");
                        let error = e.to_json_rpc_error(RequestId::Null);
                        handler.peer().send(serde_json::to_value(error)?);
                        continue;
                    }
                };

                if handler.is_serving() {
                    let handler = Arc::clone(handler);
                    in_flight.spawn(
                        async move {
                            if let Some(response) = handler.handle_message(msg).await {
                                handler.peer().send(response);
                            }
                        }
                        .instrument(tracing::Span::current()),
                    );
                } else {
                    // Handshake messages are handled in arrival order.
                    if let Some(response) = handler.handle_message(msg).await {
                        handler.peer().send(response);
                    }
                    if let Some(e) = handler.fatal_error() {
                        return Err(e);
                    }
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = joined {
                    tracing::warn!("Request task failed: {e}");
                }
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Request task failed: {e}");
        }
    }

    Ok(())
}

async fn write_loop<W>(
    mut outbound: OutboundReceiver,
    mut writer: W,
    mut shutdown: oneshot::Receiver<()>,
) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        tokio::select! {
            biased;
            msg = outbound.recv() => match msg {
                Some(value) => write_frame(&mut writer, &value).await?,
                None => break,
            },
            _ = &mut shutdown => {
                while let Ok(value) = outbound.try_recv() {
                    write_frame(&mut writer, &value).await?;
                }
                break;
            }
        }
    }
    writer.flush().await.map_err(McpError::Io)
}

async fn write_frame<W>(writer: &mut W, value: &serde_json::Value) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
{
    let framed = framing::frame_message(value)?;
    writer
        .write_all(framed.as_bytes())
        .await
        .map_err(McpError::Io)?;
    writer.flush().await.map_err(McpError::Io)
}

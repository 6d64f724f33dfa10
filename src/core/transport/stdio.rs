//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.
//! Logs go to stderr; stdout carries only protocol messages.

use rmcp::ServiceExt;
use std::sync::Arc;
use tracing::info;

use super::shutdown::{Lifecycle, interrupt_signal};
use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client disconnects or an interrupt
    /// arrives.
    pub async fn run(server: McpServer, lifecycle: Arc<Lifecycle>) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = tokio::select! {
            service = server.serve(rmcp::transport::stdio()) => {
                service.map_err(|e| TransportError::init(e.to_string()))?
            }
            _ = interrupt_signal() => {
                lifecycle.shutting_down();
                return Ok(());
            }
        };

        lifecycle.connected();

        let token = service.cancellation_token();
        let watcher = tokio::spawn({
            let lifecycle = lifecycle.clone();
            async move {
                interrupt_signal().await;
                lifecycle.shutting_down();
                token.cancel();
            }
        });

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;
        watcher.abort();

        info!("STDIO transport finished ({:?})", reason);
        Ok(())
    }
}

//! Transport service - orchestrates different transport types.
//!
//! This service provides a unified interface for starting the MCP server
//! with different transport mechanisms, and owns the server lifecycle.

use std::sync::Arc;
use tracing::info;

use super::shutdown::{Lifecycle, ServerState};
use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
    lifecycle: Arc<Lifecycle>,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServerState {
        self.lifecycle.state()
    }

    /// Start the transport with the given MCP server.
    ///
    /// Resolves when the transport closes, either because the peer went away
    /// or because an interrupt was received.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        let lifecycle = self.lifecycle.clone();
        let result = match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server, lifecycle).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server, lifecycle).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server, lifecycle).await,
        };

        self.lifecycle.shutting_down();
        result
    }
}

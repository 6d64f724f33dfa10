//! TCP transport implementation.
//!
//! Raw TCP socket transport with JSON-RPC messages (line-delimited).
//! Each accepted connection gets its own rmcp service.

use rmcp::ServiceExt;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{info, warn};

use super::shutdown::{Lifecycle, ServerState, interrupt_signal};
use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport until an interrupt arrives.
    pub async fn run(self, server: McpServer, lifecycle: Arc<Lifecycle>) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);
        lifecycle.connected();

        let interrupt = interrupt_signal();
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        info!("Accepted connection from {}", peer_addr);

                        if let Err(e) = stream.set_nodelay(true) {
                            warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                        }

                        tokio::spawn(Self::handle_connection(
                            server.clone(),
                            stream,
                            peer_addr,
                            lifecycle.subscribe(),
                        ));
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        // Avoid spinning on persistent errors
                        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                    }
                },
                _ = &mut interrupt => {
                    lifecycle.shutting_down();
                    break;
                }
            }
        }

        info!("TCP transport stopped accepting connections");
        Ok(())
    }

    /// Serve a single TCP connection until the client leaves or the server
    /// shuts down.
    async fn handle_connection(
        server: McpServer,
        stream: TcpStream,
        peer_addr: std::net::SocketAddr,
        mut state: watch::Receiver<ServerState>,
    ) {
        let service = match server.serve(stream).await {
            Ok(s) => {
                info!("Client {} connected, serving...", peer_addr);
                s
            }
            Err(e) => {
                warn!("Failed to initialize service for {}: {}", peer_addr, e);
                return;
            }
        };

        let token = service.cancellation_token();
        let watcher = tokio::spawn(async move {
            let shutting_down = state
                .wait_for(|s| *s == ServerState::ShuttingDown)
                .await
                .is_ok();
            if shutting_down {
                token.cancel();
            }
        });

        match service.waiting().await {
            Ok(reason) => info!("Client {} disconnected ({:?})", peer_addr, reason),
            Err(e) => warn!("Error while serving client {}: {}", peer_addr, e),
        }
        watcher.abort();
    }
}

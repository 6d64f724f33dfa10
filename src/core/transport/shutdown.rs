//! Interrupt handling and server lifecycle state.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

/// Lifecycle state of the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    /// Constructed, handlers registered, no transport attached yet.
    Idle,
    /// Transport attached and serving requests.
    Connected,
    /// Interrupt received, transport closing.
    ShuttingDown,
}

/// Tracks the server state and lets other tasks observe transitions.
///
/// Transitions only move forward: `Idle -> Connected -> ShuttingDown`.
#[derive(Debug)]
pub struct Lifecycle {
    tx: watch::Sender<ServerState>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ServerState::Idle);
        Self { tx }
    }

    /// Current state.
    pub fn state(&self) -> ServerState {
        *self.tx.borrow()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.tx.subscribe()
    }

    /// Mark the transport as attached. Ignored once shutdown has begun.
    pub fn connected(&self) {
        self.advance(ServerState::Connected);
    }

    /// Mark the server as shutting down.
    pub fn shutting_down(&self) {
        self.advance(ServerState::ShuttingDown);
    }

    fn advance(&self, next: ServerState) {
        self.tx.send_if_modified(|state| {
            let allowed = matches!(
                (*state, next),
                (ServerState::Idle, ServerState::Connected)
                    | (ServerState::Idle, ServerState::ShuttingDown)
                    | (ServerState::Connected, ServerState::ShuttingDown)
            );
            if allowed {
                info!("Server state: {:?} -> {:?}", *state, next);
                *state = next;
            }
            allowed
        });
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once the process receives an interrupt (SIGINT / Ctrl+C).
pub async fn interrupt_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, shutting down"),
        Err(e) => {
            // Without a signal handler the transport runs until its peer closes.
            warn!("Failed to listen for interrupt signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert_eq!(Lifecycle::new().state(), ServerState::Idle);
    }

    #[test]
    fn test_forward_transitions() {
        let lifecycle = Lifecycle::new();
        lifecycle.connected();
        assert_eq!(lifecycle.state(), ServerState::Connected);
        lifecycle.shutting_down();
        assert_eq!(lifecycle.state(), ServerState::ShuttingDown);
    }

    #[test]
    fn test_no_transition_back_from_shutdown() {
        let lifecycle = Lifecycle::new();
        lifecycle.shutting_down();
        lifecycle.connected();
        assert_eq!(lifecycle.state(), ServerState::ShuttingDown);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let lifecycle = Lifecycle::new();
        let mut rx = lifecycle.subscribe();
        lifecycle.connected();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ServerState::Connected);
    }
}

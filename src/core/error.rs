//! Error types and handling for the MCP server.
//!
//! Tool and transcript failures are answered to the client as JSON-RPC
//! errors and never surface here. This type covers the failures that stop
//! the server from starting.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The transcript source could not be set up.
    #[error("Transcript source error: {0}")]
    Source(#[from] crate::domains::transcripts::FetchError),
}

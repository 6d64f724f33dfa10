//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the transcript tool
//! over the configured transport until the client disconnects or SIGINT.

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use youtube_transcript_mcp::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone()).inspect_err(|e| {
        error!("Failed to initialize server: {}", e);
    })?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await.inspect_err(|e| {
        error!("Transport failed: {}", e);
    })?;

    info!("Server shut down");

    // tokio reads stdin on a blocking thread that cannot be cancelled, so
    // dropping the runtime would wait until the client closes the pipe.
    std::process::exit(0)
}

/// Initialize the logging subsystem.
///
/// Logs are written to stderr; stdout is reserved for the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

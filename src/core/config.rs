//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default User-Agent sent to YouTube. A browser-like agent is required for
/// the watch page to embed caption tracks.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36,gzip(gfe)";

/// Default per-request timeout for YouTube requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Transcript retrieval configuration.
    pub transcript: TranscriptConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for fetching transcripts from YouTube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Preferred caption language code (e.g. "en"). When unset, the first
    /// caption track listed for the video is used.
    pub lang: Option<String>,

    /// User-Agent header for requests to YouTube.
    pub user_agent: String,

    /// Timeout applied to each HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            lang: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "youtube-transcript".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            transcript: TranscriptConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TRANSCRIPT_LANG`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(lang) = std::env::var("MCP_TRANSCRIPT_LANG") {
            let lang = lang.trim().to_string();
            if !lang.is_empty() {
                info!("Preferred transcript language: {}", lang);
                config.transcript.lang = Some(lang);
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_USER_AGENT") {
            config.transcript.user_agent = user_agent;
        }

        if let Ok(timeout) = std::env::var("MCP_REQUEST_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.transcript.request_timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_REQUEST_TIMEOUT_SECS value {:?}, using {}s",
                    timeout, DEFAULT_REQUEST_TIMEOUT_SECS
                ),
            }
        }

        config
    }
}

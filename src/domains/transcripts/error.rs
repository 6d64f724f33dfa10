//! Transcript-specific error types.

use thiserror::Error;

/// Message used when an upstream failure carries no text of its own.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Caller-supplied input that can never produce a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// The URL argument was empty.
    #[error("URL is required")]
    EmptyUrl,

    /// The URL did not match any recognized YouTube URL shape.
    #[error("Invalid YouTube URL")]
    UnrecognizedUrl,
}

/// Failures reported by a transcript source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// YouTube answered with a captcha page.
    #[error("YouTube is receiving too many requests from this IP and now requires solving a captcha to continue")]
    TooManyRequests,

    /// The video does not exist or cannot be played.
    #[error("The video is no longer available ({0})")]
    VideoUnavailable(String),

    /// Captions are turned off for the video.
    #[error("Transcript is disabled on this video ({0})")]
    TranscriptsDisabled(String),

    /// The video has no caption tracks at all.
    #[error("No transcripts are available for this video ({0})")]
    NoTranscript(String),

    /// The configured language has no caption track.
    #[error("No transcripts are available in {lang} for this video ({video_id}). Available languages: {}", .available.join(", "))]
    LanguageNotAvailable {
        lang: String,
        available: Vec<String>,
        video_id: String,
    },

    /// YouTube answered with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    Status { status: u16, url: String },

    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The watch page or caption track had an unexpected shape.
    #[error("Failed to parse YouTube response: {0}")]
    Parse(String),

    /// Any other failure reported by a source implementation.
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Create an "other" error from any message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Errors returned by [`TranscriptFetcher::fetch_transcript`](super::TranscriptFetcher::fetch_transcript).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// Rejected before any extraction or fetch was attempted.
    #[error("{0}")]
    InvalidInput(InvalidInputError),

    /// Id extraction or the upstream fetch failed.
    #[error("Failed to get transcript: {message}")]
    Fetch { message: String },
}

impl TranscriptError {
    /// Wrap a failure from extraction or the source, keeping its message.
    pub fn fetch(source: &dyn std::error::Error) -> Self {
        let message = source.to_string();
        Self::Fetch {
            message: if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            },
        }
    }
}

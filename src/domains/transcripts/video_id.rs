//! YouTube video id extraction.
//!
//! Every YouTube URL shape embeds the same 11-character id. Recognized forms:
//!
//! - `youtube.com/watch?v=<id>` (the `v` parameter may appear anywhere in the query)
//! - `youtube.com/v/<id>`, `youtube.com/e/<id>`, `youtube.com/embed/<id>`
//! - `youtube.com/<segment>/<...>/<id>` (channel-style paths)
//! - `youtu.be/<id>`

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::error::InvalidInputError;

/// Length of every YouTube video id.
pub const VIDEO_ID_LENGTH: usize = 11;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("Invalid video id regex")
});

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Parse the video id out of a YouTube URL.
    pub fn from_url(url: &str) -> Result<Self, InvalidInputError> {
        extract_video_id(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video id from a YouTube URL.
///
/// Returns [`InvalidInputError::UnrecognizedUrl`] when no known URL shape
/// matches. There is no best-effort fallback.
pub fn extract_video_id(url: &str) -> Result<VideoId, InvalidInputError> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
        .ok_or(InvalidInputError::UnrecognizedUrl)
}

//! Transcript source abstraction.
//!
//! A source turns a video id into the ordered caption fragments of that video.
//! The production source is [`YoutubeTranscriptClient`](super::YoutubeTranscriptClient);
//! tests substitute their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::FetchError;
use super::video_id::VideoId;

/// One caption unit of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    /// Caption text, entity-decoded.
    pub text: String,

    /// Start of the caption in seconds from the beginning of the video.
    pub offset: f64,

    /// How long the caption is shown, in seconds.
    pub duration: f64,

    /// Language code of the caption track.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl TranscriptFragment {
    /// Create a fragment with only text, starting at zero.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: 0.0,
            duration: 0.0,
            lang: None,
        }
    }
}

/// Something that can retrieve the caption fragments of a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch all fragments of the video's transcript, in playback order.
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>, FetchError>;
}

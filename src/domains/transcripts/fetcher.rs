//! Transcript fetching: URL in, plain text out.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::error::{InvalidInputError, TranscriptError};
use super::source::{TranscriptFragment, TranscriptSource};
use super::video_id::extract_video_id;

/// Fetches a transcript for a YouTube URL and flattens it into one string.
///
/// Holds no per-call state, so a single instance is shared by every
/// concurrent tool call.
#[derive(Clone)]
pub struct TranscriptFetcher {
    source: Arc<dyn TranscriptSource>,
}

impl TranscriptFetcher {
    /// Create a fetcher backed by the given source.
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self { source }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the transcript text of the video at `url`.
    ///
    /// An empty URL is rejected before anything else happens. Any later
    /// failure, from id extraction or from the source, is reported as
    /// [`TranscriptError::Fetch`]. Zero fragments yield an empty string.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn fetch_transcript(&self, url: &str) -> Result<String, TranscriptError> {
        if url.is_empty() {
            return Err(TranscriptError::InvalidInput(InvalidInputError::EmptyUrl));
        }

        let video_id = extract_video_id(url).map_err(|e| {
            warn!("Could not extract video id from {}: {}", url, e);
            TranscriptError::fetch(&e)
        })?;

        info!("Fetching transcript for video {}", video_id);

        let fragments = self.source.fetch(&video_id).await.map_err(|e| {
            warn!("Transcript fetch failed for {}: {}", video_id, e);
            TranscriptError::fetch(&e)
        })?;

        debug!("Received {} fragment(s) for {}", fragments.len(), video_id);

        Ok(join_fragments(&fragments))
    }
}

/// Join fragment texts with single spaces, in the order given.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Transcripts domain module.
//!
//! Turns a YouTube URL into the plain text of the video's captions.
//!
//! ## Architecture
//!
//! - `video_id.rs` - URL parsing into an 11-character video id
//! - `source.rs` - `TranscriptSource` trait and the fragment type
//! - `youtube.rs` - the youtube.com implementation of `TranscriptSource`
//! - `fetcher.rs` - `TranscriptFetcher`, which joins fragments into text
//! - `error.rs` - input, source, and fetch error types

mod error;
mod fetcher;
mod source;
mod video_id;
pub mod youtube;

pub use error::{FetchError, InvalidInputError, TranscriptError};
pub use fetcher::{TranscriptFetcher, join_fragments};
pub use source::{TranscriptFragment, TranscriptSource};
pub use video_id::{VIDEO_ID_LENGTH, VideoId, extract_video_id};
pub use youtube::YoutubeTranscriptClient;

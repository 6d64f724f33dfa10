//! YouTube tools module.
//!
//! - `transcript`: fetch the caption text of a video

pub mod transcript;

pub use transcript::{GetTranscriptParams, GetTranscriptTool, VIDEO_URL_ARG};

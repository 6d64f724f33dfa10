//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file.

pub mod youtube;

pub use youtube::{GetTranscriptParams, GetTranscriptTool};

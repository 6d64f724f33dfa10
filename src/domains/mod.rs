//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: MCP tool definitions, routing, and dispatch
//! - **transcripts**: YouTube URL parsing and transcript retrieval

pub mod tools;
pub mod transcripts;

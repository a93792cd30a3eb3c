//! Stream framing and event parsing.
//!
//! This module turns the raw response bytes of the enrichment stream into
//! typed [`PipelineEvent`](crate::domain::PipelineEvent)s:
//! - [`FrameDecoder`]: byte chunks -> complete newline-terminated lines
//! - [`parse_event`]: one SSE line -> one typed event (or nothing)

pub mod decoder;
pub mod parser;

pub use decoder::FrameDecoder;
pub use parser::parse_event;

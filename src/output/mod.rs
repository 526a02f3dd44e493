//! Output handling for Treeline
//!
//! This module defines the record types written to the output streams and
//! the sink trait implementations that persist them.

mod records;
mod sink;

pub use records::{
    EdgeRecord, ErrorRecord, PageRecord, BLOCKED_BY_ROBOTS, NO_DESCRIPTION, NO_TITLE,
};
pub use sink::{JsonlSink, MemorySink, RecordSink, EDGES_FILE, ERRORS_FILE, PAGES_FILE};

use thiserror::Error;

/// Errors that can occur while emitting records
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

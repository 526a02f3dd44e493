//! Record sinks
//!
//! Sinks are append-only: the crawl loop writes each record as soon as it is
//! produced, so an interrupted crawl leaves behind a valid prefix of
//! complete, independently parseable lines.

use crate::output::records::{EdgeRecord, ErrorRecord, PageRecord};
use crate::output::OutputResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File names for the record streams under the data directory
pub const PAGES_FILE: &str = "pages.jsonl";
pub const EDGES_FILE: &str = "edges.jsonl";
pub const ERRORS_FILE: &str = "errors.jsonl";

/// Append-only sink for crawl records
///
/// Implementations must preserve insertion order; the streams' line order is
/// the crawl's processing order.
pub trait RecordSink {
    /// Records a processed page
    fn record_page(&mut self, page: &PageRecord) -> OutputResult<()>;

    /// Records a link-discovery edge
    fn record_edge(&mut self, edge: &EdgeRecord) -> OutputResult<()>;

    /// Records a request-level failure
    fn record_error(&mut self, error: &ErrorRecord) -> OutputResult<()>;

    /// Flushes any buffered records to their backing store
    fn flush(&mut self) -> OutputResult<()>;
}

/// Sink writing line-delimited JSON files into a data directory
pub struct JsonlSink {
    pages: BufWriter<File>,
    edges: BufWriter<File>,
    errors: BufWriter<File>,
}

impl JsonlSink {
    /// Creates the data directory and the three stream files, truncating
    /// any previous run's output
    pub fn create(data_dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(data_dir)?;

        Ok(Self {
            pages: BufWriter::new(File::create(data_dir.join(PAGES_FILE))?),
            edges: BufWriter::new(File::create(data_dir.join(EDGES_FILE))?),
            errors: BufWriter::new(File::create(data_dir.join(ERRORS_FILE))?),
        })
    }

    fn write_line<T: Serialize>(writer: &mut BufWriter<File>, record: &T) -> OutputResult<()> {
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        // Flush per line so a crash leaves only whole records behind
        writer.flush()?;
        Ok(())
    }
}

impl RecordSink for JsonlSink {
    fn record_page(&mut self, page: &PageRecord) -> OutputResult<()> {
        Self::write_line(&mut self.pages, page)
    }

    fn record_edge(&mut self, edge: &EdgeRecord) -> OutputResult<()> {
        Self::write_line(&mut self.edges, edge)
    }

    fn record_error(&mut self, error: &ErrorRecord) -> OutputResult<()> {
        Self::write_line(&mut self.errors, error)
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.pages.flush()?;
        self.edges.flush()?;
        self.errors.flush()?;
        Ok(())
    }
}

/// In-memory sink collecting records in vectors
///
/// Useful as a substitutable backend when the streams are consumed in
/// process, and as the sink of choice in unit tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub pages: Vec<PageRecord>,
    pub edges: Vec<EdgeRecord>,
    pub errors: Vec<ErrorRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn record_page(&mut self, page: &PageRecord) -> OutputResult<()> {
        self.pages.push(page.clone());
        Ok(())
    }

    fn record_edge(&mut self, edge: &EdgeRecord) -> OutputResult<()> {
        self.edges.push(edge.clone());
        Ok(())
    }

    fn record_error(&mut self, error: &ErrorRecord) -> OutputResult<()> {
        self.errors.push(error.clone());
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

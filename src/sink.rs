//! Row sink seam and the bulk-loader TSV implementation.

use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::graph::{Row, HEADER};

/// Appendable row output. The stream is forward-only: no random access, no
/// rewrites. Any write failure is fatal to the run — a partially written
/// graph file is discarded by the caller, not resumed.
pub trait RowSink {
    fn write_row(&mut self, row: &Row) -> Result<()>;

    /// Flush buffered rows to the underlying stream.
    fn finish(&mut self) -> Result<()>;
}

/// Tab-separated UTF-8 row stream with the 9-column bulk-loader header.
/// Quoting is minimal, applied only when a field would break the format.
pub struct TsvSink {
    writer: csv::Writer<File>,
}

impl TsvSink {
    /// Create (or truncate) the output file and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(file);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }
}

impl RowSink for TsvSink {
    fn write_row(&mut self, row: &Row) -> Result<()> {
        self.writer.write_record(row.columns())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects rows in memory. Useful for tests and for callers that
/// post-process rows instead of streaming them to a file.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<Row>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowSink for MemorySink {
    fn write_row(&mut self, row: &Row) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

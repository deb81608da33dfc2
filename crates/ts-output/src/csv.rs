//! CSV output backend.
//!
//! One row per crossing attempt:
//!
//! ```csv
//! train,step,from,to,segment_a,segment_b,outcome
//! 0,0,0,1,0,1,moved
//! 1,0,1,0,0,1,stayed
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use csv::Writer;

use crate::{MoveRecord, MoveRow, OutputError, OutputResult, RecordSink};

struct Inner<W: Write> {
    writer: Writer<W>,
    error:  Option<csv::Error>,
}

/// Writes move records as CSV rows.  The header is written with the first
/// row.
pub struct CsvSink<W: Write + Send> {
    inner: Mutex<Inner<W>>,
}

impl CsvSink<File> {
    /// Create (or truncate) the CSV file at `path`.
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        Ok(Self::from_csv(Writer::from_path(path)?))
    }
}

impl<W: Write + Send> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self::from_csv(Writer::from_writer(writer))
    }

    fn from_csv(writer: Writer<W>) -> Self {
        Self { inner: Mutex::new(Inner { writer, error: None }) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<W>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> RecordSink for CsvSink<W> {
    fn record(&self, record: &MoveRecord) {
        let mut inner = self.lock();
        if let Err(e) = inner.writer.serialize(MoveRow::from(record)) {
            // Keep only the first error.
            inner.error.get_or_insert(e);
        }
    }

    fn finish(&self) -> OutputResult<()> {
        let mut inner = self.lock();
        if let Some(e) = inner.error.take() {
            return Err(OutputError::Csv(e));
        }
        inner.writer.flush()?;
        Ok(())
    }
}

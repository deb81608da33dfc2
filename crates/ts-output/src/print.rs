//! Serialized text output shared by concurrent workers.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard};

use crate::{MoveRecord, OutputError, OutputResult, RecordSink};

struct Inner<W> {
    writer: W,
    error:  Option<io::Error>,
}

/// A writer that many threads can print to without interleaving.
///
/// Each [`print`][Self::print] call writes its whole text while holding the
/// channel's lock, so two messages never mix mid-line.  As a
/// [`RecordSink`] it prints each record on its own line.
pub struct PrintChannel<W: Write + Send> {
    inner: Mutex<Inner<W>>,
}

impl PrintChannel<Stdout> {
    /// A channel over the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> PrintChannel<W> {
    pub fn new(writer: W) -> Self {
        Self { inner: Mutex::new(Inner { writer, error: None }) }
    }

    /// Append `text` atomically with respect to other `print` calls.
    ///
    /// Write errors are kept (first one only) and reported by
    /// [`take_error`][Self::take_error] or `finish`.
    pub fn print(&self, text: &str) {
        let mut inner = self.lock();
        if let Err(e) = inner.writer.write_all(text.as_bytes()) {
            inner.error.get_or_insert(e);
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&self) -> Option<io::Error> {
        self.lock().error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect a `Vec<u8>` in tests).
    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .writer
    }

    fn lock(&self) -> MutexGuard<'_, Inner<W>> {
        // A panic while printing leaves the writer usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> RecordSink for PrintChannel<W> {
    fn record(&self, record: &MoveRecord) {
        self.print(&format!("{record}\n"));
    }

    fn finish(&self) -> OutputResult<()> {
        let mut inner = self.lock();
        if let Some(e) = inner.error.take() {
            return Err(OutputError::Io(e));
        }
        inner.writer.flush()?;
        Ok(())
    }
}

//! The `RecordSink` trait shared by every output backend.

use std::sync::Arc;

use crate::{MoveRecord, OutputResult};

/// Destination for move records.
///
/// One sink is shared by every train worker, so implementations must be
/// `Send + Sync` and serialize internally.  `record` is infallible from the
/// worker's perspective: backends store their first error and return it
/// from [`finish`][Self::finish].
pub trait RecordSink: Send + Sync {
    /// Called by a worker right after each crossing attempt.
    fn record(&self, record: &MoveRecord);

    /// Flush buffered output and report any error stored while recording.
    ///
    /// Safe to call more than once.
    fn finish(&self) -> OutputResult<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &S {
    fn record(&self, record: &MoveRecord) {
        (**self).record(record);
    }

    fn finish(&self) -> OutputResult<()> {
        (**self).finish()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Arc<S> {
    fn record(&self, record: &MoveRecord) {
        (**self).record(record);
    }

    fn finish(&self) -> OutputResult<()> {
        (**self).finish()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn record(&self, record: &MoveRecord) {
        (**self).record(record);
    }

    fn finish(&self) -> OutputResult<()> {
        (**self).finish()
    }
}

// ── Discard / Tee ─────────────────────────────────────────────────────────────

/// A sink that drops every record.
pub struct Discard;

impl RecordSink for Discard {
    fn record(&self, _record: &MoveRecord) {}
}

/// Forwards every record to two sinks, `A` first.
pub struct Tee<A, B>(pub A, pub B);

impl<A: RecordSink, B: RecordSink> RecordSink for Tee<A, B> {
    fn record(&self, record: &MoveRecord) {
        self.0.record(record);
        self.1.record(record);
    }

    /// Finishes both sinks; the first error wins.
    fn finish(&self) -> OutputResult<()> {
        let a = self.0.finish();
        let b = self.1.finish();
        a.and(b)
    }
}

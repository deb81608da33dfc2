//! In-memory sink.

use std::sync::Mutex;

use ts_core::TrainId;

use crate::{MoveRecord, RecordSink};

/// Keeps every record in arrival order.
///
/// Arrival order is the order in which workers took the collector's lock,
/// so it is a faithful linearization of when each attempt was logged.
#[derive(Default)]
pub struct RecordCollector {
    records: Mutex<Vec<MoveRecord>>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<MoveRecord> {
        self.lock().clone()
    }

    /// Records of one train, in its own step order.
    pub fn records_for(&self, train: TrainId) -> Vec<MoveRecord> {
        self.lock()
            .iter()
            .filter(|r| r.train == train)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn into_records(self) -> Vec<MoveRecord> {
        self.records
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<MoveRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordSink for RecordCollector {
    fn record(&self, record: &MoveRecord) {
        self.lock().push(*record);
    }
}

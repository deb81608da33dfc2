//! Record types produced by train workers.

use std::fmt;

use serde::Serialize;
use ts_core::{Leg, StationId, TrainId};

/// Result of one crossing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOutcome {
    /// The segment was free; the train advanced to `leg.to`.
    Moved,
    /// The segment was held by another train; the train stays at `leg.from`
    /// and retries the same leg next round.
    Stayed,
}

/// One crossing attempt by one train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub train:   TrainId,
    /// The train's step count before this attempt (0 for its first round).
    pub step:    u64,
    pub leg:     Leg,
    pub outcome: MoveOutcome,
}

impl MoveRecord {
    pub fn moved(&self) -> bool {
        self.outcome == MoveOutcome::Moved
    }

    /// The station the train occupies after this attempt.
    pub fn position_after(&self) -> StationId {
        match self.outcome {
            MoveOutcome::Moved  => self.leg.to,
            MoveOutcome::Stayed => self.leg.from,
        }
    }
}

/// Console form:
///
/// ```text
/// step: 0 train: 1 (2 -> 1) (1, 2)
/// step: 0 train: 0 (0 -> 1) (0, 1) must stay at station 0
/// ```
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.leg.segment();
        write!(
            f,
            "step: {} train: {} ({} -> {}) ({}, {})",
            self.step, self.train, self.leg.from, self.leg.to, a, b,
        )?;
        if self.outcome == MoveOutcome::Stayed {
            write!(f, " must stay at station {}", self.leg.from)?;
        }
        Ok(())
    }
}

// ── CSV row ───────────────────────────────────────────────────────────────────

/// Flat, serializable form of a [`MoveRecord`] used by the CSV sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRow {
    pub train:     u32,
    pub step:      u64,
    pub from:      u32,
    pub to:        u32,
    pub segment_a: u32,
    pub segment_b: u32,
    pub outcome:   MoveOutcome,
}

impl From<&MoveRecord> for MoveRow {
    fn from(r: &MoveRecord) -> Self {
        let (a, b) = r.leg.segment();
        Self {
            train:     r.train.0,
            step:      r.step,
            from:      r.leg.from.0,
            to:        r.leg.to.0,
            segment_a: a.0,
            segment_b: b.0,
            outcome:   r.outcome,
        }
    }
}

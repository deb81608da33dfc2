//! The per-train worker loop.

use tracing::{debug, debug_span};
use ts_core::{Route, TrainId};
use ts_output::{MoveOutcome, MoveRecord, RecordSink};
use ts_sync::{ShrinkingBarrier, StartGate};
use ts_track::TrackRegistry;

use crate::ReleasePolicy;

// ── TrainReport ───────────────────────────────────────────────────────────────

/// What one worker hands back when its route is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrainReport {
    pub train: TrainId,
    /// Rounds the train took part in, successful or not.
    pub steps: u64,
    /// Successful crossings.  Always equals the route's leg count.
    pub moves: u64,
    /// Rounds spent waiting at a station because the segment was taken.
    pub stays: u64,
}

impl TrainReport {
    fn new(train: TrainId) -> Self {
        Self { train, steps: 0, moves: 0, stays: 0 }
    }
}

// ── TrainRunner ───────────────────────────────────────────────────────────────

/// Drives one train through its route.
///
/// Each round:
///
/// 1. `barrier.arrive()`: nobody attempts round *k + 1* until every active
///    train has finished round *k*.
/// 2. `registry.try_claim(from, to)`, which never blocks.
/// 3. Record the outcome, give the segment back (see [`ReleasePolicy`]),
///    advance along the route only on success.
/// 4. `steps += 1` either way.
///
/// A lost race is retried next round with no backoff and no priority.  A
/// train whose segment is taken every round retries forever.
pub(crate) struct TrainRunner<'a, S: RecordSink + ?Sized> {
    pub(crate) train:    TrainId,
    pub(crate) route:    &'a Route,
    pub(crate) registry: &'a TrackRegistry,
    pub(crate) barrier:  &'a ShrinkingBarrier,
    pub(crate) gate:     &'a StartGate,
    pub(crate) sink:     &'a S,
    pub(crate) policy:   ReleasePolicy,
}

impl<S: RecordSink + ?Sized> TrainRunner<'_, S> {
    /// Wait for the start signal, run the route to completion, and leave the
    /// barrier quorum.
    pub fn run(self) -> TrainReport {
        self.gate.wait();

        let span = debug_span!("train", id = %self.train);
        let _enter = span.enter();
        debug!(legs = self.route.leg_count(), "departing");

        // Keeps peers from waiting on this train if anything below panics.
        let departure = Departure { barrier: self.barrier, armed: true };
        let mut report = TrainReport::new(self.train);
        let mut next_leg = 0;

        while let Some(leg) = self.route.leg(next_leg) {
            self.barrier.arrive();

            let claim = self.registry.try_claim(leg.from, leg.to);
            let outcome = match claim {
                Some(_) => MoveOutcome::Moved,
                None    => MoveOutcome::Stayed,
            };
            self.sink.record(&MoveRecord {
                train: self.train,
                step: report.steps,
                leg,
                outcome,
            });

            if self.policy == ReleasePolicy::EndOfRound {
                self.barrier.arrive();
            }
            drop(claim);

            match outcome {
                MoveOutcome::Moved => {
                    report.moves += 1;
                    next_leg += 1;
                }
                MoveOutcome::Stayed => report.stays += 1,
            }
            report.steps += 1;
        }

        departure.leave();
        debug!(steps = report.steps, stays = report.stays, "route complete");
        report
    }
}

// ── Departure ─────────────────────────────────────────────────────────────────

/// Deregisters from the barrier exactly once: explicitly on normal
/// completion, or from `Drop` while unwinding.
struct Departure<'a> {
    barrier: &'a ShrinkingBarrier,
    armed:   bool,
}

impl Departure<'_> {
    fn leave(mut self) {
        self.armed = false;
        self.barrier.deregister();
    }
}

impl Drop for Departure<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.barrier.abandon();
        }
    }
}

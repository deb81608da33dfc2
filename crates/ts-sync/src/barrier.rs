//! Reusable barrier whose quorum shrinks as participants leave.
//!
//! # Protocol
//!
//! ```text
//! arrive():      arrived += 1
//!                arrived == required ? release : sleep until round advances
//! deregister():  required -= 1
//!                arrived > 0 && arrived == required ? release
//! release:       arrived = 0, round += 1, wake everyone
//! ```
//!
//! `required`, `arrived` and `round` sit in one `Mutex` guarded by one
//! `Condvar`.  Every comparison `arrived == required` happens under that
//! lock, including the one inside `deregister()`.  A participant that leaves
//! while its peers are already parked on the next round is therefore counted
//! out before anyone tests for release, and if it was the last one they were
//! waiting on, `deregister()` performs the release itself.
//!
//! Waiters key on the round number they observed rather than a boolean, so a
//! thread that wakes late never confuses round *k + 1* with round *k*, and
//! spurious wakeups simply go back to sleep.

use std::sync::{Condvar, Mutex, MutexGuard};

use tracing::{debug, trace};
use ts_core::Round;

// ── BarrierWaitResult ─────────────────────────────────────────────────────────

/// What a call to [`ShrinkingBarrier::arrive`] observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BarrierWaitResult {
    round:     Round,
    is_leader: bool,
}

impl BarrierWaitResult {
    /// The round this arrival belonged to (the one just released).
    pub fn round(&self) -> Round {
        self.round
    }

    /// `true` for exactly one arrival per round: the one that completed the
    /// quorum, or none if the round was released by a `deregister()`.
    pub fn is_leader(&self) -> bool {
        self.is_leader
    }
}

// ── ShrinkingBarrier ──────────────────────────────────────────────────────────

#[derive(Debug)]
struct State {
    required: usize,
    arrived:  usize,
    round:    Round,
}

impl State {
    fn release(&mut self) {
        trace!(round = %self.round, quorum = self.required, "barrier released");
        self.arrived = 0;
        self.round = self.round.next();
    }
}

/// Round-by-round rendezvous for a set of participants that can only shrink.
///
/// Shared by reference between participants.  Every participant calls [`arrive`][Self::arrive]
/// once per round and [`deregister`][Self::deregister] exactly once, after
/// its final `arrive`.
///
/// Misuse (arriving or leaving when no participant is registered, or leaving
/// while counted as arrived in an unreleased round) is a broken invariant in
/// the caller and panics.
#[derive(Debug)]
pub struct ShrinkingBarrier {
    state: Mutex<State>,
    cvar:  Condvar,
}

impl ShrinkingBarrier {
    /// A barrier that first releases once `quorum` participants arrive.
    pub fn new(quorum: usize) -> Self {
        Self {
            state: Mutex::new(State { required: quorum, arrived: 0, round: Round::ZERO }),
            cvar:  Condvar::new(),
        }
    }

    /// Wait until every registered participant has arrived for the current
    /// round.
    ///
    /// The arrival that completes the quorum returns immediately with
    /// `is_leader() == true`; the others sleep until the round advances.
    ///
    /// # Panics
    /// Panics if no participant is registered.
    pub fn arrive(&self) -> BarrierWaitResult {
        let mut state = self.lock();
        assert!(state.required > 0, "arrive() on a barrier with an empty quorum");

        let round = state.round;
        state.arrived += 1;
        debug_assert!(state.arrived <= state.required);

        if state.arrived == state.required {
            state.release();
            drop(state);
            self.cvar.notify_all();
            return BarrierWaitResult { round, is_leader: true };
        }

        let _state = self
            .cvar
            .wait_while(state, |s| s.round == round)
            .unwrap_or_else(|_| panic!("barrier lock poisoned"));
        BarrierWaitResult { round, is_leader: false }
    }

    /// Permanently remove one participant from the quorum.
    ///
    /// If the remaining participants have all arrived for the current round
    /// already, that round is released here.
    ///
    /// # Panics
    /// Panics if the quorum is already empty, or if the caller is still
    /// counted in an unreleased round.
    pub fn deregister(&self) {
        let mut state = self.lock();
        assert!(state.required > 0, "deregister() on a barrier with an empty quorum");

        state.required -= 1;
        assert!(
            state.arrived <= state.required,
            "participant left while counted in round {}",
            state.round,
        );
        debug!(quorum = state.required, round = %state.round, "participant left barrier");

        if state.arrived > 0 && state.arrived == state.required {
            state.release();
            drop(state);
            self.cvar.notify_all();
        }
    }

    /// Leave the quorum from a participant that is unwinding.
    ///
    /// Unlike [`deregister`][Self::deregister] this never panics: it accepts
    /// a poisoned lock and an empty quorum, so it is safe to call from a
    /// `Drop` impl while another panic is in flight.  Peers stay in lockstep
    /// but no longer wait for the departed participant.
    pub fn abandon(&self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.required == 0 {
            return;
        }
        state.required -= 1;
        state.arrived = state.arrived.min(state.required);
        debug!(quorum = state.required, round = %state.round, "participant abandoned barrier");

        if state.arrived > 0 && state.arrived == state.required {
            state.release();
            drop(state);
            self.cvar.notify_all();
        }
    }

    /// Current quorum size.
    pub fn required(&self) -> usize {
        self.lock().required
    }

    /// Participants already waiting in the current round.
    pub fn arrived(&self) -> usize {
        self.lock().arrived
    }

    /// Number of rounds released so far.
    pub fn round(&self) -> Round {
        self.lock().round
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|_| panic!("barrier lock poisoned"))
    }
}

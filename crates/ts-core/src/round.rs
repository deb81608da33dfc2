//! Lockstep round counter.
//!
//! # Design
//!
//! A `Round` is one barrier generation: every train still on its route makes
//! exactly one crossing attempt per round.  Rounds only ever move forward, so
//! the counter is a plain `u64` that is incremented under the barrier's lock.
//! At one round per nanosecond a `u64` outlasts any conceivable run.

use std::fmt;

/// A monotonically increasing barrier generation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Round(pub u64);

impl Round {
    pub const ZERO: Round = Round(0);

    /// The round immediately after `self`.
    #[inline]
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

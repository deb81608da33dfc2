//! Train routes and the legs they are made of.

use crate::StationId;

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One hop of a route: the crossing from `from` to `to`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Leg {
    pub from: StationId,
    pub to:   StationId,
}

impl Leg {
    pub fn new(from: StationId, to: StationId) -> Self {
        Self { from, to }
    }

    /// The segment this leg crosses as a sorted `(low, high)` pair.
    ///
    /// Ordering is cosmetic; the track registry accepts either orientation.
    #[inline]
    pub fn segment(self) -> (StationId, StationId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }

    /// `true` when both ends are the same station.  No segment exists for
    /// such a leg, so validated routes never contain one.
    #[inline]
    pub fn is_self_loop(self) -> bool {
        self.from == self.to
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The fixed, ordered list of stations a train visits.
///
/// Immutable once built.  A route with a single station has no legs: its
/// train makes zero moves and leaves the barrier quorum immediately.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Route {
    stations: Vec<StationId>,
}

impl Route {
    /// Wrap a station list.  Structural checks (non-empty, in range, no
    /// self-loops) happen in [`Scenario::new`][crate::Scenario::new].
    pub fn new(stations: Vec<StationId>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of crossings needed to finish the route.
    pub fn leg_count(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// Leg `i`, i.e. the move from station `i` to station `i + 1`.
    #[inline]
    pub fn leg(&self, i: usize) -> Option<Leg> {
        match (self.stations.get(i), self.stations.get(i + 1)) {
            (Some(&from), Some(&to)) => Some(Leg::new(from, to)),
            _ => None,
        }
    }

    /// All legs in travel order.
    pub fn legs(&self) -> impl Iterator<Item = Leg> + '_ {
        self.stations.windows(2).map(|w| Leg::new(w[0], w[1]))
    }
}

impl From<Vec<StationId>> for Route {
    fn from(stations: Vec<StationId>) -> Self {
        Self::new(stations)
    }
}

impl FromIterator<StationId> for Route {
    fn from_iter<I: IntoIterator<Item = StationId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

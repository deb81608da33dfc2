//! Track segment registry.
//!
//! # Data layout
//!
//! Every unordered station pair `{a, b}` with `a != b` owns exactly one
//! occupancy flag.  Flags live in a packed upper-triangular array: for
//! `low < high` in a network of `n` stations,
//!
//! ```text
//! slot(low, high) = low * (2n - low - 1) / 2 + (high - low - 1)
//! ```
//!
//! so `n * (n - 1) / 2` flags cover the whole matrix, and `(a, b)` and
//! `(b, a)` resolve to the same slot.  The array is allocated in full by
//! [`TrackRegistry::new`] and never resized, so no flag is ever created
//! while workers are running.
//!
//! # Atomicity
//!
//! Acquisition is a single `compare_exchange(false → true)`.  Of any number
//! of concurrent callers racing for one segment, exactly one observes the
//! transition.  `Acquire` on success pairs with the `Release` store in
//! [`TrackRegistry::release`].

use std::sync::atomic::{AtomicBool, Ordering};

use ts_core::StationId;

use crate::{TrackError, TrackResult};

// ── SegmentKey ────────────────────────────────────────────────────────────────

/// Canonical `(low, high)` form of an unordered station pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SegmentKey {
    low:  StationId,
    high: StationId,
}

impl SegmentKey {
    /// Canonicalise `{a, b}`.  Returns `None` for `a == b`: there is no
    /// segment from a station to itself.
    pub fn new(a: StationId, b: StationId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less    => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal   => None,
        }
    }

    pub fn low(self) -> StationId {
        self.low
    }

    pub fn high(self) -> StationId {
        self.high
    }
}

// ── TrackRegistry ─────────────────────────────────────────────────────────────

/// One exclusive-access flag per unordered station pair.
///
/// Shared by reference between all train workers.  Every
/// operation is lock-free and non-blocking.
pub struct TrackRegistry {
    station_count: usize,
    occupied:      Box<[AtomicBool]>,
}

impl TrackRegistry {
    /// Allocate a free segment for every unordered pair of
    /// `station_count` stations.
    ///
    /// The station count comes straight from the input file, so a network
    /// too large to index or allocate is an error rather than an abort.
    pub fn new(station_count: usize) -> TrackResult<Self> {
        let slots = station_count
            .checked_mul(station_count.saturating_sub(1))
            .map(|pairs| pairs / 2)
            .ok_or(TrackError::TooManySegments { station_count })?;

        let mut occupied = Vec::new();
        occupied
            .try_reserve_exact(slots)
            .map_err(|_| TrackError::OutOfMemory { station_count, segments: slots })?;
        occupied.resize_with(slots, || AtomicBool::new(false));

        Ok(Self { station_count, occupied: occupied.into_boxed_slice() })
    }

    pub fn station_count(&self) -> usize {
        self.station_count
    }

    /// Number of segments, `n * (n - 1) / 2`.
    pub fn segment_count(&self) -> usize {
        self.occupied.len()
    }

    /// Mark `{a, b}` occupied if it is free.
    ///
    /// Returns `true` iff this call made the free → occupied transition.
    /// Returns `false` without touching state if the segment was already
    /// held.  Never blocks.
    ///
    /// # Panics
    /// Panics if `a == b` or either station is outside the network.
    #[inline]
    pub fn try_acquire(&self, a: StationId, b: StationId) -> bool {
        self.flag(a, b)
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Mark `{a, b}` free.
    ///
    /// Only the caller whose [`try_acquire`][Self::try_acquire] succeeded
    /// may release.
    ///
    /// # Panics
    /// Panics if `a == b`, either station is outside the network, or the
    /// segment was not held.
    #[inline]
    pub fn release(&self, a: StationId, b: StationId) {
        let was_held = self.flag(a, b).swap(false, Ordering::Release);
        assert!(was_held, "released free segment {{{a}, {b}}}");
    }

    /// Like [`try_acquire`][Self::try_acquire] but returns a guard that
    /// releases the segment when dropped.
    pub fn try_claim(&self, a: StationId, b: StationId) -> Option<SegmentGuard<'_>> {
        let key = self.key(a, b);
        // Lazy: a guard built for a failed claim would release on drop.
        self.try_acquire(key.low, key.high)
            .then(|| SegmentGuard { registry: self, key })
    }

    /// Snapshot of whether `{a, b}` is currently held.
    pub fn is_occupied(&self, a: StationId, b: StationId) -> bool {
        self.flag(a, b).load(Ordering::Acquire)
    }

    /// Number of segments held at this instant.  Only exact when no worker
    /// is running.
    pub fn occupied_count(&self) -> usize {
        self.occupied
            .iter()
            .filter(|f| f.load(Ordering::Relaxed))
            .count()
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn flag(&self, a: StationId, b: StationId) -> &AtomicBool {
        &self.occupied[self.slot(self.key(a, b))]
    }

    fn key(&self, a: StationId, b: StationId) -> SegmentKey {
        let key = SegmentKey::new(a, b)
            .unwrap_or_else(|| panic!("no segment from station {a} to itself"));
        assert!(
            key.high.index() < self.station_count,
            "station {} outside network of {} stations",
            key.high,
            self.station_count,
        );
        key
    }

    #[inline]
    fn slot(&self, key: SegmentKey) -> usize {
        let (lo, hi, n) = (key.low.index(), key.high.index(), self.station_count);
        lo * (2 * n - lo - 1) / 2 + (hi - lo - 1)
    }
}

// ── SegmentGuard ──────────────────────────────────────────────────────────────

/// RAII hold on one segment.  Releases it on drop.
#[must_use = "dropping the guard releases the segment immediately"]
pub struct SegmentGuard<'a> {
    registry: &'a TrackRegistry,
    key:      SegmentKey,
}

impl Drop for SegmentGuard<'_> {
    fn drop(&mut self) {
        self.registry.release(self.key.low, self.key.high);
    }
}

//! Unit tests for ts-track.
//!
//! Concurrency tests use scoped threads released together by a
//! `std::sync::Barrier` so that callers genuinely race.

#[cfg(test)]
mod helpers {
    use ts_core::StationId;

    pub fn s(n: u32) -> StationId {
        StationId(n)
    }
}

// ── SegmentKey ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod key {
    use super::helpers::s;
    use crate::SegmentKey;

    #[test]
    fn canonical_order() {
        let k = SegmentKey::new(s(4), s(1)).unwrap();
        assert_eq!((k.low(), k.high()), (s(1), s(4)));
        assert_eq!(SegmentKey::new(s(1), s(4)), Some(k));
    }

    #[test]
    fn no_self_loop_key() {
        assert!(SegmentKey::new(s(3), s(3)).is_none());
    }
}

// ── Single-threaded registry behaviour ────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::helpers::s;
    use crate::{TrackError, TrackRegistry};

    #[test]
    fn segment_count_is_pairs() {
        assert_eq!(TrackRegistry::new(0).unwrap().segment_count(), 0);
        assert_eq!(TrackRegistry::new(1).unwrap().segment_count(), 0);
        assert_eq!(TrackRegistry::new(2).unwrap().segment_count(), 1);
        assert_eq!(TrackRegistry::new(5).unwrap().segment_count(), 10);
    }

    #[test]
    fn unindexable_network_is_an_error() {
        assert!(matches!(
            TrackRegistry::new(usize::MAX),
            Err(TrackError::TooManySegments { station_count: usize::MAX })
        ));
    }

    #[test]
    fn unallocatable_network_is_an_error() {
        // Roughly 2^63 one-byte flags: indexable on 64-bit, never allocatable.
        assert!(TrackRegistry::new(u32::MAX as usize).is_err());
    }

    #[test]
    fn acquire_then_contend_then_release() {
        let reg = TrackRegistry::new(3).unwrap();
        assert!(reg.try_acquire(s(0), s(1)));
        assert!(!reg.try_acquire(s(0), s(1)));
        assert!(reg.is_occupied(s(0), s(1)));
        reg.release(s(0), s(1));
        assert!(!reg.is_occupied(s(0), s(1)));
        assert!(reg.try_acquire(s(0), s(1)));
    }

    #[test]
    fn either_orientation_is_the_same_segment() {
        let reg = TrackRegistry::new(4).unwrap();
        assert!(reg.try_acquire(s(2), s(3)));
        assert!(!reg.try_acquire(s(3), s(2)));
        reg.release(s(3), s(2));
        assert!(!reg.is_occupied(s(2), s(3)));
    }

    #[test]
    fn every_pair_has_its_own_slot() {
        let n = 7;
        let reg = TrackRegistry::new(n).unwrap();
        for a in 0..n as u32 {
            for b in (a + 1)..n as u32 {
                assert!(reg.try_acquire(s(a), s(b)), "{{{a}, {b}}} already held");
            }
        }
        assert_eq!(reg.occupied_count(), reg.segment_count());
    }

    #[test]
    fn failed_acquire_leaves_state_unchanged() {
        let reg = TrackRegistry::new(3).unwrap();
        assert!(reg.try_acquire(s(1), s(2)));
        assert!(!reg.try_acquire(s(2), s(1)));
        assert_eq!(reg.occupied_count(), 1);
    }

    #[test]
    fn guard_releases_on_drop() {
        let reg = TrackRegistry::new(3).unwrap();
        {
            let g = reg.try_claim(s(2), s(0)).unwrap();
            assert!(reg.try_claim(s(0), s(2)).is_none());
        }
        assert!(!reg.is_occupied(s(0), s(2)));
    }

    #[test]
    fn failed_claim_does_not_release_holder() {
        let reg = TrackRegistry::new(2).unwrap();
        assert!(reg.try_acquire(s(0), s(1)));
        assert!(reg.try_claim(s(1), s(0)).is_none());
        assert!(reg.is_occupied(s(0), s(1)));
    }

    #[test]
    #[should_panic(expected = "to itself")]
    fn self_loop_panics() {
        TrackRegistry::new(3).unwrap().try_acquire(s(1), s(1));
    }

    #[test]
    #[should_panic(expected = "outside network")]
    fn out_of_range_panics() {
        TrackRegistry::new(3).unwrap().try_acquire(s(0), s(3));
    }

    #[test]
    #[should_panic(expected = "released free segment")]
    fn releasing_free_segment_panics() {
        TrackRegistry::new(3).unwrap().release(s(0), s(1));
    }
}

// ── Concurrent contention ─────────────────────────────────────────────────────

#[cfg(test)]
mod contention {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::s;
    use crate::TrackRegistry;

    #[test]
    fn exactly_one_winner_per_race() {
        const THREADS: usize = 8;
        for _ in 0..50 {
            let reg = TrackRegistry::new(2).unwrap();
            let start = Barrier::new(THREADS);
            let wins = AtomicUsize::new(0);
            thread::scope(|scope| {
                for i in 0..THREADS {
                    let (reg, start, wins) = (&reg, &start, &wins);
                    scope.spawn(move || {
                        start.wait();
                        // Half the racers use each orientation.
                        let won = if i % 2 == 0 {
                            reg.try_acquire(s(0), s(1))
                        } else {
                            reg.try_acquire(s(1), s(0))
                        };
                        if won {
                            wins.fetch_add(1, Ordering::SeqCst);
                        }
                    });
                }
            });
            assert_eq!(wins.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn holders_never_overlap() {
        const STATIONS: usize = 5;
        const THREADS: usize = 6;
        const ATTEMPTS: usize = 2_000;

        let reg = TrackRegistry::new(STATIONS).unwrap();
        // Shadow count of holders per (a, b) matrix cell, both orientations.
        let holders: Vec<AtomicUsize> =
            (0..STATIONS * STATIONS).map(|_| AtomicUsize::new(0)).collect();

        thread::scope(|scope| {
            for t in 0..THREADS {
                let (reg, holders) = (&reg, &holders);
                scope.spawn(move || {
                    let mut rng = SmallRng::seed_from_u64(t as u64);
                    for _ in 0..ATTEMPTS {
                        let a = rng.gen_range(0..STATIONS as u32);
                        let b = (a + rng.gen_range(1..STATIONS as u32)) % STATIONS as u32;
                        let cell = (a.min(b) as usize) * STATIONS + a.max(b) as usize;
                        if reg.try_acquire(s(a), s(b)) {
                            let before = holders[cell].fetch_add(1, Ordering::SeqCst);
                            assert_eq!(before, 0, "segment {{{a}, {b}}} held twice");
                            thread::yield_now();
                            holders[cell].fetch_sub(1, Ordering::SeqCst);
                            reg.release(s(b), s(a));
                        }
                    }
                });
            }
        });
        assert_eq!(reg.occupied_count(), 0);
    }
}

//! `ts-track` — the shared track segment registry.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`registry`] | `TrackRegistry`, `SegmentKey`, `SegmentGuard`             |
//! | [`error`]    | `TrackError`, `TrackResult`                               |
//!
//! The registry holds one atomic occupancy flag per unordered station pair.
//! Workers call [`TrackRegistry::try_acquire`] when they want to cross a
//! segment; contention is never waited out here.  Retrying in a later round
//! is the caller's policy.

pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{TrackError, TrackResult};
pub use registry::{SegmentGuard, SegmentKey, TrackRegistry};

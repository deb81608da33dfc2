//! Error type for ts-track.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    /// `n * (n - 1) / 2` does not fit in `usize`.
    #[error("{station_count} stations need more track segments than this platform can index")]
    TooManySegments { station_count: usize },

    #[error("cannot allocate {segments} track segments for {station_count} stations")]
    OutOfMemory { station_count: usize, segments: usize },
}

pub type TrackResult<T> = Result<T, TrackError>;

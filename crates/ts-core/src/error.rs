//! Scenario error type.
//!
//! Everything that can go wrong before the first worker thread starts lives
//! here: unreadable files, malformed tokens, and routes that reference
//! stations or segments that do not exist.

use thiserror::Error;

use crate::{StationId, TrainId};

/// Errors produced while loading or validating a [`Scenario`][crate::Scenario].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("token {position}: expected {expected}, found {found:?}")]
    Parse {
        position: usize,
        expected: &'static str,
        found:    String,
    },

    #[error("token {position}: expected {expected}, found end of input")]
    UnexpectedEof {
        position: usize,
        expected: &'static str,
    },

    #[error("train {train}: station {station} out of range (network has {station_count} stations)")]
    StationOutOfRange {
        train:         TrainId,
        station:       StationId,
        station_count: usize,
    },

    #[error("train {0}: route has no stations")]
    EmptyRoute(TrainId),

    #[error("train {train}: leg {leg} stays at station {station} (no such segment)")]
    SelfLoop {
        train:   TrainId,
        leg:     usize,
        station: StationId,
    },

    #[error("{0} trains but the network has no stations")]
    NoStations(usize),
}

/// Shorthand result type for `ts-core`.
pub type CoreResult<T> = Result<T, CoreError>;

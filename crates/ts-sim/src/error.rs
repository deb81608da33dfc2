use thiserror::Error;
use ts_core::{CoreError, TrainId};
use ts_output::OutputError;
use ts_track::TrackError;

// Variants that wrap another error leave it out of their own message; it
// is reported once, as the `source()`.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid scenario")]
    Scenario(#[from] CoreError),

    #[error("cannot build the track registry")]
    Registry(#[from] TrackError),

    #[error("could not start worker for train {train}")]
    Spawn {
        train:  TrainId,
        #[source]
        source: std::io::Error,
    },

    #[error("worker for train {0} panicked")]
    WorkerPanicked(TrainId),

    #[error("output error")]
    Output(#[from] OutputError),
}

pub type SimResult<T> = Result<T, SimError>;

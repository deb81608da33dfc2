//! The `Simulation` orchestrator.

use std::thread::{self, ScopedJoinHandle};

use tracing::{info, warn};
use ts_core::{Scenario, TrainId};
use ts_output::RecordSink;
use ts_sync::{ShrinkingBarrier, StartGate};
use ts_track::TrackRegistry;

use crate::runner::{TrainReport, TrainRunner};
use crate::{SimConfig, SimError, SimResult};

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Per-train results of a completed run, in train order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimReport {
    trains: Vec<TrainReport>,
}

impl SimReport {
    pub fn trains(&self) -> &[TrainReport] {
        &self.trains
    }

    /// # Panics
    /// Panics if `train` was not part of the scenario.
    pub fn train(&self, train: TrainId) -> &TrainReport {
        &self.trains[train.index()]
    }

    /// Final step count of `train`.
    pub fn steps(&self, train: TrainId) -> u64 {
        self.train(train).steps
    }

    pub fn total_steps(&self) -> u64 {
        self.trains.iter().map(|t| t.steps).sum()
    }

    /// Rounds until the last train finished: the largest step count.
    pub fn rounds(&self) -> u64 {
        self.trains.iter().map(|t| t.steps).max().unwrap_or(0)
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// Owns the scenario and the track registry and runs one OS thread per train.
///
/// The registry is allocated when the simulation is built, and the barrier
/// and start gate at the top of every [`run`][Self::run], so all shared
/// state exists before the first worker is spawned.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    pub(crate) config:   SimConfig,
    pub(crate) scenario: Scenario,
    pub(crate) registry: TrackRegistry,
}

impl Simulation {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The shared track registry.  Segments held through this handle while
    /// a run is in progress are seen as taken by every train.
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// Run every train to the end of its route.
    ///
    /// Blocks until all workers have joined, then finishes `sink`.  A train
    /// that can never win its segment never finishes, and neither does this
    /// call.
    pub fn run<S: RecordSink + ?Sized>(&self, sink: &S) -> SimResult<SimReport> {
        let train_count = self.scenario.train_count();
        info!(
            trains   = train_count,
            stations = self.scenario.station_count(),
            policy   = ?self.config.release_policy,
            "starting simulation"
        );

        let barrier = ShrinkingBarrier::new(train_count);
        let gate = StartGate::new();

        let reports = thread::scope(|scope| {
            let mut handles: Vec<(TrainId, ScopedJoinHandle<'_, TrainReport>)> =
                Vec::with_capacity(train_count);
            let mut spawn_error = None;

            for (train, route) in self.scenario.trains() {
                let runner = TrainRunner {
                    train,
                    route,
                    registry: &self.registry,
                    barrier:  &barrier,
                    gate:     &gate,
                    sink,
                    policy:   self.config.release_policy,
                };
                let spawned = thread::Builder::new()
                    .name(format!("train-{train}"))
                    .spawn_scoped(scope, move || runner.run());
                match spawned {
                    Ok(handle) => handles.push((train, handle)),
                    Err(source) => {
                        spawn_error = Some(SimError::Spawn { train, source });
                        break;
                    }
                }
            }

            // Trains that never got a thread must not hold up the others.
            if spawn_error.is_some() {
                let missing = train_count - handles.len();
                warn!(missing, "running without unspawned trains");
                for _ in 0..missing {
                    barrier.deregister();
                }
            }

            gate.open();
            let joined = join_all(handles);
            match spawn_error {
                Some(e) => Err(e),
                None    => joined,
            }
        })?;

        sink.finish()?;
        let report = SimReport { trains: reports };
        info!(rounds = report.rounds(), total_steps = report.total_steps(), "simulation complete");
        Ok(report)
    }
}

/// Join every worker, even after one has failed, and report the first
/// panic.
fn join_all(handles: Vec<(TrainId, ScopedJoinHandle<'_, TrainReport>)>) -> SimResult<Vec<TrainReport>> {
    let mut reports = Vec::with_capacity(handles.len());
    let mut first_panic = None;
    for (train, handle) in handles {
        match handle.join() {
            Ok(report) => reports.push(report),
            Err(_) => {
                warn!(%train, "worker panicked");
                first_panic.get_or_insert(train);
            }
        }
    }
    match first_panic {
        Some(train) => Err(SimError::WorkerPanicked(train)),
        None        => Ok(reports),
    }
}

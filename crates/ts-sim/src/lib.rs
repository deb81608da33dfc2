//! `ts-sim` — train workers and the orchestrator that runs them.
//!
//! # Lockstep round
//!
//! ```text
//! orchestrator:  TrackRegistry(n_stations), ShrinkingBarrier(n_trains), StartGate
//!                spawn one thread per train → gate.open() → join all
//!
//! worker:        gate.wait()
//!                while legs remain:
//!                  ① barrier.arrive()            # all active trains reach round k
//!                  ② registry.try_claim(leg)     # non-blocking
//!                  ③ sink.record(outcome)
//!                  ④ release (now, or after a second arrive with EndOfRound)
//!                  ⑤ steps += 1; advance only if the claim succeeded
//!                barrier.deregister()
//! ```
//!
//! Lost races are retried in the next round with no backoff.  Permanent
//! contention on one segment keeps that train (and therefore
//! [`Simulation::run`]) going forever; this is an accepted outcome, not an
//! error.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_output::PrintChannel;
//! use ts_sim::SimBuilder;
//!
//! let scenario = ts_core::parse_scenario("2 3\n3 0 1 2\n3 2 1 0\n")?;
//! let report = SimBuilder::new(scenario).build()?.run(&PrintChannel::stdout())?;
//! assert_eq!(report.rounds(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod runner;
pub mod sim;


pub use builder::SimBuilder;
pub use config::{ReleasePolicy, SimConfig};
pub use error::{SimError, SimResult};
pub use runner::TrainReport;
pub use sim::{SimReport, Simulation};

//! `ts-core` — foundational types for the train lockstep simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no
//! `ts-*` dependencies and a single external one (`thiserror`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `TrainId`, `StationId`                                 |
//! | [`round`]    | `Round` (barrier generation counter)                   |
//! | [`route`]    | `Leg`, `Route`                                         |
//! | [`scenario`] | `Scenario` (validated station count + routes)          |
//! | [`loader`]   | `load_scenario_path`, `load_scenario_reader`, `parse_scenario` |
//! | [`error`]    | `CoreError`, `CoreResult`                              |

pub mod error;
pub mod ids;
pub mod loader;
pub mod round;
pub mod route;
pub mod scenario;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{StationId, TrainId};
pub use loader::{load_scenario_path, load_scenario_reader, parse_scenario};
pub use round::Round;
pub use route::{Leg, Route};
pub use scenario::Scenario;

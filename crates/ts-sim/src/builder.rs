//! Fluent builder for constructing a [`Simulation`].

use ts_core::{Route, Scenario};
use ts_track::TrackRegistry;

use crate::{ReleasePolicy, SimConfig, SimResult, Simulation};

enum Input {
    Scenario(Scenario),
    Raw { station_count: usize, routes: Vec<Route> },
}

/// Fluent builder for [`Simulation`].
///
/// # Inputs
///
/// Either an already-validated [`Scenario`] ([`SimBuilder::new`]) or a raw
/// station count plus routes ([`SimBuilder::from_routes`]), validated in
/// [`build`][Self::build].
///
/// | Method                 | Default                      |
/// |------------------------|------------------------------|
/// | `.config(c)`           | `SimConfig::default()`       |
/// | `.release_policy(p)`   | `ReleasePolicy::Immediate`   |
///
/// # Example
///
/// ```rust,ignore
/// let scenario = ts_core::load_scenario_path(path)?;
/// let sim = SimBuilder::new(scenario)
///     .release_policy(ReleasePolicy::EndOfRound)
///     .build()?;
/// let report = sim.run(&PrintChannel::stdout())?;
/// ```
pub struct SimBuilder {
    input:  Input,
    config: SimConfig,
}

impl SimBuilder {
    pub fn new(scenario: Scenario) -> Self {
        Self { input: Input::Scenario(scenario), config: SimConfig::default() }
    }

    /// Start from unvalidated routes.
    pub fn from_routes(station_count: usize, routes: Vec<Route>) -> Self {
        Self {
            input:  Input::Raw { station_count, routes },
            config: SimConfig::default(),
        }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.config.release_policy = policy;
        self
    }

    /// Validate the routes and allocate the track registry.
    ///
    /// Fails before any worker exists if the network is too large to
    /// allocate.
    pub fn build(self) -> SimResult<Simulation> {
        let scenario = match self.input {
            Input::Scenario(s) => s,
            Input::Raw { station_count, routes } => Scenario::new(station_count, routes)?,
        };
        let registry = TrackRegistry::new(scenario.station_count())?;

        Ok(Simulation {
            config: self.config,
            scenario,
            registry,
        })
    }
}

//! A validated simulation input: the station count plus one route per train.

use crate::{CoreError, CoreResult, Route, StationId, TrainId};

/// Station network size and the route of every train.
///
/// Construction validates every route against the network, so downstream
/// crates can index the track registry without bounds checks failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    station_count: usize,
    routes:        Vec<Route>,
}

impl Scenario {
    /// Build a scenario, rejecting routes that are empty, leave the network,
    /// or contain a leg from a station to itself.
    pub fn new(station_count: usize, routes: Vec<Route>) -> CoreResult<Self> {
        if station_count == 0 && !routes.is_empty() {
            return Err(CoreError::NoStations(routes.len()));
        }

        for (i, route) in routes.iter().enumerate() {
            let train = TrainId(i as u32);
            if route.is_empty() {
                return Err(CoreError::EmptyRoute(train));
            }
            if let Some(&station) = route.stations().iter().find(|s| s.index() >= station_count) {
                return Err(CoreError::StationOutOfRange { train, station, station_count });
            }
            if let Some((leg, l)) = route.legs().enumerate().find(|(_, l)| l.is_self_loop()) {
                return Err(CoreError::SelfLoop { train, leg, station: l.from });
            }
        }

        Ok(Self { station_count, routes })
    }

    pub fn station_count(&self) -> usize {
        self.station_count
    }

    pub fn train_count(&self) -> usize {
        self.routes.len()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route of `train`.
    ///
    /// # Panics
    /// Panics if `train` is not in `0..train_count()`.
    pub fn route(&self, train: TrainId) -> &Route {
        &self.routes[train.index()]
    }

    /// `(TrainId, &Route)` pairs in train order.
    pub fn trains(&self) -> impl Iterator<Item = (TrainId, &Route)> + '_ {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, r)| (TrainId(i as u32), r))
    }

    /// Every station the scenario can address.
    pub fn stations(&self) -> impl Iterator<Item = StationId> {
        (0..self.station_count as u32).map(StationId)
    }
}

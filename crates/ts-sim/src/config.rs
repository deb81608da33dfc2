//! Run-time knobs for a simulation.

/// When a train that won its segment gives it back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReleasePolicy {
    /// Release right after the crossing attempt is logged.  The segment is
    /// only contended at the instant of the attempt, so two trains that want
    /// the same segment in the same round may both get through if one
    /// finishes before the other tries.
    #[default]
    Immediate,

    /// Hold the segment until every active train has made its attempt for
    /// the round, then release.  At most one train crosses a given segment
    /// per round.  Costs one extra barrier rendezvous per round.
    EndOfRound,
}

/// Simulation configuration.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    pub release_policy: ReleasePolicy,
}

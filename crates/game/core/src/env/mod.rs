//! Read-only inputs the engine consults while resolving.
//!
//! [`ArenaEnv`] bundles the roster, the injected random source, and the
//! tunables so resolution stays a pure function of its arguments.
mod rng;
mod roster;

pub use rng::{Dice, PcgRng, RngOracle, RollContext, compute_seed};
pub use roster::{
    CharacterDef, Lineage, PassiveDef, PassiveEffect, Role, Roster, RosterOracle,
};

use crate::config::ArenaConfig;

/// Everything static the engine needs besides the match state.
#[derive(Clone, Copy)]
pub struct ArenaEnv<'a> {
    pub roster: &'a dyn RosterOracle,
    pub rng: &'a dyn RngOracle,
    pub config: &'a ArenaConfig,
}

impl<'a> ArenaEnv<'a> {
    pub fn new(
        roster: &'a dyn RosterOracle,
        rng: &'a dyn RngOracle,
        config: &'a ArenaConfig,
    ) -> Self {
        Self {
            roster,
            rng,
            config,
        }
    }
}

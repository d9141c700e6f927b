//! Authoritative match state representation.
//!
//! A [`MatchState`] is created once per match and afterwards only replaced
//! wholesale by the turn resolver. Collaborators store it opaquely and hand
//! it back unmodified.
pub mod types;
mod usage;

pub use types::{
    ActiveStatus, CharacterId, CombatantId, CombatantState, EnergyColor, EnergyPool,
    PassiveMarker, PlayerState, SkillId, StatusDuration, StatusKind, StatusList, StatusTag, Team,
    TeamSide,
};
pub use usage::{SkillUsageLedger, UsageRecord};

use crate::economy;

/// Lifecycle of a match within one turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Planning,
    Locked,
    Resolution,
    Cleanup,
    Finished,
}

/// Terminal result of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    Side(TeamSide),
    Draw,
}

/// Canonical snapshot of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    /// Seed for every random draw in the match. Set once, never modified.
    pub seed: u64,
    pub player_a: PlayerState,
    pub player_b: PlayerState,
    /// 1-based turn counter.
    pub turn: u32,
    pub phase: Phase,
    pub winner: Option<Winner>,
    pub skill_usage: SkillUsageLedger,
}

impl MatchState {
    pub fn new(seed: u64, player_a: PlayerState, player_b: PlayerState) -> Self {
        Self {
            seed,
            player_a,
            player_b,
            turn: 1,
            phase: Phase::Planning,
            winner: None,
            skill_usage: SkillUsageLedger::default(),
        }
    }

    pub fn player(&self, side: TeamSide) -> &PlayerState {
        match side {
            TeamSide::A => &self.player_a,
            TeamSide::B => &self.player_b,
        }
    }

    pub fn player_mut(&mut self, side: TeamSide) -> &mut PlayerState {
        match side {
            TeamSide::A => &mut self.player_a,
            TeamSide::B => &mut self.player_b,
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.player(id.side).combatant(id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        self.player_mut(id.side).combatant_mut(id)
    }

    /// Every combatant, team A first, in positional order.
    pub fn combatants(&self) -> impl Iterator<Item = &CombatantState> + '_ {
        self.player_a.team.iter().chain(self.player_b.team.iter())
    }

    pub fn combatant_ids(&self) -> Vec<CombatantId> {
        self.combatants().map(|c| c.id).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Energy pool of `observed` as seen by `viewer`.
    ///
    /// Opponent pools are hidden unless a living viewer combatant carries the
    /// reveal marker.
    pub fn visible_pool(&self, viewer: TeamSide, observed: TeamSide) -> Option<EnergyPool> {
        let revealed = viewer == observed
            || self
                .player(viewer)
                .living()
                .any(|c| c.has_marker(&PassiveMarker::RevealEnergy));
        revealed.then(|| economy::team_pool(self.player(observed)))
    }

    /// SHA-256 commitment over the bincode encoding of the whole state.
    ///
    /// Two replays of the same match agree on this root after every turn.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

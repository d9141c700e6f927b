use arrayvec::ArrayVec;

use crate::config::ArenaConfig;
use crate::state::{CombatantId, CombatantState, EnergyColor, TeamSide};

/// Fixed-capacity team. Order is positional and drives adjacency.
pub type Team = ArrayVec<CombatantState, { ArenaConfig::TEAM_SIZE }>;

/// One side of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    /// Opaque account reference supplied by the caller.
    pub player_id: String,
    pub side: TeamSide,
    pub team: Team,
    /// Colors queued for sacrifice during planning.
    pub pending_burn: Vec<EnergyColor>,
    /// Banked colored energies added to the next grant.
    pub next_turn_extra_energy: u32,
}

impl PlayerState {
    pub fn new(player_id: impl Into<String>, side: TeamSide, team: Team) -> Self {
        Self {
            player_id: player_id.into(),
            side,
            team,
            pending_burn: Vec::new(),
            next_turn_extra_energy: 0,
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        if id.side != self.side {
            return None;
        }
        self.team.get(id.index())
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        if id.side != self.side {
            return None;
        }
        self.team.get_mut(id.index())
    }

    pub fn living(&self) -> impl Iterator<Item = &CombatantState> + '_ {
        self.team.iter().filter(|c| c.alive)
    }

    pub fn living_ids(&self) -> Vec<CombatantId> {
        self.living().map(|c| c.id).collect()
    }

    /// First living combatant. Receives granted energy.
    pub fn leader_mut(&mut self) -> Option<&mut CombatantState> {
        self.team.iter_mut().find(|c| c.alive)
    }

    pub fn is_eliminated(&self) -> bool {
        self.living().next().is_none()
    }

    /// Replaces the sacrifice queue for the coming resolution.
    pub fn queue_burn(&mut self, colors: impl IntoIterator<Item = EnergyColor>) {
        self.pending_burn = colors.into_iter().collect();
    }
}

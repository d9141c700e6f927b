//! Effect execution context.

use std::collections::BTreeSet;

use crate::action::EffectEntry;
use crate::env::{ArenaEnv, Dice};
use crate::skill::Skill;
use crate::state::{CombatantId, CombatantState, MatchState};

/// Combatants whose remaining actions this turn are cancelled.
pub type CancelledSet = BTreeSet<CombatantId>;

// ============================================================================
// Effect Context
// ============================================================================

/// Everything one action's effects read and write.
pub struct EffectContext<'a, 'r> {
    pub caster: CombatantId,

    /// Submitted target, if it names an existing combatant.
    pub target: Option<CombatantId>,

    pub skill: &'a Skill,

    pub state: &'a mut MatchState,

    pub env: &'a ArenaEnv<'r>,

    pub dice: &'a mut Dice<'r>,

    /// Shared across the whole turn; stuns, silences, and banishes add to it.
    pub cancelled: &'a mut CancelledSet,

    /// Observable entries produced so far.
    pub effects: Vec<EffectEntry>,
}

impl<'a, 'r> EffectContext<'a, 'r> {
    pub fn new(
        caster: CombatantId,
        target: Option<CombatantId>,
        skill: &'a Skill,
        state: &'a mut MatchState,
        env: &'a ArenaEnv<'r>,
        dice: &'a mut Dice<'r>,
        cancelled: &'a mut CancelledSet,
    ) -> Self {
        Self {
            caster,
            target,
            skill,
            state,
            env,
            dice,
            cancelled,
            effects: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: EffectEntry) {
        self.effects.push(entry);
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.state.combatant(id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        self.state.combatant_mut(id)
    }

    /// The target, provided it is still standing.
    pub fn living_target(&self) -> Option<CombatantId> {
        self.target
            .filter(|&id| self.combatant(id).is_some_and(|c| c.alive))
    }

    /// Living target, falling back to the caster.
    pub fn recipient(&self) -> CombatantId {
        self.living_target().unwrap_or(self.caster)
    }

    /// Living members of the caster's own team.
    pub fn living_allies(&self) -> Vec<CombatantId> {
        self.state.player(self.caster.side).living_ids()
    }

    /// Living members of the opposing team.
    pub fn living_enemies(&self) -> Vec<CombatantId> {
        self.state.player(self.caster.side.opponent()).living_ids()
    }
}

//! Static skill definitions.
//!
//! Skills are roster data: an energy cost, a wave category, a damage nature,
//! an optional reach, and an ordered list of [`EffectKind`] descriptors that
//! the effect pipeline executes.
mod effect;
mod phase;

pub use effect::{BonusCondition, BonusDamage, DamageSpec, EffectKind, ShieldSpec, StatusSpec};
pub use phase::ExecutionPhase;

use strum::{EnumIter, EnumString};

use crate::state::{EnergyColor, EnergyPool, SkillId};

/// Priority wave a skill resolves in. Waves run in declaration order.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum WaveCategory {
    Passive,
    Inst,
    Ctrl,
    #[default]
    Act,
    Afl,
}

impl WaveCategory {
    pub const ORDER: [WaveCategory; 5] = [
        WaveCategory::Passive,
        WaveCategory::Inst,
        WaveCategory::Ctrl,
        WaveCategory::Act,
        WaveCategory::Afl,
    ];
}

/// Damage type used by silences, counters, boosts, and passive triggers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum DamageNature {
    /// Kinetic.
    Knt,
    /// Volt.
    Vlt,
    /// Corrosive.
    Crs,
}

/// Targeting reach. The engine trusts submitted targets; reach only guides
/// submission layers and the default AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillReach {
    Melee,
    Ranged,
    Single,
    #[strum(serialize = "Self")]
    SelfOnly,
    SelfAdjacent,
    Ally,
    Global,
    GlobalAlly,
    GlobalEnemy,
    Linear,
    Unique,
    RandomEnemy,
    Enemy,
    DeadAlly,
    TwoEnemies,
}

impl SkillReach {
    /// Reaches whose nominal target is on the caster's own team.
    pub const fn targets_allies(self) -> bool {
        matches!(
            self,
            Self::SelfOnly | Self::SelfAdjacent | Self::Ally | Self::GlobalAlly | Self::DeadAlly
        )
    }

    pub const fn targets_dead(self) -> bool {
        matches!(self, Self::DeadAlly)
    }
}

/// A castable skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: EnergyPool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: WaveCategory,
    pub nature: DamageNature,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reach: Option<SkillReach>,
    /// Maximum casts per match by one combatant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub usage_limit: Option<u32>,
    /// Hit points the caster pays on top of the energy cost.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectKind>,
}

impl Skill {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: WaveCategory,
        nature: DamageNature,
    ) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.into(),
            cost: EnergyPool::EMPTY,
            category,
            nature,
            reach: None,
            usage_limit: None,
            hp_cost: 0,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, color: EnergyColor, amount: u32) -> Self {
        self.cost.add(color, amount);
        self
    }

    #[must_use]
    pub fn with_reach(mut self, reach: SkillReach) -> Self {
        self.reach = Some(reach);
        self
    }

    #[must_use]
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectKind) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn costs(&self, color: EnergyColor) -> bool {
        self.cost.get(color) > 0
    }

    /// True when any descriptor hits the enemy team.
    pub fn is_offensive(&self) -> bool {
        self.effects.iter().any(EffectKind::is_offensive)
    }

    /// Effects ordered for execution: by phase, declaration order within a phase.
    pub fn ordered_effects(&self) -> Vec<&EffectKind> {
        let mut effects: Vec<&EffectKind> = self.effects.iter().collect();
        effects.sort_by_key(|e| e.phase());
        effects
    }
}

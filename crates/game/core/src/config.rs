use crate::state::EnergyColor;

/// Arena configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    /// Colored energies drawn for each team at the start of every turn.
    pub colored_per_turn: u32,

    /// White energies granted on even turns.
    pub white_per_even_turn: u32,

    /// Team-wide White ceiling. Even-turn grants stop once the team holds this many.
    pub max_team_white: u32,

    /// Draw weight every colored energy starts with.
    pub base_color_weight: u32,

    /// Extra weight a living combatant adds to its lineage color.
    pub lineage_weight_bonus: u32,

    /// Extra Green weight a living support combatant adds.
    pub support_weight_bonus: u32,

    /// Banked energies granted per sacrificed pair.
    pub burn_reward_per_pair: u32,

    /// Evasion chance (percent) used when a passive omits its own.
    pub default_evasion_percent: u32,

    /// Damage-over-time value used when a proc passive omits its own.
    pub default_proc_dot: u32,

    /// Banked energies per pair used when a recycling passive omits its own.
    pub default_recycling_reward: u32,
}

impl ArenaConfig {
    // ===== compile-time constants used as type parameters =====
    /// Combatants per team.
    pub const TEAM_SIZE: usize = 3;
    /// Status entries a single combatant is expected to carry at most.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COLORED_PER_TURN: u32 = 3;
    pub const DEFAULT_WHITE_PER_EVEN_TURN: u32 = 1;
    pub const DEFAULT_MAX_TEAM_WHITE: u32 = 5;
    pub const DEFAULT_BASE_COLOR_WEIGHT: u32 = 1;
    pub const DEFAULT_LINEAGE_WEIGHT_BONUS: u32 = 2;
    pub const DEFAULT_SUPPORT_WEIGHT_BONUS: u32 = 1;
    pub const DEFAULT_BURN_REWARD_PER_PAIR: u32 = 1;
    pub const DEFAULT_EVASION_PERCENT: u32 = 20;
    pub const DEFAULT_PROC_DOT: u32 = 5;
    pub const DEFAULT_RECYCLING_REWARD: u32 = 2;

    pub fn new() -> Self {
        Self {
            colored_per_turn: Self::DEFAULT_COLORED_PER_TURN,
            white_per_even_turn: Self::DEFAULT_WHITE_PER_EVEN_TURN,
            max_team_white: Self::DEFAULT_MAX_TEAM_WHITE,
            base_color_weight: Self::DEFAULT_BASE_COLOR_WEIGHT,
            lineage_weight_bonus: Self::DEFAULT_LINEAGE_WEIGHT_BONUS,
            support_weight_bonus: Self::DEFAULT_SUPPORT_WEIGHT_BONUS,
            burn_reward_per_pair: Self::DEFAULT_BURN_REWARD_PER_PAIR,
            default_evasion_percent: Self::DEFAULT_EVASION_PERCENT,
            default_proc_dot: Self::DEFAULT_PROC_DOT,
            default_recycling_reward: Self::DEFAULT_RECYCLING_REWARD,
        }
    }

    /// Base draw weight for a color before lineage and role bonuses.
    ///
    /// White never comes out of the weighted draw.
    pub fn base_weight(&self, color: EnergyColor) -> u32 {
        if color.is_wildcard() {
            0
        } else {
            self.base_color_weight
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

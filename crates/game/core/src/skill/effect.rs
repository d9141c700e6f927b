//! Effect descriptors.
//!
//! Each skill carries a list of tagged descriptors instead of a bag of
//! optional fields. The pipeline dispatches on them with an exhaustive match,
//! so a new effect kind cannot be added without handling it.

use crate::skill::{DamageNature, ExecutionPhase};
use crate::state::{EnergyColor, StatusKind, StatusTag};

/// Condition gating a bonus on the primary hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusCondition {
    TargetHasArmor,
    /// Target carries a DoT or Bleeding status.
    TargetIsBleeding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusDamage {
    pub condition: BonusCondition,
    pub value: u32,
}

/// Primary hit with its modifiers and secondary damage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageSpec {
    pub base: u32,
    pub bonus: Option<BonusDamage>,
    /// Added when the caster is in Stealth.
    pub stealth_bonus: u32,
    /// Share of post-mitigation damage returned to the caster as healing.
    pub lifesteal_percent: u32,
    /// Flat damage to the target's positional neighbours.
    pub splash: u32,
}

impl DamageSpec {
    pub fn flat(base: u32) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShieldSpec {
    pub amount: u32,
    /// Energy color granted to the holder when this shield breaks.
    pub break_reward: Option<EnergyColor>,
    /// Turns the break reward stays armed.
    pub break_window: Option<u32>,
}

/// A status to attach, as written in roster data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSpec {
    pub kind: StatusKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_turns"))]
    pub duration: u32,
}

#[cfg(feature = "serde")]
fn default_turns() -> u32 {
    1
}

impl StatusSpec {
    pub fn new(kind: StatusKind, value: u32, duration: u32) -> Self {
        Self {
            kind,
            value,
            duration,
        }
    }
}

/// One effect primitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Caster loses hit points before the hit lands.
    SelfDamage { amount: u32 },
    Damage(DamageSpec),
    Heal { amount: u32 },
    /// Shield on the target, or on the caster when there is no target.
    Shield(ShieldSpec),
    /// Attach statuses to the target (or caster). Armor statuses also raise armor.
    ApplyStatuses(Vec<StatusSpec>),
    Dot { value: u32, duration: u32 },
    /// Heal over time. Global-ally skills cover the whole living team.
    Hot { value: u32, duration: u32 },
    Debuff(StatusSpec),
    /// Remove statuses by type. Removing Affliction also clears DoTs.
    RemoveStatuses(Vec<StatusTag>),
    /// Cancel the target for the rest of the turn. `self_turns > 0` also stuns the caster.
    Stun { turns: u32, self_turns: u32 },
    Vulnerability { value: u32, duration: u32 },
    StripArmorShield,
    /// Arm a counter on the caster.
    Counter {
        damage: u32,
        filter: Option<DamageNature>,
        duration: u32,
    },
    Summon {
        name: String,
        damage: u32,
        duration: u32,
    },
    /// Move the caster's whole reserve of one color into another.
    ConvertEnergy { from: EnergyColor, to: EnergyColor },
    SkillBoost { nature: DamageNature, value: u32 },
    Silence { nature: DamageNature, duration: u32 },
    DisableEnergy { color: EnergyColor, duration: u32 },
    /// Move up to `limit` hit points toward equalizing caster and target.
    HpSwap { limit: u32 },
    ReflectDebuff { duration: u32 },
    ExtraAction { count: u32 },
    Revive { hp: u32 },
    /// Hit every living enemy for `per_stack` times its DoT count.
    DamagePerDot { per_stack: u32 },
    /// Bind the target and another living enemy; each mirrors `percent` of hits.
    DamageLink { percent: u32, duration: u32 },
    Banish { turns: u32 },
    StripEnergy,
    InvertPriority,
}

impl EffectKind {
    pub const fn phase(&self) -> ExecutionPhase {
        match self {
            Self::SelfDamage { .. } => ExecutionPhase::PreEffect,
            Self::Damage(_) => ExecutionPhase::Primary,
            Self::InvertPriority => ExecutionPhase::Finalize,
            _ => ExecutionPhase::PostEffect,
        }
    }

    /// True for primitives aimed at the enemy team.
    pub const fn is_offensive(&self) -> bool {
        matches!(
            self,
            Self::Damage(_)
                | Self::Dot { .. }
                | Self::Debuff(_)
                | Self::Stun { .. }
                | Self::Vulnerability { .. }
                | Self::StripArmorShield
                | Self::Silence { .. }
                | Self::DisableEnergy { .. }
                | Self::DamagePerDot { .. }
                | Self::DamageLink { .. }
                | Self::Banish { .. }
                | Self::StripEnergy
        )
    }

    /// Short name used in traces.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SelfDamage { .. } => "self_damage",
            Self::Damage(_) => "damage",
            Self::Heal { .. } => "heal",
            Self::Shield(_) => "shield",
            Self::ApplyStatuses(_) => "status",
            Self::Dot { .. } => "dot",
            Self::Hot { .. } => "hot",
            Self::Debuff(_) => "debuff",
            Self::RemoveStatuses(_) => "remove_status",
            Self::Stun { .. } => "stun",
            Self::Vulnerability { .. } => "vulnerability",
            Self::StripArmorShield => "strip_armor_shield",
            Self::Counter { .. } => "counter",
            Self::Summon { .. } => "summon",
            Self::ConvertEnergy { .. } => "energy_convert",
            Self::SkillBoost { .. } => "skill_boost",
            Self::Silence { .. } => "silence",
            Self::DisableEnergy { .. } => "disable_energy",
            Self::HpSwap { .. } => "hp_swap",
            Self::ReflectDebuff { .. } => "reflect_debuff",
            Self::ExtraAction { .. } => "extra_action",
            Self::Revive { .. } => "revive",
            Self::DamagePerDot { .. } => "damage_per_dot",
            Self::DamageLink { .. } => "damage_link",
            Self::Banish { .. } => "banish",
            Self::StripEnergy => "strip_energy",
            Self::InvertPriority => "invert_priority",
        }
    }
}

//! Action inputs and the observable result shape.
//!
//! [`TurnLogEntry`] is the wire format broadcast to clients and persisted for
//! replay.

use crate::skill::WaveCategory;
use crate::state::{CombatantId, SkillId};

// ============================================================================
// Input
// ============================================================================

/// One queued skill use. The only per-turn input besides burn selections.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchAction {
    pub caster: CombatantId,
    pub skill: SkillId,
    pub target: CombatantId,
}

impl MatchAction {
    pub fn new(caster: CombatantId, skill: impl Into<SkillId>, target: CombatantId) -> Self {
        Self {
            caster,
            skill: skill.into(),
            target,
        }
    }
}

// ============================================================================
// Effect Entries
// ============================================================================

/// Observable category of an effect entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EffectEntryKind {
    Damage,
    Heal,
    Shield,
    StatusApply,
    StatusRemove,
    EnergyChange,
    Cancel,
}

/// A single observable consequence of an action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectEntry {
    pub kind: EffectEntryKind,
    pub target: CombatantId,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub detail: Option<String>,
}

impl EffectEntry {
    pub fn new(kind: EffectEntryKind, target: CombatantId) -> Self {
        Self {
            kind,
            target,
            value: None,
            detail: None,
        }
    }

    pub fn damage(target: CombatantId, value: u32) -> Self {
        Self::new(EffectEntryKind::Damage, target).with_value(value)
    }

    pub fn heal(target: CombatantId, value: u32) -> Self {
        Self::new(EffectEntryKind::Heal, target).with_value(value)
    }

    pub fn shield(target: CombatantId, value: u32) -> Self {
        Self::new(EffectEntryKind::Shield, target).with_value(value)
    }

    pub fn status_apply(target: CombatantId, detail: impl Into<String>) -> Self {
        Self::new(EffectEntryKind::StatusApply, target).with_detail(detail)
    }

    pub fn status_remove(target: CombatantId, detail: impl Into<String>) -> Self {
        Self::new(EffectEntryKind::StatusRemove, target).with_detail(detail)
    }

    pub fn energy_change(target: CombatantId, detail: impl Into<String>) -> Self {
        Self::new(EffectEntryKind::EnergyChange, target).with_detail(detail)
    }

    pub fn cancel(target: CombatantId, detail: impl Into<String>) -> Self {
        Self::new(EffectEntryKind::Cancel, target).with_detail(detail)
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ============================================================================
// Results
// ============================================================================

/// Why an action was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CancelReason {
    /// Stunned or silenced earlier this turn.
    Cancelled,
    Banished,
    Silenced,
    UsageCap,
}

/// Outcome of one action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cancelled: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub reason: Option<CancelReason>,
    pub effects: Vec<EffectEntry>,
}

impl ActionResult {
    pub fn succeeded(effects: Vec<EffectEntry>) -> Self {
        Self {
            success: true,
            cancelled: false,
            reason: None,
            effects,
        }
    }

    /// Unresolvable reference: unsuccessful, no effects.
    pub fn failed() -> Self {
        Self::default()
    }

    pub fn cancelled(reason: CancelReason) -> Self {
        Self {
            success: false,
            cancelled: true,
            reason: Some(reason),
            effects: Vec::new(),
        }
    }
}

/// One line of the combat log.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnLogEntry {
    pub wave: WaveCategory,
    pub caster: CombatantId,
    /// Skill name or outcome label such as `CANCELLED`.
    pub skill_name: String,
    pub result: ActionResult,
}

impl TurnLogEntry {
    pub fn new(
        wave: WaveCategory,
        caster: CombatantId,
        skill_name: impl Into<String>,
        result: ActionResult,
    ) -> Self {
        Self {
            wave,
            caster,
            skill_name: skill_name.into(),
            result,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.result.cancelled
    }
}

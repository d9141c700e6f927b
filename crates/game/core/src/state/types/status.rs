//! Status bookkeeping for combatants.
//!
//! A status is a typed tag with an optional magnitude, a remaining duration in
//! turns, and an optional source combatant. Reactive passives are represented
//! as permanent [`PassiveMarker`] statuses so the effect pipeline and energy
//! economy can query them the same way they query ordinary statuses.
//!
//! # Duration
//!
//! Durations count down once per turn during cleanup. A status whose counter
//! reaches zero is dropped. [`StatusDuration::Permanent`] never decays and
//! survives death.

use std::fmt;

use crate::skill::DamageNature;
use crate::state::{CombatantId, EnergyColor};

/// Remaining lifetime of a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusDuration {
    Turns(u32),
    Permanent,
}

impl StatusDuration {
    #[inline]
    pub const fn is_permanent(self) -> bool {
        matches!(self, Self::Permanent)
    }

    /// Remaining turns, `None` for permanent statuses.
    pub const fn remaining(self) -> Option<u32> {
        match self {
            Self::Turns(n) => Some(n),
            Self::Permanent => None,
        }
    }

    /// Counts one turn down. Returns false once the status has expired.
    fn decay(&mut self) -> bool {
        match self {
            Self::Permanent => true,
            Self::Turns(n) => {
                *n = n.saturating_sub(1);
                *n > 0
            }
        }
    }
}

/// Reactive passive flags applied at the passive wave.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveMarker {
    /// Gain `shield` whenever a cast skill's cost includes `color`.
    ShieldOnColor { color: EnergyColor, shield: u32 },
    /// Holder gains energy when an ally falls.
    OnAllyDeath,
    /// Flat chance to dodge incoming primary hits.
    Evasion { percent: u32 },
    IgnoreSentinel,
    RevealEnergy,
    /// Skills of `nature` leave a damage-over-time on their target.
    ProcDot { nature: DamageNature, value: u32 },
    /// Burned pairs bank `reward` energies instead of the default.
    RecyclingBonus { reward: u32 },
    /// One-shot guard: the holder already reacted to this ally's death.
    AllyDeathObserved(CombatantId),
}

/// Every status the engine knows about.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    Dot,
    Hot,
    Stunned,
    Banished,
    Silenced { nature: DamageNature },
    /// Reflects the status value back at the next matching attacker.
    Counter { filter: Option<DamageNature> },
    /// Deals the status value to the nearest enemy at end of turn.
    Summon { name: String },
    Vulnerable,
    DamageReduction,
    /// Consumed by the next skill of `nature` for bonus damage.
    SkillBoost { nature: DamageNature },
    Stealth,
    Bleeding,
    Affliction,
    Armor { unpierceable: bool },
    /// Mirrors a share (value, percent) of incoming damage onto `partner`.
    DamageLink { partner: CombatantId },
    GainEnergyOnBreak { color: EnergyColor },
    EnergyDisabled { color: EnergyColor },
    ReflectDebuff,
    ExtraAction,
    InvertPriority,
    Marker(PassiveMarker),
    /// Designer label with no engine semantics.
    Custom(String),
}

impl StatusKind {
    pub fn tag(&self) -> StatusTag {
        match self {
            Self::Dot => StatusTag::Dot,
            Self::Hot => StatusTag::Hot,
            Self::Stunned => StatusTag::Stunned,
            Self::Banished => StatusTag::Banished,
            Self::Silenced { .. } => StatusTag::Silenced,
            Self::Counter { .. } => StatusTag::Counter,
            Self::Summon { .. } => StatusTag::Summon,
            Self::Vulnerable => StatusTag::Vulnerable,
            Self::DamageReduction => StatusTag::DamageReduction,
            Self::SkillBoost { .. } => StatusTag::SkillBoost,
            Self::Stealth => StatusTag::Stealth,
            Self::Bleeding => StatusTag::Bleeding,
            Self::Affliction => StatusTag::Affliction,
            Self::Armor { .. } => StatusTag::Armor,
            Self::DamageLink { .. } => StatusTag::DamageLink,
            Self::GainEnergyOnBreak { .. } => StatusTag::GainEnergyOnBreak,
            Self::EnergyDisabled { .. } => StatusTag::EnergyDisabled,
            Self::ReflectDebuff => StatusTag::ReflectDebuff,
            Self::ExtraAction => StatusTag::ExtraAction,
            Self::InvertPriority => StatusTag::InvertPriority,
            Self::Marker(_) => StatusTag::Marker,
            Self::Custom(name) => StatusTag::Custom(name.clone()),
        }
    }
}

/// Payload-free status discriminant used for removal and display.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusTag {
    Dot,
    Hot,
    Stunned,
    Banished,
    Silenced,
    Counter,
    Summon,
    Vulnerable,
    DamageReduction,
    SkillBoost,
    Stealth,
    Bleeding,
    Affliction,
    Armor,
    DamageLink,
    GainEnergyOnBreak,
    EnergyDisabled,
    ReflectDebuff,
    ExtraAction,
    InvertPriority,
    Marker,
    Custom(String),
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dot => "DoT",
            Self::Hot => "HoT",
            Self::Stunned => "Stunned",
            Self::Banished => "Banished",
            Self::Silenced => "Silenced",
            Self::Counter => "Counter",
            Self::Summon => "Summon",
            Self::Vulnerable => "Vulnerable",
            Self::DamageReduction => "DamageReduction",
            Self::SkillBoost => "SkillBoost",
            Self::Stealth => "Stealth",
            Self::Bleeding => "Bleeding",
            Self::Affliction => "Affliction",
            Self::Armor => "Armor",
            Self::DamageLink => "DamageLink",
            Self::GainEnergyOnBreak => "GainEnergyOnBreak",
            Self::EnergyDisabled => "EnergyDisabled",
            Self::ReflectDebuff => "ReflectDebuff",
            Self::ExtraAction => "ExtraAction",
            Self::InvertPriority => "InvertPriority",
            Self::Marker => "Marker",
            Self::Custom(name) => name.as_str(),
        };
        f.write_str(name)
    }
}

/// A status currently attached to a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub kind: StatusKind,
    pub value: u32,
    pub duration: StatusDuration,
    pub source: Option<CombatantId>,
}

impl ActiveStatus {
    pub fn new(kind: StatusKind, value: u32, turns: u32) -> Self {
        Self {
            kind,
            value,
            duration: StatusDuration::Turns(turns),
            source: None,
        }
    }

    pub fn permanent(kind: StatusKind, value: u32) -> Self {
        Self {
            kind,
            value,
            duration: StatusDuration::Permanent,
            source: None,
        }
    }

    pub fn marker(marker: PassiveMarker) -> Self {
        Self::permanent(StatusKind::Marker(marker), 0)
    }

    #[must_use]
    pub fn with_source(mut self, source: CombatantId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn tag(&self) -> StatusTag {
        self.kind.tag()
    }
}

/// Ordered list of active statuses on a combatant.
///
/// Insertion order is preserved; ticking and queries walk it front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusList {
    entries: Vec<ActiveStatus>,
}

impl StatusList {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, status: ActiveStatus) {
        self.entries.push(status);
    }

    pub fn has(&self, tag: &StatusTag) -> bool {
        self.entries.iter().any(|s| &s.tag() == tag)
    }

    pub fn count(&self, tag: &StatusTag) -> usize {
        self.entries.iter().filter(|s| &s.tag() == tag).count()
    }

    pub fn find(&self, mut pred: impl FnMut(&ActiveStatus) -> bool) -> Option<&ActiveStatus> {
        self.entries.iter().find(|s| pred(s))
    }

    /// Removes and returns the first status matching `pred`.
    pub fn take_first(
        &mut self,
        mut pred: impl FnMut(&ActiveStatus) -> bool,
    ) -> Option<ActiveStatus> {
        let index = self.entries.iter().position(|s| pred(s))?;
        Some(self.entries.remove(index))
    }

    /// Removes every status matching `pred`, returning the removed entries in order.
    pub fn remove_where(
        &mut self,
        mut pred: impl FnMut(&ActiveStatus) -> bool,
    ) -> Vec<ActiveStatus> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|s| pred(s));
        self.entries = kept;
        removed
    }

    pub fn has_marker(&self, marker: &PassiveMarker) -> bool {
        self.entries
            .iter()
            .any(|s| matches!(&s.kind, StatusKind::Marker(m) if m == marker))
    }

    /// Iterates the passive markers currently held.
    pub fn markers(&self) -> impl Iterator<Item = &PassiveMarker> + '_ {
        self.entries.iter().filter_map(|s| match &s.kind {
            StatusKind::Marker(m) => Some(m),
            _ => None,
        })
    }

    /// Adds a passive marker unless an identical one is already present.
    ///
    /// Returns true if the marker was added.
    pub fn ensure_marker(&mut self, marker: PassiveMarker) -> bool {
        if self.has_marker(&marker) {
            return false;
        }
        self.entries.push(ActiveStatus::marker(marker));
        true
    }

    /// Counts every timed status down by one turn and drops expired ones.
    pub fn decay(&mut self) {
        self.entries.retain_mut(|s| s.duration.decay());
    }

    /// Drops everything except permanent statuses.
    pub fn clear_transient(&mut self) {
        self.entries.retain(|s| s.duration.is_permanent());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

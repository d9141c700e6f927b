//! Static character definitions.

use std::collections::BTreeMap;

use strum::EnumString;

use crate::skill::{DamageNature, Skill};
use crate::state::{CharacterId, EnergyColor, EnergyPool, SkillId};

/// Character lineage. Skews the energy draw toward one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lineage {
    Iron,
    Neon,
    Void,
}

impl Lineage {
    /// Color favoured by this lineage in the weighted draw.
    pub const fn affinity(self) -> EnergyColor {
        match self {
            Self::Iron => EnergyColor::Red,
            Self::Neon => EnergyColor::Yellow,
            Self::Void => EnergyColor::Blue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Attacker,
    Defender,
    Support,
    Controller,
    Infiltrator,
}

/// One passive behaviour of a character.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveEffect {
    /// Flat armor granted on the first turn.
    Armor { value: u32, unpierceable: bool },
    ShieldOnColor { color: EnergyColor, shield: u32 },
    OnAllyDeath { gain: EnergyPool },
    /// Dodge chance in percent. `None` uses the configured default.
    Evasion { percent: Option<u32> },
    IgnoreSentinel,
    RevealEnergy,
    ProcDot { nature: DamageNature, value: Option<u32> },
    RecyclingBonus { reward: Option<u32> },
    /// On death, heal every surviving ally.
    Martyr { heal_allies: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDef {
    pub name: String,
    pub effects: Vec<PassiveEffect>,
}

/// Static definition of a playable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: String,
    pub lineage: Lineage,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roles: Vec<Role>,
    pub base_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_starter: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveDef>,
    pub skills: Vec<Skill>,
}

impl CharacterDef {
    pub fn is_support(&self) -> bool {
        self.roles.contains(&Role::Support)
    }

    pub fn passive_effects(&self) -> impl Iterator<Item = &PassiveEffect> + '_ {
        self.passive.iter().flat_map(|p| p.effects.iter())
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }
}

/// Read access to character definitions.
pub trait RosterOracle: Send + Sync {
    fn character(&self, id: &CharacterId) -> Option<&CharacterDef>;
}

/// In-memory character catalogue keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    characters: BTreeMap<CharacterId, CharacterDef>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, returning the one it replaced.
    pub fn insert(&mut self, def: CharacterDef) -> Option<CharacterDef> {
        self.characters.insert(def.id.clone(), def)
    }

    pub fn get(&self, id: &CharacterId) -> Option<&CharacterDef> {
        self.characters.get(id)
    }

    pub fn contains(&self, id: &CharacterId) -> bool {
        self.characters.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterDef> + '_ {
        self.characters.values()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn starters(&self) -> impl Iterator<Item = &CharacterDef> + '_ {
        self.iter().filter(|c| c.is_starter)
    }
}

impl FromIterator<CharacterDef> for Roster {
    fn from_iter<T: IntoIterator<Item = CharacterDef>>(iter: T) -> Self {
        let mut roster = Roster::new();
        for def in iter {
            roster.insert(def);
        }
        roster
    }
}

impl RosterOracle for Roster {
    fn character(&self, id: &CharacterId) -> Option<&CharacterDef> {
        self.get(id)
    }
}

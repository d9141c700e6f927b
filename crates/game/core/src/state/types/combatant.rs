use crate::skill::Skill;
use crate::state::{
    ActiveStatus, CharacterId, CombatantId, EnergyPool, PassiveMarker, SkillId, StatusList,
    StatusTag,
};

/// Combat-relevant state of one character in a match.
///
/// `hp` stays within `0..=max_hp`; every subtraction saturates. `alive` is
/// only flipped by the cleanup death check, so a combatant knocked to zero
/// mid-turn still finishes the turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub id: CombatantId,
    pub character: CharacterId,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    /// Flat absorption layer consumed after the shield.
    pub armor: u32,
    /// Absorbs damage before armor.
    pub shield: u32,
    pub energy: EnergyPool,
    pub statuses: StatusList,
    pub skills: Vec<Skill>,
    pub alive: bool,
}

impl CombatantState {
    pub fn new(
        id: CombatantId,
        character: CharacterId,
        name: impl Into<String>,
        max_hp: u32,
        skills: Vec<Skill>,
    ) -> Self {
        Self {
            id,
            character,
            name: name.into(),
            hp: max_hp,
            max_hp,
            armor: 0,
            shield: 0,
            energy: EnergyPool::EMPTY,
            statuses: StatusList::empty(),
            skills,
            alive: max_hp > 0,
        }
    }

    pub fn has_status(&self, tag: &StatusTag) -> bool {
        self.statuses.has(tag)
    }

    pub fn has_marker(&self, marker: &PassiveMarker) -> bool {
        self.statuses.has_marker(marker)
    }

    pub fn add_status(&mut self, status: ActiveStatus) {
        self.statuses.push(status);
    }

    /// Removes hit points, saturating at zero. Returns the amount removed.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = self.hp.min(amount);
        self.hp -= lost;
        lost
    }

    /// Restores hit points up to `max_hp`. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// True once the combatant is down, whether or not cleanup has run yet.
    pub fn is_down(&self) -> bool {
        !self.alive || self.hp == 0
    }
}

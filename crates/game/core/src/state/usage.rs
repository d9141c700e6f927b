use crate::state::{CombatantId, SkillId};

/// Casts of one skill by one combatant over the whole match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageRecord {
    pub caster: CombatantId,
    pub skill: SkillId,
    pub count: u32,
}

/// Per-match usage counters keyed by (caster, skill).
///
/// Kept as an ordered list so the serialized form is stable and map keys stay
/// representable in JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillUsageLedger {
    records: Vec<UsageRecord>,
}

impl SkillUsageLedger {
    pub fn count(&self, caster: CombatantId, skill: &SkillId) -> u32 {
        self.records
            .iter()
            .find(|r| r.caster == caster && &r.skill == skill)
            .map_or(0, |r| r.count)
    }

    /// Records one more cast and returns the new count.
    pub fn increment(&mut self, caster: CombatantId, skill: &SkillId) -> u32 {
        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.caster == caster && &r.skill == skill)
        {
            record.count += 1;
            return record.count;
        }
        self.records.push(UsageRecord {
            caster,
            skill: skill.clone(),
            count: 1,
        });
        1
    }

    pub fn iter(&self) -> impl Iterator<Item = &UsageRecord> + '_ {
        self.records.iter()
    }
}

//! Static checks over roster data.
//!
//! The engine accepts any well-formed roster, so mistakes in content only show
//! up mid-match. The audit catches the common ones up front.

use std::collections::BTreeSet;
use std::fmt;

use arena_core::{CharacterId, EffectKind, Roster, SkillId, WaveCategory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueLevel {
    Warning,
    Error,
}

/// One problem found in a character definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterIssue {
    NoSkills {
        character: CharacterId,
    },
    ZeroBaseHp {
        character: CharacterId,
    },
    DuplicateSkill {
        character: CharacterId,
        skill: SkillId,
    },
    /// A damaging skill with no energy or hit point price.
    FreeDamageSkill {
        character: CharacterId,
        skill: SkillId,
    },
    /// A usage limit of zero makes the skill uncastable.
    ZeroUsageLimit {
        character: CharacterId,
        skill: SkillId,
    },
    /// Passive-category skills never execute; their effects are dead data.
    PassiveSkillWithEffects {
        character: CharacterId,
        skill: SkillId,
    },
}

impl RosterIssue {
    pub fn level(&self) -> IssueLevel {
        match self {
            Self::NoSkills { .. } | Self::ZeroBaseHp { .. } | Self::DuplicateSkill { .. } => {
                IssueLevel::Error
            }
            Self::FreeDamageSkill { .. }
            | Self::ZeroUsageLimit { .. }
            | Self::PassiveSkillWithEffects { .. } => IssueLevel::Warning,
        }
    }

    pub fn character(&self) -> &CharacterId {
        match self {
            Self::NoSkills { character }
            | Self::ZeroBaseHp { character }
            | Self::DuplicateSkill { character, .. }
            | Self::FreeDamageSkill { character, .. }
            | Self::ZeroUsageLimit { character, .. }
            | Self::PassiveSkillWithEffects { character, .. } => character,
        }
    }
}

impl fmt::Display for RosterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSkills { character } => write!(f, "{character}: no skills"),
            Self::ZeroBaseHp { character } => write!(f, "{character}: base hp is zero"),
            Self::DuplicateSkill { character, skill } => {
                write!(f, "{character}: skill id '{skill}' appears more than once")
            }
            Self::FreeDamageSkill { character, skill } => {
                write!(f, "{character}: damaging skill '{skill}' costs nothing")
            }
            Self::ZeroUsageLimit { character, skill } => {
                write!(f, "{character}: skill '{skill}' has a usage limit of zero")
            }
            Self::PassiveSkillWithEffects { character, skill } => {
                write!(
                    f,
                    "{character}: passive-category skill '{skill}' carries effects that never run"
                )
            }
        }
    }
}

/// Lints every character in the roster. Issues come back in roster order.
pub fn audit_roster(roster: &Roster) -> Vec<RosterIssue> {
    let mut issues = Vec::new();

    for def in roster.iter() {
        let character = def.id.clone();

        if def.base_hp == 0 {
            issues.push(RosterIssue::ZeroBaseHp {
                character: character.clone(),
            });
        }
        if def.skills.is_empty() {
            issues.push(RosterIssue::NoSkills {
                character: character.clone(),
            });
        }

        let mut seen = BTreeSet::new();
        for skill in &def.skills {
            let skill_id = skill.id.clone();
            if !seen.insert(&skill.id) {
                issues.push(RosterIssue::DuplicateSkill {
                    character: character.clone(),
                    skill: skill_id.clone(),
                });
            }

            let damaging = skill.effects.iter().any(|e| {
                matches!(
                    e,
                    EffectKind::Damage(_) | EffectKind::DamagePerDot { .. }
                )
            });
            if damaging && skill.cost.total() == 0 && skill.hp_cost == 0 {
                issues.push(RosterIssue::FreeDamageSkill {
                    character: character.clone(),
                    skill: skill_id.clone(),
                });
            }

            if skill.usage_limit == Some(0) {
                issues.push(RosterIssue::ZeroUsageLimit {
                    character: character.clone(),
                    skill: skill_id.clone(),
                });
            }

            if skill.category == WaveCategory::Passive && !skill.effects.is_empty() {
                issues.push(RosterIssue::PassiveSkillWithEffects {
                    character: character.clone(),
                    skill: skill_id,
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use arena_core::{
        CharacterDef, DamageNature, DamageSpec, EnergyColor, Lineage, Skill, WaveCategory,
    };

    use super::*;

    fn character(id: &str, skills: Vec<Skill>) -> CharacterDef {
        CharacterDef {
            id: CharacterId::new(id),
            name: id.to_uppercase(),
            lineage: Lineage::Neon,
            roles: Vec::new(),
            base_hp: 80,
            is_starter: true,
            passive: None,
            skills,
        }
    }

    fn hit(id: &str) -> Skill {
        Skill::new(id, id, WaveCategory::Act, DamageNature::Vlt)
            .with_effect(EffectKind::Damage(DamageSpec::flat(10)))
    }

    #[test]
    fn clean_character_has_no_issues() {
        let roster: Roster = [character(
            "ok",
            vec![hit("zap").with_cost(EnergyColor::Yellow, 1)],
        )]
        .into_iter()
        .collect();

        assert!(audit_roster(&roster).is_empty());
    }

    #[test]
    fn flags_each_problem_once() {
        let mut broken = character(
            "broken",
            vec![
                hit("zap"),
                hit("zap").with_cost(EnergyColor::Yellow, 1),
                hit("capped").with_cost(EnergyColor::Red, 1).with_usage_limit(0),
                Skill::new("aura", "Aura", WaveCategory::Passive, DamageNature::Knt)
                    .with_effect(EffectKind::InvertPriority),
            ],
        );
        broken.base_hp = 0;
        let empty = character("empty", Vec::new());
        let roster: Roster = [broken, empty].into_iter().collect();

        let issues = audit_roster(&roster);
        let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "broken: base hp is zero",
                "broken: damaging skill 'zap' costs nothing",
                "broken: skill id 'zap' appears more than once",
                "broken: skill 'capped' has a usage limit of zero",
                "broken: passive-category skill 'aura' carries effects that never run",
                "empty: no skills",
            ]
        );
        assert_eq!(
            issues.iter().filter(|i| i.level() == IssueLevel::Error).count(),
            3
        );
    }
}

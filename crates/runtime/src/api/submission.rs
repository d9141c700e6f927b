//! Per-turn submissions and the checks they pass before reaching the engine.
//!
//! The engine trusts its inputs. Everything a client could get wrong is
//! rejected here: foreign or fallen casters, unknown skills, a second action
//! for the same caster, sacrifices the team cannot cover, and costs that
//! exceed what the team will still hold once earlier actions are paid.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use arena_core::economy::{self, spend};
use arena_core::{EnergyColor, MatchAction, MatchState, Phase, Skill, TeamSide, WaveCategory};

use super::errors::SubmissionError;

/// One side's planning input for a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub actions: Vec<MatchAction>,
    /// Colors to sacrifice. Every two bank energy for the next grant.
    #[serde(default)]
    pub burn: Vec<EnergyColor>,
}

impl Submission {
    /// A submission that does nothing. Used for timeouts.
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn new(actions: Vec<MatchAction>) -> Self {
        Self {
            actions,
            burn: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_burn(mut self, burn: impl IntoIterator<Item = EnergyColor>) -> Self {
        self.burn = burn.into_iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.burn.is_empty()
    }
}

/// Checks a submission for `side` against the current planning state.
pub fn validate_submission(
    state: &MatchState,
    side: TeamSide,
    submission: &Submission,
) -> Result<(), SubmissionError> {
    if state.is_finished() {
        return Err(SubmissionError::MatchFinished);
    }
    if state.phase != Phase::Planning {
        return Err(SubmissionError::NotPlanning { phase: state.phase });
    }

    let mut player = state.player(side).clone();

    let held = economy::team_pool(&player);
    for color in EnergyColor::ALL {
        let wanted = submission.burn.iter().filter(|&&c| c == color).count() as u32;
        if wanted > held.get(color) {
            return Err(SubmissionError::BurnUnavailable { side, color });
        }
    }
    player.queue_burn(submission.burn.iter().copied());
    let mut pool = economy::projected_pool(&player, std::iter::empty::<&Skill>());

    let mut casters = BTreeSet::new();
    for action in &submission.actions {
        let caster = state
            .combatant(action.caster)
            .ok_or(SubmissionError::UnknownCaster {
                caster: action.caster,
            })?;
        if action.caster.side != side {
            return Err(SubmissionError::ForeignCaster {
                side,
                caster: action.caster,
            });
        }
        if !caster.alive {
            return Err(SubmissionError::CasterDown {
                caster: action.caster,
            });
        }
        if !casters.insert(action.caster) {
            return Err(SubmissionError::DuplicateCaster {
                caster: action.caster,
            });
        }

        let skill = caster
            .skill(&action.skill)
            .ok_or_else(|| SubmissionError::UnknownSkill {
                caster: action.caster,
                skill: action.skill.clone(),
            })?;
        if skill.category == WaveCategory::Passive {
            return Err(SubmissionError::PassiveSkill {
                skill: skill.id.clone(),
            });
        }
        if let Some(limit) = skill.usage_limit
            && state.skill_usage.count(action.caster, &skill.id) >= limit
        {
            return Err(SubmissionError::UsageExhausted {
                caster: action.caster,
                skill: skill.id.clone(),
            });
        }
        if state.combatant(action.target).is_none() {
            return Err(SubmissionError::UnknownTarget {
                target: action.target,
            });
        }

        if !economy::can_afford(&pool, skill)
            || !economy::caster_can_afford(state, action.caster, skill)
        {
            return Err(SubmissionError::Unaffordable {
                side,
                caster: action.caster,
                skill: skill.id.clone(),
            });
        }
        spend(&mut pool, &skill.cost);
    }

    Ok(())
}

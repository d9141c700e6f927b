//! Cost payment and queued-action waves.

use tracing::{debug, warn};

use crate::action::execute::{CancelledSet, execute};
use crate::action::{ActionResult, CancelReason, MatchAction, TurnLogEntry};
use crate::economy;
use crate::env::{ArenaEnv, Dice};
use crate::skill::{Skill, WaveCategory};
use crate::state::{CombatantState, MatchState, SkillUsageLedger, StatusKind, StatusTag};

/// Log name for actions whose caster or skill cannot be resolved.
pub const UNKNOWN_ACTION: &str = "Unknown";

/// A submitted action paired with the skill it resolved to at turn start.
pub(super) struct Queued<'q> {
    pub action: &'q MatchAction,
    pub skill: Option<Skill>,
}

impl Queued<'_> {
    /// Unresolvable actions are logged with the ACT wave.
    fn wave(&self) -> WaveCategory {
        self.skill.as_ref().map_or(WaveCategory::Act, |s| s.category)
    }
}

/// Merges both sides' submissions, team A first, preserving submission order.
pub(super) fn queue<'q>(
    state: &MatchState,
    actions_a: &'q [MatchAction],
    actions_b: &'q [MatchAction],
) -> Vec<Queued<'q>> {
    actions_a
        .iter()
        .chain(actions_b)
        .map(|action| Queued {
            action,
            skill: state
                .combatant(action.caster)
                .and_then(|c| c.skill(&action.skill))
                .cloned(),
        })
        .collect()
}

/// Pays energy and hit-point costs for every resolvable action of a living caster.
pub(super) fn pay_costs(state: &mut MatchState, queued: &[Queued<'_>], dice: &mut Dice<'_>) {
    for entry in queued {
        let Some(skill) = &entry.skill else {
            continue;
        };
        let caster = entry.action.caster;
        if !state.combatant(caster).is_some_and(|c| c.alive) {
            continue;
        }

        economy::deduct(state.player_mut(caster.side), skill, dice);
        if skill.hp_cost > 0
            && let Some(c) = state.combatant_mut(caster)
        {
            c.lose_hp(skill.hp_cost);
        }
    }
}

/// Runs the queued actions belonging to `wave`.
///
/// Submission order is kept unless a living combatant carries the
/// priority-inversion status, in which case the wave runs back to front.
pub(super) fn run_wave<'r>(
    wave: WaveCategory,
    queued: &[Queued<'_>],
    state: &mut MatchState,
    env: &ArenaEnv<'r>,
    dice: &mut Dice<'r>,
    cancelled: &mut CancelledSet,
    log: &mut Vec<TurnLogEntry>,
) {
    let mut members: Vec<&Queued<'_>> = queued.iter().filter(|q| q.wave() == wave).collect();
    if members.is_empty() {
        return;
    }
    let inverted = state
        .combatants()
        .any(|c| c.alive && c.has_status(&StatusTag::InvertPriority));
    if inverted {
        debug!(%wave, "priority inverted");
        members.reverse();
    }

    for entry in members {
        if let Some(line) = resolve_one(wave, entry, state, env, dice, cancelled) {
            log.push(line);
        }
    }
}

fn resolve_one<'r>(
    wave: WaveCategory,
    entry: &Queued<'_>,
    state: &mut MatchState,
    env: &ArenaEnv<'r>,
    dice: &mut Dice<'r>,
    cancelled: &mut CancelledSet,
) -> Option<TurnLogEntry> {
    let action = entry.action;
    let Some(caster) = state.combatant(action.caster) else {
        warn!(caster = %action.caster, "action references unknown caster");
        return Some(TurnLogEntry::new(
            wave,
            action.caster,
            UNKNOWN_ACTION,
            ActionResult::failed(),
        ));
    };
    if !caster.alive {
        return None;
    }
    let Some(skill) = &entry.skill else {
        warn!(caster = %action.caster, skill = %action.skill, "action references unknown skill");
        return Some(TurnLogEntry::new(
            wave,
            action.caster,
            UNKNOWN_ACTION,
            ActionResult::failed(),
        ));
    };

    if let Some((label, reason)) = skip_reason(caster, skill, cancelled, &state.skill_usage) {
        debug!(caster = %action.caster, skill = %skill.id, ?reason, "action cancelled");
        return Some(TurnLogEntry::new(
            wave,
            action.caster,
            label,
            ActionResult::cancelled(reason),
        ));
    }

    state.skill_usage.increment(action.caster, &skill.id);
    let result = execute(action, skill, state, env, dice, cancelled);
    Some(TurnLogEntry::new(wave, action.caster, skill.name.clone(), result))
}

/// Checks, in order: cancelled this turn, banished, silenced for the skill's
/// nature, usage cap reached.
fn skip_reason(
    caster: &CombatantState,
    skill: &Skill,
    cancelled: &CancelledSet,
    usage: &SkillUsageLedger,
) -> Option<(String, CancelReason)> {
    if cancelled.contains(&caster.id) {
        return Some(("CANCELLED".into(), CancelReason::Cancelled));
    }
    if caster.has_status(&StatusTag::Banished) {
        return Some(("BANISHED".into(), CancelReason::Banished));
    }
    let silenced = caster
        .statuses
        .iter()
        .any(|s| matches!(s.kind, StatusKind::Silenced { nature } if nature == skill.nature));
    if silenced {
        return Some((format!("{} (SILENCED)", skill.name), CancelReason::Silenced));
    }
    if let Some(limit) = skill.usage_limit
        && usage.count(caster.id, &skill.id) >= limit
    {
        return Some((format!("{} (MAX USE)", skill.name), CancelReason::UsageCap));
    }
    None
}

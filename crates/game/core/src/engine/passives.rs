//! Passive trigger system.
//!
//! The PASSIVE wave turns roster passives into combatant state: a one-off
//! armor grant on the first turn, and idempotent [`PassiveMarker`] statuses
//! that the effect pipeline and the economy read later. Death-triggered
//! passives run after the cleanup death check.

use crate::action::{ActionResult, EffectEntry, TurnLogEntry};
use crate::config::ArenaConfig;
use crate::env::{ArenaEnv, PassiveEffect};
use crate::skill::WaveCategory;
use crate::state::{
    ActiveStatus, CombatantId, MatchState, PassiveMarker, StatusKind,
};

/// Runs every living combatant's passive for the PASSIVE wave.
pub(super) fn run_passive_wave(
    state: &mut MatchState,
    env: &ArenaEnv<'_>,
    log: &mut Vec<TurnLogEntry>,
) {
    for id in state.combatant_ids() {
        let Some(combatant) = state.combatant(id).filter(|c| c.alive) else {
            continue;
        };
        let Some(passive) = env
            .roster
            .character(&combatant.character)
            .and_then(|def| def.passive.as_ref())
        else {
            continue;
        };

        for effect in &passive.effects {
            let effects = apply_passive(effect, id, state, env.config);
            if !effects.is_empty() {
                log.push(TurnLogEntry::new(
                    WaveCategory::Passive,
                    id,
                    passive.name.clone(),
                    ActionResult::succeeded(effects),
                ));
            }
        }
    }
}

fn apply_passive(
    effect: &PassiveEffect,
    id: CombatantId,
    state: &mut MatchState,
    config: &ArenaConfig,
) -> Vec<EffectEntry> {
    let turn = state.turn;
    let Some(holder) = state.combatant_mut(id) else {
        return Vec::new();
    };

    let marker = match *effect {
        PassiveEffect::Armor {
            value,
            unpierceable,
        } => {
            if turn != 1 || value == 0 {
                return Vec::new();
            }
            holder.armor += value;
            if unpierceable {
                holder.add_status(ActiveStatus::permanent(
                    StatusKind::Armor { unpierceable: true },
                    value,
                ));
            }
            return vec![EffectEntry::shield(id, value).with_detail("passive armor")];
        }
        PassiveEffect::ShieldOnColor { color, shield } if shield > 0 => {
            PassiveMarker::ShieldOnColor { color, shield }
        }
        PassiveEffect::ShieldOnColor { .. } => return Vec::new(),
        PassiveEffect::OnAllyDeath { .. } => PassiveMarker::OnAllyDeath,
        PassiveEffect::Evasion { percent } => PassiveMarker::Evasion {
            percent: percent.unwrap_or(config.default_evasion_percent),
        },
        PassiveEffect::IgnoreSentinel => PassiveMarker::IgnoreSentinel,
        PassiveEffect::RevealEnergy => PassiveMarker::RevealEnergy,
        PassiveEffect::ProcDot { nature, value } => PassiveMarker::ProcDot {
            nature,
            value: value.unwrap_or(config.default_proc_dot),
        },
        PassiveEffect::RecyclingBonus { reward } => PassiveMarker::RecyclingBonus {
            reward: reward.unwrap_or(config.default_recycling_reward),
        },
        // Death-triggered; see `run_death_passives`.
        PassiveEffect::Martyr { .. } => return Vec::new(),
    };

    holder.statuses.ensure_marker(marker);
    Vec::new()
}

/// Fires death-triggered passives for combatants that fell this turn.
pub(super) fn run_death_passives(
    state: &mut MatchState,
    env: &ArenaEnv<'_>,
    fallen: &[CombatantId],
    log: &mut Vec<TurnLogEntry>,
) {
    for &dead in fallen {
        martyr(state, env, dead, log);
        observe_ally_death(state, env, dead, log);
    }
}

/// The fallen combatant's own passive heals its surviving team.
fn martyr(state: &mut MatchState, env: &ArenaEnv<'_>, dead: CombatantId, log: &mut Vec<TurnLogEntry>) {
    let Some(passive) = state
        .combatant(dead)
        .and_then(|c| env.roster.character(&c.character))
        .and_then(|def| def.passive.as_ref())
    else {
        return;
    };

    for effect in &passive.effects {
        let PassiveEffect::Martyr { heal_allies } = *effect else {
            continue;
        };
        if heal_allies == 0 {
            continue;
        }
        let mut effects = Vec::new();
        for ally in state.player(dead.side).living_ids() {
            if let Some(c) = state.combatant_mut(ally) {
                let restored = c.heal(heal_allies);
                effects.push(EffectEntry::heal(ally, restored).with_detail("martyr"));
            }
        }
        if !effects.is_empty() {
            log.push(TurnLogEntry::new(
                WaveCategory::Passive,
                dead,
                passive.name.clone(),
                ActionResult::succeeded(effects),
            ));
        }
    }
}

/// Living teammates with an ally-death passive gain energy, once per fallen ally.
fn observe_ally_death(
    state: &mut MatchState,
    env: &ArenaEnv<'_>,
    dead: CombatantId,
    log: &mut Vec<TurnLogEntry>,
) {
    for holder in state.player(dead.side).living_ids() {
        let Some(passive) = state
            .combatant(holder)
            .and_then(|c| env.roster.character(&c.character))
            .and_then(|def| def.passive.as_ref())
        else {
            continue;
        };

        for effect in &passive.effects {
            let PassiveEffect::OnAllyDeath { gain } = effect else {
                continue;
            };
            let Some(c) = state.combatant_mut(holder) else {
                continue;
            };
            if !c.statuses.ensure_marker(PassiveMarker::AllyDeathObserved(dead)) {
                continue;
            }
            c.energy.merge(gain);
            log.push(TurnLogEntry::new(
                WaveCategory::Passive,
                holder,
                passive.name.clone(),
                ActionResult::succeeded(vec![
                    EffectEntry::energy_change(holder, "ally death").with_value(gain.total()),
                ]),
            ));
        }
    }
}

//! End-of-turn bookkeeping: status ticks, summons, and the death check.

use tracing::debug;

use crate::action::{ActionResult, EffectEntry, TurnLogEntry};
use crate::skill::WaveCategory;
use crate::state::{CombatantId, MatchState, StatusKind, TeamSide};

enum Tick {
    Harm(u32),
    Mend(u32),
}

/// Applies DoT and HoT values to living combatants, then decays every timed status.
pub(super) fn tick_statuses(state: &mut MatchState) {
    for side in TeamSide::BOTH {
        for combatant in state.player_mut(side).team.iter_mut().filter(|c| c.alive) {
            let ticks: Vec<Tick> = combatant
                .statuses
                .iter()
                .filter_map(|s| match s.kind {
                    StatusKind::Dot => Some(Tick::Harm(s.value)),
                    StatusKind::Hot => Some(Tick::Mend(s.value)),
                    _ => None,
                })
                .collect();
            for tick in ticks {
                match tick {
                    Tick::Harm(value) => combatant.lose_hp(value),
                    Tick::Mend(value) => combatant.heal(value),
                };
            }
            combatant.statuses.decay();
        }
    }
}

/// Each living summoner's summons strike the first living enemy.
pub(super) fn summon_ticks(state: &mut MatchState, log: &mut Vec<TurnLogEntry>) {
    for summoner in state.combatant_ids() {
        let summons: Vec<(String, u32)> = match state.combatant(summoner) {
            Some(c) if c.alive => c
                .statuses
                .iter()
                .filter_map(|s| match &s.kind {
                    StatusKind::Summon { name } if s.value > 0 => Some((name.clone(), s.value)),
                    _ => None,
                })
                .collect(),
            _ => continue,
        };

        for (name, damage) in summons {
            let Some(front) = state
                .player(summoner.side.opponent())
                .living()
                .next()
                .map(|c| c.id)
            else {
                break;
            };
            if let Some(enemy) = state.combatant_mut(front) {
                enemy.lose_hp(damage);
            }
            log.push(TurnLogEntry::new(
                WaveCategory::Afl,
                summoner,
                format!("Summon: {name}"),
                ActionResult::succeeded(vec![
                    EffectEntry::damage(front, damage).with_detail("summon"),
                ]),
            ));
        }
    }
}

/// Flags every living combatant at zero hit points as dead and returns them.
///
/// Permanent statuses survive so death-triggered passives can still read them.
pub(super) fn resolve_deaths(state: &mut MatchState) -> Vec<CombatantId> {
    let mut fallen = Vec::new();
    for side in TeamSide::BOTH {
        for combatant in state.player_mut(side).team.iter_mut() {
            if combatant.alive && combatant.hp == 0 {
                combatant.alive = false;
                combatant.statuses.clear_transient();
                debug!(combatant = %combatant.id, "combatant fell");
                fallen.push(combatant.id);
            }
        }
    }
    fallen
}

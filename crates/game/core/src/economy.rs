//! Team energy economy.
//!
//! Each team shares one logical pool that is physically spread across its
//! living combatants' reserves. Grants land on the team leader (first living
//! combatant); deductions walk the team in positional order.
//!
//! # Wildcard rule
//!
//! White covers colored shortfalls; a skill's own White cost is paid only in
//! White. [`can_afford`] and [`deduct`] share this rule, so an affordable
//! cost is always paid in full without touching other colors. Only when a
//! caller skipped validation does [`deduct`] fall back to drawing the unpaid
//! White from random colored reserves.

use tracing::{debug, warn};

use crate::config::ArenaConfig;
use crate::env::{ArenaEnv, Dice, PassiveEffect, RollContext, RosterOracle};
use crate::skill::Skill;
use crate::state::{
    CombatantId, EnergyColor, EnergyPool, MatchState, PlayerState, StatusKind, TeamSide,
};

// ============================================================================
// Queries
// ============================================================================

/// Per-color totals over the team's living combatants.
pub fn team_pool(player: &PlayerState) -> EnergyPool {
    let mut pool = EnergyPool::EMPTY;
    for combatant in player.living() {
        pool.merge(&combatant.energy);
    }
    pool
}

/// White needed to cover a cost: colored shortfalls plus the White cost itself.
fn white_needed(pool: &EnergyPool, cost: &EnergyPool) -> u32 {
    EnergyColor::COLORED
        .iter()
        .map(|&c| cost.get(c).saturating_sub(pool.get(c)))
        .sum::<u32>()
        + cost.white
}

/// True when `pool` covers `cost` under the wildcard rule.
pub fn covers(pool: &EnergyPool, cost: &EnergyPool) -> bool {
    pool.white >= white_needed(pool, cost)
}

/// True when `pool` can pay for `skill`.
pub fn can_afford(pool: &EnergyPool, skill: &Skill) -> bool {
    covers(pool, &skill.cost)
}

/// Affordability for a specific caster: colors it is locked out of count as empty.
pub fn caster_can_afford(state: &MatchState, caster: CombatantId, skill: &Skill) -> bool {
    let Some(combatant) = state.combatant(caster) else {
        return false;
    };
    let mut pool = team_pool(state.player(caster.side));
    for status in combatant.statuses.iter() {
        if let StatusKind::EnergyDisabled { color } = status.kind {
            *pool.get_mut(color) = 0;
        }
    }
    can_afford(&pool, skill)
}

/// Subtracts `cost` from a pool snapshot under the wildcard rule, saturating.
pub fn spend(pool: &mut EnergyPool, cost: &EnergyPool) {
    let mut white = cost.white;
    for color in EnergyColor::COLORED {
        let need = cost.get(color);
        white += need - pool.take(color, need);
    }
    pool.take(EnergyColor::White, white);
}

/// Pool left after queued costs and pending sacrifices are taken out.
pub fn projected_pool<'s>(
    player: &PlayerState,
    queued: impl IntoIterator<Item = &'s Skill>,
) -> EnergyPool {
    let mut pool = team_pool(player);
    for color in &player.pending_burn {
        pool.take(*color, 1);
    }
    for skill in queued {
        spend(&mut pool, &skill.cost);
    }
    pool
}

// ============================================================================
// Mutations
// ============================================================================

/// Takes up to `amount` of `color` from living combatants in positional order.
fn take_from_team(player: &mut PlayerState, color: EnergyColor, amount: u32) -> u32 {
    let mut remaining = amount;
    for combatant in player.team.iter_mut().filter(|c| c.alive) {
        if remaining == 0 {
            break;
        }
        remaining -= combatant.energy.take(color, remaining);
    }
    amount - remaining
}

/// Removes `skill`'s energy cost from the team. Never fails.
pub fn deduct(player: &mut PlayerState, skill: &Skill, dice: &mut Dice<'_>) {
    let cost = skill.cost;
    let mut white_owed = cost.white;
    for color in EnergyColor::COLORED {
        let need = cost.get(color);
        white_owed += need - take_from_team(player, color, need);
    }
    let mut unpaid = white_owed - take_from_team(player, EnergyColor::White, white_owed);
    if unpaid == 0 {
        return;
    }

    warn!(
        side = %player.side,
        skill = %skill.id,
        unpaid,
        "cost exceeds pool; drawing wildcard shortfall from colored reserves"
    );
    while unpaid > 0 {
        let pool = team_pool(player);
        let available: Vec<EnergyColor> = EnergyColor::COLORED
            .into_iter()
            .filter(|&c| pool.get(c) > 0)
            .collect();
        let Some(index) = dice.pick(available.len(), RollContext::WildcardFallback) else {
            break;
        };
        take_from_team(player, available[index], 1);
        unpaid -= 1;
    }
}

/// Banked energies per sacrificed pair for this team.
fn burn_reward(player: &PlayerState, roster: &dyn RosterOracle, config: &ArenaConfig) -> u32 {
    player
        .living()
        .filter_map(|c| roster.character(&c.character))
        .flat_map(|def| def.passive_effects())
        .find_map(|effect| match effect {
            PassiveEffect::RecyclingBonus { reward } => {
                Some(reward.unwrap_or(config.default_recycling_reward))
            }
            _ => None,
        })
        .unwrap_or(config.burn_reward_per_pair)
}

/// Resolves queued sacrifices. Returns the number of energies banked.
///
/// Sacrifices resolve in pairs; an odd leftover stays in the pool. The queue
/// is cleared either way.
pub fn resolve_burn(
    player: &mut PlayerState,
    roster: &dyn RosterOracle,
    config: &ArenaConfig,
) -> u32 {
    let burned = std::mem::take(&mut player.pending_burn);
    let pairs = (burned.len() / 2) as u32;
    if pairs == 0 {
        return 0;
    }
    for color in burned.iter().take(pairs as usize * 2) {
        take_from_team(player, *color, 1);
    }
    let banked = pairs * burn_reward(player, roster, config);
    player.next_turn_extra_energy += banked;
    debug!(side = %player.side, pairs, banked, "energy sacrificed");
    banked
}

/// Draw weights per colored energy, aligned with [`EnergyColor::COLORED`].
pub fn color_weights(
    player: &PlayerState,
    roster: &dyn RosterOracle,
    config: &ArenaConfig,
) -> [u32; 4] {
    let mut weights = EnergyColor::COLORED.map(|c| config.base_weight(c));
    let slot = |color: EnergyColor| {
        EnergyColor::COLORED
            .iter()
            .position(|&c| c == color)
            .unwrap_or(0)
    };
    for def in player
        .living()
        .filter_map(|c| roster.character(&c.character))
    {
        weights[slot(def.lineage.affinity())] += config.lineage_weight_bonus;
        if def.is_support() {
            weights[slot(EnergyColor::Green)] += config.support_weight_bonus;
        }
    }
    weights
}

/// Start-of-turn grant for both teams.
///
/// Each team draws `colored_per_turn` plus its banked energies from the
/// weighted colors; even turns add White up to the team cap.
pub fn grant_energy(state: &mut MatchState, env: &ArenaEnv<'_>, dice: &mut Dice<'_>) {
    let turn = state.turn;
    for side in TeamSide::BOTH {
        let player = state.player_mut(side);
        if player.is_eliminated() {
            continue;
        }
        let weights = color_weights(player, env.roster, env.config);
        let draws = env.config.colored_per_turn + std::mem::take(&mut player.next_turn_extra_energy);

        let mut granted = EnergyPool::EMPTY;
        for _ in 0..draws {
            if let Some(index) = dice.weighted(&weights, RollContext::EnergyGrant) {
                granted.add(EnergyColor::COLORED[index], 1);
            }
        }
        if turn % 2 == 0 {
            let held = team_pool(player).white;
            let room = env.config.max_team_white.saturating_sub(held);
            granted.add(EnergyColor::White, env.config.white_per_even_turn.min(room));
        }

        if let Some(leader) = player.leader_mut() {
            leader.energy.merge(&granted);
        }
        debug!(%side, turn, ?granted, "energy granted");
    }
}

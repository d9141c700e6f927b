//! Primary hit sequencing and secondary damage.
//!
//! Order of a primary hit:
//! 1. base damage plus additive modifiers (conditional bonus, stealth,
//!    consumed skill boost, target vulnerability), minus caster damage
//!    reduction, floored at zero
//! 2. target evasion roll
//! 3. target counter matching the skill's nature
//! 4. shield, then armor, then hit points
//! 5. secondary damage: lifesteal, splash, damage link, proc DoT

use tracing::debug;

use crate::action::EffectEntry;
use crate::env::RollContext;
use crate::skill::{BonusCondition, DamageSpec};
use crate::state::{ActiveStatus, CombatantId, PassiveMarker, StatusKind, StatusTag};

use super::context::EffectContext;
use super::percent_of;

/// Caster pays hit points before the hit.
pub(super) fn self_damage(amount: u32, ctx: &mut EffectContext<'_, '_>) {
    let caster = ctx.caster;
    let Some(c) = ctx.combatant_mut(caster) else {
        return;
    };
    let lost = c.lose_hp(amount);
    if lost > 0 {
        ctx.push(EffectEntry::damage(caster, lost).with_detail("self"));
    }
}

/// Resolves the primary hit against the living target.
pub(super) fn primary_hit(spec: &DamageSpec, ctx: &mut EffectContext<'_, '_>) {
    let Some(target) = ctx.living_target() else {
        return;
    };
    let total = modified_damage(spec, target, ctx);

    if evades(target, ctx) {
        debug!(%target, "primary hit evaded");
        ctx.push(EffectEntry::status_remove(target, "evaded"));
        return;
    }

    if countered(target, ctx) {
        return;
    }

    let through = absorb(target, total, ctx);

    if spec.lifesteal_percent > 0 {
        lifesteal(percent_of(through, spec.lifesteal_percent), ctx);
    }
    if spec.splash > 0 {
        splash(target, spec.splash, ctx);
    }
    mirror_link(target, total, ctx);
    proc_dot(target, ctx);
}

// ============================================================================
// Modifiers
// ============================================================================

fn modified_damage(spec: &DamageSpec, target: CombatantId, ctx: &mut EffectContext<'_, '_>) -> u32 {
    let caster = ctx.caster;
    let nature = ctx.skill.nature;
    let mut total = spec.base;

    if let (Some(bonus), Some(t)) = (spec.bonus, ctx.combatant(target)) {
        let applies = match bonus.condition {
            BonusCondition::TargetHasArmor => t.armor > 0,
            BonusCondition::TargetIsBleeding => {
                t.has_status(&StatusTag::Dot) || t.has_status(&StatusTag::Bleeding)
            }
        };
        if applies {
            total += bonus.value;
        }
    }

    if spec.stealth_bonus > 0
        && ctx
            .combatant(caster)
            .is_some_and(|c| c.has_status(&StatusTag::Stealth))
    {
        total += spec.stealth_bonus;
    }

    let boost = ctx.combatant_mut(caster).and_then(|c| {
        c.statuses
            .take_first(|s| matches!(s.kind, StatusKind::SkillBoost { nature: n } if n == nature))
    });
    if let Some(boost) = boost {
        total += boost.value;
    }

    if let Some(vulnerable) = ctx
        .combatant(target)
        .and_then(|t| t.statuses.find(|s| s.kind == StatusKind::Vulnerable))
    {
        total += vulnerable.value;
    }

    if let Some(reduction) = ctx
        .combatant(caster)
        .and_then(|c| c.statuses.find(|s| s.kind == StatusKind::DamageReduction))
    {
        total = total.saturating_sub(reduction.value);
    }

    total
}

fn evades(target: CombatantId, ctx: &mut EffectContext<'_, '_>) -> bool {
    let percent = ctx.combatant(target).and_then(|t| {
        t.statuses.markers().find_map(|m| match m {
            PassiveMarker::Evasion { percent } => Some(*percent),
            _ => None,
        })
    });
    match percent {
        Some(percent) if percent > 0 => ctx.dice.roll_d100(RollContext::Evasion) <= percent,
        _ => false,
    }
}

/// Consumes a matching counter and reflects its damage at the caster.
fn countered(target: CombatantId, ctx: &mut EffectContext<'_, '_>) -> bool {
    let caster = ctx.caster;
    let nature = ctx.skill.nature;
    let counter = ctx.combatant_mut(target).and_then(|t| {
        t.statuses.take_first(|s| {
            matches!(s.kind, StatusKind::Counter { filter } if filter.is_none_or(|f| f == nature))
        })
    });
    let Some(counter) = counter else {
        return false;
    };

    debug!(%target, %caster, reflected = counter.value, "counter triggered");
    if counter.value > 0 {
        let lost = ctx
            .combatant_mut(caster)
            .map_or(0, |c| c.lose_hp(counter.value));
        ctx.push(EffectEntry::damage(caster, lost).with_detail("counter"));
    }
    ctx.push(EffectEntry::status_remove(target, "counter triggered"));
    true
}

// ============================================================================
// Absorption
// ============================================================================

/// Applies `total` through shield, armor, and hit points. Returns the hit-point share.
fn absorb(target: CombatantId, total: u32, ctx: &mut EffectContext<'_, '_>) -> u32 {
    let Some(t) = ctx.combatant_mut(target) else {
        return 0;
    };

    let shield_before = t.shield;
    let shielded = shield_before.min(total);
    t.shield -= shielded;
    let after_shield = total - shielded;
    let broke = shield_before > 0 && t.shield == 0 && after_shield > 0;

    let unpierceable = t
        .statuses
        .find(|s| matches!(s.kind, StatusKind::Armor { unpierceable: true }))
        .is_some();
    let armored = t.armor.min(after_shield);
    if !unpierceable {
        t.armor -= armored;
    }
    let through = after_shield - armored;
    t.lose_hp(through);

    let reward = if broke {
        t.statuses
            .take_first(|s| matches!(s.kind, StatusKind::GainEnergyOnBreak { .. }))
            .and_then(|s| match s.kind {
                StatusKind::GainEnergyOnBreak { color } => Some(color),
                _ => None,
            })
    } else {
        None
    };
    if let Some(color) = reward {
        t.energy.add(color, 1);
    }

    ctx.push(EffectEntry::damage(target, total));
    if let Some(color) = reward {
        ctx.push(EffectEntry::energy_change(
            target,
            format!("+1 {color} (shield break)"),
        ));
    }
    through
}

// ============================================================================
// Secondary Damage
// ============================================================================

fn lifesteal(amount: u32, ctx: &mut EffectContext<'_, '_>) {
    let caster = ctx.caster;
    let healed = ctx.combatant_mut(caster).map_or(0, |c| c.heal(amount));
    if healed > 0 {
        ctx.push(EffectEntry::heal(caster, healed).with_detail("lifesteal"));
    }
}

/// Flat damage to the target's living positional neighbours.
fn splash(target: CombatantId, amount: u32, ctx: &mut EffectContext<'_, '_>) {
    let neighbours: Vec<CombatantId> = ctx
        .state
        .player(target.side)
        .living()
        .map(|c| c.id)
        .filter(|id| id.slot.abs_diff(target.slot) == 1)
        .collect();
    for id in neighbours {
        if let Some(n) = ctx.combatant_mut(id) {
            n.lose_hp(amount);
        }
        ctx.push(EffectEntry::damage(id, amount).with_detail("splash"));
    }
}

/// Mirrors a share of the pre-mitigation hit onto a linked partner.
fn mirror_link(target: CombatantId, total: u32, ctx: &mut EffectContext<'_, '_>) {
    let link = ctx.combatant(target).and_then(|t| {
        t.statuses.iter().find_map(|s| match s.kind {
            StatusKind::DamageLink { partner } => Some((partner, s.value)),
            _ => None,
        })
    });
    let Some((partner, percent)) = link else {
        return;
    };
    let mirrored = percent_of(total, percent);
    let Some(p) = ctx.combatant_mut(partner).filter(|p| p.alive) else {
        return;
    };
    if mirrored == 0 {
        return;
    }
    p.lose_hp(mirrored);
    ctx.push(EffectEntry::damage(partner, mirrored).with_detail("linked"));
}

/// Caster passive: skills of the trigger nature leave a one-turn DoT.
fn proc_dot(target: CombatantId, ctx: &mut EffectContext<'_, '_>) {
    let caster = ctx.caster;
    let nature = ctx.skill.nature;
    let proc = ctx.combatant(caster).and_then(|c| {
        c.statuses.markers().find_map(|m| match m {
            PassiveMarker::ProcDot { nature: n, value } if *n == nature => Some(*value),
            _ => None,
        })
    });
    let Some(value) = proc else {
        return;
    };
    if let Some(t) = ctx.combatant_mut(target) {
        t.add_status(ActiveStatus::new(StatusKind::Dot, value, 1).with_source(caster));
    }
    ctx.push(EffectEntry::status_apply(target, format!("DoT({value}/turn)")));
}

/// Hits every living enemy for `per_stack` times its DoT count.
pub(super) fn damage_per_dot(per_stack: u32, ctx: &mut EffectContext<'_, '_>) {
    for enemy in ctx.living_enemies() {
        let stacks = ctx
            .combatant(enemy)
            .map_or(0, |e| e.statuses.count(&StatusTag::Dot)) as u32;
        if stacks == 0 {
            continue;
        }
        let amount = per_stack * stacks;
        if let Some(e) = ctx.combatant_mut(enemy) {
            e.lose_hp(amount);
        }
        ctx.push(EffectEntry::damage(enemy, amount).with_detail(format!("{stacks}x DoT bonus")));
    }
}

//! Exhaustive dispatch over effect descriptors.

use tracing::debug;

use crate::action::EffectEntry;
use crate::skill::{EffectKind, ShieldSpec, SkillReach, StatusSpec};
use crate::state::{
    ActiveStatus, CombatantId, EnergyColor, EnergyPool, StatusKind, StatusTag,
};

use super::context::EffectContext;
use super::damage;

/// Default lifetime of a shield's break reward.
const BREAK_WINDOW: u32 = 2;
/// Skill boosts wait this many turns for a matching skill.
const BOOST_WINDOW: u32 = 2;

/// Applies one descriptor.
pub(super) fn apply_effect(effect: &EffectKind, ctx: &mut EffectContext<'_, '_>) {
    match effect {
        EffectKind::SelfDamage { amount } => damage::self_damage(*amount, ctx),
        EffectKind::Damage(spec) => damage::primary_hit(spec, ctx),
        EffectKind::Heal { amount } => heal(*amount, ctx),
        EffectKind::Shield(spec) => shield(spec, ctx),
        EffectKind::ApplyStatuses(specs) => apply_statuses(specs, ctx),
        EffectKind::Dot { value, duration } => dot(*value, *duration, ctx),
        EffectKind::Hot { value, duration } => hot(*value, *duration, ctx),
        EffectKind::Debuff(spec) => debuff(spec, ctx),
        EffectKind::RemoveStatuses(tags) => remove_statuses(tags, ctx),
        EffectKind::Stun { turns, self_turns } => stun(*turns, *self_turns, ctx),
        EffectKind::Vulnerability { value, duration } => {
            if let Some(target) = ctx.living_target() {
                attach(ctx, target, StatusKind::Vulnerable, *value, *duration);
                ctx.push(EffectEntry::status_apply(target, "Vulnerable"));
            }
        }
        EffectKind::StripArmorShield => {
            if let Some(target) = ctx.living_target() {
                if let Some(t) = ctx.combatant_mut(target) {
                    t.armor = 0;
                    t.shield = 0;
                }
                ctx.push(EffectEntry::status_remove(target, "armor+shield stripped"));
            }
        }
        EffectKind::Counter {
            damage,
            filter,
            duration,
        } => {
            let caster = ctx.caster;
            let kind = StatusKind::Counter { filter: *filter };
            attach(ctx, caster, kind, *damage, (*duration).max(1));
            ctx.push(EffectEntry::status_apply(caster, "Counter ready"));
        }
        EffectKind::Summon {
            name,
            damage,
            duration,
        } => {
            let caster = ctx.caster;
            let kind = StatusKind::Summon { name: name.clone() };
            attach(ctx, caster, kind, *damage, *duration);
            ctx.push(EffectEntry::status_apply(caster, format!("Summon: {name}")));
        }
        EffectKind::ConvertEnergy { from, to } => convert_energy(*from, *to, ctx),
        EffectKind::SkillBoost { nature, value } => {
            let caster = ctx.caster;
            let kind = StatusKind::SkillBoost { nature: *nature };
            attach(ctx, caster, kind, *value, BOOST_WINDOW);
            ctx.push(EffectEntry::status_apply(
                caster,
                format!("+{value} {nature} damage"),
            ));
        }
        EffectKind::Silence { nature, duration } => {
            if let Some(target) = ctx.living_target() {
                ctx.cancelled.insert(target);
                let kind = StatusKind::Silenced { nature: *nature };
                attach(ctx, target, kind, 0, (*duration).max(1));
                ctx.push(EffectEntry::cancel(target, format!("silenced ({nature})")));
            }
        }
        EffectKind::DisableEnergy { color, duration } => {
            if let Some(target) = ctx.living_target() {
                let kind = StatusKind::EnergyDisabled { color: *color };
                attach(ctx, target, kind, 0, (*duration).max(1));
                ctx.push(EffectEntry::status_apply(
                    target,
                    format!("{color} energy disabled"),
                ));
            }
        }
        EffectKind::HpSwap { limit } => hp_swap(*limit, ctx),
        EffectKind::ReflectDebuff { duration } => {
            let caster = ctx.caster;
            attach(ctx, caster, StatusKind::ReflectDebuff, 0, (*duration).max(1));
            ctx.push(EffectEntry::status_apply(caster, "Reflect Debuff active"));
        }
        EffectKind::ExtraAction { count } => {
            if *count > 0 {
                let caster = ctx.caster;
                attach(ctx, caster, StatusKind::ExtraAction, *count, 1);
                ctx.push(EffectEntry::status_apply(caster, "Extra Action"));
            }
        }
        EffectKind::Revive { hp } => revive(*hp, ctx),
        EffectKind::DamagePerDot { per_stack } => damage::damage_per_dot(*per_stack, ctx),
        EffectKind::DamageLink { percent, duration } => damage_link(*percent, *duration, ctx),
        EffectKind::Banish { turns } => {
            if let Some(target) = ctx.living_target().filter(|_| *turns > 0) {
                ctx.cancelled.insert(target);
                attach(ctx, target, StatusKind::Banished, 0, *turns);
                ctx.push(EffectEntry::cancel(target, "banished"));
            }
        }
        EffectKind::StripEnergy => {
            if let Some(target) = ctx.living_target() {
                if let Some(t) = ctx.combatant_mut(target) {
                    t.energy = EnergyPool::EMPTY;
                }
                ctx.push(EffectEntry::energy_change(target, "all energy stripped"));
            }
        }
        EffectKind::InvertPriority => {
            let caster = ctx.caster;
            for id in ctx.state.combatant_ids() {
                attach(ctx, id, StatusKind::InvertPriority, 0, 1);
            }
            ctx.push(EffectEntry::status_apply(caster, "Priority Inverted"));
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Attaches a timed status sourced from the caster.
fn attach(
    ctx: &mut EffectContext<'_, '_>,
    holder: CombatantId,
    kind: StatusKind,
    value: u32,
    turns: u32,
) {
    let caster = ctx.caster;
    if let Some(c) = ctx.combatant_mut(holder) {
        c.add_status(ActiveStatus::new(kind, value, turns).with_source(caster));
    }
}

// ============================================================================
// Effect Families
// ============================================================================

fn heal(amount: u32, ctx: &mut EffectContext<'_, '_>) {
    let Some(target) = ctx.living_target().filter(|_| amount > 0) else {
        return;
    };
    let healed = ctx.combatant_mut(target).map_or(0, |t| t.heal(amount));
    ctx.push(EffectEntry::heal(target, healed));
}

fn shield(spec: &ShieldSpec, ctx: &mut EffectContext<'_, '_>) {
    if spec.amount == 0 {
        return;
    }
    let holder = ctx.recipient();
    if let Some(h) = ctx.combatant_mut(holder) {
        h.shield += spec.amount;
    }
    ctx.push(EffectEntry::shield(holder, spec.amount));

    if let Some(color) = spec.break_reward {
        let turns = spec.break_window.unwrap_or(BREAK_WINDOW);
        attach(ctx, holder, StatusKind::GainEnergyOnBreak { color }, 0, turns);
    }
}

fn apply_statuses(specs: &[StatusSpec], ctx: &mut EffectContext<'_, '_>) {
    let holder = ctx.recipient();
    for spec in specs {
        attach(ctx, holder, spec.kind.clone(), spec.value, spec.duration);
        if matches!(spec.kind, StatusKind::Armor { .. })
            && let Some(h) = ctx.combatant_mut(holder)
        {
            h.armor += spec.value;
        }
        ctx.push(EffectEntry::status_apply(holder, spec.kind.tag().to_string()));
    }
}

fn dot(value: u32, duration: u32, ctx: &mut EffectContext<'_, '_>) {
    let Some(target) = ctx.living_target() else {
        return;
    };
    attach(ctx, target, StatusKind::Dot, value, duration);
    ctx.push(EffectEntry::status_apply(target, format!("DoT({value}/turn)")));
}

fn hot(value: u32, duration: u32, ctx: &mut EffectContext<'_, '_>) {
    let holders = if ctx.skill.reach == Some(SkillReach::GlobalAlly) {
        ctx.living_allies()
    } else {
        vec![ctx.recipient()]
    };
    for holder in holders {
        attach(ctx, holder, StatusKind::Hot, value, duration);
        ctx.push(EffectEntry::status_apply(holder, format!("HoT({value}/turn)")));
    }
}

/// Debuffs bounce off a reflect marker back onto the caster.
fn debuff(spec: &StatusSpec, ctx: &mut EffectContext<'_, '_>) {
    let Some(target) = ctx.living_target() else {
        return;
    };
    let reflected = ctx.combatant_mut(target).is_some_and(|t| {
        t.statuses
            .take_first(|s| s.kind == StatusKind::ReflectDebuff)
            .is_some()
    });
    let label = spec.kind.tag().to_string();
    if reflected {
        let caster = ctx.caster;
        debug!(%target, %caster, "debuff reflected");
        attach(ctx, caster, spec.kind.clone(), spec.value, spec.duration);
        ctx.push(EffectEntry::status_remove(target, "ReflectDebuff"));
        ctx.push(EffectEntry::status_apply(caster, format!("{label} (reflected)")));
    } else {
        attach(ctx, target, spec.kind.clone(), spec.value, spec.duration);
        ctx.push(EffectEntry::status_apply(target, label));
    }
}

fn remove_statuses(tags: &[StatusTag], ctx: &mut EffectContext<'_, '_>) {
    let holder = ctx.recipient();
    for tag in tags {
        let clears_dots = *tag == StatusTag::Affliction;
        let removed = ctx.combatant_mut(holder).map_or_else(Vec::new, |h| {
            h.statuses.remove_where(|s| {
                let own = s.tag();
                own == *tag || (clears_dots && own == StatusTag::Dot)
            })
        });
        for status in removed {
            ctx.push(EffectEntry::status_remove(holder, status.tag().to_string()));
        }
    }
}

fn stun(turns: u32, self_turns: u32, ctx: &mut EffectContext<'_, '_>) {
    let Some(target) = ctx.living_target().filter(|_| turns > 0) else {
        return;
    };
    ctx.cancelled.insert(target);
    attach(ctx, target, StatusKind::Stunned, 0, turns);
    ctx.push(EffectEntry::cancel(target, "stunned"));

    if self_turns > 0 {
        let caster = ctx.caster;
        ctx.cancelled.insert(caster);
        attach(ctx, caster, StatusKind::Stunned, 0, self_turns);
        ctx.push(EffectEntry::cancel(caster, "self-stunned"));
    }
}

fn convert_energy(from: EnergyColor, to: EnergyColor, ctx: &mut EffectContext<'_, '_>) {
    let caster = ctx.caster;
    let moved = ctx.combatant_mut(caster).map_or(0, |c| {
        let amount = c.energy.take(from, u32::MAX);
        c.energy.add(to, amount);
        amount
    });
    ctx.push(EffectEntry::energy_change(
        caster,
        format!("{moved} {from} -> {to}"),
    ));
}

/// Moves up to `limit` hit points from the healthier side to the other.
fn hp_swap(limit: u32, ctx: &mut EffectContext<'_, '_>) {
    let caster = ctx.caster;
    let Some(target) = ctx.living_target().filter(|&t| t != caster) else {
        return;
    };
    let (Some(caster_hp), Some(target_hp)) = (
        ctx.combatant(caster).map(|c| c.hp),
        ctx.combatant(target).map(|t| t.hp),
    ) else {
        return;
    };
    let shift = caster_hp.abs_diff(target_hp).min(limit);
    if shift == 0 {
        return;
    }
    let (gainer, loser) = if caster_hp < target_hp {
        (caster, target)
    } else {
        (target, caster)
    };
    let lost = ctx.combatant_mut(loser).map_or(0, |l| l.lose_hp(shift));
    let gained = ctx.combatant_mut(gainer).map_or(0, |g| g.heal(lost));
    ctx.push(EffectEntry::heal(gainer, gained).with_detail("HP swap"));
    ctx.push(EffectEntry::damage(loser, lost).with_detail("HP swap"));
}

/// Brings a fallen target back with `hp`, clearing its statuses.
fn revive(hp: u32, ctx: &mut EffectContext<'_, '_>) {
    if hp == 0 {
        return;
    }
    let Some(target) = ctx.target else {
        return;
    };
    let restored = match ctx.combatant_mut(target) {
        Some(t) if !t.alive => {
            t.alive = true;
            t.hp = hp.min(t.max_hp).max(1);
            t.statuses.clear();
            t.hp
        }
        _ => return,
    };
    ctx.push(EffectEntry::heal(target, restored).with_detail("revived"));
}

/// Binds the target to another living enemy of the caster, both ways.
fn damage_link(percent: u32, duration: u32, ctx: &mut EffectContext<'_, '_>) {
    let Some(target) = ctx.living_target().filter(|_| percent > 0) else {
        return;
    };
    let Some(partner) = ctx.living_enemies().into_iter().find(|&e| e != target) else {
        return;
    };
    let turns = duration.max(1);
    attach(ctx, target, StatusKind::DamageLink { partner }, percent, turns);
    attach(ctx, partner, StatusKind::DamageLink { partner: target }, percent, turns);
    ctx.push(EffectEntry::status_apply(target, "Linked"));
    ctx.push(EffectEntry::status_apply(partner, "Linked"));
}

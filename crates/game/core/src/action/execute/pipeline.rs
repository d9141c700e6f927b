//! Action execution orchestration.

use tracing::debug;

use crate::action::{ActionResult, EffectEntry, MatchAction};
use crate::env::{ArenaEnv, Dice};
use crate::skill::Skill;
use crate::state::{MatchState, PassiveMarker};

use super::context::{CancelledSet, EffectContext};
use super::effects::apply_effect;

// ============================================================================
// Pipeline Orchestration
// ============================================================================

/// Executes `skill` for `action` and returns the observable result.
///
/// ## Execution Flow
/// 1. Resolve the target id (missing ids leave the target empty)
/// 2. Order descriptors by phase (PreEffect → Primary → PostEffect → Finalize),
///    keeping declaration order within a phase
/// 3. Apply each descriptor against the shared [`EffectContext`]
/// 4. Fire the caster's shield-on-color passive if the skill paid that color
///
/// An unknown caster yields an unsuccessful, effect-less result.
pub fn execute<'r>(
    action: &MatchAction,
    skill: &Skill,
    state: &mut MatchState,
    env: &ArenaEnv<'r>,
    dice: &mut Dice<'r>,
    cancelled: &mut CancelledSet,
) -> ActionResult {
    if state.combatant(action.caster).is_none() {
        return ActionResult::failed();
    }
    let target = state.combatant(action.target).map(|c| c.id);

    let mut ctx = EffectContext::new(action.caster, target, skill, state, env, dice, cancelled);

    for effect in skill.ordered_effects() {
        debug!(caster = %action.caster, effect = effect.label(), "applying effect");
        apply_effect(effect, &mut ctx);
    }

    shield_on_color(&mut ctx);

    ActionResult::succeeded(ctx.effects)
}

/// Caster passive: bonus shield whenever the cast skill costs a given color.
fn shield_on_color(ctx: &mut EffectContext<'_, '_>) {
    let caster = ctx.caster;
    let gained: u32 = match ctx.combatant(caster) {
        Some(c) => c
            .statuses
            .markers()
            .filter_map(|m| match m {
                PassiveMarker::ShieldOnColor { color, shield } if ctx.skill.costs(*color) => {
                    Some(*shield)
                }
                _ => None,
            })
            .sum(),
        None => 0,
    };
    if gained == 0 {
        return;
    }
    if let Some(c) = ctx.combatant_mut(caster) {
        c.shield += gained;
    }
    ctx.push(EffectEntry::shield(caster, gained).with_detail("passive"));
}

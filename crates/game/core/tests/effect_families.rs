//! Effect-family scenarios.
//!
//! One match per family: the skill under test is cast through a full turn and
//! the resulting state and combat log are checked.

mod common;

use arena_core::skill::{BonusCondition, BonusDamage};
use arena_core::{
    ActiveStatus, ArenaConfig, ArenaEnv, CancelReason, CombatantId, DamageNature, DamageSpec,
    EffectEntry, EffectKind, EnergyColor, Lineage, MatchAction, MatchState, PassiveEffect,
    PassiveMarker, Roster, ShieldSpec, Skill, SkillReach, StatusKind, StatusSpec, StatusTag,
    TeamSide, TurnOutcome, WaveCategory, resolve_turn, team_pool,
};
use common::{Constant, PLAIN, a, act, b, fighter, kill, passive, start};

fn resolve(
    env: &ArenaEnv<'_>,
    state: &MatchState,
    actions_a: &[MatchAction],
    actions_b: &[MatchAction],
) -> TurnOutcome {
    resolve_turn(state, actions_a, actions_b, env)
}

fn hp(state: &MatchState, id: CombatantId) -> u32 {
    state.combatant(id).map(|c| c.hp).expect("combatant exists")
}

fn damage(base: u32) -> DamageSpec {
    DamageSpec::flat(base)
}

/// Free skills covering the effect families exercised below.
fn arsenal() -> Vec<Skill> {
    vec![
        Skill::new("parry", "Parry", WaveCategory::Inst, DamageNature::Knt).with_effect(
            EffectKind::Counter {
                damage: 7,
                filter: Some(DamageNature::Knt),
                duration: 1,
            },
        ),
        Skill::new("leech", "Leech", WaveCategory::Act, DamageNature::Crs).with_effect(
            EffectKind::Damage(DamageSpec {
                lifesteal_percent: 50,
                ..damage(20)
            }),
        ),
        Skill::new("cleave", "Cleave", WaveCategory::Act, DamageNature::Knt).with_effect(
            EffectKind::Damage(DamageSpec {
                splash: 5,
                ..damage(10)
            }),
        ),
        Skill::new("chain", "Chain", WaveCategory::Ctrl, DamageNature::Crs).with_effect(
            EffectKind::DamageLink {
                percent: 50,
                duration: 2,
            },
        ),
        Skill::new("raise", "Raise", WaveCategory::Act, DamageNature::Vlt)
            .with_reach(SkillReach::DeadAlly)
            .with_effect(EffectKind::Revive { hp: 30 }),
        Skill::new("swap", "Swap", WaveCategory::Act, DamageNature::Vlt)
            .with_effect(EffectKind::HpSwap { limit: 15 }),
        Skill::new("mirror", "Mirror", WaveCategory::Inst, DamageNature::Vlt)
            .with_effect(EffectKind::ReflectDebuff { duration: 1 }),
        Skill::new("rend", "Rend", WaveCategory::Ctrl, DamageNature::Crs).with_effect(
            EffectKind::Debuff(StatusSpec::new(StatusKind::Bleeding, 0, 2)),
        ),
        Skill::new("exile", "Exile", WaveCategory::Ctrl, DamageNature::Vlt)
            .with_effect(EffectKind::Banish { turns: 2 }),
        Skill::new("renew", "Renew", WaveCategory::Inst, DamageNature::Vlt)
            .with_reach(SkillReach::GlobalAlly)
            .with_effect(EffectKind::Hot {
                value: 5,
                duration: 2,
            }),
        Skill::new("transmute", "Transmute", WaveCategory::Inst, DamageNature::Vlt).with_effect(
            EffectKind::ConvertEnergy {
                from: EnergyColor::Red,
                to: EnergyColor::Blue,
            },
        ),
        Skill::new("focus", "Focus", WaveCategory::Inst, DamageNature::Knt).with_effect(
            EffectKind::SkillBoost {
                nature: DamageNature::Knt,
                value: 6,
            },
        ),
        Skill::new("crush", "Crush", WaveCategory::Act, DamageNature::Knt).with_effect(
            EffectKind::Damage(DamageSpec {
                bonus: Some(BonusDamage {
                    condition: BonusCondition::TargetHasArmor,
                    value: 5,
                }),
                ..damage(10)
            }),
        ),
        Skill::new("gash", "Gash", WaveCategory::Act, DamageNature::Crs).with_effect(
            EffectKind::Damage(DamageSpec {
                bonus: Some(BonusDamage {
                    condition: BonusCondition::TargetIsBleeding,
                    value: 8,
                }),
                ..damage(10)
            }),
        ),
        Skill::new("ward", "Ward", WaveCategory::Inst, DamageNature::Vlt).with_effect(
            EffectKind::Shield(ShieldSpec {
                amount: 5,
                break_reward: Some(EnergyColor::Blue),
                break_window: None,
            }),
        ),
        Skill::new("purge", "Purge", WaveCategory::Inst, DamageNature::Vlt)
            .with_effect(EffectKind::RemoveStatuses(vec![StatusTag::Affliction])),
        Skill::new("overcharge", "Overcharge", WaveCategory::Ctrl, DamageNature::Vlt)
            .with_effect(EffectKind::Stun {
                turns: 1,
                self_turns: 1,
            }),
    ]
}

/// Plain fighters and marker-passive holders, all carrying the drill menu plus [`arsenal`].
fn armory() -> Roster {
    let mut defs = vec![
        fighter("alpha", Lineage::Iron, None),
        fighter("bravo", Lineage::Iron, None),
        fighter("charlie", Lineage::Iron, None),
        fighter(
            "aegis",
            Lineage::Iron,
            passive(
                "Red Guard",
                PassiveEffect::ShieldOnColor {
                    color: EnergyColor::Red,
                    shield: 4,
                },
            ),
        ),
        fighter(
            "viper",
            Lineage::Void,
            passive(
                "Toxin",
                PassiveEffect::ProcDot {
                    nature: DamageNature::Knt,
                    value: Some(3),
                },
            ),
        ),
        fighter(
            "scrapper",
            Lineage::Iron,
            passive(
                "Salvage",
                PassiveEffect::RecyclingBonus { reward: Some(3) },
            ),
        ),
        fighter(
            "seer",
            Lineage::Neon,
            passive("Insight", PassiveEffect::RevealEnergy),
        ),
    ];
    for def in &mut defs {
        def.skills.extend(arsenal());
    }
    defs.into_iter().collect()
}

// ============================================================================
// Primary Hit Modifiers
// ============================================================================

#[test]
fn counter_reflects_only_its_nature() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "zap", b(0)), act(a(1), "jab", b(0))],
        &[act(b(0), "parry", b(0))],
    );

    assert_eq!(outcome.log[0].skill_name, "Parry");
    assert_eq!(
        outcome.log[0].result.effects,
        vec![EffectEntry::status_apply(b(0), "Counter ready")]
    );

    // Volt passes the kinetic-only counter untouched.
    assert_eq!(outcome.log[1].result.effects, vec![EffectEntry::damage(b(0), 7)]);

    // Kinetic consumes it and the caster eats the reflection instead.
    assert_eq!(
        outcome.log[2].result.effects,
        vec![
            EffectEntry::damage(a(1), 7).with_detail("counter"),
            EffectEntry::status_remove(b(0), "counter triggered"),
        ]
    );
    assert_eq!(hp(&outcome.state, b(0)), 93);
    assert_eq!(hp(&outcome.state, a(1)), 93);
    assert!(!outcome.state.combatant(b(0)).expect("B1").has_status(&StatusTag::Counter));
}

#[test]
fn skill_boost_is_spent_on_the_next_matching_hit() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[
            act(a(0), "focus", a(0)),
            act(a(0), "jab", b(0)),
            act(a(0), "hit10", b(1)),
        ],
        &[],
    );

    assert_eq!(
        outcome.log[0].result.effects,
        vec![EffectEntry::status_apply(a(0), "+6 KNT damage")]
    );
    assert_eq!(hp(&outcome.state, b(0)), 74);
    assert_eq!(hp(&outcome.state, b(1)), 90);
    assert!(!outcome.state.combatant(a(0)).expect("A1").has_status(&StatusTag::SkillBoost));
}

#[test]
fn damage_reduction_floors_at_zero() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    state
        .combatant_mut(a(0))
        .expect("A1")
        .add_status(ActiveStatus::new(StatusKind::DamageReduction, 30, 1));
    state
        .combatant_mut(a(1))
        .expect("A2")
        .add_status(ActiveStatus::new(StatusKind::DamageReduction, 5, 1));

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "jab", b(0)), act(a(1), "jab", b(1))],
        &[],
    );

    assert_eq!(outcome.log[0].result.effects, vec![EffectEntry::damage(b(0), 0)]);
    assert_eq!(hp(&outcome.state, b(0)), 100);
    assert_eq!(hp(&outcome.state, b(1)), 85);
}

#[test]
fn conditional_bonuses_check_armor_and_bleeding() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    state.combatant_mut(b(0)).expect("B1").armor = 3;
    state
        .combatant_mut(b(2))
        .expect("B3")
        .add_status(ActiveStatus::new(StatusKind::Bleeding, 0, 2));

    let outcome = resolve(
        &env,
        &state,
        &[
            act(a(0), "crush", b(0)),
            act(a(1), "crush", b(1)),
            act(a(2), "gash", b(2)),
            act(a(2), "gash", b(1)),
        ],
        &[],
    );

    // 10 + 5 armored bonus, 3 of it soaked by armor.
    assert_eq!(outcome.log[0].result.effects, vec![EffectEntry::damage(b(0), 15)]);
    assert_eq!(hp(&outcome.state, b(0)), 88);
    // B2 has neither armor nor bleeding: two plain hits.
    assert_eq!(hp(&outcome.state, b(1)), 80);
    assert_eq!(outcome.log[2].result.effects, vec![EffectEntry::damage(b(2), 18)]);
    assert_eq!(hp(&outcome.state, b(2)), 82);
}

// ============================================================================
// Absorption and Secondary Damage
// ============================================================================

#[test]
fn lifesteal_heals_from_post_mitigation_damage() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    state.combatant_mut(a(0)).expect("A1").hp = 50;
    state.combatant_mut(b(0)).expect("B1").armor = 6;

    let outcome = resolve(&env, &state, &[act(a(0), "leech", b(0))], &[]);

    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::damage(b(0), 20),
            EffectEntry::heal(a(0), 7).with_detail("lifesteal"),
        ]
    );
    assert_eq!(hp(&outcome.state, a(0)), 57);
    let t = outcome.state.combatant(b(0)).expect("B1");
    assert_eq!((t.armor, t.hp), (0, 86));
}

#[test]
fn splash_hits_only_living_neighbours() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let outcome = resolve(&env, &state, &[act(a(0), "cleave", b(1))], &[]);
    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::damage(b(1), 10),
            EffectEntry::damage(b(0), 5).with_detail("splash"),
            EffectEntry::damage(b(2), 5).with_detail("splash"),
        ]
    );
    assert_eq!(hp(&outcome.state, b(0)), 95);
    assert_eq!(hp(&outcome.state, b(1)), 90);
    assert_eq!(hp(&outcome.state, b(2)), 95);

    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    kill(&mut state, b(1));
    let outcome = resolve(&env, &state, &[act(a(0), "cleave", b(0))], &[]);
    assert_eq!(outcome.log[0].result.effects, vec![EffectEntry::damage(b(0), 10)]);
    assert_eq!(hp(&outcome.state, b(2)), 100);
}

#[test]
fn damage_link_mirrors_the_unmitigated_hit() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    state.combatant_mut(b(0)).expect("B1").armor = 5;

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "chain", b(0)), act(a(1), "hit10", b(0))],
        &[],
    );

    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::status_apply(b(0), "Linked"),
            EffectEntry::status_apply(b(1), "Linked"),
        ]
    );
    assert_eq!(
        outcome.log[1].result.effects,
        vec![
            EffectEntry::damage(b(0), 10),
            EffectEntry::damage(b(1), 5).with_detail("linked"),
        ]
    );
    // Armor soaked half of B1's share; the mirror ignores it.
    assert_eq!(hp(&outcome.state, b(0)), 95);
    assert_eq!(hp(&outcome.state, b(1)), 95);
    let partner = outcome.state.combatant(b(1)).expect("B2");
    assert!(
        partner
            .statuses
            .iter()
            .any(|s| s.kind == StatusKind::DamageLink { partner: b(0) })
    );
}

#[test]
fn breaking_a_rewarded_shield_grants_energy() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "jab", b(0))],
        &[act(b(0), "ward", b(0))],
    );

    assert_eq!(
        outcome.log[0].result.effects,
        vec![EffectEntry::shield(b(0), 5)]
    );
    assert_eq!(
        outcome.log[1].result.effects,
        vec![
            EffectEntry::damage(b(0), 20),
            EffectEntry::energy_change(b(0), "+1 Blue (shield break)"),
        ]
    );
    let holder = outcome.state.combatant(b(0)).expect("B1");
    assert_eq!((holder.shield, holder.hp), (0, 85));
    assert_eq!(holder.energy.blue, 1);
    assert!(!holder.has_status(&StatusTag::GainEnergyOnBreak));
}

// ============================================================================
// Support Effects
// ============================================================================

#[test]
fn revive_restores_a_fallen_ally_with_a_clean_slate() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    kill(&mut state, b(1));
    state
        .combatant_mut(b(1))
        .expect("B2")
        .add_status(ActiveStatus::new(StatusKind::Bleeding, 0, 3));

    let outcome = resolve(&env, &state, &[], &[act(b(0), "raise", b(1))]);

    assert_eq!(
        outcome.log[0].result.effects,
        vec![EffectEntry::heal(b(1), 30).with_detail("revived")]
    );
    let revived = outcome.state.combatant(b(1)).expect("B2");
    assert!(revived.alive);
    assert_eq!(revived.hp, 30);
    assert!(revived.statuses.is_empty());
}

#[test]
fn hp_swap_moves_at_most_its_limit() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    state.combatant_mut(a(0)).expect("A1").hp = 20;

    let outcome = resolve(&env, &state, &[act(a(0), "swap", b(0))], &[]);

    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::heal(a(0), 15).with_detail("HP swap"),
            EffectEntry::damage(b(0), 15).with_detail("HP swap"),
        ]
    );
    assert_eq!(hp(&outcome.state, a(0)), 35);
    assert_eq!(hp(&outcome.state, b(0)), 85);
}

#[test]
fn global_ally_hot_covers_every_living_teammate() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    state.combatant_mut(a(0)).expect("A1").hp = 50;
    state.combatant_mut(a(1)).expect("A2").hp = 60;
    kill(&mut state, a(2));

    let turn1 = resolve(&env, &state, &[act(a(0), "renew", a(0))], &[]);
    assert_eq!(
        turn1.log[0].result.effects,
        vec![
            EffectEntry::status_apply(a(0), "HoT(5/turn)"),
            EffectEntry::status_apply(a(1), "HoT(5/turn)"),
        ]
    );
    assert_eq!(hp(&turn1.state, a(0)), 55);
    assert_eq!(hp(&turn1.state, a(1)), 65);
    assert_eq!(hp(&turn1.state, a(2)), 0);

    let turn2 = resolve(&env, &turn1.state, &[], &[]);
    assert_eq!(hp(&turn2.state, a(0)), 60);
    assert_eq!(hp(&turn2.state, a(1)), 70);

    // Expired after two ticks.
    let turn3 = resolve(&env, &turn2.state, &[], &[]);
    assert_eq!(hp(&turn3.state, a(0)), 60);
}

#[test]
fn removing_affliction_also_clears_dots() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, PLAIN, PLAIN);
    {
        let ally = state.combatant_mut(a(1)).expect("A2");
        ally.add_status(ActiveStatus::new(StatusKind::Affliction, 0, 2));
        ally.add_status(ActiveStatus::new(StatusKind::Dot, 4, 2));
        ally.add_status(ActiveStatus::new(StatusKind::Bleeding, 0, 2));
    }

    let outcome = resolve(&env, &state, &[act(a(0), "purge", a(1))], &[]);

    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::status_remove(a(1), "Affliction"),
            EffectEntry::status_remove(a(1), "DoT"),
        ]
    );
    let ally = outcome.state.combatant(a(1)).expect("A2");
    assert_eq!(ally.hp, 100);
    assert!(ally.has_status(&StatusTag::Bleeding));
    assert!(!ally.has_status(&StatusTag::Dot));
}

#[test]
fn energy_conversion_moves_the_whole_reserve() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);
    assert_eq!(state.combatant(a(0)).expect("A1").energy.red, 3);

    let outcome = resolve(&env, &state, &[act(a(0), "transmute", a(0))], &[]);

    assert_eq!(
        outcome.log[0].result.effects,
        vec![EffectEntry::energy_change(a(0), "3 Red -> Blue")]
    );
    let leader = outcome.state.combatant(a(0)).expect("A1");
    assert_eq!(leader.energy.blue, 3);
    // Only the next turn's grant is red.
    assert_eq!(leader.energy.red, 3);
}

// ============================================================================
// Control Effects
// ============================================================================

#[test]
fn reflected_debuff_lands_on_the_caster() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[act(a(2), "rend", b(2))],
        &[act(b(2), "mirror", b(2))],
    );

    assert_eq!(outcome.log[1].skill_name, "Rend");
    assert_eq!(
        outcome.log[1].result.effects,
        vec![
            EffectEntry::status_remove(b(2), "ReflectDebuff"),
            EffectEntry::status_apply(a(2), "Bleeding (reflected)"),
        ]
    );
    assert!(outcome.state.combatant(a(2)).expect("A3").has_status(&StatusTag::Bleeding));
    let holder = outcome.state.combatant(b(2)).expect("B3");
    assert!(!holder.has_status(&StatusTag::Bleeding));
    assert!(!holder.has_status(&StatusTag::ReflectDebuff));
}

#[test]
fn banish_cancels_this_turn_and_blocks_the_next() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let turn1 = resolve(
        &env,
        &state,
        &[act(a(0), "exile", b(0))],
        &[act(b(0), "jab", a(0))],
    );
    assert_eq!(
        turn1.log[0].result.effects,
        vec![EffectEntry::cancel(b(0), "banished")]
    );
    let jab = &turn1.log[1];
    assert_eq!(jab.skill_name, "CANCELLED");
    assert_eq!(jab.result.reason, Some(CancelReason::Cancelled));
    assert_eq!(hp(&turn1.state, a(0)), 100);

    let turn2 = resolve(&env, &turn1.state, &[], &[act(b(0), "jab", a(0))]);
    assert_eq!(turn2.log[0].skill_name, "BANISHED");
    assert_eq!(turn2.log[0].result.reason, Some(CancelReason::Banished));
    assert_eq!(hp(&turn2.state, a(0)), 100);

    let turn3 = resolve(&env, &turn2.state, &[], &[act(b(0), "jab", a(0))]);
    assert!(turn3.log[0].result.success);
    assert_eq!(hp(&turn3.state, a(0)), 80);
}

#[test]
fn self_stun_cancels_the_casters_later_actions() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, PLAIN, PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "overcharge", b(0)), act(a(0), "jab", b(1))],
        &[act(b(0), "jab", a(0))],
    );

    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::cancel(b(0), "stunned"),
            EffectEntry::cancel(a(0), "self-stunned"),
        ]
    );
    assert!(outcome.log[1..].iter().all(|e| e.skill_name == "CANCELLED"));
    assert_eq!(outcome.log.len(), 3);
    assert_eq!(hp(&outcome.state, a(0)), 100);
    assert_eq!(hp(&outcome.state, b(1)), 100);
}

// ============================================================================
// Marker Passives
// ============================================================================

#[test]
fn shield_on_color_fires_only_for_that_color() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, ["aegis", "bravo", "charlie"], PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "jab", b(0)), act(a(0), "zap", b(1))],
        &[],
    );

    let holder = outcome.state.combatant(a(0)).expect("A1");
    assert!(holder.has_marker(&PassiveMarker::ShieldOnColor {
        color: EnergyColor::Red,
        shield: 4,
    }));
    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::damage(b(0), 20),
            EffectEntry::shield(a(0), 4).with_detail("passive"),
        ]
    );
    assert_eq!(outcome.log[1].result.effects, vec![EffectEntry::damage(b(1), 7)]);
    assert_eq!(holder.shield, 4);
}

#[test]
fn proc_dot_rides_on_matching_hits() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, ["viper", "bravo", "charlie"], PLAIN);

    let outcome = resolve(
        &env,
        &state,
        &[act(a(0), "jab", b(0)), act(a(0), "zap", b(1))],
        &[],
    );

    assert!(outcome.state.combatant(a(0)).expect("A1").has_marker(
        &PassiveMarker::ProcDot {
            nature: DamageNature::Knt,
            value: 3,
        }
    ));
    assert_eq!(
        outcome.log[0].result.effects,
        vec![
            EffectEntry::damage(b(0), 20),
            EffectEntry::status_apply(b(0), "DoT(3/turn)"),
        ]
    );
    // The proc DoT ticks once at cleanup; volt hits leave nothing behind.
    assert_eq!(hp(&outcome.state, b(0)), 77);
    assert_eq!(hp(&outcome.state, b(1)), 93);
    assert!(!outcome.state.combatant(b(0)).expect("B1").has_status(&StatusTag::Dot));
}

#[test]
fn recycling_bonus_raises_the_burn_reward() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let mut state = start(&roster, &rng, &config, ["scrapper", "bravo", "charlie"], PLAIN);
    for side in TeamSide::BOTH {
        state
            .player_mut(side)
            .queue_burn([EnergyColor::Red, EnergyColor::Red]);
    }

    let outcome = resolve(&env, &state, &[], &[]);

    assert!(
        outcome
            .state
            .combatant(a(0))
            .expect("A1")
            .has_marker(&PassiveMarker::RecyclingBonus { reward: 3 })
    );
    // One leftover red plus three drawn plus three banked.
    assert_eq!(team_pool(&outcome.state.player_a).red, 7);
    // Plain teams bank one per pair.
    assert_eq!(team_pool(&outcome.state.player_b).red, 5);
}

#[test]
fn visible_pool_hides_opponents_without_a_reveal_marker() {
    let roster = armory();
    let rng = Constant(0);
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &rng, &config);
    let state = start(&roster, &rng, &config, ["seer", "bravo", "charlie"], PLAIN);

    assert_eq!(
        state.visible_pool(TeamSide::A, TeamSide::A),
        Some(team_pool(&state.player_a))
    );
    // The marker is only laid down by the first passive wave.
    assert_eq!(state.visible_pool(TeamSide::A, TeamSide::B), None);

    let outcome = resolve(&env, &state, &[], &[]);
    assert_eq!(
        outcome.state.visible_pool(TeamSide::A, TeamSide::B),
        Some(team_pool(&outcome.state.player_b))
    );
    assert_eq!(outcome.state.visible_pool(TeamSide::B, TeamSide::A), None);

    let mut blinded = outcome.state.clone();
    kill(&mut blinded, a(0));
    assert_eq!(blinded.visible_pool(TeamSide::A, TeamSide::B), None);
}

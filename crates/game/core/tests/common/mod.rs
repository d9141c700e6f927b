//! Shared fixtures for arena-core integration tests.
#![allow(dead_code)]

use arena_core::{
    ArenaConfig, ArenaEnv, CharacterDef, CharacterId, CombatantId, DamageNature, DamageSpec,
    EffectKind, EnergyColor, Lineage, MatchAction, MatchState, PassiveDef, PassiveEffect,
    RngOracle, Role, Roster, Skill, TeamSide, TeamSpec, WaveCategory, initialize,
};

/// Oracle that returns the same value for every seed.
///
/// `Constant(0)` makes every weighted draw land on the first color with
/// weight and every d100 roll come up 1; `Constant(99)` rolls 100.
#[derive(Clone, Copy, Debug)]
pub struct Constant(pub u32);

impl RngOracle for Constant {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

pub fn a(slot: u8) -> CombatantId {
    CombatantId::new(TeamSide::A, slot)
}

pub fn b(slot: u8) -> CombatantId {
    CombatantId::new(TeamSide::B, slot)
}

pub fn act(caster: CombatantId, skill: &str, target: CombatantId) -> MatchAction {
    MatchAction::new(caster, skill, target)
}

fn strike(id: &str, name: &str, wave: WaveCategory, damage: u32) -> Skill {
    Skill::new(id, name, wave, DamageNature::Knt)
        .with_cost(EnergyColor::Red, 1)
        .with_effect(EffectKind::Damage(DamageSpec::flat(damage)))
}

/// Skill menu shared by every test fighter.
pub fn drill_skills() -> Vec<Skill> {
    vec![
        strike("jab", "Jab", WaveCategory::Act, 20),
        strike("hit8", "Tap", WaveCategory::Act, 8),
        strike("hit10", "Knock", WaveCategory::Act, 10),
        strike("quick", "Quick Draw", WaveCategory::Inst, 5),
        strike("finisher", "Finisher", WaveCategory::Afl, 10),
        strike("once", "Overload", WaveCategory::Act, 10).with_usage_limit(1),
        Skill::new("zap", "Zap", WaveCategory::Act, DamageNature::Vlt)
            .with_cost(EnergyColor::Yellow, 1)
            .with_effect(EffectKind::Damage(DamageSpec::flat(7))),
        Skill::new("stun_bolt", "Stun Bolt", WaveCategory::Ctrl, DamageNature::Vlt)
            .with_cost(EnergyColor::Red, 1)
            .with_effect(EffectKind::Stun {
                turns: 1,
                self_turns: 0,
            }),
        Skill::new("hush", "Hush", WaveCategory::Ctrl, DamageNature::Vlt).with_effect(
            EffectKind::Silence {
                nature: DamageNature::Knt,
                duration: 2,
            },
        ),
        Skill::new("mark", "Mark", WaveCategory::Ctrl, DamageNature::Crs).with_effect(
            EffectKind::Vulnerability {
                value: 5,
                duration: 1,
            },
        ),
        Skill::new("reverse", "Reverse", WaveCategory::Inst, DamageNature::Vlt)
            .with_effect(EffectKind::InvertPriority),
        Skill::new("drone", "Drone", WaveCategory::Act, DamageNature::Knt).with_effect(
            EffectKind::Summon {
                name: "Drone".into(),
                damage: 6,
                duration: 3,
            },
        ),
        Skill::new("venom", "Venom", WaveCategory::Afl, DamageNature::Crs).with_effect(
            EffectKind::Dot {
                value: 4,
                duration: 2,
            },
        ),
    ]
}

pub fn fighter(id: &str, lineage: Lineage, passive: Option<PassiveDef>) -> CharacterDef {
    CharacterDef {
        id: CharacterId::new(id),
        name: id.to_uppercase(),
        lineage,
        roles: vec![Role::Attacker],
        base_hp: 100,
        is_starter: true,
        passive,
        skills: drill_skills(),
    }
}

pub fn passive(name: &str, effect: PassiveEffect) -> Option<PassiveDef> {
    Some(PassiveDef {
        name: name.into(),
        effects: vec![effect],
    })
}

/// Plain fighters plus one holder for each passive under test.
pub fn roster() -> Roster {
    [
        fighter("alpha", Lineage::Iron, None),
        fighter("bravo", Lineage::Iron, None),
        fighter("charlie", Lineage::Iron, None),
        fighter(
            "bulwark",
            Lineage::Iron,
            passive(
                "Bulwark",
                PassiveEffect::Armor {
                    value: 10,
                    unpierceable: true,
                },
            ),
        ),
        fighter(
            "phantom",
            Lineage::Neon,
            passive("Flicker", PassiveEffect::Evasion { percent: None }),
        ),
        fighter(
            "martyr",
            Lineage::Void,
            passive("Last Rites", PassiveEffect::Martyr { heal_allies: 15 }),
        ),
        fighter(
            "mourner",
            Lineage::Void,
            passive(
                "Grief",
                PassiveEffect::OnAllyDeath {
                    gain: arena_core::EnergyPool::of(EnergyColor::Blue, 2),
                },
            ),
        ),
    ]
    .into_iter()
    .collect()
}

pub const PLAIN: [&str; 3] = ["alpha", "bravo", "charlie"];

/// Builds a match between two lineups with the given oracle.
pub fn start(
    roster: &Roster,
    rng: &dyn RngOracle,
    config: &ArenaConfig,
    team_a: [&str; 3],
    team_b: [&str; 3],
) -> MatchState {
    let env = ArenaEnv::new(roster, rng, config);
    initialize(
        &env,
        7,
        &TeamSpec::new("player-a", team_a),
        &TeamSpec::new("player-b", team_b),
    )
    .expect("fixture lineups are valid")
}

/// Marks a combatant as already dead.
pub fn kill(state: &mut MatchState, id: CombatantId) {
    let c = state.combatant_mut(id).expect("combatant exists");
    c.hp = 0;
    c.alive = false;
}

//! Deterministic resolution engine for three-versus-three arena matches.
//!
//! `arena-core` defines the canonical combat rules (energy economy, effect
//! pipeline, five-wave turn resolution, passives, win evaluation) and exposes
//! pure APIs shared by the runtime and offline tools. Every turn flows through
//! [`engine::resolve_turn`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod skill;
pub mod state;

pub use action::{
    ActionResult, CancelReason, EffectEntry, EffectEntryKind, MatchAction, TurnLogEntry,
};
pub use config::ArenaConfig;
pub use economy::{can_afford, caster_can_afford, projected_pool, team_pool};
pub use engine::{
    ArenaEngine, SetupError, TeamSpec, TurnOutcome, evaluate_winner, initialize, resolve_turn,
    validate_team,
};
pub use env::{
    ArenaEnv, CharacterDef, Dice, Lineage, PassiveDef, PassiveEffect, PcgRng, RngOracle, Role,
    RollContext, Roster, RosterOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use skill::{
    DamageNature, DamageSpec, EffectKind, ExecutionPhase, ShieldSpec, Skill, SkillReach,
    StatusSpec, WaveCategory,
};
pub use state::{
    ActiveStatus, CharacterId, CombatantId, CombatantState, EnergyColor, EnergyPool, MatchState,
    PassiveMarker, Phase, PlayerState, SkillId, StatusDuration, StatusKind, StatusTag, TeamSide,
    Winner,
};

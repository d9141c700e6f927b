mod combatant;
mod common;
mod energy;
mod player;
mod status;

pub use combatant::CombatantState;
pub use common::{CharacterId, CombatantId, SkillId, TeamSide};
pub use energy::{EnergyColor, EnergyPool};
pub use player::{PlayerState, Team};
pub use status::{
    ActiveStatus, PassiveMarker, StatusDuration, StatusKind, StatusList, StatusTag,
};

//! Match assembly from roster data.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::ArenaConfig;
use crate::economy;
use crate::env::{ArenaEnv, CharacterDef, Dice, RosterOracle};
use crate::state::{
    CharacterId, CombatantId, CombatantState, MatchState, PlayerState, Team, TeamSide,
};

use super::SetupError;

/// One side's lineup as chosen before the match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamSpec {
    pub player_id: String,
    /// Characters in positional order.
    pub characters: Vec<CharacterId>,
}

impl TeamSpec {
    pub fn new<I, C>(player_id: impl Into<String>, characters: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CharacterId>,
    {
        Self {
            player_id: player_id.into(),
            characters: characters.into_iter().map(Into::into).collect(),
        }
    }
}

/// Checks that a lineup names exactly [`ArenaConfig::TEAM_SIZE`] distinct,
/// known characters and returns their definitions in order.
pub fn validate_team<'r>(
    roster: &'r dyn RosterOracle,
    side: TeamSide,
    characters: &[CharacterId],
) -> Result<Vec<&'r CharacterDef>, SetupError> {
    if characters.len() != ArenaConfig::TEAM_SIZE {
        return Err(SetupError::TeamSize {
            side,
            expected: ArenaConfig::TEAM_SIZE,
            found: characters.len(),
        });
    }

    let mut seen = BTreeSet::new();
    characters
        .iter()
        .map(|id| {
            if !seen.insert(id) {
                return Err(SetupError::DuplicateCharacter {
                    side,
                    character: id.clone(),
                });
            }
            roster
                .character(id)
                .ok_or_else(|| SetupError::UnknownCharacter {
                    side,
                    character: id.clone(),
                })
        })
        .collect()
}

fn build_player(
    roster: &dyn RosterOracle,
    side: TeamSide,
    spec: &TeamSpec,
) -> Result<PlayerState, SetupError> {
    let defs = validate_team(roster, side, &spec.characters)?;
    let team: Team = defs
        .into_iter()
        .enumerate()
        .map(|(slot, def)| {
            CombatantState::new(
                CombatantId::new(side, slot as u8),
                def.id.clone(),
                def.name.clone(),
                def.base_hp,
                def.skills.clone(),
            )
        })
        .collect();
    Ok(PlayerState::new(spec.player_id.clone(), side, team))
}

/// Builds the opening state and performs the turn-1 energy grant.
pub fn initialize(
    env: &ArenaEnv<'_>,
    seed: u64,
    team_a: &TeamSpec,
    team_b: &TeamSpec,
) -> Result<MatchState, SetupError> {
    let player_a = build_player(env.roster, TeamSide::A, team_a)?;
    let player_b = build_player(env.roster, TeamSide::B, team_b)?;

    let mut state = MatchState::new(seed, player_a, player_b);
    let mut dice = Dice::new(env.rng, seed, state.turn);
    economy::grant_energy(&mut state, env, &mut dice);

    debug!(seed, "match initialized");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Lineage, PcgRng, Role, Roster};

    fn def(id: &str) -> CharacterDef {
        CharacterDef {
            id: CharacterId::new(id),
            name: id.into(),
            lineage: Lineage::Neon,
            roles: vec![Role::Controller],
            base_hp: 90,
            is_starter: true,
            passive: None,
            skills: Vec::new(),
        }
    }

    fn roster() -> Roster {
        ["a", "b", "c", "d"].into_iter().map(def).collect()
    }

    fn ids(names: &[&str]) -> Vec<CharacterId> {
        names.iter().map(|&n| CharacterId::new(n)).collect()
    }

    #[test]
    fn rejects_bad_lineups() {
        let roster = roster();
        assert_eq!(
            validate_team(&roster, TeamSide::A, &ids(&["a", "b"])),
            Err(SetupError::TeamSize {
                side: TeamSide::A,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            validate_team(&roster, TeamSide::B, &ids(&["a", "b", "a"])),
            Err(SetupError::DuplicateCharacter {
                side: TeamSide::B,
                character: CharacterId::new("a")
            })
        );
        assert_eq!(
            validate_team(&roster, TeamSide::A, &ids(&["a", "b", "zed"])),
            Err(SetupError::UnknownCharacter {
                side: TeamSide::A,
                character: CharacterId::new("zed")
            })
        );
    }

    #[test]
    fn mirror_matches_get_distinct_ids() {
        let roster = roster();
        let rng = PcgRng;
        let config = ArenaConfig::default();
        let env = ArenaEnv::new(&roster, &rng, &config);
        let lineup = TeamSpec::new("p", ["a", "b", "c"]);

        let state = initialize(&env, 11, &lineup, &lineup).expect("valid lineups");
        let ids = state.combatant_ids();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0].to_string(), "A1");
        assert_eq!(ids[5].to_string(), "B3");
        assert!(state.combatants().all(|c| c.hp == 90 && c.alive));

        // Turn-1 grant: three colored on each leader, no White.
        for side in TeamSide::BOTH {
            let pool = economy::team_pool(state.player(side));
            assert_eq!(pool.total(), 3);
            assert_eq!(pool.white, 0);
            assert_eq!(state.player(side).team[0].energy.total(), 3);
        }
    }
}

//! Turn resolution state machine.
//!
//! [`resolve_turn`] is the single per-turn entry point. It is a pure function
//! of the prior state, both sides' submissions, and the [`ArenaEnv`]: the
//! input state is cloned, never mutated, and all randomness is drawn from the
//! injected oracle through [`Dice`].
//!
//! ## Turn Flow
//! 1. Resolve pending sacrifices for both teams
//! 2. Pay every submitted action's cost
//! 3. PASSIVE wave: passive triggers instead of queued actions
//! 4. INST, CTRL, ACT, AFL waves over the merged submissions
//! 5. Cleanup: status ticks, summon ticks, death check, death passives
//! 6. Winner evaluation, turn advance, and next turn's energy grant

mod cleanup;
mod errors;
mod outcome;
mod passives;
mod setup;
mod waves;

pub use errors::SetupError;
pub use outcome::evaluate_winner;
pub use setup::{TeamSpec, initialize, validate_team};
pub use waves::UNKNOWN_ACTION;

use tracing::debug;

use crate::action::execute::CancelledSet;
use crate::action::{MatchAction, TurnLogEntry};
use crate::economy;
use crate::env::{ArenaEnv, Dice};
use crate::skill::WaveCategory;
use crate::state::{MatchState, Phase, TeamSide};

/// Result of one resolution: the successor state and the turn's combat log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub state: MatchState,
    pub log: Vec<TurnLogEntry>,
}

/// Resolution engine bound to one environment.
///
/// Holds no match state, so one engine may resolve any number of matches.
#[derive(Clone, Copy)]
pub struct ArenaEngine<'a> {
    env: ArenaEnv<'a>,
}

impl<'a> ArenaEngine<'a> {
    pub fn new(env: ArenaEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &ArenaEnv<'a> {
        &self.env
    }

    pub fn initialize(
        &self,
        seed: u64,
        team_a: &TeamSpec,
        team_b: &TeamSpec,
    ) -> Result<MatchState, SetupError> {
        initialize(&self.env, seed, team_a, team_b)
    }

    pub fn resolve_turn(
        &self,
        state: &MatchState,
        actions_a: &[MatchAction],
        actions_b: &[MatchAction],
    ) -> TurnOutcome {
        resolve_turn(state, actions_a, actions_b, &self.env)
    }
}

/// Resolves one full turn. A finished match is returned unchanged with an empty log.
pub fn resolve_turn(
    state: &MatchState,
    actions_a: &[MatchAction],
    actions_b: &[MatchAction],
    env: &ArenaEnv<'_>,
) -> TurnOutcome {
    if state.is_finished() {
        return TurnOutcome {
            state: state.clone(),
            log: Vec::new(),
        };
    }

    let mut next = state.clone();
    let mut log = Vec::new();
    let mut dice = Dice::new(env.rng, next.seed, next.turn);
    next.phase = Phase::Resolution;
    debug!(
        turn = next.turn,
        actions_a = actions_a.len(),
        actions_b = actions_b.len(),
        "resolving turn"
    );

    for side in TeamSide::BOTH {
        economy::resolve_burn(next.player_mut(side), env.roster, env.config);
    }

    let queued = waves::queue(&next, actions_a, actions_b);
    waves::pay_costs(&mut next, &queued, &mut dice);

    let mut cancelled = CancelledSet::new();
    for wave in WaveCategory::ORDER {
        match wave {
            WaveCategory::Passive => passives::run_passive_wave(&mut next, env, &mut log),
            _ => waves::run_wave(
                wave,
                &queued,
                &mut next,
                env,
                &mut dice,
                &mut cancelled,
                &mut log,
            ),
        }
    }

    next.phase = Phase::Cleanup;
    cleanup::tick_statuses(&mut next);
    cleanup::summon_ticks(&mut next, &mut log);
    let fallen = cleanup::resolve_deaths(&mut next);
    passives::run_death_passives(&mut next, env, &fallen, &mut log);

    next.winner = evaluate_winner(&next);
    next.turn += 1;
    if next.winner.is_some() {
        next.phase = Phase::Finished;
        debug!(turn = state.turn, winner = ?next.winner, "match finished");
    } else {
        next.phase = Phase::Planning;
        let mut grant_dice = Dice::new(env.rng, next.seed, next.turn);
        economy::grant_energy(&mut next, env, &mut grant_dice);
    }

    TurnOutcome { state: next, log }
}

//! Win/loss evaluation.

use crate::state::{MatchState, TeamSide, Winner};

/// Decides the match from living combatants alone.
///
/// Both teams down at once is a draw; a team with any living member never loses.
pub fn evaluate_winner(state: &MatchState) -> Option<Winner> {
    match (state.player_a.is_eliminated(), state.player_b.is_eliminated()) {
        (true, true) => Some(Winner::Draw),
        (true, false) => Some(Winner::Side(TeamSide::B)),
        (false, true) => Some(Winner::Side(TeamSide::A)),
        (false, false) => None,
    }
}

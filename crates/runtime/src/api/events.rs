//! Events broadcast by the resolution worker.
use serde::{Deserialize, Serialize};

use arena_core::{MatchState, TeamSide, TurnLogEntry, Winner};

/// Everything observers of a match can react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A side's plan for `turn` passed validation and is waiting for the other side.
    SubmissionAccepted { side: TeamSide, turn: u32 },

    /// A side missed its deadline and passed for `turn`.
    TimedOut { side: TeamSide, turn: u32 },

    /// Both plans for `turn` were resolved.
    TurnResolved {
        turn: u32,
        log: Vec<TurnLogEntry>,
        /// Successor state, already persisted.
        state: Box<MatchState>,
    },

    /// The match reached a terminal result, by elimination or forfeit.
    MatchFinished {
        winner: Winner,
        turn: u32,
        forfeited_by: Option<TeamSide>,
    },
}

impl MatchEvent {
    pub fn turn(&self) -> u32 {
        match self {
            Self::SubmissionAccepted { turn, .. }
            | Self::TimedOut { turn, .. }
            | Self::TurnResolved { turn, .. }
            | Self::MatchFinished { turn, .. } => *turn,
        }
    }
}

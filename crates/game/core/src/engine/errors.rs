//! Errors raised while assembling a match.
//!
//! Resolution itself never fails; these only surface from [`initialize`](super::initialize).

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, TeamSide};

/// Team composition rejected at match setup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("team {side} fields {found} combatants, expected {expected}")]
    TeamSize {
        side: TeamSide,
        expected: usize,
        found: usize,
    },

    #[error("team {side} lists {character} more than once")]
    DuplicateCharacter { side: TeamSide, character: CharacterId },

    #[error("team {side} references unknown character {character}")]
    UnknownCharacter { side: TeamSide, character: CharacterId },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TeamSize { .. } => "SETUP_TEAM_SIZE",
            Self::DuplicateCharacter { .. } => "SETUP_DUPLICATE_CHARACTER",
            Self::UnknownCharacter { .. } => "SETUP_UNKNOWN_CHARACTER",
        }
    }
}

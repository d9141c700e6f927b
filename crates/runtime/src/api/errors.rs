//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, action providers,
//! and submission validation so clients can bubble them up with consistent
//! context.
use thiserror::Error;
use tokio::sync::oneshot;

use arena_core::{
    CombatantId, EnergyColor, ErrorSeverity, GameError, Phase, SetupError, SkillId, TeamSide,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("team {side} action provider not set")]
    ProviderNotSet { side: TeamSide },

    #[error("team {side} action provider failed: {message}")]
    Provider { side: TeamSide, message: String },

    #[error("runtime requires a roster and both teams before building")]
    MissingTeams,

    #[error("resolution worker command channel closed")]
    CommandChannelClosed,

    #[error("resolution worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("resolution worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(e) => e.severity(),
            Self::Submission(e) => e.severity(),
            Self::ProviderNotSet { .. } | Self::MissingTeams => ErrorSeverity::Validation,
            Self::Provider { .. } => ErrorSeverity::Recoverable,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Internal
            }
            Self::Repository(RepositoryError::CorruptedData(_)) => ErrorSeverity::Fatal,
            Self::Repository(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(e) => e.error_code(),
            Self::Submission(e) => e.error_code(),
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::Provider { .. } => "RUNTIME_PROVIDER_FAILED",
            Self::MissingTeams => "RUNTIME_MISSING_TEAMS",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}

/// A submission rejected before it reaches the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("match is finished")]
    MatchFinished,

    #[error("submissions are closed while the match is in {phase}")]
    NotPlanning { phase: Phase },

    #[error("team {side} already submitted for turn {turn}")]
    AlreadySubmitted { side: TeamSide, turn: u32 },

    #[error("no combatant {caster} in this match")]
    UnknownCaster { caster: CombatantId },

    #[error("team {side} cannot command {caster}")]
    ForeignCaster { side: TeamSide, caster: CombatantId },

    #[error("{caster} is down")]
    CasterDown { caster: CombatantId },

    #[error("{caster} already has an action this turn")]
    DuplicateCaster { caster: CombatantId },

    #[error("{caster} has no skill {skill}")]
    UnknownSkill { caster: CombatantId, skill: SkillId },

    #[error("{skill} is a passive and cannot be cast")]
    PassiveSkill { skill: SkillId },

    #[error("{caster} has used {skill} as often as allowed")]
    UsageExhausted { caster: CombatantId, skill: SkillId },

    #[error("no combatant {target} in this match")]
    UnknownTarget { target: CombatantId },

    #[error("team {side} cannot sacrifice {color}: not enough held")]
    BurnUnavailable { side: TeamSide, color: EnergyColor },

    #[error("team {side} cannot afford {skill} for {caster}")]
    Unaffordable {
        side: TeamSide,
        caster: CombatantId,
        skill: SkillId,
    },
}

impl GameError for SubmissionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadySubmitted { .. } | Self::NotPlanning { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchFinished => "SUBMIT_MATCH_FINISHED",
            Self::NotPlanning { .. } => "SUBMIT_NOT_PLANNING",
            Self::AlreadySubmitted { .. } => "SUBMIT_ALREADY_SUBMITTED",
            Self::UnknownCaster { .. } => "SUBMIT_UNKNOWN_CASTER",
            Self::ForeignCaster { .. } => "SUBMIT_FOREIGN_CASTER",
            Self::CasterDown { .. } => "SUBMIT_CASTER_DOWN",
            Self::DuplicateCaster { .. } => "SUBMIT_DUPLICATE_CASTER",
            Self::UnknownSkill { .. } => "SUBMIT_UNKNOWN_SKILL",
            Self::PassiveSkill { .. } => "SUBMIT_PASSIVE_SKILL",
            Self::UsageExhausted { .. } => "SUBMIT_USAGE_EXHAUSTED",
            Self::UnknownTarget { .. } => "SUBMIT_UNKNOWN_TARGET",
            Self::BurnUnavailable { .. } => "SUBMIT_BURN_UNAVAILABLE",
            Self::Unaffordable { .. } => "SUBMIT_UNAFFORDABLE",
        }
    }
}

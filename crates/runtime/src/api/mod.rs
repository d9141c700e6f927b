//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or infrastructure.

pub mod errors;
pub mod events;
pub mod handle;
pub mod providers;
pub mod submission;

pub use errors::{Result, RuntimeError, SubmissionError};
pub use events::MatchEvent;
pub use handle::{MatchHandle, SubmitOutcome};
pub use providers::{ActionProvider, PassActionProvider, ScriptedActionProvider};
pub use submission::{Submission, validate_submission};

//! Action domain: submitted actions, the effect pipeline, and the log format.
//!
//! # Module Structure
//!
//! - `types`: [`MatchAction`] input and the [`TurnLogEntry`] result shape
//! - `execute`: effect pipeline that applies one action to the working state
//! - `root`: log commitments for replay verification (serde feature)

pub mod execute;
mod root;
mod types;

#[cfg(feature = "serde")]
pub use root::compute_log_root;
pub use types::{
    ActionResult, CancelReason, EffectEntry, EffectEntryKind, MatchAction, TurnLogEntry,
};

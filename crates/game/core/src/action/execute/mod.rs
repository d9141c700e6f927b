//! Effect pipeline: executes one resolved action against the working state.
//!
//! The pipeline never fails. Missing targets turn target-bound effects into
//! no-ops, and every observable change is recorded as an
//! [`EffectEntry`](crate::action::EffectEntry).
//!
//! ## Layout
//!
//! - `context`: [`EffectContext`] shared by all effects of one action
//! - `damage`: primary hit sequencing and secondary damage
//! - `effects`: exhaustive dispatch over [`EffectKind`](crate::skill::EffectKind)
//! - `pipeline`: orchestration (effect ordering, caster passives)

mod context;
mod damage;
mod effects;
mod pipeline;

pub use context::{CancelledSet, EffectContext};
pub use pipeline::execute;

/// Rounds `amount * percent / 100` to the nearest integer.
pub(crate) fn percent_of(amount: u32, percent: u32) -> u32 {
    let scaled = (amount as u64 * percent as u64 + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

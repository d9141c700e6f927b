//! Execution phases for effect ordering.

/// Execution phase for effect ordering within one action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionPhase {
    /// Costs the caster pays before the hit (self damage).
    PreEffect = 0,

    /// The primary hit and its secondary damage.
    #[default]
    Primary = 1,

    /// Heals, shields, statuses, and every other non-damage family.
    PostEffect = 2,

    /// Match-wide flags that must land after everything else.
    Finalize = 3,
}

//! Commitments over a turn's combat log.

#[cfg(feature = "serde")]
use crate::action::TurnLogEntry;

/// SHA-256 over the bincode encoding of each log entry, in order.
///
/// Spectators and replay verifiers compare this root against the one the
/// server broadcast to detect divergent logs.
#[cfg(feature = "serde")]
pub fn compute_log_root(entries: &[TurnLogEntry]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for entry in entries {
        if let Ok(bytes) = bincode::serialize(entry) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}

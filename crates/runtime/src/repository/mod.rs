//! Repository layer for dynamic match data.
//!
//! Repositories handle data that CHANGES during a match:
//! - The latest match state (for resume and audit)
//! - Per-turn combat logs (for replay and history views)
//!
//! Static content (characters, tunables) comes from `arena-content`, not
//! repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileMatchRepo;
pub use memory::InMemoryMatchRepo;
pub use traits::{MatchRepository, TurnRecord};

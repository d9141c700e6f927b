//! Worker tasks that back the runtime orchestration.
//!
//! The resolution worker owns the authoritative match state and is the only
//! place the engine is invoked.

mod resolution;

pub use resolution::{Command, ResolutionWorker, WorkerContext};

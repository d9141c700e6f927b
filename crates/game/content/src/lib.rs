//! Data-driven arena content and loaders.
//!
//! This crate houses the static character catalogue and the tunables file:
//! - Character roster (data-driven via RON)
//! - Arena configuration (data-driven via TOML)
//! - A static audit that flags suspicious roster entries before a match uses them
//!
//! Content is consumed through [`arena_core::RosterOracle`] and never appears in
//! match state beyond the ids and skill copies taken at initialization.

pub mod audit;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use audit::{IssueLevel, RosterIssue, audit_roster};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};

//! Action provider implementations for automated sides.

pub mod random;

pub use random::RandomActionProvider;

//! Engine error types

use crate::config::ConfigError;
use std::collections::TryReserveError;
use thiserror::Error;

/// Result type for fallible engine operations
pub type ParticleResult<T> = Result<T, ParticleError>;

/// Errors reported by emitter and particle system operations
///
/// Running out of free particle slots is deliberately not an error: spawning
/// silently caps at the available capacity.
#[derive(Error, Debug)]
pub enum ParticleError {
    /// Backing storage for a pool or registry could not be reserved
    #[error("Allocation failed for {what}: could not reserve {requested} slots")]
    Allocation {
        /// Which store was being grown
        what: &'static str,
        /// Number of slots requested
        requested: usize,
        /// Underlying allocator failure
        #[source]
        source: TryReserveError,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

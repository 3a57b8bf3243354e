//! Crate-wide error type.

/// Errors raised by the optimizer.
///
/// Every variant is a precondition violation reported at the point of
/// detection. A run that never reaches its value target is not an error;
/// it ends with [`Termination::Exhausted`](crate::ga::Termination::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operation received arguments that break its contract
    /// (length mismatch, empty population, empty genome, bad weights).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An [`EvolutionConfig`](crate::ga::EvolutionConfig) failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

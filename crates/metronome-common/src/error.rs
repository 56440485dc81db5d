use thiserror::Error;

/// Scheduler error types.
///
/// Failures are immediate and local: construction rejects bad parameters,
/// and wait computation rejects use before an epoch has been established.
/// There are no internal retries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedError {
    /// A construction parameter is unusable (non-positive or non-finite).
    #[error("invalid configuration: {parameter} must be a positive finite number, got {value}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A wait was requested before `reset` established an epoch.
    #[error("not initialized: reset() must be called before requesting a wait")]
    NotInitialized,
}

/// Convenience type alias for scheduler operations.
pub type SchedResult<T> = Result<T, SchedError>;

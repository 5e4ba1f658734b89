use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TariffError {
    /// Consumption or a meter reading is negative, NaN, or infinite.
    #[error("consumption must be a finite non-negative number, got {0}")]
    InvalidInput(f64),

    /// The pipeline produced something it must never produce. This is a bug, not a caller error.
    #[error("inconsistent bill state: {0}")]
    InconsistentState(String),
}

use thiserror::Error;

/// Failures raised while reducing a raw series into climate signals.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// The series is malformed or a year boundary marker is missing.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// An averaging window holds no usable data points.
    #[error("insufficient data in {window} window")]
    InsufficientData { window: &'static str },

    /// The baseline rainfall average is zero, so the percentage change has no value.
    #[error("rainfall change is undefined: baseline average rainfall is zero")]
    DivisionUndefined,
}

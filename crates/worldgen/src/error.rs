use thiserror::Error;

/// Rejected generation parameters. Raised before any field is sampled, so a
/// failed call never produces a partial mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("region table is empty")]
    NoRegions,

    #[error("region '{name}' has threshold {threshold}, expected a value in [0, 1]")]
    ThresholdOutOfRange { name: String, threshold: f32 },

    #[error("region '{name}' threshold {threshold} is lower than the previous threshold {previous}")]
    ThresholdsNotAscending {
        name: String,
        threshold: f32,
        previous: f32,
    },

    #[error("{field} must be at least 1")]
    ZeroExtent { field: &'static str },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("noise map is {actual}x{actual}, grid expects {expected}x{expected}")]
    FieldSizeMismatch { expected: usize, actual: usize },
}

/// Failure to load a settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] GenerationError),
}

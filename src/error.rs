//! Error types for brood.
//!
//! Errors are split by concern: a [NetworkError] is local to one network or genome, a
//! [ConfigError] rejects malformed [TrainingParameters](crate::config::TrainingParameters),
//! and a [PopulationError] aborts a whole generation step.

use thiserror::Error;

/// Failures of a single network: forward passes and genome import.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    /// Input vector length differs from the input layer size
    #[error("dimension mismatch: expected {expected} input activations, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Genome structure disagrees with its topology
    #[error("invalid genome: {0}")]
    InvalidGenome(String),

    /// A gene is NaN or infinite
    #[error("non-finite gene at index {index}: {value}")]
    NonFiniteGene { index: usize, value: f64 },
}

/// Malformed training configuration, reported at construction time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("topology needs an input and at least one output layer, got {0} layer(s)")]
    TopologyTooShort(usize),

    #[error("layer {0} has no neurons")]
    EmptyLayer(usize),

    #[error("population needs at least 2 individuals, got {0}")]
    PopulationTooSmall(usize),

    #[error("expected {expected} bodies for the population, got {actual}")]
    BodyCount { expected: usize, actual: usize },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Strength { name: &'static str, value: f64 },

    #[error("mutation schedule is empty")]
    EmptySchedule,

    #[error("mutation schedule boundaries must ascend, {next} follows {prev}")]
    UnsortedSchedule { prev: usize, next: usize },

    #[error("invalid survival curve: {0}")]
    SurvivalCurve(String),
}

/// Failures of a generation step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopulationError {
    /// Every individual was culled, nothing is left to breed from
    #[error("population collapsed at generation {generation}: no survivors")]
    Collapse { generation: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Failures while saving or loading JSON documents.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document parsed, but its content is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

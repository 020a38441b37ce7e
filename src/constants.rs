//! Centralized defaults for training parameters.
//!
//! All defaults are defined here with the `BROOD_` prefix, and feed
//! [TrainingParameters::default](crate::config::TrainingParameters).

// ============================================================================
// Network Parameters
// ============================================================================

/// Neuron count of each layer, input first
pub const BROOD_NEURON_COUNTS: [usize; 4] = [8, 16, 8, 4];

// ============================================================================
// Population Parameters
// ============================================================================

/// Number of individuals, held fixed for the whole run
pub const BROOD_POPULATION_COUNT: usize = 60;

/// Survival chance of the worst ranked individual
pub const BROOD_SURVIVAL_WORST: f64 = 0.0;

/// Survival chance of the best ranked individual
pub const BROOD_SURVIVAL_BEST: f64 = 1.0;

// ============================================================================
// Genetic Operator Parameters
// ============================================================================

/// Probability of swapping each gene between two children
pub const BROOD_CROSSOVER_RATE: f64 = 0.5;

/// Chance that offset mutation runs for a pair of children
pub const BROOD_OFFSET_GLOBAL_CHANCE: f64 = 1.0;

/// Per-gene probability of an offset mutation
pub const BROOD_OFFSET_PROBABILITY: f64 = 0.05;

/// Standard deviation of an offset mutation
pub const BROOD_OFFSET_STRENGTH: f64 = 0.5;

/// Chance that reset mutation runs for a pair of children
pub const BROOD_RESET_GLOBAL_CHANCE: f64 = 1.0;

/// Per-gene probability of a reset mutation
pub const BROOD_RESET_PROBABILITY: f64 = 0.01;

/// Reset mutations draw from `[-strength, strength]`
pub const BROOD_RESET_STRENGTH: f64 = 5.0;

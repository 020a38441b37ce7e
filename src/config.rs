//! Training configuration.
//!
//! [TrainingParameters] is plain data: build it with struct update syntax, the [params](crate::params)
//! macro, or load it from JSON. It is checked once by [TrainingParameters::validate] when a
//! population is built and never changes afterwards.

use crate::{
    constants::*,
    error::{ConfigError, PersistError},
    genome::Topology,
    mutation::MutationParams,
    network::WeightInit,
    persist::Persist,
    random::entropy_seed,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maps a normalised fitness rank (0 worst, 1 best) to a chance of surviving the cull.
///
/// Both the rank and the result are clamped to `[0, 1]`, and a NaN result counts as 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurvivalCurve {
    Constant(f64),
    Linear {
        worst: f64,
        best: f64,
    },
    /// Piecewise-linear through `(rank, chance)` keyframes sorted by rank, flat past either end
    Keys(Vec<(f64, f64)>),
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Default for SurvivalCurve {
    fn default() -> Self {
        Self::Linear {
            worst: BROOD_SURVIVAL_WORST,
            best: BROOD_SURVIVAL_BEST,
        }
    }
}

impl SurvivalCurve {
    pub fn evaluate(&self, x: f64) -> f64 {
        let x = if x.is_nan() { 0. } else { x.clamp(0., 1.) };
        let y = match self {
            Self::Constant(c) => *c,
            Self::Linear { worst, best } => worst + (best - worst) * x,
            Self::Keys(keys) => keyframes(keys, x),
            Self::Custom(f) => f(x),
        };
        if y.is_nan() {
            0.
        } else {
            y.clamp(0., 1.)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |v: &f64| (0. ..=1.).contains(v);
        match self {
            Self::Constant(c) if !unit(c) => Err(ConfigError::SurvivalCurve(format!(
                "constant chance {c} is outside [0, 1]"
            ))),
            Self::Linear { worst, best } if !(unit(worst) && unit(best)) => {
                Err(ConfigError::SurvivalCurve(format!(
                    "linear endpoints {worst}, {best} must lie in [0, 1]"
                )))
            }
            Self::Keys(keys) => {
                if keys.is_empty() {
                    return Err(ConfigError::SurvivalCurve("no keyframes".into()));
                }
                if let Some((x, y)) = keys.iter().find(|(x, y)| !(unit(x) && unit(y))) {
                    return Err(ConfigError::SurvivalCurve(format!(
                        "keyframe ({x}, {y}) lies outside the unit square"
                    )));
                }
                match keys.windows(2).find(|pair| pair[1].0 < pair[0].0) {
                    Some(pair) => Err(ConfigError::SurvivalCurve(format!(
                        "keyframe rank {} follows {}",
                        pair[1].0, pair[0].0
                    ))),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    /// Whether the curve never decreases, sampled at 65 evenly spaced ranks. A decreasing
    /// curve is legal but turns culling against the fittest.
    pub fn is_monotonic(&self) -> bool {
        const SAMPLES: usize = 64;
        (0..SAMPLES)
            .map(|i| {
                (
                    self.evaluate(i as f64 / SAMPLES as f64),
                    self.evaluate((i + 1) as f64 / SAMPLES as f64),
                )
            })
            .all(|(l, r)| l <= r)
    }
}

fn keyframes(keys: &[(f64, f64)], x: f64) -> f64 {
    let Some(&(x0, y0)) = keys.first() else {
        return 0.;
    };
    if x <= x0 {
        return y0;
    }
    for pair in keys.windows(2) {
        let ((xa, ya), (xb, yb)) = (pair[0], pair[1]);
        if x <= xb {
            return if xb > xa {
                ya + (yb - ya) * (x - xa) / (xb - xa)
            } else {
                yb
            };
        }
    }
    keys[keys.len() - 1].1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParameters {
    /// Seed of the population's generator, drawn from the OS when absent
    pub seed: Option<u64>,
    pub topology: Topology,
    /// How the first generation's networks are synthesized
    pub weight_init: WeightInit,
    pub population_count: usize,
    pub survival_curve: SurvivalCurve,
    pub crossover_rate: f64,
    pub offset_mutation: MutationParams,
    pub reset_mutation: MutationParams,
    /// Upper bound on generations for [Scenario::evolve](crate::scenario::Scenario::evolve)
    pub max_generations: Option<usize>,
}

impl Default for TrainingParameters {
    fn default() -> Self {
        Self {
            seed: None,
            topology: Topology::default(),
            weight_init: WeightInit::Xavier,
            population_count: BROOD_POPULATION_COUNT,
            survival_curve: SurvivalCurve::default(),
            crossover_rate: BROOD_CROSSOVER_RATE,
            offset_mutation: MutationParams::constant(
                BROOD_OFFSET_GLOBAL_CHANCE,
                BROOD_OFFSET_PROBABILITY,
                BROOD_OFFSET_STRENGTH,
            ),
            reset_mutation: MutationParams::constant(
                BROOD_RESET_GLOBAL_CHANCE,
                BROOD_RESET_PROBABILITY,
                BROOD_RESET_STRENGTH,
            ),
            max_generations: None,
        }
    }
}

impl TrainingParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_count < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_count));
        }
        if !(0. ..=1.).contains(&self.crossover_rate) {
            return Err(ConfigError::Probability {
                name: "crossover_rate",
                value: self.crossover_rate,
            });
        }
        if let WeightInit::Uniform { range } = self.weight_init {
            if !(range.is_finite() && range >= 0.) {
                return Err(ConfigError::Strength {
                    name: "weight_init range",
                    value: range,
                });
            }
        }
        self.survival_curve.validate()?;
        self.offset_mutation
            .validate("offset_mutation.global_chance")?;
        self.reset_mutation.validate("reset_mutation.global_chance")
    }

    /// The configured seed, or a fresh one from the OS
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(entropy_seed)
    }

    /// Read parameters from a JSON file and validate them
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PersistError> {
        let params = Self::from_file(path)?;
        params.validate()?;
        Ok(params)
    }
}

impl Persist for TrainingParameters {}

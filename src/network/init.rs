use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// How a freshly constructed network fills in its weights.
///
/// [WeightInit::None] and [WeightInit::Manual] synthesize nothing: weights and biases start at
/// zero and are expected to be overwritten from a genome. Manual marks a network whose weights
/// were taken verbatim from one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInit {
    #[default]
    None,
    Manual,
    /// Weights and bias drawn from `[-range, range]`
    Uniform { range: f64 },
    /// Glorot: `[-α, α]` with `α = sqrt(6 / (fan_in + fan_out))`
    Xavier,
    /// `[-α, α]` with `α = sqrt(6 / fan_in)`
    He,
}

impl WeightInit {
    /// Whether this strategy consumes randomness
    pub fn synthesizes(self) -> bool {
        !matches!(self, Self::None | Self::Manual)
    }

    /// Weights and bias for one neuron with `fan_in` inputs, whose layer feeds `fan_out` neurons.
    pub fn neuron(self, fan_in: usize, fan_out: usize, rng: &mut impl RngCore) -> (Vec<f64>, f64) {
        match self {
            Self::None | Self::Manual => (vec![0.; fan_in], 0.),
            Self::Uniform { range } => {
                let weights = symmetric(rng, fan_in, range);
                let bias = symmetric(rng, 1, range)[0];
                (weights, bias)
            }
            Self::Xavier => {
                let α = (6. / (fan_in + fan_out) as f64).sqrt();
                (symmetric(rng, fan_in, α), 0.)
            }
            Self::He => {
                let α = (6. / fan_in as f64).sqrt();
                (symmetric(rng, fan_in, α), 0.)
            }
        }
    }
}

/// `n` draws from `[-α, α]`. A non-finite or non-positive α yields zeros without drawing.
fn symmetric(rng: &mut impl RngCore, n: usize, α: f64) -> Vec<f64> {
    if !(α.is_finite() && α > 0.) {
        return vec![0.; n];
    }
    (0..n).map(|_| rng.random_range(-α..=α)).collect()
}

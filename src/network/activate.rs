//! Scalar activation functions, selected per layer through [ActivationKind].

use serde::{Deserialize, Serialize};

/// Slope applied to non-positive inputs by [leaky_relu]
pub const LEAKY_RELU_SLOPE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    #[default]
    Linear,
    Sigmoid,
    Relu,
    LeakyRelu,
    Tanh,
}

impl ActivationKind {
    pub const ALL: [Self; 5] = [
        Self::Linear,
        Self::Sigmoid,
        Self::Relu,
        Self::LeakyRelu,
        Self::Tanh,
    ];

    pub fn function(self) -> fn(f64) -> f64 {
        match self {
            Self::Linear => linear,
            Self::Sigmoid => sigmoid,
            Self::Relu => relu,
            Self::LeakyRelu => leaky_relu,
            Self::Tanh => tanh,
        }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        self.function()(x)
    }
}

pub fn linear(x: f64) -> f64 {
    x
}

pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + (-x).exp())
}

pub fn relu(x: f64) -> f64 {
    if x <= 0. {
        0.
    } else {
        x
    }
}

pub fn leaky_relu(x: f64) -> f64 {
    if x <= 0. {
        x * LEAKY_RELU_SLOPE
    } else {
        x
    }
}

pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

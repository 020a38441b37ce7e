use crate::{constants::BROOD_NEURON_COUNTS, error::ConfigError, network::ActivationKind};
use core::ops::Deref;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerSpec {
    pub neuron_count: usize,
    #[serde(default)]
    pub activation: ActivationKind,
}

impl LayerSpec {
    pub const fn new(neuron_count: usize, activation: ActivationKind) -> Self {
        Self {
            neuron_count,
            activation,
        }
    }
}

/// The fixed shape of a network: an input layer followed by one or more computing layers.
///
/// The input layer's activation kind is carried along but never applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayerSpec>", into = "Vec<LayerSpec>")]
pub struct Topology(Vec<LayerSpec>);

impl Topology {
    pub fn new(layers: Vec<LayerSpec>) -> Result<Self, ConfigError> {
        if layers.len() < 2 {
            return Err(ConfigError::TopologyTooShort(layers.len()));
        }
        if let Some(idx) = layers.iter().position(|l| l.neuron_count == 0) {
            return Err(ConfigError::EmptyLayer(idx));
        }
        Ok(Self(layers))
    }

    /// Every layer sized by `counts`, all sharing one activation
    pub fn uniform(counts: &[usize], activation: ActivationKind) -> Result<Self, ConfigError> {
        Self::new(
            counts
                .iter()
                .map(|&n| LayerSpec::new(n, activation))
                .collect(),
        )
    }

    #[inline]
    pub fn input(&self) -> &LayerSpec {
        &self.0[0]
    }

    #[inline]
    pub fn output(&self) -> &LayerSpec {
        &self.0[self.0.len() - 1]
    }

    /// Neuron count of the layer before `layer`, 0 for the input layer
    #[inline]
    pub fn fan_in(&self, layer: usize) -> usize {
        layer
            .checked_sub(1)
            .map_or(0, |prev| self.0[prev].neuron_count)
    }

    /// Neuron count of the layer after `layer`, 0 for the output layer
    #[inline]
    pub fn fan_out(&self, layer: usize) -> usize {
        self.0.get(layer + 1).map_or(0, |next| next.neuron_count)
    }

    /// Number of neurons carrying weights, ie. every neuron outside the input layer
    pub fn weighted_neurons(&self) -> usize {
        self.0[1..].iter().map(|l| l.neuron_count).sum()
    }

    /// Number of genes (weights and biases) in a genome of this shape
    pub fn gene_count(&self) -> usize {
        (1..self.0.len())
            .map(|l| self.0[l].neuron_count * (self.fan_in(l) + 1))
            .sum()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self(
            BROOD_NEURON_COUNTS
                .iter()
                .map(|&n| LayerSpec::new(n, ActivationKind::Tanh))
                .collect(),
        )
    }
}

impl Deref for Topology {
    type Target = [LayerSpec];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<LayerSpec>> for Topology {
    type Error = ConfigError;

    fn try_from(layers: Vec<LayerSpec>) -> Result<Self, Self::Error> {
        Self::new(layers)
    }
}

impl From<Topology> for Vec<LayerSpec> {
    fn from(topology: Topology) -> Self {
        topology.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ActivationKind::*;

    #[test]
    fn test_topology_rejects_short() {
        assert_eq!(
            Topology::new(vec![]),
            Err(ConfigError::TopologyTooShort(0))
        );
        assert_eq!(
            Topology::new(vec![LayerSpec::new(3, Linear)]),
            Err(ConfigError::TopologyTooShort(1))
        );
    }

    #[test]
    fn test_topology_rejects_empty_layer() {
        assert_eq!(
            Topology::uniform(&[2, 0, 1], Sigmoid),
            Err(ConfigError::EmptyLayer(1))
        );
    }

    #[test]
    fn test_fans() {
        let t = Topology::uniform(&[8, 16, 8, 4], Tanh).unwrap();
        assert_eq!(t.fan_in(0), 0);
        assert_eq!(t.fan_in(1), 8);
        assert_eq!(t.fan_in(3), 8);
        assert_eq!(t.fan_out(0), 16);
        assert_eq!(t.fan_out(2), 4);
        assert_eq!(t.fan_out(3), 0);
        assert_eq!(t.input().neuron_count, 8);
        assert_eq!(t.output().neuron_count, 4);
    }

    #[test]
    fn test_default_is_valid() {
        let t = Topology::default();
        assert_eq!(Topology::new(t.to_vec()), Ok(t));
    }

    #[test]
    fn test_counts() {
        let t = Topology::uniform(&[2, 3, 1], Relu).unwrap();
        assert_eq!(t.weighted_neurons(), 4);
        // 3 * (2 + 1) + 1 * (3 + 1)
        assert_eq!(t.gene_count(), 13);
    }

    #[test]
    fn test_serde_validates() {
        let ok: Topology = serde_json::from_str(
            r#"[{"neuron_count": 2, "activation": "linear"}, {"neuron_count": 1, "activation": "sigmoid"}]"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok.output().activation, Sigmoid);

        assert!(serde_json::from_str::<Topology>(r#"[{"neuron_count": 2}]"#).is_err());
        assert!(serde_json::from_str::<Topology>(
            r#"[{"neuron_count": 2}, {"neuron_count": 0}]"#
        )
        .is_err());
    }
}

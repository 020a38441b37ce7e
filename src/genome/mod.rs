//! The flat, network-independent encoding operated on by crossover and mutation.
//!
//! A [Genome] holds every non-input neuron's weights and bias, layer-major then neuron-major,
//! plus the topology needed to rebuild a network. Genes are enumerated in a canonical order:
//! for each neuron, its weights in order and then its bias. Every random operator walks genes
//! in that order, which keeps training runs reproducible.

pub mod topology;

pub use topology::{LayerSpec, Topology};

use crate::{error::NetworkError, network::WeightInit, persist::Persist};
use core::{hash::Hasher, iter::once};
use fxhash::FxHasher64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronGenes {
    pub weights: Vec<f64>,
    pub bias: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    topology: Topology,
    neurons: Vec<NeuronGenes>,
    weight_init: WeightInit,
}

impl Genome {
    /// Assemble a genome without checking it. Structure is checked by [Genome::validate], which
    /// runs on every import into a network.
    pub fn new(topology: Topology, neurons: Vec<NeuronGenes>, weight_init: WeightInit) -> Self {
        Self {
            topology,
            neurons,
            weight_init,
        }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn neurons(&self) -> &[NeuronGenes] {
        &self.neurons
    }

    #[inline]
    pub fn neurons_mut(&mut self) -> &mut [NeuronGenes] {
        &mut self.neurons
    }

    #[inline]
    pub fn weight_init(&self) -> WeightInit {
        self.weight_init
    }

    pub fn into_parts(self) -> (Topology, Vec<NeuronGenes>, WeightInit) {
        (self.topology, self.neurons, self.weight_init)
    }

    /// Number of genes, weights and biases together
    pub fn len(&self) -> usize {
        self.neurons.iter().map(|n| n.weights.len() + 1).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn genes(&self) -> impl Iterator<Item = &f64> {
        self.neurons
            .iter()
            .flat_map(|n| n.weights.iter().chain(once(&n.bias)))
    }

    pub fn genes_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.neurons.iter_mut().flat_map(|n| {
            let NeuronGenes { weights, bias } = n;
            weights.iter_mut().chain(once(bias))
        })
    }

    /// Check the genome against its topology: one entry per non-input neuron, each as long as
    /// the preceding layer, and every gene finite.
    pub fn validate(&self) -> Result<(), NetworkError> {
        let expected = self.topology.weighted_neurons();
        if self.neurons.len() != expected {
            return Err(NetworkError::InvalidGenome(format!(
                "expected {expected} neurons, got {}",
                self.neurons.len()
            )));
        }

        let mut neurons = self.neurons.iter().enumerate();
        for layer in 1..self.topology.len() {
            let fan_in = self.topology.fan_in(layer);
            for (idx, n) in neurons.by_ref().take(self.topology[layer].neuron_count) {
                if n.weights.len() != fan_in {
                    return Err(NetworkError::InvalidGenome(format!(
                        "neuron {idx} in layer {layer} has {} weights, expected {fan_in}",
                        n.weights.len()
                    )));
                }
            }
        }

        match self.genes().enumerate().find(|(_, g)| !g.is_finite()) {
            Some((index, value)) => Err(NetworkError::NonFiniteGene {
                index,
                value: *value,
            }),
            None => Ok(()),
        }
    }

    /// Hash of layer sizes and every gene, matching [Network::fingerprint](crate::Network::fingerprint)
    pub fn fingerprint(&self) -> u64 {
        let mut h = FxHasher64::default();
        for layer in self.topology.iter() {
            h.write_usize(layer.neuron_count);
        }
        for g in self.genes() {
            h.write_u64(g.to_bits());
        }
        h.finish()
    }
}

impl Persist for Genome {}

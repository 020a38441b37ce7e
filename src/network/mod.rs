//! Fixed-topology feedforward networks, the "brains" being evolved.
//!
//! A [Network] is built either freshly from a seed, drawing its initial weights in strict
//! layer, neuron, weight order, or from a [Genome] whose values are copied verbatim. Networks
//! are never mutated in place by evolution: a genome is exported, altered, and imported into a
//! new network.

pub mod activate;
pub mod init;
pub mod neuron;

pub use activate::ActivationKind;
pub use init::WeightInit;
pub use neuron::{Layer, Neuron};

use crate::{
    error::NetworkError,
    genome::{Genome, NeuronGenes, Topology},
    random::WyRng,
};
use core::hash::Hasher;
use fxhash::FxHasher64;

#[derive(Debug, Clone)]
pub struct Network {
    seed: u64,
    topology: Topology,
    init: WeightInit,
    layers: Vec<Layer>,
}

impl Network {
    /// A network whose weights are synthesized by `init` from a generator seeded with `seed`.
    /// Identical seeds and topologies give identical networks.
    pub fn new(seed: u64, topology: &Topology, init: WeightInit) -> Self {
        let mut rng = WyRng::seeded(seed);
        let mut layers = Vec::with_capacity(topology.len());
        layers.push(Layer::input(*topology.input()));
        for idx in 1..topology.len() {
            layers.push(Layer::new(
                topology[idx],
                topology.fan_in(idx),
                topology.fan_out(idx),
                init,
                &mut rng,
            ));
        }

        Self {
            seed,
            topology: topology.clone(),
            init,
            layers,
        }
    }

    /// Rebuild a network from a genome, taking ownership of its genes.
    ///
    /// The genome is validated against its own topology before anything is built, so a bad
    /// genome never yields a half-constructed network. Every gene is present in a valid genome,
    /// so `seed` is only recorded, nothing is drawn from it.
    pub fn from_genome(genome: Genome, seed: u64) -> Result<Self, NetworkError> {
        genome.validate()?;
        let (topology, neurons, init) = genome.into_parts();

        let mut layers = Vec::with_capacity(topology.len());
        layers.push(Layer::input(*topology.input()));
        let mut neurons = neurons.into_iter();
        for spec in topology[1..].iter() {
            layers.push(Layer::from_genes(
                *spec,
                neurons.by_ref().take(spec.neuron_count),
            ));
        }

        Ok(Self {
            seed,
            topology,
            init,
            layers,
        })
    }

    /// Deep copy of every weight and bias, layer by layer then neuron by neuron
    pub fn export_genome(&self) -> Genome {
        Genome::new(
            self.topology.clone(),
            self.layers[1..]
                .iter()
                .flat_map(|l| l.neurons().iter().map(Neuron::genes))
                .collect::<Vec<NeuronGenes>>(),
            WeightInit::Manual,
        )
    }

    /// Forward pass. Sets the input layer's activations directly, then computes every later
    /// layer from the one before it, and returns the output layer's activations.
    pub fn process(&mut self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        let expected = self.layers[0].len();
        if input.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                expected,
                actual: input.len(),
            });
        }

        self.layers[0].set_activations(input);
        let mut activations = input.to_vec();
        for layer in self.layers[1..].iter_mut() {
            activations = layer.compute(&activations);
        }
        Ok(activations)
    }

    /// Activations of the output layer as of the last [Network::process]
    pub fn output(&self) -> Vec<f64> {
        self.layers[self.layers.len() - 1].activations()
    }

    /// Index and value of the strongest output. The earliest index wins a tie, and outputs that
    /// are all `-inf` or NaN yield the first one.
    pub fn max_output_index(&self) -> (usize, f64) {
        let output = self.output();
        output
            .iter()
            .copied()
            .enumerate()
            .skip(1)
            .fold((0, output[0]), |(idx, max), (i, a)| {
                if a > max {
                    (i, a)
                } else {
                    (idx, max)
                }
            })
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn weight_init(&self) -> WeightInit {
        self.init
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Hash of layer sizes and every gene. Equal for networks holding the same values.
    pub fn fingerprint(&self) -> u64 {
        let mut h = FxHasher64::default();
        for layer in self.layers.iter() {
            h.write_usize(layer.len());
        }
        for neuron in self.layers[1..].iter().flat_map(|l| l.neurons()) {
            for w in neuron.weights() {
                h.write_u64(w.to_bits());
            }
            h.write_u64(neuron.bias().to_bits());
        }
        h.finish()
    }
}

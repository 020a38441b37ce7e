use super::{ActivationKind, WeightInit};
use crate::genome::{LayerSpec, NeuronGenes};
use rand::RngCore;

/// A single unit: a weight per input, a bias, and the activation it last produced.
#[derive(Debug, Clone)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
    activation: f64,
    σ: fn(f64) -> f64,
}

impl Neuron {
    pub fn new(weights: Vec<f64>, bias: f64, kind: ActivationKind) -> Self {
        Self {
            weights,
            bias,
            activation: 0.,
            σ: kind.function(),
        }
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn activation(&self) -> f64 {
        self.activation
    }

    #[inline]
    pub fn set_activation(&mut self, activation: f64) {
        self.activation = activation;
    }

    /// `σ(bias + Σ wᵢ·inputᵢ)`, stored as this neuron's activation.
    /// Input must be as long as the weight vector.
    pub fn compute(&mut self, input: &[f64]) -> f64 {
        debug_assert_eq!(input.len(), self.weights.len());
        let sum = self
            .weights
            .iter()
            .zip(input)
            .fold(0., |acc, (w, a)| acc + w * a);
        self.activation = (self.σ)(sum + self.bias);
        self.activation
    }

    pub fn genes(&self) -> NeuronGenes {
        NeuronGenes {
            weights: self.weights.clone(),
            bias: self.bias,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Layer {
    kind: ActivationKind,
    neurons: Vec<Neuron>,
}

impl Layer {
    /// A layer whose activations are set from outside, and which holds no weights
    pub fn input(spec: LayerSpec) -> Self {
        Self {
            kind: spec.activation,
            neurons: (0..spec.neuron_count)
                .map(|_| Neuron::new(vec![], 0., spec.activation))
                .collect(),
        }
    }

    /// A computing layer, initialised neuron by neuron from `rng`
    pub fn new(
        spec: LayerSpec,
        fan_in: usize,
        fan_out: usize,
        init: WeightInit,
        rng: &mut impl RngCore,
    ) -> Self {
        Self {
            kind: spec.activation,
            neurons: (0..spec.neuron_count)
                .map(|_| {
                    let (weights, bias) = init.neuron(fan_in, fan_out, rng);
                    Neuron::new(weights, bias, spec.activation)
                })
                .collect(),
        }
    }

    /// A computing layer taking its weights verbatim. Lengths are checked by the caller.
    pub fn from_genes(spec: LayerSpec, genes: impl Iterator<Item = NeuronGenes>) -> Self {
        Self {
            kind: spec.activation,
            neurons: genes
                .map(|NeuronGenes { weights, bias }| Neuron::new(weights, bias, spec.activation))
                .collect(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ActivationKind {
        self.kind
    }

    #[inline]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn activations(&self) -> Vec<f64> {
        self.neurons.iter().map(Neuron::activation).collect()
    }

    pub(crate) fn set_activations(&mut self, activations: &[f64]) {
        debug_assert_eq!(activations.len(), self.neurons.len());
        for (n, a) in self.neurons.iter_mut().zip(activations) {
            n.set_activation(*a);
        }
    }

    pub fn compute(&mut self, input: &[f64]) -> Vec<f64> {
        self.neurons.iter_mut().map(|n| n.compute(input)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::WyRng;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_neuron_compute() {
        let mut n = Neuron::new(vec![0.5, -1., 2.], 0.25, ActivationKind::Linear);
        // 0.5 * 2 - 1 * 1 + 2 * 0.5 + 0.25
        assert_abs_diff_eq!(n.compute(&[2., 1., 0.5]), 1.25);
        assert_abs_diff_eq!(n.activation(), 1.25);
    }

    #[test]
    fn test_neuron_applies_activation() {
        let mut n = Neuron::new(vec![1.], -3., ActivationKind::Relu);
        assert_eq!(n.compute(&[1.]), 0.);
        let mut n = Neuron::new(vec![1.], 0., ActivationKind::Sigmoid);
        assert_abs_diff_eq!(n.compute(&[0.]), 0.5);
    }

    #[test]
    fn test_neuron_genes_copy() {
        let n = Neuron::new(vec![1., 2.], 3., ActivationKind::Tanh);
        let mut genes = n.genes();
        genes.weights[0] = 100.;
        genes.bias = -1.;
        assert_eq!(n.weights(), &[1., 2.]);
        assert_eq!(n.bias(), 3.);
    }

    #[test]
    fn test_layer_compute() {
        let spec = LayerSpec::new(2, ActivationKind::Linear);
        let mut layer = Layer::from_genes(
            spec,
            vec![
                NeuronGenes {
                    weights: vec![1., 1.],
                    bias: 0.,
                },
                NeuronGenes {
                    weights: vec![-1., 2.],
                    bias: 1.,
                },
            ]
            .into_iter(),
        );
        assert_eq!(layer.compute(&[3., 4.]), vec![7., 6.]);
        assert_eq!(layer.activations(), vec![7., 6.]);
    }

    #[test]
    fn test_layer_new_sizes() {
        let layer = Layer::new(
            LayerSpec::new(5, ActivationKind::Tanh),
            3,
            2,
            WeightInit::Xavier,
            &mut WyRng::seeded(1),
        );
        assert_eq!(layer.len(), 5);
        assert_eq!(layer.kind(), ActivationKind::Tanh);
        assert!(layer.neurons().iter().all(|n| n.weights().len() == 3));
    }

    #[test]
    fn test_input_layer() {
        let mut layer = Layer::input(LayerSpec::new(3, ActivationKind::Sigmoid));
        assert!(layer.neurons().iter().all(|n| n.weights().is_empty()));
        layer.set_activations(&[1., -2., 3.]);
        assert_eq!(layer.activations(), vec![1., -2., 3.]);
    }
}

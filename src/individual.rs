use crate::{error::NetworkError, network::Network};

/// The simulated agent a network drives. Bodies are owned by their [Individual], but their
/// internals are never inspected beyond this.
pub trait AgentBody {
    /// Sensor snapshot, one value per input neuron
    fn input_activations(&self) -> Vec<f64>;
    /// Consume the network's output vector
    fn action_outputs(&mut self, outputs: &[f64]);
    /// Higher is better
    fn fitness(&self) -> f64;
    /// Re-arm for the next generation
    fn reset(&mut self);
}

/// A network bound to a body. A slot whose network was culled stays in the population, empty,
/// until it's refilled with offspring.
#[derive(Debug, Clone)]
pub struct Individual<B> {
    id: usize,
    network: Option<Network>,
    body: B,
    fitness: f64,
}

impl<B: AgentBody> Individual<B> {
    /// One sense, process, act cycle. Does nothing for a culled slot.
    pub fn think(&mut self) -> Result<(), NetworkError> {
        if let Some(network) = self.network.as_mut() {
            let outputs = network.process(&self.body.input_activations())?;
            self.body.action_outputs(&outputs);
        }
        Ok(())
    }

    /// Read the body's fitness into this individual
    pub fn refresh_fitness(&mut self) -> f64 {
        self.fitness = self.body.fitness();
        self.fitness
    }
}

impl<B> Individual<B> {
    pub(crate) fn new(id: usize, network: Network, body: B) -> Self {
        Self {
            id,
            network: Some(network),
            body,
            fitness: 0.,
        }
    }

    /// Position in the population, stable for the whole run
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Fitness as of the last [refresh_fitness](Self::refresh_fitness)
    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[inline]
    pub fn is_culled(&self) -> bool {
        self.network.is_none()
    }

    pub(crate) fn cull(&mut self) -> Option<Network> {
        self.network.take()
    }

    pub(crate) fn assign(&mut self, network: Network) {
        self.network = Some(network);
        self.fitness = 0.;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        genome::Topology,
        network::{ActivationKind, WeightInit},
    };

    /// Sums its outputs into its fitness
    #[derive(Debug, Clone, Default)]
    struct Tally {
        inputs: Vec<f64>,
        score: f64,
    }

    impl AgentBody for Tally {
        fn input_activations(&self) -> Vec<f64> {
            self.inputs.clone()
        }

        fn action_outputs(&mut self, outputs: &[f64]) {
            self.score += outputs.iter().sum::<f64>();
        }

        fn fitness(&self) -> f64 {
            self.score
        }

        fn reset(&mut self) {
            self.score = 0.;
        }
    }

    fn individual(inputs: Vec<f64>) -> Individual<Tally> {
        let t = Topology::uniform(&[2, 3, 1], ActivationKind::Sigmoid).unwrap();
        Individual::new(
            0,
            Network::new(9, &t, WeightInit::Xavier),
            Tally {
                inputs,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_think_drives_body() {
        let mut ind = individual(vec![0.5, -0.5]);
        ind.think().unwrap();
        ind.think().unwrap();
        let score = ind.body().score;
        // two sigmoid outputs
        assert!(score > 0. && score < 2.);
        assert_eq!(ind.fitness(), 0.);
        assert_eq!(ind.refresh_fitness(), score);
        assert_eq!(ind.fitness(), score);
    }

    #[test]
    fn test_think_bad_sensors() {
        let mut ind = individual(vec![1.]);
        assert_eq!(
            ind.think(),
            Err(NetworkError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(ind.body().score, 0.);
    }

    #[test]
    fn test_accessors_need_no_body() {
        let t = Topology::uniform(&[2, 1], ActivationKind::Linear).unwrap();
        let mut ind = Individual::new(4, Network::new(1, &t, WeightInit::He), ());
        assert_eq!(ind.id(), 4);
        assert_eq!(ind.fitness(), 0.);
        assert!(!ind.is_culled());
        assert_eq!(ind.body(), &());

        let network = ind.cull().unwrap();
        assert!(ind.is_culled() && ind.network().is_none());
        ind.assign(network);
        assert!(ind.network().is_some());
    }

    #[test]
    fn test_culled_is_inert() {
        let mut ind = individual(vec![0.5, -0.5]);
        let network = ind.cull().unwrap();
        assert!(ind.is_culled());
        ind.think().unwrap();
        assert_eq!(ind.body().score, 0.);

        ind.body_mut().score = 3.;
        ind.refresh_fitness();
        ind.assign(network);
        assert!(!ind.is_culled());
        assert_eq!(ind.fitness(), 0.);
    }
}

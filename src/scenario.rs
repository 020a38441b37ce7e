use crate::{
    error::PopulationError,
    individual::{AgentBody, Individual},
    persist::Persist,
    population::{GenerationStats, Population},
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub enum EvolutionTarget {
    /// Some individual reaches this fitness
    Fitness(f64),
    Generation(usize),
    /// The best fitness hasn't improved for this many generations
    Stagnation(usize),
}

impl EvolutionTarget {
    fn satisfied<B: AgentBody>(&self, population: &Population<B>, history: &FitnessHistory) -> bool {
        match self {
            Self::Fitness(t) => population.best().is_some_and(|i| i.fitness() >= *t),
            Self::Generation(t) => *t <= population.generation(),
            Self::Stagnation(t) => *t <= history.stagnant_generations(),
        }
    }
}

/// Per-generation stats of a run, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FitnessHistory(Vec<GenerationStats>);

impl FitnessHistory {
    pub fn push(&mut self, stats: GenerationStats) {
        self.0.push(stats)
    }

    pub fn stats(&self) -> &[GenerationStats] {
        &self.0
    }

    pub fn last(&self) -> Option<&GenerationStats> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest best fitness seen in any generation
    pub fn best_ever(&self) -> Option<f64> {
        self.0.iter().map(|s| s.best).reduce(f64::max)
    }

    /// Generations since the best fitness last set a record
    pub fn stagnant_generations(&self) -> usize {
        let mut record = f64::NEG_INFINITY;
        let mut since = 0;
        for stats in self.0.iter() {
            if stats.best > record {
                record = stats.best;
                since = 0;
            } else {
                since += 1;
            }
        }
        since
    }
}

impl Persist for FitnessHistory {}

/// An environment individuals are evaluated in.
pub trait Scenario<B: AgentBody> {
    /// Drive one individual's body until its fitness is final
    fn evaluate(&mut self, individual: &mut Individual<B>);

    /// Evaluate and step generations until `target` is met, or the population's
    /// `max_generations` is reached. The target is checked after evaluating each generation
    /// and before culling it, so the population is left holding the generation that met it.
    fn evolve(
        &mut self,
        population: &mut Population<B>,
        target: EvolutionTarget,
    ) -> Result<FitnessHistory, PopulationError> {
        let max_generations = population.params().max_generations;
        let mut history = FitnessHistory::default();
        loop {
            for individual in population.individuals_mut() {
                self.evaluate(individual);
            }
            population.refresh_fitness();

            if target.satisfied(population, &history) {
                break;
            }
            if max_generations.is_some_and(|m| m <= population.generation()) {
                info!(
                    generations = population.generation(),
                    "generation limit reached before target"
                );
                break;
            }
            history.push(population.step_generation()?);
        }
        Ok(history)
    }
}

//! The generational algorithm over a fixed-size population.
//!
//! A population never grows or shrinks. Culling empties slots, repopulation refills them with
//! offspring of the survivors, and every random draw comes from the population's one seeded
//! generator in a fixed order, so a seed and a sequence of fitness readings fully determine a
//! run.

use crate::{
    config::TrainingParameters,
    crossover::crossover,
    error::{ConfigError, PopulationError},
    genome::Genome,
    individual::{AgentBody, Individual},
    mutation::MutationKind,
    network::Network,
    random::{Chance, WyRng},
    selection::roulette,
};
use core::cmp::Ordering;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Fitness summary of one generation, taken before culling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
    pub culled: usize,
    pub bred: usize,
}

#[derive(Debug)]
pub struct Population<B> {
    params: TrainingParameters,
    seed: u64,
    rng: WyRng,
    generation: usize,
    individuals: Vec<Individual<B>>,
}

#[inline]
fn rank_key(fitness: f64) -> f64 {
    if fitness.is_nan() {
        f64::NEG_INFINITY
    } else {
        fitness
    }
}

/// Indices of `individuals` ordered by fitness, ties kept in index order. NaN ranks worst.
fn ranked<B>(individuals: &[Individual<B>], descending: bool) -> Vec<usize> {
    let mut order = (0..individuals.len()).collect::<Vec<_>>();
    order.sort_by(|&l, &r| {
        let ord: Ordering =
            rank_key(individuals[l].fitness()).total_cmp(&rank_key(individuals[r].fitness()));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    order
}

/// Import an offspring genome, falling back to a copy of the parent it descends from
fn hatch(genome: Genome, seed: u64, parent: &Network) -> Network {
    Network::from_genome(genome, seed).unwrap_or_else(|e| {
        warn!(error = %e, "offspring rejected, cloning its parent instead");
        parent.clone()
    })
}

impl<B: AgentBody> Population<B> {
    /// Validate `params` and give each body a freshly initialized network. There must be
    /// exactly `params.population_count` bodies.
    pub fn new(
        params: TrainingParameters,
        bodies: impl IntoIterator<Item = B>,
    ) -> Result<Self, PopulationError> {
        params.validate()?;
        let bodies = bodies.into_iter().collect::<Vec<_>>();
        if bodies.len() != params.population_count {
            return Err(ConfigError::BodyCount {
                expected: params.population_count,
                actual: bodies.len(),
            }
            .into());
        }
        if !params.survival_curve.is_monotonic() {
            warn!("survival curve decreases somewhere, fitter individuals may be culled first");
        }
        if !params.weight_init.synthesizes() {
            warn!(
                init = ?params.weight_init,
                "weight init draws nothing, every network starts at zero"
            );
        }

        let seed = params.resolve_seed();
        let mut rng = WyRng::seeded(seed);
        let individuals = bodies
            .into_iter()
            .enumerate()
            .map(|(id, body)| {
                let network = Network::new(rng.next_u64(), &params.topology, params.weight_init);
                Individual::new(id, network, body)
            })
            .collect();

        info!(
            seed,
            population = params.population_count,
            genes = params.topology.gene_count(),
            "population initialized"
        );
        Ok(Self {
            params,
            seed,
            rng,
            generation: 0,
            individuals,
        })
    }

    /// Like [new](Self::new), building body `i` with `body(i)`
    pub fn with_bodies(
        params: TrainingParameters,
        body: impl FnMut(usize) -> B,
    ) -> Result<Self, PopulationError> {
        let count = params.population_count;
        Self::new(params, (0..count).map(body))
    }

    /// Read every body's fitness into its individual
    pub fn refresh_fitness(&mut self) {
        for individual in self.individuals.iter_mut() {
            individual.refresh_fitness();
        }
    }

    /// Cull individuals by rank. Worst first, each rank `r` draws `u` and is culled when `u`
    /// exceeds the survival curve at `r / (N - 1)`. Returns how many were culled.
    pub fn apply_survival_curve(&mut self) -> usize {
        let order = ranked(&self.individuals, false);
        let last_rank = (order.len() - 1) as f64;
        let mut culled = 0;
        for (rank, idx) in order.into_iter().enumerate() {
            let chance = self.params.survival_curve.evaluate(rank as f64 / last_rank);
            let u = self.rng.random::<f64>();
            if u > chance && self.individuals[idx].cull().is_some() {
                debug!(
                    id = idx,
                    rank,
                    fitness = self.individuals[idx].fitness(),
                    "culled"
                );
                culled += 1;
            }
        }
        culled
    }

    /// Refill every culled slot with offspring of the survivors, two slots per pair of
    /// parents. Returns how many slots were refilled.
    ///
    /// Fails with [PopulationError::Collapse] when nobody survived.
    pub fn repopulate(&mut self) -> Result<usize, PopulationError> {
        let Self {
            params,
            rng,
            generation,
            individuals,
            ..
        } = self;
        let collapse = PopulationError::Collapse {
            generation: *generation,
        };

        let view: &[Individual<B>] = individuals;
        let empty = ranked(view, false)
            .into_iter()
            .filter(|&idx| view[idx].is_culled())
            .collect::<Vec<_>>();
        if empty.is_empty() {
            return Ok(0);
        }
        let survivors = ranked(view, true)
            .into_iter()
            .filter_map(|idx| view[idx].network().map(|n| (idx, n)))
            .collect::<Vec<_>>();
        if survivors.is_empty() {
            return Err(collapse);
        }
        let pool = survivors
            .iter()
            .map(|&(idx, _)| view[idx].fitness())
            .collect::<Vec<_>>();
        if !pool.iter().any(|&f| f > 0.) {
            warn!(
                generation = *generation,
                "survivors have no positive fitness, selection always picks the last survivor"
            );
        }

        let offset = *params.offset_mutation.schedule.at(*generation);
        let reset = *params.reset_mutation.schedule.at(*generation);
        let mut offspring = Vec::with_capacity(empty.len());
        for slots in empty.chunks(2) {
            let a = roulette(&pool, None, rng).ok_or(collapse.clone())?;
            let b = roulette(&pool, Some(a), rng).ok_or(collapse.clone())?;
            let (parent_a, parent_b) = (survivors[a].1, survivors[b].1);

            let mut child_a = parent_a.export_genome();
            let mut child_b = parent_b.export_genome();
            crossover(&mut child_a, &mut child_b, params.crossover_rate, rng)?;
            for (kind, chance, entry) in [
                (
                    MutationKind::Offset,
                    params.offset_mutation.global_chance,
                    offset,
                ),
                (
                    MutationKind::Reset,
                    params.reset_mutation.global_chance,
                    reset,
                ),
            ] {
                if rng.chance(chance) {
                    kind.apply(&mut child_a, entry.probability, entry.strength, rng);
                    kind.apply(&mut child_b, entry.probability, entry.strength, rng);
                }
            }

            debug!(
                slot = slots[0],
                parent_a = survivors[a].0,
                parent_b = survivors[b].0,
                "bred"
            );
            offspring.push((slots[0], hatch(child_a, rng.next_u64(), parent_a)));
            if let Some(&slot) = slots.get(1) {
                offspring.push((slot, hatch(child_b, rng.next_u64(), parent_b)));
            }
        }

        let bred = offspring.len();
        for (slot, network) in offspring {
            individuals[slot].assign(network);
        }
        Ok(bred)
    }

    /// One full generation once every body has finished: snapshot fitness, cull, repopulate,
    /// advance the generation counter and reset every body.
    ///
    /// On collapse the generation isn't advanced and the culled slots stay empty, see
    /// [reseed](Self::reseed).
    pub fn step_generation(&mut self) -> Result<GenerationStats, PopulationError> {
        self.refresh_fitness();
        let (best, worst, sum) = self.individuals.iter().map(Individual::fitness).fold(
            (f64::MIN, f64::MAX, 0.),
            |(best, worst, sum), f| (best.max(f), worst.min(f), sum + f),
        );

        let culled = self.apply_survival_curve();
        let bred = self.repopulate()?;
        let stats = GenerationStats {
            generation: self.generation,
            best,
            mean: sum / self.individuals.len() as f64,
            worst,
            culled,
            bred,
        };

        self.generation += 1;
        for individual in self.individuals.iter_mut() {
            individual.body_mut().reset();
        }
        info!(
            generation = stats.generation,
            best = stats.best,
            mean = stats.mean,
            worst = stats.worst,
            culled,
            bred,
            "generation complete"
        );
        Ok(stats)
    }

    /// Fill every culled slot with a freshly initialized network, eg. to recover from a
    /// collapse. Returns how many slots were filled.
    pub fn reseed(&mut self) -> usize {
        let mut filled = 0;
        for individual in self.individuals.iter_mut().filter(|i| i.is_culled()) {
            individual.assign(Network::new(
                self.rng.next_u64(),
                &self.params.topology,
                self.params.weight_init,
            ));
            filled += 1;
        }
        if filled > 0 {
            warn!(generation = self.generation, filled, "reseeded population");
        }
        filled
    }

    /// Indices of individuals, fittest first
    pub fn standings(&self) -> Vec<usize> {
        ranked(&self.individuals, true)
    }

    /// The fittest individual still holding a network
    pub fn best(&self) -> Option<&Individual<B>> {
        self.standings()
            .into_iter()
            .map(|idx| &self.individuals[idx])
            .find(|i| !i.is_culled())
    }

    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Seed the population's generator started from
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn params(&self) -> &TrainingParameters {
        &self.params
    }

    #[inline]
    pub fn individuals(&self) -> &[Individual<B>] {
        &self.individuals
    }

    #[inline]
    pub fn individuals_mut(&mut self) -> &mut [Individual<B>] {
        &mut self.individuals
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

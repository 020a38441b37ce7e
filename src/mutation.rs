//! Offset and reset mutation, scaled by the generation through piecewise schedules.
//!
//! Both operators walk a genome's genes in canonical order and draw one trial per gene. On
//! success, an offset mutation adds `N(0, strength)` to the gene, while a reset mutation
//! replaces it with a draw from `[-strength, strength]`.

use crate::{error::ConfigError, genome::Genome, random::Chance};
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Last generation this entry applies to
    pub generation: usize,
    pub probability: f64,
    pub strength: f64,
}

impl ScheduleEntry {
    pub const fn new(generation: usize, probability: f64, strength: f64) -> Self {
        Self {
            generation,
            probability,
            strength,
        }
    }
}

/// Per-gene probability and strength over the course of training.
///
/// The active entry for a generation is the first whose boundary is at or past it. Past the
/// last boundary, the last entry stays active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScheduleEntry>", into = "Vec<ScheduleEntry>")]
pub struct Schedule(Vec<ScheduleEntry>);

impl Schedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }
        for pair in entries.windows(2) {
            if pair[1].generation < pair[0].generation {
                return Err(ConfigError::UnsortedSchedule {
                    prev: pair[0].generation,
                    next: pair[1].generation,
                });
            }
        }
        for e in entries.iter() {
            if !(0. ..=1.).contains(&e.probability) {
                return Err(ConfigError::Probability {
                    name: "mutation probability",
                    value: e.probability,
                });
            }
            if !(e.strength.is_finite() && e.strength >= 0.) {
                return Err(ConfigError::Strength {
                    name: "mutation strength",
                    value: e.strength,
                });
            }
        }
        Ok(Self(entries))
    }

    /// The same probability and strength for every generation
    pub fn constant(probability: f64, strength: f64) -> Result<Self, ConfigError> {
        Self::new(vec![ScheduleEntry::new(0, probability, strength)])
    }

    pub fn at(&self, generation: usize) -> &ScheduleEntry {
        self.0
            .iter()
            .find(|e| e.generation >= generation)
            .unwrap_or(&self.0[self.0.len() - 1])
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.0
    }
}

impl TryFrom<Vec<ScheduleEntry>> for Schedule {
    type Error = ConfigError;

    fn try_from(entries: Vec<ScheduleEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Schedule> for Vec<ScheduleEntry> {
    fn from(schedule: Schedule) -> Self {
        schedule.0
    }
}

/// One mutation operator's configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationParams {
    /// Chance that the operator runs at all, checked once per pair of children
    pub global_chance: f64,
    pub schedule: Schedule,
}

impl MutationParams {
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if (0. ..=1.).contains(&self.global_chance) {
            Ok(())
        } else {
            Err(ConfigError::Probability {
                name,
                value: self.global_chance,
            })
        }
    }

    /// Never runs
    pub fn disabled() -> Self {
        Self::constant(0., 0., 0.)
    }

    /// Unvalidated; only for values known to be in range
    pub(crate) fn constant(global_chance: f64, probability: f64, strength: f64) -> Self {
        Self {
            global_chance,
            schedule: Schedule(vec![ScheduleEntry::new(0, probability, strength)]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Offset,
    Reset,
}

impl MutationKind {
    /// Apply this operator to every gene of `genome` with the given per-gene probability.
    /// Returns the number of genes changed.
    pub fn apply(
        self,
        genome: &mut Genome,
        probability: f64,
        strength: f64,
        rng: &mut impl RngCore,
    ) -> usize {
        match self {
            Self::Offset => offset(genome, probability, strength, rng),
            Self::Reset => reset(genome, probability, strength, rng),
        }
    }
}

/// Add zero-mean Gaussian noise with standard deviation `strength` to each gene, with
/// probability `probability`
pub fn offset(
    genome: &mut Genome,
    probability: f64,
    strength: f64,
    rng: &mut impl RngCore,
) -> usize {
    let mut mutated = 0;
    for gene in genome.genes_mut() {
        if rng.chance(probability) {
            let z: f64 = rng.sample(StandardNormal);
            *gene += z * strength;
            mutated += 1;
        }
    }
    mutated
}

/// Replace each gene, with probability `probability`, by a draw from `[-strength, strength]`
pub fn reset(
    genome: &mut Genome,
    probability: f64,
    strength: f64,
    rng: &mut impl RngCore,
) -> usize {
    let mut mutated = 0;
    for gene in genome.genes_mut() {
        if rng.chance(probability) {
            *gene = if strength > 0. {
                rng.random_range(-strength..=strength)
            } else {
                0.
            };
            mutated += 1;
        }
    }
    mutated
}

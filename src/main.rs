#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

use brood::{
    params, ActivationKind, AgentBody, EvolutionTarget, Individual, Persist, Population, Scenario,
    Topology, TrainingParameters,
};
use std::{env, error::Error};
use tracing::{info, warn};

const CASES: [([f64; 2], f64); 4] = [([0., 0.], 0.), ([0., 1.], 1.), ([1., 0.], 1.), ([1., 1.], 0.)];
const TARGET: f64 = CASES.len() as f64 - 0.1;

/// Walks through the XOR truth table, one case per think
#[derive(Debug, Default)]
struct Xor {
    case: usize,
    error: f64,
}

impl AgentBody for Xor {
    fn input_activations(&self) -> Vec<f64> {
        CASES[self.case % CASES.len()].0.to_vec()
    }

    fn action_outputs(&mut self, outputs: &[f64]) {
        let want = CASES[self.case % CASES.len()].1;
        self.error += (want - outputs[0]).abs();
        self.case += 1;
    }

    fn fitness(&self) -> f64 {
        CASES.len() as f64 - self.error
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

struct TruthTable;

impl Scenario<Xor> for TruthTable {
    fn evaluate(&mut self, individual: &mut Individual<Xor>) {
        for _ in CASES.iter() {
            if let Err(e) = individual.think() {
                warn!(id = individual.id(), error = %e, "evaluation failed");
                return;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let params = match args.next() {
        Some(path) => TrainingParameters::load(path)?,
        None => params!(
            topology = Topology::uniform(&[2, 4, 1], ActivationKind::Sigmoid)?,
            population_count = 150,
            max_generations = Some(2000),
        ),
    };
    let champion_path = args.next();

    let mut population = Population::with_bodies(params, |_| Xor::default())?;
    let history = TruthTable.evolve(&mut population, EvolutionTarget::Fitness(TARGET))?;

    let Some(champion) = population.best() else {
        return Err("no individual survived".into());
    };
    info!(
        generations = history.len(),
        fitness = champion.fitness(),
        seed = population.seed(),
        "evolution finished"
    );

    if let (Some(path), Some(network)) = (champion_path, champion.network()) {
        network.export_genome().to_file(&path)?;
        info!(path = %path, "champion genome saved");
    }
    Ok(())
}

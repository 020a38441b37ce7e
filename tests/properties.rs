//! Property-based tests for brood
//!
//! Uses proptest to check the laws networks, genomes and populations must uphold for any
//! seed and shape.

use brood::{
    crossover::crossover, params, ActivationKind, AgentBody, Genome, Network, Persist,
    Population, PopulationError, Schedule, ScheduleEntry, SurvivalCurve, Topology, WeightInit,
};
use proptest::prelude::*;

fn activation() -> impl Strategy<Value = ActivationKind> {
    prop::sample::select(ActivationKind::ALL.to_vec())
}

fn init() -> impl Strategy<Value = WeightInit> {
    prop_oneof![
        Just(WeightInit::Xavier),
        Just(WeightInit::He),
        (0.1f64..3.).prop_map(|range| WeightInit::Uniform { range }),
    ]
}

fn topology() -> impl Strategy<Value = Topology> {
    (prop::collection::vec(1usize..7, 2..5), activation())
        .prop_map(|(counts, kind)| Topology::uniform(&counts, kind).unwrap())
}

fn bits(v: &[f64]) -> Vec<u64> {
    v.iter().map(|x| x.to_bits()).collect()
}

/// Reports whatever fitness it was built with
struct Fixed(f64);

impl AgentBody for Fixed {
    fn input_activations(&self) -> Vec<f64> {
        vec![self.0, -self.0]
    }

    fn action_outputs(&mut self, _: &[f64]) {}

    fn fitness(&self) -> f64 {
        self.0
    }

    fn reset(&mut self) {}
}

proptest! {
    // ==================== Network Properties ====================

    #[test]
    fn network_deterministic(
        seed in any::<u64>(),
        topology in topology(),
        init in init(),
        input in prop::collection::vec(-5.0..5.0f64, 8),
    ) {
        let input = &input[..topology.input().neuron_count];
        let mut l = Network::new(seed, &topology, init);
        let mut r = Network::new(seed, &topology, init);
        prop_assert_eq!(l.fingerprint(), r.fingerprint());
        prop_assert_eq!(bits(&l.process(input).unwrap()), bits(&r.process(input).unwrap()));
    }

    #[test]
    fn network_output_len(topology in topology(), seed in any::<u64>()) {
        let mut net = Network::new(seed, &topology, WeightInit::Xavier);
        let input = vec![0.5; topology.input().neuron_count];
        prop_assert_eq!(net.process(&input).unwrap().len(), topology.output().neuron_count);
        prop_assert!(net.max_output_index().0 < topology.output().neuron_count);
    }

    #[test]
    fn genome_roundtrip(
        seed in any::<u64>(),
        topology in topology(),
        init in init(),
        input in prop::collection::vec(-5.0..5.0f64, 8),
    ) {
        let input = &input[..topology.input().neuron_count];
        let mut net = Network::new(seed, &topology, init);
        let genome = net.export_genome();
        prop_assert_eq!(genome.len(), topology.gene_count());

        let mut back = Network::from_genome(genome.clone(), seed ^ 1).unwrap();
        prop_assert_eq!(back.fingerprint(), net.fingerprint());
        prop_assert_eq!(bits(&back.process(input).unwrap()), bits(&net.process(input).unwrap()));

        let json = Genome::from_json(&genome.to_json().unwrap()).unwrap();
        prop_assert_eq!(json, genome);
    }

    // ==================== Operator Properties ====================

    #[test]
    fn crossover_conserves_genes(
        seeds in (any::<u64>(), any::<u64>(), any::<u64>()),
        topology in topology(),
        rate in 0.0..=1.0f64,
    ) {
        let l0 = Network::new(seeds.0, &topology, WeightInit::Xavier).export_genome();
        let r0 = Network::new(seeds.1, &topology, WeightInit::Xavier).export_genome();
        let (mut l, mut r) = (l0.clone(), r0.clone());
        let swapped = crossover(&mut l, &mut r, rate, &mut brood::WyRng::seeded(seeds.2)).unwrap();
        prop_assert!(swapped <= l0.len());

        for (((l, r), l0), r0) in l.genes().zip(r.genes()).zip(l0.genes()).zip(r0.genes()) {
            prop_assert!((l == l0 && r == r0) || (l == r0 && r == l0));
        }
    }

    #[test]
    fn schedule_lookup(boundaries in prop::collection::btree_set(0usize..500, 1..6), generation in 0usize..600) {
        let entries = boundaries
            .iter()
            .enumerate()
            .map(|(i, &g)| ScheduleEntry::new(g, 1. / (i + 1) as f64, i as f64))
            .collect::<Vec<_>>();
        let schedule = Schedule::new(entries.clone()).unwrap();
        let active = schedule.at(generation);
        match entries.iter().find(|e| e.generation >= generation) {
            Some(e) => prop_assert_eq!(active, e),
            None => prop_assert_eq!(active, entries.last().unwrap()),
        }
    }

    // ==================== Population Properties ====================

    #[test]
    fn population_size_invariant(
        seed in any::<u64>(),
        fitness in prop::collection::vec(-1.0..10.0f64, 2..12),
        generations in 1usize..6,
    ) {
        let n = fitness.len();
        let mut pop = Population::new(
            params!(
                seed = Some(seed),
                population_count = n,
                topology = Topology::uniform(&[2, 3, 1], ActivationKind::Tanh).unwrap(),
                survival_curve = SurvivalCurve::default(),
            ),
            fitness.into_iter().map(Fixed),
        )
        .unwrap();

        for _ in 0..generations {
            prop_assert_eq!(pop.len(), n);
            match pop.step_generation() {
                Ok(stats) => prop_assert_eq!(stats.culled, stats.bred),
                Err(PopulationError::Collapse { .. }) => {
                    pop.reseed();
                }
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
            prop_assert_eq!(pop.len(), n);
            prop_assert!(pop.individuals().iter().all(|i| !i.is_culled()));
        }
    }

    #[test]
    fn population_survival_bounds(seed in any::<u64>(), n in 2usize..16) {
        let build = |chance: f64| {
            Population::with_bodies(
                params!(
                    seed = Some(seed),
                    population_count = n,
                    topology = Topology::uniform(&[2, 1], ActivationKind::Linear).unwrap(),
                    survival_curve = SurvivalCurve::Constant(chance),
                ),
                |i| Fixed(i as f64),
            )
            .unwrap()
        };

        let mut keep = build(1.);
        keep.refresh_fitness();
        prop_assert_eq!(keep.apply_survival_curve(), 0);

        let mut cull = build(0.);
        cull.refresh_fitness();
        prop_assert_eq!(cull.apply_survival_curve(), n);
        prop_assert_eq!(cull.repopulate(), Err(PopulationError::Collapse { generation: 0 }));
    }
}

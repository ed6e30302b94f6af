use keytuner::config::TunerConfig;
use keytuner::descriptors::registry::{ProfileRegistry, TransitionRegistry};
use keytuner::optimizer::{FitnessRanker, ProgressCallback, TunerEngine};
use keytuner::RandomGenerator;

/// Ranks by the first weight, descending. Deterministic, so the loop is
/// exercised with real selection pressure without a scoring backend.
struct FirstWeightRanker;

impl FitnessRanker for FirstWeightRanker {
    fn rank_key_profiles(
        &mut self,
        mut population: Vec<String>,
        registry: &ProfileRegistry,
    ) -> keytuner::Result<Vec<String>> {
        population.sort_by(|a, b| {
            let wa = registry.get(a).map(|v| v[0]).unwrap_or(0.0);
            let wb = registry.get(b).map(|v| v[0]).unwrap_or(0.0);
            wb.partial_cmp(&wa).unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(population)
    }

    fn rank_key_transitions(
        &mut self,
        mut population: Vec<String>,
        registry: &TransitionRegistry,
    ) -> keytuner::Result<Vec<String>> {
        population.sort_by(|a, b| {
            let wa = registry.get(a).map(|t| t.values[0]).unwrap_or(0.0);
            let wb = registry.get(b).map(|t| t.values[0]).unwrap_or(0.0);
            wb.partial_cmp(&wa).unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(population)
    }
}

struct TestProgressCallback {
    last_generation: usize,
    completions: usize,
}

impl ProgressCallback for TestProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, _best_profile: &str, _best_transition: &str) {
        self.last_generation = generation;
        self.completions += 1;
    }
}

fn test_config(seed: u64) -> TunerConfig {
    TunerConfig {
        population_size: 12,
        generations: 4,
        seed: Some(seed),
        ..TunerConfig::default()
    }
}

#[test]
fn engine_runs_to_completion_with_consistent_bookkeeping() {
    let mut engine = TunerEngine::new(test_config(42), RandomGenerator::new()).unwrap();
    let mut callback = TestProgressCallback {
        last_generation: 0,
        completions: 0,
    };

    let outcome = engine.run(&mut FirstWeightRanker, &mut callback).unwrap();

    assert_eq!(outcome.key_profiles.len(), 12);
    assert_eq!(outcome.key_transitions.len(), 12);
    assert_eq!(callback.completions, 4);
    assert_eq!(callback.last_generation, 3);

    // Every surviving name must resolve in its registry.
    for name in &outcome.key_profiles {
        assert!(engine.profiles().get(name).is_ok(), "missing {}", name);
    }
    for name in &outcome.key_transitions {
        assert!(engine.transitions().get(name).is_ok(), "missing {}", name);
    }

    // The outcome is the last ranked generation: best-first by the
    // ranker's criterion.
    let weights: Vec<f64> = outcome
        .key_profiles
        .iter()
        .map(|n| engine.profiles().get(n).unwrap()[0])
        .collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn engine_starts_from_the_classic_profiles() {
    let mut engine = TunerEngine::new(test_config(7), RandomGenerator::new()).unwrap();
    let mut callback = TestProgressCallback {
        last_generation: 0,
        completions: 0,
    };
    engine.run(&mut FirstWeightRanker, &mut callback).unwrap();

    for name in ["krumhansl_kessler", "aarden_essen", "sapp", "bellman_budge", "temperley"] {
        assert!(engine.profiles().get(name).is_ok(), "builtin {} not seeded", name);
    }
}

#[test]
fn seeded_engines_are_reproducible() {
    let run = || {
        let mut engine = TunerEngine::new(test_config(123), RandomGenerator::new()).unwrap();
        let mut callback = TestProgressCallback {
            last_generation: 0,
            completions: 0,
        };
        let outcome = engine.run(&mut FirstWeightRanker, &mut callback).unwrap();
        (outcome.key_profiles, outcome.key_transitions)
    };

    assert_eq!(run(), run());
}

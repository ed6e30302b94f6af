use keytuner::descriptors::registry::{ProfileRegistry, TransitionRegistry};
use keytuner::optimizer::{ConsoleProgressCallback, FitnessRanker, TunerEngine};
use keytuner::{RandomGenerator, TunerConfig};
use serde_json::json;

/// Pass-through ranker that keeps the incoming order. Stands in until a
/// scoring backend (evaluation against an annotated corpus) is wired up.
struct IdentityRanker;

impl FitnessRanker for IdentityRanker {
    fn rank_key_profiles(
        &mut self,
        population: Vec<String>,
        _registry: &ProfileRegistry,
    ) -> keytuner::Result<Vec<String>> {
        Ok(population)
    }

    fn rank_key_transitions(
        &mut self,
        population: Vec<String>,
        _registry: &TransitionRegistry,
    ) -> keytuner::Result<Vec<String>> {
        Ok(population)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => TunerConfig::load_from_file(path)?,
        None => TunerConfig::default(),
    };

    let mut engine = TunerEngine::new(config, RandomGenerator::new())?;
    let outcome = engine.run(&mut IdentityRanker, &mut ConsoleProgressCallback)?;

    let best_profile = &outcome.key_profiles[0];
    let best_transition = &outcome.key_transitions[0];
    let report = json!({
        "key_profiles": outcome.key_profiles,
        "key_transitions": outcome.key_transitions,
        "best_key_profile": {
            "name": best_profile,
            "values": engine.profiles().get(best_profile)?,
        },
        "best_key_transition": {
            "name": best_transition,
            "values": &engine.transitions().get(best_transition)?.values,
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

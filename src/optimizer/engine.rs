//! Multi-generation tuning loop.
//!
//! The engine owns the registries, the Evolver, and a seedable random
//! source, and alternates ranking (through the caller-supplied
//! [`FitnessRanker`]) with evolution for a fixed number of generations.
//! How fitness is computed is entirely the ranker's business.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::TunerConfig;
use crate::descriptors::profiles;
use crate::descriptors::registry::{ProfileRegistry, TransitionRegistry};
use crate::error::Result;
use crate::optimizer::evolver::Evolver;
use crate::optimizer::generator::Generator;

/// Re-ranks a population best-first. Implementations must return a
/// permutation of the input: same names, same length, new order.
pub trait FitnessRanker {
    fn rank_key_profiles(
        &mut self,
        population: Vec<String>,
        registry: &ProfileRegistry,
    ) -> Result<Vec<String>>;

    fn rank_key_transitions(
        &mut self,
        population: Vec<String>,
        registry: &TransitionRegistry,
    ) -> Result<Vec<String>>;
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_profile: &str, best_transition: &str);
}

/// Final ranked populations after the last generation.
pub struct TunerOutcome {
    pub key_profiles: Vec<String>,
    pub key_transitions: Vec<String>,
}

pub struct TunerEngine<G: Generator> {
    config: TunerConfig,
    evolver: Evolver<G>,
    profiles: ProfileRegistry,
    transitions: TransitionRegistry,
    rng: StdRng,
}

impl<G: Generator> TunerEngine<G> {
    pub fn new(config: TunerConfig, generator: G) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            evolver: Evolver::new(generator),
            profiles: ProfileRegistry::new(),
            transitions: TransitionRegistry::new(),
            rng,
        })
    }

    /// Run the tuning loop and return the final ranked populations.
    pub fn run<F: FitnessRanker, C: ProgressCallback>(
        &mut self,
        ranker: &mut F,
        callback: &mut C,
    ) -> Result<TunerOutcome> {
        let (mut key_profiles, mut key_transitions) = self.initialize_populations();

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            key_profiles = ranker.rank_key_profiles(key_profiles, &self.profiles)?;
            key_transitions = ranker.rank_key_transitions(key_transitions, &self.transitions)?;

            callback.on_generation_complete(generation, &key_profiles[0], &key_transitions[0]);

            // The last ranked generation is the result; evolving it
            // again would leave unranked offspring in the output.
            if generation == self.config.generations - 1 {
                break;
            }

            key_profiles = self.evolver.evolve_key_profiles(
                &key_profiles,
                &mut self.profiles,
                &self.config.profiles,
                &mut self.rng,
            )?;
            key_transitions = self.evolver.evolve_key_transitions(
                &key_transitions,
                &mut self.transitions,
                &self.config.transitions,
                &mut self.rng,
            )?;
        }

        Ok(TunerOutcome {
            key_profiles,
            key_transitions,
        })
    }

    /// Seed the profile population with the classic built-in profiles,
    /// then backfill both populations to the configured size.
    fn initialize_populations(&mut self) -> (Vec<String>, Vec<String>) {
        let mut key_profiles = profiles::seed_registry(&mut self.profiles);
        key_profiles.truncate(self.config.population_size);
        while key_profiles.len() < self.config.population_size {
            key_profiles.push(
                self.evolver
                    .generator_mut()
                    .generate_key_profile(&mut self.profiles, &mut self.rng),
            );
        }

        let mut key_transitions = Vec::with_capacity(self.config.population_size);
        while key_transitions.len() < self.config.population_size {
            key_transitions.push(
                self.evolver
                    .generator_mut()
                    .generate_key_transition(&mut self.transitions, &mut self.rng),
            );
        }

        (key_profiles, key_transitions)
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    pub fn transitions(&self) -> &TransitionRegistry {
        &self.transitions
    }
}

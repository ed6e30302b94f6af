//! Random generation of brand-new descriptors.
//!
//! The generator backfills populations after selection and crossover
//! have run. It is the Evolver's only collaborator and the only place
//! new descriptor names are minted.

use rand::Rng;

use crate::descriptors::profiles::{self, KeyProfile, HALF_LEN, PROFILE_LEN};
use crate::descriptors::registry::{ProfileRegistry, TransitionRegistry};
use crate::descriptors::transitions::{self, KeyTransition, TransitionKind, TRANSITION_LEN};

/// Source of fresh descriptors.
///
/// `generate_key_profile` and `generate_key_transition` register the new
/// value and return its name; `generate_geometric_key_transition` is
/// pure and leaves registration to the caller.
pub trait Generator {
    fn generate_key_profile<R: Rng>(
        &mut self,
        registry: &mut ProfileRegistry,
        rng: &mut R,
    ) -> String;

    fn generate_key_transition<R: Rng>(
        &mut self,
        registry: &mut TransitionRegistry,
        rng: &mut R,
    ) -> String;

    fn generate_geometric_key_transition(&self, ratio: f64) -> KeyTransition;
}

/// Integer ratios drawn for fresh geometric transition tables.
const GEOMETRIC_RATIO_RANGE: std::ops::RangeInclusive<u32> = 2..=9;

/// Default generator: uniform random weights, normalized per half, with
/// a monotone counter keeping every minted name unique.
pub struct RandomGenerator {
    next_profile_id: usize,
    next_transition_id: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self {
            next_profile_id: 0,
            next_transition_id: 0,
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate_key_profile<R: Rng>(
        &mut self,
        registry: &mut ProfileRegistry,
        rng: &mut R,
    ) -> String {
        let mut values: KeyProfile = (0..PROFILE_LEN).map(|_| rng.gen::<f64>()).collect();
        profiles::normalize(&mut values[..HALF_LEN]);
        profiles::normalize(&mut values[HALF_LEN..]);

        let name = format!("kp{}", self.next_profile_id);
        self.next_profile_id += 1;
        registry.insert(name.clone(), values);
        name
    }

    fn generate_key_transition<R: Rng>(
        &mut self,
        registry: &mut TransitionRegistry,
        rng: &mut R,
    ) -> String {
        let id = self.next_transition_id;
        self.next_transition_id += 1;

        // Split new tables evenly between the two mutable families. The
        // ktg/kts prefixes record provenance for humans; behavior keys
        // off the kind tag, never the name.
        let (name, transition) = if rng.gen_bool(0.5) {
            let ratio = rng.gen_range(GEOMETRIC_RATIO_RANGE) as f64;
            (
                format!("ktg{}", id),
                self.generate_geometric_key_transition(ratio),
            )
        } else {
            let mut values: Vec<f64> = (0..TRANSITION_LEN).map(|_| rng.gen::<f64>()).collect();
            profiles::normalize(&mut values);
            (
                format!("kts{}", id),
                KeyTransition {
                    kind: TransitionKind::Swap,
                    values,
                },
            )
        };

        registry.insert(name.clone(), transition);
        name
    }

    fn generate_geometric_key_transition(&self, ratio: f64) -> KeyTransition {
        transitions::geometric_table(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::transitions::RATIO_INDEX;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_profiles_have_normalized_halves() {
        let mut generator = RandomGenerator::new();
        let mut registry = ProfileRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);

        let name = generator.generate_key_profile(&mut registry, &mut rng);
        let profile = registry.get(&name).unwrap();
        assert_eq!(profile.len(), PROFILE_LEN);
        let major: f64 = profile[..HALF_LEN].iter().sum();
        let minor: f64 = profile[HALF_LEN..].iter().sum();
        assert!((major - 1.0).abs() < 1e-9);
        assert!((minor - 1.0).abs() < 1e-9);
    }

    #[test]
    fn minted_names_are_unique() {
        let mut generator = RandomGenerator::new();
        let mut registry = ProfileRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);

        let a = generator.generate_key_profile(&mut registry, &mut rng);
        let b = generator.generate_key_profile(&mut registry, &mut rng);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn transition_name_prefix_matches_kind() {
        let mut generator = RandomGenerator::new();
        let mut registry = TransitionRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let name = generator.generate_key_transition(&mut registry, &mut rng);
            let transition = registry.get(&name).unwrap();
            match transition.kind {
                TransitionKind::Geometric => {
                    assert!(name.starts_with("ktg"));
                    assert!(transition.values[RATIO_INDEX] >= 2.0);
                    assert!(transition.values[RATIO_INDEX] <= 9.0);
                }
                TransitionKind::Swap => assert!(name.starts_with("kts")),
                TransitionKind::Other => panic!("generator never mints Other"),
            }
            assert_eq!(transition.values.len(), TRANSITION_LEN);
        }
    }
}

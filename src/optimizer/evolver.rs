//! Generation step for descriptor populations.
//!
//! The Evolver turns one ranked population into the next via retention,
//! random retention, crossover (key profiles only), mutation, and
//! regeneration. It assumes the incoming population is already sorted
//! best-first; ranking the result again is the caller's job.
//!
//! All sampling is bounded: when a stage needs more distinct candidates
//! than the pool holds, the call fails with a descriptive error rather
//! than looping on an impossible draw.

use log::{debug, info};
use rand::seq::index;
use rand::Rng;

use crate::config::{ProfileEvolveParams, TransitionEvolveParams};
use crate::descriptors::profiles::{KeyProfile, HALF_LEN};
use crate::descriptors::registry::{ProfileRegistry, TransitionRegistry};
use crate::descriptors::transitions::{KeyTransition, TransitionKind, RATIO_INDEX, TRANSITION_LEN};
use crate::error::{KeytunerError, Result};
use crate::optimizer::generator::Generator;

pub struct Evolver<G: Generator> {
    generator: G,
}

impl<G: Generator> Evolver<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Produce the next key-profile generation.
    ///
    /// `population` must be sorted best-first. New descriptors (crossover
    /// children, mutants, generated refills) are written into `registry`
    /// before their names appear in the returned population, which has
    /// the same length as the input and is not re-sorted.
    pub fn evolve_key_profiles<R: Rng>(
        &mut self,
        population: &[String],
        registry: &mut ProfileRegistry,
        params: &ProfileEvolveParams,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        params.validate()?;
        if population.is_empty() {
            return Err(KeytunerError::EmptyPopulation("key profiles"));
        }

        let len = population.len();
        let retain_length = (len as f64 * params.retain) as usize;
        let random_retain_length = (len as f64 * params.random_retain) as usize;
        let crossover_length = (len as f64 * params.crossover) as usize;
        debug!(
            "evolve_key_profiles: len={} retain={} random_retain={} crossover={}",
            len, retain_length, random_retain_length, crossover_length
        );

        // Elites pass through unchanged.
        let mut next: Vec<String> = population[..retain_length].to_vec();

        self.random_retain(population, retain_length, random_retain_length, &mut next, rng)?;

        // Crossover: each child takes the major half of one parent and
        // the minor half of another. Parents come from the survivors
        // selected so far, and must differ by name, not by value.
        if crossover_length > 0 && next.len() < 2 {
            return Err(KeytunerError::SamplingPool {
                needed: 2,
                available: next.len(),
            });
        }
        let mut children = Vec::with_capacity(crossover_length);
        while children.len() < crossover_length {
            let male_idx = rng.gen_range(0..next.len());
            let mut female_idx = rng.gen_range(0..next.len() - 1);
            if female_idx >= male_idx {
                female_idx += 1;
            }
            let male = &next[male_idx];
            let female = &next[female_idx];

            let child_name = format!("({},{})", male, female);
            let male_kp = registry.get(male)?;
            let female_kp = registry.get(female)?;
            let child: KeyProfile = male_kp[..HALF_LEN]
                .iter()
                .chain(&female_kp[HALF_LEN..])
                .copied()
                .collect();
            debug!("crossover child: {}", child_name);
            registry.insert(child_name.clone(), child);
            children.push(child_name);
        }
        next.extend(children);

        // Mutation: move a fraction of one pitch class's weight to
        // another pitch class within the same half, so the half's total
        // weight is conserved exactly. At most one mutation per entry
        // per call.
        for entry in next.iter_mut() {
            if rng.gen::<f64>() < params.mutation_prob {
                let mut values = registry.get(entry)?.clone();
                let offset = if rng.gen_bool(0.5) { 0 } else { HALF_LEN };
                let (a, b) = distinct_pair(HALF_LEN, rng);
                let (idx1, idx2) = (offset + a, offset + b);

                let delta = values[idx1] * params.mutation_ratio;
                values[idx1] -= delta;
                values[idx2] += delta;

                let mutant_name = format!("{}*", entry);
                debug!(
                    "mutation: {} (moved {:.6} from pc {} to pc {})",
                    mutant_name, delta, idx1, idx2
                );
                registry.insert(mutant_name.clone(), values);
                *entry = mutant_name;
            }
        }

        // Backfill to the original size with fresh random profiles.
        while next.len() < len {
            let name = self.generator.generate_key_profile(registry, rng);
            debug!("generated key profile: {}", name);
            next.push(name);
        }

        info!(
            "evolve_key_profiles: done, {} entries ({} elite, {} random, {} crossover)",
            next.len(),
            retain_length,
            random_retain_length,
            crossover_length
        );
        Ok(next)
    }

    /// Produce the next key-transition generation.
    ///
    /// Same retention stages as profiles, no crossover. The mutation
    /// branch follows the entry's kind tag: geometric tables redraw
    /// their ratio and are regenerated from scratch, swap tables
    /// transfer weight between two entries, and `Other` entries pass
    /// through untouched even when the probability roll selects them.
    pub fn evolve_key_transitions<R: Rng>(
        &mut self,
        population: &[String],
        registry: &mut TransitionRegistry,
        params: &TransitionEvolveParams,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        params.validate()?;
        if population.is_empty() {
            return Err(KeytunerError::EmptyPopulation("key transitions"));
        }

        let len = population.len();
        let retain_length = (len as f64 * params.retain) as usize;
        let random_retain_length = (len as f64 * params.random_retain) as usize;
        debug!(
            "evolve_key_transitions: len={} retain={} random_retain={}",
            len, retain_length, random_retain_length
        );

        let mut next: Vec<String> = population[..retain_length].to_vec();
        self.random_retain(population, retain_length, random_retain_length, &mut next, rng)?;

        for entry in next.iter_mut() {
            let (kind, values) = {
                let transition = registry.get(entry)?;
                (transition.kind, transition.values.clone())
            };
            match kind {
                TransitionKind::Geometric => {
                    if rng.gen::<f64>() < params.mutation_prob {
                        let ratio = values[RATIO_INDEX];
                        let new_ratio = redraw_ratio(ratio, params.mutation_ratio, rng);
                        // The mutant is regenerated from the new ratio
                        // alone, never by rescaling the old table.
                        let mutant = self.generator.generate_geometric_key_transition(new_ratio);

                        let mutant_name = format!("{}*", entry);
                        debug!("mutation: {} (ratio {} -> {})", mutant_name, ratio, new_ratio);
                        registry.insert(mutant_name.clone(), mutant);
                        *entry = mutant_name;
                    }
                }
                TransitionKind::Swap => {
                    if rng.gen::<f64>() < params.mutation_prob {
                        let mut mutated = values;
                        let (idx1, idx2) = distinct_pair(TRANSITION_LEN, rng);

                        let delta = mutated[idx1] * params.mutation_ratio;
                        mutated[idx1] -= delta;
                        mutated[idx2] += delta;

                        let mutant_name = format!("{}*", entry);
                        debug!(
                            "mutation: {} (moved {:.6} from key {} to key {})",
                            mutant_name, delta, idx1, idx2
                        );
                        registry.insert(
                            mutant_name.clone(),
                            KeyTransition {
                                kind: TransitionKind::Swap,
                                values: mutated,
                            },
                        );
                        *entry = mutant_name;
                    }
                }
                // No mutation policy exists for this family; entries
                // pass through unchanged.
                TransitionKind::Other => {}
            }
        }

        while next.len() < len {
            let name = self.generator.generate_key_transition(registry, rng);
            debug!("generated key transition: {}", name);
            next.push(name);
        }

        info!(
            "evolve_key_transitions: done, {} entries ({} elite, {} random)",
            next.len(),
            retain_length,
            random_retain_length
        );
        Ok(next)
    }

    /// Copy `amount` distinct names from the non-elite remainder into
    /// `next`, via partial shuffle. Fails when the remainder is smaller
    /// than the request instead of rejection-sampling forever.
    fn random_retain<R: Rng>(
        &self,
        population: &[String],
        retain_length: usize,
        amount: usize,
        next: &mut Vec<String>,
        rng: &mut R,
    ) -> Result<()> {
        let remainder = &population[retain_length..];
        if amount > remainder.len() {
            return Err(KeytunerError::SamplingPool {
                needed: amount,
                available: remainder.len(),
            });
        }
        for idx in index::sample(rng, remainder.len(), amount) {
            debug!("random retain: {}", remainder[idx]);
            next.push(remainder[idx].clone());
        }
        Ok(())
    }
}

/// Two distinct indices drawn uniformly from `0..len`. `len` is always
/// at least 12 here, so the draw cannot degenerate.
fn distinct_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.gen_range(0..len);
    let mut second = rng.gen_range(0..len - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}

/// Draw a new integer ratio uniformly from the open interval
/// `(ratio - ratio*mutation_ratio, ratio + ratio*mutation_ratio)`.
/// When no other integer falls inside the interval the ratio is kept.
fn redraw_ratio<R: Rng>(ratio: f64, mutation_ratio: f64, rng: &mut R) -> f64 {
    let spread = ratio * mutation_ratio;
    let lo = (ratio - spread).ceil() as i64;
    let hi = (ratio + spread).floor() as i64;
    if lo >= hi {
        return lo.max(hi) as f64;
    }
    rng.gen_range(lo..=hi) as f64
}

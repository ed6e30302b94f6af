//! Tuning parameters, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KeytunerError, Result};

/// Evolution parameters for the key-profile population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEvolveParams {
    /// Fraction of the population kept unchanged from the top (elitism).
    pub retain: f64,
    /// Additional fraction kept at random from the non-elite remainder.
    pub random_retain: f64,
    /// Fraction of the population synthesized by crossover.
    pub crossover: f64,
    /// Per-survivor probability of mutating.
    pub mutation_prob: f64,
    /// Fraction of a weight moved between pitch classes by one mutation.
    pub mutation_ratio: f64,
}

impl Default for ProfileEvolveParams {
    fn default() -> Self {
        Self {
            retain: 0.2,
            random_retain: 0.2,
            crossover: 0.3,
            mutation_prob: 0.2,
            mutation_ratio: 0.1,
        }
    }
}

impl ProfileEvolveParams {
    pub fn validate(&self) -> Result<()> {
        check_fraction("retain", self.retain)?;
        check_fraction("random_retain", self.random_retain)?;
        check_fraction("crossover", self.crossover)?;
        check_fraction("mutation_prob", self.mutation_prob)?;
        check_fraction("mutation_ratio", self.mutation_ratio)?;
        Ok(())
    }
}

/// Evolution parameters for the key-transition population. Transitions
/// have no crossover stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionEvolveParams {
    pub retain: f64,
    pub random_retain: f64,
    pub mutation_prob: f64,
    pub mutation_ratio: f64,
}

impl Default for TransitionEvolveParams {
    fn default() -> Self {
        Self {
            retain: 0.2,
            random_retain: 0.2,
            mutation_prob: 0.2,
            mutation_ratio: 0.1,
        }
    }
}

impl TransitionEvolveParams {
    pub fn validate(&self) -> Result<()> {
        check_fraction("retain", self.retain)?;
        check_fraction("random_retain", self.random_retain)?;
        check_fraction("mutation_prob", self.mutation_prob)?;
        check_fraction("mutation_ratio", self.mutation_ratio)?;
        Ok(())
    }
}

/// Top-level tuner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunerConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Seed for the random source; `None` seeds from entropy.
    pub seed: Option<u64>,
    #[serde(default)]
    pub profiles: ProfileEvolveParams,
    #[serde(default)]
    pub transitions: TransitionEvolveParams,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 50,
            seed: None,
            profiles: ProfileEvolveParams::default(),
            transitions: TransitionEvolveParams::default(),
        }
    }
}

impl TunerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(KeytunerError::Configuration(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(KeytunerError::Configuration(
                "generations must be at least 1".to_string(),
            ));
        }
        self.profiles.validate()?;
        self.transitions.validate()?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KeytunerError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: TunerConfig = toml::from_str(&contents)
            .map_err(|e| KeytunerError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(KeytunerError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

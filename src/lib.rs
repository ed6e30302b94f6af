//! keytuner: evolutionary tuning of key-estimation descriptors.
//!
//! Tunes the two numeric descriptor families behind a musical-key
//! estimation algorithm: key profiles (24-value pitch-class weight
//! vectors, 12 major + 12 minor) and key transitions (inter-key
//! likelihood tables). Candidate descriptors live in name-keyed
//! registries; the [`Evolver`] produces each next generation from a
//! ranked population via elitism, random retention, crossover,
//! mutation, and random regeneration, and the [`TunerEngine`] drives
//! the loop around a caller-supplied fitness ranker.

pub mod config;
pub mod descriptors;
pub mod error;
pub mod optimizer;

pub use config::{ProfileEvolveParams, TransitionEvolveParams, TunerConfig};
pub use error::{KeytunerError, Result};
pub use optimizer::{Evolver, RandomGenerator, TunerEngine};

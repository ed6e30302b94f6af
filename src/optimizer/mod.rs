pub mod engine;
pub mod evolver;
pub mod generator;
pub mod progress;

pub use engine::{FitnessRanker, ProgressCallback, TunerEngine, TunerOutcome};
pub use evolver::Evolver;
pub use generator::{Generator, RandomGenerator};
pub use progress::ConsoleProgressCallback;

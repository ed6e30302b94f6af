use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeytunerError {
    #[error("Empty population: {0}")]
    EmptyPopulation(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Sampling pool too small: {needed} distinct candidates requested, {available} available")]
    SamplingPool { needed: usize, available: usize },

    #[error("Unknown descriptor: {0}")]
    UnknownDescriptor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KeytunerError>;

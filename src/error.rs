//! Error types for procure-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for candidate (inclusion mask) operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Candidate length does not match the item dataset
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Error type for the item dataset boundary
#[derive(Debug, Error)]
pub enum DatasetError {
    /// No items were supplied
    #[error("Item dataset is empty")]
    Empty,

    /// A value is out of range after coercion
    #[error("Invalid value for `{field}` in row {row}: {value}")]
    InvalidValue {
        row: usize,
        field: &'static str,
        value: f64,
    },

    /// The input could not be parsed as a list of records
    #[error("Malformed item records: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed but is not an array of objects
    #[error("Malformed item records: {0}")]
    Shape(String),
}

/// Top-level error type for optimization runs
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Dataset error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,
}

/// Result type alias for optimization runs
pub type EvoResult<T> = Result<T, EvolutionError>;

/// Result of an operator application
#[derive(Debug, Clone)]
pub enum OperatorResult<G> {
    /// Operation succeeded
    Success(G),
    /// Operation failed unrecoverably
    Failed(OperatorError),
}

impl<G> OperatorResult<G> {
    /// Returns the genome if successful, None if failed
    pub fn genome(self) -> Option<G> {
        match self {
            Self::Success(g) => Some(g),
            Self::Failed(_) => None,
        }
    }

    /// Returns true if the operation was successful
    #[cfg(test)]
    pub(crate) fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

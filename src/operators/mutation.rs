//! Mutation operators
//!
//! This module provides mutation for inclusion masks.

use rand::Rng;

use crate::error::OperatorError;
use crate::genome::candidate::Candidate;
use crate::operators::traits::MutationOperator;

/// Bit-flip mutation
///
/// Each bit is flipped independently with the per-bit probability.
#[derive(Clone, Debug, Default)]
pub struct BitFlipMutation {
    /// Per-bit mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl BitFlipMutation {
    /// Create a new bit-flip mutation with probability 1/n
    pub fn new() -> Self {
        Self {
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per bit
    pub fn with_probability(probability: f64) -> Result<Self, OperatorError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "mutation probability must be in [0, 1], got {probability}"
            )));
        }
        Ok(Self {
            mutation_probability: Some(probability),
        })
    }

    /// Effective per-bit probability for a mask of length `n`
    pub fn probability_for(&self, n: usize) -> f64 {
        match self.mutation_probability {
            Some(p) => p,
            None if n == 0 => 0.0,
            None => 1.0 / n as f64,
        }
    }
}

impl MutationOperator for BitFlipMutation {
    fn mutate<R: Rng>(&self, candidate: &mut Candidate, rng: &mut R) {
        let n = candidate.len();
        let prob = self.probability_for(n);

        for i in 0..n {
            if rng.gen::<f64>() < prob {
                candidate.flip(i);
            }
        }
    }
}

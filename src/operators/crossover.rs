//! Crossover operators
//!
//! This module provides crossover for inclusion masks.

use rand::Rng;

use crate::error::{OperatorError, OperatorResult};
use crate::genome::candidate::Candidate;
use crate::operators::traits::CrossoverOperator;

/// Two-point crossover
///
/// Draws two distinct cut positions `0 <= p1 < p2 <= N` and swaps the segment
/// `[p1, p2)` between the parents. Bits outside the segment are inherited unchanged.
#[derive(Clone, Debug, Default)]
pub struct TwoPointCrossover;

impl TwoPointCrossover {
    /// Create a new two-point crossover
    pub fn new() -> Self {
        Self
    }

    /// Draw two distinct cut positions from `0..=n`, ordered
    pub fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
        let a = rng.gen_range(0..=n);
        let mut b = rng.gen_range(0..n);
        if b >= a {
            b += 1;
        }
        (a.min(b), a.max(b))
    }

    /// Swap `[p1, p2)` between two parents
    pub fn apply(parent1: &Candidate, parent2: &Candidate, p1: usize, p2: usize) -> (Candidate, Candidate) {
        let n = parent1.len();
        let mut child1_bits = Vec::with_capacity(n);
        let mut child2_bits = Vec::with_capacity(n);

        for i in 0..n {
            if i < p1 || i >= p2 {
                child1_bits.push(parent1[i]);
                child2_bits.push(parent2[i]);
            } else {
                child1_bits.push(parent2[i]);
                child2_bits.push(parent1[i]);
            }
        }

        (Candidate::new(child1_bits), Candidate::new(child2_bits))
    }
}

impl CrossoverOperator for TwoPointCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &Candidate,
        parent2: &Candidate,
        rng: &mut R,
    ) -> OperatorResult<(Candidate, Candidate)> {
        if parent1.len() != parent2.len() {
            return OperatorResult::Failed(OperatorError::CrossoverFailed(
                "Parent dimensions do not match".to_string(),
            ));
        }

        let n = parent1.len();
        if n == 0 {
            return OperatorResult::Success((parent1.clone(), parent2.clone()));
        }

        let (p1, p2) = Self::cut_points(n, rng);
        OperatorResult::Success(Self::apply(parent1, parent2, p1, p2))
    }
}

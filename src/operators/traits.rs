//! Operator traits
//!
//! This module defines the core operator traits for the search.

use rand::Rng;

use crate::error::OperatorResult;
use crate::genome::candidate::Candidate;
use crate::population::individual::Individual;

/// Selection operator trait
///
/// Picks parents from the current survivors.
pub trait SelectionOperator: Send + Sync {
    /// Select a single individual from the population
    ///
    /// Returns the index of the selected individual.
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize;
}

/// Crossover operator trait
///
/// Combines two parents into two offspring of the same length.
pub trait CrossoverOperator: Send + Sync {
    /// Apply crossover to two parents and produce two offspring
    fn crossover<R: Rng>(
        &self,
        parent1: &Candidate,
        parent2: &Candidate,
        rng: &mut R,
    ) -> OperatorResult<(Candidate, Candidate)>;
}

/// Mutation operator trait
///
/// Applies random changes to a candidate in place, never changing its length.
pub trait MutationOperator: Send + Sync {
    /// Apply mutation to a candidate in place
    fn mutate<R: Rng>(&self, candidate: &mut Candidate, rng: &mut R);
}

//! Population type
//!
//! This module provides the Population container, the generation-0 initializer, and
//! batch evaluation of candidates.

use std::collections::HashSet;

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fitness::traits::{MultiObjectiveFitness, ObjectiveVector};
use crate::genome::candidate::Candidate;
use crate::population::individual::Individual;

/// Redraws allowed per requested candidate before a duplicate is accepted
pub const MAX_DUPLICATE_RETRIES: usize = 100;

/// Draw `size` uniformly random candidates of length `dimension`
///
/// The all-zero candidate is a legal draw and is kept.
pub fn random_candidates<R: Rng>(size: usize, dimension: usize, rng: &mut R) -> Vec<Candidate> {
    (0..size)
        .map(|_| Candidate::random(dimension, rng))
        .collect()
}

/// Draw `size` candidates, pairwise distinct where the search space allows it
///
/// When `2^dimension <= size` every mask is included exactly once and the remaining
/// slots are filled with uniform draws. Otherwise masks are drawn uniformly and
/// repeats are redrawn, up to [`MAX_DUPLICATE_RETRIES`] per slot.
pub fn distinct_random_candidates<R: Rng>(
    size: usize,
    dimension: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    let space = (dimension < usize::BITS as usize).then(|| 1usize << dimension);

    let mut candidates = Vec::with_capacity(size);
    match space {
        Some(space) if space <= size => {
            candidates.extend((0..space).map(|mask| {
                Candidate::new((0..dimension).map(|i| (mask >> i) & 1 == 1).collect())
            }));
        }
        _ => {
            let mut seen = HashSet::with_capacity(size);
            let mut retries_left = size * MAX_DUPLICATE_RETRIES;
            while candidates.len() < size {
                let candidate = Candidate::random(dimension, rng);
                if seen.contains(&candidate) && retries_left > 0 {
                    retries_left -= 1;
                    continue;
                }
                seen.insert(candidate.clone());
                candidates.push(candidate);
            }
        }
    }

    while candidates.len() < size {
        candidates.push(Candidate::random(dimension, rng));
    }
    candidates
}

/// Evaluate candidates in order
pub fn evaluate<Fit>(candidates: Vec<Candidate>, fitness: &Fit) -> Vec<Individual>
where
    Fit: MultiObjectiveFitness + ?Sized,
{
    candidates
        .into_iter()
        .map(|c| {
            let objectives = fitness.evaluate(&c);
            Individual::new(c, objectives)
        })
        .collect()
}

/// Evaluate candidates across the rayon pool, preserving order
///
/// Each candidate is written to its own output slot; the call returns only once every
/// evaluation has finished.
#[cfg(feature = "parallel")]
pub fn evaluate_parallel<Fit>(candidates: Vec<Candidate>, fitness: &Fit) -> Vec<Individual>
where
    Fit: MultiObjectiveFitness + ?Sized,
{
    candidates
        .into_par_iter()
        .map(|c| {
            let objectives = fitness.evaluate(&c);
            Individual::new(c, objectives)
        })
        .collect()
}

/// Sequential fallback for parallel evaluation (when `parallel` feature is disabled)
#[cfg(not(feature = "parallel"))]
pub fn evaluate_parallel<Fit>(candidates: Vec<Candidate>, fitness: &Fit) -> Vec<Individual>
where
    Fit: MultiObjectiveFitness + ?Sized,
{
    evaluate(candidates, fitness)
}

/// A population of evaluated individuals
#[derive(Clone, Debug, Default)]
pub struct Population {
    individuals: Vec<Individual>,
    generation: usize,
}

impl Population {
    /// Create a population from evaluated individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Set the generation number
    pub fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }

    /// Number of individuals
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Iterate over individuals
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// All individuals in order
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Take the individuals out, leaving the population empty
    pub fn take_individuals(&mut self) -> Vec<Individual> {
        std::mem::take(&mut self.individuals)
    }

    /// Replace the individuals
    pub fn replace(&mut self, individuals: Vec<Individual>) {
        self.individuals = individuals;
    }

    /// Members of the first front, in population order
    pub fn pareto_front(&self) -> Vec<&Individual> {
        self.individuals.iter().filter(|i| i.rank == 0).collect()
    }

    /// Number of distinct bit patterns
    pub fn distinct_count(&self) -> usize {
        self.individuals
            .iter()
            .map(|i| &i.candidate)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Per-objective minimum over the population
    pub fn min_objectives(&self) -> Option<ObjectiveVector> {
        let first = self.individuals.first()?.objectives;
        Some(self.individuals.iter().fold(first, |acc, i| {
            ObjectiveVector::new(
                acc.total_cost.min(i.objectives.total_cost),
                acc.total_carbon.min(i.objectives.total_carbon),
                acc.total_eta.min(i.objectives.total_eta),
            )
        }))
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

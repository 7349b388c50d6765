//! Selection operators
//!
//! This module provides parent selection over ranked survivors.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::OperatorError;
use crate::operators::traits::SelectionOperator;
use crate::pareto::crowded_comparison;
use crate::population::individual::Individual;

/// Tournament selection with the crowded-comparison operator
///
/// Contestants are drawn with replacement, so every survivor can win a tournament.
/// Lower rank wins; within a rank the larger crowding distance wins; otherwise the
/// first contestant drawn is kept.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> Result<Self, OperatorError> {
        if tournament_size == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary() -> Self {
        Self { tournament_size: 2 }
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::binary()
    }
}

impl SelectionOperator for TournamentSelection {
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "Population cannot be empty");

        let mut best = rng.gen_range(0..population.len());
        for _ in 1..self.tournament_size {
            let challenger = rng.gen_range(0..population.len());
            if crowded_comparison(&population[challenger], &population[best]) {
                best = challenger;
            }
        }
        best
    }
}

/// Uniform random selection
#[derive(Clone, Debug, Default)]
pub struct RandomSelection;

impl RandomSelection {
    /// Create a new random selection
    pub fn new() -> Self {
        Self
    }
}

impl SelectionOperator for RandomSelection {
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "Population cannot be empty");
        rng.gen_range(0..population.len())
    }
}

/// Parent selection scheme chosen at configuration time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSelection {
    /// Binary tournament with crowded comparison
    #[default]
    Tournament,
    /// Uniform random pairing
    Random,
}

impl SelectionOperator for ParentSelection {
    fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        match self {
            Self::Tournament => TournamentSelection::binary().select(population, rng),
            Self::Random => RandomSelection.select(population, rng),
        }
    }
}

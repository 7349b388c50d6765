//! Optimizer configuration
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration. `pop_size` and `n_gen` are accepted as aliases.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithms::nsga2::{DEFAULT_GENERATIONS, DEFAULT_POPULATION_SIZE};
use crate::error::{EvoResult, EvolutionError};
use crate::extract::{SolutionOrder, DEFAULT_MAX_SOLUTIONS};

pub use crate::operators::selection::ParentSelection;

/// Configuration for a procurement optimization run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Population size
    #[serde(alias = "pop_size")]
    pub population_size: usize,
    /// Generations after the initial population
    #[serde(alias = "n_gen")]
    pub generations: usize,
    /// Random seed; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Probability that a mating pair is recombined
    pub crossover_probability: f64,
    /// Per-bit flip probability; 1/N when absent
    pub mutation_probability: Option<f64>,
    pub parent_selection: ParentSelection,
    /// Maximum number of reported solutions
    pub max_solutions: usize,
    pub solution_order: SolutionOrder,
    /// Report identical selections once
    pub distinct_solutions: bool,
    pub parallel_evaluation: bool,
    /// Keep the population free of repeated selections where the search space allows
    pub eliminate_duplicates: bool,
    /// Wall-clock limit in milliseconds
    pub time_limit_ms: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            seed: None,
            crossover_probability: 1.0,
            mutation_probability: None,
            parent_selection: ParentSelection::default(),
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            solution_order: SolutionOrder::default(),
            distinct_solutions: true,
            parallel_evaluation: true,
            eliminate_duplicates: true,
            time_limit_ms: None,
        }
    }
}

impl OptimizerConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> EvoResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EvolutionError::Configuration(format!("malformed configuration: {e}")))
    }

    /// Set the population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Wall-clock limit, if any
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size < 2 {
            return Err(EvolutionError::Configuration(format!(
                "pop_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations < 1 {
            return Err(EvolutionError::Configuration(
                "n_gen must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(EvolutionError::Configuration(format!(
                "crossover_probability must be in [0, 1], got {}",
                self.crossover_probability
            )));
        }
        if let Some(p) = self.mutation_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(EvolutionError::Configuration(format!(
                    "mutation_probability must be in [0, 1], got {p}"
                )));
            }
        }
        if self.max_solutions == 0 {
            return Err(EvolutionError::Configuration(
                "max_solutions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

//! Diagnostics and statistics
//!
//! This module provides per-generation statistics for a run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fitness::traits::ObjectiveVector;
use crate::population::population::Population;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (0 = initial population)
    pub generation: usize,
    /// Total objective evaluations so far
    pub evaluations: usize,
    /// Size of the first front among survivors
    pub front_size: usize,
    /// Per-objective minimum over the survivors
    pub best: ObjectiveVector,
    /// Number of distinct candidates among the survivors
    pub distinct: usize,
    /// Wall-clock time spent on this generation (ms)
    pub elapsed_ms: f64,
}

impl GenerationStats {
    /// Compute statistics from a ranked population
    pub fn from_population(population: &Population, evaluations: usize, elapsed: Duration) -> Self {
        Self {
            generation: population.generation(),
            evaluations,
            front_size: population.pareto_front().len(),
            best: population.min_objectives().unwrap_or_default(),
            distinct: population.distinct_count(),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

/// Statistics for a whole run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// One entry per generation, starting with generation 0
    pub generations: Vec<GenerationStats>,
    /// Total runtime (ms)
    pub runtime_ms: f64,
}

impl RunStats {
    /// Create empty run statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Set total runtime
    pub fn set_runtime(&mut self, runtime: Duration) {
        self.runtime_ms = runtime.as_secs_f64() * 1000.0;
    }

    /// Statistics of the last recorded generation
    pub fn last(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Short multi-line summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Generations: {}\nRuntime:     {:.1} ms",
            self.generations.len().saturating_sub(1),
            self.runtime_ms
        );
        if let Some(last) = self.last() {
            out.push_str(&format!(
                "\nFront size:  {}\nDistinct:    {}\nBest cost:   {:.3}\nBest carbon: {:.3}\nBest eta:    {:.3}",
                last.front_size,
                last.distinct,
                last.best.total_cost,
                last.best.total_carbon,
                last.best.total_eta
            ));
        }
        out
    }
}

//! Procurement optimizer
//!
//! One-call entry point: validate the configuration, run NSGA-II over the item dataset
//! and report the best trade-offs found.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::algorithms::nsga2::Nsga2;
use crate::config::OptimizerConfig;
use crate::dataset::item::ItemDataset;
use crate::diagnostics::RunStats;
use crate::error::{DatasetError, EvoResult};
use crate::extract::{extract_solutions, Solution};
use crate::fitness::procurement::ProcurementObjectives;
use crate::operators::mutation::BitFlipMutation;
use crate::termination::{CancellationToken, TerminationReason};

/// Result of [`optimize_materials`]
///
/// Serializes as `{"solutions": [...], "generations": .., "termination": .., ...}`.
#[derive(Clone, Debug, Serialize)]
pub struct OptimizationOutcome {
    pub solutions: Vec<Solution>,
    /// Generations completed after the initial population
    pub generations: usize,
    pub termination: TerminationReason,
    /// Size of the final first front, before truncation to the reported solutions
    pub front_size: usize,
    pub evaluations: usize,
    /// Seed the run used, drawn from entropy when the configuration had none
    pub seed: u64,
    #[serde(skip)]
    pub stats: RunStats,
}

impl OptimizationOutcome {
    /// Serialize the outcome to a JSON string
    pub fn to_json(&self) -> EvoResult<String> {
        serde_json::to_string(self).map_err(|e| DatasetError::Json(e).into())
    }
}

/// Find low-cost, low-carbon, low-eta item selections
///
/// Runs exactly `config.generations` generations unless `cancel` is tripped or the
/// configured time limit expires, in which case the best front so far is reported.
/// The same dataset, configuration and seed always produce the same outcome.
pub fn optimize_materials(
    dataset: &ItemDataset,
    config: &OptimizerConfig,
    cancel: Option<CancellationToken>,
) -> EvoResult<OptimizationOutcome> {
    config.validate()?;
    if dataset.is_empty() {
        return Err(DatasetError::Empty.into());
    }

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(
        items = dataset.len(),
        pop_size = config.population_size,
        n_gen = config.generations,
        seed,
        "Optimizing item selection"
    );

    let mutation = match config.mutation_probability {
        Some(p) => BitFlipMutation::with_probability(p)?,
        None => BitFlipMutation::new(),
    };

    let mut builder = Nsga2::builder()
        .population_size(config.population_size)
        .generations(config.generations)
        .crossover_probability(config.crossover_probability)
        .parallel_evaluation(config.parallel_evaluation)
        .eliminate_duplicates(config.eliminate_duplicates)
        .selection(config.parent_selection)
        .mutation(mutation);
    if let Some(token) = cancel {
        builder = builder.cancellation(token);
    }
    if let Some(limit) = config.time_limit() {
        builder = builder.time_limit(limit);
    }

    let objectives = ProcurementObjectives::new(dataset);
    let run = builder.build()?.run(&objectives, &mut rng)?;

    let front = run.pareto_front();
    let solutions = extract_solutions(
        dataset,
        &front,
        config.max_solutions,
        config.solution_order,
        config.distinct_solutions,
    );

    tracing::info!(
        generations = run.generations(),
        termination = run.termination.describe(),
        front_size = front.len(),
        solutions = solutions.len(),
        runtime_ms = run.stats.runtime_ms,
        "Optimization finished"
    );

    Ok(OptimizationOutcome {
        solutions,
        generations: run.generations(),
        termination: run.termination,
        front_size: front.len(),
        evaluations: run.evaluations,
        seed,
        stats: run.stats,
    })
}

//! NSGA-II (Non-dominated Sorting Genetic Algorithm II)
//!
//! Implements the NSGA-II generation loop over inclusion masks.
//!
//! Reference: Deb, K., Pratap, A., Agarwal, S., & Meyarivan, T. (2002).
//! A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II.
//! IEEE Transactions on Evolutionary Computation, 6(2).

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::diagnostics::{GenerationStats, RunStats};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::MultiObjectiveFitness;
use crate::genome::candidate::Candidate;
use crate::operators::crossover::TwoPointCrossover;
use crate::operators::mutation::BitFlipMutation;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::pareto::{rank_and_crowd, select_survivors};
use crate::population::individual::Individual;
use crate::population::population::{
    distinct_random_candidates, evaluate, evaluate_parallel, random_candidates, Population,
    MAX_DUPLICATE_RETRIES,
};
use crate::termination::{CancellationToken, StopCondition, TerminationReason};

/// Default population size
pub const DEFAULT_POPULATION_SIZE: usize = 50;
/// Default number of generations
pub const DEFAULT_GENERATIONS: usize = 100;

/// Configuration for NSGA-II
#[derive(Clone, Debug)]
pub struct Nsga2Config {
    /// Population size, held constant across generations
    pub population_size: usize,
    /// Number of generations after the initial population
    pub generations: usize,
    /// Probability that a mating pair is recombined
    pub crossover_probability: f64,
    /// Whether to evaluate offspring in parallel
    pub parallel_evaluation: bool,
    /// Redraw candidates that repeat an existing one, within a bounded budget
    pub eliminate_duplicates: bool,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            crossover_probability: 1.0,
            parallel_evaluation: true,
            eliminate_duplicates: true,
        }
    }
}

impl Nsga2Config {
    /// Reject configurations that cannot run
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size < 2 {
            return Err(EvolutionError::Configuration(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations < 1 {
            return Err(EvolutionError::Configuration(
                "generation count must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(EvolutionError::Configuration(format!(
                "crossover probability must be in [0, 1], got {}",
                self.crossover_probability
            )));
        }
        Ok(())
    }
}

/// Builder for Nsga2
pub struct Nsga2Builder<S, C, M> {
    config: Nsga2Config,
    selection: S,
    crossover: C,
    mutation: M,
    cancellation: Option<CancellationToken>,
    time_limit: Option<Duration>,
}

impl Nsga2Builder<TournamentSelection, TwoPointCrossover, BitFlipMutation> {
    /// Create a builder with binary tournament, two-point crossover and 1/N bit-flip
    pub fn new() -> Self {
        Self {
            config: Nsga2Config::default(),
            selection: TournamentSelection::binary(),
            crossover: TwoPointCrossover::new(),
            mutation: BitFlipMutation::new(),
            cancellation: None,
            time_limit: None,
        }
    }
}

impl Default for Nsga2Builder<TournamentSelection, TwoPointCrossover, BitFlipMutation> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C, M> Nsga2Builder<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of generations
    pub fn generations(mut self, generations: usize) -> Self {
        self.config.generations = generations;
        self
    }

    /// Set the crossover probability
    pub fn crossover_probability(mut self, probability: f64) -> Self {
        self.config.crossover_probability = probability;
        self
    }

    /// Enable or disable parallel evaluation
    pub fn parallel_evaluation(mut self, enabled: bool) -> Self {
        self.config.parallel_evaluation = enabled;
        self
    }

    /// Enable or disable duplicate elimination
    pub fn eliminate_duplicates(mut self, enabled: bool) -> Self {
        self.config.eliminate_duplicates = enabled;
        self
    }

    /// Stop at the next generation boundary once `token` is cancelled
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Stop at the next generation boundary once `limit` has elapsed
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Set the parent selection operator
    pub fn selection<NewS: SelectionOperator>(self, selection: NewS) -> Nsga2Builder<NewS, C, M> {
        Nsga2Builder {
            config: self.config,
            selection,
            crossover: self.crossover,
            mutation: self.mutation,
            cancellation: self.cancellation,
            time_limit: self.time_limit,
        }
    }

    /// Set the crossover operator
    pub fn crossover<NewC: CrossoverOperator>(self, crossover: NewC) -> Nsga2Builder<S, NewC, M> {
        Nsga2Builder {
            config: self.config,
            selection: self.selection,
            crossover,
            mutation: self.mutation,
            cancellation: self.cancellation,
            time_limit: self.time_limit,
        }
    }

    /// Set the mutation operator
    pub fn mutation<NewM: MutationOperator>(self, mutation: NewM) -> Nsga2Builder<S, C, NewM> {
        Nsga2Builder {
            config: self.config,
            selection: self.selection,
            crossover: self.crossover,
            mutation,
            cancellation: self.cancellation,
            time_limit: self.time_limit,
        }
    }

    /// Validate and build the Nsga2 instance
    pub fn build(self) -> EvoResult<Nsga2<S, C, M>> {
        self.config.validate()?;

        let mut stop = StopCondition::new(self.config.generations);
        if let Some(token) = self.cancellation {
            stop = stop.with_cancellation(token);
        }
        if let Some(limit) = self.time_limit {
            stop = stop.with_time_limit(limit);
        }

        Ok(Nsga2 {
            config: self.config,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            stop,
        })
    }
}

/// Outcome of an NSGA-II run
#[derive(Clone, Debug)]
pub struct Nsga2Run {
    /// Final ranked population; first-front members come first
    pub population: Population,
    /// Why the run stopped
    pub termination: TerminationReason,
    /// Total objective evaluations
    pub evaluations: usize,
    /// Per-generation statistics
    pub stats: RunStats,
}

impl Nsga2Run {
    /// Generations completed after the initial population
    pub fn generations(&self) -> usize {
        self.population.generation()
    }

    /// First front of the final population, in ranking order
    pub fn pareto_front(&self) -> Vec<&Individual> {
        self.population.pareto_front()
    }
}

/// NSGA-II algorithm
pub struct Nsga2<S, C, M> {
    config: Nsga2Config,
    selection: S,
    crossover: C,
    mutation: M,
    stop: StopCondition,
}

impl Nsga2<TournamentSelection, TwoPointCrossover, BitFlipMutation> {
    /// Create a builder for Nsga2
    pub fn builder() -> Nsga2Builder<TournamentSelection, TwoPointCrossover, BitFlipMutation> {
        Nsga2Builder::new()
    }
}

impl<S, C, M> Nsga2<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    fn evaluate<Fit>(&self, candidates: Vec<Candidate>, fitness: &Fit) -> Vec<Individual>
    where
        Fit: MultiObjectiveFitness + ?Sized,
    {
        if self.config.parallel_evaluation {
            evaluate_parallel(candidates, fitness)
        } else {
            evaluate(candidates, fitness)
        }
    }

    fn mate<R: Rng>(&self, parents: &[Individual], rng: &mut R) -> (Candidate, Candidate) {
        let parent1 = &parents[self.selection.select(parents, rng)].candidate;
        let parent2 = &parents[self.selection.select(parents, rng)].candidate;

        let (mut child1, mut child2) = if rng.gen::<f64>() < self.config.crossover_probability {
            match self.crossover.crossover(parent1, parent2, rng).genome() {
                Some((c1, c2)) => (c1, c2),
                None => (parent1.clone(), parent2.clone()),
            }
        } else {
            (parent1.clone(), parent2.clone())
        };

        self.mutation.mutate(&mut child1, rng);
        self.mutation.mutate(&mut child2, rng);
        (child1, child2)
    }

    /// Create `population_size` offspring from ranked parents
    ///
    /// With duplicate elimination on, a child equal to a parent or to an earlier child
    /// is discarded and bred again. After `population_size * MAX_DUPLICATE_RETRIES`
    /// discards, duplicates are accepted so the offspring count is always reached.
    pub fn create_offspring<R: Rng>(&self, parents: &[Individual], rng: &mut R) -> Vec<Candidate> {
        let size = self.config.population_size;
        let mut offspring = Vec::with_capacity(size);

        let mut seen: HashSet<Candidate> = if self.config.eliminate_duplicates {
            parents.iter().map(|p| p.candidate.clone()).collect()
        } else {
            HashSet::new()
        };
        let mut retries_left = size * MAX_DUPLICATE_RETRIES;

        while offspring.len() < size {
            let (child1, child2) = self.mate(parents, rng);
            for child in [child1, child2] {
                if offspring.len() == size {
                    break;
                }
                if self.config.eliminate_duplicates {
                    if seen.contains(&child) && retries_left > 0 {
                        retries_left -= 1;
                        continue;
                    }
                    seen.insert(child.clone());
                }
                offspring.push(child);
            }
        }

        offspring
    }

    /// Run one generation: reproduce, evaluate, then keep the best `population_size`
    /// of parents and offspring combined
    pub fn step<Fit, R>(&self, population: &mut Population, fitness: &Fit, rng: &mut R) -> usize
    where
        Fit: MultiObjectiveFitness + ?Sized,
        R: Rng,
    {
        let offspring = self.create_offspring(population.individuals(), rng);
        let evaluated = offspring.len();
        let offspring = self.evaluate(offspring, fitness);

        let combined: Vec<Individual> = population
            .take_individuals()
            .into_iter()
            .chain(offspring)
            .collect();

        population.replace(select_survivors(combined, self.config.population_size));
        population.set_generation(population.generation() + 1);
        evaluated
    }

    /// Run NSGA-II until the generation count is reached, or earlier on cancellation or
    /// time limit
    pub fn run<Fit, R>(&self, fitness: &Fit, rng: &mut R) -> EvoResult<Nsga2Run>
    where
        Fit: MultiObjectiveFitness + ?Sized,
        R: Rng,
    {
        let dimension = fitness.dimension();
        if dimension == 0 {
            return Err(EvolutionError::Configuration(
                "cannot search over zero items".to_string(),
            ));
        }

        let started = Instant::now();
        tracing::info!(
            items = dimension,
            population_size = self.config.population_size,
            generations = self.config.generations,
            "Starting NSGA-II run"
        );

        let mut stats = RunStats::new();

        let gen_start = Instant::now();
        let initial = if self.config.eliminate_duplicates {
            distinct_random_candidates(self.config.population_size, dimension, rng)
        } else {
            random_candidates(self.config.population_size, dimension, rng)
        };
        let mut evaluations = initial.len();
        let mut individuals = self.evaluate(initial, fitness);
        rank_and_crowd(&mut individuals);
        let mut population = Population::from_individuals(individuals);
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }
        stats.record(GenerationStats::from_population(
            &population,
            evaluations,
            gen_start.elapsed(),
        ));

        let termination = loop {
            if let Some(reason) = self.stop.check(population.generation(), started) {
                break reason;
            }

            let gen_start = Instant::now();
            evaluations += self.step(&mut population, fitness, rng);

            let gen_stats =
                GenerationStats::from_population(&population, evaluations, gen_start.elapsed());
            tracing::debug!(
                generation = gen_stats.generation,
                front_size = gen_stats.front_size,
                best_cost = gen_stats.best.total_cost,
                best_carbon = gen_stats.best.total_carbon,
                best_eta = gen_stats.best.total_eta,
                "Generation complete"
            );
            stats.record(gen_stats);
        };

        if termination != TerminationReason::GenerationsCompleted {
            tracing::warn!(
                completed = population.generation(),
                requested = self.config.generations,
                reason = termination.describe(),
                "Stopping early with the best front found so far"
            );
        }

        stats.set_runtime(started.elapsed());
        tracing::info!(
            generations = population.generation(),
            evaluations,
            front_size = population.pareto_front().len(),
            runtime_ms = stats.runtime_ms,
            "NSGA-II run finished"
        );

        Ok(Nsga2Run {
            population,
            termination,
            evaluations,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::item::{Item, ItemDataset};
    use crate::fitness::procurement::ProcurementObjectives;
    use crate::operators::selection::RandomSelection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dataset(n: usize) -> ItemDataset {
        ItemDataset::new(
            (0..n)
                .map(|i| {
                    let x = i as f64;
                    Item::new(format!("item-{i}"), 1.0 + (x * 7.0) % 11.0, 1.0 + x % 3.0, (x * 5.0) % 13.0)
                        .with_eta((x * 3.0) % 4.0)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_builder_validation() {
        assert!(Nsga2::builder().population_size(1).build().is_err());
        assert!(Nsga2::builder().generations(0).build().is_err());
        assert!(Nsga2::builder().crossover_probability(1.2).build().is_err());
        assert!(Nsga2::builder().population_size(2).generations(1).build().is_ok());
    }

    #[test]
    fn test_offspring_shape() {
        let fitness = ProcurementObjectives::new(&dataset(9));
        let mut rng = StdRng::seed_from_u64(1);
        let nsga2 = Nsga2::builder().population_size(7).build().unwrap();

        let mut parents = evaluate(random_candidates(7, 9, &mut rng), &fitness);
        rank_and_crowd(&mut parents);
        let offspring = nsga2.create_offspring(&parents, &mut rng);

        assert_eq!(offspring.len(), 7);
        assert!(offspring.iter().all(|c| c.len() == 9));
    }

    #[test]
    fn test_offspring_avoid_parent_and_sibling_duplicates() {
        let fitness = ProcurementObjectives::new(&dataset(12));
        let mut rng = StdRng::seed_from_u64(8);
        let nsga2 = Nsga2::builder().population_size(20).build().unwrap();

        let mut parents = evaluate(distinct_random_candidates(20, 12, &mut rng), &fitness);
        rank_and_crowd(&mut parents);
        let offspring = nsga2.create_offspring(&parents, &mut rng);

        let parent_masks: HashSet<&Candidate> = parents.iter().map(|p| &p.candidate).collect();
        assert_eq!(offspring.len(), 20);
        assert!(offspring.iter().all(|c| !parent_masks.contains(c)));
        assert_eq!(offspring.iter().collect::<HashSet<_>>().len(), 20);
    }

    #[test]
    fn test_offspring_fill_when_space_is_exhausted() {
        let fitness = ProcurementObjectives::new(&dataset(2));
        let mut rng = StdRng::seed_from_u64(9);
        let nsga2 = Nsga2::builder().population_size(6).build().unwrap();

        let mut parents = evaluate(distinct_random_candidates(6, 2, &mut rng), &fitness);
        rank_and_crowd(&mut parents);
        assert_eq!(nsga2.create_offspring(&parents, &mut rng).len(), 6);
    }

    #[test]
    fn test_initial_population_covers_small_space() {
        let fitness = ProcurementObjectives::new(&dataset(2));
        let nsga2 = Nsga2::builder()
            .population_size(4)
            .generations(1)
            .cancellation({
                let token = CancellationToken::new();
                token.cancel();
                token
            })
            .build()
            .unwrap();

        for seed in 0..20 {
            let run = nsga2.run(&fitness, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(run.generations(), 0);
            assert_eq!(run.population.distinct_count(), 4);
        }
    }

    #[test]
    fn test_duplicates_allowed_when_elimination_disabled() {
        let fitness = ProcurementObjectives::new(&dataset(1));
        let run = Nsga2::builder()
            .population_size(10)
            .generations(3)
            .eliminate_duplicates(false)
            .build()
            .unwrap()
            .run(&fitness, &mut StdRng::seed_from_u64(10))
            .unwrap();
        assert_eq!(run.population.len(), 10);
        assert!(run.population.distinct_count() <= 2);
    }

    #[test]
    fn test_population_size_is_constant() {
        let fitness = ProcurementObjectives::new(&dataset(12));
        let mut rng = StdRng::seed_from_u64(2);
        let nsga2 = Nsga2::builder()
            .population_size(21)
            .generations(15)
            .build()
            .unwrap();

        let run = nsga2.run(&fitness, &mut rng).unwrap();
        assert_eq!(run.population.len(), 21);
        assert_eq!(run.generations(), 15);
        assert_eq!(run.termination, TerminationReason::GenerationsCompleted);
        assert_eq!(run.evaluations, 21 * 16);
        assert_eq!(run.stats.generations.len(), 16);
        assert!(run.stats.generations.iter().all(|g| g.front_size >= 1));
    }

    #[test]
    fn test_front_comes_first_and_is_non_dominated() {
        let fitness = ProcurementObjectives::new(&dataset(10));
        let mut rng = StdRng::seed_from_u64(3);
        let run = Nsga2::builder()
            .population_size(30)
            .generations(10)
            .build()
            .unwrap()
            .run(&fitness, &mut rng)
            .unwrap();

        let front = run.pareto_front();
        assert!(!front.is_empty());
        for (i, ind) in run.population.iter().enumerate() {
            assert_eq!(ind.rank == 0, i < front.len());
        }
        for a in &front {
            for b in &front {
                assert!(!a.dominates(b));
            }
        }
    }

    #[test]
    fn test_objectives_match_candidates() {
        let fitness = ProcurementObjectives::new(&dataset(8));
        let mut rng = StdRng::seed_from_u64(4);
        let run = Nsga2::builder()
            .population_size(16)
            .generations(5)
            .build()
            .unwrap()
            .run(&fitness, &mut rng)
            .unwrap();

        for ind in &run.population {
            assert_eq!(ind.objectives, fitness.evaluate(&ind.candidate));
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let fitness = ProcurementObjectives::new(&dataset(15));
        let nsga2 = Nsga2::builder()
            .population_size(20)
            .generations(12)
            .build()
            .unwrap();

        let a = nsga2.run(&fitness, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = nsga2.run(&fitness, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.population.individuals(), b.population.individuals());
    }

    #[test]
    fn test_random_selection_and_no_crossover() {
        let fitness = ProcurementObjectives::new(&dataset(6));
        let mut rng = StdRng::seed_from_u64(5);
        let run = Nsga2::builder()
            .population_size(10)
            .generations(5)
            .crossover_probability(0.0)
            .selection(RandomSelection::new())
            .build()
            .unwrap()
            .run(&fitness, &mut rng)
            .unwrap();
        assert_eq!(run.population.len(), 10);
    }

    #[test]
    fn test_cancelled_run_returns_initial_front() {
        let fitness = ProcurementObjectives::new(&dataset(6));
        let token = CancellationToken::new();
        token.cancel();

        let run = Nsga2::builder()
            .population_size(8)
            .generations(50)
            .cancellation(token)
            .build()
            .unwrap()
            .run(&fitness, &mut StdRng::seed_from_u64(6))
            .unwrap();

        assert_eq!(run.termination, TerminationReason::Cancelled);
        assert_eq!(run.generations(), 0);
        assert_eq!(run.population.len(), 8);
        assert!(!run.pareto_front().is_empty());
    }

    #[test]
    fn test_time_limit_stops_run() {
        let fitness = ProcurementObjectives::new(&dataset(6));
        let run = Nsga2::builder()
            .population_size(8)
            .generations(1_000_000)
            .time_limit(Duration::ZERO)
            .build()
            .unwrap()
            .run(&fitness, &mut StdRng::seed_from_u64(7))
            .unwrap();

        assert_eq!(run.termination, TerminationReason::TimeLimit);
        assert_eq!(run.generations(), 0);
    }
}

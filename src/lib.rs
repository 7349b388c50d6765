//! # procure-evo
//!
//! Multi-objective item selection for procurement estimates.
//!
//! Each item carries a unit price, a quantity, a carbon intensity and an auxiliary
//! `eta` metric. A candidate is a binary inclusion mask over the items; NSGA-II
//! searches for masks that trade off total cost, total embodied carbon and total eta,
//! all minimized.
//!
//! ## Core Concepts
//!
//! - **Pareto ranking**: fast non-dominated sorting groups candidates into fronts
//! - **Diversity**: crowding distance spreads survivors along each front
//! - **Elitism**: parents and offspring compete for a fixed number of slots
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use procure_evo::prelude::*;
//!
//! let dataset = ItemDataset::from_json(r#"[
//!     {"item": "Concrete", "price": "1,200", "qty": 3, "gwp": 310},
//!     {"item": "Timber", "price": 800, "qty": 5, "gwp": 45}
//! ]"#)?;
//!
//! let config = OptimizerConfig::default().with_seed(42);
//! let outcome = optimize_materials(&dataset, &config, None)?;
//! println!("{}", outcome.to_json()?);
//! ```

pub mod algorithms;
pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod optimizer;
pub mod pareto;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::config::OptimizerConfig;
    pub use crate::dataset::prelude::*;
    pub use crate::diagnostics::{GenerationStats, RunStats};
    pub use crate::error::*;
    pub use crate::extract::{extract_solutions, Solution, SolutionOrder};
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::optimizer::{optimize_materials, OptimizationOutcome};
    pub use crate::pareto::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::{CancellationToken, StopCondition, TerminationReason};
}

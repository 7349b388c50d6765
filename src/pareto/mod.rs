//! Pareto ranking and diversity
//!
//! Non-dominated sorting into ranked fronts, crowding distance within a front, and the
//! elitist survivor selection that combines them (Deb et al., 2002).

pub mod crowding;
pub mod sorting;
pub mod survival;

pub use crowding::{calculate_crowding_distance, crowded_comparison};
pub use sorting::fast_non_dominated_sort;
pub use survival::{rank_and_crowd, select_survivors};

pub mod prelude {
    pub use super::crowding::*;
    pub use super::sorting::*;
    pub use super::survival::*;
}

//! Evolutionary algorithms
//!
//! This module provides the NSGA-II search over inclusion masks.

pub mod nsga2;

pub mod prelude {
    pub use super::nsga2::*;
}

//! Objective evaluation
//!
//! This module provides the objective vector, the evaluation trait, and the
//! procurement objectives over an item dataset.

pub mod procurement;
pub mod traits;

pub mod prelude {
    pub use super::procurement::*;
    pub use super::traits::*;
}

//! Individual wrapper type
//!
//! This module provides the Individual type that pairs a candidate with its objectives.

use serde::{Deserialize, Serialize};

use crate::fitness::traits::ObjectiveVector;
use crate::genome::candidate::Candidate;

/// An evaluated member of a population
///
/// Individuals are only ever constructed from a freshly evaluated candidate, so the
/// objectives always describe the current bit pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// The inclusion mask
    pub candidate: Candidate,
    /// Objective values
    pub objectives: ObjectiveVector,
    /// Pareto rank (0 = first front)
    pub rank: usize,
    /// Crowding distance within its front
    pub crowding_distance: f64,
}

impl Individual {
    /// Create a new individual with evaluated objectives
    pub fn new(candidate: Candidate, objectives: ObjectiveVector) -> Self {
        Self {
            candidate,
            objectives,
            rank: usize::MAX,
            crowding_distance: 0.0,
        }
    }

    /// Check if this individual dominates another
    pub fn dominates(&self, other: &Self) -> bool {
        self.objectives.dominates(&other.objectives)
    }
}

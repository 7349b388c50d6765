//! Objective traits
//!
//! This module defines the objective vector and the multi-objective evaluation trait.

use serde::{Deserialize, Serialize};

use crate::genome::candidate::Candidate;

/// Number of objectives every candidate is scored on
pub const NUM_OBJECTIVES: usize = 3;

/// Aggregate objectives of a candidate (all minimized)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveVector {
    /// Sum of unit prices over selected items
    pub total_cost: f64,
    /// Sum of `carbon_intensity * quantity` over selected items
    pub total_carbon: f64,
    /// Sum of eta over selected items
    pub total_eta: f64,
}

impl ObjectiveVector {
    /// Create a new objective vector
    pub fn new(total_cost: f64, total_carbon: f64, total_eta: f64) -> Self {
        Self {
            total_cost,
            total_carbon,
            total_eta,
        }
    }

    /// Objective values in a fixed order: cost, carbon, eta
    pub fn as_array(&self) -> [f64; NUM_OBJECTIVES] {
        [self.total_cost, self.total_carbon, self.total_eta]
    }

    /// Value of objective `index` (0 = cost, 1 = carbon, 2 = eta)
    ///
    /// # Panics
    /// If `index >= NUM_OBJECTIVES`.
    pub fn get(&self, index: usize) -> f64 {
        self.as_array()[index]
    }

    /// Check if this vector dominates another
    /// (all objectives <= and at least one <, since we minimize)
    pub fn dominates(&self, other: &Self) -> bool {
        let a = self.as_array();
        let b = other.as_array();
        let at_least_as_good = a.iter().zip(b.iter()).all(|(x, y)| x <= y);
        let strictly_better = a.iter().zip(b.iter()).any(|(x, y)| x < y);
        at_least_as_good && strictly_better
    }
}

/// Multi-objective fitness function trait
#[cfg(feature = "parallel")]
pub trait MultiObjectiveFitness: Send + Sync {
    /// Number of bits a candidate must have
    fn dimension(&self) -> usize;

    /// Evaluate all objectives (all minimized)
    fn evaluate(&self, candidate: &Candidate) -> ObjectiveVector;
}

/// Multi-objective fitness function trait
#[cfg(not(feature = "parallel"))]
pub trait MultiObjectiveFitness {
    /// Number of bits a candidate must have
    fn dimension(&self) -> usize;

    /// Evaluate all objectives (all minimized)
    fn evaluate(&self, candidate: &Candidate) -> ObjectiveVector;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domination() {
        let a = ObjectiveVector::new(1.0, 2.0, 0.0);
        let b = ObjectiveVector::new(2.0, 3.0, 0.0);
        let c = ObjectiveVector::new(1.5, 1.5, 0.0);

        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
    }

    #[test]
    fn test_equal_vectors_do_not_dominate() {
        let a = ObjectiveVector::new(1.0, 1.0, 1.0);
        assert!(!a.dominates(&a));
        assert!(!a.dominates(&a.clone()));
    }

    #[test]
    fn test_single_strict_improvement_dominates() {
        let a = ObjectiveVector::new(1.0, 1.0, 0.0);
        let b = ObjectiveVector::new(1.0, 1.0, 0.5);
        assert!(a.dominates(&b));
    }

    #[test]
    fn test_as_array_order() {
        let v = ObjectiveVector::new(3.0, 2.0, 1.0);
        assert_eq!(v.as_array(), [3.0, 2.0, 1.0]);
        assert_eq!(v.get(1), 2.0);
    }
}

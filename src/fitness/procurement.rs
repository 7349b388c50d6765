//! Procurement objectives
//!
//! Scores an inclusion mask against an item dataset: total cost, total embodied
//! carbon and total eta, each the dot product of the mask with one item column.

use crate::dataset::item::ItemDataset;
use crate::error::GenomeError;
use crate::fitness::traits::{MultiObjectiveFitness, ObjectiveVector};
use crate::genome::candidate::Candidate;

/// Objective evaluator over a fixed item dataset
///
/// Columns are copied out of the dataset once; evaluation is pure and does no I/O.
#[derive(Clone, Debug)]
pub struct ProcurementObjectives {
    cost: Vec<f64>,
    carbon: Vec<f64>,
    eta: Vec<f64>,
}

impl ProcurementObjectives {
    /// Build the evaluator for a dataset
    pub fn new(dataset: &ItemDataset) -> Self {
        Self {
            cost: dataset.unit_prices(),
            carbon: dataset.carbon(),
            eta: dataset.etas(),
        }
    }

    /// Evaluate, reporting a length mismatch instead of panicking
    pub fn try_evaluate(&self, candidate: &Candidate) -> Result<ObjectiveVector, GenomeError> {
        if candidate.len() != self.cost.len() {
            return Err(GenomeError::DimensionMismatch {
                expected: self.cost.len(),
                actual: candidate.len(),
            });
        }

        let mut totals = ObjectiveVector::default();
        for i in candidate.selected() {
            totals.total_cost += self.cost[i];
            totals.total_carbon += self.carbon[i];
            totals.total_eta += self.eta[i];
        }
        Ok(totals)
    }
}

impl MultiObjectiveFitness for ProcurementObjectives {
    fn dimension(&self) -> usize {
        self.cost.len()
    }

    /// # Panics
    /// If the candidate length differs from the dataset size. Inside a run this is a
    /// programming error, never a data error.
    fn evaluate(&self, candidate: &Candidate) -> ObjectiveVector {
        match self.try_evaluate(candidate) {
            Ok(v) => v,
            Err(e) => panic!("candidate does not fit the item dataset: {e}"),
        }
    }
}

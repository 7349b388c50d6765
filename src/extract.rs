//! Solution extraction
//!
//! Turns the first front of a finished run into reportable item selections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::item::ItemDataset;
use crate::fitness::procurement::ProcurementObjectives;
use crate::fitness::traits::{MultiObjectiveFitness, ObjectiveVector};
use crate::genome::candidate::Candidate;
use crate::population::individual::Individual;

/// Default number of reported solutions
pub const DEFAULT_MAX_SOLUTIONS: usize = 3;

/// One reported item selection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Position in the reported list, starting at 0
    pub id: usize,
    /// Names of the selected items, in dataset order
    pub items: Vec<String>,
    pub total_cost: f64,
    pub total_carbon: f64,
    pub total_eta: f64,
}

/// Order in which front members are reported
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionOrder {
    /// Order produced by ranking
    #[default]
    Ranked,
    /// Ascending by cost, then carbon, then eta, then front position
    Cost,
}

/// Extract up to `max_solutions` solutions from a front
///
/// Totals are recomputed from the dataset rather than read from the individuals.
/// With `distinct` set, repeated bit patterns are reported once, at their first
/// position.
///
/// # Panics
/// If a front member does not match the dataset length.
pub fn extract_solutions(
    dataset: &ItemDataset,
    front: &[&Individual],
    max_solutions: usize,
    order: SolutionOrder,
    distinct: bool,
) -> Vec<Solution> {
    let objectives = ProcurementObjectives::new(dataset);

    let mut seen: HashSet<&Candidate> = HashSet::new();
    let mut scored: Vec<(usize, &Candidate, ObjectiveVector)> = front
        .iter()
        .map(|ind| &ind.candidate)
        .filter(|c| !distinct || seen.insert(*c))
        .enumerate()
        .map(|(pos, c)| (pos, c, objectives.evaluate(c)))
        .collect();

    if order == SolutionOrder::Cost {
        scored.sort_by(|a, b| {
            a.2.as_array()
                .iter()
                .zip(b.2.as_array().iter())
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
    }

    scored
        .into_iter()
        .take(max_solutions)
        .enumerate()
        .map(|(id, (_, candidate, totals))| Solution {
            id,
            items: candidate
                .selected()
                .map(|i| dataset[i].name.clone())
                .collect(),
            total_cost: totals.total_cost,
            total_carbon: totals.total_carbon,
            total_eta: totals.total_eta,
        })
        .collect()
}

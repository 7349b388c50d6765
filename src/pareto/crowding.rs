//! Crowding distance and the crowded-comparison operator

use std::cmp::Ordering;

use crate::fitness::traits::NUM_OBJECTIVES;
use crate::population::individual::Individual;

/// Calculate crowding distance for a front
///
/// For each objective the front is ordered by value (ties by index); the two boundary
/// members get infinite distance and each interior member accumulates the normalized
/// gap between its neighbours. Fronts of one or two members are all boundary.
pub fn calculate_crowding_distance(population: &mut [Individual], front: &[usize]) {
    let n = front.len();
    if n <= 2 {
        for &i in front {
            population[i].crowding_distance = f64::INFINITY;
        }
        return;
    }

    for &i in front {
        population[i].crowding_distance = 0.0;
    }

    for obj in 0..NUM_OBJECTIVES {
        let mut sorted_indices: Vec<usize> = front.to_vec();
        sorted_indices.sort_by(|&a, &b| {
            population[a]
                .objectives
                .get(obj)
                .partial_cmp(&population[b].objectives.get(obj))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        population[sorted_indices[0]].crowding_distance = f64::INFINITY;
        population[sorted_indices[n - 1]].crowding_distance = f64::INFINITY;

        let obj_min = population[sorted_indices[0]].objectives.get(obj);
        let obj_max = population[sorted_indices[n - 1]].objectives.get(obj);
        let obj_range = obj_max - obj_min;

        if obj_range > 0.0 {
            for w in 1..(n - 1) {
                let idx = sorted_indices[w];
                let prev_val = population[sorted_indices[w - 1]].objectives.get(obj);
                let next_val = population[sorted_indices[w + 1]].objectives.get(obj);
                population[idx].crowding_distance += (next_val - prev_val) / obj_range;
            }
        }
    }
}

/// Crowded comparison operator
///
/// Returns true if a is better than b (lower rank, or same rank with higher crowding distance)
pub fn crowded_comparison(a: &Individual, b: &Individual) -> bool {
    a.rank < b.rank || (a.rank == b.rank && a.crowding_distance > b.crowding_distance)
}

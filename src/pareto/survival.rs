//! Elitist survivor selection

use std::cmp::Ordering;

use crate::pareto::crowding::calculate_crowding_distance;
use crate::pareto::sorting::fast_non_dominated_sort;
use crate::population::individual::Individual;

/// Rank a set and assign crowding distance within every front
///
/// Returns the fronts as produced by [`fast_non_dominated_sort`].
pub fn rank_and_crowd(population: &mut [Individual]) -> Vec<Vec<usize>> {
    let fronts = fast_non_dominated_sort(population);
    for front in &fronts {
        calculate_crowding_distance(population, front);
    }
    fronts
}

/// Select exactly `capacity` survivors from a combined parent + offspring set
///
/// Whole fronts are taken in rank order while they fit; the first front that does not
/// fit is truncated by descending crowding distance, ties broken by lower index.
/// Survivors come out front by front, so the first front leads the result. If the set
/// holds fewer than `capacity` individuals, all of them survive.
pub fn select_survivors(mut combined: Vec<Individual>, capacity: usize) -> Vec<Individual> {
    let fronts = rank_and_crowd(&mut combined);

    let mut chosen: Vec<usize> = Vec::with_capacity(capacity);
    for front in fronts {
        let remaining = capacity - chosen.len();
        if remaining == 0 {
            break;
        }

        if front.len() <= remaining {
            chosen.extend(front);
        } else {
            let mut sorted_front = front;
            sorted_front.sort_by(|&a, &b| {
                combined[b]
                    .crowding_distance
                    .partial_cmp(&combined[a].crowding_distance)
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            });
            chosen.extend(sorted_front.into_iter().take(remaining));
            break;
        }
    }

    let mut slots: Vec<Option<Individual>> = combined.into_iter().map(Some).collect();
    chosen
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

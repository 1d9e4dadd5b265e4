use super::{bound::upper_bound, sort_by_density};
use knap_challenges::knapsack::*;
use log::debug;
use logging_timer::time;

/// Takes every item of `items`, in order, that still fits in the remaining capacity.
pub fn fill(items: &[Item], num_items: usize, capacity: u32) -> Solution {
    let mut solution = Solution::new(num_items, false);
    let mut remaining = capacity;
    for item in items {
        if item.weight <= remaining {
            remaining -= item.weight;
            solution.select(item);
        }
    }
    solution
}

/// Density-ordered greedy fill. Always feasible, never reported as optimal.
#[time]
pub fn pack_heuristic(challenge: &Challenge) -> Solution {
    let sorted = sort_by_density(&challenge.items);
    let bound = upper_bound(&sorted, challenge.capacity);

    // Items heavier than the knapsack, or worth more on their own than the bound, are skipped
    let candidates: Vec<Item> = sorted
        .into_iter()
        .filter(|item| item.weight <= challenge.capacity && item.value as f64 <= bound)
        .collect();
    debug!(
        "greedy: {} of {} items are candidates (bound {:.2})",
        candidates.len(),
        challenge.num_items,
        bound
    );

    fill(&candidates, challenge.num_items, challenge.capacity)
}

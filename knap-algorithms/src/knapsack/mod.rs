use anyhow::Result;
use knap_challenges::knapsack::*;
use serde_json::{Map, Value};
pub mod bound;
pub mod dynamic;
pub mod greedy;
mod params;
mod solver;
pub use params::{Params, StrategyOverride};
pub use solver::{Solver, Strategy};

pub fn solve_challenge(
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<Solution> {
    let (_, solution) = Solver::solve(challenge, hyperparameters)?;
    Ok(solution)
}

/// Copies `items` into descending density order. Equal densities keep input order.
pub fn sort_by_density(items: &[Item]) -> Vec<Item> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.density.total_cmp(&a.density));
    sorted
}

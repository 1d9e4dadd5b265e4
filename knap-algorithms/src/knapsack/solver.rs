use super::bound::upper_bound;
use super::params::{Params, StrategyOverride};
use super::{dynamic, greedy, sort_by_density};
use anyhow::{anyhow, Result};
use knap_challenges::knapsack::*;
use log::{info, warn};
use logging_timer::time;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Exact,
    Heuristic,
}

pub struct Solver;

impl Solver {
    pub fn solve(
        challenge: &Challenge,
        hyperparameters: &Option<Map<String, Value>>,
    ) -> Result<(Strategy, Solution)> {
        let params = Params::initialize(hyperparameters)?;
        Self::solve_with_params(challenge, &params)
    }

    #[time("info")]
    pub fn solve_with_params(
        challenge: &Challenge,
        params: &Params,
    ) -> Result<(Strategy, Solution)> {
        let strategy = Self::choose_strategy(challenge, params)?;
        info!(
            "solving {} items, capacity {} with {:?} strategy",
            challenge.num_items, challenge.capacity, strategy
        );

        let solution = match strategy {
            Strategy::Exact => {
                let packing = dynamic::pack(challenge);
                if params.validate {
                    packing.check(challenge.capacity)?;
                }
                packing.solution
            }
            Strategy::Heuristic => greedy::pack_heuristic(challenge),
        };

        if params.validate {
            challenge.verify_solution(&solution)?;
            let bound = upper_bound(&sort_by_density(&challenge.items), challenge.capacity);
            if solution.total_value as f64 > bound {
                return Err(anyhow!(
                    "Total value ({}) exceeds upper bound ({})",
                    solution.total_value,
                    bound
                ));
            }
        }
        Ok((strategy, solution))
    }

    /// Exact solving is used while the item count and the table both stay within budget.
    pub fn choose_strategy(challenge: &Challenge, params: &Params) -> Result<Strategy> {
        let cells = dynamic::table_cells(challenge.num_items, challenge.capacity);
        let fits_budget = cells.is_some_and(|c| c <= params.max_table_cells);

        match params.strategy {
            StrategyOverride::Heuristic => Ok(Strategy::Heuristic),
            StrategyOverride::Exact if fits_budget => Ok(Strategy::Exact),
            StrategyOverride::Exact => Err(anyhow!(
                "Exact table needs {:?} cells, budget is {}",
                cells,
                params.max_table_cells
            )),
            StrategyOverride::Auto => {
                if challenge.num_items > params.exact_item_threshold {
                    Ok(Strategy::Heuristic)
                } else if !fits_budget {
                    warn!(
                        "table of {:?} cells exceeds budget of {}, falling back to heuristic",
                        cells, params.max_table_cells
                    );
                    Ok(Strategy::Heuristic)
                } else {
                    Ok(Strategy::Exact)
                }
            }
        }
    }
}

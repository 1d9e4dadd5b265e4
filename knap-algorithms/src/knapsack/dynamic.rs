use super::sort_by_density;
use anyhow::{anyhow, Result};
use knap_challenges::knapsack::*;
use log::debug;
use logging_timer::time;
use ndarray::{Array2, ShapeBuilder};

/// Result of an exact solve together with what the tables claimed.
#[derive(Debug, Clone)]
pub struct Packing {
    pub solution: Solution,
    /// Optimum read from the value table
    pub table_value: u64,
    /// Weight the weight table tracked alongside `table_value`
    pub table_weight: u64,
    /// Weight of the items picked during reconstruction
    pub weight: u64,
}

impl Packing {
    fn empty(num_items: usize) -> Self {
        Self {
            solution: Solution::new(num_items, true),
            table_value: 0,
            table_weight: 0,
            weight: 0,
        }
    }

    /// Checks the reconstructed selection against the tables.
    pub fn check(&self, capacity: u32) -> Result<()> {
        if self.solution.total_value != self.table_value {
            return Err(anyhow!(
                "Reconstructed value ({}) differs from table optimum ({})",
                self.solution.total_value,
                self.table_value
            ));
        }
        if self.weight > capacity as u64 || self.table_weight > capacity as u64 {
            return Err(anyhow!(
                "Reconstructed weight ({}) or table weight ({}) exceeds capacity ({})",
                self.weight,
                self.table_weight,
                capacity
            ));
        }
        Ok(())
    }
}

/// Cells needed by the value table, `None` on overflow.
pub fn table_cells(num_items: usize, capacity: u32) -> Option<u64> {
    (capacity as u64 + 1).checked_mul(num_items as u64 + 1)
}

#[time]
pub fn pack_exact(challenge: &Challenge) -> Solution {
    pack(challenge).solution
}

/// Fills value and weight tables indexed by `[capacity level, item prefix]` and walks
/// them back from the full capacity to recover one optimal selection.
///
/// Allocates `table_cells` entries in each table; callers gate on that first.
pub fn pack(challenge: &Challenge) -> Packing {
    let capacity = challenge.capacity as usize;
    let items: Vec<Item> = sort_by_density(&challenge.items)
        .into_iter()
        .filter(|item| item.weight <= challenge.capacity)
        .collect();
    if capacity == 0 || items.is_empty() {
        return Packing::empty(challenge.num_items);
    }

    let n = items.len();
    debug!("dp: {} items x {} capacity levels", n, capacity);

    // Column-major so each item prefix is contiguous
    let mut values = Array2::<u64>::zeros((capacity + 1, n + 1).f());
    let mut weights = Array2::<u32>::zeros((capacity + 1, n + 1).f());

    for i in 1..=n {
        let item = &items[i - 1];
        let w = item.weight as usize;
        let v = item.value as u64;
        for c in 1..=capacity {
            let kept_value = values[[c, i - 1]];
            let kept_weight = weights[[c, i - 1]];
            let (value, weight) = if w > c {
                (kept_value, kept_weight)
            } else if v > 0 && c - kept_weight as usize >= w {
                (kept_value + v, kept_weight + item.weight)
            } else {
                let base_value = values[[c - w, i - 1]];
                let base_weight = weights[[c - w, i - 1]];
                // Ties keep the item out
                if base_value + v > kept_value {
                    (base_value + v, base_weight + item.weight)
                } else {
                    (kept_value, kept_weight)
                }
            };
            values[[c, i]] = value;
            weights[[c, i]] = weight;
        }
    }

    let mut packing = Packing {
        solution: Solution::new(challenge.num_items, true),
        table_value: values[[capacity, n]],
        table_weight: weights[[capacity, n]] as u64,
        weight: 0,
    };
    let mut c = capacity;
    for i in (1..=n).rev() {
        if values[[c, i]] != values[[c, i - 1]] {
            let item = &items[i - 1];
            packing.solution.select(item);
            packing.weight += item.weight as u64;
            c -= item.weight as usize;
        }
    }
    packing
}

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyOverride {
    Auto,
    Exact,
    Heuristic,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Params {
    /// Largest item count routed to the exact solver
    pub exact_item_threshold: usize,

    /// Largest `(capacity + 1) * (num_items + 1)` table the exact solver may allocate
    pub max_table_cells: u64,

    pub strategy: StrategyOverride,

    /// Re-check every solution against its instance before returning it
    pub validate: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            exact_item_threshold: 200,
            max_table_cells: 1 << 24,
            strategy: StrategyOverride::Auto,
            validate: false,
        }
    }
}

impl Params {
    pub fn initialize(h: &Option<Map<String, Value>>) -> Result<Self> {
        let mut p = Self::default();
        if let Some(m) = h {
            if let Some(v) = m.get("exact_item_threshold").and_then(|v| v.as_u64()) { p.exact_item_threshold = v as usize; }
            if let Some(v) = m.get("max_table_cells").and_then(|v| v.as_u64()) { p.max_table_cells = v; }
            if let Some(v) = m.get("validate").and_then(|v| v.as_bool()) { p.validate = v; }
            if let Some(v) = m.get("strategy") {
                p.strategy = serde_json::from_value(v.clone())
                    .map_err(|_| anyhow!("Unknown strategy '{}', expected auto, exact or heuristic", v))?;
            }
        }
        Ok(p)
    }
}

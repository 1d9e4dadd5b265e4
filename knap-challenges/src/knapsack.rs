use crate::{KnapsackError, KnapsackResult};
use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Parameters for generating a random instance.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Track {
    pub num_items: usize,
    /// Item weights are drawn from `1..=max_weight`
    pub max_weight: u32,
    /// Item values are drawn from `0..=max_value`
    pub max_value: u32,
    /// Capacity as a percentage of the total item weight
    pub budget: u32,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            num_items: 50,
            max_weight: 50,
            max_value: 100,
            budget: 50,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Item {
    /// Position of the item in the original input
    pub index: usize,
    pub value: u32,
    pub weight: u32,
    pub density: f64,
}

impl Item {
    pub fn new(index: usize, value: u32, weight: u32) -> Self {
        Self {
            index,
            value,
            weight,
            density: value as f64 / weight as f64,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub total_value: u64,
    pub is_optimal: bool,
    /// Selection flags indexed by original item index
    pub taken: Vec<bool>,
}

impl Solution {
    pub fn new(num_items: usize, is_optimal: bool) -> Self {
        Self {
            total_value: 0,
            is_optimal,
            taken: vec![false; num_items],
        }
    }

    pub fn select(&mut self, item: &Item) {
        if !self.taken[item.index] {
            self.taken[item.index] = true;
            self.total_value += item.value as u64;
        }
    }

    pub fn items(&self) -> Vec<usize> {
        (0..self.taken.len()).filter(|&i| self.taken[i]).collect()
    }

    pub fn total_weight(&self, challenge: &Challenge) -> u64 {
        self.items()
            .iter()
            .filter_map(|&i| challenge.items.get(i))
            .map(|item| item.weight as u64)
            .sum()
    }

    /// Parses `"<total_value> <0|1>"` followed by a line of 0/1 flags.
    pub fn from_output_str(output: &str) -> KnapsackResult<Self> {
        let mut lines = output
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_no, header) = lines.next().ok_or(KnapsackError::MissingHeader)?;
        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(malformed(
                header_no,
                format!("expected 2 fields, found {}", tokens.len()),
            ));
        }
        let total_value = tokens[0]
            .parse::<u64>()
            .map_err(|_| malformed(header_no, format!("'{}' is not a total value", tokens[0])))?;
        let is_optimal = parse_flag(header_no, tokens[1])?;

        let taken = match lines.next() {
            Some((line_no, line)) => line
                .split_whitespace()
                .map(|token| parse_flag(line_no, token))
                .collect::<KnapsackResult<Vec<bool>>>()?,
            None => Vec::new(),
        };
        if let Some((line_no, _)) = lines.next() {
            return Err(malformed(line_no, "unexpected trailing line".to_string()));
        }

        Ok(Self {
            total_value,
            is_optimal,
            taken,
        })
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.total_value, self.is_optimal as u8)?;
        let flags: Vec<&str> = self
            .taken
            .iter()
            .map(|&t| if t { "1" } else { "0" })
            .collect();
        write!(f, "{}", flags.join(" "))
    }
}

impl FromStr for Solution {
    type Err = KnapsackError;

    fn from_str(s: &str) -> KnapsackResult<Self> {
        Self::from_output_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Challenge {
    pub num_items: usize,
    pub items: Vec<Item>,
    pub capacity: u32,
}

impl Challenge {
    /// Builds an instance from `(value, weight)` pairs, rejecting negative capacities,
    /// non-positive weights and negative values.
    pub fn from_pairs(pairs: &[(i64, i64)], capacity: i64) -> KnapsackResult<Self> {
        let capacity =
            u32::try_from(capacity).map_err(|_| KnapsackError::InvalidCapacity { capacity })?;

        let mut items = Vec::with_capacity(pairs.len());
        for (index, &(value, weight)) in pairs.iter().enumerate() {
            let value =
                u32::try_from(value).map_err(|_| KnapsackError::InvalidValue { index, value })?;
            let weight = match u32::try_from(weight) {
                Ok(w) if w > 0 => w,
                _ => return Err(KnapsackError::InvalidWeight { index, weight }),
            };
            items.push(Item::new(index, value, weight));
        }

        Ok(Self {
            num_items: items.len(),
            items,
            capacity,
        })
    }

    /// Parses `"<item_count> <capacity>"` followed by one `"<value> <weight>"` line per item.
    pub fn from_input_str(input: &str) -> KnapsackResult<Self> {
        let mut lines = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_no, header) = lines.next().ok_or(KnapsackError::MissingHeader)?;
        let (num_items, capacity) = parse_pair(header_no, header)?;
        let num_items = usize::try_from(num_items).map_err(|_| {
            malformed(header_no, format!("item count '{}' is negative", num_items))
        })?;

        let pairs = lines
            .map(|(line_no, line)| parse_pair(line_no, line))
            .collect::<KnapsackResult<Vec<_>>>()?;
        if pairs.len() != num_items {
            return Err(KnapsackError::ItemCountMismatch {
                declared: num_items,
                found: pairs.len(),
            });
        }

        Self::from_pairs(&pairs, capacity)
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.max_weight == 0 {
            return Err(anyhow!("Track max_weight must be positive"));
        }
        let mut rng = SmallRng::from_seed(seed.clone());

        let items: Vec<Item> = (0..track.num_items)
            .map(|i| {
                let weight = rng.gen_range(1..=track.max_weight);
                let value = rng.gen_range(0..=track.max_value);
                Item::new(i, value, weight)
            })
            .collect();

        let total_weight: u64 = items.iter().map(|item| item.weight as u64).sum();
        let capacity = (total_weight * track.budget as u64 / 100).min(u32::MAX as u64) as u32;

        Ok(Self {
            num_items: track.num_items,
            items,
            capacity,
        })
    }

    /// Checks feasibility and value consistency, returning the recomputed total value.
    pub fn verify_solution(&self, solution: &Solution) -> Result<u64> {
        if self.items.len() != self.num_items {
            return Err(anyhow!(
                "Instance declares {} items but holds {}",
                self.num_items,
                self.items.len()
            ));
        }
        if solution.taken.len() != self.num_items {
            return Err(anyhow!(
                "Solution has {} flags but instance has {} items",
                solution.taken.len(),
                self.num_items
            ));
        }

        let total_weight = solution.total_weight(self);
        if total_weight > self.capacity as u64 {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }

        let total_value: u64 = solution
            .items()
            .iter()
            .filter_map(|&i| self.items.get(i))
            .map(|item| item.value as u64)
            .sum();
        if total_value != solution.total_value {
            return Err(anyhow!(
                "Reported total value ({}) does not match selected items ({})",
                solution.total_value,
                total_value
            ));
        }
        Ok(total_value)
    }

    /// Renders the instance in the same text format `from_input_str` reads.
    pub fn to_input_string(&self) -> String {
        let mut lines = Vec::with_capacity(self.num_items + 1);
        lines.push(format!("{} {}", self.num_items, self.capacity));
        for item in &self.items {
            lines.push(format!("{} {}", item.value, item.weight));
        }
        lines.join("\n")
    }
}

impl FromStr for Challenge {
    type Err = KnapsackError;

    fn from_str(s: &str) -> KnapsackResult<Self> {
        Self::from_input_str(s)
    }
}

fn malformed(line_no: usize, reason: String) -> KnapsackError {
    KnapsackError::MalformedInput {
        line: line_no + 1,
        reason,
    }
}

fn parse_pair(line_no: usize, line: &str) -> KnapsackResult<(i64, i64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(malformed(
            line_no,
            format!("expected 2 fields, found {}", tokens.len()),
        ));
    }
    let parse = |token: &str| {
        token
            .parse::<i64>()
            .map_err(|_| malformed(line_no, format!("'{}' is not an integer", token)))
    };
    Ok((parse(tokens[0])?, parse(tokens[1])?))
}

fn parse_flag(line_no: usize, token: &str) -> KnapsackResult<bool> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(malformed(
            line_no,
            format!("'{}' is not a 0/1 flag", token),
        )),
    }
}

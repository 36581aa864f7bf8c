use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TrioError;

/// Kind of tile occupying a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl CellType {
    pub const ALL: [CellType; 5] = [
        CellType::Red,
        CellType::Green,
        CellType::Blue,
        CellType::Yellow,
        CellType::Purple,
    ];
}

/// Per-game cost of every cell type.
///
/// The cost is both the score a removed cell is worth and the weight of that
/// type when new cells are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CellCosts(BTreeMap<CellType, u32>);

impl CellCosts {
    /// Build a cost table, rejecting an empty table or a zero cost
    pub fn new(costs: impl IntoIterator<Item = (CellType, u32)>) -> Result<Self, TrioError> {
        let costs: BTreeMap<CellType, u32> = costs.into_iter().collect();

        if costs.is_empty() {
            return Err(TrioError::Validation(
                "at least one cell type is required".to_string(),
            ));
        }
        if let Some((cell, _)) = costs.iter().find(|(_, cost)| **cost == 0) {
            return Err(TrioError::Validation(format!(
                "cell type {:?} must have a positive cost",
                cell
            )));
        }

        Ok(Self(costs))
    }

    /// Cost of a cell type, zero for types absent from the table
    pub fn cost(&self, cell: CellType) -> u32 {
        self.0.get(&cell).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellType, u32)> + '_ {
        self.0.iter().map(|(cell, cost)| (*cell, *cost))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

use std::ops::RangeInclusive;

use rand::Rng;

use crate::{
    error::TrioError,
    models::{CellCosts, CellType},
};

/// Default lowest cost a cell type can be given
pub const DEFAULT_MIN_CELL_COST: u32 = 5;
/// Default highest cost a cell type can be given
pub const DEFAULT_MAX_CELL_COST: u32 = 15;

/// Draw a fresh cost for every cell type, uniformly from `range`
pub fn generate_costs(
    rng: &mut impl Rng,
    range: RangeInclusive<u32>,
) -> Result<CellCosts, TrioError> {
    if range.is_empty() || *range.start() == 0 {
        return Err(TrioError::Validation(format!(
            "cell cost range {}..={} must be non-empty and positive",
            range.start(),
            range.end()
        )));
    }

    CellCosts::new(
        CellType::ALL
            .iter()
            .map(|cell| (*cell, rng.random_range(range.clone()))),
    )
}

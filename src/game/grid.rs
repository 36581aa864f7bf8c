use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

use crate::{
    error::TrioError,
    models::{Board, CellCosts, CellType, MAX_BOARD_SIZE, MIN_BOARD_SIZE},
};

/// Supplier of new cells, used when a board is generated and when a cascade
/// refills emptied positions
pub trait CellSource {
    fn draw(&mut self) -> CellType;
}

/// Draws cell types with probability proportional to their cost
pub struct WeightedCellSource<'a, R> {
    cells: Vec<CellType>,
    weights: Vec<u32>,
    index: WeightedIndex<u32>,
    rng: &'a mut R,
}

impl<'a, R: Rng> WeightedCellSource<'a, R> {
    pub fn new(costs: &CellCosts, rng: &'a mut R) -> Result<Self, TrioError> {
        let (cells, weights): (Vec<CellType>, Vec<u32>) = costs.iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| TrioError::Validation(format!("invalid cell weights: {}", e)))?;

        Ok(Self {
            cells,
            weights,
            index,
            rng,
        })
    }

    /// Draw from the distribution with some types left out.
    ///
    /// Falls back to an unrestricted draw when every type is excluded.
    pub fn draw_excluding(&mut self, excluded: &[CellType]) -> CellType {
        let (cells, weights): (Vec<CellType>, Vec<u32>) = self
            .cells
            .iter()
            .zip(&self.weights)
            .filter(|(cell, _)| !excluded.contains(cell))
            .map(|(cell, weight)| (*cell, *weight))
            .unzip();

        match WeightedIndex::new(&weights) {
            Ok(index) => cells[index.sample(&mut *self.rng)],
            Err(_) => self.draw(),
        }
    }
}

impl<R: Rng> CellSource for WeightedCellSource<'_, R> {
    fn draw(&mut self) -> CellType {
        self.cells[self.index.sample(&mut *self.rng)]
    }
}

pub struct BoardGenerator;

impl BoardGenerator {
    /// Generate a board with every cell drawn independently.
    /// Ready-made runs are possible.
    pub fn generate(
        width: usize,
        height: usize,
        source: &mut impl CellSource,
    ) -> Result<Board, TrioError> {
        Self::check_dimensions(width, height)?;

        let cells = (0..height)
            .map(|_| (0..width).map(|_| source.draw()).collect())
            .collect();

        Board::from_rows(cells)
    }

    /// Generate a board that contains no run of three.
    ///
    /// Cells are placed row by row; a type that would complete a run with the
    /// two cells to the left or the two cells above is not drawn there.
    pub fn generate_stable<R: Rng>(
        width: usize,
        height: usize,
        source: &mut WeightedCellSource<'_, R>,
    ) -> Result<Board, TrioError> {
        Self::check_dimensions(width, height)?;

        let mut cells: Vec<Vec<CellType>> = Vec::with_capacity(height);
        for y in 0..height {
            let mut row: Vec<CellType> = Vec::with_capacity(width);
            for x in 0..width {
                let mut excluded = Vec::with_capacity(2);
                if x >= 2 && row[x - 1] == row[x - 2] {
                    excluded.push(row[x - 1]);
                }
                if y >= 2 && cells[y - 1][x] == cells[y - 2][x] {
                    excluded.push(cells[y - 1][x]);
                }
                row.push(source.draw_excluding(&excluded));
            }
            cells.push(row);
        }

        Board::from_rows(cells)
    }

    fn check_dimensions(width: usize, height: usize) -> Result<(), TrioError> {
        if width < MIN_BOARD_SIZE || height < MIN_BOARD_SIZE {
            return Err(TrioError::Validation(format!(
                "board dimensions must be at least {}",
                MIN_BOARD_SIZE
            )));
        }
        if width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
            return Err(TrioError::Validation(format!(
                "board is too large, at most {}x{} cells are allowed",
                MAX_BOARD_SIZE, MAX_BOARD_SIZE
            )));
        }
        Ok(())
    }
}

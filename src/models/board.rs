use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::TrioError, models::CellType};

/// Smallest allowed board side
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest allowed board side
pub const MAX_BOARD_SIZE: usize = 20;

/// Cell address on a board. `y = 0` is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells
    pub fn distance(&self, other: &Coordinates) -> u64 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dy = (self.y as i64 - other.y as i64).unsigned_abs();
        dx + dy
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular grid of cells, stored row by row (`cells[y][x]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    cells: Vec<Vec<CellType>>,
}

impl Board {
    /// Wrap a row-major grid, checking that it is non-empty and rectangular
    pub fn from_rows(cells: Vec<Vec<CellType>>) -> Result<Self, TrioError> {
        let width = cells.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(TrioError::Validation("board must not be empty".to_string()));
        }
        if cells.iter().any(|row| row.len() != width) {
            return Err(TrioError::Validation(
                "all board rows must have the same length".to_string(),
            ));
        }
        Ok(Self { cells })
    }

    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> &[Vec<CellType>] {
        &self.cells
    }

    /// Whether the coordinates address a cell on this board
    pub fn contains(&self, at: Coordinates) -> bool {
        self.index(at).is_some()
    }

    pub fn get(&self, at: Coordinates) -> Option<CellType> {
        self.index(at).map(|(x, y)| self.cells[y][x])
    }

    pub(crate) fn cell(&self, x: usize, y: usize) -> CellType {
        self.cells[y][x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: CellType) {
        self.cells[y][x] = cell;
    }

    fn index(&self, at: Coordinates) -> Option<(usize, usize)> {
        let x = usize::try_from(at.x).ok()?;
        let y = usize::try_from(at.y).ok()?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Build a board from rows of single-letter cell codes (R, G, B, Y, P)
    #[cfg(test)]
    pub fn parse(rows: &[&str]) -> Board {
        let cells = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'R' => CellType::Red,
                        'G' => CellType::Green,
                        'B' => CellType::Blue,
                        'Y' => CellType::Yellow,
                        'P' => CellType::Purple,
                        other => panic!("unknown cell code {other}"),
                    })
                    .collect()
            })
            .collect();
        Board::from_rows(cells).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_dimensions() {
        let board = Board::parse(&["RGBY", "GBYR", "BYRG"]);
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
    }

    #[test]
    fn test_board_get_uses_x_as_column() {
        let board = Board::parse(&["RGB", "YPR", "GBY"]);
        assert_eq!(board.get(Coordinates::new(1, 0)), Some(CellType::Green));
        assert_eq!(board.get(Coordinates::new(0, 1)), Some(CellType::Yellow));
        assert_eq!(board.get(Coordinates::new(2, 2)), Some(CellType::Yellow));
    }

    #[test]
    fn test_board_contains_rejects_out_of_bounds() {
        let board = Board::parse(&["RGB", "YPR", "GBY"]);
        assert!(board.contains(Coordinates::new(0, 0)));
        assert!(!board.contains(Coordinates::new(3, 0)));
        assert!(!board.contains(Coordinates::new(0, 3)));
        assert!(!board.contains(Coordinates::new(-1, 1)));
        assert_eq!(board.get(Coordinates::new(1, -1)), None);
    }

    #[test]
    fn test_board_rejects_ragged_rows() {
        let result = Board::from_rows(vec![
            vec![CellType::Red, CellType::Green],
            vec![CellType::Blue],
        ]);
        assert!(matches!(result, Err(TrioError::Validation(_))));
        assert!(matches!(
            Board::from_rows(Vec::new()),
            Err(TrioError::Validation(_))
        ));
    }

    #[test]
    fn test_coordinates_distance() {
        let origin = Coordinates::new(0, 0);
        assert_eq!(origin.distance(&Coordinates::new(1, 0)), 1);
        assert_eq!(origin.distance(&Coordinates::new(0, 1)), 1);
        assert_eq!(origin.distance(&Coordinates::new(1, 1)), 2);
        assert_eq!(origin.distance(&origin), 0);
        assert_eq!(
            Coordinates::new(i32::MIN, 0).distance(&Coordinates::new(i32::MAX, 0)),
            u32::MAX as u64
        );
    }

    #[test]
    fn test_board_serializes_cells() {
        let board = Board::parse(&["RGB", "YPR", "GBY"]);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["cells"][0][0], "red");
        assert_eq!(json["cells"][1][1], "purple");
    }
}

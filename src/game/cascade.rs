use crate::{
    error::TrioError,
    game::{grid::CellSource, validator::MoveValidator},
    models::{Board, CascadeResult, CellCosts, CellType, Coordinates},
};

/// Shortest line of equal cells that is removed
pub const MIN_RUN_LENGTH: usize = 3;

/// Refill rounds after which a cascade is abandoned
pub const MAX_CASCADE_ITERATIONS: usize = 1_000;

pub struct CascadeEngine;

impl CascadeEngine {
    /// Swap two adjacent cells and resolve every resulting match.
    ///
    /// Each iteration removes all runs on the board, scores the removed
    /// cells, lets the remaining cells fall and refills the gaps from
    /// `cells`. Iterations continue until the board holds no run, or fail
    /// with an internal error after [`MAX_CASCADE_ITERATIONS`]. The input
    /// board is never modified; a swap that matches nothing yields an empty
    /// result.
    pub fn apply_swap(
        board: &Board,
        source: Coordinates,
        dest: Coordinates,
        costs: &CellCosts,
        cells: &mut impl CellSource,
    ) -> Result<CascadeResult, TrioError> {
        let ((sx, sy), (dx, dy)) = MoveValidator::validate(board, source, dest)?;

        let mut working = board.clone();
        let moved = working.cell(sx, sy);
        working.set(sx, sy, working.cell(dx, dy));
        working.set(dx, dy, moved);

        let mut result = CascadeResult::empty();
        loop {
            let marked = find_runs(&working);
            let removed = marked.iter().flatten().filter(|m| **m).count();
            if removed == 0 {
                break;
            }
            if result.states.len() == MAX_CASCADE_ITERATIONS {
                tracing::error!(
                    "Cascade still matching after {} iterations, giving up",
                    MAX_CASCADE_ITERATIONS
                );
                return Err(TrioError::Internal(format!(
                    "cascade did not settle within {} iterations",
                    MAX_CASCADE_ITERATIONS
                )));
            }

            let score = Self::score_marked(&working, &marked, costs);
            working = Self::collapse(&working, &marked, cells);
            result.score += score;
            result.states.push(working.clone());

            tracing::debug!(
                "Cascade iteration {} removed {} cells for {} points",
                result.states.len(),
                removed,
                score
            );
        }

        Ok(result)
    }

    /// Sum of costs of every marked cell. A cell shared by a horizontal and
    /// a vertical run counts once.
    fn score_marked(board: &Board, marked: &[Vec<bool>], costs: &CellCosts) -> u32 {
        marked
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, m)| **m)
                    .map(move |(x, _)| (x, y))
            })
            .map(|(x, y)| costs.cost(board.cell(x, y)))
            .sum()
    }

    /// Drop marked cells, let each column fall toward the bottom row and draw
    /// new cells for the emptied top positions. Columns are refilled left to
    /// right, each from the top down.
    fn collapse(board: &Board, marked: &[Vec<bool>], cells: &mut impl CellSource) -> Board {
        let (width, height) = (board.width(), board.height());
        let mut next = board.clone();

        for x in 0..width {
            let survivors: Vec<CellType> = (0..height)
                .filter(|y| !marked[*y][x])
                .map(|y| board.cell(x, y))
                .collect();
            let gap = height - survivors.len();

            for y in 0..gap {
                next.set(x, y, cells.draw());
            }
            for (offset, cell) in survivors.into_iter().enumerate() {
                next.set(x, gap + offset, cell);
            }
        }

        next
    }
}

/// Mark every cell that belongs to a horizontal or vertical run of at least
/// [`MIN_RUN_LENGTH`] equal cells. Indexed `[y][x]`.
pub fn find_runs(board: &Board) -> Vec<Vec<bool>> {
    let (width, height) = (board.width(), board.height());
    let mut marked = vec![vec![false; width]; height];

    for y in 0..height {
        let mut start = 0;
        while start < width {
            let cell = board.cell(start, y);
            let mut end = start + 1;
            while end < width && board.cell(end, y) == cell {
                end += 1;
            }
            if end - start >= MIN_RUN_LENGTH {
                for x in start..end {
                    marked[y][x] = true;
                }
            }
            start = end;
        }
    }

    for x in 0..width {
        let mut start = 0;
        while start < height {
            let cell = board.cell(x, start);
            let mut end = start + 1;
            while end < height && board.cell(x, end) == cell {
                end += 1;
            }
            if end - start >= MIN_RUN_LENGTH {
                for row in marked.iter_mut().take(end).skip(start) {
                    row[x] = true;
                }
            }
            start = end;
        }
    }

    marked
}

use crate::{
    error::TrioError,
    models::{Board, Coordinates},
};

pub struct MoveValidator;

impl MoveValidator {
    /// Check that a swap is legal on the board: both cells exist, differ, and
    /// share an edge. Returns the two positions as `(x, y)` indices.
    pub fn validate(
        board: &Board,
        source: Coordinates,
        dest: Coordinates,
    ) -> Result<((usize, usize), (usize, usize)), TrioError> {
        for at in [source, dest] {
            if !board.contains(at) {
                return Err(TrioError::InvalidMove(format!(
                    "cell {} is outside the {}x{} board",
                    at,
                    board.width(),
                    board.height()
                )));
            }
        }

        if source == dest {
            return Err(TrioError::InvalidMove(format!(
                "cannot swap cell {} with itself",
                source
            )));
        }

        if !Self::are_adjacent(&source, &dest) {
            return Err(TrioError::InvalidMove(format!(
                "cells {} and {} are not adjacent",
                source, dest
            )));
        }

        // Both coordinates are in bounds, so they are non-negative
        Ok((
            (source.x as usize, source.y as usize),
            (dest.x as usize, dest.y as usize),
        ))
    }

    /// Check if two positions share an edge (no diagonals)
    fn are_adjacent(a: &Coordinates, b: &Coordinates) -> bool {
        a.distance(b) == 1
    }
}

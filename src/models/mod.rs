pub mod board;
pub mod cell;
pub mod game;
pub mod response;

pub use board::{Board, Coordinates, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use cell::{CellCosts, CellType};
pub use game::{CascadeResult, Game, GameStatus, Gamer, SEATS};
pub use response::Response;

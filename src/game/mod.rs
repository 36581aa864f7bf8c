// Game engine modules

pub mod cascade;
pub mod grid;
pub mod turn;
pub mod validator;

pub use cascade::CascadeEngine;
pub use grid::{BoardGenerator, WeightedCellSource};
pub use turn::TurnMachine;

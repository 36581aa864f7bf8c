pub mod cells;
pub mod ids;

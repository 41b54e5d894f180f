//! Tile-sliding puzzle: pure board logic plus a line-oriented shell

pub mod board;
pub mod session;

pub use board::{merge_line, Board, Direction, Grid};
pub use session::{run_text_game, Command, GameSession};

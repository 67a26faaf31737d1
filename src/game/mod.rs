//! Core Connect Four game logic: the board with gravity, marks, the game state
//! machine, and the two-player match loop.

mod board;
mod mark;
mod session;
mod state;

pub use board::{Board, Cell, COLS, CONNECT, ROWS};
pub use mark::Mark;
pub use session::{Game, Turn};
pub use state::{GameState, GameStatus};

//! Game driving: piece supply, hold slot and strategy callbacks.
//!
//! - [`GameDriver`] - runs one game, asking a [`Strategy`] for each move
//! - [`Driver`] - the capabilities fitness evaluation needs from a game
//! - [`PieceBuffer`] - 7-bag piece generation with a hold slot
//! - [`PieceSeed`] - seed for deterministic piece generation
//! - [`GameStats`] - pieces placed and lines cleared
//!
//! # Game Flow
//!
//! 1. The driver presents the field, the falling piece and the held piece to the strategy
//! 2. The strategy answers with an [`Action`] (column, rotation, whether to use the held piece)
//! 3. The driver swaps in the held piece if asked, drops the piece and clears lines
//! 4. The next piece is drawn; the game ends when the strategy finds no legal move

pub use self::{driver::*, game_stats::*, piece_buffer::*};

mod driver;
mod game_stats;
mod piece_buffer;

//! Tetris field simulation for heuristic move search.
//!
//! - [`core`] - cell tags, piece shapes and the [`Field`] grid engine
//! - [`engine`] - the [`GameDriver`] that feeds pieces to a [`Strategy`] and applies its actions
//!
//! # Example
//!
//! ```
//! use genetris_engine::{Field, Piece, PieceKind};
//!
//! let mut field = Field::new();
//! let landing = field.drop(&Piece::new(PieceKind::I), 3);
//!
//! assert_eq!(landing.row, Field::DEFAULT_HEIGHT - 1);
//! assert_eq!(field.heights()[3], 0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Failure to put a piece on the field.
///
/// This is a recoverable condition: searches treat it as "skip this candidate".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum PlacementError {
    #[display("piece bounding box lies outside the field")]
    OutOfBounds,
    #[display("piece does not fit anywhere in the column")]
    Blocked,
}

//! Move selection and fitness evaluation for heuristic Tetris play.
//!
//! The crate is layered the same way a move is decided:
//!
//! ```text
//! Fitness (median lines cleared over several games)
//!     ↓ drives games with
//! Placement search (best orientation/column for the current pieces)
//!     ↓ scores candidate fields with
//! Heuristic evaluator (weighted sum of field features)
//! ```
//!
//! - [`features`] - gap count and column height statistics of a field
//! - [`heuristic`] - [`FeatureWeights`](heuristic::FeatureWeights) and the linear evaluator
//! - [`placement_search`] - exhaustive one-piece lookahead, usable as a game [`Strategy`](genetris_engine::Strategy)
//! - [`fitness`] - repeated simulation reduced to one fitness value
//!
//! # Example
//!
//! ```
//! use genetris_engine::{Driver, GameDriver, PieceSeed};
//! use genetris_evaluator::{
//!     heuristic::{FeatureWeights, HeuristicEvaluator},
//!     placement_search::PlacementSearch,
//! };
//!
//! let weights = FeatureWeights::new([0.9, 0.4, 0.3, 0.1, 0.2]);
//! let search = PlacementSearch::new(HeuristicEvaluator::new(weights));
//!
//! let mut game = GameDriver::with_seed(PieceSeed::from_bytes([1; 16]));
//! for _ in 0..20 {
//!     if !game.play(&search) {
//!         break;
//!     }
//! }
//! assert!(game.pieces_placed() > 0);
//! ```

pub mod features;
pub mod fitness;
pub mod heuristic;
pub mod placement_search;

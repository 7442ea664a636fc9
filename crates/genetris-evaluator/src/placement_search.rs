//! Exhaustive one-piece lookahead over orientations and columns.
//!
//! # Enumeration order
//!
//! Candidates are visited orientation-major, columns ascending:
//!
//! 1. the falling piece as [`Rotation::Identity`], `Right`, `Flip`, `Left`;
//! 2. then, if a piece is held and its kind differs from the falling piece,
//!    the held piece in the same four orientations.
//!
//! Each candidate is dropped on its own clone of the field and the resulting
//! state is scored. A candidate replaces the current best only with a
//! strictly lower score, so among equal scores the first one visited wins.
//! NaN scores never replace a real score.

use arrayvec::ArrayVec;
use genetris_engine::{Action, Field, Piece, Rotation, Strategy};

use crate::heuristic::FieldEvaluator;

/// Orientation of one candidate shape, before choosing a column.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    piece: Piece,
    use_held: bool,
    rotation: Rotation,
}

/// Picks the placement whose resulting field scores lowest.
#[derive(Debug, Clone)]
pub struct PlacementSearch<E> {
    evaluator: E,
}

impl<E> PlacementSearch<E>
where
    E: FieldEvaluator,
{
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Returns the best action together with the score of the field it leads
    /// to, or `None` if no candidate can be dropped anywhere.
    #[must_use]
    pub fn best_placement(
        &self,
        field: &Field,
        falling: &Piece,
        held: Option<&Piece>,
    ) -> Option<(Action, f32)> {
        let mut best: Option<(Action, f32)> = None;
        for candidate in candidates(falling, held) {
            for column in 0..field.width() {
                let mut trial = field.clone();
                if trial.try_drop(&candidate.piece, column).is_err() {
                    continue;
                }
                let score = self.evaluator.evaluate_field(&trial);
                if best.is_none_or(|(_, best_score)| is_better(score, best_score)) {
                    let action = Action {
                        column,
                        use_held: candidate.use_held,
                        rotation: candidate.rotation,
                    };
                    best = Some((action, score));
                }
            }
        }
        best
    }
}

impl<E> Strategy for PlacementSearch<E>
where
    E: FieldEvaluator,
{
    fn choose_action(
        &self,
        field: &Field,
        active: &Piece,
        held: Option<&Piece>,
    ) -> Option<Action> {
        self.best_placement(field, active, held)
            .map(|(action, _)| action)
    }
}

fn is_better(score: f32, best: f32) -> bool {
    score < best || (best.is_nan() && !score.is_nan())
}

fn candidates(falling: &Piece, held: Option<&Piece>) -> ArrayVec<Candidate, 8> {
    let mut result = ArrayVec::new();
    let mut push_orientations = |piece: &Piece, use_held| {
        for rotation in Rotation::ALL {
            result.push(Candidate {
                piece: rotation.apply(piece),
                use_held,
                rotation,
            });
        }
    };

    push_orientations(falling, false);
    if let Some(held) = held.filter(|held| held.kind() != falling.kind()) {
        push_orientations(held, true);
    }
    result
}

//! Weighted scoring of field states.
//!
//! A field's score is the dot product of its [`FieldFeatures`] with a
//! [`FeatureWeights`] vector:
//!
//! ```text
//! score = w₁·gap_count + w₂·mean_height + w₃·height_std_dev + w₄·height_range + w₅·max_height_step
//! ```
//!
//! Lower scores are better.

use std::{fmt, iter};

use genetris_engine::Field;
use serde::{Deserialize, Serialize};

use crate::features::{FEATURE_COUNT, FieldFeatures};

/// One weight per feature, in [`FieldFeatures::to_array`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureWeights([f32; FEATURE_COUNT]);

impl FeatureWeights {
    #[must_use]
    pub const fn new(weights: [f32; FEATURE_COUNT]) -> Self {
        Self(weights)
    }

    #[must_use]
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.0
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureWeights {
    fn from(weights: [f32; FEATURE_COUNT]) -> Self {
        Self(weights)
    }
}

/// Scores field states. Lower is better.
pub trait FieldEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_field(&self, field: &Field) -> f32;
}

/// Linear evaluator over [`FieldFeatures`].
///
/// ```
/// use genetris_engine::Field;
/// use genetris_evaluator::heuristic::{FieldEvaluator, HeuristicEvaluator};
///
/// let field = Field::with_bottom_rows(4, 6, "T...\nT...\n.I..").unwrap();
/// let gaps_only = HeuristicEvaluator::new([1.0, 0.0, 0.0, 0.0, 0.0].into());
/// assert_eq!(gaps_only.evaluate_field(&field), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    weights: FeatureWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    #[must_use]
    pub fn score_features(&self, features: &FieldFeatures) -> f32 {
        iter::zip(features.to_array(), self.weights.0)
            .map(|(f, w)| f * w)
            .sum()
    }
}

impl FieldEvaluator for HeuristicEvaluator {
    #[inline]
    fn evaluate_field(&self, field: &Field) -> f32 {
        self.score_features(&FieldFeatures::from_field(field))
    }
}

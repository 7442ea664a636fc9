//! Scalar features extracted from a field.
//!
//! The order of [`FieldFeatures::to_array`] is shared with
//! [`FeatureWeights`](crate::heuristic::FeatureWeights) and with the gene
//! vector evolved by training. [`FEATURE_NAMES`] lists it.

use genetris_engine::Field;
use genetris_stats::descriptive::DescriptiveStats;

pub const FEATURE_COUNT: usize = 5;

/// Names of the features, in [`FieldFeatures::to_array`] order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gap_count",
    "mean_height",
    "height_std_dev",
    "height_range",
    "max_height_step",
];

/// Features of a field state. Larger values describe a worse field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldFeatures {
    /// Empty cells below the top of their column.
    pub gap_count: f32,
    /// Mean of the column heights.
    pub mean_height: f32,
    /// Population standard deviation of the column heights.
    pub height_std_dev: f32,
    /// Highest minus lowest column height.
    pub height_range: f32,
    /// Largest height difference between neighbouring columns.
    ///
    /// Zero for a single-column field.
    pub max_height_step: f32,
}

impl FieldFeatures {
    /// Measures `field`.
    ///
    /// ```
    /// use genetris_engine::Field;
    /// use genetris_evaluator::features::FieldFeatures;
    ///
    /// let field = Field::with_bottom_rows(4, 6, "
    ///     T...
    ///     T...
    ///     .I..
    /// ").unwrap();
    /// let features = FieldFeatures::from_field(&field);
    ///
    /// assert_eq!(features.gap_count, 1.0);
    /// assert_eq!(features.height_range, 2.0);
    /// assert_eq!(features.max_height_step, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_field(field: &Field) -> Self {
        let heights = field.heights();
        let stats = DescriptiveStats::new(heights.iter().map(|&h| h as f32))
            .expect("fields have at least one column");
        let max_height_step = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .max()
            .unwrap_or(0);
        Self {
            gap_count: field.count_gaps() as f32,
            mean_height: stats.mean,
            height_std_dev: stats.std_dev,
            height_range: stats.max - stats.min,
            max_height_step: max_height_step as f32,
        }
    }

    #[must_use]
    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        [
            self.gap_count,
            self.mean_height,
            self.height_std_dev,
            self.height_range,
            self.max_height_step,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_has_zero_features() {
        let features = FieldFeatures::from_field(&Field::new());
        assert_eq!(features.to_array(), [0.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_height_statistics() {
        // heights: [2, 0, 0, 2]
        let field = Field::with_bottom_rows(
            4,
            5,
            "
            O..O
            O..O
            O..O
            ",
        )
        .unwrap();
        let features = FieldFeatures::from_field(&field);
        assert_eq!(features.gap_count, 0.0);
        assert_eq!(features.mean_height, 1.0);
        assert_eq!(features.height_std_dev, 1.0);
        assert_eq!(features.height_range, 2.0);
        assert_eq!(features.max_height_step, 2.0);
    }

    #[test]
    fn test_single_column_has_no_step() {
        let field = Field::with_bottom_rows(1, 4, "I\nI").unwrap();
        let features = FieldFeatures::from_field(&field);
        assert_eq!(features.mean_height, 1.0);
        assert_eq!(features.max_height_step, 0.0);
        assert_eq!(features.height_range, 0.0);
    }

    #[test]
    fn test_array_order_matches_names() {
        let features = FieldFeatures {
            gap_count: 1.0,
            mean_height: 2.0,
            height_std_dev: 3.0,
            height_range: 4.0,
            max_height_step: 5.0,
        };
        assert_eq!(features.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(FEATURE_NAMES[0], "gap_count");
        assert_eq!(FEATURE_NAMES[4], "max_height_step");
    }
}

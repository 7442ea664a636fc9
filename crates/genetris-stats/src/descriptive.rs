/// Descriptive statistics summarizing a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The minimum value in the dataset.
    pub min: f32,
    /// The maximum value in the dataset.
    pub max: f32,
    /// The arithmetic mean of the dataset.
    pub mean: f32,
    /// The median. For an even count this is the mean of the two middle values.
    pub median: f32,
    /// The population variance.
    pub variance: f32,
    /// The population standard deviation.
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// ```
    /// # use genetris_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f32::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f32]) -> Option<Self> {
        assert_sorted(sorted_values);

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f32;
        let mean = sorted_values.iter().copied().sum::<f32>() / n;
        let median = median_of_sorted(sorted_values)?;
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f32>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Median of unsorted values, or `None` if there are none.
#[must_use]
pub fn median<I>(values: I) -> Option<f32>
where
    I: IntoIterator<Item = f32>,
{
    let mut values = values.into_iter().collect::<Vec<_>>();
    values.sort_by(f32::total_cmp);
    median_of_sorted(&values)
}

/// Median of values sorted in ascending order.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted.
#[must_use]
pub fn median_of_sorted(sorted_values: &[f32]) -> Option<f32> {
    assert_sorted(sorted_values);
    let mid = sorted_values.len() / 2;
    match sorted_values.len() {
        0 => None,
        n if n % 2 == 1 => Some(sorted_values[mid]),
        _ => Some(f32::midpoint(sorted_values[mid - 1], sorted_values[mid])),
    }
}

fn assert_sorted(values: &[f32]) {
    assert!(
        values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
        "values must be sorted in ascending order"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert_eq!(DescriptiveStats::new([]), None);
        assert_eq!(median([]), None);
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new([7.0]).unwrap();
        assert_eq!(stats.min, 7.0);
        assert_eq!(stats.max, 7.0);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.variance, 4.0);
        assert_eq!(stats.std_dev, 2.0);
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median([10.0, 0.0, 4.0, 6.0]), Some(5.0));
        assert_eq!(median([1.0, 2.0]), Some(1.5));
    }

    #[test]
    fn test_median_odd_count() {
        assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[2.0, 1.0]);
    }
}

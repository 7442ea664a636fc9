//! Summary statistics for fitness and weight reporting.
//!
//! # Example
//!
//! ```
//! use genetris_stats::descriptive::{DescriptiveStats, median};
//!
//! let values = [4.0, 1.0, 3.0, 2.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 2.5);
//! assert_eq!(stats.median, 2.5);
//! assert_eq!(median(values), Some(2.5));
//! ```

pub mod descriptive;

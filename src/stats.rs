//! Descriptive statistics over a [`Dataset`].
//!
//! Every function is total: an empty dataset yields zero rather than an error.

use crate::dataset::Dataset;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the median of a slice of values. Returns 0.0 for empty input.
///
/// For an even count this is the mean of the two middle values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// `part` as a percentage of `total`, or 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

fn as_f64<V: Copy + Into<f64>>(dataset: &Dataset<V>) -> Vec<f64> {
    dataset.values().map(Into::into).collect()
}

pub fn total<V: Copy + Into<f64>>(dataset: &Dataset<V>) -> f64 {
    dataset.values().map(Into::into).sum()
}

pub fn calculate_average<V: Copy + Into<f64>>(dataset: &Dataset<V>) -> f64 {
    mean(&as_f64(dataset))
}

pub fn calculate_median<V: Copy + Into<f64>>(dataset: &Dataset<V>) -> f64 {
    median(&as_f64(dataset))
}

/// Largest value, or `V::default()` (zero for numbers) when empty.
pub fn find_max_score<V: Copy + Ord + Default>(dataset: &Dataset<V>) -> V {
    dataset.values().max().unwrap_or_default()
}

/// Smallest value, or `V::default()` (zero for numbers) when empty.
pub fn find_min_score<V: Copy + Ord + Default>(dataset: &Dataset<V>) -> V {
    dataset.values().min().unwrap_or_default()
}

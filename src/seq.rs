//! Small sequence helpers shared by the marginal builder and the
//! extreme-measure construction.

use core::ops::{Add, Sub};

/// Running sums of `values`.
///
/// # Examples
///
/// ```
/// use frechet_bounds::seq::cumsum;
///
/// assert_eq!(cumsum(&[1, 2, 3, 4, 5, 6]), vec![1, 3, 6, 10, 15, 21]);
/// ```
#[must_use]
pub fn cumsum<T>(values: &[T]) -> Vec<T>
where
    T: Copy + Add<Output = T>,
{
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter().copied();
    if let Some(first) = iter.next() {
        let mut acc = first;
        out.push(acc);
        for v in iter {
            acc = acc + v;
            out.push(acc);
        }
    }
    out
}

/// Differences between consecutive values; the first output equals the
/// first input (difference from an implicit zero).
#[must_use]
pub fn adjacent_difference<T>(values: &[T]) -> Vec<T>
where
    T: Copy + Sub<Output = T>,
{
    let mut out = Vec::with_capacity(values.len());
    if let Some(&first) = values.first() {
        out.push(first);
        out.extend(values.windows(2).map(|w| w[1] - w[0]));
    }
    out
}

/// Concatenates nested sequences in order.
#[must_use]
pub fn flatten<T: Clone>(nested: &[Vec<T>]) -> Vec<T> {
    nested.iter().flat_map(|v| v.iter().cloned()).collect()
}

/// Returns `weights` with the last entry replaced by `1 - sum(rest)`, so the
/// result sums to exactly one. The truncated tail mass lands on the last point.
#[must_use]
pub fn with_unit_sum(weights: &[f64]) -> Vec<f64> {
    let mut out = weights.to_vec();
    if let Some((last, rest)) = out.split_last_mut() {
        *last = 1.0 - rest.iter().sum::<f64>();
    }
    out
}

/// Sorted, deduplicated union of `cdfs` restricted to `(0, 1 - epsilon)`,
/// with a single exact `1.0` appended as the right endpoint.
///
/// Values at or above `1 - epsilon`, including CDF overshoot past one, are
/// absorbed into that endpoint, so the output is always strictly ascending.
pub(crate) fn merge_breakpoints(cdfs: &[Vec<f64>], epsilon: f64) -> Vec<f64> {
    let mut merged = flatten(cdfs);
    merged.sort_by(f64::total_cmp);
    merged.dedup();
    merged.retain(|&v| v > 0.0 && v < 1.0 - epsilon);
    merged.push(1.0);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumsum() {
        assert_eq!(cumsum(&[1, 2, 3, 4, 5, 6]), vec![1, 3, 6, 10, 15, 21]);
        assert!(cumsum::<f64>(&[]).is_empty());
    }

    #[test]
    fn test_adjacent_difference() {
        assert_eq!(adjacent_difference(&[1, 2, 3, 4, 5, 6]), vec![1, 1, 1, 1, 1, 1]);
        assert_eq!(adjacent_difference(&[0.25, 0.5, 1.0]), vec![0.25, 0.25, 0.5]);
    }

    #[test]
    fn test_flatten() {
        let nested = vec![vec![1, 2, 3, 4, 5, 6], vec![1, 2, 3, 4]];
        assert_eq!(flatten(&nested), vec![1, 2, 3, 4, 5, 6, 1, 2, 3, 4]);
    }

    #[test]
    fn test_with_unit_sum() {
        let edited = with_unit_sum(&[0.25, 0.25, 0.4]);
        assert!((edited[2] - 0.5).abs() < 1e-15);
        assert!((edited.iter().sum::<f64>() - 1.0).abs() < 1e-15);
        assert!(with_unit_sum(&[]).is_empty());
    }

    #[test]
    fn test_merge_breakpoints_single_right_endpoint() {
        let a = vec![0.25, 0.5, 1.0 - 1e-12];
        let b = vec![0.5, 0.75, 1.0];
        let merged = merge_breakpoints(&[a, b], 1e-9);
        assert_eq!(merged, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_merge_breakpoints_drops_zero_mass_prefix() {
        let merged = merge_breakpoints(&[vec![0.0, 0.5, 1.0], vec![0.5, 1.0]], 1e-9);
        assert_eq!(merged, vec![0.5, 1.0]);
    }

    #[test]
    fn test_merge_breakpoints_absorbs_overshoot() {
        let merged = merge_breakpoints(&[vec![0.5, 1.0 + 5e-8], vec![0.25, 1.0]], 1e-9);
        assert_eq!(merged, vec![0.25, 0.5, 1.0]);
        assert!(adjacent_difference(&merged).iter().all(|&w| w > 0.0));
    }

    #[test]
    fn test_merge_breakpoints_appends_one_when_missing() {
        let merged = merge_breakpoints(&[vec![0.3, 0.6]], 1e-9);
        assert_eq!(merged, vec![0.3, 0.6, 1.0]);
    }
}

//! One-dimensional histograms with numpy edge semantics.

use serde::Serialize;

use crate::binning::BinEdges;

/// Counts of values per bin.
///
/// Bin `i` holds values in `[edges[i], edges[i + 1])`; the last bin is also
/// closed on the right. Values outside the edges and NaNs are not counted
/// and only show up in [`Histogram::overflow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges (length = n_bins + 1).
    pub edges: Vec<f64>,
    /// Entries per bin.
    pub counts: Vec<f64>,
    /// Values that fell outside the edges (NaN included).
    pub overflow: usize,
}

impl Histogram {
    /// Bin `values` into `edges`.
    pub fn fill<I>(values: I, edges: &BinEdges) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let e = edges.as_slice();
        let n_bins = edges.n_bins();
        let lo = edges.first();
        let hi = edges.last();
        let mut counts = vec![0.0; n_bins];
        let mut overflow = 0usize;

        for v in values {
            if v.is_nan() || v < lo || v > hi {
                overflow += 1;
                continue;
            }
            let idx = if v == hi {
                n_bins - 1
            } else {
                // First edge strictly greater than v, minus one.
                e.partition_point(|&edge| edge <= v) - 1
            };
            counts[idx] += 1.0;
        }

        if overflow > 0 {
            tracing::debug!(overflow, lo, hi, "values outside histogram range");
        }

        Self { edges: e.to_vec(), counts, overflow }
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Largest bin count (0 for an empty histogram).
    pub fn max_count(&self) -> f64 {
        self.counts.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Outline of a step histogram as `(x, y)` vertices, starting and ending on
    /// the baseline `y = 0`.
    pub fn step_outline(&self) -> Vec<(f64, f64)> {
        let mut pts = Vec::with_capacity(2 * self.counts.len() + 2);
        if self.counts.is_empty() {
            return pts;
        }
        pts.push((self.edges[0], 0.0));
        for (i, &c) in self.counts.iter().enumerate() {
            pts.push((self.edges[i], c));
            pts.push((self.edges[i + 1], c));
        }
        pts.push((self.edges[self.edges.len() - 1], 0.0));
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn edges(v: &[f64]) -> BinEdges {
        BinEdges::new(v.to_vec()).unwrap()
    }

    #[test]
    fn left_closed_bins() {
        let h = Histogram::fill([0.0, 0.5, 1.0, 1.5], &edges(&[0.0, 1.0, 2.0]));
        assert_eq!(h.counts, vec![2.0, 2.0]);
        assert_eq!(h.overflow, 0);
    }

    #[test]
    fn last_bin_closed_on_right() {
        let h = Histogram::fill([2.0, 1.999], &edges(&[0.0, 1.0, 2.0]));
        assert_eq!(h.counts, vec![0.0, 2.0]);
    }

    #[test]
    fn out_of_range_and_nan_are_dropped() {
        let h = Histogram::fill([-0.1, 2.1, f64::NAN, 0.3], &edges(&[0.0, 1.0, 2.0]));
        assert_eq!(h.counts, vec![1.0, 0.0]);
        assert_eq!(h.overflow, 3);
        assert_abs_diff_eq!(h.total(), 1.0);
    }

    #[test]
    fn uneven_edges() {
        let h = Histogram::fill([0.05, 0.2, 5.0, 9.0], &edges(&[0.0, 0.1, 1.0, 10.0]));
        assert_eq!(h.counts, vec![1.0, 1.0, 2.0]);
        assert_abs_diff_eq!(h.max_count(), 2.0);
    }

    #[test]
    fn step_outline_closes_on_baseline() {
        let h = Histogram::fill([0.5, 1.5, 1.6], &edges(&[0.0, 1.0, 2.0]));
        let pts = h.step_outline();
        assert_eq!(pts.first(), Some(&(0.0, 0.0)));
        assert_eq!(pts.last(), Some(&(2.0, 0.0)));
        assert_eq!(pts[2], (1.0, 1.0));
        assert_eq!(pts[3], (1.0, 2.0));
        assert_eq!(pts.len(), 6);
    }
}

//! Per-epoch training and evaluation histories.
//!
//! Training code records one entry per saved epoch for every metric it
//! tracks. Loss terms (`Dr`, `Df`, `G`, `D`, `gp`) and summary scores
//! (`mmd`, `coverage`, `fpnd`) are scalars; Wasserstein distances (`w1p`,
//! `w1m`, `w1efp`) are vectors whose first half holds the means and whose
//! second half holds the matching standard deviations.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::binning::arange;
use crate::error::{Result, VizError};

/// Particle-feature W1 distances.
pub const W1_PARTICLE: &str = "w1p";
/// Jet-mass W1 distance.
pub const W1_MASS: &str = "w1m";
/// EFP W1 distances.
pub const W1_EFP: &str = "w1efp";

/// Values of one metric over the saved epochs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricSeries {
    /// One number per epoch.
    Scalar(Vec<f64>),
    /// One row per epoch.
    Vector(Vec<Vec<f64>>),
}

impl MetricSeries {
    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        match self {
            MetricSeries::Scalar(v) => v.len(),
            MetricSeries::Vector(v) => v.len(),
        }
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Metric name → per-epoch series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricHistory {
    series: BTreeMap<String, MetricSeries>,
}

impl MetricHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of metric series.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a JSON history file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Record a scalar series, replacing any previous one.
    pub fn insert_scalar(&mut self, key: impl Into<String>, values: Vec<f64>) {
        self.series.insert(key.into(), MetricSeries::Scalar(values));
    }

    /// Record a vector series, replacing any previous one.
    pub fn insert_vector(&mut self, key: impl Into<String>, rows: Vec<Vec<f64>>) {
        self.series.insert(key.into(), MetricSeries::Vector(rows));
    }

    /// Whether `key` was recorded.
    pub fn contains(&self, key: &str) -> bool {
        self.series.contains_key(key)
    }

    /// Raw series lookup.
    pub fn get(&self, key: &str) -> Option<&MetricSeries> {
        self.series.get(key)
    }

    /// Recorded metric names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    fn require(&self, key: &str) -> Result<&MetricSeries> {
        self.series.get(key).ok_or_else(|| VizError::MissingMetric(key.to_string()))
    }

    /// Scalar series. A vector series whose rows all have one element is
    /// accepted as well.
    pub fn scalar(&self, key: &str) -> Result<Vec<f64>> {
        match self.require(key)? {
            MetricSeries::Scalar(v) => Ok(v.clone()),
            MetricSeries::Vector(rows) => rows
                .iter()
                .map(|r| match r.as_slice() {
                    [v] => Ok(*v),
                    _ => Err(VizError::InvalidMetric {
                        key: key.to_string(),
                        reason: format!("expected scalars, found rows of {}", r.len()),
                    }),
                })
                .collect(),
        }
    }

    /// Per-epoch values of column `col` of a vector series.
    pub fn column(&self, key: &str, col: usize) -> Result<Vec<f64>> {
        let rows = self.rows(key)?;
        rows.iter()
            .enumerate()
            .map(|(epoch, r)| {
                r.get(col).copied().ok_or_else(|| VizError::InvalidMetric {
                    key: key.to_string(),
                    reason: format!("epoch {epoch} has {} columns, need column {col}", r.len()),
                })
            })
            .collect()
    }

    /// Last recorded row of a vector series.
    pub fn last_row(&self, key: &str) -> Result<&[f64]> {
        self.rows(key)?.last().map(Vec::as_slice).ok_or_else(|| VizError::InvalidMetric {
            key: key.to_string(),
            reason: "no epochs recorded".into(),
        })
    }

    fn rows(&self, key: &str) -> Result<&[Vec<f64>]> {
        match self.require(key)? {
            MetricSeries::Vector(rows) => Ok(rows),
            MetricSeries::Scalar(_) => Err(VizError::InvalidMetric {
                key: key.to_string(),
                reason: "expected one row per epoch, found scalars".into(),
            }),
        }
    }

    /// Title for the last epoch's W1 of column `col`: the mean at `col`,
    /// the standard deviation at `col + len/2`.
    pub fn w1_annotation(&self, key: &str, col: usize) -> Result<String> {
        let row = self.last_row(key)?;
        let std_col = col + row.len() / 2;
        match (row.get(col), row.get(std_col)) {
            (Some(&mean), Some(&std)) => Ok(w1_title(mean, std)),
            _ => Err(VizError::InvalidMetric {
                key: key.to_string(),
                reason: format!(
                    "last row has {} values, need columns {col} and {std_col}",
                    row.len()
                ),
            }),
        }
    }

    /// Title for the last epoch's jet-mass W1 (`[mean, std]`).
    pub fn w1_mass_annotation(&self) -> Result<String> {
        let row = self.last_row(W1_MASS)?;
        match row {
            [mean, std, ..] => Ok(w1_title(*mean, *std)),
            _ => Err(VizError::InvalidMetric {
                key: W1_MASS.to_string(),
                reason: format!("last row has {} values, need mean and std", row.len()),
            }),
        }
    }
}

/// `W₁ = <mean> ± <std>` with both numbers in `%.2e` notation.
pub fn w1_title(mean: f64, std: f64) -> String {
    format!("W\u{2081} = {} \u{00B1} {}", format_sci(mean, 2), format_sci(std, 2))
}

/// Scientific notation with a signed exponent of at least two digits
/// (`1.23e-04`, `5.00e+10`).
pub fn format_sci(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let s = format!("{value:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        None => s,
    }
}

/// Epoch numbers of the last `len` saved checkpoints:
/// `0, save_epochs, 2*save_epochs, ... <= epoch`, keeping the tail.
pub fn epoch_axis(epoch: usize, save_epochs: usize, len: usize) -> Result<Vec<f64>> {
    if save_epochs == 0 {
        return Err(VizError::Shape("save_epochs must be positive".into()));
    }
    let all = arange(0.0, (epoch + 1) as f64, save_epochs as f64);
    let skip = all.len().saturating_sub(len);
    Ok(all[skip..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn history() -> MetricHistory {
        MetricHistory::from_json_str(
            r#"{
                "G": [1.0, 0.8, 0.7],
                "w1p": [[0.1, 0.2, 0.3, 0.01, 0.02, 0.03], [0.0012, 0.002, 0.003, 0.00005, 0.0002, 0.0003]],
                "w1m": [[0.5, 0.05], [0.00123, 0.000456]]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn python_style_scientific() {
        assert_eq!(format_sci(0.000123, 2), "1.23e-04");
        assert_eq!(format_sci(4e10, 2), "4.00e+10");
        assert_eq!(format_sci(0.0, 2), "0.00e+00");
        assert_eq!(format_sci(-1234.5, 1), "-1.2e+03");
        assert_eq!(format_sci(f64::NAN, 2), "nan");
        assert_eq!(format_sci(1e-123, 2), "1.00e-123");
    }

    #[test]
    fn w1_uses_second_half_for_std() {
        let h = history();
        let first = h.w1_annotation(W1_PARTICLE, 0).unwrap();
        assert_eq!(first, "W\u{2081} = 1.20e-03 \u{00B1} 5.00e-05");
        let third = h.w1_annotation(W1_PARTICLE, 2).unwrap();
        assert_eq!(third, "W\u{2081} = 3.00e-03 \u{00B1} 3.00e-04");
        assert!(h.w1_annotation(W1_PARTICLE, 3).is_err());
        assert_eq!(h.w1_mass_annotation().unwrap(), "W\u{2081} = 1.23e-03 \u{00B1} 4.56e-04");
    }

    #[test]
    fn missing_and_mistyped_metrics() {
        let h = history();
        assert!(matches!(h.scalar("Dr"), Err(VizError::MissingMetric(k)) if k == "Dr"));
        assert!(matches!(h.column("G", 0), Err(VizError::InvalidMetric { .. })));
        assert_eq!(h.scalar("G").unwrap(), vec![1.0, 0.8, 0.7]);
        assert_eq!(h.column(W1_PARTICLE, 1).unwrap(), vec![0.2, 0.002]);
    }

    #[test]
    fn single_column_rows_read_as_scalars() {
        let mut h = MetricHistory::new();
        h.insert_vector("fpnd", vec![vec![3.0], vec![2.5]]);
        assert_eq!(h.scalar("fpnd").unwrap(), vec![3.0, 2.5]);
        h.insert_vector("mmd", vec![vec![3.0, 1.0]]);
        assert!(h.scalar("mmd").is_err());
    }

    #[test]
    fn epoch_axis_keeps_tail() {
        let x = epoch_axis(20, 5, 3).unwrap();
        assert_eq!(x, vec![10.0, 15.0, 20.0]);
        let all = epoch_axis(20, 5, 100).unwrap();
        assert_eq!(all.len(), 5);
        assert_abs_diff_eq!(all[0], 0.0);
        assert!(epoch_axis(20, 0, 3).is_err());
    }

    #[test]
    fn keys_are_sorted() {
        let h = history();
        assert_eq!(h.keys().collect::<Vec<_>>(), vec!["G", "w1m", "w1p"]);
    }

    #[test]
    fn from_path_reads_json_file() {
        let path = std::env::temp_dir().join(format!("jn_viz_history_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"fpnd": [3.0, 2.0]}"#).unwrap();
        let h = MetricHistory::from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(h.scalar("fpnd").unwrap(), vec![3.0, 2.0]);
        assert!(matches!(
            MetricHistory::from_path(Path::new("/nonexistent/history.json")),
            Err(VizError::Io(_))
        ));
    }
}

//! Error types for jn-viz

use thiserror::Error;

/// jn-viz error type
#[derive(Error, Debug)]
pub enum VizError {
    /// Unrecognised jet type, coordinate system, dataset or loss name.
    #[error("unknown {what}: {value}")]
    UnknownName {
        /// Which kind of name failed to parse.
        what: &'static str,
        /// The offending input.
        value: String,
    },

    /// A figure has no binning preset for the requested combination.
    #[error("no {figure} binning for coords={coords}, dataset={dataset}, jet type={jet_type}")]
    UnsupportedBinning {
        /// Figure the preset was requested for.
        figure: &'static str,
        /// Coordinate system name.
        coords: String,
        /// Dataset name.
        dataset: String,
        /// Jet type name.
        jet_type: String,
    },

    /// Bin edges are malformed.
    #[error("invalid bin edges: {0}")]
    InvalidEdges(String),

    /// Array shapes disagree.
    #[error("shape error: {0}")]
    Shape(String),

    /// A metric series required by a figure is absent.
    #[error("missing metric '{0}'")]
    MissingMetric(String),

    /// A metric series exists but holds the wrong kind of values.
    #[error("metric '{key}': {reason}")]
    InvalidMetric {
        /// Metric name.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VizError>;

//! # jn-viz
//!
//! Plot-friendly data for comparing generated jets against real ones.
//!
//! This crate does no drawing. It holds the binning presets used by every
//! comparison figure, numpy-compatible histogramming, padded jet arrays with
//! particle masks, and the per-epoch metric histories that figures annotate
//! and plot. Rendering lives in `jn-viz-render`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Bin-edge presets per jet type / coordinates / dataset.
pub mod binning;

/// Error types.
pub mod error;

/// Histogram counting.
pub mod histogram;

/// Jet and particle arrays.
pub mod jets;

/// Training and evaluation histories.
pub mod metrics;

pub use binning::{BinEdges, Coords, Dataset, JetType};
pub use error::{Result, VizError};
pub use histogram::Histogram;
pub use jets::{FeatureMatrix, JetArray, ParticleMask, ParticleTable};
pub use metrics::{MetricHistory, MetricSeries};

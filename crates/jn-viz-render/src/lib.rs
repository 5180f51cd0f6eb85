//! # jn-viz-render
//!
//! Draws real-vs-generated jet comparison figures onto an SVG canvas and
//! writes them as SVG, PDF (`pdf` feature, on by default) or PNG (`png`
//! feature).
//!
//! Every figure function returns a [`Figure`] and writes
//! `<dir>/<name>.<ext>` when its [`SaveTarget`] carries both parts.
//! Binning presets, histogramming and metric histories come from `jn-viz`.

pub mod canvas;
pub mod color;
pub mod config;
pub mod figure;
pub mod font;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

pub use config::{VizConfig, resolve_config};
pub use figure::{Figure, OutputFormat, SaveTarget};
pub use plots::{
    FeatureOptions, ParticleSample, plot_eval, plot_jet_feats, plot_jet_mass_pt, plot_losses,
    plot_part_feats, plot_part_feats_jet_mass,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Viz(#[from] jn_viz::VizError),
    #[error("config error: {0}")]
    Config(String),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

pub mod eval;
pub mod jet_feats;
pub mod losses;
pub mod mass_pt;
pub mod part_feats;

mod axes_draw;
mod curve_panel;
mod hist_panel;

pub use eval::plot_eval;
pub use jet_feats::plot_jet_feats;
pub use losses::plot_losses;
pub use mass_pt::plot_jet_mass_pt;
pub use part_feats::{plot_part_feats, plot_part_feats_jet_mass};

use jn_viz::{Coords, Dataset, JetArray, MetricHistory, ParticleMask, ParticleTable};

use crate::Result;
use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::figure::{Figure, PT_PER_INCH, SaveTarget};
use crate::layout::multi_panel::GridLayout;

/// Options shared by the histogram figures. Fields a figure has no use for
/// are ignored (`dataset` and `const_ylim` only matter to the particle
/// figures, `losses` is not read by the mass/pT figure).
#[derive(Debug, Clone)]
pub struct FeatureOptions<'a> {
    pub coords: Coords,
    pub dataset: Dataset,
    pub num_particles: usize,
    /// Metric history whose last epoch annotates panel titles.
    pub losses: Option<&'a MetricHistory>,
    /// Pin the particle panels' y axes to the preset's constant limits.
    pub const_ylim: bool,
    pub save: SaveTarget,
}

impl Default for FeatureOptions<'_> {
    fn default() -> Self {
        Self {
            coords: Coords::default(),
            dataset: Dataset::default(),
            num_particles: 30,
            losses: None,
            const_ylim: false,
            save: SaveTarget::none(),
        }
    }
}

/// Jets plus an optional mask of real (non-padded) particles.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSample<'a> {
    pub jets: &'a JetArray,
    pub mask: Option<&'a ParticleMask>,
}

impl<'a> ParticleSample<'a> {
    /// Every particle slot counts, padding included.
    pub fn new(jets: &'a JetArray) -> Self {
        Self { jets, mask: None }
    }

    pub fn masked(jets: &'a JetArray, mask: &'a ParticleMask) -> Self {
        Self { jets, mask: Some(mask) }
    }

    fn table(&self) -> Result<ParticleTable> {
        Ok(self.jets.particles(self.mask)?)
    }
}

/// Canvas of `width_in x height_in` inches split into a grid, with
/// `pad_fonts` font sizes of padding around and between panels.
fn grid_figure(
    config: &VizConfig,
    width_in: f64,
    height_in: f64,
    rows: usize,
    cols: usize,
    pad_fonts: f64,
) -> (Canvas, GridLayout) {
    let (w, h) = (width_in * PT_PER_INCH, height_in * PT_PER_INCH);
    let pad = pad_fonts * config.font.size;
    tracing::debug!(w, h, rows, cols, pad, "figure grid");
    (Canvas::new(w, h), GridLayout::new(w, h, rows, cols, pad))
}

/// Turn the canvas into a [`Figure`] and write it when `save` asks for it.
fn finish(canvas: Canvas, save: &SaveTarget, config: &VizConfig) -> Result<Figure> {
    let figure = Figure { svg: canvas.finish_svg(), width: canvas.width, height: canvas.height };
    figure.save(save, config)?;
    Ok(figure)
}

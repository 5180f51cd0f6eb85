use jn_viz::binning::jet_mass_pt_bins;

use super::hist_panel::HistPanel;
use super::{FeatureOptions, finish, grid_figure};
use crate::Result;
use crate::config::VizConfig;
use crate::figure::Figure;

/// Jet mass and jet pT histograms side by side (16" x 8"). Only `coords`
/// and `save` of the options are used.
pub fn plot_jet_mass_pt(
    real_masses: &[f64],
    gen_masses: &[f64],
    real_pts: &[f64],
    gen_pts: &[f64],
    opts: &FeatureOptions<'_>,
    config: &VizConfig,
) -> Result<Figure> {
    let bins = jet_mass_pt_bins(opts.coords)?;
    let y_label = "Number of Jets";
    let panels = [
        HistPanel::fill(bins.mass_label, y_label, real_masses, gen_masses, &bins.mass_bins),
        HistPanel::fill(bins.pt_label, y_label, real_pts, gen_pts, &bins.pt_bins),
    ];

    let (mut canvas, grid) = grid_figure(config, 16.0, 8.0, 1, 2, 2.0);
    for (i, (panel, cell)) in panels.iter().zip(grid.cells()).enumerate() {
        panel.draw(&mut canvas, cell, config, i == 0);
    }
    finish(canvas, &opts.save, config)
}

use jn_viz::binning::jet_feature_bins;
use jn_viz::metrics::{W1_EFP, W1_MASS};
use jn_viz::{FeatureMatrix, JetType};

use super::hist_panel::HistPanel;
use super::{FeatureOptions, finish, grid_figure};
use crate::Result;
use crate::config::VizConfig;
use crate::figure::Figure;

/// Jet mass and the five EFP histograms on a 2x3 grid (20" x 12").
/// EFP panels put the x axis in scientific notation as well.
pub fn plot_jet_feats(
    jet_type: JetType,
    real_masses: &[f64],
    gen_masses: &[f64],
    real_efps: &FeatureMatrix,
    gen_efps: &FeatureMatrix,
    opts: &FeatureOptions<'_>,
    config: &VizConfig,
) -> Result<Figure> {
    let bins = jet_feature_bins(jet_type, opts.coords)?;
    let losses = opts.losses;

    let mass_title = match losses {
        Some(l) if l.contains(W1_MASS) => Some(l.w1_mass_annotation()?),
        _ => None,
    };
    let mut panels = vec![
        HistPanel::fill(bins.mass_label, "Jets", real_masses, gen_masses, &bins.mass_bins)
            .with_title(mass_title),
    ];

    let efp_losses = losses.filter(|l| l.contains(W1_EFP));
    for (i, edges) in bins.efp_bins.iter().enumerate() {
        let title = efp_losses.map(|l| l.w1_annotation(W1_EFP, i)).transpose()?;
        panels.push(
            HistPanel::fill(
                format!("EFP {}", i + 1),
                "Jets",
                &real_efps.column(i)?,
                &gen_efps.column(i)?,
                edges,
            )
            .with_title(title)
            .with_sci_x(),
        );
    }

    let (mut canvas, grid) = grid_figure(config, 20.0, 12.0, 2, 3, 0.5);
    for (i, (panel, cell)) in panels.iter().zip(grid.cells()).enumerate() {
        panel.draw(&mut canvas, cell, config, i == 0);
    }
    finish(canvas, &opts.save, config)
}

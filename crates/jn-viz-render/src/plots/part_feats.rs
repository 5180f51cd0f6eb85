use jn_viz::binning::{ParticleFeatureBins, particle_feature_bins, particle_mass_row_bins};
use jn_viz::metrics::{W1_MASS, W1_PARTICLE};
use jn_viz::{JetType, MetricHistory, VizError};

use super::hist_panel::HistPanel;
use super::{FeatureOptions, ParticleSample, finish, grid_figure};
use crate::Result;
use crate::config::VizConfig;
use crate::figure::Figure;

/// Real vs. generated histograms of the three particle features, one row
/// of three panels (22" x 8").
pub fn plot_part_feats(
    jet_type: JetType,
    real: ParticleSample<'_>,
    generated: ParticleSample<'_>,
    opts: &FeatureOptions<'_>,
    config: &VizConfig,
) -> Result<Figure> {
    let bins = particle_feature_bins(jet_type, opts.coords, opts.dataset, opts.num_particles)?;
    let y_limits = match (opts.const_ylim, bins.y_limits) {
        (false, _) => None,
        (true, Some(limits)) => Some(limits),
        (true, None) => {
            return Err(VizError::UnsupportedBinning {
                figure: "constant y-limit",
                coords: opts.coords.to_string(),
                dataset: opts.dataset.to_string(),
                jet_type: jet_type.to_string(),
            }
            .into());
        }
    };

    let panels = particle_panels(&bins, real, generated, opts.losses)?;
    let (mut canvas, grid) = grid_figure(config, 22.0, 8.0, 1, 3, 2.0);
    for (i, (panel, cell)) in panels.into_iter().zip(grid.cells()).enumerate() {
        let panel = panel.with_y_max(y_limits.map(|l| l[i]));
        panel.draw(&mut canvas, cell, config, i == 0);
    }
    finish(canvas, &opts.save, config)
}

/// The three particle-feature panels plus a jet-mass panel in one row
/// (30" x 8"). The dataset option is not consulted.
pub fn plot_part_feats_jet_mass(
    jet_type: JetType,
    real: ParticleSample<'_>,
    generated: ParticleSample<'_>,
    real_masses: &[f64],
    gen_masses: &[f64],
    opts: &FeatureOptions<'_>,
    config: &VizConfig,
) -> Result<Figure> {
    let bins = particle_mass_row_bins(jet_type, opts.coords, opts.num_particles)?;

    let mut panels = particle_panels(&bins.particles, real, generated, opts.losses)?;
    let mass_title = match opts.losses {
        Some(losses) if losses.contains(W1_MASS) => Some(losses.w1_mass_annotation()?),
        _ => None,
    };
    panels.push(
        HistPanel::fill(bins.mass_label, "Jets", real_masses, gen_masses, &bins.mass_bins)
            .with_title(mass_title),
    );

    let (mut canvas, grid) = grid_figure(config, 30.0, 8.0, 1, 4, 2.0);
    for (i, (panel, cell)) in panels.iter().zip(grid.cells()).enumerate() {
        panel.draw(&mut canvas, cell, config, i == 0);
    }
    finish(canvas, &opts.save, config)
}

fn particle_panels(
    bins: &ParticleFeatureBins,
    real: ParticleSample<'_>,
    generated: ParticleSample<'_>,
    losses: Option<&MetricHistory>,
) -> Result<Vec<HistPanel>> {
    let real = real.table()?;
    let generated = generated.table()?;
    let annotate = losses.filter(|l| l.contains(W1_PARTICLE));

    let mut panels = Vec::with_capacity(4);
    for (i, (label, edges)) in bins.labels.iter().zip(&bins.bins).enumerate() {
        let title = annotate.map(|l| l.w1_annotation(W1_PARTICLE, i)).transpose()?;
        panels.push(
            HistPanel::fill(
                format!("Particle {label}"),
                "Number of Particles",
                &real.column(i)?,
                &generated.column(i)?,
                edges,
            )
            .with_title(title),
        );
    }
    Ok(panels)
}

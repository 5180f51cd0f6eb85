use jn_viz::binning::{N_EFPS, particle_labels};
use jn_viz::metrics::{W1_EFP, W1_MASS, W1_PARTICLE, epoch_axis};
use jn_viz::{Coords, MetricHistory, VizError};

use super::curve_panel::CurvePanel;
use super::{finish, grid_figure};
use crate::Result;
use crate::config::VizConfig;
use crate::figure::{Figure, SaveTarget};

/// Per-epoch evaluation metrics on a 3x3 grid (30" x 24"):
///
/// | cell | series |
/// |------|--------|
/// | 1-3  | `w1p` columns 0..3, log |
/// | 4    | `w1m` column 0, log |
/// | 5    | `w1efp` columns 0..5 with legend, log |
/// | 7, 8 | `mmd` (log) and `coverage`, only when both exist |
/// | 9    | `fpnd`, log |
///
/// Missing series leave their cells empty. Each series is placed on the
/// last `len` checkpoints of `0, save_epochs, ..., epoch`.
pub fn plot_eval(
    history: &MetricHistory,
    epoch: usize,
    save_epochs: usize,
    coords: Coords,
    save: &SaveTarget,
    config: &VizConfig,
) -> Result<Figure> {
    let line_color = config.palette_colors()[0];
    let x_of = |ys: &[f64], key: &str| -> Result<Vec<f64>> {
        let xs = epoch_axis(epoch, save_epochs, ys.len())?;
        if xs.len() != ys.len() {
            return Err(VizError::Shape(format!(
                "'{key}' has {} epochs but only {} checkpoints exist up to epoch {epoch}",
                ys.len(),
                xs.len()
            ))
            .into());
        }
        Ok(xs)
    };
    let single = |key: &str, ys: Vec<f64>, y_label: String, log: bool| -> Result<CurvePanel> {
        let mut panel = CurvePanel::new("Epoch", y_label);
        if log {
            panel = panel.log_y();
        }
        panel.push(None, line_color, x_of(&ys, key)?, ys);
        Ok(panel)
    };

    let mut cells: Vec<(usize, CurvePanel)> = Vec::new();

    if history.contains(W1_PARTICLE) {
        for (i, label) in particle_labels(coords).iter().enumerate() {
            let ys = history.column(W1_PARTICLE, i)?;
            cells.push((i, single(W1_PARTICLE, ys, format!("Particle {label} W_{{1}}"), true)?));
        }
    }

    if history.contains(W1_MASS) {
        let ys = history.column(W1_MASS, 0)?;
        cells.push((3, single(W1_MASS, ys, "Jet Relative Mass W_{1}".into(), true)?));
    }

    if history.contains(W1_EFP) {
        let mut panel = CurvePanel::new("Epoch", "Jet EFPs W_{1}").log_y();
        let colors = &config.colors.efp_curves;
        for i in 0..N_EFPS {
            let ys = history.column(W1_EFP, i)?;
            let color = colors.get(i % colors.len().max(1)).copied().unwrap_or(line_color);
            panel.push(Some(format!("EFP {}", i + 1)), color, x_of(&ys, W1_EFP)?, ys);
        }
        cells.push((4, panel));
    }

    if history.contains("mmd") && history.contains("coverage") {
        cells.push((6, single("mmd", history.scalar("mmd")?, "MMD".into(), true)?));
        let coverage = history.scalar("coverage")?;
        cells.push((7, single("coverage", coverage, "Coverage".into(), false)?));
    }

    if history.contains("fpnd") {
        cells.push((8, single("fpnd", history.scalar("fpnd")?, "FPND".into(), true)?));
    }

    if cells.is_empty() {
        tracing::warn!("no evaluation metrics in history");
    }

    let (mut canvas, grid) = grid_figure(config, 30.0, 24.0, 3, 3, 2.0);
    for (index, panel) in &cells {
        if let Some(cell) = grid.cell(*index) {
            panel.draw(&mut canvas, cell, config);
        }
    }
    finish(canvas, save, config)
}

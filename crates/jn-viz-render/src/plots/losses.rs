use jn_viz::MetricHistory;

use super::curve_panel::CurvePanel;
use super::finish;
use crate::Result;
use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::figure::{Figure, SaveTarget};
use crate::layout::margins::PlotArea;

const GRADIENT_PENALTY: &str = "gp";

/// Base curves drawn for a loss kind: `(history key, legend label)`.
pub fn loss_curves(kind: &str) -> &'static [(&'static str, &'static str)] {
    const DISCRIMINATOR_GENERATOR: &[(&str, &str)] = &[
        ("Dr", "Discriminitive real loss"),
        ("Df", "Discriminitive fake loss"),
        ("G", "Generative loss"),
    ];
    match kind {
        "og" | "ls" | "hinge" => DISCRIMINATOR_GENERATOR,
        "w" => &[("D", "Critic loss")],
        _ => &[],
    }
}

/// Training loss curves on a single panel. A `gp` series is added whenever
/// the history holds one; other kinds than og/ls/hinge/w draw no base curves.
pub fn plot_losses(
    history: &MetricHistory,
    kind: &str,
    save: &SaveTarget,
    config: &VizConfig,
) -> Result<Figure> {
    let mut keys: Vec<(&str, &str)> = loss_curves(kind).to_vec();
    if history.contains(GRADIENT_PENALTY) {
        keys.push((GRADIENT_PENALTY, "Gradient penalty"));
    }
    if keys.is_empty() {
        tracing::warn!(kind, "no loss curves to draw");
    }

    let palette = config.palette_colors();
    let mut panel = CurvePanel::new("Epoch", "Loss");
    for (i, (key, label)) in keys.into_iter().enumerate() {
        let ys = history.scalar(key)?;
        let xs = (0..ys.len()).map(|e| e as f64).collect();
        let color = palette[i % palette.len()];
        panel.push(Some(label.to_string()), color, xs, ys);
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);
    let cell = PlotArea::auto(&canvas, None, None, false, config);
    panel.draw(&mut canvas, &cell, config);
    finish(canvas, save, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_per_kind() {
        assert_eq!(loss_curves("og").len(), 3);
        assert_eq!(loss_curves("hinge"), loss_curves("ls"));
        assert_eq!(loss_curves("w"), &[("D", "Critic loss")]);
        assert!(loss_curves("lg").is_empty());
    }
}

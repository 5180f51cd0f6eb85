use super::axes_draw::draw_axes;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::legend::{LegendEntry, draw_legend};
use crate::layout::margins::PlotArea;
use crate::primitives::LineStyle;

#[derive(Debug, Clone)]
pub(crate) struct Curve {
    pub label: Option<String>,
    pub color: Color,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// Line-plot panel (loss and per-epoch metric curves).
#[derive(Debug, Clone, Default)]
pub(crate) struct CurvePanel {
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<Curve>,
    pub log_y: bool,
}

impl CurvePanel {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self { x_label: x_label.into(), y_label: y_label.into(), ..Default::default() }
    }

    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }

    pub fn push(&mut self, label: Option<String>, color: Color, xs: Vec<f64>, ys: Vec<f64>) {
        self.curves.push(Curve { label, color, xs, ys });
    }

    fn x_axis(&self) -> Axis {
        let (lo, hi) = bounds(self.curves.iter().flat_map(|c| c.xs.iter().copied()));
        Axis::auto_linear(lo.unwrap_or(0.0), hi.unwrap_or(1.0), 6)
    }

    fn y_axis(&self) -> Axis {
        let ys = || self.curves.iter().flat_map(|c| c.ys.iter().copied());
        if self.log_y {
            match bounds(ys().filter(|&y| y > 0.0)) {
                (Some(lo), Some(hi)) => return Axis::auto_log(lo, hi),
                _ => tracing::warn!(label = %self.y_label, "no positive values for log axis"),
            }
        }
        let (lo, hi) = bounds(ys());
        Axis::auto_linear(lo.unwrap_or(0.0), hi.unwrap_or(1.0), 6)
    }

    pub fn draw(&self, canvas: &mut Canvas, cell: &PlotArea, config: &VizConfig) {
        let x_axis = self.x_axis().with_label(self.x_label.as_str());
        let y_axis = self.y_axis().with_label(self.y_label.as_str());
        let area = PlotArea::inset(canvas, cell, Some(&y_axis), Some(&x_axis), false, config);
        tracing::debug!(
            label = %self.y_label,
            curves = self.curves.len(),
            log = y_axis.log,
            "curve panel"
        );

        canvas.push_clip(area.left, area.top, area.width, area.height);
        for curve in &self.curves {
            let style = LineStyle::solid(curve.color, config.lines.curve_width);
            for run in segments(&curve.xs, &curve.ys, |y| !y_axis.log || y > 0.0) {
                let points: Vec<(f64, f64)> = run
                    .into_iter()
                    .map(|(x, y)| {
                        (
                            x_axis.data_to_pixel(x, area.left, area.right()),
                            y_axis.data_to_pixel(y, area.bottom(), area.top),
                        )
                    })
                    .collect();
                canvas.polyline(&points, &style);
            }
        }
        canvas.pop_clip();

        draw_axes(canvas, &area, &x_axis, &y_axis, config);

        let entries: Vec<LegendEntry> = self
            .curves
            .iter()
            .filter_map(|c| c.label.as_ref().map(|l| LegendEntry::line(l.as_str(), c.color)))
            .collect();
        draw_legend(canvas, &area, &entries, config.font.legend_size, config.lines.curve_width);
    }
}

/// Split a curve into runs of drawable points. A non-finite coordinate, or a
/// `y` rejected by `keep`, ends the current run.
fn segments(xs: &[f64], ys: &[f64], keep: impl Fn(f64) -> bool) -> Vec<Vec<(f64, f64)>> {
    let mut runs = vec![Vec::new()];
    for (&x, &y) in xs.iter().zip(ys) {
        if x.is_finite() && y.is_finite() && keep(y) {
            if let Some(run) = runs.last_mut() {
                run.push((x, y));
            }
        } else if runs.last().is_some_and(|r| !r.is_empty()) {
            runs.push(Vec::new());
        }
    }
    runs.retain(|r| !r.is_empty());
    runs
}

/// Finite min and max of a sequence.
fn bounds(values: impl Iterator<Item = f64>) -> (Option<f64>, Option<f64>) {
    values.filter(|v| v.is_finite()).fold((None, None), |(lo, hi), v| {
        (Some(lo.map_or(v, |l: f64| l.min(v))), Some(hi.map_or(v, |h: f64| h.max(v))))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn bounds_skip_non_finite() {
        let (lo, hi) = bounds([3.0, f64::NAN, -1.0, f64::INFINITY].into_iter());
        assert_eq!((lo, hi), (Some(-1.0), Some(3.0)));
        assert_eq!(bounds(std::iter::empty::<f64>()), (None, None));
    }

    #[test]
    fn segments_break_at_non_finite_values() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 0.9, f64::NAN, 0.5, f64::INFINITY, 0.3];
        let runs = segments(&xs, &ys, |_| true);
        assert_eq!(runs, vec![vec![(0.0, 1.0), (1.0, 0.9)], vec![(3.0, 0.5)], vec![(5.0, 0.3)]]);
        let positive = segments(&xs[..2], &[1.0, -1.0], |y| y > 0.0);
        assert_eq!(positive, vec![vec![(0.0, 1.0)]]);
        assert!(segments(&[], &[], |_| true).is_empty());
    }

    #[test]
    fn log_panel_uses_log_axis() {
        let mut panel = CurvePanel::new("Epoch", "FPND").log_y();
        panel.push(None, color::BLUE, vec![0.0, 5.0, 10.0], vec![10.0, 1.0, 0.1]);
        assert!(panel.y_axis().log);
    }

    #[test]
    fn log_panel_without_positive_values_falls_back_to_linear() {
        let mut panel = CurvePanel::new("Epoch", "MMD").log_y();
        panel.push(None, color::BLUE, vec![0.0, 1.0], vec![0.0, -1.0]);
        assert!(!panel.y_axis().log);
    }

    #[test]
    fn labelled_curves_get_legend_lines() {
        let config = VizConfig::default();
        let mut canvas = Canvas::new(460.8, 345.6);
        let cell = PlotArea::manual(0.0, 0.0, 460.8, 345.6);
        let mut panel = CurvePanel::new("Epoch", "Loss");
        panel.push(Some("Critic loss".into()), color::BLUE, vec![0.0, 1.0], vec![2.0, 1.0]);
        panel.push(None, color::RED, vec![0.0, 1.0], vec![1.0, 1.5]);
        panel.draw(&mut canvas, &cell, &config);
        let svg = canvas.finish_svg();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(">Critic loss<"));
    }
}

use jn_viz::{BinEdges, Histogram};

use super::axes_draw::{draw_axes, draw_title};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{LegendEntry, draw_legend};
use crate::layout::margins::{PlotArea, offset_text_height};
use crate::primitives::LineStyle;

/// One panel comparing a real and a generated distribution as step
/// histograms over the same edges.
#[derive(Debug, Clone)]
pub(crate) struct HistPanel {
    pub x_label: String,
    pub y_label: String,
    pub real: Histogram,
    pub generated: Histogram,
    /// Fixed upper y limit instead of autoscaling.
    pub y_max: Option<f64>,
    pub title: Option<String>,
    /// Factor a power of ten out of the x tick labels too.
    pub sci_x: bool,
}

impl HistPanel {
    pub fn fill(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        real: &[f64],
        generated: &[f64],
        edges: &BinEdges,
    ) -> Self {
        let x_label = x_label.into();
        if real.is_empty() && generated.is_empty() {
            tracing::warn!(label = %x_label, "no values to histogram");
        }
        Self {
            x_label,
            y_label: y_label.into(),
            real: Histogram::fill(real.iter().copied(), edges),
            generated: Histogram::fill(generated.iter().copied(), edges),
            y_max: None,
            title: None,
            sci_x: false,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_y_max(mut self, y_max: Option<f64>) -> Self {
        self.y_max = y_max;
        self
    }

    pub fn with_sci_x(mut self) -> Self {
        self.sci_x = true;
        self
    }

    /// Upper y limit: the fixed one, or 5% above the tallest bin.
    pub fn y_top(&self) -> f64 {
        let top = self.y_max.unwrap_or_else(|| {
            self.real.max_count().max(self.generated.max_count()) * 1.05
        });
        if top > 0.0 { top } else { 1.0 }
    }

    pub fn draw(&self, canvas: &mut Canvas, cell: &PlotArea, config: &VizConfig, header: bool) {
        let (lo, hi) = match (self.real.edges.first(), self.real.edges.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => return,
        };
        let mut x_axis = Axis::linear_exact(lo, hi, 6).with_label(self.x_label.as_str());
        if self.sci_x {
            x_axis = x_axis.with_sci_notation();
        }
        let y_axis = Axis::linear_exact(0.0, self.y_top(), 6)
            .with_label(self.y_label.as_str())
            .with_sci_notation();

        let area = PlotArea::inset(
            canvas,
            cell,
            Some(&y_axis),
            Some(&x_axis),
            self.title.is_some(),
            config,
        );
        tracing::debug!(
            label = %self.x_label,
            y_top = y_axis.max,
            left = area.left,
            top = area.top,
            "histogram panel"
        );

        let width = config.lines.histogram_width;
        canvas.push_clip(area.left, area.top, area.width, area.height);
        let colors = &config.colors;
        for (hist, color) in [(&self.real, colors.real), (&self.generated, colors.generated)] {
            draw_step(canvas, &area, &x_axis, &y_axis, hist, color, width);
        }
        canvas.pop_clip();

        draw_axes(canvas, &area, &x_axis, &y_axis, config);
        if let Some(title) = &self.title {
            draw_title(canvas, &area, title, config);
        }
        let entries = [
            LegendEntry::outline("Real", config.colors.real),
            LegendEntry::outline("Generated", config.colors.generated),
        ];
        draw_legend(canvas, &area, &entries, config.font.legend_size, width);
        if header {
            let lift =
                if y_axis.offset_exponent.is_some() { offset_text_height(config) } else { 0.0 };
            draw_experiment_header(canvas, &area, config, lift);
        }
    }
}

fn draw_step(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    hist: &Histogram,
    color: Color,
    width: f64,
) {
    let points: Vec<(f64, f64)> = hist
        .step_outline()
        .into_iter()
        .map(|(x, y)| {
            (
                x_axis.data_to_pixel(x, area.left, area.right()),
                y_axis.data_to_pixel(y, area.bottom(), area.top),
            )
        })
        .collect();
    canvas.polyline(&points, &LineStyle::solid(color, width));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> HistPanel {
        let edges = BinEdges::linspace(0.0, 1.0, 11).unwrap();
        HistPanel::fill("Jet m/p_{T}", "Jets", &[0.05, 0.15, 0.15], &[0.05, 0.95], &edges)
    }

    #[test]
    fn autoscaled_top_leaves_headroom() {
        let p = panel();
        assert!((p.y_top() - 2.1).abs() < 1e-12);
        assert!((p.with_y_max(Some(3e5)).y_top() - 3e5).abs() < 1e-9);
    }

    #[test]
    fn draws_both_outlines_and_legend() {
        let config = VizConfig::default();
        let mut canvas = Canvas::new(500.0, 400.0);
        let cell = PlotArea::manual(0.0, 0.0, 500.0, 400.0);
        let titled = panel().with_title(Some("W\u{2081} = 1.00e-02 \u{00B1} 1.00e-03".into()));
        titled.draw(&mut canvas, &cell, &config, false);
        let svg = canvas.finish_svg();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(">Real<"));
        assert!(svg.contains(">Generated<"));
        assert!(svg.contains(">Jets<"));
        assert!(svg.contains("W\u{2081} = 1.00e-02"));
        assert!(svg.contains("clip-path"));
    }
}

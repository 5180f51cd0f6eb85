use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Gap between tick marks and their labels.
pub const TICK_LABEL_GAP: f64 = 6.0;
/// Gap between tick labels and the axis label.
pub const AXIS_LABEL_GAP: f64 = 8.0;

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Compute auto-margins over the whole canvas.
    pub fn auto(
        canvas: &Canvas,
        y_axis: Option<&Axis>,
        x_axis: Option<&Axis>,
        titled: bool,
        config: &VizConfig,
    ) -> Self {
        let pad = config.font.size * 0.5;
        let cell = PlotArea::manual(pad, pad, canvas.width - 2.0 * pad, canvas.height - 2.0 * pad);
        Self::inset(canvas, &cell, y_axis, x_axis, titled, config)
    }

    /// Shrink a layout cell so tick labels, axis labels, the sci-notation
    /// offset and an optional title fit inside it.
    pub fn inset(
        canvas: &Canvas,
        cell: &PlotArea,
        y_axis: Option<&Axis>,
        x_axis: Option<&Axis>,
        titled: bool,
        config: &VizConfig,
    ) -> Self {
        let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
        let label_style = TextStyle { size: config.font.label_size, ..Default::default() };
        let out = if config.axes.tick_direction == "in" { 0.0 } else { config.axes.tick_length };

        // Left margin: y-axis tick labels + axis label
        let mut left = 0.0;
        if let Some(y) = y_axis {
            left += out + y_tick_label_width(canvas, y, config) + TICK_LABEL_GAP;
            if !y.label.is_empty() {
                left += canvas.measure_text(&y.label, &label_style).height + AXIS_LABEL_GAP;
            }
        }

        // Bottom margin: x-axis tick labels + axis label
        let mut bottom = 0.0;
        if let Some(x) = x_axis {
            bottom += out + tick_style.size * 1.2 + TICK_LABEL_GAP;
            if !x.label.is_empty() {
                bottom += canvas.measure_text(&x.label, &label_style).height + AXIS_LABEL_GAP;
            }
        }

        // Top margin: title, y offset text and header share the space above the frame
        let offset_h = if y_axis.is_some_and(|y| y.offset_exponent.is_some()) {
            offset_text_height(config)
        } else {
            0.0
        };
        let mut top = offset_h;
        if titled {
            top = top.max(config.font.title_size * 1.6);
        }
        if !config.experiment.name.is_empty() {
            top = top.max(offset_h + config.font.label_size * 1.3);
        }

        // Right margin: x offset text hangs past the frame
        let right = if x_axis.is_some_and(|x| x.offset_exponent.is_some()) {
            config.font.tick_size * 0.5
        } else {
            0.0
        };

        let width = cell.width - left - right;
        let height = cell.height - top - bottom;

        Self {
            left: cell.left + left,
            top: cell.top + top,
            width: width.max(50.0),
            height: height.max(50.0),
        }
    }

    /// Manual margins (for multi-panel layouts).
    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Vertical space taken by a `×10ⁿ` offset text above the frame.
pub fn offset_text_height(config: &VizConfig) -> f64 {
    config.font.tick_size * 1.4
}

/// Widest y tick label, in points.
pub fn y_tick_label_width(canvas: &Canvas, axis: &Axis, config: &VizConfig) -> f64 {
    let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
    axis.tick_labels
        .iter()
        .map(|l| canvas.measure_text(l, &tick_style).width)
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_stays_inside_cell() {
        let canvas = Canvas::new(600.0, 400.0);
        let config = VizConfig::default();
        let cell = PlotArea::manual(10.0, 10.0, 300.0, 200.0);
        let y = Axis::auto_linear(0.0, 1000.0, 5).with_label("Jets");
        let x = Axis::auto_linear(0.0, 1.0, 5).with_label("Jet m/p_{T}");
        let area = PlotArea::inset(&canvas, &cell, Some(&y), Some(&x), true, &config);
        assert!(area.left > cell.left);
        assert!(area.top > cell.top);
        assert!(area.right() <= cell.right() + 1e-9);
        assert!(area.bottom() < cell.bottom());
    }

    #[test]
    fn untitled_without_axes_fills_cell() {
        let canvas = Canvas::new(600.0, 400.0);
        let config = VizConfig::default();
        let cell = PlotArea::manual(0.0, 0.0, 300.0, 200.0);
        let area = PlotArea::inset(&canvas, &cell, None, None, false, &config);
        assert_eq!(area, cell);
    }
}

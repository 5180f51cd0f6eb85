use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::{AXIS_LABEL_GAP, PlotArea, TICK_LABEL_GAP, y_tick_label_width};
use crate::primitives::*;

const FRAME: Color = Color::rgb(0, 0, 0);

/// Draw a box frame with ticks, tick labels, optional grid, axis labels
/// and the `×10ⁿ` offset texts of sci-notation axes.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
) {
    let major = LineStyle::solid(FRAME, 0.8);
    let minor = LineStyle::solid(FRAME, 0.6);

    // Ticks point into the frame (+1) or away from it (-1).
    let dir = if config.axes.tick_direction == "in" { 1.0 } else { -1.0 };
    let tl = config.axes.tick_length;
    let mtl = config.axes.minor_tick_length;
    let out = if dir < 0.0 { tl } else { 0.0 };

    canvas.rect(area.left, area.top, area.width, area.height, &Style::stroked(FRAME, 0.8));

    if config.grid.show {
        let grid_style = LineStyle::dashed(config.grid.color.with_alpha(config.grid.alpha), 0.5);
        for px in visible(x_axis, area.left, area.right(), &x_axis.tick_positions) {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }
        for py in visible(y_axis, area.bottom(), area.top, &y_axis.tick_positions) {
            canvas.line(area.left, py, area.right(), py, &grid_style);
        }
    }

    // --- X axis ---
    let x_ticks = [(&x_axis.tick_positions, tl, &major), (&x_axis.minor_ticks, mtl, &minor)];
    for (positions, len, style) in x_ticks {
        for px in visible(x_axis, area.left, area.right(), positions) {
            canvas.line(px, area.bottom(), px, area.bottom() - dir * len, style);
            if config.axes.show_top_ticks {
                canvas.line(px, area.top, px, area.top + dir * len, style);
            }
        }
    }

    let x_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    let label_top = area.bottom() + out + TICK_LABEL_GAP;
    for (&val, label) in x_axis.tick_positions.iter().zip(&x_axis.tick_labels) {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if in_span(px, area.left, area.right()) {
            canvas.text(px, label_top, label, &x_label_style);
        }
    }

    // --- Y axis ---
    let y_ticks = [(&y_axis.tick_positions, tl, &major), (&y_axis.minor_ticks, mtl, &minor)];
    for (positions, len, style) in y_ticks {
        for py in visible(y_axis, area.bottom(), area.top, positions) {
            canvas.line(area.left, py, area.left + dir * len, py, style);
            if config.axes.show_right_ticks {
                canvas.line(area.right(), py, area.right() - dir * len, py, style);
            }
        }
    }

    let y_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let label_right = area.left - out - TICK_LABEL_GAP;
    for (&val, label) in y_axis.tick_positions.iter().zip(&y_axis.tick_labels) {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if in_span(py, area.top, area.bottom()) {
            canvas.text(label_right, py, label, &y_label_style);
        }
    }

    // --- Offset texts ---
    let offset_style = TextStyle { size: config.font.tick_size, ..Default::default() };
    if let Some(offset) = y_axis.offset_label() {
        canvas.text(area.left, area.top - TICK_LABEL_GAP, &offset, &offset_style);
    }
    if let Some(offset) = x_axis.offset_label() {
        let style = TextStyle { anchor: TextAnchor::End, ..offset_style };
        let y = label_top + config.font.tick_size * 2.2;
        canvas.text(area.right() + config.font.tick_size * 0.5, y, &offset, &style);
    }

    // --- Axis labels ---
    let label_style = TextStyle {
        size: config.font.label_size,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };

    if !x_axis.label.is_empty() {
        let metrics = canvas.measure_text(&x_axis.label, &label_style);
        let y = label_top + config.font.tick_size * 1.2 + AXIS_LABEL_GAP + metrics.ascent;
        canvas.text(area.left + area.width / 2.0, y, &x_axis.label, &label_style);
    }

    if !y_axis.label.is_empty() {
        let metrics = canvas.measure_text(&y_axis.label, &label_style);
        let tick_w = y_tick_label_width(canvas, y_axis, config);
        let descent = metrics.height - metrics.ascent;
        let x = label_right - tick_w - AXIS_LABEL_GAP - descent;
        let y = area.top + area.height / 2.0;
        canvas.text_rotated(x, y, &y_axis.label, &label_style, -90.0);
    }
}

/// Centered panel title above the frame.
pub fn draw_title(canvas: &mut Canvas, area: &PlotArea, title: &str, config: &VizConfig) {
    let size = config.font.title_size;
    let style = TextStyle { size, anchor: TextAnchor::Middle, ..Default::default() };
    canvas.text(area.left + area.width / 2.0, area.top - size * 0.5, title, &style);
}

fn in_span(p: f64, lo: f64, hi: f64) -> bool {
    p >= lo.min(hi) - 0.5 && p <= lo.max(hi) + 0.5
}

fn visible<'a>(
    axis: &'a Axis,
    px_min: f64,
    px_max: f64,
    positions: &'a [f64],
) -> impl Iterator<Item = f64> + 'a {
    positions
        .iter()
        .map(move |&v| axis.data_to_pixel(v, px_min, px_max))
        .filter(move |&p| in_span(p, px_min, px_max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_labels_are_drawn() {
        let config = VizConfig::default();
        let mut canvas = Canvas::new(600.0, 400.0);
        let area = PlotArea::manual(100.0, 50.0, 400.0, 250.0);
        let x = Axis::linear_exact(0.0, 1.0, 5).with_label("Particle η^{rel}");
        let y = Axis::auto_linear(0.0, 40000.0, 5)
            .with_label("Number of Particles")
            .with_sci_notation();
        draw_axes(&mut canvas, &area, &x, &y, &config);
        draw_title(&mut canvas, &area, "W\u{2081} = 1.00e-03 \u{00B1} 2.00e-04", &config);
        let svg = canvas.finish_svg();
        assert!(svg.contains("\u{00D7}10\u{2074}"));
        assert!(svg.contains(">Number of Particles<"));
        assert!(svg.contains("rotate(-90.0"));
        assert!(svg.contains("W\u{2081} = 1.00e-03"));
    }
}

use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub kind: LegendKind,
}

impl LegendEntry {
    pub fn outline(label: impl Into<String>, color: Color) -> Self {
        Self { label: label.into(), color, kind: LegendKind::Outline }
    }

    pub fn line(label: impl Into<String>, color: Color) -> Self {
        Self { label: label.into(), color, kind: LegendKind::Line }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    /// Unfilled box, used for step histograms.
    Outline,
    Line,
}

/// Draw a frameless legend in the upper-right corner of the plot area.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[LegendEntry],
    font_size: f64,
    line_width: f64,
) {
    if entries.is_empty() {
        return;
    }

    let row_height = font_size * 1.3;
    let swatch_w = font_size * 2.0;
    let swatch_h = font_size * 0.7;
    let gap = font_size * 0.8;
    let padding = font_size * 0.5;

    let text_style =
        TextStyle { size: font_size, baseline: TextBaseline::Central, ..Default::default() };

    let max_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);

    let legend_w = padding + swatch_w + gap + max_w + padding;
    let lx = area.right() - legend_w;
    let ly = area.top + padding;

    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + i as f64 * row_height + row_height / 2.0;
        let sx = lx + padding;

        match entry.kind {
            LegendKind::Outline => {
                canvas.rect(
                    sx,
                    ey - swatch_h / 2.0,
                    swatch_w,
                    swatch_h,
                    &Style::stroked(entry.color, line_width),
                );
            }
            LegendKind::Line => {
                canvas.line(sx, ey, sx + swatch_w, ey, &LineStyle::solid(entry.color, line_width));
            }
        }

        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn entries_are_drawn_in_order() {
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea::manual(20.0, 20.0, 360.0, 260.0);
        let entries = vec![
            LegendEntry::outline("Real", color::RED),
            LegendEntry::outline("Generated", color::BLUE),
        ];
        draw_legend(&mut canvas, &area, &entries, 18.0, 1.5);
        let svg = canvas.finish_svg();
        let real = svg.find(">Real<").unwrap();
        let generated = svg.find(">Generated<").unwrap();
        assert!(real < generated);
        assert!(svg.contains(r##"stroke="#ff0000""##));
    }

    #[test]
    fn empty_legend_draws_nothing() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let area = PlotArea::manual(0.0, 0.0, 100.0, 100.0);
        draw_legend(&mut canvas, &area, &[], 10.0, 1.0);
        assert!(!canvas.finish_svg().contains("<text"));
    }
}

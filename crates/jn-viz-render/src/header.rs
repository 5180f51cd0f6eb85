use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the experiment label above a panel: bold name, italic status on the
/// left and `<lumi> fb⁻¹ (<√s> TeV)` on the right, `lift` points higher than
/// the frame top. Nothing is drawn when the configured experiment name is
/// empty.
pub fn draw_experiment_header(
    canvas: &mut Canvas,
    area: &PlotArea,
    config: &VizConfig,
    lift: f64,
) {
    let exp = &config.experiment;
    if exp.name.is_empty() {
        return;
    }

    let size = config.font.label_size;
    let y = area.top - lift - size * 0.3;

    let bold = TextStyle { size, weight: FontWeight::Bold, ..Default::default() };
    canvas.text(area.left, y, &exp.name, &bold);

    if !exp.status.is_empty() {
        let name_w = canvas.measure_text(&exp.name, &bold).width;
        let italic = TextStyle { size: size * 0.8, style: FontStyle::Italic, ..Default::default() };
        canvas.text(area.left + name_w + size * 0.3, y, &exp.status, &italic);
    }

    if let Some(info) = energy_lumi_label(config) {
        let style = TextStyle { size: size * 0.8, anchor: TextAnchor::End, ..Default::default() };
        canvas.text(area.right(), y, &info, &style);
    }
}

fn energy_lumi_label(config: &VizConfig) -> Option<String> {
    let exp = &config.experiment;
    match (exp.lumi_fb_inv > 0.0, exp.sqrt_s_tev > 0.0) {
        (true, true) => {
            Some(format!("{} fb\u{207B}\u{00B9} ({} TeV)", exp.lumi_fb_inv, exp.sqrt_s_tev))
        }
        (false, true) => Some(format!("({} TeV)", exp.sqrt_s_tev)),
        (true, false) => Some(format!("{} fb\u{207B}\u{00B9}", exp.lumi_fb_inv)),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BuiltinTheme;

    #[test]
    fn cms_theme_draws_label() {
        let config = BuiltinTheme::Cms.base_config();
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea::manual(40.0, 40.0, 300.0, 200.0);
        draw_experiment_header(&mut canvas, &area, &config, 0.0);
        let svg = canvas.finish_svg();
        assert!(svg.contains(">CMS<"));
        assert!(svg.contains(">Simulation<"));
        assert!(svg.contains("(13 TeV)"));
    }

    #[test]
    fn default_theme_has_no_header() {
        let config = VizConfig::default();
        let mut canvas = Canvas::new(400.0, 300.0);
        let area = PlotArea::manual(40.0, 40.0, 300.0, 200.0);
        draw_experiment_header(&mut canvas, &area, &config, 0.0);
        assert!(!canvas.finish_svg().contains("<text"));
    }
}

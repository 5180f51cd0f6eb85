use ab_glyph::{Font, ScaleFont};

use crate::font::FontHandle;
use crate::primitives::TextStyle;

/// Relative size of sub/superscript runs.
pub const SCRIPT_SCALE: f64 = 0.7;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Vertical placement of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Normal,
    Sub,
    Super,
}

/// A run of text sharing one vertical placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub script: Script,
    pub text: String,
}

/// Split a label into runs. `_{..}` and `^{..}` mark sub- and superscripts;
/// without braces only the next character is shifted.
pub fn parse_rich(label: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut push = |script: Script, text: String| {
        if text.is_empty() {
            return;
        }
        match runs.last_mut() {
            Some(last) if last.script == script => last.text.push_str(&text),
            _ => runs.push(TextRun { script, text }),
        }
    };

    let mut chars = label.chars().peekable();
    let mut normal = String::new();
    while let Some(ch) = chars.next() {
        let script = match ch {
            '_' => Script::Sub,
            '^' => Script::Super,
            _ => {
                normal.push(ch);
                continue;
            }
        };
        let Some(&next) = chars.peek() else {
            normal.push(ch);
            break;
        };
        push(Script::Normal, std::mem::take(&mut normal));
        chars.next();
        if next == '{' {
            let mut inner = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                inner.push(c);
            }
            push(script, inner);
        } else {
            push(script, next.to_string());
        }
    }
    push(Script::Normal, normal);
    runs
}

/// Label text with markup removed.
pub fn plain_text(label: &str) -> String {
    parse_rich(label).into_iter().map(|r| r.text).collect()
}

/// Measure text width and height in points using ab_glyph.
pub fn measure_text<F: Font>(font: &F, text: &str, size_pt: f64) -> TextMetrics {
    let scale = ab_glyph::PxScale::from(size_pt as f32);
    let scaled = font.as_scaled(scale);

    let mut width: f32 = 0.0;
    let mut prev_glyph_id = None;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = prev_glyph_id {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph_id = Some(glyph_id);
    }

    let ascent = scaled.ascent();
    let descent = scaled.descent();
    let height = ascent - descent;

    TextMetrics { width: width as f64, height: height as f64, ascent: ascent as f64 }
}

/// Fixed-advance estimate for hosts without any usable font.
pub fn estimate_text(text: &str, size_pt: f64) -> TextMetrics {
    TextMetrics {
        width: text.chars().count() as f64 * size_pt * 0.55,
        height: size_pt * 1.2,
        ascent: size_pt * 0.8,
    }
}

/// Measure a (possibly marked-up) label with a TextStyle.
pub fn measure_styled(fonts: &FontHandle, label: &str, style: &TextStyle) -> TextMetrics {
    let mut total = TextMetrics { width: 0.0, height: 0.0, ascent: 0.0 };
    for run in parse_rich(label) {
        let size = match run.script {
            Script::Normal => style.size,
            Script::Sub | Script::Super => style.size * SCRIPT_SCALE,
        };
        let m = match fonts.select(style.weight, style.style) {
            Some(font) => measure_text(font, &run.text, size),
            None => estimate_text(&run.text, size),
        };
        total.width += m.width;
        total.height = total.height.max(m.height);
        total.ascent = total.ascent.max(m.ascent);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sub_and_super() {
        let runs = parse_rich("p_{T}^{rel}");
        assert_eq!(
            runs,
            vec![
                TextRun { script: Script::Normal, text: "p".into() },
                TextRun { script: Script::Sub, text: "T".into() },
                TextRun { script: Script::Super, text: "rel".into() },
            ]
        );
    }

    #[test]
    fn parse_single_char_and_trailing_marker() {
        let runs = parse_rich("x^2 + y_");
        assert_eq!(runs[0], TextRun { script: Script::Normal, text: "x".into() });
        assert_eq!(runs[1], TextRun { script: Script::Super, text: "2".into() });
        assert_eq!(runs[2], TextRun { script: Script::Normal, text: " + y_".into() });
    }

    #[test]
    fn plain_label_is_single_run() {
        assert_eq!(parse_rich("Number of Jets").len(), 1);
        assert_eq!(plain_text("Jet m/p_{T}"), "Jet m/pT");
        assert!(parse_rich("").is_empty());
    }

    #[test]
    fn estimate_scales_with_length() {
        let a = estimate_text("ab", 10.0);
        let b = estimate_text("abcd", 10.0);
        assert!((b.width - 2.0 * a.width).abs() < 1e-9);
    }

    #[test]
    fn styled_measure_is_positive() {
        let fonts = FontHandle::shared();
        let m = measure_styled(fonts, "Particle η^{rel}", &TextStyle::default());
        assert!(m.width > 0.0);
        assert!(m.height > 0.0);
    }
}

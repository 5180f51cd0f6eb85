use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn hex(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            s.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok()).unwrap_or(0)
        };
        Self { r: channel(0), g: channel(2), b: channel(4), a: 1.0 }
    }

    /// Named matplotlib base color, or a hex string.
    pub fn parse(s: &str) -> Self {
        match s {
            "red" => RED,
            "blue" => BLUE,
            "green" => GREEN,
            "orange" => ORANGE,
            "yellow" => YELLOW,
            "black" => Color::rgb(0, 0, 0),
            "white" => Color::rgb(255, 255, 255),
            other => Color::hex(other),
        }
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Color::parse(&s))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

// matplotlib named colors
pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
pub const ORANGE: Color = Color::rgb(0xff, 0xa5, 0x00);
pub const YELLOW: Color = Color::rgb(0xff, 0xff, 0x00);

// --- Palettes ---

pub const TAB10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub const PETROFF10: &[&str] = &[
    "#3f90da", "#ffa90e", "#bd1f01", "#94a4a2", "#832db6", "#a96b59", "#e76300", "#b9ac70",
    "#717581", "#92dadd",
];

pub const CMS_PETROFF6: &[&str] =
    &["#5790fc", "#f89c20", "#e42536", "#964a8b", "#9c9ca1", "#7a21dd"];

pub fn palette_colors(name: &str) -> Vec<Color> {
    let strs = match name {
        "tab10" => TAB10,
        "petroff10" => PETROFF10,
        "cms_petroff6" => CMS_PETROFF6,
        _ => TAB10,
    };
    strs.iter().map(|s| Color::hex(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::hex("#1D4ED8");
        assert_eq!(c.r, 0x1D);
        assert_eq!(c.g, 0x4E);
        assert_eq!(c.b, 0xD8);
        assert!((c.a - 1.0).abs() < 1e-9);
    }

    #[test]
    fn short_hex_does_not_panic() {
        assert_eq!(Color::hex("#12"), Color::rgb(0x12, 0, 0));
    }

    #[test]
    fn named_colors() {
        assert_eq!(Color::parse("red").to_svg_fill(), "#ff0000");
        assert_eq!(Color::parse("blue").to_svg_fill(), "#0000ff");
        assert_eq!(Color::parse("#00ff00"), Color::rgb(0, 255, 0));
    }

    #[test]
    fn svg_fill_alpha() {
        let c = Color::rgb(29, 78, 216).with_alpha(0.5);
        assert_eq!(c.to_svg_fill(), "rgba(29,78,216,0.500)");
    }

    #[test]
    fn palette_lookup() {
        assert_eq!(palette_colors("tab10").len(), 10);
        assert_eq!(palette_colors("petroff10").len(), 10);
        assert_eq!(palette_colors("cms_petroff6").len(), 6);
        assert_eq!(palette_colors("unknown"), palette_colors("tab10"));
    }
}

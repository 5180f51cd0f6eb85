use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::VizConfig;
use crate::{RenderError, Result};

/// Points per inch; figure sizes are given in inches like matplotlib's `figsize`.
pub const PT_PER_INCH: f64 = 72.0;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Svg,
    #[default]
    Pdf,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where a figure is written. Nothing is written unless both `dir` and
/// `name` are set.
#[derive(Debug, Clone, Default)]
pub struct SaveTarget {
    pub dir: Option<PathBuf>,
    pub name: Option<String>,
    /// Overrides `output.format` of the config.
    pub format: Option<OutputFormat>,
}

impl SaveTarget {
    /// Do not write anything.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { dir: Some(dir.into()), name: Some(name.into()), format: None }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// `<dir>/<name>.<ext>`, when both parts are present.
    pub fn path(&self, format: OutputFormat) -> Option<PathBuf> {
        match (&self.dir, &self.name) {
            (Some(dir), Some(name)) => Some(dir.join(format!("{name}.{}", format.extension()))),
            _ => None,
        }
    }
}

/// A rendered figure: an SVG document plus its page size in points.
#[derive(Debug, Clone)]
pub struct Figure {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

impl Figure {
    /// Encode the figure. PDF and PNG need the matching crate features.
    #[cfg_attr(not(feature = "png"), allow(unused_variables))]
    pub fn to_bytes(&self, format: OutputFormat, config: &VizConfig) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Svg => Ok(self.svg.clone().into_bytes()),
            #[cfg(feature = "pdf")]
            OutputFormat::Pdf => crate::output::pdf::svg_to_pdf(&self.svg),
            #[cfg(feature = "png")]
            OutputFormat::Png => crate::output::png::svg_to_png(&self.svg, config.output.dpi),
            #[allow(unreachable_patterns)]
            other => Err(RenderError::UnsupportedFormat(format!("{other} (feature disabled)"))),
        }
    }

    /// Write the figure to `path`.
    pub fn write_to(&self, path: &Path, format: OutputFormat, config: &VizConfig) -> Result<()> {
        let bytes = self.to_bytes(format, config)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), %format, "figure written");
        Ok(())
    }

    /// Write the figure when `target` names a directory and a file stem.
    /// Returns the written path.
    pub fn save(&self, target: &SaveTarget, config: &VizConfig) -> Result<Option<PathBuf>> {
        if target.dir.is_none() || target.name.is_none() {
            return Ok(None);
        }
        let format = match target.format {
            Some(format) => format,
            None => config.output.format.parse()?,
        };
        let Some(path) = target.path(format) else {
            return Ok(None);
        };
        self.write_to(&path, format, config)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_needs_dir_and_name() {
        assert!(SaveTarget::none().path(OutputFormat::Pdf).is_none());
        let half = SaveTarget { dir: Some("figs".into()), ..Default::default() };
        assert!(half.path(OutputFormat::Pdf).is_none());
        let t = SaveTarget::new("figs", "epoch_10");
        assert_eq!(t.path(OutputFormat::Pdf), Some(PathBuf::from("figs/epoch_10.pdf")));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("eps".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn save_without_target_is_noop() {
        let fig = Figure { svg: "<svg/>".into(), width: 1.0, height: 1.0 };
        let written = fig.save(&SaveTarget::none(), &VizConfig::default()).unwrap();
        assert!(written.is_none());
    }

    #[test]
    fn bad_output_format_only_fails_when_writing() {
        let fig = Figure { svg: "<svg/>".into(), width: 1.0, height: 1.0 };
        let mut config = VizConfig::default();
        config.output.format = "eps".into();
        assert!(fig.save(&SaveTarget::none(), &config).unwrap().is_none());
        let dir = std::env::temp_dir().join("jn_viz_render_bad_format_test");
        let err = fig.save(&SaveTarget::new(&dir, "blank"), &config).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ref f) if f == "eps"));
    }

    #[test]
    fn save_svg_writes_file() {
        let dir = std::env::temp_dir().join("jn_viz_render_figure_test");
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#.to_string();
        let fig = Figure { svg, width: 1.0, height: 1.0 };
        let target = SaveTarget::new(&dir, "blank").with_format(OutputFormat::Svg);
        let path = fig.save(&target, &VizConfig::default()).unwrap().unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("svg"));
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("<svg"));
        let _ = std::fs::remove_file(path);
    }
}

use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    JetNet,
    Cms,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cms" => Self::Cms,
            "minimal" => Self::Minimal,
            _ => Self::JetNet,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::JetNet => jetnet(),
            Self::Cms => cms(),
            Self::Minimal => minimal(),
        }
    }
}

/// CMS-like publication style without an experiment label.
fn jetnet() -> VizConfig {
    VizConfig {
        theme: "jetnet".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        experiment: ExperimentConfig::default(),
        colors: ColorsConfig::default(),
        palette: "petroff10".into(),
        lines: LinesConfig::default(),
        output: OutputConfig::default(),
    }
}

fn cms() -> VizConfig {
    VizConfig {
        theme: "cms".into(),
        experiment: ExperimentConfig {
            name: "CMS".into(),
            status: "Simulation".into(),
            sqrt_s_tev: 13.0,
            lumi_fb_inv: 0.0,
        },
        ..jetnet()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        font: FontConfig {
            size: 10.0,
            label_size: 11.0,
            tick_size: 9.0,
            title_size: 9.0,
            legend_size: 9.0,
        },
        axes: AxesConfig {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 4.0,
            minor_tick_length: 2.0,
        },
        palette: "tab10".into(),
        lines: LinesConfig { histogram_width: 1.0, curve_width: 1.0 },
        ..jetnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_with_fallback() {
        assert_eq!(BuiltinTheme::parse("CMS"), BuiltinTheme::Cms);
        assert_eq!(BuiltinTheme::parse("minimal"), BuiltinTheme::Minimal);
        assert_eq!(BuiltinTheme::parse("whatever"), BuiltinTheme::JetNet);
    }

    #[test]
    fn cms_adds_header_only() {
        let base = BuiltinTheme::JetNet.base_config();
        let cms = BuiltinTheme::Cms.base_config();
        assert!(base.experiment.name.is_empty());
        assert_eq!(cms.experiment.name, "CMS");
        assert_eq!(cms.font.label_size, base.font.label_size);
    }
}

//! Bin-edge presets keyed by jet type, coordinate system and dataset.
//!
//! Every figure picks its histogram binning and axis labels from a small
//! table of hand-tuned cases. The numbers below are the ones the JetNet
//! evaluation figures have always used; combinations without a preset are
//! reported as [`VizError::UnsupportedBinning`].
//!
//! Labels use a minimal TeX-like markup (`_{..}` subscript, `^{..}`
//! superscript) that the renderer turns into shifted text runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Jet flavour of a JetNet sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JetType {
    /// Gluon jets (`g`).
    #[serde(rename = "g")]
    Gluon,
    /// Light-quark jets (`q`).
    #[serde(rename = "q")]
    LightQuark,
    /// Top-quark jets (`t`).
    #[serde(rename = "t")]
    Top,
    /// W boson jets (`w`).
    #[serde(rename = "w")]
    W,
    /// Z boson jets (`z`).
    #[serde(rename = "z")]
    Z,
}

impl JetType {
    /// One-letter name used by the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            JetType::Gluon => "g",
            JetType::LightQuark => "q",
            JetType::Top => "t",
            JetType::W => "w",
            JetType::Z => "z",
        }
    }

    /// Gluon, quark and top jets share the wider mass range.
    fn wide_mass_range(&self) -> bool {
        matches!(self, JetType::Gluon | JetType::LightQuark | JetType::Top)
    }
}

impl FromStr for JetType {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "g" => Ok(JetType::Gluon),
            "q" => Ok(JetType::LightQuark),
            "t" => Ok(JetType::Top),
            "w" => Ok(JetType::W),
            "z" => Ok(JetType::Z),
            other => Err(VizError::UnknownName { what: "jet type", value: other.to_string() }),
        }
    }
}

impl fmt::Display for JetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Particle coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coords {
    /// Absolute momenta `p_x, p_y, p_z` in GeV.
    Cartesian,
    /// `η, φ, p_T` relative to the jet axis and jet p_T.
    #[default]
    PolarRel,
    /// Relative `η, φ` with absolute `p_T` in GeV.
    PolarRelAbsPt,
}

impl Coords {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Coords::Cartesian => "cartesian",
            Coords::PolarRel => "polarrel",
            Coords::PolarRelAbsPt => "polarrelabspt",
        }
    }
}

impl FromStr for Coords {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cartesian" => Ok(Coords::Cartesian),
            "polarrel" => Ok(Coords::PolarRel),
            "polarrelabspt" => Ok(Coords::PolarRelAbsPt),
            other => {
                Err(VizError::UnknownName { what: "coordinate system", value: other.to_string() })
            }
        }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source dataset of the real jets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dataset {
    /// The JetNet dataset.
    #[default]
    #[serde(rename = "jetnet")]
    JetNet,
    /// The LAGAN jet-image dataset.
    #[serde(rename = "jets-lagan")]
    JetsLagan,
}

impl Dataset {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::JetNet => "jetnet",
            Dataset::JetsLagan => "jets-lagan",
        }
    }
}

impl FromStr for Dataset {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jetnet" => Ok(Dataset::JetNet),
            "jets-lagan" => Ok(Dataset::JetsLagan),
            other => Err(VizError::UnknownName { what: "dataset", value: other.to_string() }),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `num` evenly spaced values over `[start, stop]` (both endpoints included).
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Values `start, start + step, ...` strictly below `stop`.
///
/// Length is `ceil((stop - start) / step)`, as numpy computes it.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil();
    if !n.is_finite() || n <= 0.0 {
        return Vec::new();
    }
    (0..n as usize).map(|i| start + i as f64 * step).collect()
}

/// Strictly increasing histogram bin edges (at least two).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinEdges(Vec<f64>);

impl BinEdges {
    /// Validate explicit edges.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(VizError::InvalidEdges(format!(
                "need at least 2 edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(VizError::InvalidEdges("edges must be finite".into()));
        }
        if let Some(w) = edges.windows(2).find(|w| w[1] <= w[0]) {
            return Err(VizError::InvalidEdges(format!(
                "edges must be strictly increasing ({} then {})",
                w[0], w[1]
            )));
        }
        Ok(Self(edges))
    }

    /// Edges from [`linspace`].
    pub fn linspace(start: f64, stop: f64, num: usize) -> Result<Self> {
        Self::new(linspace(start, stop, num))
    }

    /// Edges from [`arange`].
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self> {
        Self::new(arange(start, stop, step))
    }

    /// Edge values.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of bins (`edges - 1`).
    pub fn n_bins(&self) -> usize {
        self.0.len() - 1
    }

    /// Lowest edge.
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// Highest edge.
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }
}

impl<'de> Deserialize<'de> for BinEdges {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let edges = Vec::<f64>::deserialize(deserializer)?;
        BinEdges::new(edges).map_err(serde::de::Error::custom)
    }
}

/// Axis labels of the three particle features.
pub fn particle_labels(coords: Coords) -> [&'static str; 3] {
    match coords {
        Coords::Cartesian => ["p_{x} (GeV)", "p_{y} (GeV)", "p_{z} (GeV)"],
        Coords::PolarRel => ["η^{rel}", "φ^{rel}", "p_{T}^{rel}"],
        Coords::PolarRelAbsPt => ["η^{rel}", "φ^{rel}", "p_{T} (GeV)"],
    }
}

/// Binning of the three per-particle feature panels.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleFeatureBins {
    /// Feature labels (without the "Particle" prefix).
    pub labels: [String; 3],
    /// Edges per feature.
    pub bins: [BinEdges; 3],
    /// Constant y-axis upper limits, when the preset defines them.
    pub y_limits: Option<[f64; 3]>,
}

fn labels_owned(coords: Coords) -> [String; 3] {
    particle_labels(coords).map(String::from)
}

fn cartesian_bins() -> Result<[BinEdges; 3]> {
    let bin = BinEdges::arange(-500.0, 500.0, 10.0)?;
    Ok([bin.clone(), bin.clone(), bin])
}

/// Relative-coordinate JetNet binning shared by the particle figures.
fn jetnet_polarrel_bins(
    jet_type: JetType,
    num_particles: usize,
) -> Result<([BinEdges; 3], Option<[f64; 3]>)> {
    match jet_type {
        JetType::Gluon | JetType::LightQuark | JetType::W | JetType::Z => {
            if num_particles == 100 {
                Ok((
                    [
                        BinEdges::arange(-0.5, 0.5, 0.005)?,
                        BinEdges::arange(-0.5, 0.5, 0.005)?,
                        BinEdges::arange(0.0, 0.1, 0.001)?,
                    ],
                    None,
                ))
            } else {
                Ok((
                    [
                        BinEdges::linspace(-0.3, 0.3, 100)?,
                        BinEdges::linspace(-0.3, 0.3, 100)?,
                        BinEdges::linspace(0.0, 0.2, 100)?,
                    ],
                    Some([3e5, 3e5, 3e5]),
                ))
            }
        }
        JetType::Top => Ok((
            [
                BinEdges::linspace(-0.5, 0.5, 100)?,
                BinEdges::linspace(-0.5, 0.5, 100)?,
                BinEdges::linspace(0.0, 0.2, 100)?,
            ],
            None,
        )),
    }
}

/// Binning for the particle-feature figure.
pub fn particle_feature_bins(
    jet_type: JetType,
    coords: Coords,
    dataset: Dataset,
    num_particles: usize,
) -> Result<ParticleFeatureBins> {
    let labels = labels_owned(coords);
    let (bins, y_limits) = match (coords, dataset) {
        (Coords::Cartesian, _) => (cartesian_bins()?, None),
        (Coords::PolarRel, Dataset::JetNet) => jetnet_polarrel_bins(jet_type, num_particles)?,
        (Coords::PolarRel, Dataset::JetsLagan) => (
            [
                BinEdges::linspace(-1.25, 1.25, 25 + 1)?,
                BinEdges::linspace(-1.25, 1.25, 25 + 1)?,
                BinEdges::linspace(0.0, 1.0, 51)?,
            ],
            None,
        ),
        (Coords::PolarRelAbsPt, _) => (
            [
                BinEdges::linspace(-0.5, 0.5, 100)?,
                BinEdges::linspace(-0.5, 0.5, 100)?,
                BinEdges::linspace(0.0, 200.0, 100)?,
            ],
            None,
        ),
    };
    Ok(ParticleFeatureBins { labels, bins, y_limits })
}

/// Mass histogram edges shared by the mass panels in relative coordinates.
fn relative_mass_bins(jet_type: JetType) -> Result<BinEdges> {
    if jet_type.wide_mass_range() {
        BinEdges::linspace(0.0, 0.225, 51)
    } else {
        BinEdges::linspace(0.0, 0.12, 51)
    }
}

fn mass_label(coords: Coords) -> Option<&'static str> {
    match coords {
        Coords::PolarRel => Some("Jet m/p_{T}"),
        Coords::PolarRelAbsPt => Some("Jet m (GeV)"),
        Coords::Cartesian => None,
    }
}

/// Binning for the particle-features-plus-jet-mass figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleMassRowBins {
    /// Particle feature panels.
    pub particles: ParticleFeatureBins,
    /// Mass panel x label.
    pub mass_label: String,
    /// Mass panel edges.
    pub mass_bins: BinEdges,
}

/// Binning for the particle-features-plus-jet-mass figure.
///
/// The dataset plays no role here: relative coordinates always use the
/// JetNet presets. Cartesian coordinates have no mass label.
pub fn particle_mass_row_bins(
    jet_type: JetType,
    coords: Coords,
    num_particles: usize,
) -> Result<ParticleMassRowBins> {
    let unsupported = || VizError::UnsupportedBinning {
        figure: "particle+mass",
        coords: coords.to_string(),
        dataset: "any".into(),
        jet_type: jet_type.to_string(),
    };
    let mass_label = mass_label(coords).ok_or_else(unsupported)?;

    let bins = match coords {
        Coords::PolarRel => jetnet_polarrel_bins(jet_type, num_particles)?.0,
        Coords::PolarRelAbsPt => [
            BinEdges::linspace(-0.5, 0.5, 100)?,
            BinEdges::linspace(-0.5, 0.5, 100)?,
            BinEdges::linspace(0.0, 1500.0, 100)?,
        ],
        Coords::Cartesian => return Err(unsupported()),
    };

    Ok(ParticleMassRowBins {
        particles: ParticleFeatureBins { labels: labels_owned(coords), bins, y_limits: None },
        mass_label: mass_label.to_string(),
        mass_bins: relative_mass_bins(jet_type)?,
    })
}

/// Number of EFP panels drawn in the jet-feature figure.
pub const N_EFPS: usize = 5;

/// Binning for the jet-mass-plus-EFP figure.
#[derive(Debug, Clone, PartialEq)]
pub struct JetFeatureBins {
    /// Mass panel x label.
    pub mass_label: String,
    /// Mass panel edges.
    pub mass_bins: BinEdges,
    /// Upper edge of each EFP range.
    pub efp_ranges: [f64; N_EFPS],
    /// `linspace(0, range, 100)` per EFP.
    pub efp_bins: [BinEdges; N_EFPS],
}

/// Binning for the jet-mass-plus-EFP figure.
pub fn jet_feature_bins(jet_type: JetType, coords: Coords) -> Result<JetFeatureBins> {
    let default_ranges = [0.0045, 0.0035, 0.004, 0.002, 0.003];
    let quark_ranges = [0.002, 0.001, 0.001, 0.0005, 0.0005];

    let (efp_ranges, mass_bins) = match coords {
        Coords::PolarRel => {
            let ranges = match jet_type {
                JetType::Gluon => [0.0013, 0.0004, 0.0004, 0.0004, 0.0004],
                JetType::LightQuark => quark_ranges,
                _ => default_ranges,
            };
            (ranges, relative_mass_bins(jet_type)?)
        }
        Coords::PolarRelAbsPt => {
            let ranges = match jet_type {
                JetType::Gluon => [4e10, 1e10, 1e10, 1e10, 1e10],
                JetType::LightQuark => quark_ranges,
                _ => default_ranges,
            };
            let mass_bins = if jet_type.wide_mass_range() {
                BinEdges::linspace(0.0, 500.0, 50)?
            } else {
                BinEdges::linspace(0.0, 0.12, 51)?
            };
            (ranges, mass_bins)
        }
        Coords::Cartesian => {
            return Err(VizError::UnsupportedBinning {
                figure: "jet features",
                coords: coords.to_string(),
                dataset: "any".into(),
                jet_type: jet_type.to_string(),
            });
        }
    };

    let efp_bins = [
        BinEdges::linspace(0.0, efp_ranges[0], 100)?,
        BinEdges::linspace(0.0, efp_ranges[1], 100)?,
        BinEdges::linspace(0.0, efp_ranges[2], 100)?,
        BinEdges::linspace(0.0, efp_ranges[3], 100)?,
        BinEdges::linspace(0.0, efp_ranges[4], 100)?,
    ];

    Ok(JetFeatureBins {
        // Cartesian already returned above.
        mass_label: mass_label(coords).unwrap_or_default().to_string(),
        mass_bins,
        efp_ranges,
        efp_bins,
    })
}

/// Binning for the jet mass / jet p_T figure.
#[derive(Debug, Clone, PartialEq)]
pub struct MassPtBins {
    /// Mass panel x label.
    pub mass_label: String,
    /// p_T panel x label.
    pub pt_label: String,
    /// Mass edges.
    pub mass_bins: BinEdges,
    /// p_T edges.
    pub pt_bins: BinEdges,
}

/// Binning for the jet mass / jet p_T figure.
pub fn jet_mass_pt_bins(coords: Coords) -> Result<MassPtBins> {
    match coords {
        Coords::PolarRel => Ok(MassPtBins {
            mass_label: "Jet m/p_{T}".into(),
            pt_label: "Jet Relative p_{T}".into(),
            mass_bins: BinEdges::linspace(0.0, 0.225, 101)?,
            pt_bins: BinEdges::linspace(0.5, 1.2, 101)?,
        }),
        Coords::PolarRelAbsPt => Ok(MassPtBins {
            mass_label: "Jet m (GeV)".into(),
            pt_label: "Jet p_{T} (GeV)".into(),
            mass_bins: BinEdges::linspace(0.0, 500.0, 101)?,
            pt_bins: BinEdges::linspace(0.0, 4000.0, 101)?,
        }),
        Coords::Cartesian => Err(VizError::UnsupportedBinning {
            figure: "jet mass/pT",
            coords: coords.to_string(),
            dataset: "any".into(),
            jet_type: "any".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linspace_endpoints() {
        let v = linspace(-0.3, 0.3, 100);
        assert_eq!(v.len(), 100);
        assert_abs_diff_eq!(v[0], -0.3);
        assert_abs_diff_eq!(v[99], 0.3);
        assert_abs_diff_eq!(v[1] - v[0], 0.6 / 99.0, epsilon = 1e-12);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn arange_is_half_open() {
        let v = arange(-500.0, 500.0, 10.0);
        assert_eq!(v.len(), 100);
        assert_abs_diff_eq!(v[0], -500.0);
        assert_abs_diff_eq!(v[99], 490.0);
        assert_eq!(arange(-0.5, 0.5, 0.005).len(), 200);
        assert_eq!(arange(0.0, 0.1, 0.001).len(), 100);
        assert!(arange(1.0, 0.0, 0.5).is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn bin_edges_validation() {
        assert!(BinEdges::new(vec![0.0]).is_err());
        assert!(BinEdges::new(vec![0.0, 0.0]).is_err());
        assert!(BinEdges::new(vec![0.0, f64::NAN]).is_err());
        let e = BinEdges::new(vec![0.0, 1.0, 3.0]).unwrap();
        assert_eq!(e.n_bins(), 2);
        assert_eq!(e.first(), 0.0);
        assert_eq!(e.last(), 3.0);
    }

    #[test]
    fn bin_edges_deserialize_validates() {
        let ok: BinEdges = serde_json::from_str("[0.0, 0.5, 1.0]").unwrap();
        assert_eq!(ok.n_bins(), 2);
        assert!(serde_json::from_str::<BinEdges>("[1.0, 0.5]").is_err());
    }

    #[test]
    fn names_parse() {
        assert_eq!("g".parse::<JetType>().unwrap(), JetType::Gluon);
        assert_eq!("z".parse::<JetType>().unwrap(), JetType::Z);
        assert!("b".parse::<JetType>().is_err());
        assert_eq!("polarrelabspt".parse::<Coords>().unwrap(), Coords::PolarRelAbsPt);
        assert_eq!("jets-lagan".parse::<Dataset>().unwrap(), Dataset::JetsLagan);
        assert!("cylindrical".parse::<Coords>().is_err());
    }

    #[test]
    fn jetnet_30_particles_has_constant_ylims() {
        let b =
            particle_feature_bins(JetType::Gluon, Coords::PolarRel, Dataset::JetNet, 30).unwrap();
        assert_eq!(b.y_limits, Some([3e5, 3e5, 3e5]));
        assert_eq!(b.bins[0].as_slice().len(), 100);
        assert_abs_diff_eq!(b.bins[0].first(), -0.3);
        assert_abs_diff_eq!(b.bins[2].last(), 0.2);
        assert_eq!(b.labels[2], "p_{T}^{rel}");
    }

    #[test]
    fn jetnet_100_particles_uses_fine_arange() {
        let b = particle_feature_bins(JetType::W, Coords::PolarRel, Dataset::JetNet, 100).unwrap();
        assert_eq!(b.y_limits, None);
        assert_eq!(b.bins[0].n_bins(), 199);
        assert_abs_diff_eq!(b.bins[2].first(), 0.0);
        assert_abs_diff_eq!(b.bins[2].last(), 0.099, epsilon = 1e-12);
    }

    #[test]
    fn top_jets_use_wider_eta_phi() {
        let b = particle_feature_bins(JetType::Top, Coords::PolarRel, Dataset::JetNet, 30).unwrap();
        assert_abs_diff_eq!(b.bins[1].first(), -0.5);
        assert_eq!(b.y_limits, None);
    }

    #[test]
    fn lagan_and_cartesian_presets() {
        let b =
            particle_feature_bins(JetType::Top, Coords::PolarRel, Dataset::JetsLagan, 30).unwrap();
        assert_eq!(b.bins[0].as_slice().len(), 26);
        assert_eq!(b.bins[2].as_slice().len(), 51);

        let c = particle_feature_bins(JetType::Z, Coords::Cartesian, Dataset::JetNet, 30).unwrap();
        assert_eq!(c.bins[1].n_bins(), 99);
        assert_eq!(c.labels[0], "p_{x} (GeV)");
    }

    #[test]
    fn mass_row_uses_abs_pt_range_and_mass_label() {
        let b = particle_mass_row_bins(JetType::Gluon, Coords::PolarRelAbsPt, 30).unwrap();
        assert_abs_diff_eq!(b.particles.bins[2].last(), 1500.0);
        assert_eq!(b.mass_label, "Jet m (GeV)");
        assert_abs_diff_eq!(b.mass_bins.last(), 0.225);

        let w = particle_mass_row_bins(JetType::W, Coords::PolarRel, 30).unwrap();
        assert_abs_diff_eq!(w.mass_bins.last(), 0.12);
        assert_eq!(w.mass_bins.n_bins(), 50);

        assert!(matches!(
            particle_mass_row_bins(JetType::Gluon, Coords::Cartesian, 30),
            Err(VizError::UnsupportedBinning { .. })
        ));
    }

    #[test]
    fn efp_ranges_per_jet_type() {
        let g = jet_feature_bins(JetType::Gluon, Coords::PolarRel).unwrap();
        assert_abs_diff_eq!(g.efp_bins[0].last(), 0.0013);
        assert_eq!(g.efp_bins[4].as_slice().len(), 100);

        let t = jet_feature_bins(JetType::Top, Coords::PolarRelAbsPt).unwrap();
        assert_eq!(t.efp_ranges, [0.0045, 0.0035, 0.004, 0.002, 0.003]);
        assert_abs_diff_eq!(t.mass_bins.last(), 500.0);
        assert_eq!(t.mass_bins.as_slice().len(), 50);

        let z = jet_feature_bins(JetType::Z, Coords::PolarRelAbsPt).unwrap();
        assert_abs_diff_eq!(z.mass_bins.last(), 0.12);

        assert!(jet_feature_bins(JetType::Gluon, Coords::Cartesian).is_err());
    }

    #[test]
    fn mass_pt_presets() {
        let r = jet_mass_pt_bins(Coords::PolarRel).unwrap();
        assert_abs_diff_eq!(r.pt_bins.first(), 0.5);
        assert_eq!(r.pt_bins.as_slice().len(), 101);
        let a = jet_mass_pt_bins(Coords::PolarRelAbsPt).unwrap();
        assert_abs_diff_eq!(a.pt_bins.last(), 4000.0);
        assert!(jet_mass_pt_bins(Coords::Cartesian).is_err());
    }
}

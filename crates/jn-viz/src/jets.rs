//! Dense jet / particle arrays.
//!
//! Jets are stored zero-padded to a fixed particle multiplicity. A
//! [`ParticleMask`] marks the particles that actually exist; without one,
//! every padded slot is treated as a particle.

use serde::Deserialize;

use crate::error::{Result, VizError};

/// Row-major `[n_jets, n_particles, n_features]` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Vec<Vec<f64>>>")]
pub struct JetArray {
    data: Vec<f64>,
    n_jets: usize,
    n_particles: usize,
    n_features: usize,
}

impl JetArray {
    /// Wrap a flat buffer.
    pub fn new(
        data: Vec<f64>,
        n_jets: usize,
        n_particles: usize,
        n_features: usize,
    ) -> Result<Self> {
        let expected = n_jets * n_particles * n_features;
        if data.len() != expected {
            return Err(VizError::Shape(format!(
                "jet buffer has {} values, expected {n_jets}x{n_particles}x{n_features} = {expected}",
                data.len()
            )));
        }
        Ok(Self { data, n_jets, n_particles, n_features })
    }

    /// Build from nested `jets[particles[features]]` rows.
    pub fn from_nested(jets: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        let n_jets = jets.len();
        let n_particles = jets.first().map_or(0, Vec::len);
        let n_features = jets.first().and_then(|j| j.first()).map_or(0, Vec::len);

        let mut data = Vec::with_capacity(n_jets * n_particles * n_features);
        for (j, jet) in jets.into_iter().enumerate() {
            if jet.len() != n_particles {
                return Err(VizError::Shape(format!(
                    "jet {j} has {} particles, expected {n_particles}",
                    jet.len()
                )));
            }
            for (p, particle) in jet.into_iter().enumerate() {
                if particle.len() != n_features {
                    return Err(VizError::Shape(format!(
                        "jet {j} particle {p} has {} features, expected {n_features}",
                        particle.len()
                    )));
                }
                data.extend(particle);
            }
        }
        Self::new(data, n_jets, n_particles, n_features)
    }

    /// Number of jets.
    pub fn n_jets(&self) -> usize {
        self.n_jets
    }

    /// Padded particle multiplicity per jet.
    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    /// Features per particle.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Features of one particle, `None` when either index is out of range.
    pub fn particle(&self, jet: usize, particle: usize) -> Option<&[f64]> {
        if jet >= self.n_jets || particle >= self.n_particles {
            return None;
        }
        let start = (jet * self.n_particles + particle) * self.n_features;
        self.data.get(start..start + self.n_features)
    }

    /// Flatten to a particle table, keeping only masked-in particles when a
    /// mask is given.
    pub fn particles(&self, mask: Option<&ParticleMask>) -> Result<ParticleTable> {
        let Some(mask) = mask else {
            return Ok(ParticleTable { data: self.data.clone(), n_features: self.n_features });
        };
        if mask.n_jets != self.n_jets || mask.n_particles != self.n_particles {
            return Err(VizError::Shape(format!(
                "mask shape {}x{} does not match jets {}x{}",
                mask.n_jets, mask.n_particles, self.n_jets, self.n_particles
            )));
        }
        let mut data = Vec::with_capacity(mask.count() * self.n_features);
        for (slot, &keep) in mask.data.iter().enumerate() {
            if keep {
                let start = slot * self.n_features;
                data.extend_from_slice(&self.data[start..start + self.n_features]);
            }
        }
        Ok(ParticleTable { data, n_features: self.n_features })
    }
}

impl TryFrom<Vec<Vec<Vec<f64>>>> for JetArray {
    type Error = VizError;

    fn try_from(value: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        Self::from_nested(value)
    }
}

/// Row-major `[n_jets, n_particles]` particle-validity mask.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>")]
pub struct ParticleMask {
    data: Vec<bool>,
    n_jets: usize,
    n_particles: usize,
}

impl ParticleMask {
    /// Wrap a flat `[n_jets * n_particles]` buffer.
    pub fn new(data: Vec<bool>, n_jets: usize, n_particles: usize) -> Result<Self> {
        if data.len() != n_jets * n_particles {
            return Err(VizError::Shape(format!(
                "mask has {} values, expected {n_jets}x{n_particles}",
                data.len()
            )));
        }
        Ok(Self { data, n_jets, n_particles })
    }

    /// Mask of particles whose feature `feature` is non-zero, the usual way
    /// padding is detected in zero-padded jets.
    pub fn from_nonzero(jets: &JetArray, feature: usize) -> Result<Self> {
        if feature >= jets.n_features {
            return Err(VizError::Shape(format!(
                "feature {feature} out of range for {} features",
                jets.n_features
            )));
        }
        let data = jets.data.chunks_exact(jets.n_features).map(|p| p[feature] != 0.0).collect();
        Self::new(data, jets.n_jets, jets.n_particles)
    }

    /// Number of masked-in particles.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }
}

impl TryFrom<Vec<Vec<bool>>> for ParticleMask {
    type Error = VizError;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self> {
        let n_jets = rows.len();
        let n_particles = rows.first().map_or(0, Vec::len);
        if let Some((j, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_particles) {
            return Err(VizError::Shape(format!(
                "mask row {j} has {} entries, expected {n_particles}",
                row.len()
            )));
        }
        Self::new(rows.into_iter().flatten().collect(), n_jets, n_particles)
    }
}

/// Particles flattened across jets: `[n_kept, n_features]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleTable {
    data: Vec<f64>,
    n_features: usize,
}

impl ParticleTable {
    /// Number of kept particles.
    pub fn len(&self) -> usize {
        if self.n_features == 0 { 0 } else { self.data.len() / self.n_features }
    }

    /// True when no particle was kept.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Features per particle.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// One feature across all particles.
    pub fn column(&self, feature: usize) -> Result<Vec<f64>> {
        column_of(&self.data, self.n_features, feature)
    }
}

/// Row-major `[n_rows, n_cols]` matrix of per-jet features (e.g. EFPs).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>")]
pub struct FeatureMatrix {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl FeatureMatrix {
    /// Wrap a flat row-major buffer.
    pub fn new(data: Vec<f64>, n_rows: usize, n_cols: usize) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(VizError::Shape(format!(
                "matrix buffer has {} values, expected {n_rows}x{n_cols}",
                data.len()
            )));
        }
        Ok(Self { data, n_rows, n_cols })
    }

    /// Number of rows (jets).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (features).
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// One column across all rows.
    pub fn column(&self, col: usize) -> Result<Vec<f64>> {
        column_of(&self.data, self.n_cols, col)
    }
}

impl TryFrom<Vec<Vec<f64>>> for FeatureMatrix {
    type Error = VizError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(VizError::Shape(format!(
                "row {i} has {} columns, expected {n_cols}",
                row.len()
            )));
        }
        Self::new(rows.into_iter().flatten().collect(), n_rows, n_cols)
    }
}

fn column_of(data: &[f64], width: usize, col: usize) -> Result<Vec<f64>> {
    if col >= width {
        return Err(VizError::Shape(format!("column {col} out of range for width {width}")));
    }
    Ok(data.chunks_exact(width).map(|row| row[col]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_jets() -> JetArray {
        // 2 jets x 2 particles x 3 features; second particle of jet 1 is padding.
        JetArray::from_nested(vec![
            vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]],
            vec![vec![-0.1, -0.2, 0.7], vec![0.0, 0.0, 0.0]],
        ])
        .unwrap()
    }

    #[test]
    fn unmasked_keeps_padding() {
        let jets = two_jets();
        let t = jets.particles(None).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.column(2).unwrap(), vec![0.3, 0.6, 0.7, 0.0]);
    }

    #[test]
    fn mask_drops_padding() {
        let jets = two_jets();
        let mask = ParticleMask::from_nonzero(&jets, 2).unwrap();
        assert_eq!(mask.count(), 3);
        let t = jets.particles(Some(&mask)).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.column(0).unwrap(), vec![0.1, 0.4, -0.1]);
    }

    #[test]
    fn mask_shape_mismatch() {
        let jets = two_jets();
        let mask = ParticleMask::new(vec![true; 3], 1, 3).unwrap();
        assert!(matches!(jets.particles(Some(&mask)), Err(VizError::Shape(_))));
    }

    #[test]
    fn ragged_input_rejected() {
        let err = JetArray::from_nested(vec![vec![vec![1.0, 2.0]], vec![vec![1.0]]]);
        assert!(err.is_err());
        assert!(JetArray::new(vec![0.0; 5], 1, 2, 3).is_err());
    }

    #[test]
    fn particle_accessor() {
        let jets = two_jets();
        assert_eq!(jets.particle(1, 0), Some(&[-0.1, -0.2, 0.7][..]));
        assert_eq!(jets.particle(jets.n_jets(), 0), None);
        assert_eq!(jets.particle(0, jets.n_particles()), None);
    }

    #[test]
    fn feature_matrix_columns() {
        let m: FeatureMatrix = serde_json::from_str("[[1, 2], [3, 4], [5, 6]]").unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.column(1).unwrap(), vec![2.0, 4.0, 6.0]);
        assert!(m.column(2).is_err());
    }

    #[test]
    fn deserialize_jets_and_mask() {
        let jets: JetArray = serde_json::from_str("[[[1, 2, 3]], [[4, 5, 6]]]").unwrap();
        assert_eq!((jets.n_jets(), jets.n_particles(), jets.n_features()), (2, 1, 3));
        let mask: ParticleMask = serde_json::from_str("[[true], [false]]").unwrap();
        assert_eq!(jets.particles(Some(&mask)).unwrap().len(), 1);
    }
}

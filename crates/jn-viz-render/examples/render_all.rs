//! Render every comparison figure from synthetic jets.
//!
//! ```text
//! cargo run -p jn-viz-render --example render_all -- [out_dir] [config.yaml]
//! ```

use std::path::PathBuf;

use jn_viz::{Coords, FeatureMatrix, JetArray, JetType, MetricHistory, ParticleMask};
use jn_viz_render::{
    FeatureOptions, ParticleSample, SaveTarget, plot_eval, plot_jet_feats, plot_jet_mass_pt,
    plot_losses, plot_part_feats, plot_part_feats_jet_mass, resolve_config,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

const N_JETS: usize = 5000;
const N_PARTICLES: usize = 30;
const EPOCHS: usize = 50;
const SAVE_EPOCHS: usize = 5;

/// Jets with `n_real` particles each, the rest zero-padded.
fn synth_jets(rng: &mut StdRng, spread: f64, n_real: usize) -> JetArray {
    let angle = Normal::new(0.0, spread).unwrap();
    let pt = Normal::new(0.03, 0.02).unwrap();
    let mut data = Vec::with_capacity(N_JETS * N_PARTICLES * 3);
    for _ in 0..N_JETS {
        for p in 0..N_PARTICLES {
            if p < n_real {
                let pt_rel: f64 = pt.sample(rng);
                data.extend([angle.sample(rng), angle.sample(rng), pt_rel.abs()]);
            } else {
                data.extend([0.0; 3]);
            }
        }
    }
    JetArray::new(data, N_JETS, N_PARTICLES, 3).unwrap()
}

fn synth(rng: &mut StdRng, mean: f64, std: f64, n: usize) -> Vec<f64> {
    let dist = Normal::new(mean, std).unwrap();
    (0..n).map(|_| dist.sample(rng).abs()).collect()
}

fn synth_efps(rng: &mut StdRng, scale: f64) -> FeatureMatrix {
    let dist = Normal::new(0.0, scale).unwrap();
    let data = (0..N_JETS * 5).map(|_| f64::abs(dist.sample(rng))).collect();
    FeatureMatrix::new(data, N_JETS, 5).unwrap()
}

/// Per-checkpoint means with stds at 10% of the mean, laid out as `[means.., stds..]`.
fn w1_rows(n: usize, starts: &[f64]) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| {
            let means: Vec<f64> = starts.iter().map(|s| decay(*s, i)).collect();
            let stds: Vec<f64> = means.iter().map(|m| m * 0.1).collect();
            [means, stds].concat()
        })
        .collect()
}

fn decay(start: f64, i: usize) -> f64 {
    start * (-(i as f64) / 4.0).exp()
}

/// A decaying training history with `EPOCHS / SAVE_EPOCHS + 1` checkpoints.
fn synth_history() -> MetricHistory {
    let n = EPOCHS / SAVE_EPOCHS + 1;
    let mut h = MetricHistory::new();
    for (key, start) in [("Dr", 0.7), ("Df", 0.6), ("G", 1.5), ("gp", 0.2)] {
        let losses = (0..EPOCHS).map(|e| start * (1.0 + (-(e as f64) / 10.0).exp())).collect();
        h.insert_scalar(key, losses);
    }
    h.insert_vector("w1p", w1_rows(n, &[1e-2, 2e-2, 5e-3]));
    h.insert_vector("w1m", w1_rows(n, &[2e-2]));
    h.insert_vector("w1efp", w1_rows(n, &[1e-4, 2e-4, 3e-4, 4e-4, 5e-4]));
    h.insert_scalar("mmd", (0..n).map(|i| decay(0.05, i)).collect());
    h.insert_scalar("coverage", (0..n).map(|i| 0.8 - decay(0.5, i)).collect());
    h.insert_scalar("fpnd", (0..n).map(|i| decay(80.0, i)).collect());
    h
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "figs".into()));
    let yaml = args.next().map(std::fs::read_to_string).transpose()?;
    let config = resolve_config(yaml.as_deref())?;

    let mut rng = StdRng::seed_from_u64(42);
    let real = synth_jets(&mut rng, 0.08, 20);
    let generated = synth_jets(&mut rng, 0.09, 20);
    let real_mask = ParticleMask::from_nonzero(&real, 2)?;
    let gen_mask = ParticleMask::from_nonzero(&generated, 2)?;
    let real_masses = synth(&mut rng, 0.1, 0.04, N_JETS);
    let gen_masses = synth(&mut rng, 0.11, 0.04, N_JETS);
    let real_pts = synth(&mut rng, 0.9, 0.08, N_JETS);
    let gen_pts = synth(&mut rng, 0.88, 0.09, N_JETS);
    let real_efps = synth_efps(&mut rng, 0.0008);
    let gen_efps = synth_efps(&mut rng, 0.0009);
    let history = synth_history();

    let save = |name: &str| SaveTarget::new(&out_dir, name);
    let opts = |name: &str| FeatureOptions {
        coords: Coords::PolarRel,
        losses: Some(&history),
        const_ylim: true,
        save: save(name),
        ..Default::default()
    };

    plot_part_feats(
        JetType::Gluon,
        ParticleSample::masked(&real, &real_mask),
        ParticleSample::masked(&generated, &gen_mask),
        &opts("part_feats"),
        &config,
    )?;
    plot_part_feats_jet_mass(
        JetType::Gluon,
        ParticleSample::masked(&real, &real_mask),
        ParticleSample::masked(&generated, &gen_mask),
        &real_masses,
        &gen_masses,
        &opts("part_feats_jet_mass"),
        &config,
    )?;
    plot_jet_feats(
        JetType::Top,
        &real_masses,
        &gen_masses,
        &real_efps,
        &gen_efps,
        &opts("jet_feats"),
        &config,
    )?;
    plot_jet_mass_pt(&real_masses, &gen_masses, &real_pts, &gen_pts, &opts("mass_pt"), &config)?;
    plot_losses(&history, "og", &save("losses"), &config)?;
    plot_eval(&history, EPOCHS, SAVE_EPOCHS, Coords::PolarRel, &save("eval"), &config)?;

    tracing::info!(dir = %out_dir.display(), "all figures rendered");
    Ok(())
}

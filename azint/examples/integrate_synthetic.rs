//! Example: integrate a synthetic powder pattern
//!
//! Builds a 512×512 detector with three Debye–Scherrer rings on a decaying
//! background, masks a beam stop, and writes the 1D profile and 2D map.
//! An optional YAML/JSON settings file (see [`azint::EngineConfig`]) may be
//! passed as the first argument.
//!
//! Output:
//! ```text
//! test_output/azint/profile.json
//! test_output/azint/map.yaml
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --example integrate_synthetic -- [settings.yaml]
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use azint::{histogram1d, histogram2d, Corrections, EngineConfig, ErrorModel};

const SIZE: usize = 512;
const RING_RADII: [f64; 3] = [60.0, 115.0, 190.0];
const BEAM_STOP_RADIUS: f64 = 12.0;

fn main() -> anyhow::Result<()> {
    let _logger = common::setup_logging("integrate_synthetic", "info");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => EngineConfig {
            npt_radial: 400,
            npt_azimuthal: Some(72),
            error_model: ErrorModel::Poisson,
            azimuth_range: Some([-180.0, 180.0]),
            empty: Some(-1.0),
            ..Default::default()
        },
    };
    log::info!("Settings: {config:?}");

    let mut rng = StdRng::seed_from_u64(2024);
    let center = SIZE as f64 / 2.0;
    let n = SIZE * SIZE;
    let mut radial = Vec::with_capacity(n);
    let mut azimuthal = Vec::with_capacity(n);
    let mut raw = Vec::with_capacity(n);
    let mut mask = Vec::with_capacity(n);

    for y in 0..SIZE {
        for x in 0..SIZE {
            let dx = x as f64 + 0.5 - center;
            let dy = y as f64 + 0.5 - center;
            let r = (dx * dx + dy * dy).sqrt();
            let rings: f64 = RING_RADII
                .iter()
                .map(|&r0| 500.0 * (-(r - r0).powi(2) / 8.0).exp())
                .sum();
            let background = 200.0 * (-r / 150.0).exp();

            radial.push(r);
            azimuthal.push(dy.atan2(dx).to_degrees());
            raw.push((background + rings + rng.random_range(-5.0..5.0)).max(0.0));
            mask.push(r < BEAM_STOP_RADIUS);
        }
    }

    let corrections = Corrections::default().with_mask(&mask);
    let output_dir = PathBuf::from("test_output/azint");
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let start = Instant::now();
    let profile = histogram1d(&radial, &raw, &corrections, &config.to_1d())?;
    log::info!(
        "1D profile: {} bins in {:.1?}",
        profile.len(),
        start.elapsed()
    );

    let peak = profile
        .intensity
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| profile.positions[i]);
    if let Some(peak) = peak {
        log::info!("Strongest ring at r = {peak:.2}");
    }
    common::save_to_file(&profile, output_dir.join("profile.json"))?;

    let start = Instant::now();
    let map = histogram2d(&radial, &azimuthal, &raw, &corrections, &config.to_2d())?;
    let (n_radial, n_azimuthal) = map.shape();
    log::info!(
        "2D map: {n_radial}x{n_azimuthal} cells in {:.1?}",
        start.elapsed()
    );
    common::save_to_file(&map, output_dir.join("map.yaml"))?;

    log::info!("Results written to {}", output_dir.display());
    Ok(())
}

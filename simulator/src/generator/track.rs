use anyhow::ensure;
use pennycore::geo::LAT_DEGREE_TO_KM;
use pennycore::LocationFix;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Parameters for a synthetic random-walk track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub steps: usize,
    pub step_km: f64,
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            start_latitude: 47.349586,
            start_longitude: 8.491197,
            steps: 50,
            step_km: 0.5,
            seed: 0,
        }
    }
}

/// Builds a seeded random walk. The first fix is the start point.
pub fn build_walk(config: &WalkConfig) -> anyhow::Result<Vec<LocationFix>> {
    ensure!(config.step_km >= 0.0, "walk step must not be negative");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut current = LocationFix::new(config.start_latitude, config.start_longitude);
    let mut fixes = Vec::with_capacity(config.steps);

    for _ in 0..config.steps {
        fixes.push(current);
        let bearing = rng.gen_range(0.0..2.0 * PI);
        let d_lat = config.step_km * bearing.cos() / LAT_DEGREE_TO_KM;
        let d_lon = config.step_km * bearing.sin()
            / (LAT_DEGREE_TO_KM * current.latitude.to_radians().cos());
        current = LocationFix::new(current.latitude + d_lat, current.longitude + d_lon);
    }

    Ok(fixes)
}

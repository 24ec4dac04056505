use crate::generator::track::{build_walk, WalkConfig};
use anyhow::Context;
use pennycore::prelude::DEFAULT_SEARCH_RADIUS_KM;
use pennycore::settings::SharedSettings;
use pennycore::LocationFix;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub catalog: Option<PathBuf>,
    pub search_radius_km: f64,
    pub notifications_enabled: bool,
    pub track: Vec<LocationFix>,
    pub walk: Option<WalkConfig>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            notifications_enabled: true,
            track: Vec::new(),
            walk: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(catalog: Option<PathBuf>, search_radius_km: f64) -> Self {
        Self {
            catalog,
            search_radius_km,
            ..Default::default()
        }
    }

    pub fn to_settings(&self) -> SharedSettings {
        SharedSettings::new(self.search_radius_km, self.notifications_enabled)
    }

    /// Explicit track wins; otherwise the walk generator (default parameters
    /// when none are configured).
    pub fn resolve_track(&self) -> anyhow::Result<Vec<LocationFix>> {
        if !self.track.is_empty() {
            return Ok(self.track.clone());
        }
        let walk = self.walk.clone().unwrap_or_default();
        build_walk(&walk).context("generating random-walk track")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pennycore::SettingsSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_settings() {
        let cfg = WorkflowConfig::from_args(None, 7.5);
        let settings = cfg.to_settings();
        assert_eq!(settings.search_radius_km(), 7.5);
        assert!(settings.notifications_enabled());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"catalog: data/all_locations.json\nsearch_radius_km: 5.0\ntrack:\n  - latitude: 47.0\n    longitude: 8.0\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.search_radius_km, 5.0);
        assert!(cfg.notifications_enabled);
        assert_eq!(cfg.catalog, Some(PathBuf::from("data/all_locations.json")));
        assert_eq!(cfg.resolve_track().unwrap(), vec![LocationFix::new(47.0, 8.0)]);
    }

    #[test]
    fn empty_track_falls_back_to_walk() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"walk:\n  steps: 4\n  seed: 3\n").unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.search_radius_km, DEFAULT_SEARCH_RADIUS_KM);
        assert_eq!(cfg.resolve_track().unwrap().len(), 4);
    }
}

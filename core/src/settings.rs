use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::prelude::{SettingsSource, DEFAULT_SEARCH_RADIUS_KM};

/// Point-in-time copy of the user-facing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub search_radius_km: f64,
    pub notifications_enabled: bool,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            notifications_enabled: true,
        }
    }
}

/// Fixed settings, handy for offline runs.
#[derive(Debug, Clone, Copy)]
pub struct StaticSettings {
    snapshot: SettingsSnapshot,
}

impl StaticSettings {
    pub fn new(search_radius_km: f64) -> Self {
        Self {
            snapshot: SettingsSnapshot {
                search_radius_km,
                notifications_enabled: true,
            },
        }
    }
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_RADIUS_KM)
    }
}

impl SettingsSource for StaticSettings {
    fn search_radius_km(&self) -> f64 {
        self.snapshot.search_radius_km
    }

    fn notifications_enabled(&self) -> bool {
        self.snapshot.notifications_enabled
    }
}

/// Settings that can be changed while the engine is running.
pub struct SharedSettings {
    inner: RwLock<SettingsSnapshot>,
}

impl SharedSettings {
    pub fn new(search_radius_km: f64, notifications_enabled: bool) -> Self {
        Self {
            inner: RwLock::new(SettingsSnapshot {
                search_radius_km,
                notifications_enabled,
            }),
        }
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        self.inner
            .read()
            .map(|guard| *guard)
            .unwrap_or_default()
    }

    pub fn set_search_radius_km(&self, search_radius_km: f64) {
        if let Ok(mut guard) = self.inner.write() {
            guard.search_radius_km = search_radius_km;
        }
    }

    pub fn set_notifications_enabled(&self, enabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.notifications_enabled = enabled;
        }
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        let defaults = SettingsSnapshot::default();
        Self::new(defaults.search_radius_km, defaults.notifications_enabled)
    }
}

impl SettingsSource for SharedSettings {
    fn search_radius_km(&self) -> f64 {
        self.snapshot().search_radius_km
    }

    fn notifications_enabled(&self) -> bool {
        self.snapshot().notifications_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app_defaults() {
        let settings = StaticSettings::default();
        assert_eq!(settings.search_radius_km(), 20.0);
        assert!(settings.notifications_enabled());
    }

    #[test]
    fn shared_settings_apply_updates() {
        let settings = SharedSettings::default();
        settings.set_search_radius_km(5.0);
        settings.set_notifications_enabled(false);
        let snapshot = settings.snapshot();
        assert_eq!(snapshot.search_radius_km, 5.0);
        assert!(!snapshot.notifications_enabled);
    }
}

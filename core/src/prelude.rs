use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Default search radius handed out by settings sources, in kilometers.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 20.0;

/// Device position at the moment of a location update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Receives user-facing notification text. Delivery (OS alert, console,
/// HTTP client) is entirely up to the implementor.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, message: &str);
}

/// Runtime-configurable values the engine reads fresh on every update.
pub trait SettingsSource: Send + Sync {
    fn search_radius_km(&self) -> f64;

    /// When disabled, drivers skip evaluation and leave engine state alone.
    fn notifications_enabled(&self) -> bool {
        true
    }
}

/// Pull-based stream of fixes. Cadence is owned by the source.
pub trait LocationSource {
    fn next_fix(&mut self) -> Option<LocationFix>;
}

impl<I> LocationSource for I
where
    I: Iterator<Item = LocationFix>,
{
    fn next_fix(&mut self) -> Option<LocationFix> {
        self.next()
    }
}

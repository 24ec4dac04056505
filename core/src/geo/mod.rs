pub mod bounds;
pub mod haversine;
pub mod search;

use serde::{Deserialize, Serialize};

pub use bounds::{BoundingBox, LAT_DEGREE_TO_KM};
pub use haversine::{haversine_km, EARTH_RADIUS_M};
pub use search::first_index_at_or_above;

/// Latitude/longitude pair in degrees. No datum handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

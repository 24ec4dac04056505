use super::Coordinate;

/// Kilometers per degree of latitude used for the rectangular prune.
pub const LAT_DEGREE_TO_KM: f64 = 110.948;

/// Degree-space rectangle around a center, used to narrow the candidate scan
/// before exact distance checks. It is not a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Near the poles `cos(lat)` approaches zero and the longitude span grows
    /// without bound, which admits every longitude. Antimeridian wrap is not
    /// handled.
    pub fn around(center: Coordinate, radius_km: f64) -> Self {
        let lat_delta = radius_km / LAT_DEGREE_TO_KM;
        let lon_delta = radius_km / (LAT_DEGREE_TO_KM * center.latitude.to_radians().cos());

        Self {
            min_lat: center.latitude - lat_delta,
            max_lat: center.latitude + lat_delta,
            min_lon: center.longitude - lon_delta,
            max_lon: center.longitude + lon_delta,
        }
    }

    /// Strict on both sides.
    pub fn spans_longitude(&self, longitude: f64) -> bool {
        self.min_lon < longitude && longitude < self.max_lon
    }

    pub fn is_past(&self, latitude: f64) -> bool {
        latitude > self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_at_equator_is_square_in_degrees() {
        let bounds = BoundingBox::around(Coordinate::new(0.0, 0.0), LAT_DEGREE_TO_KM);
        assert!((bounds.max_lat - 1.0).abs() < 1e-12);
        assert!((bounds.min_lat + 1.0).abs() < 1e-12);
        assert!((bounds.max_lon - 1.0).abs() < 1e-12);
        assert!((bounds.min_lon + 1.0).abs() < 1e-12);
    }

    #[test]
    fn longitude_span_widens_with_latitude() {
        let low = BoundingBox::around(Coordinate::new(10.0, 8.0), 20.0);
        let high = BoundingBox::around(Coordinate::new(60.0, 8.0), 20.0);
        assert!(high.max_lon - high.min_lon > low.max_lon - low.min_lon);
        assert!(((high.max_lat - high.min_lat) - (low.max_lat - low.min_lat)).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_admits_nothing() {
        let bounds = BoundingBox::around(Coordinate::new(47.0, 8.0), 0.0);
        assert!(!bounds.spans_longitude(8.0));
    }

    #[test]
    fn pole_admits_every_longitude() {
        let bounds = BoundingBox::around(Coordinate::new(90.0, 0.0), 5.0);
        assert!(bounds.spans_longitude(179.0));
        assert!(bounds.spans_longitude(-179.0));
    }
}

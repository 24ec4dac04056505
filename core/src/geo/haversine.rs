use super::Coordinate;

/// Mean Earth radius used for exact distance checks, in meters.
///
/// Deliberately not the same figure as [`super::LAT_DEGREE_TO_KM`]; the
/// bounding-box prune and the distance check use separate approximations.
pub const EARTH_RADIUS_M: f64 = 6_367_444.7;

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat_from = from.latitude.to_radians();
    let lat_to = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat + lat_from.cos() * lat_to.cos() * half_lon * half_lon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c / 1000.0
}

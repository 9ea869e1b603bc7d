//! Reference-frame conversions and WGS-84/great-circle geodesy.
//!
//! The GMST model here deliberately sacrifices absolute astronomical
//! alignment (`GMST = omega_earth * sim_time`, zero at `sim_time = 0`)
//! in exchange for bit-identical MC determinism across replays — every
//! entity shares the same clock, so relative geometry is unaffected.

use mc_core::constants::{EARTH_RADIUS, EARTH_RADIUS_MEAN, OMEGA_EARTH, WGS84_E2};
use mc_core::vector::Vec3;

/// Geodetic (lat/lon/alt, degrees/metres) to ECEF metres, WGS-84 ellipsoid.
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Vec3 {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let sin_lat = lat.sin();
    let n = EARTH_RADIUS / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let x = (n + alt_m) * lat.cos() * lon.cos();
    let y = (n + alt_m) * lat.cos() * lon.sin();
    let z = (n * (1.0 - WGS84_E2) + alt_m) * sin_lat;
    Vec3::new(x, y, z)
}

/// ECEF metres back to geodetic lat/lon (degrees) and altitude (metres
/// above the mean sphere — a deliberate simplification, since the
/// sensor and replay paths only need approximate altitude for
/// elevation-angle and range bookkeeping, not survey-grade geodesy).
pub fn ecef_to_geodetic_approx(ecef: Vec3) -> (f64, f64, f64) {
    let r = ecef.length();
    let lat = (ecef.z / r.max(1e-9)).asin().to_degrees();
    let lon = ecef.y.atan2(ecef.x).to_degrees();
    let alt = r - EARTH_RADIUS_MEAN;
    (lat, lon, alt)
}

/// Rotate an ECI position into ECEF using the simplified GMST model:
/// `GMST = omega_earth * sim_time`, zero at `sim_time = 0`.
pub fn eci_to_ecef(eci: Vec3, sim_time: f64) -> Vec3 {
    let gmst = OMEGA_EARTH * sim_time;
    let (s, c) = gmst.sin_cos();
    Vec3::new(c * eci.x + s * eci.y, -s * eci.x + c * eci.y, eci.z)
}

/// Inverse of `eci_to_ecef`.
pub fn ecef_to_eci(ecef: Vec3, sim_time: f64) -> Vec3 {
    let gmst = OMEGA_EARTH * sim_time;
    let (s, c) = gmst.sin_cos();
    Vec3::new(c * ecef.x - s * ecef.y, s * ecef.x + c * ecef.y, ecef.z)
}

/// Great-circle distance on the mean Earth sphere, metres.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_MEAN * c
}

/// Initial great-circle bearing from point 1 to point 2, radians,
/// wrapped to `[0, tau)`.
pub fn great_circle_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlon = lon2 - lon1;
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).rem_euclid(std::f64::consts::TAU)
}

/// Shortest signed angular difference `a - b`, wrapped into `[-pi, pi]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let mut d = a - b;
    while d > std::f64::consts::PI {
        d -= std::f64::consts::TAU;
    }
    while d < -std::f64::consts::PI {
        d += std::f64::consts::TAU;
    }
    d
}

/// Destination point from a start lat/lon, initial bearing (radians), and
/// distance (metres), via the standard great-circle destination formula.
pub fn destination_point(lat_deg: f64, lon_deg: f64, bearing: f64, distance: f64) -> (f64, f64) {
    let lat1 = lat_deg.to_radians();
    let lon1 = lon_deg.to_radians();
    let delta = distance / EARTH_RADIUS_MEAN;
    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
    (lat2.to_degrees(), lon2.to_degrees())
}

/// Slant range between two geodetic points via ECEF, metres.
pub fn slant_range_ecef(lat1: f64, lon1: f64, alt1: f64, lat2: f64, lon2: f64, alt2: f64) -> f64 {
    let p1 = geodetic_to_ecef(lat1, lon1, alt1);
    let p2 = geodetic_to_ecef(lat2, lon2, alt2);
    (p2 - p1).length()
}

/// Elevation angle in degrees from observer to target, using a flat
/// local-tangent approximation: `atan2(altitude difference, ground
/// haversine distance)`, special-cased to +/-90 degrees directly
/// overhead/underfoot.
pub fn elevation_angle(lat1: f64, lon1: f64, alt1: f64, lat2: f64, lon2: f64, alt2: f64) -> f64 {
    let ground = haversine_distance(lat1, lon1, lat2, lon2);
    if ground < 1.0 {
        return if alt2 >= alt1 { 90.0 } else { -90.0 };
    }
    (alt2 - alt1).atan2(ground).to_degrees()
}

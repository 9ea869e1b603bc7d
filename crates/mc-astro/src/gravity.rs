//! Closed-form acceleration terms and the composer that sums them.
//!
//! Central-body, J2, and third-body terms use the standard closed-form
//! expressions; J3/J4 use the standard textbook zonal-harmonic closed
//! forms.

use mc_core::constants::{EARTH_J2, EARTH_J3, EARTH_J4, EARTH_MU, EARTH_RADIUS, OMEGA_EARTH};
use mc_core::state::PerturbationConfig;
use mc_core::vector::Vec3;

use crate::atmosphere;
use crate::ephemerides;

/// `-mu * r / |r|^3`. Returns zero for `|r| < 1 m` (degenerate; the
/// caller is expected to guard against ever reaching the origin in a
/// real scenario, so this is a silent, logged-once-per-run recovery, not
/// a propagated error).
pub fn two_body_acceleration(position: Vec3, mu: f64) -> Vec3 {
    let r = position.length();
    if r < 1.0 {
        return Vec3::ZERO;
    }
    -mu / (r * r * r) * position
}

/// J2 oblateness correction, standard closed form.
pub fn j2_perturbation(position: Vec3, mu: f64, j2: f64, radius: f64) -> Vec3 {
    let r = position.length();
    if r < radius {
        return Vec3::ZERO;
    }
    let r2 = r * r;
    let r5 = r2 * r2 * r;
    let z2 = position.z * position.z;
    let coeff = 1.5 * j2 * mu * radius * radius / r5;
    let z_factor = 5.0 * z2 / r2;
    Vec3::new(
        coeff * position.x * (z_factor - 1.0),
        coeff * position.y * (z_factor - 1.0),
        coeff * position.z * (z_factor - 3.0),
    )
}

/// J3 correction (odd zonal harmonic, standard closed form).
pub fn j3_perturbation(position: Vec3, mu: f64, j3: f64, radius: f64) -> Vec3 {
    let r = position.length();
    if r < radius {
        return Vec3::ZERO;
    }
    let zr = position.z / r;
    let re_over_r3 = (radius / r).powi(3);
    let common_xy = 3.0 * zr - 7.0 * zr.powi(3);
    let coeff_xy = -(mu / r.powi(3)) * 2.5 * j3 * re_over_r3 * common_xy;
    let coeff_z = -(mu / (r * r)) * 2.5 * j3 * re_over_r3;
    let term_z = 6.0 * zr * zr - 7.0 * zr.powi(4) - 0.6;
    Vec3::new(coeff_xy * position.x, coeff_xy * position.y, coeff_z * term_z)
}

/// J4 correction (even zonal harmonic, standard closed form).
pub fn j4_perturbation(position: Vec3, mu: f64, j4: f64, radius: f64) -> Vec3 {
    let r = position.length();
    if r < radius {
        return Vec3::ZERO;
    }
    let z2 = position.z * position.z;
    let r2 = r * r;
    let zr2 = z2 / r2;
    let r7 = r2 * r2 * r2 * r;
    let coeff = (15.0 / 8.0) * j4 * mu * radius.powi(4) / r7;
    let lateral = 1.0 - 14.0 * zr2 + 21.0 * zr2 * zr2;
    let vertical = 5.0 - 70.0 / 3.0 * zr2 + 21.0 * zr2 * zr2;
    Vec3::new(
        coeff * lateral * position.x,
        coeff * lateral * position.y,
        coeff * vertical * position.z,
    )
}

/// `mu_third * ((r_third - r) / |r_third - r|^3 - r_third / |r_third|^3)`.
/// The second term is essential: without it the perturbation is wrong by
/// orders of magnitude near the central body, since it represents the
/// central body's own acceleration toward the third body (the frame is
/// non-inertial with respect to that pull).
pub fn third_body_perturbation(position: Vec3, third_body_pos: Vec3, mu_third: f64) -> Vec3 {
    let r_s3 = third_body_pos - position;
    let d_s3 = r_s3.length();
    let d_p3 = third_body_pos.length();
    if d_s3 < 1.0 || d_p3 < 1.0 {
        return Vec3::ZERO;
    }
    mu_third * (r_s3 / d_s3.powi(3) - third_body_pos / d_p3.powi(3))
}

/// True if `position` (Earth-centered) lies in the cylindrical Earth
/// shadow cast along the sun direction.
pub fn is_in_earth_shadow(position: Vec3, sun_pos: Vec3) -> bool {
    let sun_dist = sun_pos.length();
    if sun_dist < 1.0 {
        return false;
    }
    let s_hat = sun_pos / sun_dist;
    let proj = position.dot(s_hat);
    if proj >= 0.0 {
        return false;
    }
    let perp = position - proj * s_hat;
    perp.length() < EARTH_RADIUS
}

/// Solar radiation pressure acceleration, or zero if in shadow.
pub fn srp_acceleration(position: Vec3, sun_pos: Vec3, cr: f64, area: f64, mass: f64) -> Vec3 {
    if is_in_earth_shadow(position, sun_pos) {
        return Vec3::ZERO;
    }
    let r_to_sun = sun_pos - position;
    let dist = r_to_sun.length();
    if dist < 1.0 {
        return Vec3::ZERO;
    }
    let r_hat = r_to_sun / dist;
    let a_mag = mc_core::constants::P_SUN_1AU * cr * (area / mass) * (mc_core::constants::AU / dist).powi(2);
    -a_mag * r_hat
}

/// Co-rotating-atmosphere drag acceleration, evaluated only by the
/// caller when altitude is below 200 km (the composer enforces that
/// gate; this function assumes it has already been checked).
pub fn drag_acceleration(position: Vec3, velocity: Vec3, altitude_m: f64, cd: f64, area: f64, mass: f64) -> Vec3 {
    let rho = atmosphere::atmosphere_at(altitude_m).density_kg_m3;
    if rho <= 1e-20 {
        return Vec3::ZERO;
    }
    let omega = Vec3::new(0.0, 0.0, OMEGA_EARTH);
    let v_atm = omega.cross(position);
    let v_rel = velocity - v_atm;
    let v_mag = v_rel.length();
    if v_mag <= 1.0 {
        return Vec3::ZERO;
    }
    -0.5 * rho * v_mag * v_mag * (cd * area / mass) * (v_rel / v_mag)
}

/// Sum every enabled perturbation term, in the fixed order: central, J2,
/// J3, J4, Moon third-body, Sun third-body, SRP, drag. The order is
/// cosmetic (summation is commutative) but fixed in code for readability
/// and to keep MC replay reasoning simple.
pub fn total_acceleration(position: Vec3, velocity: Vec3, config: &PerturbationConfig, jd_now: f64) -> Vec3 {
    let mut accel = two_body_acceleration(position, EARTH_MU);

    if config.j2 {
        accel += j2_perturbation(position, EARTH_MU, EARTH_J2, EARTH_RADIUS);
    }
    if config.j3 {
        accel += j3_perturbation(position, EARTH_MU, EARTH_J3, EARTH_RADIUS);
    }
    if config.j4 {
        accel += j4_perturbation(position, EARTH_MU, EARTH_J4, EARTH_RADIUS);
    }
    if config.moon {
        let (moon_pos, _) = ephemerides::moon_state(jd_now);
        accel += third_body_perturbation(position, moon_pos, ephemerides::MOON_GM);
    }
    if config.sun {
        let (sun_pos, _) = ephemerides::sun_state(jd_now);
        accel += third_body_perturbation(position, sun_pos, ephemerides::SUN_GM);
    }
    if config.srp {
        let (sun_pos, _) = ephemerides::sun_state(jd_now);
        accel += srp_acceleration(position, sun_pos, config.srp_cr, config.srp_area, config.srp_mass);
    }
    if config.drag {
        let altitude = position.length() - EARTH_RADIUS;
        if altitude > 0.0 && altitude < 200_000.0 {
            accel += drag_acceleration(position, velocity, altitude, config.drag_cd, config.drag_area, config.drag_mass);
        }
    }

    accel
}

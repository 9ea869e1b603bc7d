//! Low-precision analytical ephemerides for the Sun and Moon, ECI.
//!
//! The Moon uses a simplified circular orbit at fixed inclination with
//! no RAAN tracking; the Sun uses the low-precision Meeus solar position
//! algorithm. Neither is survey-grade; both are adequate for third-body
//! perturbation and SRP shadow geometry at the sub-percent level this
//! simulator needs.

use mc_core::constants::{
    AU, EARTH_MOON_DISTANCE, J2000_EPOCH_JD, MOON_INCLINATION, MOON_L0_J2000, MOON_MU,
    OBLIQUITY_J2000, SECONDS_PER_DAY, SUN_MU,
};
use mc_core::vector::Vec3;

const MOON_MEAN_MOTION: f64 = std::f64::consts::TAU / (27.321_661 * SECONDS_PER_DAY);

/// Moon position and velocity in ECI at Julian date `jd`.
pub fn moon_state(jd: f64) -> (Vec3, Vec3) {
    let t_sec = (jd - J2000_EPOCH_JD) * SECONDS_PER_DAY;
    let theta = (MOON_L0_J2000 + MOON_MEAN_MOTION * t_sec).rem_euclid(std::f64::consts::TAU);
    let r = EARTH_MOON_DISTANCE;
    let n = MOON_MEAN_MOTION;

    let x_orb = r * theta.cos();
    let y_orb = r * theta.sin();
    let (sin_i, cos_i) = MOON_INCLINATION.sin_cos();
    let pos = Vec3::new(x_orb, y_orb * cos_i, y_orb * sin_i);

    let v = r * n;
    let vx_orb = -v * theta.sin();
    let vy_orb = v * theta.cos();
    let vel = Vec3::new(vx_orb, vy_orb * cos_i, vy_orb * sin_i);

    (pos, vel)
}

fn sun_position_ecl_equatorial(jd: f64) -> Vec3 {
    let t = (jd - J2000_EPOCH_JD) / 36525.0;

    let m_deg = 357.529_11 + 35999.050_29 * t - 0.000_153_7 * t * t;
    let m = m_deg.to_radians();
    let l0_deg = 280.466_46 + 36000.769_83 * t + 0.000_303_2 * t * t;

    let c_deg = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let lambda = (l0_deg + c_deg).to_radians();

    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;
    let v = m + c_deg.to_radians();
    let r_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * v.cos());
    let r = r_au * AU;

    let x_ecl = r * lambda.cos();
    let y_ecl = r * lambda.sin();

    let (sin_eps, cos_eps) = OBLIQUITY_J2000.sin_cos();
    Vec3::new(x_ecl, y_ecl * cos_eps, y_ecl * sin_eps)
}

/// Sun position and velocity in ECI at Julian date `jd`. Velocity is a
/// central-difference numerical derivative (1-second step) rather than
/// a closed-form rate.
pub fn sun_state(jd: f64) -> (Vec3, Vec3) {
    let pos = sun_position_ecl_equatorial(jd);
    let h = 1.0 / SECONDS_PER_DAY;
    let p_plus = sun_position_ecl_equatorial(jd + h);
    let p_minus = sun_position_ecl_equatorial(jd - h);
    let vel = (p_plus - p_minus) / (2.0 * h * SECONDS_PER_DAY);
    (pos, vel)
}

pub const MOON_GM: f64 = MOON_MU;
pub const SUN_GM: f64 = SUN_MU;

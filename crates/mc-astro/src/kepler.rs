//! Classical Kepler-element math and the MC engine's per-tick orbital
//! propagation path (component F).
//!
//! `propagate_kepler_tick` guards several degenerate paths: position
//! magnitude below 1000 m or speed below 0.1 m/s is treated as a no-op
//! tick; near-zero angular momentum, non-finite or non-positive
//! semi-major axis, or eccentricity at or above 1 falls back to linear
//! propagation for that tick.

use mc_core::constants::EARTH_MU;
use mc_core::state::OrbitalElements;
use mc_core::vector::Vec3;

const KEPLER_TOLERANCE: f64 = 1e-10;
const KEPLER_MAX_ITERATIONS: u32 = 20;

/// Solve Kepler's equation `M = E - e sin E` for `E`, Newton-Raphson from
/// `E0 = M`.
pub fn solve_kepler_equation(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e = mean_anomaly;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = e - eccentricity * e.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * e.cos();
        let delta = f / f_prime;
        e -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    e
}

pub fn eccentric_to_true_anomaly(e_anom: f64, eccentricity: f64) -> f64 {
    let sqrt_term_plus = (1.0 + eccentricity).sqrt();
    let sqrt_term_minus = (1.0 - eccentricity).sqrt();
    2.0 * (sqrt_term_plus * (e_anom / 2.0).sin()).atan2(sqrt_term_minus * (e_anom / 2.0).cos())
}

pub fn true_to_eccentric_anomaly(nu: f64, eccentricity: f64) -> f64 {
    let sqrt_term_minus = (1.0 - eccentricity).sqrt();
    let sqrt_term_plus = (1.0 + eccentricity).sqrt();
    2.0 * (sqrt_term_minus * (nu / 2.0).sin()).atan2(sqrt_term_plus * (nu / 2.0).cos())
}

pub fn eccentric_to_mean_anomaly(e_anom: f64, eccentricity: f64) -> f64 {
    e_anom - eccentricity * e_anom.sin()
}

/// Elements to an inertial position/velocity pair, via the perifocal
/// frame and the standard `Rz(raan) Rx(inc) Rz(argp)` rotation sequence.
pub fn elements_to_state(elements: &OrbitalElements, mu: f64) -> (Vec3, Vec3) {
    let e = elements.eccentricity;
    let a = elements.semi_major_axis;
    let nu = elements.true_anomaly;

    let p = a * (1.0 - e * e);
    let r = p / (1.0 + e * nu.cos());

    let r_pf = Vec3::new(r * nu.cos(), r * nu.sin(), 0.0);
    let v_coeff = (mu / p).sqrt();
    let v_pf = Vec3::new(-v_coeff * nu.sin(), v_coeff * (e + nu.cos()), 0.0);

    let rotate = |v: Vec3| -> Vec3 {
        rotate_z(rotate_x(rotate_z(v, elements.arg_periapsis), elements.inclination), elements.raan)
    };

    (rotate(r_pf), rotate(v_pf))
}

fn rotate_z(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

fn rotate_x(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Inertial position/velocity to classical elements. Handles the
/// equatorial and circular degeneracies by falling back to argument of
/// latitude and true longitude respectively.
pub fn state_to_elements(position: Vec3, velocity: Vec3, mu: f64) -> OrbitalElements {
    let r = position.length();
    let v = velocity.length();

    let h = position.cross(velocity);
    let h_mag = h.length();

    let e_vec = (velocity.cross(h)) / mu - position / r;
    let ecc = e_vec.length();

    let energy = v * v / 2.0 - mu / r;
    let a = if energy.abs() > 1e-12 { -mu / (2.0 * energy) } else { f64::INFINITY };

    let inc = (h.z / h_mag).clamp(-1.0, 1.0).acos();

    let z_hat = Vec3::new(0.0, 0.0, 1.0);
    let n = z_hat.cross(h);
    let n_mag = n.length();

    let raan = if n_mag > 1e-8 {
        let raan = (n.x / n_mag).clamp(-1.0, 1.0).acos();
        if n.y < 0.0 {
            std::f64::consts::TAU - raan
        } else {
            raan
        }
    } else {
        0.0
    };

    let (arg_periapsis, true_anomaly) = if ecc > 1e-8 {
        let argp = if n_mag > 1e-8 {
            let cos_argp = (n.dot(e_vec) / (n_mag * ecc)).clamp(-1.0, 1.0);
            let argp = cos_argp.acos();
            if e_vec.z < 0.0 {
                std::f64::consts::TAU - argp
            } else {
                argp
            }
        } else {
            // Equatorial: argument of latitude measured from x-axis instead.
            let argp = (e_vec.x / ecc).clamp(-1.0, 1.0).acos();
            if e_vec.y < 0.0 {
                std::f64::consts::TAU - argp
            } else {
                argp
            }
        };

        let cos_nu = (e_vec.dot(position) / (ecc * r)).clamp(-1.0, 1.0);
        let nu = cos_nu.acos();
        let nu = if position.dot(velocity) < 0.0 { std::f64::consts::TAU - nu } else { nu };
        (argp, nu)
    } else if n_mag > 1e-8 {
        // Circular, inclined: argument of latitude replaces true anomaly.
        let cos_u = (n.dot(position) / (n_mag * r)).clamp(-1.0, 1.0);
        let u = cos_u.acos();
        let u = if position.z < 0.0 { std::f64::consts::TAU - u } else { u };
        (0.0, u)
    } else {
        // Circular, equatorial: true longitude replaces true anomaly.
        let cos_l = (position.x / r).clamp(-1.0, 1.0);
        let l = cos_l.acos();
        let l = if position.y < 0.0 { std::f64::consts::TAU - l } else { l };
        (0.0, l)
    };

    let e_anom = true_to_eccentric_anomaly(true_anomaly, ecc);
    let mean_anomaly = eccentric_to_mean_anomaly(e_anom, ecc).rem_euclid(std::f64::consts::TAU);

    OrbitalElements {
        semi_major_axis: a,
        eccentricity: ecc,
        inclination: inc,
        raan,
        arg_periapsis,
        true_anomaly,
        mean_anomaly,
    }
}

/// Mean motion, rad/s.
pub fn mean_motion(semi_major_axis: f64, mu: f64) -> f64 {
    (mu / semi_major_axis.powi(3)).sqrt()
}

/// Advance an entity's ECI state by one Kepler tick, in place, subject
/// to the degenerate-path guards documented above.
pub fn propagate_kepler_tick(position: &mut Vec3, velocity: &mut Vec3, dt: f64) {
    let r_mag = position.length();
    let v_mag = velocity.length();
    if r_mag < 1000.0 || v_mag < 0.1 {
        return;
    }

    let h = position.cross(*velocity);
    if h.length() < 1e3 {
        *position += *velocity * dt;
        return;
    }

    let elements = state_to_elements(*position, *velocity, EARTH_MU);
    if !elements.semi_major_axis.is_finite() || elements.semi_major_axis <= 0.0 || elements.eccentricity >= 1.0 {
        *position += *velocity * dt;
        return;
    }

    let n = mean_motion(elements.semi_major_axis, EARTH_MU);
    let e_anom = true_to_eccentric_anomaly(elements.true_anomaly, elements.eccentricity);
    let m0 = eccentric_to_mean_anomaly(e_anom, elements.eccentricity);
    let m1 = (m0 + n * dt).rem_euclid(std::f64::consts::TAU);
    let e1 = solve_kepler_equation(m1, elements.eccentricity);
    let nu1 = eccentric_to_true_anomaly(e1, elements.eccentricity);

    let mut new_elements = elements;
    new_elements.true_anomaly = nu1;
    new_elements.mean_anomaly = m1;

    let (new_pos, new_vel) = elements_to_state(&new_elements, EARTH_MU);
    if new_pos.is_finite() && new_vel.is_finite() {
        *position = new_pos;
        *velocity = new_vel;
    }
}

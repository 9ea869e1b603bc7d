//! Clohessy-Wiltshire relative motion kernel (component H).
//!
//! The RIC basis is built with radial as `r_hat` of the target (called
//! `x` here), cross-track as the orbit normal (`z`), and in-track
//! completing the right-handed triad (`y`) — a deliberate relabeling
//! from the more common R/I/C naming: `x = R`, `y = I`, `z = C`. The
//! closed-form CW state-transition matrix is the standard textbook
//! solution to the linearized Hill equations.

use mc_core::vector::Vec3;

/// Orthonormal RIC basis vectors for a target at `(r_target, v_target)`,
/// returned as `(x_radial, y_intrack, z_crosstrack)`.
pub fn ric_basis(r_target: Vec3, v_target: Vec3) -> (Vec3, Vec3, Vec3) {
    let x = r_target.normalize();
    let h = r_target.cross(v_target);
    let z = h.normalize();
    let y = z.cross(x);
    (x, y, z)
}

/// Inertial relative position/velocity to RIC (`x=radial, y=intrack,
/// z=crosstrack`) relative position/velocity, about a target whose own
/// inertial state is `(r_target, v_target)`.
pub fn inertial_to_ric(
    r_target: Vec3,
    v_target: Vec3,
    r_chaser: Vec3,
    v_chaser: Vec3,
) -> (Vec3, Vec3) {
    let (x_hat, y_hat, z_hat) = ric_basis(r_target, v_target);
    let omega = r_target.cross(v_target) / r_target.length_squared();

    let dr = r_chaser - r_target;
    let dv = v_chaser - v_target - omega.cross(dr);

    let ric_pos = Vec3::new(dr.dot(x_hat), dr.dot(y_hat), dr.dot(z_hat));
    let ric_vel = Vec3::new(dv.dot(x_hat), dv.dot(y_hat), dv.dot(z_hat));
    (ric_pos, ric_vel)
}

/// RIC relative position/velocity back to inertial relative position/
/// velocity, about the same target state.
pub fn ric_to_inertial(
    r_target: Vec3,
    v_target: Vec3,
    ric_pos: Vec3,
    ric_vel: Vec3,
) -> (Vec3, Vec3) {
    let (x_hat, y_hat, z_hat) = ric_basis(r_target, v_target);
    let omega = r_target.cross(v_target) / r_target.length_squared();

    let dr = ric_pos.x * x_hat + ric_pos.y * y_hat + ric_pos.z * z_hat;
    let dv_ric = ric_vel.x * x_hat + ric_vel.y * y_hat + ric_vel.z * z_hat;
    let dv = dv_ric + omega.cross(dr);

    (r_target + dr, v_target + dv)
}

/// The four 3x3 Clohessy-Wiltshire state-transition blocks for mean
/// motion `n` and elapsed time `t`, in the `(radial, intrack,
/// crosstrack)` axis ordering used throughout this module.
struct CwBlocks {
    phi_rr: [[f64; 3]; 3],
    phi_rv: [[f64; 3]; 3],
    phi_vr: [[f64; 3]; 3],
    phi_vv: [[f64; 3]; 3],
}

fn cw_blocks(n: f64, t: f64) -> CwBlocks {
    let (s, c) = (n * t).sin_cos();

    let phi_rr = [
        [4.0 - 3.0 * c, 0.0, 0.0],
        [6.0 * (s - n * t), 1.0, 0.0],
        [0.0, 0.0, c],
    ];
    let phi_rv = [
        [s / n, 2.0 * (1.0 - c) / n, 0.0],
        [2.0 * (c - 1.0) / n, (4.0 * s - 3.0 * n * t) / n, 0.0],
        [0.0, 0.0, s / n],
    ];
    let phi_vr = [
        [3.0 * n * s, 0.0, 0.0],
        [6.0 * n * (c - 1.0), 0.0, 0.0],
        [0.0, 0.0, -n * s],
    ];
    let phi_vv = [
        [c, 2.0 * s, 0.0],
        [-2.0 * s, 4.0 * c - 3.0, 0.0],
        [0.0, 0.0, c],
    ];

    CwBlocks { phi_rr, phi_rv, phi_vr, phi_vv }
}

fn mat3_vec(m: &[[f64; 3]; 3], v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

/// Propagate a RIC relative state forward by `t` seconds under the
/// linearized Clohessy-Wiltshire equations, for a target with mean
/// motion `n`.
pub fn propagate_cw(ric_pos: Vec3, ric_vel: Vec3, n: f64, t: f64) -> (Vec3, Vec3) {
    let b = cw_blocks(n, t);
    let pos = mat3_vec(&b.phi_rr, ric_pos) + mat3_vec(&b.phi_rv, ric_vel);
    let vel = mat3_vec(&b.phi_vr, ric_pos) + mat3_vec(&b.phi_vv, ric_vel);
    (pos, vel)
}

/// Two-impulse CW transfer: the RIC delta-v at departure and arrival
/// needed to go from `ric_pos0` to `ric_pos1` over time `t`, plus the
/// state just before arrival (for verifying the arrival delta-v).
pub fn cw_transfer(ric_pos0: Vec3, ric_pos1: Vec3, n: f64, t: f64) -> Option<(Vec3, Vec3)> {
    if t <= 0.0 || !t.is_finite() {
        return None;
    }
    let b = cw_blocks(n, t);
    let phi_rv_inv = invert3(&b.phi_rv)?;

    let rhs = ric_pos1 - mat3_vec(&b.phi_rr, ric_pos0);
    let v0_needed = mat3_vec(&phi_rv_inv, rhs);

    let (pos_arrival, v_arrival) = propagate_cw(ric_pos0, v0_needed, n, t);
    let _ = pos_arrival;

    Some((v0_needed, v_arrival))
}

fn invert3(m: &[[f64; 3]; 3]) -> Option<[[f64; 3]; 3]> {
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
    if det.abs() < 1e-18 {
        return None;
    }
    let inv_det = 1.0 / det;
    let mut inv = [[0.0; 3]; 3];
    inv[0][0] = (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det;
    inv[0][1] = (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det;
    inv[0][2] = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;
    inv[1][0] = (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det;
    inv[1][1] = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
    inv[1][2] = (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det;
    inv[2][0] = (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det;
    inv[2][1] = (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det;
    inv[2][2] = (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det;
    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::constants::EARTH_MU;

    #[test]
    fn ric_round_trip_is_identity() {
        let r_t = Vec3::new(6_878_137.0, 0.0, 0.0);
        let v_t = Vec3::new(0.0, 7_612.0, 0.0);
        let r_c = r_t + Vec3::new(100.0, -50.0, 20.0);
        let v_c = v_t + Vec3::new(0.1, 0.2, -0.05);

        let (ric_pos, ric_vel) = inertial_to_ric(r_t, v_t, r_c, v_c);
        let (back_pos, back_vel) = ric_to_inertial(r_t, v_t, ric_pos, ric_vel);

        assert!((back_pos - r_c).length() < 1e-6, "position round-trip drift: {}", (back_pos - r_c).length());
        assert!((back_vel - v_c).length() < 1e-9, "velocity round-trip drift: {}", (back_vel - v_c).length());
    }

    #[test]
    fn cw_transfer_reaches_target_ric_position() {
        let r0 = 6_878_137.0;
        let n = (EARTH_MU / r0.powi(3)).sqrt();

        let ric_pos0 = Vec3::new(0.0, -1000.0, 0.0);
        let ric_pos1 = Vec3::new(0.0, 0.0, 0.0);
        let t = 1800.0;

        let (v0, _v1) = cw_transfer(ric_pos0, ric_pos1, n, t).expect("transfer should solve");
        let (pos_final, _) = propagate_cw(ric_pos0, v0, n, t);

        assert!((pos_final - ric_pos1).length() < 1.0, "transfer missed target by {} m", (pos_final - ric_pos1).length());
    }

    #[test]
    fn propagate_cw_is_identity_at_zero_time() {
        let n = 0.0011;
        let pos = Vec3::new(100.0, 50.0, -20.0);
        let vel = Vec3::new(0.1, -0.2, 0.05);
        let (p, v) = propagate_cw(pos, vel, n, 0.0);
        assert!((p - pos).length() < 1e-9);
        assert!((v - vel).length() < 1e-9);
    }
}

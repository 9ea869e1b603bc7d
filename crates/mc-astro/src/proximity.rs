//! Proximity-operations planners built on the CW kernel: V-bar and R-bar
//! approaches, circumnavigation, proportional station-keeping, and the
//! natural-motion "football" relative orbit.
//!
//! These are thin conveniences over `cw_transfer`/`propagate_cw` and do
//! not change the two-impulse transfer contract those functions already
//! provide.

use mc_core::vector::Vec3;

use crate::hill_cw::{cw_transfer, propagate_cw};

const STATION_KEEPING_KP: f64 = 0.01;
const STATION_KEEPING_KV: f64 = 0.1;

/// Plan a V-bar (in-track axis) approach from the chaser's current RIC
/// position to a hold point `stand_off` metres behind the target along
/// the velocity vector (negative in-track), arriving after `t` seconds.
pub fn plan_vbar_approach(ric_pos0: Vec3, stand_off: f64, n: f64, t: f64) -> Option<(Vec3, Vec3)> {
    let target = Vec3::new(0.0, -stand_off, 0.0);
    cw_transfer(ric_pos0, target, n, t)
}

/// Plan an R-bar (radial axis) approach from the chaser's current RIC
/// position to a hold point `stand_off` metres below the target along
/// the radial direction, arriving after `t` seconds.
pub fn plan_rbar_approach(ric_pos0: Vec3, stand_off: f64, n: f64, t: f64) -> Option<(Vec3, Vec3)> {
    let target = Vec3::new(-stand_off, 0.0, 0.0);
    cw_transfer(ric_pos0, target, n, t)
}

/// Plan a circumnavigation: a sequence of waypoints at fixed radius
/// `radius` about the target, evenly spaced around the in-track/radial
/// plane, each reached by its own two-impulse CW transfer from the
/// previous waypoint over `leg_duration` seconds.
pub fn plan_circumnavigation(
    ric_pos0: Vec3,
    radius: f64,
    waypoint_count: usize,
    leg_duration: f64,
    n: f64,
) -> Vec<Option<(Vec3, Vec3)>> {
    let mut legs = Vec::with_capacity(waypoint_count);
    let mut current = ric_pos0;
    for i in 0..waypoint_count {
        let theta = std::f64::consts::TAU * (i as f64 + 1.0) / waypoint_count as f64;
        let waypoint = Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
        legs.push(cw_transfer(current, waypoint, n, leg_duration));
        current = waypoint;
    }
    legs
}

/// Simple proportional station-keeping delta-v: pulls the chaser's RIC
/// position toward `hold_point` and damps its relative velocity with a
/// fixed pair of gains.
pub fn station_keeping_dv(ric_pos: Vec3, ric_vel: Vec3, hold_point: Vec3) -> Vec3 {
    let pos_error = hold_point - ric_pos;
    STATION_KEEPING_KP * pos_error - STATION_KEEPING_KV * ric_vel
}

/// The natural-motion "football" relative orbit: a 2:1 in-track:radial
/// ellipse about the target requiring no delta-v to sustain, sampled at
/// `n * t` for a chaser whose initial radial amplitude is `radial_amp`.
pub fn football_orbit(radial_amp: f64, n: f64, t: f64) -> (Vec3, Vec3) {
    let ric_pos0 = Vec3::new(radial_amp, 0.0, 0.0);
    let ric_vel0 = Vec3::new(0.0, -2.0 * radial_amp * n, 0.0);
    propagate_cw(ric_pos0, ric_vel0, n, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::constants::EARTH_MU;

    fn leo_mean_motion() -> f64 {
        let r0 = 6_878_137.0;
        (EARTH_MU / r0.powi(3)).sqrt()
    }

    #[test]
    fn vbar_approach_reaches_standoff_distance() {
        let n = leo_mean_motion();
        let ric_pos0 = Vec3::new(0.0, -5000.0, 0.0);
        let (v0, _) = plan_vbar_approach(ric_pos0, 200.0, n, 1800.0).expect("should solve");
        let (final_pos, _) = propagate_cw(ric_pos0, v0, n, 1800.0);
        assert!((final_pos - Vec3::new(0.0, -200.0, 0.0)).length() < 1.0);
    }

    #[test]
    fn rbar_approach_reaches_standoff_distance() {
        let n = leo_mean_motion();
        let ric_pos0 = Vec3::new(-3000.0, 0.0, 0.0);
        let (v0, _) = plan_rbar_approach(ric_pos0, 100.0, n, 1800.0).expect("should solve");
        let (final_pos, _) = propagate_cw(ric_pos0, v0, n, 1800.0);
        assert!((final_pos - Vec3::new(-100.0, 0.0, 0.0)).length() < 1.0);
    }

    #[test]
    fn station_keeping_dv_is_zero_at_the_hold_point_with_no_drift() {
        let dv = station_keeping_dv(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(dv, Vec3::ZERO);
    }

    #[test]
    fn station_keeping_dv_pulls_toward_hold_point() {
        let dv = station_keeping_dv(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO);
        assert!(dv.x < 0.0, "should accelerate back toward the hold point");
    }

    #[test]
    fn football_orbit_stays_bounded_over_one_period() {
        let n = leo_mean_motion();
        let period = std::f64::consts::TAU / n;
        let (pos, _) = football_orbit(500.0, n, period);
        // After one full orbital period the natural-motion ellipse returns near its start.
        assert!((pos - Vec3::new(500.0, 0.0, 0.0)).length() < 5.0, "football orbit drifted: {pos:?}");
    }

    #[test]
    fn circumnavigation_produces_one_leg_per_waypoint() {
        let n = leo_mean_motion();
        let legs = plan_circumnavigation(Vec3::new(200.0, 0.0, 0.0), 200.0, 4, 1800.0, n);
        assert_eq!(legs.len(), 4);
        assert!(legs.iter().all(|l| l.is_some()));
    }
}

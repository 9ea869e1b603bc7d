//! Waypoint patrol and intercept AIs (component M).
//!
//! Pure steering-law functions: each returns the setpoint changes the
//! caller should apply to its own `FlightState` and AI bundle. Neither
//! function reads or mutates any other entity's authoritative state.

use mc_astro::frames::{angle_diff, great_circle_bearing, haversine_distance, slant_range_ecef};
use mc_core::entity::{FlightState, InterceptAi, Waypoint, WaypointPatrolAi};
use mc_core::enums::PhysicsType;

const ARRIVAL_RADIUS_M: f64 = 2_000.0;
const ROLL_LIMIT_RAD: f64 = 40.0_f64.to_radians();
const ROLL_RATE_LIMIT: f64 = 3.0;
const ALPHA_LIMIT_RAD: f64 = 0.15;
const MIN_GROUND_AGL: f64 = 500.0;

/// The setpoint updates a steering law wants applied this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringCommand {
    pub roll: f64,
    pub alpha: f64,
    pub throttle_delta: f64,
    pub advance_waypoint: bool,
}

fn steer_toward(
    lat: f64,
    lon: f64,
    alt: f64,
    flight: &FlightState,
    target_lat: f64,
    target_lon: f64,
    target_alt: f64,
    target_speed: Option<f64>,
    dt: f64,
) -> SteeringCommand {
    let bearing = great_circle_bearing(lat, lon, target_lat, target_lon);
    let heading_error = angle_diff(bearing, flight.heading);

    let desired_roll = (heading_error * 2.0).clamp(-ROLL_LIMIT_RAD, ROLL_LIMIT_RAD);
    let roll_step = ROLL_RATE_LIMIT * dt;
    let roll_delta = (desired_roll - flight.roll).clamp(-roll_step, roll_step);

    let alt_error = target_alt - alt;
    let alpha = (alt_error * 0.0001).clamp(-ALPHA_LIMIT_RAD, ALPHA_LIMIT_RAD);

    let throttle_delta = match target_speed {
        Some(target) => (target - flight.speed).signum() * 0.05,
        None => 0.0,
    };

    let distance = haversine_distance(lat, lon, target_lat, target_lon);

    SteeringCommand {
        roll: flight.roll + roll_delta,
        alpha,
        throttle_delta,
        advance_waypoint: distance < ARRIVAL_RADIUS_M,
    }
}

/// Run one tick of waypoint-patrol steering. Returns the command and, if
/// the waypoint cursor should advance, the new cursor index (already
/// wrapped or clamped per `loop_route`).
pub fn patrol_step(
    ai: &WaypointPatrolAi,
    lat: f64,
    lon: f64,
    alt: f64,
    flight: &FlightState,
    dt: f64,
) -> (SteeringCommand, usize) {
    let Some(wp) = ai.waypoints.get(ai.waypoint_index) else {
        return (SteeringCommand::default(), ai.waypoint_index);
    };

    let cmd = steer_toward(lat, lon, alt, flight, wp.lat, wp.lon, wp.alt, Some(wp.speed), dt);

    let next_index = if cmd.advance_waypoint {
        let candidate = ai.waypoint_index + 1;
        if candidate >= ai.waypoints.len() {
            if ai.loop_route {
                0
            } else {
                ai.waypoints.len() - 1
            }
        } else {
            candidate
        }
    } else {
        ai.waypoint_index
    };

    (cmd, next_index)
}

/// Evaluate one tick of intercept steering against a designated target's
/// current geodetic position (and whether it is airborne). Returns
/// `None` if the target is orbital (incompatible geometry — the
/// intercept AI silently holds state 0).
pub fn intercept_step(
    ai: &InterceptAi,
    self_lat: f64,
    self_lon: f64,
    self_alt: f64,
    flight: &FlightState,
    target_lat: f64,
    target_lon: f64,
    target_alt: f64,
    target_physics: PhysicsType,
    dt: f64,
) -> Option<(SteeringCommand, u8)> {
    if target_physics == PhysicsType::Orbital2Body {
        return Some((SteeringCommand::default(), 0));
    }

    let effective_target_alt = target_alt.max(MIN_GROUND_AGL);
    let mut cmd = steer_toward(
        self_lat,
        self_lon,
        self_alt,
        flight,
        target_lat,
        target_lon,
        effective_target_alt,
        None,
        dt,
    );
    cmd.throttle_delta = 1.0;
    cmd.advance_waypoint = false;

    let slant = slant_range_ecef(self_lat, self_lon, self_alt, target_lat, target_lon, target_alt);
    let state = if slant < ai.engage_range { 1 } else { 0 };

    Some((cmd, state))
}

fn default_patrol_waypoints() -> Vec<Waypoint> {
    // A 50 km x 20 km racetrack centered on the origin, used as the
    // scenario parser's automatic fallback for entities with no
    // explicit AI assigned.
    vec![
        Waypoint { lat: 0.225, lon: 0.0, alt: 8_000.0, speed: 200.0 },
        Waypoint { lat: 0.225, lon: 0.45, alt: 8_000.0, speed: 200.0 },
        Waypoint { lat: -0.225, lon: 0.45, alt: 8_000.0, speed: 200.0 },
        Waypoint { lat: -0.225, lon: 0.0, alt: 8_000.0, speed: 200.0 },
    ]
}

/// The scenario parser's `player_input` fallback: a fixed 50 km x 20 km
/// racetrack pattern, assigned when no AI is explicitly configured so
/// every parsed entity stays actionable.
pub fn default_patrol_ai() -> WaypointPatrolAi {
    WaypointPatrolAi {
        waypoints: default_patrol_waypoints(),
        waypoint_index: 0,
        loop_route: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_flight(heading: f64) -> FlightState {
        FlightState { speed: 200.0, gamma: 0.0, heading, alpha: 0.0, roll: 0.0, throttle: 0.7, engine_on: true, mach: 0.3 }
    }

    #[test]
    fn patrol_advances_waypoint_on_arrival() {
        let ai = WaypointPatrolAi {
            waypoints: vec![Waypoint { lat: 0.001, lon: 0.0, alt: 1000.0, speed: 200.0 }, Waypoint { lat: 1.0, lon: 1.0, alt: 1000.0, speed: 200.0 }],
            waypoint_index: 0,
            loop_route: false,
        };
        let (cmd, next) = patrol_step(&ai, 0.0, 0.0, 1000.0, &level_flight(0.0), 0.1);
        assert!(cmd.advance_waypoint);
        assert_eq!(next, 1);
    }

    #[test]
    fn patrol_clamps_to_last_waypoint_without_loop() {
        let ai = WaypointPatrolAi {
            waypoints: vec![Waypoint { lat: 0.0001, lon: 0.0, alt: 1000.0, speed: 200.0 }],
            waypoint_index: 0,
            loop_route: false,
        };
        let (_, next) = patrol_step(&ai, 0.0, 0.0, 1000.0, &level_flight(0.0), 0.1);
        assert_eq!(next, 0);
    }

    #[test]
    fn patrol_wraps_to_first_waypoint_with_loop() {
        let ai = WaypointPatrolAi {
            waypoints: vec![
                Waypoint { lat: 0.0001, lon: 0.0, alt: 1000.0, speed: 200.0 },
                Waypoint { lat: 5.0, lon: 5.0, alt: 1000.0, speed: 200.0 },
            ],
            waypoint_index: 0,
            loop_route: true,
        };
        let (_, next) = patrol_step(&ai, 0.0, 0.0, 1000.0, &level_flight(0.0), 0.1);
        assert_eq!(next, 1);
    }

    #[test]
    fn intercept_holds_state_zero_against_orbital_target() {
        let ai = InterceptAi { target_id: "sat1".to_string(), mode: 0, engage_range: 5000.0, intercept_state: 0 };
        let result = intercept_step(&ai, 0.0, 0.0, 1000.0, &level_flight(0.0), 1.0, 1.0, 400_000.0, PhysicsType::Orbital2Body, 0.1);
        assert_eq!(result.unwrap().1, 0);
    }

    #[test]
    fn intercept_sets_state_one_within_engage_range() {
        let ai = InterceptAi { target_id: "bandit1".to_string(), mode: 0, engage_range: 50_000.0, intercept_state: 0 };
        let (_, state) = intercept_step(&ai, 0.0, 0.0, 5000.0, &level_flight(0.0), 0.001, 0.0, 5000.0, PhysicsType::Flight3Dof, 0.1).unwrap();
        assert_eq!(state, 1);
    }

    #[test]
    fn default_patrol_ai_has_four_waypoints_and_loops() {
        let ai = default_patrol_ai();
        assert_eq!(ai.waypoints.len(), 4);
        assert!(ai.loop_route);
    }
}

//! 3-DOF atmospheric flight propagator (component L).
//!
//! Equations of motion for a point-mass aircraft:
//!   dV/dt = (T·cos(α) - D) / m - g·sin(γ)
//!   dγ/dt = (L·cos(φ) + T·sin(α) - m·g·cos(γ)) / (m·V)
//!   dψ/dt = L·sin(φ) / (m·V·cos(γ))
//!
//! Clamped to `V >= 50`, `|γ| <= 80°`, altitude `>= 0`; guarded by
//! `V > 1.0` / `|cos γ| > 0.01` against singular turn-rate and
//! climb-rate terms; thrust cuts over from military to afterburner at
//! throttle 0.95 with a density-ratio lapse to the 0.7 power.

use mc_astro::atmosphere::{atmosphere_at, RHO0};
use mc_astro::frames::destination_point;
use mc_core::entity::MCEntity;
use mc_core::enums::PhysicsType;
use mc_core::world::MCWorld;

const G0: f64 = 9.806_65;
const MACH_WAVE_DRAG_ONSET: f64 = 0.85;
const MIN_SPEED: f64 = 50.0;
const MAX_GAMMA: f64 = 80.0_f64 * std::f64::consts::PI / 180.0;

pub fn update_all(world: &mut MCWorld, dt: f64) {
    for entity in world.entities_mut() {
        if entity.physics_type != PhysicsType::Flight3Dof || !entity.is_live() {
            continue;
        }
        update_entity(entity, dt);
    }
}

fn update_entity(e: &mut MCEntity, dt: f64) {
    let Some(aero) = e.aero else { return };
    let Some(mut flight) = e.flight else { return };

    let atmo = atmosphere_at(e.geo_alt);

    let v = flight.speed;
    let gamma = flight.gamma;
    let heading = flight.heading;
    let alpha = flight.alpha;
    let roll = flight.roll;
    let mass = aero.mass;

    let q = 0.5 * atmo.density_kg_m3 * v * v;

    let cl = (aero.cl_alpha * alpha).clamp(-aero.cl_max, aero.cl_max);
    let mut cd = aero.cd0 + cl * cl / (std::f64::consts::PI * aero.oswald * aero.aspect_ratio);

    let mach = if atmo.speed_of_sound_mps > 1.0 { v / atmo.speed_of_sound_mps } else { 0.0 };
    if mach > MACH_WAVE_DRAG_ONSET {
        let dm = mach - MACH_WAVE_DRAG_ONSET;
        cd += 0.1 * dm * dm;
    }

    let lift = q * aero.wing_area * cl;
    let drag = q * aero.wing_area * cd;

    let thrust = if flight.engine_on {
        let thrust_base = if flight.throttle > 0.95 { aero.thrust_ab } else { aero.thrust_mil };
        let density_ratio = atmo.density_kg_m3 / RHO0;
        flight.throttle * thrust_base * density_ratio.powf(0.7)
    } else {
        0.0
    };

    let d_v = (thrust * alpha.cos() - drag) / mass - G0 * gamma.sin();

    let d_gamma = if v > 1.0 {
        (lift * roll.cos() + thrust * alpha.sin() - mass * G0 * gamma.cos()) / (mass * v)
    } else {
        0.0
    };

    let d_heading = if v > 1.0 && gamma.cos().abs() > 0.01 {
        lift * roll.sin() / (mass * v * gamma.cos())
    } else {
        0.0
    };

    let mut v = v + d_v * dt;
    let mut gamma = gamma + d_gamma * dt;
    let mut heading = heading + d_heading * dt;

    if v < MIN_SPEED {
        v = MIN_SPEED;
    }
    gamma = gamma.clamp(-MAX_GAMMA, MAX_GAMMA);

    heading %= std::f64::consts::TAU;
    if heading < 0.0 {
        heading += std::f64::consts::TAU;
    }

    let d_alt = v * gamma.sin() * dt;
    let dist = v * gamma.cos() * dt;

    let (new_lat, new_lon) = destination_point(e.geo_lat, e.geo_lon, heading, dist);
    e.geo_lat = new_lat;
    e.geo_lon = new_lon;
    e.geo_alt += d_alt;
    if e.geo_alt < 0.0 {
        e.geo_alt = 0.0;
    }

    flight.mach = if atmo.speed_of_sound_mps > 1.0 { v / atmo.speed_of_sound_mps } else { 0.0 };
    flight.speed = v;
    flight.heading = heading;
    flight.gamma = gamma;
    e.flight = Some(flight);
}

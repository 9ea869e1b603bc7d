//! Radar sensor sweep (component N).
//!
//! A periodic sweep (not every tick) that clears and rebuilds the
//! entity's detection list from scratch each time it fires, gated by
//! range then elevation, with a final Bernoulli detection-probability
//! roll per candidate. The elevation gate is computed from the sensor's
//! own `geo_lat`/`geo_lon` fields even when the sensor is orbital, which
//! keeps the gate cheap at the cost of precision for space-based radar.
//!
//! The RNG roll has to happen after the range/elevation scan releases
//! its borrow of `world.entities()`, so this runs in two passes: collect
//! gated candidates per firing sensor, then roll and record in sensor
//! order, target order, so replays stay bit-identical run to run.

use mc_astro::frames::{ecef_to_geodetic_approx, eci_to_ecef, elevation_angle, geodetic_to_ecef};
use mc_core::entity::{MCEntity, RadarDetection};
use mc_core::enums::PhysicsType;
use mc_core::vector::Vec3;
use mc_core::world::MCWorld;

fn entity_ecef(e: &MCEntity, sim_time: f64) -> Vec3 {
    if e.physics_type == PhysicsType::Orbital2Body {
        eci_to_ecef(e.eci_pos, sim_time)
    } else {
        geodetic_to_ecef(e.geo_lat, e.geo_lon, e.geo_alt)
    }
}

/// Bearing from `obs` to `tgt`, both ECEF metres, via a local ENU
/// projection around the observer. Radians, wrapped to `[0, tau)`.
fn compute_bearing_ecef(obs: Vec3, tgt: Vec3) -> f64 {
    let r_obs = obs.length();
    if r_obs < 1.0 {
        return 0.0;
    }

    let lat = (obs.z / r_obs).asin();
    let lon = obs.y.atan2(obs.x);
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let d = tgt - obs;
    let east = -sin_lon * d.x + cos_lon * d.y;
    let north = -sin_lat * cos_lon * d.x - sin_lat * sin_lon * d.y + cos_lat * d.z;

    let bearing = east.atan2(north);
    if bearing < 0.0 {
        bearing + std::f64::consts::TAU
    } else {
        bearing
    }
}

/// A range/elevation-gated candidate detection awaiting its probability
/// roll: target id, slant range, bearing.
struct Candidate {
    target_id: String,
    range: f64,
    bearing: f64,
}

/// One sensor's candidate list for this sweep, and which entity owns it.
struct Pending {
    sensor_idx: usize,
    candidates: Vec<Candidate>,
}

/// Gate candidates for a single sensor against every live opposing-team
/// entity in `all`, by range then elevation. No RNG use — purely
/// geometric, so it can run while `all` (a snapshot) is held immutably.
fn gate_candidates(sensor: &MCEntity, all: &[MCEntity], sim_time: f64) -> Vec<Candidate> {
    let radar = sensor.radar.expect("gate_candidates called on entity without radar");
    let sensor_ecef = entity_ecef(sensor, sim_time);

    let mut candidates = Vec::new();
    for target in all {
        if target.id == sensor.id || target.team == sensor.team || !target.is_live() {
            continue;
        }

        let tgt_ecef = entity_ecef(target, sim_time);
        let range = (tgt_ecef - sensor_ecef).length();
        if range > radar.max_range {
            continue;
        }

        let (tgt_lat, tgt_lon, tgt_alt) = if target.physics_type == PhysicsType::Orbital2Body {
            ecef_to_geodetic_approx(tgt_ecef)
        } else {
            (target.geo_lat, target.geo_lon, target.geo_alt)
        };

        let elev = elevation_angle(sensor.geo_lat, sensor.geo_lon, sensor.geo_alt, tgt_lat, tgt_lon, tgt_alt);
        if elev < radar.min_elevation_deg || elev > radar.max_elevation_deg {
            continue;
        }

        candidates.push(Candidate {
            target_id: target.id.clone(),
            range,
            bearing: compute_bearing_ecef(sensor_ecef, tgt_ecef),
        });
    }
    candidates
}

pub fn update_all(world: &mut MCWorld, dt: f64) {
    let sim_time = world.sim_time;
    let mut pending = Vec::new();

    for i in 0..world.entities().len() {
        let eligible = {
            let e = &world.entities()[i];
            e.radar.is_some() && e.is_live()
        };
        if !eligible {
            continue;
        }

        let fired = {
            let radar = world.entities_mut()[i].radar.as_mut().unwrap();
            radar.sweep_timer += dt;
            if radar.sweep_timer < radar.sweep_interval {
                false
            } else {
                radar.sweep_timer = 0.0;
                true
            }
        };
        if !fired {
            continue;
        }

        world.entities_mut()[i].radar_detections.clear();

        let snapshot: Vec<MCEntity> = world.entities().to_vec();
        let candidates = gate_candidates(&snapshot[i], &snapshot, sim_time);
        pending.push(Pending { sensor_idx: i, candidates });
    }

    for entry in pending {
        let detection_probability = world.entities()[entry.sensor_idx].radar.unwrap().detection_probability;
        for candidate in entry.candidates {
            if !world.rng.bernoulli(detection_probability) {
                continue;
            }
            world.entities_mut()[entry.sensor_idx].radar_detections.push(RadarDetection {
                entity_id: candidate.target_id,
                range: candidate.range,
                bearing: candidate.bearing,
                time: sim_time,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::entity::RadarConfig;

    fn make_radar_entity(id: &str, team: &str, lat: f64, lon: f64, alt: f64) -> MCEntity {
        let mut e = MCEntity::new(id, id, "radar", team);
        e.physics_type = PhysicsType::Static;
        e.geo_lat = lat;
        e.geo_lon = lon;
        e.geo_alt = alt;
        e.radar = Some(RadarConfig {
            max_range: 300_000.0,
            fov_deg: 360.0,
            min_elevation_deg: -5.0,
            max_elevation_deg: 80.0,
            sweep_interval: 1.0,
            detection_probability: 1.0,
            sweep_timer: 0.0,
        });
        e
    }

    fn world_with(entities: Vec<MCEntity>) -> MCWorld {
        let mut world = MCWorld::new(7);
        for e in entities {
            world.add(e);
        }
        world
    }

    #[test]
    fn sweep_does_not_fire_before_interval_elapses() {
        let radar_e = make_radar_entity("radar1", "blue", 0.0, 0.0, 0.0);
        let mut world = world_with(vec![radar_e]);
        update_all(&mut world, 0.1);
        assert!(world.get("radar1").unwrap().radar_detections.is_empty());
        assert!(world.get("radar1").unwrap().radar.unwrap().sweep_timer > 0.0);
    }

    #[test]
    fn detects_nearby_enemy_within_range_and_elevation_with_full_probability() {
        let radar_e = make_radar_entity("radar1", "blue", 0.0, 0.0, 0.0);
        let target = make_radar_entity("bandit1", "red", 0.01, 0.0, 5_000.0);
        let mut world = world_with(vec![radar_e, target]);
        update_all(&mut world, 1.0);

        let detections = &world.get("radar1").unwrap().radar_detections;
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].entity_id, "bandit1");
    }

    #[test]
    fn same_team_targets_are_never_detected() {
        let radar_e = make_radar_entity("radar1", "blue", 0.0, 0.0, 0.0);
        let friendly = make_radar_entity("wingman1", "blue", 0.01, 0.0, 5_000.0);
        let mut world = world_with(vec![radar_e, friendly]);
        update_all(&mut world, 1.0);
        assert!(world.get("radar1").unwrap().radar_detections.is_empty());
    }

    #[test]
    fn out_of_range_targets_are_not_detected() {
        let radar_e = make_radar_entity("radar1", "blue", 0.0, 0.0, 0.0);
        let target = make_radar_entity("bandit1", "red", 10.0, 10.0, 5_000.0);
        let mut world = world_with(vec![radar_e, target]);
        update_all(&mut world, 1.0);
        assert!(world.get("radar1").unwrap().radar_detections.is_empty());
    }

    #[test]
    fn zero_detection_probability_never_detects() {
        let mut radar_e = make_radar_entity("radar1", "blue", 0.0, 0.0, 0.0);
        radar_e.radar.as_mut().unwrap().detection_probability = 0.0;
        let target = make_radar_entity("bandit1", "red", 0.01, 0.0, 5_000.0);
        let mut world = world_with(vec![radar_e, target]);
        update_all(&mut world, 1.0);
        assert!(world.get("radar1").unwrap().radar_detections.is_empty());
    }

    #[test]
    fn detections_are_cleared_and_rebuilt_each_sweep() {
        let radar_e = make_radar_entity("radar1", "blue", 0.0, 0.0, 0.0);
        let target = make_radar_entity("bandit1", "red", 0.01, 0.0, 5_000.0);
        let mut world = world_with(vec![radar_e, target]);
        update_all(&mut world, 1.0);
        assert_eq!(world.get("radar1").unwrap().radar_detections.len(), 1);

        // Move the target out of range before the next sweep fires.
        world.get_mut("bandit1").unwrap().geo_lat = 30.0;
        update_all(&mut world, 1.0);
        assert!(world.get("radar1").unwrap().radar_detections.is_empty());
    }
}

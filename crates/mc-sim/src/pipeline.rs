//! Fixed-order system pipeline (component J).
//!
//! One simulation step runs exactly five stages in this order — AI,
//! Physics, Sensors, Weapons, Events — and every stage completes before
//! the next one starts. Determinism depends on this order never
//! changing and on every stage consuming `world.rng` (when it needs
//! randomness) in the same entity-then-target sequence every run.

use mc_astro::kepler::propagate_kepler_tick;
use mc_core::enums::{AiType, PhysicsType};
use mc_core::world::MCWorld;
use mc_tactics_ai::orbital_combat;
use mc_tactics_ai::waypoint_intercept::{intercept_step, patrol_step};

/// Advance the world by one tick: AI -> Physics -> Sensors -> Weapons -> Events.
pub fn tick(world: &mut MCWorld, dt: f64) {
    orbital_combat_ai_stage(world, dt);
    waypoint_patrol_stage(world, dt);
    intercept_stage(world, dt);

    kepler_physics_stage(world, dt);
    crate::flight3dof::update_all(world, dt);

    crate::radar::update_all(world, dt);

    crate::weapons_kinetic::update_all(world, dt);
    crate::weapons_sam::update_all(world, dt);
    crate::weapons_a2a::update_all(world, dt);

    crate::events::update_all(world);
}

fn orbital_combat_ai_stage(world: &mut MCWorld, dt: f64) {
    let snapshot = world.entities().to_vec();

    for i in 0..snapshot.len() {
        if snapshot[i].ai_type != AiType::OrbitalCombat || !snapshot[i].is_live() {
            continue;
        }

        let scan_just_fired = {
            let ai = world.entities_mut()[i].orbital_combat_ai.as_mut().unwrap();
            ai.scan_timer += dt;
            if ai.scan_timer >= ai.scan_interval {
                ai.scan_timer = 0.0;
                true
            } else {
                false
            }
        };

        let decision = orbital_combat::decide(&snapshot, &snapshot[i], scan_just_fired, dt);

        let e = &mut world.entities_mut()[i];
        if let Some(v) = decision.new_velocity {
            e.eci_vel = v;
        }
        if let Some(kk_target) = decision.kk_target_id {
            e.kk_target_id = Some(kk_target);
        }
        if scan_just_fired {
            e.orbital_combat_ai.as_mut().unwrap().current_target_id = decision.new_target_id;
        }
    }
}

fn waypoint_patrol_stage(world: &mut MCWorld, dt: f64) {
    for i in 0..world.entities().len() {
        if world.entities()[i].ai_type != AiType::WaypointPatrol || !world.entities()[i].is_live() {
            continue;
        }

        let e = &world.entities()[i];
        let Some(flight) = e.flight else { continue };
        let ai = e.waypoint_patrol_ai.clone().unwrap();
        let (lat, lon, alt) = (e.geo_lat, e.geo_lon, e.geo_alt);

        let (cmd, next_index) = patrol_step(&ai, lat, lon, alt, &flight, dt);

        let e = &mut world.entities_mut()[i];
        let flight = e.flight.as_mut().unwrap();
        flight.roll = cmd.roll;
        flight.alpha = cmd.alpha;
        flight.throttle = (flight.throttle + cmd.throttle_delta).clamp(0.0, 1.0);
        e.waypoint_patrol_ai.as_mut().unwrap().waypoint_index = next_index;
    }
}

fn intercept_stage(world: &mut MCWorld, dt: f64) {
    let snapshot = world.entities().to_vec();

    for i in 0..snapshot.len() {
        if snapshot[i].ai_type != AiType::Intercept || !snapshot[i].is_live() {
            continue;
        }

        let ai = snapshot[i].intercept_ai.clone().unwrap();
        let Some(target) = snapshot.iter().find(|t| t.id == ai.target_id) else { continue };
        if !target.is_live() {
            continue;
        }

        let e = &snapshot[i];
        let Some(flight) = e.flight else { continue };
        let Some((cmd, new_state)) = intercept_step(
            &ai,
            e.geo_lat,
            e.geo_lon,
            e.geo_alt,
            &flight,
            target.geo_lat,
            target.geo_lon,
            target.geo_alt,
            target.physics_type,
            dt,
        ) else {
            continue;
        };

        let e = &mut world.entities_mut()[i];
        let flight = e.flight.as_mut().unwrap();
        flight.roll = cmd.roll;
        flight.alpha = cmd.alpha;
        flight.throttle = (flight.throttle + cmd.throttle_delta).clamp(0.0, 1.0);
        e.intercept_ai.as_mut().unwrap().intercept_state = new_state;
    }
}

fn kepler_physics_stage(world: &mut MCWorld, dt: f64) {
    for entity in world.entities_mut() {
        if entity.physics_type != PhysicsType::Orbital2Body || !entity.is_live() {
            continue;
        }
        propagate_kepler_tick(&mut entity.eci_pos, &mut entity.eci_vel, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::entity::MCEntity;
    use mc_core::vector::Vec3;

    #[test]
    fn orbital_entity_advances_along_its_orbit_each_tick() {
        let mut world = MCWorld::new(1);
        let mut sat = MCEntity::new("sat1", "sat1", "satellite", "blue");
        sat.physics_type = PhysicsType::Orbital2Body;
        sat.eci_pos = Vec3::new(7_000_000.0, 0.0, 0.0);
        sat.eci_vel = Vec3::new(0.0, 7_500.0, 0.0);
        world.add(sat);

        let before = world.get("sat1").unwrap().eci_pos;
        tick(&mut world, 1.0);
        let after = world.get("sat1").unwrap().eci_pos;

        assert_ne!(before, after);
    }

    #[test]
    fn dead_entities_are_skipped_by_every_stage() {
        let mut world = MCWorld::new(1);
        let mut sat = MCEntity::new("sat1", "sat1", "satellite", "blue");
        sat.physics_type = PhysicsType::Orbital2Body;
        sat.kill();
        let before = sat.eci_pos;
        world.add(sat);

        tick(&mut world, 1.0);

        assert_eq!(world.get("sat1").unwrap().eci_pos, before);
    }

    #[test]
    fn sim_time_is_owned_by_the_runner_not_the_pipeline() {
        // tick() itself never advances sim_time; the batch/replay runner
        // does that before calling tick (`world.sim_time += dt; tick(world, dt);`).
        let mut world = MCWorld::new(1);
        let t0 = world.sim_time;
        tick(&mut world, 1.0);
        assert_eq!(world.sim_time, t0);
    }
}

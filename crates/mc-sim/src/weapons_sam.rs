//! SAM battery weapon (component O, SAM branch).
//!
//! A DETECT -> TRACK -> ENGAGE -> ASSESS phase machine per engagement,
//! plus a new-engagement scan over every same-team radar's detections.
//!
//! `weapons_hold` only suspends the *new-engagement scan* — missiles
//! already launched still fly out their phase timers, which is the
//! behavior an operator's "weapons hold" order actually describes.

use mc_astro::frames::slant_range_ecef;
use mc_core::entity::{MCEntity, SamEngagement};
use mc_core::enums::{EngagementPhase, EngagementResult, EngagementRules, PhysicsType};
use mc_core::world::MCWorld;

pub fn update_all(world: &mut MCWorld, dt: f64) {
    for i in 0..world.entities().len() {
        let eligible = {
            let e = &world.entities()[i];
            e.sam.is_some() && e.is_live()
        };
        if !eligible {
            continue;
        }
        advance_engagements(world, i, dt);
        if world.entities()[i].sam.as_ref().unwrap().engagement_rules != EngagementRules::WeaponsHold {
            scan_new_targets(world, i);
        }
    }
}

fn advance_engagements(world: &mut MCWorld, sam_idx: usize, dt: f64) {
    let sim_time = world.sim_time;
    let engagements = world.entities()[sam_idx].sam.as_ref().unwrap().engagements.clone();
    let mut surviving = Vec::with_capacity(engagements.len());

    for mut eng in engagements {
        eng.phase_timer -= dt;
        if eng.phase_timer > 0.0 {
            surviving.push(eng);
            continue;
        }

        match eng.phase {
            EngagementPhase::Detect => {
                eng.phase = EngagementPhase::Track;
                eng.phase_timer = 2.0;
                surviving.push(eng);
            }
            EngagementPhase::Track => {
                if let Some(kept) = transition_to_engage(world, sam_idx, eng, sim_time) {
                    surviving.push(kept);
                }
            }
            EngagementPhase::Engage => {
                transition_to_assess(world, sam_idx, &mut eng, sim_time);
                eng.phase = EngagementPhase::Assess;
                eng.phase_timer = 3.0;
                surviving.push(eng);
            }
            EngagementPhase::Assess => {
                // Assess complete: engagement is dropped.
            }
        }
    }

    world.entities_mut()[sam_idx].sam.as_mut().unwrap().engagements = surviving;
}

fn transition_to_engage(world: &mut MCWorld, sam_idx: usize, mut eng: SamEngagement, sim_time: f64) -> Option<SamEngagement> {
    let Some(target_idx) = world.index_of(&eng.target_id) else { return None };
    if !world.entities()[target_idx].is_live() {
        return None;
    }

    let missiles_ready = world.entities()[sam_idx].sam.as_ref().unwrap().missiles_ready;
    if missiles_ready == 0 {
        return None;
    }

    let sam = &world.entities()[sam_idx];
    let target = &world.entities()[target_idx];
    let range = slant_range_ecef(sam.geo_lat, sam.geo_lon, sam.geo_alt, target.geo_lat, target.geo_lon, target.geo_alt);
    let missile_speed = sam.sam.as_ref().unwrap().missile_speed;
    let tof = range / missile_speed;

    let salvo_size = sam.sam.as_ref().unwrap().salvo_size;
    let to_fire = salvo_size.min(missiles_ready);
    let target_name = target.name.clone();

    eng.missiles_fired = to_fire;
    {
        let sam_mut = world.entities_mut()[sam_idx].sam.as_mut().unwrap();
        sam_mut.missiles_ready -= to_fire;
    }
    for _ in 0..to_fire {
        let sam_e = &mut world.entities_mut()[sam_idx];
        sam_e.record(eng.target_id.clone(), target_name.clone(), EngagementResult::Launch, sim_time);
    }

    eng.phase = EngagementPhase::Engage;
    eng.phase_timer = tof;
    Some(eng)
}

fn transition_to_assess(world: &mut MCWorld, sam_idx: usize, eng: &mut SamEngagement, sim_time: f64) {
    let pk = world.entities()[sam_idx].sam.as_ref().unwrap().pk_per_missile;
    let mut any_hit = false;
    for _ in 0..eng.missiles_fired {
        if world.rng.bernoulli(pk) {
            any_hit = true;
        }
    }

    let target_idx = world.index_of(&eng.target_id);
    let target_live = target_idx.map(|idx| world.entities()[idx].is_live()).unwrap_or(false);
    let target_name = target_idx
        .map(|idx| world.entities()[idx].name.clone())
        .unwrap_or_else(|| eng.target_id.clone());

    if any_hit && target_live {
        let target_idx = target_idx.unwrap();
        let sam_id = world.entities()[sam_idx].id.clone();
        let sam_name = world.entities()[sam_idx].name.clone();

        world.entities_mut()[target_idx].kill();
        world.entities_mut()[target_idx].record(sam_id, sam_name, EngagementResult::KilledBy, sim_time);

        world.entities_mut()[sam_idx].record(eng.target_id.clone(), target_name, EngagementResult::Kill, sim_time);
    } else {
        world.entities_mut()[sam_idx].record(eng.target_id.clone(), target_name, EngagementResult::Miss, sim_time);
    }
}

fn scan_new_targets(world: &mut MCWorld, sam_idx: usize) {
    let sam_team = world.entities()[sam_idx].team.clone();
    let (sam_lat, sam_lon, sam_alt) = {
        let e = &world.entities()[sam_idx];
        (e.geo_lat, e.geo_lon, e.geo_alt)
    };
    let min_range = world.entities()[sam_idx].sam.as_ref().unwrap().min_range;
    let max_range = world.entities()[sam_idx].sam.as_ref().unwrap().max_range;

    let mut detection_ids: Vec<String> = Vec::new();
    for radar_entity in world.entities() {
        if radar_entity.radar.is_none() || radar_entity.team != sam_team || !radar_entity.is_live() {
            continue;
        }
        for det in &radar_entity.radar_detections {
            detection_ids.push(det.entity_id.clone());
        }
    }

    for target_id in detection_ids {
        let already = world.entities()[sam_idx].sam.as_ref().unwrap().engagements.iter().any(|e| e.target_id == target_id);
        if already {
            continue;
        }

        let Some(target_idx) = world.index_of(&target_id) else { continue };
        let target = &world.entities()[target_idx];
        if !target.is_live() || target.physics_type == PhysicsType::Static || target.geo_alt < 100.0 {
            continue;
        }

        let range = slant_range_ecef(sam_lat, sam_lon, sam_alt, target.geo_lat, target.geo_lon, target.geo_alt);
        if range > max_range || range < min_range {
            continue;
        }

        world.entities_mut()[sam_idx].sam.as_mut().unwrap().engagements.push(SamEngagement {
            target_id,
            phase: EngagementPhase::Detect,
            phase_timer: 1.0,
            missiles_fired: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::entity::{RadarConfig, RadarDetection, SamBattery};

    fn sam_entity(id: &str, team: &str) -> MCEntity {
        let mut e = MCEntity::new(id, id, "sam_site", team);
        e.physics_type = PhysicsType::Static;
        e.sam = Some(SamBattery {
            min_range: 5_000.0,
            max_range: 150_000.0,
            missile_speed: 1_200.0,
            missiles_ready: 8,
            salvo_size: 2,
            pk_per_missile: 1.0,
            engagement_rules: EngagementRules::Free,
            engagements: Vec::new(),
        });
        e
    }

    fn flight_target(id: &str, team: &str, lat: f64, alt: f64) -> MCEntity {
        let mut e = MCEntity::new(id, id, "fighter", team);
        e.physics_type = PhysicsType::Flight3Dof;
        e.geo_lat = lat;
        e.geo_alt = alt;
        e
    }

    #[test]
    fn new_target_from_radar_detection_enters_detect_phase() {
        let mut radar = sam_entity("radar1", "blue");
        radar.sam = None;
        radar.radar = Some(RadarConfig { max_range: 300_000.0, fov_deg: 360.0, min_elevation_deg: -5.0, max_elevation_deg: 80.0, sweep_interval: 1.0, detection_probability: 1.0, sweep_timer: 0.0 });
        radar.radar_detections.push(RadarDetection { entity_id: "bandit1".to_string(), range: 20_000.0, bearing: 0.0, time: 0.0 });

        let sam = sam_entity("sam1", "blue");
        let target = flight_target("bandit1", "red", 0.1, 8_000.0);

        let mut world = MCWorld::new(1);
        world.add(radar);
        world.add(sam);
        world.add(target);

        update_all(&mut world, 0.1);

        let sam_after = world.get("sam1").unwrap();
        assert_eq!(sam_after.sam.as_ref().unwrap().engagements.len(), 1);
        assert_eq!(sam_after.sam.as_ref().unwrap().engagements[0].phase, EngagementPhase::Detect);
    }

    #[test]
    fn weapons_hold_suspends_new_scan_but_not_existing_engagement() {
        let mut sam = sam_entity("sam1", "blue");
        sam.sam.as_mut().unwrap().engagement_rules = EngagementRules::WeaponsHold;
        sam.sam.as_mut().unwrap().engagements.push(SamEngagement {
            target_id: "bandit1".to_string(),
            phase: EngagementPhase::Detect,
            phase_timer: 0.05,
            missiles_fired: 0,
        });
        let target = flight_target("bandit1", "red", 0.1, 8_000.0);

        let mut world = MCWorld::new(1);
        world.add(sam);
        world.add(target);

        update_all(&mut world, 0.1);

        let sam_after = world.get("sam1").unwrap();
        assert_eq!(sam_after.sam.as_ref().unwrap().engagements[0].phase, EngagementPhase::Track);
    }

    #[test]
    fn detect_transitions_to_track_after_dwell() {
        let mut sam = sam_entity("sam1", "blue");
        sam.sam.as_mut().unwrap().engagements.push(SamEngagement {
            target_id: "bandit1".to_string(),
            phase: EngagementPhase::Detect,
            phase_timer: 0.05,
            missiles_fired: 0,
        });
        let target = flight_target("bandit1", "red", 0.1, 8_000.0);
        let mut world = MCWorld::new(1);
        world.add(sam);
        world.add(target);

        update_all(&mut world, 0.1);

        assert_eq!(world.get("sam1").unwrap().sam.as_ref().unwrap().engagements[0].phase, EngagementPhase::Track);
    }

    #[test]
    fn full_chain_with_guaranteed_hit_kills_target() {
        let mut sam = sam_entity("sam1", "blue");
        sam.sam.as_mut().unwrap().engagements.push(SamEngagement {
            target_id: "bandit1".to_string(),
            phase: EngagementPhase::Track,
            phase_timer: 0.01,
            missiles_fired: 0,
        });
        let target = flight_target("bandit1", "red", 0.001, 8_000.0);
        let mut world = MCWorld::new(1);
        world.add(sam);
        world.add(target);

        update_all(&mut world, 0.1); // TRACK -> ENGAGE, fires salvo
        update_all(&mut world, 100_000.0); // ENGAGE -> ASSESS, guaranteed hit (pk=1.0)

        assert!(!world.get("bandit1").unwrap().is_live());
        assert!(world.get("sam1").unwrap().engagement_log.iter().any(|r| r.result == EngagementResult::Kill));
    }
}

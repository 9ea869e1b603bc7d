//! Air-to-air missile weapon (component O, A2A branch).
//!
//! A LOCK -> GUIDE -> ASSESS phase machine per engagement, weapon
//! selection by min-overkill (smallest rated range that still covers
//! the target), and two sources of new engagements — the shooter's own
//! radar detections, and an assigned intercept-AI target once
//! `intercept_state == 1`.
//!
//! Weapon selection falls back to the shortest-range missile spec with
//! remaining inventory when no spec's rated range covers the target,
//! rather than declining to engage.
//!
//! `weapons_hold` suspends the new-engagement scan only, not missiles
//! already in flight.

use mc_astro::frames::slant_range_ecef;
use mc_core::entity::{A2aEngagement, MCEntity};
use mc_core::enums::{EngagementPhase, EngagementResult, EngagementRules, PhysicsType};
use mc_core::world::MCWorld;

const LOCK_TIME: f64 = 3.0;

#[derive(Debug, Clone, Copy)]
struct WeaponSpec {
    name: &'static str,
    range: f64,
    pk: f64,
    speed: f64,
}

const SPECS: [WeaponSpec; 4] = [
    WeaponSpec { name: "aim120", range: 80_000.0, pk: 0.75, speed: 1_400.0 },
    WeaponSpec { name: "aim9", range: 18_000.0, pk: 0.85, speed: 900.0 },
    WeaponSpec { name: "r77", range: 80_000.0, pk: 0.70, speed: 1_300.0 },
    WeaponSpec { name: "r73", range: 18_000.0, pk: 0.80, speed: 850.0 },
];

fn spec_by_name(name: &str) -> Option<WeaponSpec> {
    SPECS.iter().copied().find(|s| s.name == name)
}

/// Min-overkill weapon selection with a deterministic fallback: if no
/// spec in inventory covers `range`, pick the shortest-range spec that
/// still has ammunition.
fn select_weapon(inventory: &std::collections::BTreeMap<String, u32>, range: f64) -> Option<&'static str> {
    let mut best: Option<WeaponSpec> = None;
    let mut fallback: Option<WeaponSpec> = None;

    for (name, &count) in inventory {
        if count == 0 {
            continue;
        }
        let Some(spec) = spec_by_name(name) else { continue };

        if fallback.map(|f| spec.range < f.range).unwrap_or(true) {
            fallback = Some(spec);
        }
        if spec.range >= range && best.map(|b| spec.range < b.range).unwrap_or(true) {
            best = Some(spec);
        }
    }

    best.or(fallback).map(|s| s.name)
}

fn has_any_ammo(inventory: &std::collections::BTreeMap<String, u32>) -> bool {
    inventory.values().any(|&c| c > 0)
}

pub fn update_all(world: &mut MCWorld, dt: f64) {
    for i in 0..world.entities().len() {
        let eligible = {
            let e = &world.entities()[i];
            e.a2a.is_some() && e.is_live()
        };
        if !eligible {
            continue;
        }

        if !has_any_ammo(&world.entities()[i].a2a.as_ref().unwrap().inventory) {
            continue;
        }

        advance_engagements(world, i, dt);
        if world.entities()[i].a2a.as_ref().unwrap().engagement_rules != EngagementRules::WeaponsHold {
            scan_new_targets(world, i);
        }
    }
}

fn advance_engagements(world: &mut MCWorld, shooter_idx: usize, dt: f64) {
    let sim_time = world.sim_time;
    let engagements = world.entities()[shooter_idx].a2a.as_ref().unwrap().engagements.clone();
    let mut surviving = Vec::with_capacity(engagements.len());

    for mut eng in engagements {
        eng.phase_timer -= dt;
        if eng.phase_timer > 0.0 {
            surviving.push(eng);
            continue;
        }

        match eng.phase {
            EngagementPhase::Detect => {
                // A2A never parks in Detect; treat defensively as Track.
                eng.phase = EngagementPhase::Track;
                surviving.push(eng);
            }
            EngagementPhase::Track => {
                if let Some(kept) = transition_to_guide(world, shooter_idx, eng, sim_time) {
                    surviving.push(kept);
                }
            }
            EngagementPhase::Engage => {
                transition_to_assess(world, shooter_idx, &mut eng, sim_time);
                eng.phase = EngagementPhase::Assess;
                eng.phase_timer = 2.0;
                surviving.push(eng);
            }
            EngagementPhase::Assess => {}
        }
    }

    world.entities_mut()[shooter_idx].a2a.as_mut().unwrap().engagements = surviving;
}

fn transition_to_guide(world: &mut MCWorld, shooter_idx: usize, mut eng: A2aEngagement, sim_time: f64) -> Option<A2aEngagement> {
    let target_idx = world.index_of(&eng.target_id)?;
    if !world.entities()[target_idx].is_live() {
        return None;
    }

    {
        let inventory = &mut world.entities_mut()[shooter_idx].a2a.as_mut().unwrap().inventory;
        let count = inventory.get_mut(&eng.weapon_name)?;
        if *count == 0 {
            return None;
        }
        *count -= 1;
    }

    let target_name = world.entities()[target_idx].name.clone();
    world.entities_mut()[shooter_idx].record(eng.target_id.clone(), target_name, EngagementResult::Launch, sim_time);

    let shooter = &world.entities()[shooter_idx];
    let target = &world.entities()[target_idx];
    let range = slant_range_ecef(shooter.geo_lat, shooter.geo_lon, shooter.geo_alt, target.geo_lat, target.geo_lon, target.geo_alt);
    let speed = spec_by_name(&eng.weapon_name).map(|s| s.speed).unwrap_or(1_000.0);

    eng.phase = EngagementPhase::Engage;
    eng.phase_timer = range / speed;
    Some(eng)
}

fn transition_to_assess(world: &mut MCWorld, shooter_idx: usize, eng: &mut A2aEngagement, sim_time: f64) {
    let pk = spec_by_name(&eng.weapon_name).map(|s| s.pk).unwrap_or(0.5);
    let hit = world.rng.bernoulli(pk);

    let target_idx = world.index_of(&eng.target_id);
    let target_live = target_idx.map(|idx| world.entities()[idx].is_live()).unwrap_or(false);
    let target_name = target_idx
        .map(|idx| world.entities()[idx].name.clone())
        .unwrap_or_else(|| eng.target_id.clone());

    if hit && target_live {
        let target_idx = target_idx.unwrap();
        let shooter_id = world.entities()[shooter_idx].id.clone();
        let shooter_name = world.entities()[shooter_idx].name.clone();

        world.entities_mut()[target_idx].kill();
        world.entities_mut()[target_idx].record(shooter_id, shooter_name, EngagementResult::KilledBy, sim_time);
        world.entities_mut()[shooter_idx].record(eng.target_id.clone(), target_name, EngagementResult::Kill, sim_time);
    } else {
        world.entities_mut()[shooter_idx].record(eng.target_id.clone(), target_name, EngagementResult::Miss, sim_time);
    }
}

fn scan_new_targets(world: &mut MCWorld, shooter_idx: usize) {
    let mut candidate_ids: Vec<String> = world.entities()[shooter_idx].radar_detections.iter().map(|d| d.entity_id.clone()).collect();

    let intercept_target = world.entities()[shooter_idx].intercept_ai.as_ref().and_then(|ai| {
        if ai.intercept_state == 1 && !ai.target_id.is_empty() {
            Some(ai.target_id.clone())
        } else {
            None
        }
    });
    if let Some(target_id) = intercept_target {
        candidate_ids.push(target_id);
    }

    let (shooter_lat, shooter_lon, shooter_alt) = {
        let e = &world.entities()[shooter_idx];
        (e.geo_lat, e.geo_lon, e.geo_alt)
    };

    for target_id in candidate_ids {
        let already = world.entities()[shooter_idx].a2a.as_ref().unwrap().engagements.iter().any(|e| e.target_id == target_id);
        if already {
            continue;
        }

        let Some(target_idx) = world.index_of(&target_id) else { continue };
        let target = &world.entities()[target_idx];
        if !target.is_live() {
            continue;
        }
        let range = slant_range_ecef(shooter_lat, shooter_lon, shooter_alt, target.geo_lat, target.geo_lon, target.geo_alt);
        let inventory = &world.entities()[shooter_idx].a2a.as_ref().unwrap().inventory;
        let Some(weapon_name) = select_weapon(inventory, range) else { continue };

        world.entities_mut()[shooter_idx].a2a.as_mut().unwrap().engagements.push(A2aEngagement {
            target_id,
            weapon_name: weapon_name.to_string(),
            phase: EngagementPhase::Track,
            phase_timer: LOCK_TIME,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::entity::A2aLoadout;
    use std::collections::BTreeMap;

    fn shooter_with(loadout: &[(&str, u32)]) -> MCEntity {
        let mut e = MCEntity::new("f22_1", "f22_1", "fighter", "blue");
        e.physics_type = PhysicsType::Flight3Dof;
        let mut inventory = BTreeMap::new();
        for (name, count) in loadout {
            inventory.insert(name.to_string(), *count);
        }
        e.a2a = Some(A2aLoadout { loadout: Vec::new(), inventory, engagement_rules: EngagementRules::Free, engagements: Vec::new() });
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
    fn select_weapon_picks_shortest_range_that_covers_target() {
        let mut inv = BTreeMap::new();
        inv.insert("aim120".to_string(), 2u32);
        inv.insert("aim9".to_string(), 2u32);
        assert_eq!(select_weapon(&inv, 10_000.0), Some("aim9"));
        assert_eq!(select_weapon(&inv, 50_000.0), Some("aim120"));
    }

    #[test]
    fn select_weapon_falls_back_to_shortest_available_when_nothing_covers_range() {
        let mut inv = BTreeMap::new();
        inv.insert("aim9".to_string(), 1u32);
        assert_eq!(select_weapon(&inv, 100_000.0), Some("aim9"));
    }

    #[test]
    fn empty_inventory_selects_nothing() {
        let inv = BTreeMap::new();
        assert_eq!(select_weapon(&inv, 10_000.0), None);
    }

    #[test]
    fn radar_detection_spawns_lock_engagement() {
        let mut shooter = shooter_with(&[("aim120", 4)]);
        shooter.radar_detections.push(mc_core::entity::RadarDetection { entity_id: "bandit1".to_string(), range: 30_000.0, bearing: 0.0, time: 0.0 });
        let target = flight_target("bandit1", "red", 0.1, 8_000.0);

        let mut world = MCWorld::new(1);
        world.add(shooter);
        world.add(target);
        update_all(&mut world, 0.1);

        let e = world.get("f22_1").unwrap();
        assert_eq!(e.a2a.as_ref().unwrap().engagements.len(), 1);
        assert_eq!(e.a2a.as_ref().unwrap().engagements[0].weapon_name, "aim120");
    }

    #[test]
    fn no_ammo_means_no_engagement_progresses() {
        let mut shooter = shooter_with(&[("aim120", 0)]);
        shooter.radar_detections.push(mc_core::entity::RadarDetection { entity_id: "bandit1".to_string(), range: 30_000.0, bearing: 0.0, time: 0.0 });
        let target = flight_target("bandit1", "red", 0.1, 8_000.0);

        let mut world = MCWorld::new(1);
        world.add(shooter);
        world.add(target);
        update_all(&mut world, 0.1);

        assert!(world.get("f22_1").unwrap().a2a.as_ref().unwrap().engagements.is_empty());
    }

    #[test]
    fn weapons_hold_suspends_new_scan_but_not_in_flight_engagement() {
        let mut shooter = shooter_with(&[("aim120", 4)]);
        shooter.a2a.as_mut().unwrap().engagement_rules = EngagementRules::WeaponsHold;
        shooter.a2a.as_mut().unwrap().engagements.push(A2aEngagement {
            target_id: "bandit1".to_string(),
            weapon_name: "aim120".to_string(),
            phase: EngagementPhase::Track,
            phase_timer: 0.05,
        });
        let target = flight_target("bandit1", "red", 0.001, 8_000.0);

        let mut world = MCWorld::new(1);
        world.add(shooter);
        world.add(target);
        update_all(&mut world, 0.1);

        // The already-locked missile still fires (phase advances past
        // Track) even though the shooter has no new-target scan this
        // tick; weapons_hold only withholds fresh engagements.
        let e = world.get("f22_1").unwrap();
        assert_eq!(e.a2a.as_ref().unwrap().engagements.len(), 1);
        assert_eq!(e.a2a.as_ref().unwrap().engagements[0].phase, EngagementPhase::Engage);
    }
}

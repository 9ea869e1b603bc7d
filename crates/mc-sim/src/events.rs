//! Scenario event triggers and actions (component P).
//!
//! Each tick, every unfired event's trigger is checked; on first match
//! its action runs once and the event is marked fired. Proximity uses
//! haversine ground distance when both entities are geodetic
//! (`Flight3Dof`/`Static`), or raw ECEF Euclidean distance when either
//! is orbital.
//!
//! Engagement rules are split per weapon component (`sam`, `a2a`)
//! rather than a single entity-wide field, so `change_rules`/`set_state`
//! actions apply to whichever weapon bundles the targeted entity
//! actually has.

use mc_astro::frames::{eci_to_ecef, geodetic_to_ecef, haversine_distance};
use mc_core::enums::{EngagementRules, PhysicsType};
use mc_core::events::{EventAction, EventTrigger};
use mc_core::world::MCWorld;

fn is_geodetic(physics_type: PhysicsType) -> bool {
    matches!(physics_type, PhysicsType::Flight3Dof | PhysicsType::Static)
}

fn entity_ecef_position(physics_type: PhysicsType, eci_pos: mc_core::vector::Vec3, geo_lat: f64, geo_lon: f64, geo_alt: f64, sim_time: f64) -> mc_core::vector::Vec3 {
    if physics_type == PhysicsType::Orbital2Body {
        eci_to_ecef(eci_pos, sim_time)
    } else {
        geodetic_to_ecef(geo_lat, geo_lon, geo_alt)
    }
}

fn check_trigger(trigger: &EventTrigger, world: &MCWorld) -> bool {
    match trigger {
        EventTrigger::Time { t } => world.sim_time >= *t,
        EventTrigger::Proximity { entity_a, entity_b, range } => {
            let (Some(a), Some(b)) = (world.get(entity_a), world.get(entity_b)) else { return false };
            if !a.is_live() || !b.is_live() {
                return false;
            }

            let distance = if is_geodetic(a.physics_type) && is_geodetic(b.physics_type) {
                haversine_distance(a.geo_lat, a.geo_lon, b.geo_lat, b.geo_lon)
            } else {
                let pa = entity_ecef_position(a.physics_type, a.eci_pos, a.geo_lat, a.geo_lon, a.geo_alt, world.sim_time);
                let pb = entity_ecef_position(b.physics_type, b.eci_pos, b.geo_lat, b.geo_lon, b.geo_alt, world.sim_time);
                (pb - pa).length()
            };

            distance <= *range
        }
        EventTrigger::Detection { sensor_id, target_id } => {
            let Some(sensor) = world.get(sensor_id) else { return false };
            let Some(radar) = &sensor.radar else { return false };
            let _ = radar;
            sensor.radar_detections.iter().any(|d| &d.entity_id == target_id)
        }
    }
}

fn apply_engagement_rules(world: &mut MCWorld, entity_id: &str, rules: EngagementRules) {
    let Some(entity) = world.get_mut(entity_id) else { return };
    if let Some(sam) = &mut entity.sam {
        sam.engagement_rules = rules;
    }
    if let Some(a2a) = &mut entity.a2a {
        a2a.engagement_rules = rules;
    }
}

fn parse_engagement_rules(value: &str) -> EngagementRules {
    match value {
        "weapons_hold" | "hold" => EngagementRules::WeaponsHold,
        _ => EngagementRules::Free,
    }
}

fn execute_action(action: &EventAction, world: &mut MCWorld) {
    match action {
        EventAction::Message { text } => {
            eprintln!("[EVENT] {text}");
            world.messages.push((world.sim_time, text.clone()));
        }
        EventAction::ChangeRules { entity_id, rules } => {
            apply_engagement_rules(world, entity_id, *rules);
        }
        EventAction::SetState { entity_id, field, value } => match field.as_str() {
            "engagementRules" | "engagement_rules" => {
                apply_engagement_rules(world, entity_id, parse_engagement_rules(value));
            }
            "active" => {
                if let Some(e) = world.get_mut(entity_id) {
                    e.active = value == "true";
                }
            }
            "destroyed" => {
                if let Some(e) = world.get_mut(entity_id) {
                    e.destroyed = value == "true";
                }
            }
            _ => {}
        },
    }
}

pub fn update_all(world: &mut MCWorld) {
    let pending: Vec<usize> = world
        .events
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.fired)
        .map(|(i, _)| i)
        .collect();

    for i in pending {
        let trigger = world.events[i].trigger.clone();
        if !check_trigger(&trigger, world) {
            continue;
        }
        let action = world.events[i].action.clone();
        execute_action(&action, world);
        world.events[i].fired = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::entity::{MCEntity, SamBattery};
    use mc_core::events::ScenarioEvent;
    use mc_core::vector::Vec3;

    fn flight_entity(id: &str, lat: f64, lon: f64) -> MCEntity {
        let mut e = MCEntity::new(id, id, "fighter", "blue");
        e.physics_type = PhysicsType::Flight3Dof;
        e.geo_lat = lat;
        e.geo_lon = lon;
        e
    }

    #[test]
    fn time_trigger_fires_once_sim_time_reached() {
        let mut world = MCWorld::new(1);
        world.sim_time = 10.0;
        world.events.push(ScenarioEvent { id: "e1".into(), name: "e1".into(), trigger: EventTrigger::Time { t: 5.0 }, action: EventAction::Message { text: "go".into() }, fired: false });
        update_all(&mut world);
        assert!(world.events[0].fired);
    }

    #[test]
    fn time_trigger_does_not_fire_early() {
        let mut world = MCWorld::new(1);
        world.sim_time = 1.0;
        world.events.push(ScenarioEvent { id: "e1".into(), name: "e1".into(), trigger: EventTrigger::Time { t: 5.0 }, action: EventAction::Message { text: "go".into() }, fired: false });
        update_all(&mut world);
        assert!(!world.events[0].fired);
    }

    #[test]
    fn proximity_trigger_uses_haversine_for_two_geodetic_entities() {
        let mut world = MCWorld::new(1);
        world.add(flight_entity("a", 0.0, 0.0));
        world.add(flight_entity("b", 0.001, 0.0));
        world.events.push(ScenarioEvent {
            id: "e1".into(),
            name: "e1".into(),
            trigger: EventTrigger::Proximity { entity_a: "a".into(), entity_b: "b".into(), range: 1_000.0 },
            action: EventAction::Message { text: "close".into() },
            fired: false,
        });
        update_all(&mut world);
        assert!(world.events[0].fired);
    }

    #[test]
    fn change_rules_action_sets_weapons_hold_on_sam() {
        let mut world = MCWorld::new(1);
        let mut sam = MCEntity::new("sam1", "sam1", "sam_site", "blue");
        sam.sam = Some(SamBattery { min_range: 0.0, max_range: 1.0, missile_speed: 1.0, missiles_ready: 1, salvo_size: 1, pk_per_missile: 1.0, engagement_rules: EngagementRules::Free, engagements: Vec::new() });
        world.add(sam);
        world.sim_time = 1.0;
        world.events.push(ScenarioEvent {
            id: "e1".into(),
            name: "e1".into(),
            trigger: EventTrigger::Time { t: 0.0 },
            action: EventAction::ChangeRules { entity_id: "sam1".into(), rules: EngagementRules::WeaponsHold },
            fired: false,
        });
        update_all(&mut world);
        assert_eq!(world.get("sam1").unwrap().sam.as_ref().unwrap().engagement_rules, EngagementRules::WeaponsHold);
    }

    #[test]
    fn set_state_destroyed_field_kills_entity() {
        let mut world = MCWorld::new(1);
        world.add(flight_entity("a", 0.0, 0.0));
        world.sim_time = 1.0;
        world.events.push(ScenarioEvent {
            id: "e1".into(),
            name: "e1".into(),
            trigger: EventTrigger::Time { t: 0.0 },
            action: EventAction::SetState { entity_id: "a".into(), field: "destroyed".into(), value: "true".into() },
            fired: false,
        });
        update_all(&mut world);
        assert!(world.get("a").unwrap().destroyed);
    }

    #[test]
    fn fired_events_never_re_evaluate() {
        let mut world = MCWorld::new(1);
        world.sim_time = 10.0;
        world.events.push(ScenarioEvent { id: "e1".into(), name: "e1".into(), trigger: EventTrigger::Time { t: 0.0 }, action: EventAction::Message { text: "go".into() }, fired: true });
        update_all(&mut world);
        assert!(world.events[0].fired);
    }

    #[test]
    fn orbital_entity_proximity_uses_ecef_distance() {
        let mut world = MCWorld::new(1);
        let mut sat_a = MCEntity::new("sat_a", "sat_a", "satellite", "blue");
        sat_a.physics_type = PhysicsType::Orbital2Body;
        sat_a.eci_pos = Vec3::new(7_000_000.0, 0.0, 0.0);
        let mut sat_b = MCEntity::new("sat_b", "sat_b", "satellite", "red");
        sat_b.physics_type = PhysicsType::Orbital2Body;
        sat_b.eci_pos = Vec3::new(7_000_100.0, 0.0, 0.0);
        world.add(sat_a);
        world.add(sat_b);
        world.events.push(ScenarioEvent {
            id: "e1".into(),
            name: "e1".into(),
            trigger: EventTrigger::Proximity { entity_a: "sat_a".into(), entity_b: "sat_b".into(), range: 200.0 },
            action: EventAction::Message { text: "close approach".into() },
            fired: false,
        });
        update_all(&mut world);
        assert!(world.events[0].fired);
    }
}

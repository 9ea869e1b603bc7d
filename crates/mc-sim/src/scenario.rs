//! Scenario JSON parsing (component I).
//!
//! Builds an [`MCWorld`] from the scenario document's entity array,
//! with field-name fallback chains and concrete numeric defaults for
//! every optional field. Deliberately reads through [`JsonExt`] rather
//! than a typed `serde` struct, since scenario documents are sparse and
//! near enough every field is optional with its own default.

use mc_astro::kepler;
use mc_core::entity::{
    A2aLoadout, InterceptAi, KineticKill, MCEntity, OrbitalCombatAi, RadarConfig, SamBattery,
    Waypoint, WaypointPatrolAi,
};
use mc_core::enums::{AiType, CombatRole, EngagementRules, PhysicsType, WeaponType};
use mc_core::error::{MCError, MCResult};
use mc_core::events::{EventAction, EventTrigger, ScenarioEvent};
use mc_core::state::OrbitalElements;
use mc_core::vector::Vec3;
use mc_core::world::MCWorld;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::aircraft_configs;
use crate::json_ext::JsonExt;
use mc_tactics_ai::waypoint_intercept::default_patrol_ai;

/// Parse a full scenario document into an [`MCWorld`] seeded with `seed`.
///
/// Returns [`MCError::InputError`] if `entities` is missing or not an
/// array.
pub fn parse_scenario(doc: &Value, seed: u32) -> MCResult<MCWorld> {
    let entities = doc.get("entities").and_then(Value::as_array).ok_or_else(|| {
        MCError::input(None, "entities", "scenario document has no `entities` array")
    })?;

    let mut world = MCWorld::new(seed);
    for def in entities {
        let entity = parse_entity(def)?;
        world.add(entity);
    }

    if let Some(events) = doc.get("events").and_then(Value::as_array) {
        for (i, def) in events.iter().enumerate() {
            world.events.push(parse_event(def, i));
        }
    }

    Ok(world)
}

fn parse_event(def: &Value, index: usize) -> ScenarioEvent {
    let id = def.owned_str_or("id", &format!("event_{index}"));
    let name = def.owned_str_or("name", &id);

    let trigger_def = def.field("trigger");
    let trigger_type = trigger_def.str_or("type", "time");
    let trigger = match trigger_type {
        "proximity" => EventTrigger::Proximity {
            entity_a: entity_ref(trigger_def, "entityA", "entityA"),
            entity_b: entity_ref(trigger_def, "entityB", "entityB"),
            range: trigger_def.f64_or("range_m", trigger_def.f64_or("range", 1_000.0)),
        },
        "detection" => EventTrigger::Detection {
            sensor_id: entity_ref(trigger_def, "entityId", "sensorId"),
            target_id: entity_ref(trigger_def, "targetId", "targetId"),
        },
        _ => EventTrigger::Time { t: trigger_def.f64_or("t", 0.0) },
    };

    let action_def = def.field("action");
    let action_type = action_def.str_or("type", "message");
    let action = match action_type {
        "set_state" => EventAction::SetState {
            entity_id: entity_ref(action_def, "entity", "entityId"),
            field: action_def.owned_str_or("field", ""),
            value: action_def.owned_str_or("value", ""),
        },
        "change_rules" => EventAction::ChangeRules {
            entity_id: entity_ref(action_def, "entity", "entityId"),
            rules: parse_engagement_rules(action_def.str_or(
                "engagementRules",
                action_def.str_or("value", "free"),
            )),
        },
        _ => EventAction::Message {
            text: action_def.owned_str_or("text", action_def.owned_str_or("message", "")),
        },
    };

    ScenarioEvent { id, name, trigger, action, fired: false }
}

/// Resolve an id field that may be keyed under either of two names
/// (e.g. `entityA`/`entityId`).
fn entity_ref(def: &Value, primary: &str, secondary: &str) -> String {
    if def.has_key(primary) {
        def.owned_str_or(primary, "")
    } else {
        def.owned_str_or(secondary, "")
    }
}

fn parse_engagement_rules(s: &str) -> EngagementRules {
    match s {
        "weapons_hold" | "hold" => EngagementRules::WeaponsHold,
        _ => EngagementRules::Free,
    }
}

fn parse_entity(def: &Value) -> MCResult<MCEntity> {
    let id = def.str_or("id", "");
    if id.is_empty() {
        return Err(MCError::input(None, "id", "entity is missing its `id` field"));
    }
    let name = def.owned_str_or("name", id);
    let entity_type = def.owned_str_or("type", "satellite");
    let team = def.owned_str_or("team", "neutral");

    let mut entity = MCEntity::new(id, &name, &entity_type, &team);

    let initial = def.field("initialState");
    entity.geo_lat = initial.f64_or("lat", 0.0);
    entity.geo_lon = initial.f64_or("lon", 0.0);
    entity.geo_alt = initial.f64_or("alt", 0.0);
    entity.flight = Some(mc_core::entity::FlightState {
        speed: initial.f64_or("speed", 0.0),
        gamma: initial.f64_or("gamma", 0.0).to_radians(),
        heading: initial.f64_or("heading", 0.0).to_radians(),
        alpha: 0.0,
        roll: 0.0,
        throttle: initial.f64_or("throttle", 0.8),
        engine_on: initial.bool_or("engineOn", true),
        mach: 0.0,
    });

    let components = def.field("components");
    parse_physics(components.field("physics"), &entity_type, &mut entity)?;
    parse_ai(components.field("ai"), &mut entity);
    parse_control(components.field("control"), &mut entity);
    parse_sensors(components.field("sensors"), &mut entity);
    parse_weapons(components.field("weapons"), &mut entity);

    Ok(entity)
}

fn parse_physics(physics: &Value, entity_type: &str, entity: &mut MCEntity) {
    if !physics.has_key("type") {
        // No physics component at all: ground installations (SAMs,
        // radars) and similar fixed assets stay `Static`.
        let _ = entity_type;
        entity.physics_type = PhysicsType::Static;
        return;
    }

    match physics.str_or("type", "static") {
        "orbital_2body" => {
            entity.physics_type = PhysicsType::Orbital2Body;
            let source = physics.str_or("source", "elements");
            if source == "elements" {
                let elements = OrbitalElements {
                    semi_major_axis: physics.f64_or("sma", 42_164_000.0),
                    eccentricity: physics.f64_or("ecc", 0.0001),
                    inclination: physics.f64_or("inc", 0.0).to_radians(),
                    raan: physics.f64_or("raan", 0.0).to_radians(),
                    arg_periapsis: physics.f64_or("argPerigee", 0.0).to_radians(),
                    true_anomaly: mean_anomaly_to_true(
                        physics.f64_or("meanAnomaly", 0.0).to_radians(),
                        physics.f64_or("ecc", 0.0001),
                    ),
                    mean_anomaly: physics.f64_or("meanAnomaly", 0.0).to_radians(),
                };
                let (pos, vel) = kepler::elements_to_state(&elements, mc_core::constants::EARTH_MU);
                entity.eci_pos = pos;
                entity.eci_vel = vel;
            }
        }
        "flight3dof" => {
            entity.physics_type = PhysicsType::Flight3Dof;
            entity.aero = Some(aircraft_configs::lookup(physics.str_or("config", "f16")));
        }
        _ => entity.physics_type = PhysicsType::Static,
    }
}

fn mean_anomaly_to_true(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let e_anom = mc_astro::kepler::solve_kepler_equation(mean_anomaly, eccentricity);
    mc_astro::kepler::eccentric_to_true_anomaly(e_anom, eccentricity)
}

fn parse_ai(ai: &Value, entity: &mut MCEntity) {
    if !ai.has_key("type") {
        return;
    }

    match ai.str_or("type", "") {
        "orbital_combat" => {
            entity.ai_type = AiType::OrbitalCombat;
            entity.orbital_combat_ai = Some(OrbitalCombatAi {
                role: parse_combat_role(ai.str_or("role", "attacker")),
                sensor_range: ai.f64_or("sensorRange", 1_000_000.0),
                defense_radius: ai.f64_or("defenseRadius", 500_000.0),
                max_accel: ai.f64_or("maxAccel", 50.0),
                kill_range: ai.f64_or("killRange", 50_000.0),
                scan_interval: ai.f64_or("scanInterval", 1.0),
                scan_timer: 0.0,
                assigned_hva_id: ai.get("assignedHvaId").and_then(Value::as_str).map(str::to_string),
                current_target_id: None,
                drift_target_id: None,
            });
        }
        "waypoint_patrol" => {
            entity.ai_type = AiType::WaypointPatrol;
            entity.waypoint_patrol_ai = Some(WaypointPatrolAi {
                waypoints: parse_waypoints(ai.get("waypoints")),
                waypoint_index: 0,
                loop_route: matches!(ai.str_or("loopMode", "cycle"), "cycle" | "loop"),
            });
        }
        "intercept" => {
            entity.ai_type = AiType::Intercept;
            entity.intercept_ai = Some(InterceptAi {
                target_id: ai.owned_str_or("targetId", ""),
                mode: parse_intercept_mode(ai.str_or("mode", "pursuit")),
                engage_range: ai.f64_or("engageRange_m", ai.f64_or("engageRange", 0.0)),
                intercept_state: 0,
            });
        }
        _ => {}
    }
}

fn parse_combat_role(s: &str) -> CombatRole {
    match s {
        "hva" => CombatRole::Hva,
        "defender" => CombatRole::Defender,
        "sweep" => CombatRole::Sweep,
        "escort" => CombatRole::Escort,
        _ => CombatRole::Attacker,
    }
}

fn parse_intercept_mode(s: &str) -> u8 {
    match s {
        "lead" => 1,
        "stern" => 2,
        _ => 0,
    }
}

fn parse_waypoints(value: Option<&Value>) -> Vec<Waypoint> {
    let Some(arr) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    arr.iter()
        .map(|wp| Waypoint {
            lat: wp.f64_or("lat", 0.0),
            lon: wp.f64_or("lon", 0.0),
            alt: wp.f64_or("alt", 0.0),
            speed: wp.f64_or("speed", 200.0),
        })
        .collect()
}

/// `components.control` with `player_input` and no AI assigned falls
/// back to an automatic patrol pattern, so every parsed entity stays
/// actionable in the tick loop.
fn parse_control(control: &Value, entity: &mut MCEntity) {
    if control.str_or("type", "") != "player_input" {
        return;
    }
    if entity.ai_type != AiType::None {
        return;
    }
    entity.ai_type = AiType::WaypointPatrol;
    entity.waypoint_patrol_ai = Some(default_patrol_ai());
}

fn parse_sensors(sensors: &Value, entity: &mut MCEntity) {
    if !sensors.has_key("radar") {
        return;
    }
    let radar = sensors.field("radar");
    let sweep_interval = radar
        .get("scanRate_dps")
        .and_then(Value::as_f64)
        .map(|rate| if rate > 0.0 { 360.0 / rate } else { 1.0 })
        .unwrap_or(1.0);

    entity.radar = Some(RadarConfig {
        max_range: radar.f64_or("maxRange_m", radar.f64_or("maxRange", 300_000.0)),
        fov_deg: radar.f64_or("fov_deg", 360.0),
        min_elevation_deg: radar.f64_or("minElevation_deg", -5.0),
        max_elevation_deg: radar.f64_or("maxElevation_deg", 80.0),
        sweep_interval,
        detection_probability: radar.f64_or("detectionProbability", 0.9),
        sweep_timer: 0.0,
    });
}

fn parse_weapons(weapons: &Value, entity: &mut MCEntity) {
    if weapons.has_key("kinetic_kill") {
        let w = weapons.field("kinetic_kill");
        entity.weapon_type = WeaponType::KineticKill;
        entity.kinetic_kill = Some(KineticKill {
            pk: w.f64_or("Pk", 0.7),
            kill_range: w.f64_or("killRange", 50_000.0),
            cooldown_time: w.f64_or("cooldown", 5.0),
            cooldown_timer: 0.0,
            last_launch_target: None,
        });
    }

    if weapons.has_key("sam_battery") {
        let w = weapons.field("sam_battery");
        entity.weapon_type = WeaponType::SamBattery;
        entity.sam = Some(SamBattery {
            min_range: w.f64_or("minRange_m", w.f64_or("minRange", 5_000.0)),
            max_range: w.f64_or("maxRange_m", w.f64_or("maxRange", 150_000.0)),
            missile_speed: w.f64_or("missileSpeed", 1_200.0),
            missiles_ready: w.u32_or("missiles", 8),
            salvo_size: w.u32_or("salvoSize", 2),
            pk_per_missile: w.f64_or("pkPerMissile", 0.7),
            engagement_rules: parse_engagement_rules(w.str_or("engagementRules", "free")),
            engagements: Vec::new(),
        });
    }

    if weapons.has_key("fighter_loadout") || weapons.has_key("a2a_missile") {
        let w = if weapons.has_key("fighter_loadout") {
            weapons.field("fighter_loadout")
        } else {
            weapons.field("a2a_missile")
        };
        entity.weapon_type = WeaponType::A2aMissile;
        let loadout: Vec<String> = w
            .get("loadout")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default();
        let mut inventory: BTreeMap<String, u32> = BTreeMap::new();
        for name in &loadout {
            *inventory.entry(name.clone()).or_insert(0) += 1;
        }
        entity.a2a = Some(A2aLoadout {
            loadout,
            inventory,
            engagement_rules: parse_engagement_rules(w.str_or("engagementRules", "free")),
            engagements: Vec::new(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_entities_array_is_an_input_error() {
        let doc = json!({});
        let result = parse_scenario(&doc, 1);
        assert!(result.is_err());
    }

    #[test]
    fn minimal_entity_defaults_to_static_physics() {
        let doc = json!({
            "entities": [{ "id": "sam1", "team": "blue" }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        assert_eq!(world.len(), 1);
        assert_eq!(world.get("sam1").unwrap().physics_type, PhysicsType::Static);
    }

    #[test]
    fn orbital_entity_parses_elements_into_eci_state() {
        let doc = json!({
            "entities": [{
                "id": "hva1",
                "team": "blue",
                "components": {
                    "physics": { "type": "orbital_2body", "sma": 7000000.0, "ecc": 0.001 }
                }
            }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        let e = world.get("hva1").unwrap();
        assert_eq!(e.physics_type, PhysicsType::Orbital2Body);
        assert!(e.eci_pos.length() > 6_900_000.0);
    }

    #[test]
    fn flight_entity_picks_up_named_aircraft_config() {
        let doc = json!({
            "entities": [{
                "id": "f1",
                "team": "red",
                "components": {
                    "physics": { "type": "flight3dof", "config": "su35" }
                }
            }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        let e = world.get("f1").unwrap();
        assert_eq!(e.physics_type, PhysicsType::Flight3Dof);
        assert_eq!(e.aero.as_ref().unwrap().mass, 25_300.0);
    }

    #[test]
    fn player_input_without_ai_gets_auto_patrol() {
        let doc = json!({
            "entities": [{
                "id": "plane1",
                "team": "blue",
                "components": {
                    "physics": { "type": "flight3dof", "config": "f16" },
                    "control": { "type": "player_input" }
                }
            }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        let e = world.get("plane1").unwrap();
        assert_eq!(e.ai_type, AiType::WaypointPatrol);
        assert!(e.waypoint_patrol_ai.is_some());
    }

    #[test]
    fn sam_battery_weapon_defaults_parse() {
        let doc = json!({
            "entities": [{
                "id": "sam1",
                "team": "red",
                "components": {
                    "weapons": { "sam_battery": {} }
                }
            }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        let e = world.get("sam1").unwrap();
        assert_eq!(e.weapon_type, WeaponType::SamBattery);
        assert_eq!(e.sam.as_ref().unwrap().missiles_ready, 8);
    }

    #[test]
    fn a2a_loadout_builds_inventory_counts() {
        let doc = json!({
            "entities": [{
                "id": "f22_1",
                "team": "blue",
                "components": {
                    "weapons": { "fighter_loadout": { "loadout": ["aim120", "aim120", "aim9"] } }
                }
            }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        let e = world.get("f22_1").unwrap();
        let a2a = e.a2a.as_ref().unwrap();
        assert_eq!(a2a.inventory.get("aim120"), Some(&2));
        assert_eq!(a2a.inventory.get("aim9"), Some(&1));
    }

    #[test]
    fn event_trigger_and_action_fallback_chains_resolve() {
        let doc = json!({
            "entities": [],
            "events": [{
                "id": "ev1",
                "trigger": { "type": "proximity", "entityA": "a", "entityB": "b", "range_m": 500.0 },
                "action": { "type": "message", "text": "closing" }
            }]
        });
        let world = parse_scenario(&doc, 1).unwrap();
        assert_eq!(world.events.len(), 1);
        match &world.events[0].trigger {
            EventTrigger::Proximity { entity_a, entity_b, range } => {
                assert_eq!(entity_a, "a");
                assert_eq!(entity_b, "b");
                assert_eq!(*range, 500.0);
            }
            _ => panic!("expected proximity trigger"),
        }
    }
}

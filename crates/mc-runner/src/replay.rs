//! Replay-mode runner and the replay JSON document (component Q, §6).
//!
//! A single run of the same tick loop as `run_single`, additionally
//! sampling every live entity's ECEF position every `sample_interval`
//! seconds, recording the first tick each entity's liveness flips, and
//! capturing source/target ECEF snapshots for every `LAUNCH`/`KILL`/
//! `MISS` engagement record as it is appended.

use std::collections::HashSet;

use mc_astro::frames::{eci_to_ecef, geodetic_to_ecef};
use mc_core::entity::MCEntity;
use mc_core::enums::PhysicsType;
use mc_core::error::MCResult;
use mc_core::vector::Vec3;
use mc_core::world::MCWorld;
use mc_sim::parse_scenario;
use serde::Serialize;
use serde_json::Value;

use crate::config::MCConfig;
use crate::resolved::all_combat_resolved;
use crate::results::combat_role_str;
use crate::run::{build_survival_map, collect_new_engagements};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEntity {
    pub id: String,
    pub name: String,
    pub team: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_time: Option<f64>,
    pub positions: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEvent {
    pub time: f64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub source_id: String,
    pub target_id: String,
    pub source_position: [f64; 3],
    pub target_position: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub blue_alive: u32,
    pub blue_total: u32,
    pub red_alive: u32,
    pub red_total: u32,
    pub total_kills: u32,
    pub total_launches: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayConfig {
    pub seed: u32,
    pub duration: f64,
    pub sample_interval: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayTimeline {
    #[serde(rename = "endTime")]
    pub end_time: f64,
    #[serde(rename = "sampleTimes")]
    pub sample_times: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayDocument {
    pub format: String,
    pub config: ReplayConfig,
    pub timeline: ReplayTimeline,
    pub entities: Vec<ReplayEntity>,
    pub events: Vec<ReplayEvent>,
    pub summary: ReplaySummary,
}

fn entity_ecef(e: &MCEntity, sim_time: f64) -> Vec3 {
    if e.physics_type == PhysicsType::Orbital2Body {
        eci_to_ecef(e.eci_pos, sim_time)
    } else {
        geodetic_to_ecef(e.geo_lat, e.geo_lon, e.geo_alt)
    }
}

fn as_array(v: Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Run `seed` against `scenario` in replay mode and produce the replay
/// document described in §6.
pub fn run_replay(scenario: &Value, seed: u32, config: &MCConfig) -> MCResult<ReplayDocument> {
    let mut world = parse_scenario(scenario, seed)?;
    world.sim_time = 0.0;

    let mut sample_times = Vec::new();
    let mut positions: Vec<Vec<[f64; 3]>> = vec![Vec::new(); world.len()];
    let mut death_times: Vec<Option<f64>> = vec![None; world.len()];
    let mut was_live: Vec<bool> = world.entities().iter().map(MCEntity::is_live).collect();

    let mut events = Vec::new();
    let mut engagement_log = Vec::new();
    let mut seen = HashSet::new();
    let mut next_sample_time = 0.0_f64;

    sample_entities(&world, &mut sample_times, &mut positions, &mut next_sample_time, config.sample_interval);
    record_deaths(&world, &mut was_live, &mut death_times);

    while world.sim_time < config.max_sim_time && !all_combat_resolved(&world) {
        world.sim_time += config.dt;
        mc_sim::tick(&mut world, config.dt);

        record_deaths(&world, &mut was_live, &mut death_times);
        sample_entities(&world, &mut sample_times, &mut positions, &mut next_sample_time, config.sample_interval);

        let before = engagement_log.len();
        collect_new_engagements(&world, &mut engagement_log, &mut seen);
        for record in &engagement_log[before..] {
            if matches!(record.result.as_str(), "LAUNCH" | "KILL" | "MISS") {
                let Some(source) = world.get(&record.source_id) else { continue };
                let Some(target) = world.get(&record.target_id) else { continue };
                events.push(ReplayEvent {
                    time: record.time,
                    event_type: record.result.clone(),
                    source_id: record.source_id.clone(),
                    target_id: record.target_id.clone(),
                    source_position: as_array(entity_ecef(source, world.sim_time)),
                    target_position: as_array(entity_ecef(target, world.sim_time)),
                });
            }
        }
    }

    let survival = build_survival_map(&world);
    let entities = world
        .entities()
        .iter()
        .enumerate()
        .map(|(i, e)| ReplayEntity {
            id: e.id.clone(),
            name: e.name.clone(),
            team: e.team.clone(),
            entity_type: e.entity_type.clone(),
            role: e.orbital_combat_ai.as_ref().map(|ai| ai.role).and_then(combat_role_str),
            death_time: death_times[i],
            positions: positions[i].clone(),
        })
        .collect();

    let blue_total = survival.values().filter(|s| s.team == "blue").count() as u32;
    let blue_alive = survival.values().filter(|s| s.team == "blue" && s.alive).count() as u32;
    let red_total = survival.values().filter(|s| s.team == "red").count() as u32;
    let red_alive = survival.values().filter(|s| s.team == "red" && s.alive).count() as u32;
    let total_kills = engagement_log.iter().filter(|e| e.result == "KILL").count() as u32;
    let total_launches = engagement_log.iter().filter(|e| e.result == "LAUNCH").count() as u32;

    Ok(ReplayDocument {
        format: "replay_v1".to_string(),
        config: ReplayConfig { seed, duration: config.max_sim_time, sample_interval: config.sample_interval },
        timeline: ReplayTimeline { end_time: world.sim_time, sample_times },
        entities,
        events,
        summary: ReplaySummary { blue_alive, blue_total, red_alive, red_total, total_kills, total_launches },
    })
}

fn sample_entities(
    world: &MCWorld,
    sample_times: &mut Vec<f64>,
    positions: &mut [Vec<[f64; 3]>],
    next_sample_time: &mut f64,
    sample_interval: f64,
) {
    if world.sim_time + 1e-9 < *next_sample_time {
        return;
    }
    sample_times.push(world.sim_time);
    for (i, e) in world.entities().iter().enumerate() {
        positions[i].push(as_array(entity_ecef(e, world.sim_time)));
    }
    *next_sample_time += sample_interval.max(1e-6);
}

fn record_deaths(world: &MCWorld, was_live: &mut [bool], death_times: &mut [Option<f64>]) {
    for (i, e) in world.entities().iter().enumerate() {
        let live_now = e.is_live();
        if was_live[i] && !live_now && death_times[i].is_none() {
            death_times[i] = Some(world.sim_time);
        }
        was_live[i] = live_now;
    }
}

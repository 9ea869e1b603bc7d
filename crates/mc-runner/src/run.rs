//! Batch-mode Monte Carlo runner (component Q).
//!
//! For each seed, parse a fresh `MCWorld`, tick until resolution or the
//! time bound, collecting engagement records into the run's log every
//! 200 ticks (or on the last tick), then record final survival. A
//! per-seed parse or propagation failure is caught as an ordinary
//! `Result::Err` and recorded in that run's slot rather than aborting
//! the batch.

use std::collections::HashSet;

use mc_core::error::MCResult;
use mc_core::world::MCWorld;
use mc_sim::parse_scenario;
use serde_json::Value;

use crate::config::MCConfig;
use crate::resolved::all_combat_resolved;
use crate::results::{
    combat_role_str, weapon_type_abbrev, EngagementEvent, EntitySurvival, ResultsDocument,
    RunConfigSummary, RunResult,
};

/// Engagement-log ticks interval: new records are drained into the
/// run's log every 200 ticks, matching §4.14's batch-mode step 2.
const COLLECT_INTERVAL_TICKS: u64 = 200;

/// Run every seed in `[base_seed, base_seed + num_runs)` against
/// `scenario`, continuing past a per-seed failure (§7 kind 5).
pub fn run_batch(scenario: &Value, config: &MCConfig) -> ResultsDocument {
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for i in 0..config.num_runs {
        let seed = config.base_seed.wrapping_add(i);
        let run = match run_single(scenario, i, seed, config) {
            Ok(result) => result,
            Err(err) => RunResult::failed(i, seed, err.to_string()),
        };
        if config.progress {
            eprintln!(
                "{{\"runIndex\":{},\"seed\":{},\"simTimeFinal\":{},\"error\":{}}}",
                run.run_index,
                run.seed,
                run.sim_time_final,
                run.error.as_deref().map(|e| format!("{e:?}")).unwrap_or_else(|| "null".to_string()),
            );
        }
        runs.push(run);
    }

    ResultsDocument {
        config: RunConfigSummary {
            num_runs: config.num_runs,
            base_seed: config.base_seed,
            max_sim_time: config.max_sim_time,
        },
        runs,
    }
}

/// Run a single seed to completion (resolution or `max_sim_time`) and
/// collect its engagement log and final survival map.
pub fn run_single(scenario: &Value, run_index: u32, seed: u32, config: &MCConfig) -> MCResult<RunResult> {
    let mut world = parse_scenario(scenario, seed)?;
    world.sim_time = 0.0;

    let mut log = Vec::new();
    let mut seen = HashSet::new();
    let mut ticks: u64 = 0;

    while world.sim_time < config.max_sim_time && !all_combat_resolved(&world) {
        world.sim_time += config.dt;
        mc_sim::tick(&mut world, config.dt);
        ticks += 1;

        if ticks % COLLECT_INTERVAL_TICKS == 0 {
            collect_new_engagements(&world, &mut log, &mut seen);
        }
    }
    collect_new_engagements(&world, &mut log, &mut seen);

    Ok(RunResult {
        run_index,
        seed,
        sim_time_final: world.sim_time,
        engagement_log: log,
        entity_survival: build_survival_map(&world),
        error: None,
    })
}

/// Drain every entity's engagement log for records not yet in `log`,
/// deduplicating on `(source, target, result, time)` per §4.14 step 2.
pub(crate) fn collect_new_engagements(
    world: &MCWorld,
    log: &mut Vec<EngagementEvent>,
    seen: &mut HashSet<(String, String, &'static str, u64)>,
) {
    for entity in world.entities() {
        for record in &entity.engagement_log {
            let key = (entity.id.clone(), record.target_id.clone(), record.result.as_str(), record.time.to_bits());
            if !seen.insert(key) {
                continue;
            }
            log.push(EngagementEvent {
                time: record.time,
                source_id: entity.id.clone(),
                source_name: entity.name.clone(),
                source_team: entity.team.clone(),
                target_id: record.target_id.clone(),
                target_name: record.target_name.clone(),
                result: record.result.as_str().to_string(),
                weapon_type: weapon_type_abbrev(entity.weapon_type).to_string(),
            });
        }
    }
    log.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap());
}

pub(crate) fn build_survival_map(world: &MCWorld) -> std::collections::BTreeMap<String, EntitySurvival> {
    world
        .entities()
        .iter()
        .map(|e| {
            let role = e.orbital_combat_ai.as_ref().map(|ai| ai.role).and_then(combat_role_str);
            (
                e.id.clone(),
                EntitySurvival {
                    name: e.name.clone(),
                    team: e.team.clone(),
                    entity_type: e.entity_type.clone(),
                    role,
                    alive: e.is_live(),
                    destroyed: e.destroyed,
                },
            )
        })
        .collect()
}

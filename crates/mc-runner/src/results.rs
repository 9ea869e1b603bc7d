//! Batch-run result types (component Q), serialized to the documented
//! results JSON shape so downstream tooling keeps working across runs.

use std::collections::BTreeMap;

use mc_core::enums::{CombatRole, WeaponType};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEvent {
    pub time: f64,
    pub source_id: String,
    pub source_name: String,
    pub source_team: String,
    pub target_id: String,
    pub target_name: String,
    pub result: String,
    pub weapon_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySurvival {
    pub name: String,
    pub team: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub role: Option<String>,
    pub alive: bool,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub run_index: u32,
    pub seed: u32,
    pub sim_time_final: f64,
    pub engagement_log: Vec<EngagementEvent>,
    pub entity_survival: BTreeMap<String, EntitySurvival>,
    pub error: Option<String>,
}

impl RunResult {
    pub fn failed(run_index: u32, seed: u32, message: String) -> Self {
        Self {
            run_index,
            seed,
            sim_time_final: 0.0,
            engagement_log: Vec::new(),
            entity_survival: BTreeMap::new(),
            error: Some(message),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfigSummary {
    pub num_runs: u32,
    pub base_seed: u32,
    pub max_sim_time: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsDocument {
    pub config: RunConfigSummary,
    pub runs: Vec<RunResult>,
}

/// `CombatRole::None` serializes as a JSON `null` role rather than an
/// empty string.
pub fn combat_role_str(role: CombatRole) -> Option<String> {
    match role {
        CombatRole::None => None,
        CombatRole::Hva => Some("hva".to_string()),
        CombatRole::Defender => Some("defender".to_string()),
        CombatRole::Attacker => Some("attacker".to_string()),
        CombatRole::Escort => Some("escort".to_string()),
        CombatRole::Sweep => Some("sweep".to_string()),
    }
}

/// Weapon-type abbreviation used in the engagement log's `weaponType`
/// field: `KKV`/`SAM`/`A2A`/`UNK`.
pub fn weapon_type_abbrev(weapon_type: WeaponType) -> &'static str {
    match weapon_type {
        WeaponType::None => "UNK",
        WeaponType::KineticKill => "KKV",
        WeaponType::SamBattery => "SAM",
        WeaponType::A2aMissile => "A2A",
    }
}

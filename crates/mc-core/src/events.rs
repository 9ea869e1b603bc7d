//! Scenario event data: triggers and actions.
//!
//! The event engine (in `mc-sim`) walks `MCWorld::events` each tick and
//! fires the first unfired event whose trigger condition holds; the data
//! shapes live here so `MCWorld` can own them without depending on the
//! evaluation logic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventTrigger {
    Time { t: f64 },
    Proximity { entity_a: String, entity_b: String, range: f64 },
    Detection { sensor_id: String, target_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventAction {
    Message { text: String },
    ChangeRules { entity_id: String, rules: crate::enums::EngagementRules },
    SetState { entity_id: String, field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEvent {
    pub id: String,
    pub name: String,
    pub trigger: EventTrigger,
    pub action: EventAction,
    pub fired: bool,
}

//! Discriminator enums driving the flat entity store.
//!
//! The original engine dispatches on entity subtype through virtual
//! `update(dt)` overrides. This store replaces that with three small
//! tagged enums that a tick stage switches on directly — predictable,
//! vectorizable branches instead of a vtable indirection per entity.

use serde::{Deserialize, Serialize};

/// Which physics model authoritatively owns this entity's position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicsType {
    #[default]
    None,
    Orbital2Body,
    Flight3Dof,
    Static,
}

/// Which AI drives this entity's autonomous behavior, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiType {
    #[default]
    None,
    OrbitalCombat,
    WaypointPatrol,
    Intercept,
}

/// Which weapon kill-chain this entity runs, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    None,
    KineticKill,
    SamBattery,
    A2aMissile,
}

/// Combat role for orbital-combat AI entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatRole {
    #[default]
    None,
    /// High-value asset: passive, other roles defend or attack it.
    Hva,
    Defender,
    Attacker,
    Escort,
    Sweep,
}

/// Reference frame tag carried by a `StateVector`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameTag {
    #[default]
    J2000Eci,
    Teme,
    Ecef,
    HeliocentricJ2000,
    PlanetCentered,
    Body,
}

/// Result of an engagement resolution, also used as the `ScenarioEvent`
/// proximity/detection log tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementResult {
    Launch,
    Kill,
    Miss,
    KilledBy,
}

impl EngagementResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementResult::Launch => "LAUNCH",
            EngagementResult::Kill => "KILL",
            EngagementResult::Miss => "MISS",
            EngagementResult::KilledBy => "KILLED_BY",
        }
    }
}

/// Engagement-rules gate a weapon kill-chain can be placed under by a
/// scenario event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngagementRules {
    #[default]
    Free,
    WeaponsHold,
}

/// SAM-battery / A2A-missile engagement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementPhase {
    /// SAM: target detected, awaiting tracking dwell.
    Detect,
    /// SAM: tracking; A2A: target locked (`Lock`).
    Track,
    /// SAM/A2A: missile(s) in flight.
    Engage,
    /// SAM: awaiting kill assessment. A2A's "guide" phase is modeled as
    /// `Engage`; `Assess` is shared by both chains' final roll.
    Assess,
}

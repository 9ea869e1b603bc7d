//! The flat entity record and its component-specific bundles.
//!
//! `MCEntity` carries every field any entity kind might need, discriminated
//! by the three tag enums in `enums`. This is deliberate: every tick
//! touches every active entity, so contiguous, branch-driven storage beats
//! an inheritance hierarchy or a component-per-allocation ECS for this
//! workload. Component bundles that only some entities use are grouped
//! into small `Option<...>` structs so an aircraft doesn't carry SAM
//! inventory fields and vice versa, without resorting to a dynamic
//! component registry.

use serde::{Deserialize, Serialize};

use crate::enums::{AiType, CombatRole, EngagementResult, EngagementRules, PhysicsType, WeaponType};
use crate::vector::Vec3;

/// One entry in an entity's append-only engagement log. Monotonic by
/// `time` within a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub target_id: String,
    pub target_name: String,
    pub result: EngagementResult,
    pub time: f64,
}

/// A single leg of a waypoint patrol route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub speed: f64,
}

/// A single radar contact, rebuilt every sweep. No cross-sweep identity:
/// a target present in consecutive sweeps gets a fresh `RadarDetection`
/// each time, not an updated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarDetection {
    pub entity_id: String,
    pub range: f64,
    pub bearing: f64,
    pub time: f64,
}

/// Aerodynamic coefficients and thrust ratings for a `flight_3dof` entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AeroConfig {
    pub mass: f64,
    pub wing_area: f64,
    pub aspect_ratio: f64,
    pub cd0: f64,
    pub oswald: f64,
    /// Per-radian (converted from the per-degree value the named config
    /// table stores, at scenario-parse time).
    pub cl_alpha: f64,
    pub cl_max: f64,
    pub thrust_mil: f64,
    pub thrust_ab: f64,
    pub max_g: f64,
    pub max_aoa_rad: f64,
    pub max_roll_rate_rad: f64,
    pub max_pitch_rate_rad: f64,
    pub idle_thrust_frac: f64,
}

/// Instantaneous 3-DOF point-mass flight state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// True airspeed, m/s.
    pub speed: f64,
    /// Flight-path angle, radians.
    pub gamma: f64,
    /// Heading, radians, true-north clockwise, wrapped to [0, tau).
    pub heading: f64,
    /// Angle of attack, radians.
    pub alpha: f64,
    /// Bank angle, radians.
    pub roll: f64,
    /// Throttle fraction [0, 1].
    pub throttle: f64,
    pub engine_on: bool,
    pub mach: f64,
}

/// Radar sensor configuration (static for the scenario's lifetime).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    pub max_range: f64,
    pub fov_deg: f64,
    pub min_elevation_deg: f64,
    pub max_elevation_deg: f64,
    pub sweep_interval: f64,
    pub detection_probability: f64,
    pub sweep_timer: f64,
}

/// A single SAM-battery engagement in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamEngagement {
    pub target_id: String,
    pub phase: crate::enums::EngagementPhase,
    pub phase_timer: f64,
    pub missiles_fired: u32,
}

/// SAM-battery weapon bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamBattery {
    pub min_range: f64,
    pub max_range: f64,
    pub missile_speed: f64,
    pub missiles_ready: u32,
    pub salvo_size: u32,
    pub pk_per_missile: f64,
    pub engagement_rules: EngagementRules,
    pub engagements: Vec<SamEngagement>,
}

/// A single A2A-missile engagement in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2aEngagement {
    pub target_id: String,
    pub weapon_name: String,
    pub phase: crate::enums::EngagementPhase,
    pub phase_timer: f64,
}

/// A2A-missile weapon bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct A2aLoadout {
    /// Ordered weapon names as loaded (for display / min-overkill tie-break).
    pub loadout: Vec<String>,
    /// Remaining count per weapon name.
    pub inventory: std::collections::BTreeMap<String, u32>,
    pub engagement_rules: EngagementRules,
    pub engagements: Vec<A2aEngagement>,
}

/// Kinetic-kill (orbital KKV) weapon bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticKill {
    pub pk: f64,
    pub kill_range: f64,
    pub cooldown_time: f64,
    pub cooldown_timer: f64,
    pub last_launch_target: Option<String>,
}

/// Orbital-combat AI bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalCombatAi {
    pub role: CombatRole,
    pub sensor_range: f64,
    pub defense_radius: f64,
    pub max_accel: f64,
    pub kill_range: f64,
    pub scan_interval: f64,
    pub scan_timer: f64,
    pub assigned_hva_id: Option<String>,
    pub current_target_id: Option<String>,
    /// Escort-only: the friendly attacker to drift toward when it has no
    /// enemy target of its own.
    pub drift_target_id: Option<String>,
}

/// Waypoint-patrol AI bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointPatrolAi {
    pub waypoints: Vec<Waypoint>,
    pub waypoint_index: usize,
    pub loop_route: bool,
}

/// Intercept AI bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptAi {
    pub target_id: String,
    /// 0 = pursuit, 1 = lead, 2 = stern.
    pub mode: u8,
    pub engage_range: f64,
    /// 0 = not yet in range, 1 = in range (weapon stage reads this signal).
    pub intercept_state: u8,
}

/// The flat entity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MCEntity {
    pub id: String,
    pub name: String,
    pub entity_type: String,
    pub team: String,

    pub active: bool,
    pub destroyed: bool,

    pub physics_type: PhysicsType,
    pub ai_type: AiType,
    pub weapon_type: WeaponType,

    // --- orbital_2body authoritative state ---
    pub eci_pos: Vec3,
    pub eci_vel: Vec3,

    // --- flight_3dof / static authoritative state (degrees, metres) ---
    pub geo_lat: f64,
    pub geo_lon: f64,
    pub geo_alt: f64,

    pub flight: Option<FlightState>,
    pub aero: Option<AeroConfig>,

    pub radar: Option<RadarConfig>,
    pub radar_detections: Vec<RadarDetection>,

    pub sam: Option<SamBattery>,
    pub a2a: Option<A2aLoadout>,
    pub kinetic_kill: Option<KineticKill>,
    /// Set by orbital-combat AI, consumed by the kinetic-kill stage.
    pub kk_target_id: Option<String>,

    pub orbital_combat_ai: Option<OrbitalCombatAi>,
    pub waypoint_patrol_ai: Option<WaypointPatrolAi>,
    pub intercept_ai: Option<InterceptAi>,

    pub engagement_log: Vec<EngagementRecord>,
}

impl MCEntity {
    /// A minimal, inert entity — callers fill in the component bundles
    /// they need. Mirrors how the scenario parser builds entities up
    /// field-by-field from the parsed JSON.
    pub fn new(id: impl Into<String>, name: impl Into<String>, entity_type: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_type: entity_type.into(),
            team: team.into(),
            active: true,
            destroyed: false,
            physics_type: PhysicsType::None,
            ai_type: AiType::None,
            weapon_type: WeaponType::None,
            eci_pos: Vec3::ZERO,
            eci_vel: Vec3::ZERO,
            geo_lat: 0.0,
            geo_lon: 0.0,
            geo_alt: 0.0,
            flight: None,
            aero: None,
            radar: None,
            radar_detections: Vec::new(),
            sam: None,
            a2a: None,
            kinetic_kill: None,
            kk_target_id: None,
            orbital_combat_ai: None,
            waypoint_patrol_ai: None,
            intercept_ai: None,
            engagement_log: Vec::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.active && !self.destroyed
    }

    pub fn record(&mut self, target_id: impl Into<String>, target_name: impl Into<String>, result: EngagementResult, time: f64) {
        self.engagement_log.push(EngagementRecord {
            target_id: target_id.into(),
            target_name: target_name.into(),
            result,
            time,
        });
    }

    pub fn kill(&mut self) {
        self.active = false;
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_is_live_and_has_no_log() {
        let e = MCEntity::new("red-1", "Red One", "flight3dof", "red");
        assert!(e.is_live());
        assert!(e.engagement_log.is_empty());
    }

    #[test]
    fn kill_flips_both_liveness_flags() {
        let mut e = MCEntity::new("red-1", "Red One", "flight3dof", "red");
        e.kill();
        assert!(!e.active);
        assert!(e.destroyed);
        assert!(!e.is_live());
    }

    #[test]
    fn engagement_log_is_append_only_and_time_ordered() {
        let mut e = MCEntity::new("red-1", "Red One", "flight3dof", "red");
        e.record("blue-1", "Blue One", EngagementResult::Launch, 1.0);
        e.record("blue-1", "Blue One", EngagementResult::Kill, 2.0);
        let times: Vec<f64> = e.engagement_log.iter().map(|r| r.time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }
}

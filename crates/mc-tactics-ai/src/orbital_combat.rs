//! Orbital combat AI (component K).
//!
//! Pure functions over a slice of entities: nothing here mutates the
//! store directly. The caller (the system pipeline in `mc-sim`) applies
//! the returned decision to the acting entity's own fields, consistent
//! with the rule that AI stages may only read other entities and only
//! mutate their own entity's state.

use mc_core::entity::MCEntity;
use mc_core::enums::CombatRole;
use mc_core::vector::Vec3;

const SCAN_DISTANCE_GUARD: f64 = 1.0;

/// The outcome of one orbital combat AI scan-and-act step for a single
/// entity: either a new ECI velocity (thrust applied) or a kinetic-kill
/// target signal (in range, no thrust), or neither (idle).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbitalAiDecision {
    pub new_velocity: Option<Vec3>,
    pub kk_target_id: Option<String>,
    pub new_target_id: Option<String>,
    pub scan_performed: bool,
}

fn is_offensive_role(role: CombatRole) -> bool {
    matches!(role, CombatRole::Attacker | CombatRole::Sweep | CombatRole::Escort)
}

/// Find the nearest candidate among `entities` matching `predicate`,
/// restricted to opposing-team, active entities within `sensor_range`.
fn nearest_enemy<'a>(
    entities: &'a [MCEntity],
    self_entity: &MCEntity,
    sensor_range: f64,
    predicate: impl Fn(&MCEntity) -> bool,
) -> Option<&'a MCEntity> {
    let range_sq = sensor_range * sensor_range;
    entities
        .iter()
        .filter(|e| e.is_live() && e.team != self_entity.team && predicate(e))
        .map(|e| (e, e.eci_pos.distance_squared(self_entity.eci_pos)))
        .filter(|(_, d2)| *d2 <= range_sq)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .map(|(e, _)| e)
}

fn nearest_friendly<'a>(
    entities: &'a [MCEntity],
    self_entity: &MCEntity,
    predicate: impl Fn(&MCEntity) -> bool,
) -> Option<&'a MCEntity> {
    entities
        .iter()
        .filter(|e| e.is_live() && e.team == self_entity.team && e.id != self_entity.id && predicate(e))
        .map(|e| (e, e.eci_pos.distance_squared(self_entity.eci_pos)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .map(|(e, _)| e)
}

/// Run one tick of orbital combat AI for the entity at `self_entity`,
/// given the full entity slice for lookups, a `scan_just_fired` flag
/// (true only on the tick `scan_timer` was reset), `dt`, and the cached
/// current target id (if any).
pub fn decide(
    entities: &[MCEntity],
    self_entity: &MCEntity,
    scan_just_fired: bool,
    dt: f64,
) -> OrbitalAiDecision {
    let Some(ai) = &self_entity.orbital_combat_ai else {
        return OrbitalAiDecision::default();
    };

    if ai.role == CombatRole::Hva {
        return OrbitalAiDecision::default();
    }

    let mut decision = OrbitalAiDecision::default();

    let target = if scan_just_fired {
        decision.scan_performed = true;
        let picked = match ai.role {
            CombatRole::Attacker => {
                nearest_enemy(entities, self_entity, ai.sensor_range, |e| e.orbital_combat_ai.as_ref().map(|a| a.role == CombatRole::Hva).unwrap_or(false))
            }
            CombatRole::Defender => {
                let hva_id = ai.assigned_hva_id.as_ref();
                nearest_enemy(entities, self_entity, ai.sensor_range, |e| {
                    e.orbital_combat_ai.as_ref().map(|a| is_offensive_role(a.role)).unwrap_or(false)
                })
                .filter(|candidate| {
                    hva_id
                        .and_then(|id| entities.iter().find(|e| &e.id == id))
                        .map(|hva| candidate.eci_pos.distance(hva.eci_pos) <= ai.defense_radius)
                        .unwrap_or(false)
                })
            }
            CombatRole::Sweep => nearest_enemy(entities, self_entity, ai.sensor_range, |e| {
                e.orbital_combat_ai.as_ref().map(|a| matches!(a.role, CombatRole::Attacker | CombatRole::Escort)).unwrap_or(false)
            }),
            CombatRole::Escort => nearest_enemy(entities, self_entity, ai.sensor_range, |e| {
                e.orbital_combat_ai.as_ref().map(|a| matches!(a.role, CombatRole::Defender | CombatRole::Sweep)).unwrap_or(false)
            }),
            CombatRole::Hva => None,
        };
        decision.new_target_id = picked.map(|e| e.id.clone());
        picked.map(|e| e.id.clone())
    } else {
        ai.current_target_id.clone()
    };

    let target_entity = target.as_ref().and_then(|id| entities.iter().find(|e| &e.id == id && e.is_live()));

    if let Some(target_entity) = target_entity {
        apply_thrust_or_kill(self_entity, target_entity, ai.max_accel, ai.kill_range, dt, &mut decision);
        return decision;
    }

    if ai.role == CombatRole::Escort && scan_just_fired {
        if let Some(attacker) = nearest_friendly(entities, self_entity, |e| {
            e.orbital_combat_ai.as_ref().map(|a| a.role == CombatRole::Attacker).unwrap_or(false)
        }) {
            let to_attacker = attacker.eci_pos - self_entity.eci_pos;
            let dist = to_attacker.length();
            if dist > SCAN_DISTANCE_GUARD {
                let dir = to_attacker / dist;
                let dv = dir * (ai.max_accel * 0.3 * dt);
                decision.new_velocity = Some(self_entity.eci_vel + dv);
            }
        }
    }

    decision
}

fn apply_thrust_or_kill(
    self_entity: &MCEntity,
    target: &MCEntity,
    max_accel: f64,
    kill_range: f64,
    dt: f64,
    decision: &mut OrbitalAiDecision,
) {
    let to_target = target.eci_pos - self_entity.eci_pos;
    let dist = to_target.length();

    if dist < kill_range {
        decision.kk_target_id = Some(target.id.clone());
        return;
    }

    if dist < SCAN_DISTANCE_GUARD {
        return;
    }

    let dir = to_target / dist;
    let dv = dir * (max_accel * dt);
    decision.new_velocity = Some(self_entity.eci_vel + dv);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_core::entity::{MCEntity, OrbitalCombatAi};
    use mc_core::enums::{AiType, CombatRole, PhysicsType};

    fn make_combatant(id: &str, team: &str, role: CombatRole, pos: Vec3) -> MCEntity {
        let mut e = MCEntity::new(id, id, "satellite", team);
        e.physics_type = PhysicsType::Orbital2Body;
        e.ai_type = AiType::OrbitalCombat;
        e.eci_pos = pos;
        e.orbital_combat_ai = Some(OrbitalCombatAi {
            role,
            sensor_range: 2_000_000.0,
            defense_radius: 500_000.0,
            max_accel: 50.0,
            kill_range: 50_000.0,
            scan_interval: 1.0,
            scan_timer: 0.0,
            assigned_hva_id: None,
            current_target_id: None,
            drift_target_id: None,
        });
        e
    }

    #[test]
    fn attacker_targets_nearest_hva_and_thrusts_toward_it() {
        let hva = make_combatant("hva1", "blue", CombatRole::Hva, Vec3::new(7_000_000.0, 0.0, 0.0));
        let attacker = make_combatant("atk1", "red", CombatRole::Attacker, Vec3::new(7_000_000.0, 500_000.0, 0.0));

        let entities = vec![hva, attacker.clone()];
        let decision = decide(&entities, &attacker, true, 1.0);

        assert_eq!(decision.new_target_id.as_deref(), Some("hva1"));
        assert!(decision.new_velocity.is_some());
        assert!(decision.kk_target_id.is_none());
    }

    #[test]
    fn attacker_within_kill_range_sets_kk_signal_instead_of_thrust() {
        let hva = make_combatant("hva1", "blue", CombatRole::Hva, Vec3::new(7_000_000.0, 0.0, 0.0));
        let attacker = make_combatant("atk1", "red", CombatRole::Attacker, Vec3::new(7_000_000.0, 10_000.0, 0.0));

        let entities = vec![hva, attacker.clone()];
        let decision = decide(&entities, &attacker, true, 1.0);

        assert_eq!(decision.kk_target_id.as_deref(), Some("hva1"));
        assert!(decision.new_velocity.is_none());
    }

    #[test]
    fn hva_never_acts() {
        let hva = make_combatant("hva1", "blue", CombatRole::Hva, Vec3::new(7_000_000.0, 0.0, 0.0));
        let entities = vec![hva.clone()];
        let decision = decide(&entities, &hva, true, 1.0);
        assert_eq!(decision, OrbitalAiDecision::default());
    }

    #[test]
    fn attacker_with_no_hva_in_range_goes_idle() {
        let attacker = make_combatant("atk1", "red", CombatRole::Attacker, Vec3::new(7_000_000.0, 0.0, 0.0));
        let entities = vec![attacker.clone()];
        let decision = decide(&entities, &attacker, true, 1.0);
        assert!(decision.new_target_id.is_none());
        assert!(decision.new_velocity.is_none());
    }
}

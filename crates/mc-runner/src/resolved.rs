//! Early-termination criterion for a batch run (component Q).
//!
//! The orbital subset (entities with `orbital_combat` AI and a
//! non-`None` role) and the atmospheric subset (flight-3DOF entities
//! carrying an AI or a weapon) are each checked independently, per team.
//! A run ends the moment either subset has a team fully spent.

use std::collections::HashMap;

use mc_core::enums::{AiType, CombatRole, PhysicsType};
use mc_core::world::MCWorld;

/// True once either the orbital or the atmospheric combat subset has
/// been resolved for some team, per the §4.14 early-termination rule.
pub fn all_combat_resolved(world: &MCWorld) -> bool {
    orbital_subset_resolved(world) || atmospheric_subset_resolved(world)
}

fn orbital_subset_resolved(world: &MCWorld) -> bool {
    let mut by_team: HashMap<&str, (Vec<bool>, Vec<bool>)> = HashMap::new();

    for e in world.entities() {
        if e.ai_type != AiType::OrbitalCombat {
            continue;
        }
        let Some(ai) = &e.orbital_combat_ai else { continue };
        if ai.role == CombatRole::None {
            continue;
        }
        let entry = by_team.entry(e.team.as_str()).or_default();
        if ai.role == CombatRole::Hva {
            entry.0.push(e.destroyed);
        } else {
            entry.1.push(e.destroyed);
        }
    }

    by_team.values().any(|(hvas, combat_units)| {
        (!hvas.is_empty() && hvas.iter().all(|d| *d))
            || (!combat_units.is_empty() && combat_units.iter().all(|d| *d))
    })
}

fn atmospheric_subset_resolved(world: &MCWorld) -> bool {
    let mut by_team: HashMap<&str, Vec<bool>> = HashMap::new();

    for e in world.entities() {
        if e.physics_type != PhysicsType::Flight3Dof {
            continue;
        }
        if e.ai_type == AiType::None && e.weapon_type == mc_core::enums::WeaponType::None {
            continue;
        }
        by_team.entry(e.team.as_str()).or_default().push(e.destroyed);
    }

    by_team.values().any(|destroyed| !destroyed.is_empty() && destroyed.iter().all(|d| *d))
}

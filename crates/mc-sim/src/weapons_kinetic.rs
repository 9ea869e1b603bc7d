//! Kinetic-kill weapon (component O, kinetic branch).
//!
//! A single-shot sacrificial interceptor. `LAUNCH` is logged the moment
//! `kk_target_id` first differs from
//! `last_launch_target` — before the kill-range check — so a LAUNCH can
//! be recorded well before the weapon is actually within range. A hit
//! destroys both attacker and target (mutual destruction); a miss clears
//! the target designation and starts the cooldown.

use mc_core::entity::MCEntity;
use mc_core::enums::EngagementResult;
use mc_core::prng::Mulberry32;
use mc_core::world::MCWorld;

pub fn update_all(world: &mut MCWorld, dt: f64) {
    let sim_time = world.sim_time;
    for i in 0..world.entities().len() {
        let eligible = {
            let e = &world.entities()[i];
            e.kinetic_kill.is_some() && e.is_live()
        };
        if !eligible {
            continue;
        }

        let target_id = world.entities()[i].kk_target_id.clone();
        let target_idx = target_id.as_ref().and_then(|id| world.index_of(id));

        let (target_eci, target_name, target_live) = match target_idx {
            Some(idx) => {
                let t = &world.entities()[idx];
                (Some(t.eci_pos), t.name.clone(), t.is_live())
            }
            None => (None, String::new(), false),
        };

        update_entity(world, i, target_idx, target_eci, target_name, target_live, sim_time, dt);
    }
}

#[allow(clippy::too_many_arguments)]
fn update_entity(
    world: &mut MCWorld,
    attacker_idx: usize,
    target_idx: Option<usize>,
    target_eci: Option<mc_core::vector::Vec3>,
    target_name: String,
    target_live: bool,
    sim_time: f64,
    dt: f64,
) {
    {
        let kk = world.entities_mut()[attacker_idx].kinetic_kill.as_mut().unwrap();
        if kk.cooldown_timer > 0.0 {
            kk.cooldown_timer = (kk.cooldown_timer - dt).max(0.0);
            return;
        }
    }

    if world.entities()[attacker_idx].kk_target_id.is_none() {
        return;
    }

    let Some(target_idx) = target_idx else {
        world.entities_mut()[attacker_idx].kk_target_id = None;
        return;
    };
    if !target_live {
        world.entities_mut()[attacker_idx].kk_target_id = None;
        return;
    }
    let target_eci = target_eci.unwrap();

    let target_id = world.entities()[attacker_idx].kk_target_id.clone().unwrap();
    let attacker_eci = world.entities()[attacker_idx].eci_pos;
    let dist = (target_eci - attacker_eci).length();

    let already_launched = world.entities()[attacker_idx].kinetic_kill.as_ref().unwrap().last_launch_target.as_deref() == Some(target_id.as_str());
    if !already_launched {
        world.entities_mut()[attacker_idx].kinetic_kill.as_mut().unwrap().last_launch_target = Some(target_id.clone());
        let attacker = &mut world.entities_mut()[attacker_idx];
        attacker.record(target_id.clone(), target_name.clone(), EngagementResult::Launch, sim_time);
    }

    let kill_range = world.entities()[attacker_idx].kinetic_kill.as_ref().unwrap().kill_range;
    if dist > kill_range {
        return;
    }

    let pk = world.entities()[attacker_idx].kinetic_kill.as_ref().unwrap().pk;
    let hit = roll_bernoulli(&mut world.rng, pk);

    if hit {
        let attacker_name = world.entities()[attacker_idx].name.clone();
        let attacker_id = world.entities()[attacker_idx].id.clone();

        let target = &mut world.entities_mut()[target_idx];
        target.kill();
        target.record(attacker_id, attacker_name, EngagementResult::KilledBy, sim_time);

        let attacker = &mut world.entities_mut()[attacker_idx];
        attacker.kill();
        attacker.record(target_id, target_name, EngagementResult::Kill, sim_time);
    } else {
        let attacker = &mut world.entities_mut()[attacker_idx];
        let kk = attacker.kinetic_kill.as_mut().unwrap();
        kk.cooldown_timer = kk.cooldown_time;
        attacker.kk_target_id = None;
        attacker.record(target_id, target_name, EngagementResult::Miss, sim_time);
    }
}

fn roll_bernoulli(rng: &mut Mulberry32, p: f64) -> bool {
    rng.bernoulli(p)
}

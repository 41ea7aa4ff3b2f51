//! Fixed timestep world update
//!
//! One entry point, [`tick`], advances the whole simulation by `dt_ms`.
//! Nothing advances while a level-up choice is outstanding or after game
//! over; resuming play picks up every weapon timer exactly where it froze.
//!
//! Order within a tick: difficulty ramp, spawning, hostile movement,
//! contact damage, weapons (equip order), pickup collection.

use crate::sim::hostiles::Defeat;
use crate::sim::weapons::WeaponCtx;
use crate::sim::world::{GameEvent, GamePhase, World};

/// Advance the world by one fixed timestep (milliseconds)
pub fn tick(world: &mut World, dt_ms: f32) {
    if world.phase != GamePhase::Playing {
        return;
    }
    world.time_ms += dt_ms as f64;

    advance_difficulty(world, dt_ms);
    spawn_hostiles(world, dt_ms);
    move_hostiles(world, dt_ms);
    contact_pass(world, dt_ms);
    if world.phase == GamePhase::GameOver {
        return;
    }
    update_weapons(world, dt_ms);
    collect_pickups(world);
}

/// Scale hostile hp, spawn batch size, and speed over the run
fn advance_difficulty(world: &mut World, dt_ms: f32) {
    let config = &world.config.difficulty;
    let d = &mut world.difficulty;

    d.hp_timer += dt_ms;
    if d.hp_timer >= config.hp_tick_ms {
        d.hp_timer = 0.0;
        d.hp_bonus += 1;
    }
    d.batch_timer += dt_ms;
    if d.batch_timer >= config.batch_tick_ms {
        d.batch_timer = 0.0;
        d.spawn_batch += 1;
    }
    d.speed_timer += dt_ms;
    if d.speed_timer >= config.speed_tick_ms {
        d.speed_timer = 0.0;
        // Round to 2 decimals so the scalar stays readable in saves
        d.speed_mul = (d.speed_mul * config.speed_scale * 100.0).round() / 100.0;
    }
}

fn spawn_hostiles(world: &mut World, dt_ms: f32) {
    world.spawn_timer += dt_ms;
    if world.spawn_timer < world.config.spawn.interval_ms {
        return;
    }
    world.spawn_timer = 0.0;
    for _ in 0..world.difficulty.spawn_batch {
        world.spawn_hostile();
    }
}

/// Hostiles seek straight toward the avatar
fn move_hostiles(world: &mut World, dt_ms: f32) {
    let origin = world.origin();
    for (_, hostile) in world.hostiles.iter_mut() {
        let dir = (origin - hostile.pos).normalize_or_zero();
        hostile.pos += dir * hostile.speed * dt_ms / 1000.0;
    }
}

/// Periodic contact pass: a touching hostile spends its remaining hp as
/// damage to the avatar and dies, dropping its reward like any other death.
fn contact_pass(world: &mut World, dt_ms: f32) {
    world.contact_timer += dt_ms;
    if world.contact_timer < world.config.player.contact_tick_ms {
        return;
    }
    world.contact_timer = 0.0;

    let origin = world.origin();
    let touching: Vec<(usize, i32)> = world
        .hostiles
        .iter()
        .filter(|(_, h)| {
            let threshold = world.player.radius + h.radius;
            (h.pos - origin).length_squared() <= threshold * threshold
        })
        .map(|(slot, h)| (slot, h.hp.max(0)))
        .collect();

    let mut died = false;
    for (slot, hp) in touching {
        if hp > 0 {
            died |= world.player.take_damage(hp);
        }
        if let Some(defeat) = world.hostiles.despawn(slot) {
            resolve_defeat(world, defeat);
        }
    }
    if died {
        log::info!(
            "game over at {:.0}s, level {}",
            world.time_ms / 1000.0,
            world.ledger.level()
        );
        world.events.push(GameEvent::PlayerDied);
        world.phase = GamePhase::GameOver;
    }
}

/// Advance every weapon in equip order, resolving each weapon's hits as
/// its own damage pass
fn update_weapons(world: &mut World, dt_ms: f32) {
    let origin = world.origin();
    // Weapons are detached from the world for the loop so each can borrow
    // the arena and RNG without aliasing
    let mut weapons = std::mem::take(&mut world.weapons);
    for weapon in &mut weapons {
        let record = world.weapon_record(weapon.id());
        let stats = world.stats.clone();
        let defeats = {
            let mut ctx = WeaponCtx {
                dt_ms,
                origin,
                stats: &stats,
                record: &record,
                rng: &mut world.rng,
            };
            weapon.update(&mut ctx, &mut world.hostiles)
        };
        for defeat in defeats {
            resolve_defeat(world, defeat);
        }
    }
    world.weapons = weapons;
}

/// Shared death handling: reward drop plus presentation event
fn resolve_defeat(world: &mut World, defeat: Defeat) {
    let id = world.next_entity_id();
    let point = defeat.loot_point(&mut world.rng);
    let pickup_config = world.config.pickup.clone();
    world
        .pickups
        .spawn_reward(id, point, &pickup_config, &mut world.rng);
    world.events.push(GameEvent::HostileDefeated { pos: defeat.pos });
}

/// Gather pickups inside the avatar's collection radius
fn collect_pickups(world: &mut World) {
    let origin = world.origin();
    let collected = world.pickups.collect(origin, world.player.pickup_radius);
    if collected.heal > 0 {
        world.player.heal(collected.heal);
    }
    if collected.xp > 0 {
        world.grant_xp(collected.xp as f64);
    }
}

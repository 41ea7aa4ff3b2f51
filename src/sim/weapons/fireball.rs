//! Fireball - volley of straight-line bolts at random in-range hostiles
//!
//! On cooldown, up to `count` distinct hostiles inside the range are
//! sampled without replacement and one bolt is launched at each target's
//! position. Bolts fly straight, die on their first hostile contact, and
//! expire after `range / speed` if they never connect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKey;
use crate::dist_sq;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::HostileArena;
use crate::sim::stats::StatVector;
use crate::sim::targeting;
use crate::sim::weapons::{Hit, WeaponCtx, cooldown_dim, damage_dim, range_dim, speed_dim};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireballConfig {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub cooldown_floor_ms: f32,
    pub range: f32,
    /// Px per second
    pub projectile_speed: f32,
    /// Bolt contact radius
    pub radius: f32,
}

impl Default for FireballConfig {
    fn default() -> Self {
        Self {
            damage: 10,
            cooldown_ms: 1500.0,
            cooldown_floor_ms: 120.0,
            range: 100.0,
            projectile_speed: 260.0,
            radius: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireballParams {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub range: f32,
    pub projectile_speed: f32,
    pub radius: f32,
    pub count: u32,
}

/// One bolt in flight
#[derive(Debug, Clone)]
struct Bolt {
    pos: Vec2,
    vel: Vec2,
    life_ms: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FireballWeapon {
    config: FireballConfig,
    timer: f32,
    bolts: Vec<Bolt>,
}

impl FireballWeapon {
    pub fn with_config(config: FireballConfig) -> Self {
        Self {
            config,
            timer: 0.0,
            bolts: Vec::new(),
        }
    }

    /// Derive runtime params (pure)
    pub fn params(&self, stats: &StatVector, record: &WeaponRecord) -> FireballParams {
        FireballParams {
            damage: damage_dim(self.config.damage, stats.damage, record.count(UpgradeKey::Damage)),
            cooldown_ms: cooldown_dim(
                self.config.cooldown_ms,
                record.count(UpgradeKey::Cooldown),
                stats.attack_speed,
                self.config.cooldown_floor_ms,
            ),
            range: range_dim(self.config.range, stats.area, record.count(UpgradeKey::Range)),
            projectile_speed: speed_dim(
                self.config.projectile_speed,
                record.count(UpgradeKey::Speed),
            ),
            radius: (self.config.radius
                * (1.0 + 0.10 * record.count(UpgradeKey::Radius) as f32))
                .floor(),
            count: (stats.projectiles + record.count(UpgradeKey::Projectiles)).max(1),
        }
    }

    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena) -> Vec<Hit> {
        let params = self.params(ctx.stats, ctx.record);
        let mut hits = Vec::new();

        // Advance bolts; each dies on expiry or on its first contact
        let dt_s = ctx.dt_ms / 1000.0;
        self.bolts.retain_mut(|bolt| {
            bolt.pos += bolt.vel * dt_s;
            bolt.life_ms -= ctx.dt_ms;
            if bolt.life_ms <= 0.0 {
                return false;
            }
            for (slot, hostile) in arena.iter() {
                let r = params.radius + hostile.radius;
                if dist_sq(hostile.pos, bolt.pos) <= r * r {
                    hits.push((slot, params.damage));
                    return false;
                }
            }
            true
        });

        self.timer += ctx.dt_ms;
        if self.timer >= params.cooldown_ms {
            self.timer = 0.0;
            self.fire_volley(ctx, arena, &params);
        }
        hits
    }

    fn fire_volley(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena, params: &FireballParams) {
        let candidates = targeting::all_within(arena, ctx.origin, params.range);
        if candidates.is_empty() {
            return;
        }
        let targets =
            targeting::sample_without_replacement(candidates, params.count as usize, ctx.rng);
        log::debug!("fireball volley: {} bolts", targets.len());
        for slot in targets {
            let Some(hostile) = arena.get(slot) else {
                continue;
            };
            let dir = (hostile.pos - ctx.origin).normalize_or_zero();
            if dir == Vec2::ZERO {
                continue;
            }
            self.bolts.push(Bolt {
                pos: ctx.origin,
                vel: dir * params.projectile_speed,
                life_ms: params.range / params.projectile_speed * 1000.0,
            });
        }
    }

    #[cfg(test)]
    fn bolt_count(&self) -> usize {
        self.bolts.len()
    }
}

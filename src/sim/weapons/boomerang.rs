//! Boomerang - out-and-back throw with a pierce budget
//!
//! Each throw is parametrized by `t` in [0, 2]: the outbound leg covers
//! [0, 1] toward the throw target, the return leg (1, 2] retraces the same
//! line back to the avatar. Contact is checked on both legs. The pierce
//! budget allows `pierce + 1` hostiles to be damaged before the projectile
//! destroys itself.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKey;
use crate::dist_sq;
use crate::polar_to_cartesian;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::HostileArena;
use crate::sim::stats::StatVector;
use crate::sim::targeting;
use crate::sim::weapons::{Hit, WeaponCtx, cooldown_dim, damage_dim, range_dim, speed_dim};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoomerangConfig {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub cooldown_floor_ms: f32,
    pub range: f32,
    /// Px per second
    pub projectile_speed: f32,
    /// Projectile contact radius
    pub radius: f32,
    /// Hostiles beyond the first that one throw may damage
    pub pierce: u32,
}

impl Default for BoomerangConfig {
    fn default() -> Self {
        Self {
            damage: 12,
            cooldown_ms: 1300.0,
            cooldown_floor_ms: 120.0,
            range: 80.0,
            projectile_speed: 220.0,
            radius: 6.0,
            pierce: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoomerangParams {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub range: f32,
    pub projectile_speed: f32,
    pub radius: f32,
    pub count: u32,
    pub pierce: u32,
}

/// One throw in flight
#[derive(Debug, Clone)]
struct Throw {
    origin: Vec2,
    target: Vec2,
    /// Path parameter: [0, 1] outbound, (1, 2] inbound
    t: f32,
    total_dist: f32,
    /// Remaining pierce budget; the throw dies when this goes negative
    pierce_left: i32,
    /// Hostile ids this throw already damaged - one hit per hostile per throw
    struck: HashSet<u32>,
}

impl Throw {
    fn position(&self) -> Vec2 {
        let tt = self.t.min(2.0);
        let u = if tt <= 1.0 { tt } else { 2.0 - tt };
        self.origin.lerp(self.target, u)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoomerangWeapon {
    config: BoomerangConfig,
    timer: f32,
    throws: Vec<Throw>,
}

impl BoomerangWeapon {
    pub fn with_config(config: BoomerangConfig) -> Self {
        Self {
            config,
            timer: 0.0,
            throws: Vec::new(),
        }
    }

    /// Derive runtime params (pure)
    pub fn params(&self, stats: &StatVector, record: &WeaponRecord) -> BoomerangParams {
        BoomerangParams {
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
            pierce: self.config.pierce,
        }
    }

    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena) -> Vec<Hit> {
        let params = self.params(ctx.stats, ctx.record);
        let mut hits = Vec::new();

        let speed_per_ms = params.projectile_speed / 1000.0;
        self.throws.retain_mut(|throw| {
            throw.t += speed_per_ms * ctx.dt_ms / throw.total_dist.max(1.0);
            let pos = throw.position();

            // Contact on both legs, limited by the pierce budget; each
            // hostile is damaged at most once per throw
            let overlapping: Vec<(usize, u32)> = arena
                .iter()
                .filter(|(_, h)| {
                    let r = params.radius + h.radius;
                    !throw.struck.contains(&h.id) && dist_sq(h.pos, pos) <= r * r
                })
                .map(|(slot, h)| (slot, h.id))
                .collect();
            for (slot, id) in overlapping {
                if throw.pierce_left < 0 {
                    break;
                }
                hits.push((slot, params.damage));
                throw.struck.insert(id);
                throw.pierce_left -= 1;
            }
            throw.pierce_left >= 0 && throw.t < 2.0
        });

        self.timer += ctx.dt_ms;
        if self.timer >= params.cooldown_ms {
            self.timer = 0.0;
            self.throw_volley(ctx, arena, &params);
        }
        hits
    }

    fn throw_volley(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena, params: &BoomerangParams) {
        let candidates = targeting::all_within(arena, ctx.origin, params.range);
        for _ in 0..params.count {
            // Aim at a random in-range hostile, or a random direction if none
            let target = if candidates.is_empty() {
                let angle = ctx.rng.random_range(0.0..std::f32::consts::TAU);
                ctx.origin + polar_to_cartesian(params.range, angle)
            } else {
                let slot = candidates[ctx.rng.random_range(0..candidates.len())];
                match arena.get(slot) {
                    Some(hostile) => hostile.pos,
                    None => continue,
                }
            };
            self.throws.push(Throw {
                origin: ctx.origin,
                target,
                t: 0.0,
                total_dist: (target - ctx.origin).length(),
                pierce_left: params.pierce as i32,
                struck: HashSet::new(),
            });
        }
    }

    #[cfg(test)]
    fn throw_count(&self) -> usize {
        self.throws.len()
    }
}

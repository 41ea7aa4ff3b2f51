//! Chain lightning - instant bolt that jumps between nearby hostiles
//!
//! A cast grabs the nearest hostile in range, then repeatedly jumps to the
//! nearest not-yet-visited hostile within chain range of the current one,
//! up to `max_jumps` extra hops. Damage decays by `falloff` per hop but
//! never below 1. The visited set guarantees no hostile is struck twice in
//! one cast.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKey;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::HostileArena;
use crate::sim::stats::StatVector;
use crate::sim::targeting;
use crate::sim::weapons::{Hit, WeaponCtx, cooldown_dim, damage_dim, range_dim};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainLightningConfig {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub cooldown_floor_ms: f32,
    /// Acquisition range from the avatar to the first target
    pub range: f32,
    /// Max distance between chained targets
    pub chain_range: f32,
    /// Extra hops after the first target
    pub max_jumps: u32,
    /// Damage multiplier per hop
    pub falloff: f32,
}

impl Default for ChainLightningConfig {
    fn default() -> Self {
        Self {
            damage: 10,
            cooldown_ms: 2000.0,
            cooldown_floor_ms: 150.0,
            range: 90.0,
            chain_range: 50.0,
            max_jumps: 0,
            falloff: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLightningParams {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub range: f32,
    pub chain_range: f32,
    pub max_jumps: u32,
    pub falloff: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ChainLightningWeapon {
    config: ChainLightningConfig,
    timer: f32,
}

impl ChainLightningWeapon {
    pub fn with_config(config: ChainLightningConfig) -> Self {
        Self { config, timer: 0.0 }
    }

    /// Derive runtime params (pure)
    pub fn params(&self, stats: &StatVector, record: &WeaponRecord) -> ChainLightningParams {
        let extra_from_stats = stats.projectiles.saturating_sub(1);
        ChainLightningParams {
            damage: damage_dim(self.config.damage, stats.damage, record.count(UpgradeKey::Damage)),
            cooldown_ms: cooldown_dim(
                self.config.cooldown_ms,
                record.count(UpgradeKey::Cooldown),
                stats.attack_speed,
                self.config.cooldown_floor_ms,
            ),
            range: range_dim(self.config.range, stats.area, record.count(UpgradeKey::Range)),
            // Chain range shares the radius upgrade key
            chain_range: range_dim(
                self.config.chain_range,
                stats.area,
                record.count(UpgradeKey::Radius),
            ),
            max_jumps: self.config.max_jumps
                + extra_from_stats
                + record.count(UpgradeKey::Projectiles),
            falloff: self.config.falloff,
        }
    }

    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena) -> Vec<Hit> {
        let params = self.params(ctx.stats, ctx.record);
        self.timer += ctx.dt_ms;
        if self.timer < params.cooldown_ms {
            return Vec::new();
        }
        self.timer = 0.0;
        self.cast(ctx, arena, &params)
    }

    fn cast(&self, ctx: &WeaponCtx, arena: &HostileArena, params: &ChainLightningParams) -> Vec<Hit> {
        let mut visited = HashSet::new();
        let Some(first) = targeting::nearest_within(arena, ctx.origin, params.range, &visited)
        else {
            return Vec::new();
        };

        let mut chain = vec![first];
        visited.insert(first);
        let mut current = first;
        for _ in 0..params.max_jumps {
            let current_pos = match arena.get(current) {
                Some(h) => h.pos,
                None => break,
            };
            let Some(next) =
                targeting::nearest_within(arena, current_pos, params.chain_range, &visited)
            else {
                break;
            };
            chain.push(next);
            visited.insert(next);
            current = next;
        }

        log::debug!("chain lightning cast: {} targets", chain.len());
        chain
            .into_iter()
            .enumerate()
            .map(|(hop, slot)| {
                let damage =
                    ((params.damage as f32) * params.falloff.powi(hop as i32)).floor().max(1.0);
                (slot, damage as i32)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hostiles::Hostile;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawn_at(arena: &mut HostileArena, id: u32, pos: Vec2) -> usize {
        arena.spawn(Hostile {
            id,
            pos,
            hp: 1000,
            hp_start: 1000,
            radius: 10.0,
            speed: 0.0,
        })
    }

    fn cast_once(
        weapon: &mut ChainLightningWeapon,
        arena: &HostileArena,
        stats: &StatVector,
        record: &WeaponRecord,
    ) -> Vec<Hit> {
        let mut rng = Pcg32::seed_from_u64(10);
        let mut ctx = WeaponCtx {
            dt_ms: 2000.0,
            origin: Vec2::ZERO,
            stats,
            record,
            rng: &mut rng,
        };
        weapon.update(&mut ctx, arena)
    }

    #[test]
    fn test_cast_hits_each_target_once() {
        // maxJumps 2 via upgrades, four hostiles all mutually in chain range:
        // exactly three struck, each exactly once
        let mut weapon = ChainLightningWeapon::default();
        let stats = StatVector::default();
        let mut record = WeaponRecord { level: 1, ..Default::default() };
        record.counts.insert(UpgradeKey::Projectiles, 2);

        let mut arena = HostileArena::new();
        spawn_at(&mut arena, 1, Vec2::new(30.0, 0.0));
        spawn_at(&mut arena, 2, Vec2::new(50.0, 0.0));
        spawn_at(&mut arena, 3, Vec2::new(40.0, 20.0));
        spawn_at(&mut arena, 4, Vec2::new(60.0, 10.0));

        let hits = cast_once(&mut weapon, &arena, &stats, &record);
        assert_eq!(hits.len(), 3);
        let mut slots: Vec<usize> = hits.iter().map(|(s, _)| *s).collect();
        slots.dedup();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_damage_falls_off_per_hop() {
        let mut weapon = ChainLightningWeapon::default();
        let stats = StatVector::default();
        let mut record = WeaponRecord { level: 1, ..Default::default() };
        record.counts.insert(UpgradeKey::Projectiles, 2);

        let mut arena = HostileArena::new();
        spawn_at(&mut arena, 1, Vec2::new(30.0, 0.0));
        spawn_at(&mut arena, 2, Vec2::new(60.0, 0.0));
        spawn_at(&mut arena, 3, Vec2::new(90.0, 0.0));

        let hits = cast_once(&mut weapon, &arena, &stats, &record);
        let damages: Vec<i32> = hits.iter().map(|(_, d)| *d).collect();
        // 10, floor(10 * 0.8), floor(10 * 0.64)
        assert_eq!(damages, vec![10, 8, 6]);
    }

    #[test]
    fn test_no_jumps_at_base_config() {
        let mut weapon = ChainLightningWeapon::default();
        let stats = StatVector::default();
        let record = WeaponRecord { level: 1, ..Default::default() };

        let mut arena = HostileArena::new();
        spawn_at(&mut arena, 1, Vec2::new(30.0, 0.0));
        spawn_at(&mut arena, 2, Vec2::new(50.0, 0.0));

        let hits = cast_once(&mut weapon, &arena, &stats, &record);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_chain_stops_when_out_of_chain_range() {
        let mut weapon = ChainLightningWeapon::default();
        let stats = StatVector::default();
        let mut record = WeaponRecord { level: 1, ..Default::default() };
        record.counts.insert(UpgradeKey::Projectiles, 5);

        let mut arena = HostileArena::new();
        spawn_at(&mut arena, 1, Vec2::new(30.0, 0.0));
        // 200 px away from the first target: beyond the 50 px chain range
        spawn_at(&mut arena, 2, Vec2::new(230.0, 0.0));

        let hits = cast_once(&mut weapon, &arena, &stats, &record);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_no_target_no_cast() {
        let mut weapon = ChainLightningWeapon::default();
        let stats = StatVector::default();
        let record = WeaponRecord { level: 1, ..Default::default() };
        let arena = HostileArena::new();
        assert!(cast_once(&mut weapon, &arena, &stats, &record).is_empty());
    }

    #[test]
    fn test_damage_floor_is_one() {
        let mut weapon = ChainLightningWeapon::with_config(ChainLightningConfig {
            damage: 1,
            max_jumps: 3,
            ..Default::default()
        });
        let stats = StatVector::default();
        let record = WeaponRecord { level: 1, ..Default::default() };

        let mut arena = HostileArena::new();
        spawn_at(&mut arena, 1, Vec2::new(20.0, 0.0));
        spawn_at(&mut arena, 2, Vec2::new(40.0, 0.0));
        spawn_at(&mut arena, 3, Vec2::new(60.0, 0.0));
        spawn_at(&mut arena, 4, Vec2::new(80.0, 0.0));

        let hits = cast_once(&mut weapon, &arena, &stats, &record);
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|(_, d)| *d == 1));
    }
}

//! Aura - damaging pulse around the avatar
//!
//! The simplest weapon: a timer accumulates, and on reaching the cooldown
//! every hostile inside the radius takes one atomic hit.

use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKey;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::HostileArena;
use crate::sim::stats::StatVector;
use crate::sim::targeting;
use crate::sim::weapons::{Hit, WeaponCtx, cooldown_dim, damage_dim, range_dim};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuraConfig {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub cooldown_floor_ms: f32,
    pub radius: f32,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            damage: 5,
            cooldown_ms: 250.0,
            cooldown_floor_ms: 60.0,
            radius: 60.0,
        }
    }
}

/// Concrete numbers for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuraParams {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Default)]
pub struct AuraWeapon {
    config: AuraConfig,
    timer: f32,
}

impl AuraWeapon {
    pub fn with_config(config: AuraConfig) -> Self {
        Self { config, timer: 0.0 }
    }

    /// Derive runtime params (pure)
    pub fn params(&self, stats: &StatVector, record: &WeaponRecord) -> AuraParams {
        AuraParams {
            damage: damage_dim(self.config.damage, stats.damage, record.count(UpgradeKey::Damage)),
            cooldown_ms: cooldown_dim(
                self.config.cooldown_ms,
                record.count(UpgradeKey::Cooldown),
                stats.attack_speed,
                self.config.cooldown_floor_ms,
            ),
            radius: range_dim(self.config.radius, stats.area, record.count(UpgradeKey::Radius))
                .max(1.0),
        }
    }

    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena) -> Vec<Hit> {
        let params = self.params(ctx.stats, ctx.record);
        self.timer += ctx.dt_ms;
        if self.timer < params.cooldown_ms {
            return Vec::new();
        }
        self.timer = 0.0;
        targeting::all_within(arena, ctx.origin, params.radius)
            .into_iter()
            .map(|slot| (slot, params.damage))
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

    fn ctx<'a>(
        dt_ms: f32,
        stats: &'a StatVector,
        record: &'a WeaponRecord,
        rng: &'a mut Pcg32,
    ) -> WeaponCtx<'a> {
        WeaponCtx {
            dt_ms,
            origin: Vec2::ZERO,
            stats,
            record,
            rng,
        }
    }

    fn arena_at(xs: &[f32]) -> HostileArena {
        let mut arena = HostileArena::new();
        for (i, x) in xs.iter().enumerate() {
            arena.spawn(Hostile {
                id: i as u32 + 1,
                pos: Vec2::new(*x, 0.0),
                hp: 100,
                hp_start: 100,
                radius: 10.0,
                speed: 0.0,
            });
        }
        arena
    }

    #[test]
    fn test_pulse_hits_everything_in_radius() {
        let mut weapon = AuraWeapon::default();
        let stats = StatVector::default();
        let record = WeaponRecord { level: 1, ..Default::default() };
        let mut rng = Pcg32::seed_from_u64(1);
        let arena = arena_at(&[30.0, 59.0, 61.0]);

        // First tick reaches the 250 ms cooldown exactly
        let mut c = ctx(250.0, &stats, &record, &mut rng);
        let hits = weapon.update(&mut c, &arena);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|(_, dmg)| *dmg == 5));
    }

    #[test]
    fn test_timer_resets_after_pulse() {
        let mut weapon = AuraWeapon::default();
        let stats = StatVector::default();
        let record = WeaponRecord { level: 1, ..Default::default() };
        let mut rng = Pcg32::seed_from_u64(1);
        let arena = arena_at(&[10.0]);

        let mut c = ctx(250.0, &stats, &record, &mut rng);
        assert_eq!(weapon.update(&mut c, &arena).len(), 1);
        // Immediately after firing, a short tick does nothing
        let mut c = ctx(100.0, &stats, &record, &mut rng);
        assert!(weapon.update(&mut c, &arena).is_empty());
    }

    #[test]
    fn test_params_scale_with_upgrades() {
        let weapon = AuraWeapon::default();
        let stats = StatVector {
            damage: 1.5,
            area: 2.0,
            ..Default::default()
        };
        let mut record = WeaponRecord { level: 1, ..Default::default() };
        record.counts.insert(UpgradeKey::Damage, 2);
        record.counts.insert(UpgradeKey::Radius, 1);
        let params = weapon.params(&stats, &record);
        // floor(5 * 1.5 * 1.3) = 9
        assert_eq!(params.damage, 9);
        // floor(60 * 2.0 * 1.1) = 132
        assert_eq!(params.radius, 132.0);
    }
}

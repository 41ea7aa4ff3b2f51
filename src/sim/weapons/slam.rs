//! Slam - ground shockwave expanding from the avatar
//!
//! Dormant until the cooldown elapses, then a ring grows linearly from the
//! avatar out to its max radius. Damage falls off linearly with the ring's
//! progress and lands on hostiles whose collision edge sits inside a small
//! tolerance band around the current radius. Each hostile can be hit at
//! most once per ring lifetime.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKey;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::HostileArena;
use crate::sim::stats::StatVector;
use crate::sim::weapons::{Hit, WeaponCtx, cooldown_dim, damage_dim, range_dim, speed_dim};

/// Band half-width around the ring radius where contact counts
const RING_TOLERANCE: f32 = 4.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlamConfig {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub cooldown_floor_ms: f32,
    pub max_radius: f32,
    /// Px per second
    pub growth_speed: f32,
}

impl Default for SlamConfig {
    fn default() -> Self {
        Self {
            damage: 50,
            cooldown_ms: 5000.0,
            cooldown_floor_ms: 180.0,
            max_radius: 90.0,
            growth_speed: 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlamParams {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub max_radius: f32,
    pub growth_speed: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SlamWeapon {
    config: SlamConfig,
    timer: f32,
    active: bool,
    current_radius: f32,
    /// Hostile ids (not slots - slots can be reused mid-ring) already hit
    /// by the active ring
    struck: HashSet<u32>,
}

impl SlamWeapon {
    pub fn with_config(config: SlamConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Derive runtime params (pure)
    pub fn params(&self, stats: &StatVector, record: &WeaponRecord) -> SlamParams {
        SlamParams {
            damage: damage_dim(self.config.damage, stats.damage, record.count(UpgradeKey::Damage)),
            cooldown_ms: cooldown_dim(
                self.config.cooldown_ms,
                record.count(UpgradeKey::Cooldown),
                stats.attack_speed,
                self.config.cooldown_floor_ms,
            ),
            max_radius: range_dim(
                self.config.max_radius,
                stats.area,
                record.count(UpgradeKey::Radius),
            )
            .max(1.0),
            growth_speed: speed_dim(self.config.growth_speed, record.count(UpgradeKey::Growth)),
        }
    }

    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena) -> Vec<Hit> {
        let params = self.params(ctx.stats, ctx.record);

        if !self.active {
            self.timer += ctx.dt_ms;
            if self.timer >= params.cooldown_ms {
                self.timer = 0.0;
                self.active = true;
                self.current_radius = 1.0;
                self.struck.clear();
                log::debug!("slam ring started (max {})", params.max_radius);
            }
            return Vec::new();
        }

        self.current_radius =
            (self.current_radius + params.growth_speed * ctx.dt_ms / 1000.0).min(params.max_radius);

        let hits = self.ring_hits(ctx, arena, &params);

        if self.current_radius >= params.max_radius {
            // Ring fully expanded: deactivate and re-arm the cooldown
            self.active = false;
            self.current_radius = 0.0;
            self.struck.clear();
        }
        hits
    }

    fn ring_hits(&mut self, ctx: &WeaponCtx, arena: &HostileArena, params: &SlamParams) -> Vec<Hit> {
        // Damage decays linearly from full at the center to zero at max radius
        let progress = self.current_radius / params.max_radius.max(1.0);
        let damage = ((params.damage as f32) * (1.0 - progress)).floor() as i32;
        if damage <= 0 {
            return Vec::new();
        }
        let band_min = (self.current_radius - RING_TOLERANCE).max(0.0);
        let band_max = self.current_radius + RING_TOLERANCE;

        let mut hits = Vec::new();
        for (slot, hostile) in arena.iter() {
            if self.struck.contains(&hostile.id) {
                continue;
            }
            let dist = (hostile.pos - ctx.origin).length();
            let edge = (dist - hostile.radius).max(0.0);
            if edge >= band_min && edge <= band_max {
                self.struck.insert(hostile.id);
                hits.push((slot, damage));
            }
        }
        hits
    }

    #[cfg(test)]
    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hostiles::Hostile;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn run_tick(
        weapon: &mut SlamWeapon,
        arena: &HostileArena,
        dt_ms: f32,
        rng: &mut Pcg32,
    ) -> Vec<Hit> {
        let stats = StatVector::default();
        let record = WeaponRecord { level: 1, ..Default::default() };
        let mut ctx = WeaponCtx {
            dt_ms,
            origin: Vec2::ZERO,
            stats: &stats,
            record: &record,
            rng,
        };
        weapon.update(&mut ctx, arena)
    }

    fn spawn_at(arena: &mut HostileArena, id: u32, x: f32) -> usize {
        arena.spawn(Hostile {
            id,
            pos: Vec2::new(x, 0.0),
            hp: 1000,
            hp_start: 1000,
            radius: 10.0,
            speed: 0.0,
        })
    }

    #[test]
    fn test_ring_arms_after_cooldown() {
        let mut weapon = SlamWeapon::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let arena = HostileArena::new();
        run_tick(&mut weapon, &arena, 4999.0, &mut rng);
        assert!(!weapon.is_active());
        run_tick(&mut weapon, &arena, 1.0, &mut rng);
        assert!(weapon.is_active());
    }

    #[test]
    fn test_hostile_hit_once_per_ring() {
        let mut weapon = SlamWeapon::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut arena = HostileArena::new();
        // Edge at 30 (center 40, radius 10)
        let slot = spawn_at(&mut arena, 1, 40.0);

        run_tick(&mut weapon, &arena, 5000.0, &mut rng);
        // Sweep the ring across the whole field in small steps
        let mut hits = Vec::new();
        for _ in 0..200 {
            hits.extend(run_tick(&mut weapon, &arena, 8.0, &mut rng));
            if !weapon.is_active() {
                break;
            }
        }
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, slot);
        // Ring finished and re-armed
        assert!(!weapon.is_active());
    }

    #[test]
    fn test_damage_decays_with_progress() {
        let mut weapon = SlamWeapon::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut arena = HostileArena::new();
        spawn_at(&mut arena, 1, 12.0); // edge at 2: hit early, near-full damage
        spawn_at(&mut arena, 2, 90.0); // edge at 80: hit late, heavily decayed

        run_tick(&mut weapon, &arena, 5000.0, &mut rng);
        let mut seen = Vec::new();
        for _ in 0..200 {
            seen.extend(run_tick(&mut weapon, &arena, 8.0, &mut rng));
            if !weapon.is_active() {
                break;
            }
        }
        assert_eq!(seen.len(), 2);
        let early = seen[0].1;
        let late = seen[1].1;
        assert!(early > late, "early {early} late {late}");
        assert!(late >= 1);
    }

    #[test]
    fn test_ring_ignores_hostiles_outside_band() {
        let mut weapon = SlamWeapon::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut arena = HostileArena::new();
        // Edge at 190, past max radius 90: never touched
        spawn_at(&mut arena, 1, 200.0);

        run_tick(&mut weapon, &arena, 5000.0, &mut rng);
        let mut hits = Vec::new();
        for _ in 0..200 {
            hits.extend(run_tick(&mut weapon, &arena, 8.0, &mut rng));
            if !weapon.is_active() {
                break;
            }
        }
        assert!(hits.is_empty());
    }
}

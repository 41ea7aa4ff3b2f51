//! Blades - contact hitboxes orbiting the avatar
//!
//! The blades revolve continuously; damage lands on a separate, slower
//! timer. Within one damage tick a hostile is hit by at most one blade -
//! the first overlapping blade claims it and the scan moves on.

use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKey;
use crate::dist_sq;
use crate::polar_to_cartesian;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::HostileArena;
use crate::sim::stats::StatVector;
use crate::sim::weapons::{Hit, WeaponCtx, cooldown_dim, damage_dim, range_dim, speed_dim};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BladesConfig {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub cooldown_floor_ms: f32,
    pub orbit_radius: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    pub blade_hit_radius: f32,
    pub blade_count: u32,
}

impl Default for BladesConfig {
    fn default() -> Self {
        Self {
            damage: 10,
            cooldown_ms: 250.0,
            cooldown_floor_ms: 60.0,
            orbit_radius: 80.0,
            rotation_speed: 180.0,
            blade_hit_radius: 8.0,
            blade_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladesParams {
    pub damage: i32,
    pub cooldown_ms: f32,
    pub orbit_radius: f32,
    /// Radians per second
    pub angular_velocity: f32,
    pub blade_hit_radius: f32,
    pub blade_count: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BladesWeapon {
    config: BladesConfig,
    timer: f32,
    /// Current blade phase angles, radians
    blades: Vec<f32>,
}

impl BladesWeapon {
    pub fn with_config(config: BladesConfig) -> Self {
        Self {
            config,
            timer: 0.0,
            blades: Vec::new(),
        }
    }

    /// Derive runtime params (pure)
    pub fn params(&self, stats: &StatVector, record: &WeaponRecord) -> BladesParams {
        let extra_from_stats = stats.projectiles.saturating_sub(1);
        let count = self.config.blade_count
            + record.count(UpgradeKey::Projectiles)
            + extra_from_stats;
        BladesParams {
            damage: damage_dim(self.config.damage, stats.damage, record.count(UpgradeKey::Damage)),
            cooldown_ms: cooldown_dim(
                self.config.cooldown_ms,
                record.count(UpgradeKey::Cooldown),
                stats.attack_speed,
                self.config.cooldown_floor_ms,
            ),
            orbit_radius: range_dim(
                self.config.orbit_radius,
                stats.area,
                record.count(UpgradeKey::Radius),
            ),
            angular_velocity: speed_dim(self.config.rotation_speed, record.count(UpgradeKey::Speed))
                .to_radians(),
            blade_hit_radius: self.config.blade_hit_radius,
            blade_count: count.max(1),
        }
    }

    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &HostileArena) -> Vec<Hit> {
        let params = self.params(ctx.stats, ctx.record);

        // Re-space blades evenly whenever the count changes
        if self.blades.len() != params.blade_count as usize {
            let n = params.blade_count as usize;
            self.blades = (0..n)
                .map(|i| (i as f32 / n as f32) * std::f32::consts::TAU)
                .collect();
        }

        let step = params.angular_velocity * ctx.dt_ms / 1000.0;
        for angle in &mut self.blades {
            *angle = (*angle + step) % std::f32::consts::TAU;
        }

        self.timer += ctx.dt_ms;
        if self.timer < params.cooldown_ms {
            return Vec::new();
        }
        self.timer = 0.0;

        let blade_positions: Vec<_> = self
            .blades
            .iter()
            .map(|&angle| ctx.origin + polar_to_cartesian(params.orbit_radius, angle))
            .collect();

        let mut hits = Vec::new();
        for (slot, hostile) in arena.iter() {
            let hit_r = params.blade_hit_radius + hostile.radius;
            // First overlapping blade claims the hostile for this tick
            if blade_positions
                .iter()
                .any(|&bp| dist_sq(hostile.pos, bp) <= hit_r * hit_r)
            {
                hits.push((slot, params.damage));
            }
        }
        hits
    }
}

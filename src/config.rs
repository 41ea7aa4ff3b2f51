//! Data-driven game balance
//!
//! Everything a balance pass would want to touch without recompiling lives
//! here. Weapon base numbers live with their runtime modules in
//! `sim::weapons`; this covers the run itself: spawning, difficulty ramp,
//! the avatar, and pickups.

use serde::{Deserialize, Serialize};

/// Hostile spawning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Milliseconds between spawn ticks
    pub interval_ms: f32,
    /// Spawn ring around the avatar (min distance)
    pub min_radius: f32,
    /// Spawn ring around the avatar (max distance)
    pub max_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000.0,
            min_radius: 260.0,
            max_radius: 380.0,
        }
    }
}

/// Hostile base stats before difficulty scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileConfig {
    pub base_hp: i32,
    /// Seek speed toward the avatar, px/sec
    pub base_speed: f32,
    pub radius: f32,
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            base_hp: 5,
            base_speed: 40.0,
            radius: 10.0,
        }
    }
}

/// Difficulty ramp cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Hostile hp bonus increments every this many ms
    pub hp_tick_ms: f32,
    /// Spawn batch size increments every this many ms
    pub batch_tick_ms: f32,
    /// Hostile speed multiplier scales every this many ms
    pub speed_tick_ms: f32,
    /// Multiplier applied to hostile speed each speed tick
    pub speed_scale: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            hp_tick_ms: 10_000.0,
            batch_tick_ms: 30_000.0,
            speed_tick_ms: 30_000.0,
            speed_scale: 1.10,
        }
    }
}

/// Avatar parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub base_health: i32,
    pub base_shield: i32,
    pub radius: f32,
    /// Milliseconds between contact damage passes
    pub contact_tick_ms: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_health: 100,
            base_shield: 0,
            radius: 16.0,
            contact_tick_ms: 300.0,
        }
    }
}

/// Pickup and loot parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupConfig {
    /// Starting collection radius for xp crystals
    pub base_radius: f32,
    /// Chance that a defeated hostile drops loot instead of xp (0..1)
    pub loot_drop_chance: f64,
    /// Heal amount for the health pack drop
    pub health_pack_heal: i32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            base_radius: 50.0,
            loot_drop_chance: 0.01,
            health_pack_heal: 20,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub spawn: SpawnConfig,
    pub hostile: HostileConfig,
    pub difficulty: DifficultyConfig,
    pub player: PlayerConfig,
    pub pickup: PickupConfig,
}

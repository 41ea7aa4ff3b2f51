//! Spire Survivors - a stationary-defense survivors game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hostiles, weapons, pickups, game state)
//! - `catalog`: Closed tome/weapon catalogs and the rarity roll table
//! - `progression`: XP ledger, owned records, level-up offers
//! - `save`: Save/load with permissive defaulting
//! - `config`: Data-driven game balance

pub mod catalog;
pub mod config;
pub mod progression;
pub mod save;
pub mod sim;

pub use config::SimConfig;
pub use progression::ProgressionLedger;
pub use sim::{GameEvent, GamePhase, StatVector, World, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (120 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tome loadout size - unlock offers stop once all slots are filled
    pub const MAX_TOME_SLOTS: usize = 4;

    /// XP required for the first level-up
    pub const XP_BASE_NEEDED: u64 = 10;
    /// Threshold growth per level-up (`needed = ceil(needed * 1.5)`)
    pub const XP_NEEDED_GROWTH: f64 = 1.5;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Squared distance between two points (cheap range checks)
#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

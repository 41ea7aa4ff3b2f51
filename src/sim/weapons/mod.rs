//! Weapon runtime - six independent tick-driven behaviors
//!
//! Each weapon owns its cooldown timer and any in-flight projectile state,
//! derives concrete numbers fresh every tick from base config x stat vector
//! x upgrade counts, and resolves damage through the arena's collect-then-
//! apply pass. Weapons update one at a time in equip order, so a pass only
//! ever contains one weapon's hits.

pub mod aura;
pub mod blades;
pub mod boomerang;
pub mod chain_lightning;
pub mod fireball;
pub mod slam;

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::catalog::WeaponId;
use crate::progression::WeaponRecord;
use crate::sim::hostiles::{Defeat, HostileArena};
use crate::sim::stats::StatVector;

pub use aura::AuraWeapon;
pub use blades::BladesWeapon;
pub use boomerang::BoomerangWeapon;
pub use chain_lightning::ChainLightningWeapon;
pub use fireball::FireballWeapon;
pub use slam::SlamWeapon;

/// Per-tick inputs shared by every weapon
pub struct WeaponCtx<'a> {
    /// Timestep in milliseconds
    pub dt_ms: f32,
    /// The avatar anchor all weapons fire from
    pub origin: Vec2,
    pub stats: &'a StatVector,
    pub record: &'a WeaponRecord,
    pub rng: &'a mut Pcg32,
}

/// A pending damage application: (arena slot, damage)
pub type Hit = (usize, i32);

/// One equipped weapon instance
#[derive(Debug, Clone)]
pub enum Weapon {
    Aura(AuraWeapon),
    Blades(BladesWeapon),
    Fireball(FireballWeapon),
    Slam(SlamWeapon),
    Boomerang(BoomerangWeapon),
    ChainLightning(ChainLightningWeapon),
}

impl Weapon {
    /// Instantiate a weapon with its shipped base config
    pub fn new(id: WeaponId) -> Self {
        match id {
            WeaponId::Aura => Weapon::Aura(AuraWeapon::default()),
            WeaponId::Blades => Weapon::Blades(BladesWeapon::default()),
            WeaponId::Fireball => Weapon::Fireball(FireballWeapon::default()),
            WeaponId::Slam => Weapon::Slam(SlamWeapon::default()),
            WeaponId::Boomerang => Weapon::Boomerang(BoomerangWeapon::default()),
            WeaponId::ChainLightning => Weapon::ChainLightning(ChainLightningWeapon::default()),
        }
    }

    pub fn id(&self) -> WeaponId {
        match self {
            Weapon::Aura(_) => WeaponId::Aura,
            Weapon::Blades(_) => WeaponId::Blades,
            Weapon::Fireball(_) => WeaponId::Fireball,
            Weapon::Slam(_) => WeaponId::Slam,
            Weapon::Boomerang(_) => WeaponId::Boomerang,
            Weapon::ChainLightning(_) => WeaponId::ChainLightning,
        }
    }

    /// Advance one tick: collect this weapon's hits, then resolve them
    /// against the arena in a single pass. Returns the hostiles defeated.
    pub fn update(&mut self, ctx: &mut WeaponCtx, arena: &mut HostileArena) -> Vec<Defeat> {
        let hits = match self {
            Weapon::Aura(w) => w.update(ctx, arena),
            Weapon::Blades(w) => w.update(ctx, arena),
            Weapon::Fireball(w) => w.update(ctx, arena),
            Weapon::Slam(w) => w.update(ctx, arena),
            Weapon::Boomerang(w) => w.update(ctx, arena),
            Weapon::ChainLightning(w) => w.update(ctx, arena),
        };
        if hits.is_empty() {
            Vec::new()
        } else {
            arena.apply_hits(&hits)
        }
    }
}

// --- Runtime parameter derivation -----------------------------------------
//
// Every weapon dimension follows one of these shapes. Values are floored to
// whole units so two clients computing params from the same inputs agree.

/// Damage-type dimension: `max(1, floor(base * stat * (1 + 0.15 * count)))`
pub(crate) fn damage_dim(base: i32, stat: f32, count: u32) -> i32 {
    ((base as f32) * stat * (1.0 + 0.15 * count as f32)).floor().max(1.0) as i32
}

/// Radius/range-type dimension: `floor(base * stat * (1 + 0.10 * count))`
pub(crate) fn range_dim(base: f32, stat: f32, count: u32) -> f32 {
    (base * stat * (1.0 + 0.10 * count as f32)).floor()
}

/// Speed-type dimension: `base * (1 + 0.10 * count)`, unfloored
pub(crate) fn speed_dim(base: f32, count: u32) -> f32 {
    base * (1.0 + 0.10 * count as f32)
}

/// Cooldown dimension: 10% faster per upgrade, divided by attack speed,
/// clamped to the weapon's floor
pub(crate) fn cooldown_dim(base_ms: f32, count: u32, attack_speed: f32, floor_ms: f32) -> f32 {
    (base_ms * 0.9f32.powi(count as i32) / attack_speed.max(0.1))
        .floor()
        .max(floor_ms)
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (slot order for hostiles, equip order for weapons)
//! - Collect-then-apply damage passes; never mutate the arena mid-iteration
//! - No rendering or platform dependencies

pub mod hostiles;
pub mod pickups;
pub mod player;
pub mod stats;
pub mod targeting;
pub mod tick;
pub mod weapons;
pub mod world;

pub use hostiles::{Defeat, Hostile, HostileArena};
pub use pickups::{Collected, Pickup, PickupField, PickupKind};
pub use player::Player;
pub use stats::{ModOp, StatId, StatModifier, StatVector};
pub use tick::tick;
pub use weapons::{Weapon, WeaponCtx};
pub use world::{Difficulty, GameEvent, GamePhase, World};

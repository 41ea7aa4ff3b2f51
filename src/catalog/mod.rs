//! Closed item catalogs
//!
//! Every tome and weapon the game can offer is enumerated here, dispatched by
//! id at compile time. No open-ended registries: adding content means adding
//! an enum variant and its match arms.

pub mod rarity;
pub mod tomes;
pub mod weapons;

pub use rarity::{Rarity, RollResult};
pub use tomes::TomeId;
pub use weapons::{UpgradeKey, WeaponId};

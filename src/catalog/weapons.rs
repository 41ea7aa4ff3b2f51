//! Weapon catalog - ids, display names, upgrade dimensions
//!
//! Base numeric configs live with each weapon's runtime module in
//! `sim::weapons`; the catalog only knows what exists and which upgrade
//! dimensions each weapon offers at level-up.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::catalog::rarity::{self, RollResult};

/// All weapons the game can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponId {
    Aura,
    Blades,
    Fireball,
    Slam,
    Boomerang,
    ChainLightning,
}

/// Catalog order (also offer listing order)
pub const ALL_WEAPONS: [WeaponId; 6] = [
    WeaponId::Aura,
    WeaponId::Blades,
    WeaponId::Fireball,
    WeaponId::Slam,
    WeaponId::Boomerang,
    WeaponId::ChainLightning,
];

impl WeaponId {
    /// Stable string id (used in saves and offer ids)
    pub fn id(&self) -> &'static str {
        match self {
            WeaponId::Aura => "aura",
            WeaponId::Blades => "blades",
            WeaponId::Fireball => "fireball",
            WeaponId::Slam => "slam",
            WeaponId::Boomerang => "boomerang",
            WeaponId::ChainLightning => "chainLightning",
        }
    }

    /// Parse a save/offer id; unknown ids yield `None` and are ignored upstream
    pub fn from_id(s: &str) -> Option<Self> {
        ALL_WEAPONS.into_iter().find(|w| w.id() == s)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponId::Aura => "Aura",
            WeaponId::Blades => "Blades",
            WeaponId::Fireball => "Fireball",
            WeaponId::Slam => "Slam",
            WeaponId::Boomerang => "Boomerang",
            WeaponId::ChainLightning => "Chain Lightning",
        }
    }

    /// Upgrade dimensions this weapon offers once owned
    pub fn upgrade_keys(&self) -> &'static [UpgradeKey] {
        use UpgradeKey::*;
        match self {
            WeaponId::Aura => &[Damage, Radius, Cooldown],
            WeaponId::Blades => &[Damage, Cooldown, Radius, Speed, Projectiles],
            WeaponId::Fireball => &[Damage, Cooldown, Range, Speed, Radius, Projectiles],
            WeaponId::Slam => &[Damage, Cooldown, Radius, Growth],
            WeaponId::Boomerang => &[Damage, Cooldown, Range, Speed, Radius, Projectiles],
            WeaponId::ChainLightning => &[Damage, Cooldown, Range, Radius, Projectiles],
        }
    }
}

/// Upgrade dimension keys shared across weapons
///
/// `Radius` doubles as the chain-range dimension for chain lightning, the
/// same way the save format keys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeKey {
    Damage,
    Cooldown,
    Radius,
    Range,
    Speed,
    Projectiles,
    Growth,
}

impl UpgradeKey {
    /// Stable string key (used in saves and offer ids)
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKey::Damage => "damage",
            UpgradeKey::Cooldown => "cooldown",
            UpgradeKey::Radius => "radius",
            UpgradeKey::Range => "range",
            UpgradeKey::Speed => "speed",
            UpgradeKey::Projectiles => "projectiles",
            UpgradeKey::Growth => "growth",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        [
            UpgradeKey::Damage,
            UpgradeKey::Cooldown,
            UpgradeKey::Radius,
            UpgradeKey::Range,
            UpgradeKey::Speed,
            UpgradeKey::Projectiles,
            UpgradeKey::Growth,
        ]
        .into_iter()
        .find(|k| k.as_str() == s)
    }

    /// Offer button label
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKey::Damage => "Damage+",
            UpgradeKey::Cooldown => "Faster Cooldown",
            UpgradeKey::Radius => "Radius+",
            UpgradeKey::Range => "Range+",
            UpgradeKey::Speed => "Speed+",
            UpgradeKey::Projectiles => "More Projectiles",
            UpgradeKey::Growth => "Faster Growth",
        }
    }

    /// Count-type upgrades roll a flat integer instead of a magnitude
    pub fn is_count_type(&self) -> bool {
        matches!(self, UpgradeKey::Projectiles)
    }

    /// Roll the magnitude an upgrade on this dimension would grant
    pub fn roll(&self, rng: &mut Pcg32) -> RollResult {
        if self.is_count_type() {
            rarity::roll_count()
        } else {
            rarity::roll_magnitude(rng)
        }
    }
}

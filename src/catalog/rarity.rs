//! Weighted rarity table for upgrade magnitude rolls
//!
//! Every roll-bearing upgrade samples a tier from a fixed weight table, then
//! draws its magnitude uniformly within the tier's range. Magnitudes are
//! rounded to 2 decimals so the UI can print them verbatim; count-type
//! upgrades (extra projectiles) always roll a flat +1 at common.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Rarity tiers, rarest last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// All tiers in draw order
pub const ALL_RARITIES: [Rarity; 5] = [
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
];

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Draw weight out of [`total_weight`]
    pub fn weight(&self) -> u32 {
        match self {
            Rarity::Common => 55,
            Rarity::Uncommon => 25,
            Rarity::Rare => 12,
            Rarity::Epic => 6,
            Rarity::Legendary => 2,
        }
    }

    /// Magnitude range for roll-bearing upgrades
    pub fn magnitude_range(&self) -> (f32, f32) {
        match self {
            Rarity::Common => (0.05, 0.10),
            Rarity::Uncommon => (0.10, 0.18),
            Rarity::Rare => (0.18, 0.30),
            Rarity::Epic => (0.30, 0.50),
            Rarity::Legendary => (0.50, 1.00),
        }
    }

    /// Display color (hex) for offer buttons
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "#b0bec5",
            Rarity::Uncommon => "#66bb6a",
            Rarity::Rare => "#42a5f5",
            Rarity::Epic => "#ab47bc",
            Rarity::Legendary => "#ffa726",
        }
    }
}

/// Sum of all tier weights
pub fn total_weight() -> u32 {
    ALL_RARITIES.iter().map(|r| r.weight()).sum()
}

/// A sampled upgrade magnitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollResult {
    pub rarity: Rarity,
    pub value: f32,
}

/// Sample a tier from the weight table
pub fn roll_rarity(rng: &mut Pcg32) -> Rarity {
    let mut pick = rng.random_range(0..total_weight());
    for rarity in ALL_RARITIES {
        let w = rarity.weight();
        if pick < w {
            return rarity;
        }
        pick -= w;
    }
    // Weights always cover the range; unreachable in practice
    Rarity::Common
}

/// Roll a fractional magnitude: weighted tier, uniform in range, 2 decimals
pub fn roll_magnitude(rng: &mut Pcg32) -> RollResult {
    let rarity = roll_rarity(rng);
    let (min, max) = rarity.magnitude_range();
    let value = ((rng.random_range(min..=max)) * 100.0).round() / 100.0;
    RollResult { rarity, value }
}

/// Roll for a count-type upgrade: fixed +1 at common
pub fn roll_count() -> RollResult {
    RollResult {
        rarity: Rarity::Common,
        value: 1.0,
    }
}

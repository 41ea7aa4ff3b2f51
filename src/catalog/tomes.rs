//! Tome catalog - passive, stackable stat modifiers
//!
//! Each tome targets one stat. Upgrades either append a rarity-rolled
//! magnitude (most tomes) or step an integer (projectiles). The catalog order
//! of [`ALL_TOMES`] is the order modifiers are folded into the stat vector,
//! which only matters for `Set` modifiers: the catalog ships at most one
//! `Set` per stat, and if a modified catalog violates that, the last entry
//! in catalog order wins.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::catalog::rarity::{self, RollResult};
use crate::sim::stats::{ModOp, StatId, StatModifier};

/// All tomes the game can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TomeId {
    Area,
    Damage,
    Projectiles,
    AttackSpeed,
    Learning,
    Magnetism,
}

/// Catalog order (also modifier fold order)
pub const ALL_TOMES: [TomeId; 6] = [
    TomeId::Area,
    TomeId::Damage,
    TomeId::Projectiles,
    TomeId::AttackSpeed,
    TomeId::Learning,
    TomeId::Magnetism,
];

impl TomeId {
    /// Stable string id (used in saves and offer ids)
    pub fn id(&self) -> &'static str {
        match self {
            TomeId::Area => "tome-area",
            TomeId::Damage => "tome-damage",
            TomeId::Projectiles => "tome-projectiles",
            TomeId::AttackSpeed => "tome-attackSpeed",
            TomeId::Learning => "tome-xp",
            TomeId::Magnetism => "tome-pickup",
        }
    }

    /// Parse a save/offer id; unknown ids yield `None` and are ignored upstream
    pub fn from_id(s: &str) -> Option<Self> {
        ALL_TOMES.into_iter().find(|t| t.id() == s)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TomeId::Area => "Tome of Area",
            TomeId::Damage => "Tome of Damage",
            TomeId::Projectiles => "Tome of Projectiles",
            TomeId::AttackSpeed => "Tome of Attack Speed",
            TomeId::Learning => "Tome of Learning",
            TomeId::Magnetism => "Tome of Magnetism",
        }
    }

    /// The stat this tome modifies
    pub fn stat(&self) -> StatId {
        match self {
            TomeId::Area => StatId::Area,
            TomeId::Damage => StatId::Damage,
            TomeId::Projectiles => StatId::Projectiles,
            TomeId::AttackSpeed => StatId::AttackSpeed,
            TomeId::Learning => StatId::XpGain,
            TomeId::Magnetism => StatId::Pickup,
        }
    }

    /// Modifiers contributed by an owned tome at the given level/rolls
    pub fn modifiers(&self, level: u32, rolls: &[f32]) -> Vec<StatModifier> {
        match self {
            // Integer stat: base 1 + one projectile per level
            TomeId::Projectiles => vec![StatModifier {
                stat: StatId::Projectiles,
                op: ModOp::Set,
                value: (1 + level) as f32,
            }],
            _ => vec![StatModifier {
                stat: self.stat(),
                op: ModOp::Mult,
                value: default_multiplier(level, rolls),
            }],
        }
    }

    /// Roll the magnitude an upgrade of this tome would grant
    pub fn roll_upgrade(&self, rng: &mut Pcg32) -> RollResult {
        match self {
            TomeId::Projectiles => rarity::roll_count(),
            _ => rarity::roll_magnitude(rng),
        }
    }
}

/// Default tome formula: rolled magnitudes if any were taken, else 20% per level
fn default_multiplier(level: u32, rolls: &[f32]) -> f32 {
    let sum: f32 = rolls.iter().sum();
    1.0 + if sum > 0.0 { sum } else { 0.20 * level as f32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for tome in ALL_TOMES {
            assert_eq!(TomeId::from_id(tome.id()), Some(tome));
        }
        assert_eq!(TomeId::from_id("tome-unknown"), None);
    }

    #[test]
    fn test_level_fallback_formula() {
        // Level 3, no rolls -> 1 + 0.20 * 3
        let mods = TomeId::Damage.modifiers(3, &[]);
        assert_eq!(mods.len(), 1);
        assert!((mods[0].value - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_rolls_override_level_formula() {
        let mods = TomeId::Area.modifiers(5, &[0.12, 0.30]);
        assert!((mods[0].value - 1.42).abs() < 1e-6);
        assert_eq!(mods[0].op, ModOp::Mult);
    }

    #[test]
    fn test_projectiles_is_set_type() {
        let mods = TomeId::Projectiles.modifiers(2, &[]);
        assert_eq!(mods[0].op, ModOp::Set);
        assert_eq!(mods[0].value, 3.0);
    }
}

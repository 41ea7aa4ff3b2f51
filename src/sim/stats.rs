//! Stat aggregation - owned tomes folded into one multiplier vector
//!
//! The vector is recomputed from scratch whenever the loadout changes, never
//! patched incrementally. Recomputation is cheap enough that weapons could
//! call it per tick, but the world caches it on acquisition/upgrade events.

use serde::{Deserialize, Serialize};

use crate::catalog::tomes::ALL_TOMES;
use crate::progression::Loadout;

/// Stats a modifier can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatId {
    Area,
    Damage,
    Projectiles,
    AttackSpeed,
    XpGain,
    Pickup,
}

const STAT_COUNT: usize = 6;

impl StatId {
    fn index(&self) -> usize {
        match self {
            StatId::Area => 0,
            StatId::Damage => 1,
            StatId::Projectiles => 2,
            StatId::AttackSpeed => 3,
            StatId::XpGain => 4,
            StatId::Pickup => 5,
        }
    }
}

/// How a modifier combines into the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModOp {
    Mult,
    Add,
    Set,
}

/// One stat contribution from a tome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatId,
    pub op: ModOp,
    pub value: f32,
}

/// Current multiplier set derived from all owned tomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatVector {
    pub area: f32,
    pub damage: f32,
    /// Integer stat: projectile/instance count baseline, always >= 1
    pub projectiles: u32,
    pub attack_speed: f32,
    pub xp_gain: f32,
    pub pickup: f32,
}

impl Default for StatVector {
    fn default() -> Self {
        Self {
            area: 1.0,
            damage: 1.0,
            projectiles: 1,
            attack_speed: 1.0,
            xp_gain: 1.0,
            pickup: 1.0,
        }
    }
}

impl StatVector {
    /// Fold every owned tome's modifiers, in catalog order, into a fresh vector.
    ///
    /// `Mult` multiplies, `Add` adds, `Set` overwrites. `Set` is the only
    /// order-dependent op; shipped catalogs put at most one `Set` on a stat,
    /// and if that constraint is broken the last tome in catalog order wins.
    pub fn recompute(loadout: &Loadout) -> Self {
        let mut acc = [1.0f32; STAT_COUNT];
        for tome in ALL_TOMES {
            let Some(record) = loadout.tomes.get(&tome) else {
                continue;
            };
            if record.level == 0 {
                continue;
            }
            for modifier in tome.modifiers(record.level, &record.rolls) {
                let slot = &mut acc[modifier.stat.index()];
                match modifier.op {
                    ModOp::Mult => *slot *= modifier.value,
                    ModOp::Add => *slot += modifier.value,
                    ModOp::Set => *slot = modifier.value,
                }
            }
        }
        Self {
            area: acc[StatId::Area.index()].max(0.0),
            damage: acc[StatId::Damage.index()].max(0.0),
            projectiles: (acc[StatId::Projectiles.index()].floor() as i64).max(1) as u32,
            attack_speed: acc[StatId::AttackSpeed.index()].max(0.0),
            xp_gain: acc[StatId::XpGain.index()].max(0.0),
            pickup: acc[StatId::Pickup.index()].max(0.0),
        }
    }
}

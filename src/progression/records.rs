//! Owned tome and weapon records
//!
//! Records track what the player picked, not what it currently does: levels,
//! upgrade counts, and summed roll magnitudes. Runtime numbers are derived
//! from these fresh every tick. Upgrades against unowned items are silent
//! no-ops.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{TomeId, UpgradeKey, WeaponId};

/// One owned tome: level plus the rolled magnitudes taken so far
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomeRecord {
    pub level: u32,
    pub rolls: Vec<f32>,
}

/// One owned weapon: level plus per-dimension upgrade accumulators
///
/// `counts` steps by one per selection and drives the runtime formulas;
/// `rolled` sums the rarity-rolled magnitudes taken on the same dimension so
/// both are available to the UI and the save file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub level: u32,
    pub counts: BTreeMap<UpgradeKey, u32>,
    pub rolled: BTreeMap<UpgradeKey, f32>,
}

impl WeaponRecord {
    /// Upgrade count on a dimension (0 if never taken)
    pub fn count(&self, key: UpgradeKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Summed rolled magnitude on a dimension
    pub fn rolled(&self, key: UpgradeKey) -> f32 {
        self.rolled.get(&key).copied().unwrap_or(0.0)
    }
}

/// Everything the player owns this run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub tomes: BTreeMap<TomeId, TomeRecord>,
    pub weapons: BTreeMap<WeaponId, WeaponRecord>,
}

impl Loadout {
    /// First acquisition of a tome (level 1). Re-adding an owned tome is a no-op.
    pub fn add_tome(&mut self, id: TomeId) {
        let record = self.tomes.entry(id).or_default();
        if record.level == 0 {
            record.level = 1;
            log::info!("tome acquired: {}", id.id());
        }
    }

    /// Upgrade an owned tome, appending a rolled magnitude if one was taken.
    /// Unowned tomes are ignored.
    pub fn upgrade_tome(&mut self, id: TomeId, roll: Option<f32>) {
        match self.tomes.get_mut(&id) {
            Some(record) if record.level > 0 => {
                record.level += 1;
                if let Some(value) = roll {
                    record.rolls.push(value);
                }
            }
            _ => log::warn!("ignoring upgrade for unowned tome {}", id.id()),
        }
    }

    /// First acquisition of a weapon (level 1). Re-adding is a no-op.
    pub fn add_weapon(&mut self, id: WeaponId) {
        let record = self.weapons.entry(id).or_default();
        if record.level == 0 {
            record.level = 1;
            log::info!("weapon unlocked: {}", id.id());
        }
    }

    /// Upgrade an owned weapon on one dimension. Unowned weapons are ignored.
    pub fn upgrade_weapon(&mut self, id: WeaponId, key: UpgradeKey, roll: Option<f32>) {
        match self.weapons.get_mut(&id) {
            Some(record) if record.level > 0 => {
                record.level += 1;
                *record.counts.entry(key).or_insert(0) += 1;
                if let Some(value) = roll {
                    *record.rolled.entry(key).or_insert(0.0) += value;
                }
            }
            _ => log::warn!("ignoring upgrade for unowned weapon {}", id.id()),
        }
    }

    /// Tomes owned at level > 0, in catalog order
    pub fn owned_tomes(&self) -> impl Iterator<Item = TomeId> + '_ {
        self.tomes
            .iter()
            .filter(|(_, r)| r.level > 0)
            .map(|(id, _)| *id)
    }

    /// Weapons owned at level > 0, in catalog order
    pub fn owned_weapons(&self) -> impl Iterator<Item = WeaponId> + '_ {
        self.weapons
            .iter()
            .filter(|(_, r)| r.level > 0)
            .map(|(id, _)| *id)
    }

    pub fn owns_tome(&self, id: TomeId) -> bool {
        self.tomes.get(&id).is_some_and(|r| r.level > 0)
    }

    pub fn owns_weapon(&self, id: WeaponId) -> bool {
        self.weapons.get(&id).is_some_and(|r| r.level > 0)
    }

    /// Cleared on run reset
    pub fn reset(&mut self) {
        self.tomes.clear();
        self.weapons.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tome_acquisition_and_upgrade() {
        let mut loadout = Loadout::default();
        loadout.add_tome(TomeId::Damage);
        assert_eq!(loadout.tomes[&TomeId::Damage].level, 1);

        loadout.upgrade_tome(TomeId::Damage, Some(0.25));
        loadout.upgrade_tome(TomeId::Damage, None);
        let record = &loadout.tomes[&TomeId::Damage];
        assert_eq!(record.level, 3);
        assert_eq!(record.rolls, vec![0.25]);
    }

    #[test]
    fn test_upgrade_unowned_is_noop() {
        let mut loadout = Loadout::default();
        loadout.upgrade_tome(TomeId::Area, Some(0.5));
        loadout.upgrade_weapon(WeaponId::Slam, UpgradeKey::Damage, None);
        assert!(loadout.tomes.is_empty());
        assert!(loadout.weapons.is_empty());
    }

    #[test]
    fn test_weapon_upgrade_accumulators() {
        let mut loadout = Loadout::default();
        loadout.add_weapon(WeaponId::Fireball);
        loadout.upgrade_weapon(WeaponId::Fireball, UpgradeKey::Damage, Some(0.12));
        loadout.upgrade_weapon(WeaponId::Fireball, UpgradeKey::Damage, Some(0.30));
        loadout.upgrade_weapon(WeaponId::Fireball, UpgradeKey::Projectiles, Some(1.0));

        let record = &loadout.weapons[&WeaponId::Fireball];
        assert_eq!(record.level, 4);
        assert_eq!(record.count(UpgradeKey::Damage), 2);
        assert!((record.rolled(UpgradeKey::Damage) - 0.42).abs() < 1e-6);
        assert_eq!(record.count(UpgradeKey::Projectiles), 1);
        assert_eq!(record.count(UpgradeKey::Range), 0);
    }

    #[test]
    fn test_double_add_keeps_level() {
        let mut loadout = Loadout::default();
        loadout.add_weapon(WeaponId::Aura);
        loadout.upgrade_weapon(WeaponId::Aura, UpgradeKey::Radius, None);
        loadout.add_weapon(WeaponId::Aura);
        assert_eq!(loadout.weapons[&WeaponId::Aura].level, 2);
    }
}

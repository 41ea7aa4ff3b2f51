//! Ground pickups - xp crystals and rare loot drops
//!
//! Pickups sit where they dropped until the avatar's collection radius
//! reaches them. Collection is resolved once per tick; a magnet pickup
//! sweeps every xp crystal on the field the moment it is collected.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::PickupConfig;
use crate::dist_sq;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Currency crystal
    Xp { amount: u32 },
    HealthPack { heal: i32 },
    /// Collects every xp crystal on the field
    Magnet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
}

/// Everything gathered by one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Collected {
    pub xp: u32,
    pub heal: i32,
    pub magnets: u32,
}

/// All pickups currently on the ground
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupField {
    pickups: Vec<Pickup>,
}

impl PickupField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter()
    }

    /// Drop the reward for a defeated hostile: usually an xp crystal, rarely
    /// a loot item from the weighted pool.
    pub fn spawn_reward(&mut self, id: u32, pos: Vec2, config: &PickupConfig, rng: &mut Pcg32) {
        let kind = if rng.random_bool(config.loot_drop_chance.clamp(0.0, 1.0)) {
            // Even-weight pool: health pack / magnet
            if rng.random_bool(0.5) {
                PickupKind::HealthPack {
                    heal: config.health_pack_heal,
                }
            } else {
                PickupKind::Magnet
            }
        } else {
            PickupKind::Xp { amount: 1 }
        };
        self.pickups.push(Pickup { id, kind, pos });
    }

    pub fn spawn(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    /// Collect everything within `radius` of `center`
    pub fn collect(&mut self, center: Vec2, radius: f32) -> Collected {
        let r_sq = radius * radius;
        let mut collected = Collected::default();
        self.pickups.retain(|p| {
            if dist_sq(p.pos, center) <= r_sq {
                match p.kind {
                    PickupKind::Xp { amount } => collected.xp += amount,
                    PickupKind::HealthPack { heal } => collected.heal += heal,
                    PickupKind::Magnet => collected.magnets += 1,
                }
                false
            } else {
                true
            }
        });
        if collected.magnets > 0 {
            // Magnet sweep: vacuum every remaining crystal regardless of range
            self.pickups.retain(|p| match p.kind {
                PickupKind::Xp { amount } => {
                    collected.xp += amount;
                    false
                }
                _ => true,
            });
        }
        collected
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
    }

    pub fn snapshot(&self) -> Vec<Pickup> {
        self.pickups.clone()
    }

    pub fn restore(&mut self, pickups: Vec<Pickup>) {
        self.pickups = pickups;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn xp_at(id: u32, x: f32, y: f32) -> Pickup {
        Pickup {
            id,
            kind: PickupKind::Xp { amount: 1 },
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_collect_within_radius_only() {
        let mut field = PickupField::new();
        field.spawn(xp_at(1, 10.0, 0.0));
        field.spawn(xp_at(2, 100.0, 0.0));
        let collected = field.collect(Vec2::ZERO, 50.0);
        assert_eq!(collected.xp, 1);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_health_pack_reports_heal() {
        let mut field = PickupField::new();
        field.spawn(Pickup {
            id: 1,
            kind: PickupKind::HealthPack { heal: 20 },
            pos: Vec2::ZERO,
        });
        let collected = field.collect(Vec2::ZERO, 10.0);
        assert_eq!(collected.heal, 20);
        assert!(field.is_empty());
    }

    #[test]
    fn test_magnet_sweeps_all_xp() {
        let mut field = PickupField::new();
        field.spawn(xp_at(1, 500.0, 0.0));
        field.spawn(xp_at(2, -900.0, 0.0));
        field.spawn(Pickup {
            id: 3,
            kind: PickupKind::Magnet,
            pos: Vec2::ZERO,
        });
        field.spawn(Pickup {
            id: 4,
            kind: PickupKind::HealthPack { heal: 20 },
            pos: Vec2::new(800.0, 0.0),
        });
        let collected = field.collect(Vec2::ZERO, 10.0);
        assert_eq!(collected.magnets, 1);
        assert_eq!(collected.xp, 2);
        // Magnet does not vacuum non-xp loot
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_reward_is_usually_xp() {
        let mut field = PickupField::new();
        let mut rng = Pcg32::seed_from_u64(9);
        let config = PickupConfig::default();
        for i in 0..200 {
            field.spawn_reward(i, Vec2::ZERO, &config, &mut rng);
        }
        let xp_count = field
            .iter()
            .filter(|p| matches!(p.kind, PickupKind::Xp { .. }))
            .count();
        // 1% drop chance: the vast majority must be crystals
        assert!(xp_count >= 190);
    }
}

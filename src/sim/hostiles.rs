//! Hostile arena - slot storage with liveness flags
//!
//! Weapons and the contact pass never remove hostiles while iterating.
//! The discipline is collect-then-apply: a damage pass gathers `(slot,
//! damage)` pairs first, then [`HostileArena::apply_hits`] resolves them,
//! and despawns happen only after the whole pass. A hostile whose hp
//! reaches zero mid-pass absorbs no further hits from that pass.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// A spawned hostile. The core reads position/radius and mutates hp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec2,
    pub hp: i32,
    pub hp_start: i32,
    pub radius: f32,
    /// Seek speed toward the avatar, px/sec
    pub speed: f32,
}

#[derive(Debug, Clone)]
struct Slot {
    hostile: Hostile,
    alive: bool,
}

/// A hostile defeated during a damage pass
#[derive(Debug, Clone, Copy)]
pub struct Defeat {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

impl Defeat {
    /// Where the defeated hostile's pickup lands: a random point inside
    /// its collision disc.
    pub fn loot_point(&self, rng: &mut Pcg32) -> Vec2 {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let r = rng.random_range(0.0..=self.radius.max(0.0));
        self.pos + polar_to_cartesian(r, angle)
    }
}

/// Arena of hostiles with reusable slots
#[derive(Debug, Clone, Default)]
pub struct HostileArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    alive: usize,
}

impl HostileArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hostile, reusing a free slot if one exists. Returns the slot.
    pub fn spawn(&mut self, hostile: Hostile) -> usize {
        self.alive += 1;
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Slot { hostile, alive: true };
            slot
        } else {
            self.slots.push(Slot { hostile, alive: true });
            self.slots.len() - 1
        }
    }

    /// Number of live hostiles
    pub fn len(&self) -> usize {
        self.alive
    }

    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    pub fn get(&self, slot: usize) -> Option<&Hostile> {
        self.slots
            .get(slot)
            .filter(|s| s.alive)
            .map(|s| &s.hostile)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Hostile> {
        self.slots
            .get_mut(slot)
            .filter(|s| s.alive)
            .map(|s| &mut s.hostile)
    }

    /// Live hostiles in stable slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Hostile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(i, s)| (i, &s.hostile))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Hostile)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(i, s)| (i, &mut s.hostile))
    }

    /// Resolve one damage pass.
    ///
    /// Hits are applied in order; once a hostile's hp reaches zero it takes
    /// no further hits from this pass. Newly dead hostiles are despawned
    /// after every hit has been considered and returned as [`Defeat`]s.
    pub fn apply_hits(&mut self, hits: &[(usize, i32)]) -> Vec<Defeat> {
        let mut defeated = Vec::new();
        for &(slot, damage) in hits {
            let Some(entry) = self.slots.get_mut(slot) else {
                continue;
            };
            if !entry.alive || entry.hostile.hp <= 0 {
                continue;
            }
            entry.hostile.hp -= damage.max(0);
            if entry.hostile.hp <= 0 {
                defeated.push(Defeat {
                    id: entry.hostile.id,
                    pos: entry.hostile.pos,
                    radius: entry.hostile.radius,
                });
            }
        }
        // Destruction strictly after the damage pass
        for entry in self.slots.iter_mut() {
            if entry.alive && entry.hostile.hp <= 0 {
                entry.alive = false;
            }
        }
        self.rebuild_free_list();
        defeated
    }

    /// Despawn a single hostile outside of a damage pass (contact deaths)
    pub fn despawn(&mut self, slot: usize) -> Option<Defeat> {
        let entry = self.slots.get_mut(slot)?;
        if !entry.alive {
            return None;
        }
        entry.alive = false;
        self.free.push(slot);
        self.alive -= 1;
        Some(Defeat {
            id: entry.hostile.id,
            pos: entry.hostile.pos,
            radius: entry.hostile.radius,
        })
    }

    /// Clear everything (run reset)
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.alive = 0;
    }

    /// Copy out live hostiles (save snapshot)
    pub fn snapshot(&self) -> Vec<Hostile> {
        self.iter().map(|(_, h)| h.clone()).collect()
    }

    /// Rebuild from a save snapshot
    pub fn restore(&mut self, hostiles: Vec<Hostile>) {
        self.clear();
        for hostile in hostiles {
            self.spawn(hostile);
        }
    }

    fn rebuild_free_list(&mut self) {
        self.free.clear();
        self.alive = 0;
        for (i, entry) in self.slots.iter().enumerate() {
            if entry.alive {
                self.alive += 1;
            } else {
                self.free.push(i);
            }
        }
        // Pop order reuses low slots first, keeping iteration order compact
        self.free.reverse();
    }
}

//! Game state aggregate
//!
//! The world owns everything the simulation mutates: the avatar, the
//! hostile arena, equipped weapons, pickups, records, ledger, and the run
//! RNG. All randomness flows through the world's seeded generator, so a
//! run is reproducible from its seed and input history.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::catalog::{TomeId, WeaponId};
use crate::config::SimConfig;
use crate::polar_to_cartesian;
use crate::progression::{Loadout, Offer, ProgressionLedger, WeaponRecord};
use crate::sim::hostiles::{Hostile, HostileArena};
use crate::sim::pickups::PickupField;
use crate::sim::player::Player;
use crate::sim::stats::StatVector;
use crate::sim::weapons::Weapon;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advancing
    Playing,
    /// A level-up (or starting weapon) choice is outstanding; timers frozen
    LevelUp,
    /// Run ended
    GameOver,
}

/// Notifications for the presentation layer, drained each frame.
/// The core holds no subscriber list.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelUp { level: u32 },
    StatsChanged,
    HostileDefeated { pos: Vec2 },
    WeaponListChanged,
    PlayerDied,
}

/// Run-length difficulty scalars
#[derive(Debug, Clone)]
pub struct Difficulty {
    pub hp_bonus: i32,
    pub spawn_batch: u32,
    pub speed_mul: f32,
    pub(crate) hp_timer: f32,
    pub(crate) batch_timer: f32,
    pub(crate) speed_timer: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            hp_bonus: 0,
            spawn_batch: 1,
            speed_mul: 1.0,
            hp_timer: 0.0,
            batch_timer: 0.0,
            speed_timer: 0.0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub phase: GamePhase,
    /// Run clock, milliseconds
    pub time_ms: f64,
    pub player: Player,
    pub loadout: Loadout,
    pub ledger: ProgressionLedger,
    /// Cached aggregation; refreshed on loadout changes
    pub stats: StatVector,
    /// Equipped weapons in equip order (stable across frames)
    pub weapons: Vec<Weapon>,
    pub hostiles: HostileArena,
    pub pickups: PickupField,
    pub difficulty: Difficulty,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) spawn_timer: f32,
    pub(crate) contact_timer: f32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Fresh run. Starts in [`GamePhase::LevelUp`] waiting on the starting
    /// weapon choice.
    pub fn new(seed: u64, config: SimConfig) -> Self {
        let player = Player::new(&config.player, config.pickup.base_radius);
        Self {
            seed,
            config,
            phase: GamePhase::LevelUp,
            time_ms: 0.0,
            player,
            loadout: Loadout::default(),
            ledger: ProgressionLedger::new(),
            stats: StatVector::default(),
            weapons: Vec::new(),
            hostiles: HostileArena::new(),
            pickups: PickupField::new(),
            difficulty: Difficulty::default(),
            events: Vec::new(),
            spawn_timer: 0.0,
            contact_timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// The avatar anchor. The avatar never moves; everything is relative
    /// to the world origin.
    pub fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Keep the id counter ahead of any restored entity id
    pub(crate) fn ensure_id_floor(&mut self, used: u32) {
        self.next_id = self.next_id.max(used.saturating_add(1));
    }

    /// Take all queued presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recompute the cached stat vector and everything derived from it
    pub fn refresh_stats(&mut self) {
        self.stats = StatVector::recompute(&self.loadout);
        self.player.pickup_radius =
            (self.config.pickup.base_radius * self.stats.pickup * self.stats.area).floor();
        self.events.push(GameEvent::StatsChanged);
    }

    /// Grant currency; scaled by the xp-gain stat. Queues level-ups and
    /// freezes the clock until they are resolved.
    pub fn grant_xp(&mut self, amount: f64) {
        let gained = self.ledger.add_xp(amount, self.stats.xp_gain as f64);
        if gained > 0 {
            self.events.push(GameEvent::LevelUp {
                level: self.ledger.level(),
            });
            if self.phase == GamePhase::Playing {
                self.phase = GamePhase::LevelUp;
            }
        }
    }

    /// Instantiate an owned weapon. No-op if an instance already exists.
    pub fn equip_weapon(&mut self, id: WeaponId) {
        if self.weapons.iter().any(|w| w.id() == id) {
            return;
        }
        self.weapons.push(Weapon::new(id));
        self.events.push(GameEvent::WeaponListChanged);
    }

    /// Apply a selected level-up offer and consume one queued level-up.
    ///
    /// Resumes play when no further choices are owed.
    pub fn choose(&mut self, offer: &Offer) {
        match offer {
            Offer::TomeUnlock(id) => self.loadout.add_tome(*id),
            Offer::TomeUpgrade { tome, roll } => {
                let rolled = (*tome != TomeId::Projectiles).then_some(roll.value);
                self.loadout.upgrade_tome(*tome, rolled);
            }
            Offer::WeaponUnlock(id) => {
                self.loadout.add_weapon(*id);
                self.equip_weapon(*id);
            }
            Offer::WeaponUpgrade { weapon, key, roll } => {
                let rolled = (!key.is_count_type()).then_some(roll.value);
                self.loadout.upgrade_weapon(*weapon, *key, rolled);
            }
        }
        self.refresh_stats();
        self.ledger.consume_pending_level_up();
        if self.phase == GamePhase::LevelUp {
            self.phase = if self.ledger.pending_level_ups() > 0 {
                GamePhase::LevelUp
            } else {
                GamePhase::Playing
            };
        }
    }

    /// The record backing an equipped weapon (fresh default if the loadout
    /// somehow lacks one - degrades instead of panicking)
    pub fn weapon_record(&self, id: WeaponId) -> WeaponRecord {
        self.loadout.weapons.get(&id).cloned().unwrap_or_default()
    }

    /// Spawn one hostile on the ring around the avatar
    pub fn spawn_hostile(&mut self) {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let r = self
            .rng
            .random_range(self.config.spawn.min_radius..=self.config.spawn.max_radius.max(self.config.spawn.min_radius));
        let hp = self.config.hostile.base_hp + self.difficulty.hp_bonus;
        let id = self.next_entity_id();
        self.hostiles.spawn(Hostile {
            id,
            pos: polar_to_cartesian(r, angle),
            hp,
            hp_start: hp,
            radius: self.config.hostile.radius,
            speed: self.config.hostile.base_speed * self.difficulty.speed_mul,
        });
    }

    /// Reset to a fresh run on a new seed, keeping the config
    pub fn reset(&mut self, seed: u64) {
        log::info!("run reset (seed {seed})");
        *self = World::new(seed, self.config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UpgradeKey;
    use crate::catalog::rarity::{Rarity, RollResult};

    fn roll(value: f32) -> RollResult {
        RollResult {
            rarity: Rarity::Common,
            value,
        }
    }

    #[test]
    fn test_fresh_world_waits_for_starting_weapon() {
        let world = World::new(1, SimConfig::default());
        assert_eq!(world.phase, GamePhase::LevelUp);
        assert!(world.weapons.is_empty());
    }

    #[test]
    fn test_weapon_unlock_equips_and_resumes() {
        let mut world = World::new(1, SimConfig::default());
        world.choose(&Offer::WeaponUnlock(WeaponId::Aura));
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.weapons.len(), 1);
        assert!(world.loadout.owns_weapon(WeaponId::Aura));
        let events = world.drain_events();
        assert!(events.contains(&GameEvent::WeaponListChanged));
        assert!(events.contains(&GameEvent::StatsChanged));
    }

    #[test]
    fn test_tome_choice_refreshes_stats_and_pickup_radius() {
        let mut world = World::new(1, SimConfig::default());
        world.choose(&Offer::WeaponUnlock(WeaponId::Aura));
        world.choose(&Offer::TomeUnlock(TomeId::Magnetism));
        world.choose(&Offer::TomeUpgrade {
            tome: TomeId::Magnetism,
            roll: roll(0.5),
        });
        // level 2 with rolls [0.5] -> pickup mult 1.5; radius 50 * 1.5
        assert!((world.stats.pickup - 1.5).abs() < 1e-6);
        assert_eq!(world.player.pickup_radius, 75.0);
    }

    #[test]
    fn test_grant_xp_pauses_until_choice() {
        let mut world = World::new(1, SimConfig::default());
        world.choose(&Offer::WeaponUnlock(WeaponId::Aura));
        world.grant_xp(12.0);
        assert_eq!(world.phase, GamePhase::LevelUp);
        assert_eq!(world.ledger.pending_level_ups(), 1);
        world.choose(&Offer::WeaponUpgrade {
            weapon: WeaponId::Aura,
            key: UpgradeKey::Damage,
            roll: roll(0.1),
        });
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.ledger.pending_level_ups(), 0);
        assert_eq!(world.weapon_record(WeaponId::Aura).count(UpgradeKey::Damage), 1);
    }

    #[test]
    fn test_multi_level_grant_needs_multiple_choices() {
        let mut world = World::new(1, SimConfig::default());
        world.choose(&Offer::WeaponUnlock(WeaponId::Aura));
        world.grant_xp(50.0);
        assert_eq!(world.ledger.pending_level_ups(), 3);
        world.choose(&Offer::TomeUnlock(TomeId::Damage));
        assert_eq!(world.phase, GamePhase::LevelUp);
        world.choose(&Offer::TomeUpgrade { tome: TomeId::Damage, roll: roll(0.2) });
        assert_eq!(world.phase, GamePhase::LevelUp);
        world.choose(&Offer::TomeUpgrade { tome: TomeId::Damage, roll: roll(0.2) });
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spawned_hostiles_on_ring_with_difficulty() {
        let mut world = World::new(7, SimConfig::default());
        world.difficulty.hp_bonus = 3;
        world.difficulty.speed_mul = 1.21;
        world.spawn_hostile();
        let (_, hostile) = world.hostiles.iter().next().unwrap();
        let dist = hostile.pos.length();
        assert!(dist >= 260.0 - 1e-3 && dist <= 380.0 + 1e-3);
        assert_eq!(hostile.hp, 8);
        assert!((hostile.speed - 48.4).abs() < 1e-3);
    }
}

//! Save/load with permissive defaulting
//!
//! The save is a versioned JSON envelope. Loading never rejects a run
//! wholesale: every missing field falls back to its fresh-run value,
//! unknown tome/weapon ids are dropped with a warning, and a version
//! mismatch simply means "no save". Where the save is actually written
//! (LocalStorage, a file) is the host's concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{TomeId, UpgradeKey, WeaponId};
use crate::config::SimConfig;
use crate::progression::{Loadout, ProgressionLedger, TomeRecord, WeaponRecord};
use crate::sim::hostiles::Hostile;
use crate::sim::pickups::Pickup;
use crate::sim::stats::StatVector;
use crate::sim::world::{GamePhase, World};

/// Save format version
pub const SAVE_VERSION: u32 = 1;

/// Suffix separating upgrade counts from summed roll magnitudes in the
/// flattened upgrade map ("damage" holds the count, "damage_roll" the sum)
const ROLL_SUFFIX: &str = "_roll";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveEnvelope {
    v: u32,
    data: SaveData,
}

/// Persisted tome record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomeState {
    pub level: u32,
    pub rolls: Vec<f32>,
}

/// Persisted weapon record; counts and rolled sums share one map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponState {
    pub level: u32,
    pub upgrades: BTreeMap<String, f64>,
}

/// The full persisted run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub seed: u64,
    pub xp_total: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    pub xp_current: u64,
    #[serde(default = "default_xp_needed")]
    pub xp_needed: u64,
    pub xp_overflow: f64,
    pub pending_level_ups: u32,
    pub queued_progresses: Vec<u64>,
    #[serde(default = "default_health")]
    pub health_current: i32,
    #[serde(default = "default_health")]
    pub health_max: i32,
    pub shield: i32,
    #[serde(default = "default_pickup_radius")]
    pub pickup_radius: f32,
    /// Stat snapshot for display; authoritative values are recomputed on load
    pub stats: Option<StatVector>,
    pub tome_state: BTreeMap<String, TomeState>,
    pub weapon_state: BTreeMap<String, WeaponState>,
    pub run_ms: f64,
    pub enemy_hp_bonus: i32,
    #[serde(default = "default_spawn_batch")]
    pub spawn_batch_count: u32,
    #[serde(default = "default_speed_mul")]
    pub enemy_speed_mul: f32,
    pub hostiles: Vec<Hostile>,
    pub pickups: Vec<Pickup>,
}

fn default_level() -> u32 {
    1
}
fn default_xp_needed() -> u64 {
    crate::consts::XP_BASE_NEEDED
}
fn default_health() -> i32 {
    100
}
fn default_pickup_radius() -> f32 {
    50.0
}
fn default_spawn_batch() -> u32 {
    1
}
fn default_speed_mul() -> f32 {
    1.0
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            seed: 0,
            xp_total: 0,
            level: default_level(),
            xp_current: 0,
            xp_needed: default_xp_needed(),
            xp_overflow: 0.0,
            pending_level_ups: 0,
            queued_progresses: Vec::new(),
            health_current: default_health(),
            health_max: default_health(),
            shield: 0,
            pickup_radius: default_pickup_radius(),
            stats: None,
            tome_state: BTreeMap::new(),
            weapon_state: BTreeMap::new(),
            run_ms: 0.0,
            enemy_hp_bonus: 0,
            spawn_batch_count: default_spawn_batch(),
            enemy_speed_mul: default_speed_mul(),
            hostiles: Vec::new(),
            pickups: Vec::new(),
        }
    }
}

/// Snapshot a world into its persisted form
pub fn snapshot(world: &World) -> SaveData {
    let mut tome_state = BTreeMap::new();
    for (id, record) in &world.loadout.tomes {
        tome_state.insert(
            id.id().to_string(),
            TomeState {
                level: record.level,
                rolls: record.rolls.clone(),
            },
        );
    }

    let mut weapon_state = BTreeMap::new();
    for (id, record) in &world.loadout.weapons {
        let mut upgrades = BTreeMap::new();
        for (key, count) in &record.counts {
            upgrades.insert(key.as_str().to_string(), *count as f64);
        }
        for (key, rolled) in &record.rolled {
            upgrades.insert(format!("{}{}", key.as_str(), ROLL_SUFFIX), *rolled as f64);
        }
        weapon_state.insert(
            id.id().to_string(),
            WeaponState {
                level: record.level,
                upgrades,
            },
        );
    }

    SaveData {
        seed: world.seed,
        xp_total: world.ledger.xp_total(),
        level: world.ledger.level(),
        xp_current: world.ledger.xp_current(),
        xp_needed: world.ledger.xp_needed(),
        xp_overflow: world.ledger.xp_overflow(),
        pending_level_ups: world.ledger.pending_level_ups(),
        queued_progresses: world.ledger.queued_progresses().collect(),
        health_current: world.player.health_current,
        health_max: world.player.health_max,
        shield: world.player.shield,
        pickup_radius: world.player.pickup_radius,
        stats: Some(world.stats.clone()),
        tome_state,
        weapon_state,
        run_ms: world.time_ms,
        enemy_hp_bonus: world.difficulty.hp_bonus,
        spawn_batch_count: world.difficulty.spawn_batch,
        enemy_speed_mul: world.difficulty.speed_mul,
        hostiles: world.hostiles.snapshot(),
        pickups: world.pickups.snapshot(),
    }
}

/// Hydrate a world from persisted data. Malformed pieces degrade to
/// fresh-run values field by field.
pub fn hydrate(data: SaveData, config: SimConfig) -> World {
    let mut world = World::new(data.seed, config);

    world.ledger = ProgressionLedger::from_parts(
        data.xp_total,
        data.level,
        data.xp_current,
        data.xp_needed,
        data.xp_overflow,
        data.pending_level_ups,
        data.queued_progresses,
    );

    world.player.health_max = data.health_max.max(1);
    world.player.health_current = data.health_current.clamp(0, world.player.health_max);
    world.player.shield = data.shield.max(0);

    // Pickup radius and stats are derived state: recomputed, not trusted
    world.loadout = restore_loadout(&data.tome_state, &data.weapon_state);
    world.refresh_stats();

    let owned: Vec<WeaponId> = world.loadout.owned_weapons().collect();
    for id in owned {
        world.equip_weapon(id);
    }

    world.time_ms = data.run_ms.max(0.0);
    world.difficulty.hp_bonus = data.enemy_hp_bonus.max(0);
    world.difficulty.spawn_batch = data.spawn_batch_count.max(1);
    world.difficulty.speed_mul = data.enemy_speed_mul.max(0.1);

    for hostile in &data.hostiles {
        world.ensure_id_floor(hostile.id);
    }
    for pickup in &data.pickups {
        world.ensure_id_floor(pickup.id);
    }
    world.hostiles.restore(data.hostiles);
    world.pickups.restore(data.pickups);

    // Stale presentation events from hydration are not the host's business
    world.drain_events();

    world.phase = if world.player.is_dead() {
        GamePhase::GameOver
    } else if world.weapons.is_empty() || world.ledger.pending_level_ups() > 0 {
        GamePhase::LevelUp
    } else {
        GamePhase::Playing
    };
    world
}

fn restore_loadout(
    tome_state: &BTreeMap<String, TomeState>,
    weapon_state: &BTreeMap<String, WeaponState>,
) -> Loadout {
    let mut loadout = Loadout::default();

    for (raw_id, state) in tome_state {
        let Some(id) = TomeId::from_id(raw_id) else {
            log::warn!("dropping unknown tome id in save: {raw_id}");
            continue;
        };
        if state.level == 0 {
            continue;
        }
        loadout.tomes.insert(
            id,
            TomeRecord {
                level: state.level,
                rolls: state.rolls.clone(),
            },
        );
    }

    for (raw_id, state) in weapon_state {
        let Some(id) = WeaponId::from_id(raw_id) else {
            log::warn!("dropping unknown weapon id in save: {raw_id}");
            continue;
        };
        if state.level == 0 {
            continue;
        }
        let mut record = WeaponRecord {
            level: state.level,
            ..Default::default()
        };
        for (raw_key, value) in &state.upgrades {
            let (key_name, is_roll) = match raw_key.strip_suffix(ROLL_SUFFIX) {
                Some(stripped) => (stripped, true),
                None => (raw_key.as_str(), false),
            };
            let Some(key) = UpgradeKey::from_str(key_name) else {
                log::warn!("dropping unknown upgrade key in save: {raw_key}");
                continue;
            };
            if is_roll {
                record.rolled.insert(key, *value as f32);
            } else {
                record.counts.insert(key, value.max(0.0) as u32);
            }
        }
        loadout.weapons.insert(id, record);
    }
    loadout
}

/// Serialize a world into the versioned envelope
pub fn to_json(world: &World) -> String {
    let envelope = SaveEnvelope {
        v: SAVE_VERSION,
        data: snapshot(world),
    };
    // SaveData contains nothing unserializable; this cannot fail in practice
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// Parse a saved envelope. `None` means "start fresh": missing/corrupt
/// JSON or a version we do not understand.
pub fn from_json(json: &str, config: SimConfig) -> Option<World> {
    let envelope: SaveEnvelope = match serde_json::from_str(json) {
        Ok(envelope) => envelope,
        Err(err) => {
            log::warn!("unreadable save, starting fresh: {err}");
            return None;
        }
    };
    if envelope.v != SAVE_VERSION {
        log::warn!("save version {} not supported, starting fresh", envelope.v);
        return None;
    }
    log::info!("save loaded (level {}, {:.0}s in)", envelope.data.level, envelope.data.run_ms / 1000.0);
    Some(hydrate(envelope.data, config))
}

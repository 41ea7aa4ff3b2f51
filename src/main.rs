//! Spire Survivors entry point
//!
//! Headless demo host: seeds a world, drives the deterministic core at the
//! fixed timestep, auto-resolves level-up choices, and prints a run summary.
//! Usage: `spire-survivors [seed] [minutes]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use spire_survivors::consts::SIM_DT_MS;
use spire_survivors::progression::{level_up_offers, starting_weapon_offers};
use spire_survivors::sim::{GameEvent, GamePhase, World, tick};
use spire_survivors::{SimConfig, save};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(1)
        });
    let minutes: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2.0);

    log::info!("starting run: seed {seed}, {minutes} min");
    run(seed, minutes * 60_000.0);
}

fn run(seed: u64, max_ms: f64) {
    let mut world = World::new(seed, SimConfig::default());
    // Host-side RNG for menu picks, separate from the sim's generator
    let mut host_rng = Pcg32::seed_from_u64(seed.wrapping_add(0x9E37_79B9));

    // Starting weapon
    let start = starting_weapon_offers();
    let pick = &start[host_rng.random_range(0..start.len())];
    log::info!("starting weapon: {}", pick.label());
    world.choose(pick);

    let mut defeated: u64 = 0;
    while world.time_ms < max_ms && world.phase != GamePhase::GameOver {
        tick(&mut world, SIM_DT_MS);

        // Auto-resolve queued level-up choices like a player mashing cards
        while world.phase == GamePhase::LevelUp {
            let offers = level_up_offers(&world.loadout, &mut host_rng);
            match offers.get(host_rng.random_range(0..offers.len().max(1))) {
                Some(offer) => {
                    log::info!("picked: {}", offer.label());
                    world.choose(offer);
                }
                None => break,
            }
        }

        for event in world.drain_events() {
            if matches!(event, GameEvent::HostileDefeated { .. }) {
                defeated += 1;
            }
        }
    }

    log::info!(
        "run over at {:.0}s: level {}, {} xp, {} defeated, {} hostiles left, {} weapons",
        world.time_ms / 1000.0,
        world.ledger.level(),
        world.ledger.xp_total(),
        defeated,
        world.hostiles.len(),
        world.weapons.len()
    );
    let snapshot = save::to_json(&world);
    log::info!("final save snapshot: {} bytes", snapshot.len());
}

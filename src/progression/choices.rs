//! Level-up offer generation
//!
//! Builds the 3-card choice shown when a level-up is consumed. Candidates
//! are weighted - unlocks are pushed harder while loadout slots are open -
//! and sampled without replacement from a shuffled bag. Upgrade offers
//! carry their rarity roll from generation time so the UI can show the
//! exact magnitude the pick will grant.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::catalog::rarity::RollResult;
use crate::catalog::tomes::ALL_TOMES;
use crate::catalog::weapons::ALL_WEAPONS;
use crate::catalog::{TomeId, UpgradeKey, WeaponId};
use crate::consts::MAX_TOME_SLOTS;
use crate::progression::Loadout;

/// Number of cards per level-up choice
pub const OFFER_COUNT: usize = 3;

/// One selectable card
#[derive(Debug, Clone, PartialEq)]
pub enum Offer {
    TomeUnlock(TomeId),
    TomeUpgrade { tome: TomeId, roll: RollResult },
    WeaponUnlock(WeaponId),
    WeaponUpgrade {
        weapon: WeaponId,
        key: UpgradeKey,
        roll: RollResult,
    },
}

impl Offer {
    /// Stable id used for de-duplication within one offer set
    pub fn id(&self) -> String {
        match self {
            Offer::TomeUnlock(tome) => tome.id().to_string(),
            Offer::TomeUpgrade { tome, .. } => format!("upg-{}", tome.id()),
            Offer::WeaponUnlock(weapon) => format!("w-{}", weapon.id()),
            Offer::WeaponUpgrade { weapon, key, .. } => {
                format!("wupg-{}-{}", weapon.id(), key.as_str())
            }
        }
    }

    /// Display label, including the rolled magnitude for upgrades
    pub fn label(&self) -> String {
        match self {
            Offer::TomeUnlock(tome) => tome.name().to_string(),
            Offer::TomeUpgrade { tome, roll } => {
                format!("{}+  [{} +{:.2}]", tome.name(), roll.rarity.as_str(), roll.value)
            }
            Offer::WeaponUnlock(weapon) => weapon.name().to_string(),
            Offer::WeaponUpgrade { weapon, key, roll } => format!(
                "{} {}  [{} +{:.2}]",
                weapon.name(),
                key.label(),
                roll.rarity.as_str(),
                roll.value
            ),
        }
    }
}

/// The fresh-run choice: pick the first weapon
pub fn starting_weapon_offers() -> Vec<Offer> {
    ALL_WEAPONS.into_iter().map(Offer::WeaponUnlock).collect()
}

/// Build up to [`OFFER_COUNT`] distinct offers for one consumed level-up
pub fn level_up_offers(loadout: &Loadout, rng: &mut Pcg32) -> Vec<Offer> {
    let slots_open = loadout.owned_tomes().count() < MAX_TOME_SLOTS;

    let mut weighted: Vec<(Offer, u32)> = Vec::new();

    if slots_open {
        for tome in ALL_TOMES {
            if !loadout.owns_tome(tome) {
                weighted.push((Offer::TomeUnlock(tome), 3));
            }
        }
    }
    for tome in ALL_TOMES {
        if loadout.owns_tome(tome) {
            let roll = tome.roll_upgrade(rng);
            weighted.push((Offer::TomeUpgrade { tome, roll }, 1));
        }
    }
    let unlock_weight = if slots_open { 4 } else { 2 };
    for weapon in ALL_WEAPONS {
        if !loadout.owns_weapon(weapon) {
            weighted.push((Offer::WeaponUnlock(weapon), unlock_weight));
        }
    }
    for weapon in ALL_WEAPONS {
        if loadout.owns_weapon(weapon) {
            for key in weapon.upgrade_keys() {
                let roll = key.roll(rng);
                weighted.push((
                    Offer::WeaponUpgrade {
                        weapon,
                        key: *key,
                        roll,
                    },
                    1,
                ));
            }
        }
    }

    // Shuffled weighted bag, then walk it picking distinct offers
    let mut bag: Vec<usize> = weighted
        .iter()
        .enumerate()
        .flat_map(|(idx, (_, weight))| std::iter::repeat_n(idx, (*weight).max(1) as usize))
        .collect();
    for i in (1..bag.len()).rev() {
        let j = rng.random_range(0..=i);
        bag.swap(i, j);
    }

    let mut picked_ids = Vec::new();
    let mut offers = Vec::new();
    for idx in bag {
        if offers.len() >= OFFER_COUNT {
            break;
        }
        let (offer, _) = &weighted[idx];
        let id = offer.id();
        if picked_ids.contains(&id) {
            continue;
        }
        picked_ids.push(id);
        offers.push(offer.clone());
    }
    log::debug!("level-up offers: {:?}", picked_ids);
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(21)
    }

    #[test]
    fn test_fresh_loadout_offers_only_unlocks() {
        let loadout = Loadout::default();
        let offers = level_up_offers(&loadout, &mut rng());
        assert_eq!(offers.len(), OFFER_COUNT);
        assert!(offers.iter().all(|o| matches!(
            o,
            Offer::TomeUnlock(_) | Offer::WeaponUnlock(_)
        )));
    }

    #[test]
    fn test_offers_are_distinct() {
        let mut loadout = Loadout::default();
        loadout.add_weapon(WeaponId::Aura);
        loadout.add_tome(TomeId::Damage);
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let offers = level_up_offers(&loadout, &mut rng);
            let mut ids: Vec<String> = offers.iter().map(|o| o.id()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), offers.len());
        }
    }

    #[test]
    fn test_full_tome_slots_stop_tome_unlocks() {
        let mut loadout = Loadout::default();
        for tome in [TomeId::Area, TomeId::Damage, TomeId::Projectiles, TomeId::AttackSpeed] {
            loadout.add_tome(tome);
        }
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            for offer in level_up_offers(&loadout, &mut rng) {
                assert!(!matches!(offer, Offer::TomeUnlock(_)));
            }
        }
    }

    #[test]
    fn test_owned_weapon_upgrades_use_its_keys() {
        let mut loadout = Loadout::default();
        loadout.add_weapon(WeaponId::Slam);
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            for offer in level_up_offers(&loadout, &mut rng) {
                if let Offer::WeaponUpgrade { weapon, key, .. } = offer {
                    assert_eq!(weapon, WeaponId::Slam);
                    assert!(WeaponId::Slam.upgrade_keys().contains(&key));
                }
            }
        }
    }

    #[test]
    fn test_count_type_upgrade_rolls_integer() {
        let mut loadout = Loadout::default();
        loadout.add_weapon(WeaponId::Fireball);
        for seed in 0..100 {
            let mut rng = Pcg32::seed_from_u64(seed);
            for offer in level_up_offers(&loadout, &mut rng) {
                if let Offer::WeaponUpgrade {
                    key: UpgradeKey::Projectiles,
                    roll,
                    ..
                } = offer
                {
                    assert_eq!(roll.value, 1.0);
                }
            }
        }
    }

    #[test]
    fn test_starting_offers_cover_all_weapons() {
        let offers = starting_weapon_offers();
        assert_eq!(offers.len(), ALL_WEAPONS.len());
        assert!(offers.iter().all(|o| matches!(o, Offer::WeaponUnlock(_))));
    }

    #[test]
    fn test_same_seed_same_offers() {
        let mut loadout = Loadout::default();
        loadout.add_weapon(WeaponId::Boomerang);
        loadout.add_tome(TomeId::Area);
        let a = level_up_offers(&loadout, &mut Pcg32::seed_from_u64(9));
        let b = level_up_offers(&loadout, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a, b);
    }
}

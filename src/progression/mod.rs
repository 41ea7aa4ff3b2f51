//! Progression: XP ledger, owned records, and level-up offers

pub mod choices;
pub mod ledger;
pub mod records;

pub use choices::{Offer, level_up_offers, starting_weapon_offers};
pub use ledger::ProgressionLedger;
pub use records::{Loadout, TomeRecord, WeaponRecord};

//! The stationary avatar
//!
//! Integer health with a shield that absorbs first. Damage and healing on
//! non-positive amounts are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub health_current: i32,
    pub health_max: i32,
    pub shield: i32,
    /// Collection radius for xp crystals; rescaled on stat changes
    pub pickup_radius: f32,
    pub radius: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig, base_pickup_radius: f32) -> Self {
        Self {
            health_current: config.base_health,
            health_max: config.base_health,
            shield: config.base_shield,
            pickup_radius: base_pickup_radius,
            radius: config.radius,
        }
    }

    /// Apply damage; shield absorbs before health. Returns true on death.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        let mut remaining = amount;
        if self.shield > 0 {
            let absorbed = self.shield.min(remaining);
            self.shield -= absorbed;
            remaining -= absorbed;
        }
        if remaining > 0 {
            self.health_current = (self.health_current - remaining).max(0);
        }
        self.health_current == 0
    }

    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.health_current = (self.health_current + amount).min(self.health_max);
    }

    pub fn is_dead(&self) -> bool {
        self.health_current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerConfig::default(), 50.0)
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut p = player();
        p.shield = 10;
        p.take_damage(6);
        assert_eq!(p.shield, 4);
        assert_eq!(p.health_current, 100);
        p.take_damage(10);
        assert_eq!(p.shield, 0);
        assert_eq!(p.health_current, 94);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut p = player();
        assert!(p.take_damage(1000));
        assert_eq!(p.health_current, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut p = player();
        p.take_damage(30);
        p.heal(20);
        assert_eq!(p.health_current, 90);
        p.heal(100);
        assert_eq!(p.health_current, 100);
    }

    #[test]
    fn test_non_positive_amounts_ignored() {
        let mut p = player();
        assert!(!p.take_damage(0));
        assert!(!p.take_damage(-5));
        p.heal(-5);
        assert_eq!(p.health_current, 100);
    }
}

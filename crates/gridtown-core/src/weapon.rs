//! Runtime weapon slots: ammunition and fire cooldown.

use gridtown_logic::weapons::{weapon_spec, WeaponKind};

/// One weapon slot on a pedestrian.
#[derive(Debug, Clone)]
pub struct Weapon {
    kind: WeaponKind,
    ammunition: u32,
    cooldown_left: f32,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            ammunition: 0,
            cooldown_left: 0.0,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn ammunition(&self) -> u32 {
        self.ammunition
    }

    pub fn set_ammunition(&mut self, rounds: u32) {
        self.ammunition = rounds;
    }

    pub fn update(&mut self, delta: f32) {
        self.cooldown_left = (self.cooldown_left - delta).max(0.0);
    }

    /// Fists never run dry; everything else needs rounds.
    pub fn is_out_of_ammunition(&self) -> bool {
        weapon_spec(self.kind).uses_ammo && self.ammunition == 0
    }

    pub fn is_ready_to_fire(&self) -> bool {
        self.cooldown_left <= 0.0 && !self.is_out_of_ammunition()
    }

    /// Attempt a shot. Returns whether one was fired.
    pub fn fire(&mut self) -> bool {
        if !self.is_ready_to_fire() {
            return false;
        }
        let spec = weapon_spec(self.kind);
        if spec.uses_ammo {
            self.ammunition -= 1;
        }
        self.cooldown_left = spec.fire_cooldown;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fists_fire_without_ammo() {
        let mut fists = Weapon::new(WeaponKind::Fists);
        assert!(!fists.is_out_of_ammunition());
        assert!(fists.fire());
    }

    #[test]
    fn test_empty_pistol_cannot_fire() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        assert!(pistol.is_out_of_ammunition());
        assert!(!pistol.fire());
    }

    #[test]
    fn test_fire_consumes_ammo_and_cools_down() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        pistol.set_ammunition(2);
        assert!(pistol.fire());
        assert_eq!(pistol.ammunition(), 1);
        // still cooling down
        assert!(!pistol.fire());
        pistol.update(1.0);
        assert!(pistol.fire());
        assert!(pistol.is_out_of_ammunition());
    }
}

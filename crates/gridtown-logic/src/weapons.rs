//! Weapon kinds and their static firing specs.

use serde::{Deserialize, Serialize};

/// Weapon identifiers, in inventory-slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum WeaponKind {
    Fists = 0,
    Pistol,
    Machinegun,
    Flamethrower,
    RocketLauncher,
}

/// Number of weapon slots.
pub const WEAPON_COUNT: usize = 5;

impl WeaponKind {
    pub const ALL: [Self; WEAPON_COUNT] = [
        Self::Fists,
        Self::Pistol,
        Self::Machinegun,
        Self::Flamethrower,
        Self::RocketLauncher,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Static per-weapon tuning.
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    /// Seconds between shots.
    pub fire_cooldown: f32,
    /// Whether the weapon consumes ammunition. Fists do not.
    pub uses_ammo: bool,
}

/// Static spec for a weapon kind.
pub fn weapon_spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::Fists => WeaponSpec {
            fire_cooldown: 0.5,
            uses_ammo: false,
        },
        WeaponKind::Pistol => WeaponSpec {
            fire_cooldown: 0.4,
            uses_ammo: true,
        },
        WeaponKind::Machinegun => WeaponSpec {
            fire_cooldown: 0.1,
            uses_ammo: true,
        },
        WeaponKind::Flamethrower => WeaponSpec {
            fire_cooldown: 0.1,
            uses_ammo: true,
        },
        WeaponKind::RocketLauncher => WeaponSpec {
            fire_cooldown: 1.0,
            uses_ammo: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fists_never_run_dry() {
        assert!(!weapon_spec(WeaponKind::Fists).uses_ammo);
    }

    #[test]
    fn test_all_slots_covered() {
        for (i, kind) in WeaponKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert!(weapon_spec(*kind).fire_cooldown > 0.0);
        }
    }
}

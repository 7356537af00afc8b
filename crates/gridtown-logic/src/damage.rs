//! Damage causes, death reasons, routing helpers.

use serde::{Deserialize, Serialize};

/// What kind of harm is being applied. The cause fully determines how the
/// damage router reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    Gravity,
    Electricity,
    Burning,
    Drowning,
    CarCrash,
    Explosion,
    Bullet,
    Punch,
}

/// Why a pedestrian died. Set exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathReason {
    Unknown,
    FallFromHeight,
    Electrocuted,
    Fried,
    Drowned,
    Smashed,
    BlownUp,
    Shot,
    Beaten,
}

/// Death reason recorded for a lethal outcome of the given cause.
pub fn death_reason_for(cause: DamageCause) -> DeathReason {
    match cause {
        DamageCause::Gravity => DeathReason::FallFromHeight,
        DamageCause::Electricity => DeathReason::Electrocuted,
        DamageCause::Burning => DeathReason::Fried,
        DamageCause::Drowning => DeathReason::Drowned,
        DamageCause::CarCrash => DeathReason::Smashed,
        DamageCause::Explosion => DeathReason::BlownUp,
        DamageCause::Bullet => DeathReason::Shot,
        DamageCause::Punch => DeathReason::Beaten,
    }
}

/// Whether a landing from `fall_height` meters is lethal.
pub fn fall_is_lethal(fall_height: f32, death_height: f32) -> bool {
    fall_height >= death_height
}

/// Whether a corpse gets a blood decal. Drowned and electrocuted bodies do
/// not bleed, and neither do passengers who die inside a vehicle.
pub fn death_spawns_blood(reason: DeathReason, was_car_passenger: bool) -> bool {
    !matches!(reason, DeathReason::Drowned | DeathReason::Electrocuted | DeathReason::Unknown)
        && !was_car_passenger
}

//! Damage records exchanged between producers and the behavior engine.

use hecs::Entity;

use gridtown_logic::damage::DamageCause;

/// One application of harm. The cause tag drives the routing policy; the
/// source is identity only and carries no ownership.
#[derive(Debug, Clone, Copy)]
pub struct DamageInfo {
    pub cause: DamageCause,
    /// Hit points dealt. Informational under the current always-lethal
    /// bullet policy.
    pub hit_points: i32,
    /// The object that caused the damage, when one exists.
    pub source: Option<Entity>,
    /// Fall distance in meters; only meaningful for [`DamageCause::Gravity`].
    pub fall_height: f32,
}

impl DamageInfo {
    pub fn from_punch(source: Entity) -> Self {
        Self {
            cause: DamageCause::Punch,
            hit_points: 1,
            source: Some(source),
            fall_height: 0.0,
        }
    }

    pub fn from_electricity() -> Self {
        Self {
            cause: DamageCause::Electricity,
            hit_points: 1,
            source: None,
            fall_height: 0.0,
        }
    }

    pub fn from_fall(fall_height: f32) -> Self {
        Self {
            cause: DamageCause::Gravity,
            hit_points: 0,
            source: None,
            fall_height,
        }
    }

    pub fn from_fire() -> Self {
        Self {
            cause: DamageCause::Burning,
            hit_points: 1,
            source: None,
            fall_height: 0.0,
        }
    }

    pub fn from_water() -> Self {
        Self {
            cause: DamageCause::Drowning,
            hit_points: 1,
            source: None,
            fall_height: 0.0,
        }
    }

    pub fn from_explosion(hit_points: i32, source: Option<Entity>) -> Self {
        Self {
            cause: DamageCause::Explosion,
            hit_points,
            source,
            fall_height: 0.0,
        }
    }

    pub fn from_bullet(source: Entity) -> Self {
        Self {
            cause: DamageCause::Bullet,
            hit_points: 1,
            source: Some(source),
            fall_height: 0.0,
        }
    }

    pub fn from_car_crash(car: Entity) -> Self {
        Self {
            cause: DamageCause::CarCrash,
            hit_points: 1,
            source: Some(car),
            fall_height: 0.0,
        }
    }
}

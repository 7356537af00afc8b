//! All tunable gameplay parameters in one place.
//!
//! Everything that shapes pedestrian behavior is a named field here rather
//! than an inline literal, so a scenario can override any of it and a
//! parameter file can persist the whole set as JSON.

use serde::{Deserialize, Serialize};

/// Gameplay parameters. `Default` gives the classic tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    // Pedestrians
    /// Bounding sphere radius, meters.
    pub ped_bounds_sphere_radius: f32,
    /// Turn speed, degrees per second.
    pub ped_turn_speed: f32,
    /// Turn speed while sliding on a car roof, degrees per second.
    pub ped_turn_speed_slide_on_car: f32,
    /// Slide-on-car speed, meters per second.
    pub ped_slide_on_car_speed: f32,
    /// Walk speed, meters per second.
    pub ped_walk_speed: f32,
    /// Run speed, meters per second.
    pub ped_run_speed: f32,
    /// Knocked-down duration after a punch, seconds.
    pub ped_knocked_down_time: f32,
    /// Falling distance that kills on landing, meters.
    pub ped_fall_death_height: f32,
    /// Time in water before drowning, seconds.
    pub ped_drowning_time: f32,
    /// Time a pedestrian survives while burning, seconds.
    pub ped_burn_duration: f32,
    /// Backward push when knocked down, meters per second.
    pub ped_stun_push_impulse: f32,
    /// Backward push when electrocuted, meters per second.
    pub ped_electrocute_push_impulse: f32,

    // Car crash damage
    /// Impact speed along the separation axis that kills outright, m/s.
    pub carcrash_kill_speed: f32,
    /// Impact speed above which the pedestrian is thrown into a slide, m/s.
    pub carcrash_slide_speed: f32,

    // Vehicles
    /// Maximum vehicle speed at which a passenger can still enter/exit, m/s.
    pub vehicle_speed_passenger_can_enter: f32,
    /// Heading offset applied relative to the vehicle when stepping out,
    /// degrees.
    pub vehicle_exit_heading_offset: f32,

    // Hazards
    /// Seconds of standing on live rails before taking electricity damage.
    pub railways_damage_delay: f32,

    // Explosions
    /// Radius of guaranteed-lethal explosion damage, meters.
    pub explosion_primary_damage_distance: f32,
    /// Radius of significant explosion damage, meters.
    pub explosion_secondary_damage_distance: f32,
    /// Hit points dealt inside the primary radius.
    pub explosion_primary_damage: i32,
    /// Hit points dealt inside the secondary radius.
    pub explosion_secondary_damage: i32,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            ped_bounds_sphere_radius: 0.3,
            ped_turn_speed: 260.0,
            ped_turn_speed_slide_on_car: 120.0,
            ped_slide_on_car_speed: 1.2,
            ped_walk_speed: 0.9,
            ped_run_speed: 1.8,
            ped_knocked_down_time: 3.0,
            ped_fall_death_height: 2.0,
            ped_drowning_time: 2.0,
            ped_burn_duration: 4.0,
            ped_stun_push_impulse: 0.5,
            ped_electrocute_push_impulse: 0.3,
            carcrash_kill_speed: 6.0,
            carcrash_slide_speed: 1.0,
            vehicle_speed_passenger_can_enter: 0.6,
            vehicle_exit_heading_offset: 30.0,
            railways_damage_delay: 0.5,
            explosion_primary_damage_distance: 2.0,
            explosion_secondary_damage_distance: 4.0,
            explosion_primary_damage: 100,
            explosion_secondary_damage: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let p = GameParams::default();
        assert!(p.ped_run_speed > p.ped_walk_speed);
        assert!(p.carcrash_kill_speed > p.carcrash_slide_speed);
        assert!(p.explosion_primary_damage_distance < p.explosion_secondary_damage_distance);
    }
}

//! Car-crash impact projection and outcome classification.
//!
//! A vehicle hit is measured as the component of the vehicle's velocity
//! along the pedestrian→vehicle separation axis. Above the kill threshold
//! the hit is lethal; above the slide threshold the pedestrian is thrown
//! onto the car roof instead, if there is a car to slide on; anything
//! slower is ignored.

use crate::math::Vec2;

/// What a car hit does to a pedestrian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashOutcome {
    Lethal,
    StartSliding,
    Ignored,
}

/// Magnitude of the vehicle's velocity along the ped→vehicle separation
/// axis, meters per second.
pub fn impact_speed(ped_pos: Vec2, car_pos: Vec2, car_velocity: Vec2) -> f32 {
    let normal = (ped_pos - car_pos).normalize();
    car_velocity.dot(&normal).abs()
}

/// Classify an impact speed against the configured thresholds.
///
/// `can_slide` reports whether the pedestrian currently contacts a vehicle
/// body; without it a medium hit has nothing to slide onto and is ignored.
pub fn classify_impact(speed: f32, kill_speed: f32, slide_speed: f32, can_slide: bool) -> CrashOutcome {
    if speed > kill_speed {
        return CrashOutcome::Lethal;
    }
    if speed > slide_speed && can_slide {
        return CrashOutcome::StartSliding;
    }
    CrashOutcome::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_on_impact_speed() {
        // Car at origin moving +x at 7 m/s, ped directly ahead on +x.
        let speed = impact_speed(Vec2::new(5.0, 0.0), Vec2::ZERO, Vec2::new(7.0, 0.0));
        assert!((speed - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_glancing_impact_speed() {
        // Velocity perpendicular to the separation axis contributes nothing.
        let speed = impact_speed(Vec2::new(0.0, 3.0), Vec2::ZERO, Vec2::new(7.0, 0.0));
        assert!(speed.abs() < 1e-5);
    }

    #[test]
    fn test_classify_lethal() {
        assert_eq!(classify_impact(7.0, 6.0, 1.0, false), CrashOutcome::Lethal);
    }

    #[test]
    fn test_classify_slide_needs_contact() {
        assert_eq!(classify_impact(2.0, 6.0, 1.0, true), CrashOutcome::StartSliding);
        assert_eq!(classify_impact(2.0, 6.0, 1.0, false), CrashOutcome::Ignored);
    }

    #[test]
    fn test_classify_slow_hit_ignored() {
        assert_eq!(classify_impact(0.5, 6.0, 1.0, true), CrashOutcome::Ignored);
    }
}

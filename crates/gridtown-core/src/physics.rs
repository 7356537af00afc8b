//! Physics body contracts.
//!
//! The real collision/integration work belongs to a physics backend; these
//! structs hold the state the behavior engine reads and writes through the
//! contract in the spec: position/heading, velocities, contact flags, and
//! the vehicle-local attach point used during entry/exit choreography.

use gridtown_logic::math::{Angle, Vec2, Vec3};

/// Physics state of a pedestrian.
#[derive(Debug, Clone, Default)]
pub struct PedBody {
    pub position: Vec3,
    pub heading: Angle,
    pub linear_velocity: Vec2,
    /// Degrees per second, positive clockwise.
    pub angular_velocity: f32,

    // Contact flags maintained by the physics collaborator.
    pub falling: bool,
    pub water_contact: bool,
    pub contacting_cars: u32,

    /// Vehicle-local anchor point while attached to a car.
    pub car_point_local: Vec2,
}

impl PedBody {
    pub fn new(position: Vec3, heading: Angle) -> Self {
        Self {
            position,
            heading,
            ..Default::default()
        }
    }

    pub fn set_position(&mut self, position: Vec3, heading: Angle) {
        self.position = position;
        self.heading = heading;
    }

    pub fn rotation_angle(&self) -> Angle {
        self.heading
    }

    pub fn set_rotation_angle(&mut self, heading: Angle) {
        self.heading = heading;
    }

    pub fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.linear_velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, degrees_per_second: f32) {
        self.angular_velocity = degrees_per_second;
    }

    /// Zero all motion.
    pub fn clear_forces(&mut self) {
        self.linear_velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Unit facing vector in the ground plane.
    pub fn sign_vector(&self) -> Vec2 {
        self.heading.sign_vector()
    }

    /// Ground-plane position.
    pub fn position2(&self) -> Vec2 {
        self.position.xz()
    }

    /// Advance position/heading by the current velocities.
    pub fn integrate(&mut self, delta: f32) {
        self.position.x += self.linear_velocity.x * delta;
        self.position.z += self.linear_velocity.y * delta;
        self.heading = self.heading + Angle::from_degrees(self.angular_velocity * delta);
    }
}

/// Physics state of a vehicle.
#[derive(Debug, Clone, Default)]
pub struct CarBody {
    pub position: Vec3,
    pub heading: Angle,
    pub linear_velocity: Vec2,
}

impl CarBody {
    pub fn new(position: Vec3, heading: Angle) -> Self {
        Self {
            position,
            heading,
            linear_velocity: Vec2::ZERO,
        }
    }

    pub fn rotation_angle(&self) -> Angle {
        self.heading
    }

    pub fn position2(&self) -> Vec2 {
        self.position.xz()
    }

    pub fn current_speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    pub fn integrate(&mut self, delta: f32) {
        self.position.x += self.linear_velocity.x * delta;
        self.position.z += self.linear_velocity.y * delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_moves_along_velocity() {
        let mut body = PedBody::new(Vec3::ZERO, Angle::ZERO);
        body.set_linear_velocity(Vec2::new(2.0, 0.0));
        body.integrate(0.5);
        assert!((body.position.x - 1.0).abs() < 1e-6);
        assert!(body.position.z.abs() < 1e-6);
    }

    #[test]
    fn test_clear_forces_stops_everything() {
        let mut body = PedBody::new(Vec3::ZERO, Angle::ZERO);
        body.set_linear_velocity(Vec2::new(1.0, 1.0));
        body.set_angular_velocity(90.0);
        body.clear_forces();
        assert_eq!(body.linear_velocity, Vec2::ZERO);
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_sign_vector_follows_heading() {
        let body = PedBody::new(Vec3::ZERO, Angle::from_degrees(90.0));
        let sign = body.sign_vector();
        assert!(sign.x.abs() < 1e-6 && (sign.y - 1.0).abs() < 1e-6);
    }
}

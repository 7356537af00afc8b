//! Small vector and angle types for the 2.5D world.
//!
//! Positions are `Vec3` with `y` as height; motion and headings live in the
//! ground plane (`x`/`z`), so velocities are `Vec2`.

use serde::{Deserialize, Serialize};

/// 2D ground-plane vector (x maps to world x, y to world z).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// 3D position vector, `y` up.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane projection.
    pub fn xz(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Heading angle in degrees, kept normalized to [0, 360).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Angle {
    degrees: f32,
}

impl Angle {
    pub const ZERO: Self = Self { degrees: 0.0 };

    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            degrees: degrees.rem_euclid(360.0),
        }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn radians(&self) -> f32 {
        self.degrees.to_radians()
    }

    /// Unit vector in the ground plane pointing along this heading.
    pub fn sign_vector(&self) -> Vec2 {
        Vec2::new(self.radians().cos(), self.radians().sin())
    }

    /// Rotate a ground-plane point by this angle.
    pub fn rotate(&self, point: Vec2) -> Vec2 {
        let (sin, cos) = self.radians().sin_cos();
        Vec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
    }
}

impl std::ops::Add for Angle {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::from_degrees(self.degrees + other.degrees)
    }
}

impl std::ops::Sub for Angle {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::from_degrees(self.degrees - other.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_dot_and_length() {
        let a = Vec2::new(3.0, 4.0);
        assert!((a.length() - 5.0).abs() < 1e-6);
        assert!((a.dot(&Vec2::new(1.0, 0.0)) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec2_normalize_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_angle_wraps() {
        assert!((Angle::from_degrees(-30.0).degrees() - 330.0).abs() < 1e-4);
        assert!((Angle::from_degrees(370.0).degrees() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_sign_vector_axes() {
        let east = Angle::from_degrees(0.0).sign_vector();
        assert!((east.x - 1.0).abs() < 1e-6 && east.y.abs() < 1e-6);

        let south = Angle::from_degrees(90.0).sign_vector();
        assert!(south.x.abs() < 1e-6 && (south.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = Angle::from_degrees(90.0).rotate(Vec2::new(1.0, 0.0));
        assert!(p.x.abs() < 1e-6 && (p.y - 1.0).abs() < 1e-6);
    }
}

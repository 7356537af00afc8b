//! Map ground-query capability.
//!
//! The behavior engine needs exactly one thing from the map: whether a
//! position stands on live railway ground.

use gridtown_logic::math::Vec3;

/// Ground information capability injected into the engine.
pub trait MapInfo {
    /// Whether the block under `position` is electrified railway ground.
    fn is_railway(&self, position: Vec3) -> bool;
}

/// Featureless ground — no railways anywhere.
#[derive(Debug, Default)]
pub struct FlatMap;

impl MapInfo for FlatMap {
    fn is_railway(&self, _position: Vec3) -> bool {
        false
    }
}

/// A railway corridor between two x coordinates, for tests and scenarios.
#[derive(Debug, Clone, Copy)]
pub struct RailwayStrip {
    pub min_x: f32,
    pub max_x: f32,
}

impl MapInfo for RailwayStrip {
    fn is_railway(&self, position: Vec3) -> bool {
        position.x >= self.min_x && position.x <= self.max_x
    }
}

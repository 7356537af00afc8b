//! Decorations: short-lived visual effects (blood, fire, smoke).
//!
//! A decoration may be attached to a parent object; the engine drags it
//! along the parent's transform each frame. The parent owns the decision of
//! when to create and destroy it.

use hecs::Entity;

use gridtown_logic::math::{Angle, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    FirstBlood,
    Fire,
    BigSmoke,
}

/// A passive effect object in the world.
#[derive(Debug, Clone)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub position: Vec3,
    pub heading: Angle,
    /// Parent whose transform this effect follows.
    pub attached_to: Option<Entity>,
    /// Remaining lifetime in seconds; `None` lives until despawned.
    pub life_remaining: Option<f32>,
}

impl Decoration {
    pub fn first_blood(position: Vec3) -> Self {
        Self {
            kind: DecorationKind::FirstBlood,
            position,
            heading: Angle::ZERO,
            attached_to: None,
            life_remaining: None,
        }
    }

    pub fn fire(position: Vec3, heading: Angle, parent: Entity) -> Self {
        Self {
            kind: DecorationKind::Fire,
            position,
            heading,
            attached_to: Some(parent),
            life_remaining: None,
        }
    }

    pub fn big_smoke(position: Vec3) -> Self {
        Self {
            kind: DecorationKind::BigSmoke,
            position,
            heading: Angle::ZERO,
            attached_to: None,
            life_remaining: Some(2.0),
        }
    }
}

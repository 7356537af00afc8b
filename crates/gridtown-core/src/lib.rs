//! Gridtown Core - Actor Simulation Engine
//!
//! A fixed-step simulation of pedestrians, vehicles and effects in a
//! top-down action-game world. The heart of the crate is the pedestrian
//! behavior state machine: a jump table of per-state handlers that turns
//! control input, physics contact flags and asynchronous world events into
//! animation, motion and audio outcomes.
//!
//! # Architecture
//!
//! Entity storage uses `hecs`; each game object class is a single component
//! (`Pedestrian`, `Vehicle`, `Decoration`, `Explosion`) so a running actor
//! can be lifted out of the world, updated against it, and put back —
//! which is what lets one actor synchronously inject events into another
//! (a pedestrian entering a seat evicts the previous occupant mid-handler).
//!
//! External subsystems are capability traits injected into [`engine::GameWorld`]:
//! [`audio::AudioSink`], [`map::MapInfo`], [`hooks::ControllerHooks`].
//!
//! # Example
//!
//! ```rust,no_run
//! use gridtown_core::prelude::*;
//! use gridtown_logic::math::{Angle, Vec3};
//! use gridtown_logic::params::GameParams;
//!
//! let mut world = GameWorld::new(GameParams::default());
//! let ped = world.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);
//!
//! loop {
//!     world.update(1.0 / 60.0);
//!     let _ = ped;
//! }
//! ```

pub mod anim;
pub mod audio;
pub mod config;
pub mod damage;
pub mod decoration;
pub mod engine;
pub mod explosion;
pub mod hooks;
pub mod map;
pub mod pedestrian;
pub mod physics;
pub mod states;
pub mod vehicle;
pub mod weapon;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::audio::{AudioSink, MemoryAudio, NullAudio, SoundId};
    pub use crate::damage::DamageInfo;
    pub use crate::decoration::{Decoration, DecorationKind};
    pub use crate::engine::{GameWorld, SimContext};
    pub use crate::explosion::Explosion;
    pub use crate::pedestrian::{PedKind, Pedestrian};
    pub use crate::vehicle::{CarSeat, Vehicle, VehicleClass};
    pub use gridtown_logic::control::ControlState;
    pub use gridtown_logic::damage::{DamageCause, DeathReason};
    pub use gridtown_logic::states::PedState;
    pub use gridtown_logic::weapons::WeaponKind;
}

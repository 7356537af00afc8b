//! Pure pedestrian behavior logic for Gridtown.
//!
//! This crate holds the vocabulary and the policy of the behavior engine,
//! independent of any physics backend, entity storage, or renderer. Functions
//! take plain data and return results, making them unit-testable and
//! reusable from the engine, the headless harness, and any future frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`anim`] | Animation identifiers and idle animation selection |
//! | [`control`] | Per-tick control snapshot from a human or AI source |
//! | [`crash`] | Car-crash impact projection and outcome classification |
//! | [`damage`] | Damage causes, death reasons, routing helpers |
//! | [`math`] | Small vector/angle types for the 2.5D world |
//! | [`params`] | All tunable gameplay parameters in one place |
//! | [`states`] | Behavior state identifiers and idle-state priority |
//! | [`weapons`] | Weapon kinds and their static firing specs |

pub mod anim;
pub mod control;
pub mod crash;
pub mod damage;
pub mod math;
pub mod params;
pub mod states;
pub mod weapons;

//! Animation identifiers and idle animation selection.
//!
//! The idle family (standing/walking/running) picks its animation from a
//! fixed table of state × weapon × shooting-flag. One deliberate exception:
//! fists cannot be thrown while walking, so that combination never counts as
//! shooting.

use serde::{Deserialize, Serialize};

use crate::states::PedState;
use crate::weapons::WeaponKind;

/// Pedestrian animation identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PedAnimId {
    Null,
    StandingStill,
    Walk,
    Run,
    FallShort,
    FallLong,
    LiesOnFloor,
    LiesOnFloorBones,
    Drowning,
    Electrocuted,
    EnterCar,
    ExitCar,
    EnterBike,
    ExitBike,
    SittingInCar,
    SittingOnBike,
    JumpOntoCar,
    SlideOnCar,
    DropOffCarSliding,
    PunchingWhileStanding,
    PunchingWhileRunning,
    ShootPistolWhileStanding,
    ShootPistolWhileWalking,
    ShootPistolWhileRunning,
    ShootMachinegunWhileStanding,
    ShootMachinegunWhileWalking,
    ShootMachinegunWhileRunning,
    ShootFlamethrowerWhileStanding,
    ShootFlamethrowerWhileWalking,
    ShootFlamethrowerWhileRunning,
    ShootRPGWhileStanding,
    ShootRPGWhileWalking,
    ShootRPGWhileRunning,
}

/// Loop mode for animation playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimLoop {
    /// Play once and hold the last frame.
    None,
    /// Restart from frame zero on completion.
    FromStart,
}

/// Whether the actor counts as shooting this frame.
///
/// `shoot_pressed` and `has_ammo` come from the control snapshot and the
/// active weapon; the walking-fists exception is applied here.
pub fn is_shooting(state: PedState, weapon: WeaponKind, shoot_pressed: bool, has_ammo: bool) -> bool {
    if !shoot_pressed || !has_ammo {
        return false;
    }
    // cannot walk and use fists simultaneously
    !(state == PedState::Walks && weapon == WeaponKind::Fists)
}

/// Idle animation for (state, weapon, shooting). Only meaningful for the
/// idle family; any other state falls back to standing.
pub fn idle_animation(state: PedState, weapon: WeaponKind, shooting: bool) -> PedAnimId {
    match state {
        PedState::StandingStill => {
            if shooting {
                match weapon {
                    WeaponKind::Fists => PedAnimId::PunchingWhileStanding,
                    WeaponKind::Pistol => PedAnimId::ShootPistolWhileStanding,
                    WeaponKind::Machinegun => PedAnimId::ShootMachinegunWhileStanding,
                    WeaponKind::Flamethrower => PedAnimId::ShootFlamethrowerWhileStanding,
                    WeaponKind::RocketLauncher => PedAnimId::ShootRPGWhileStanding,
                }
            } else {
                PedAnimId::StandingStill
            }
        }
        PedState::Walks => {
            if shooting {
                match weapon {
                    WeaponKind::Fists => PedAnimId::PunchingWhileRunning,
                    WeaponKind::Pistol => PedAnimId::ShootPistolWhileWalking,
                    WeaponKind::Machinegun => PedAnimId::ShootMachinegunWhileWalking,
                    WeaponKind::Flamethrower => PedAnimId::ShootFlamethrowerWhileWalking,
                    WeaponKind::RocketLauncher => PedAnimId::ShootRPGWhileWalking,
                }
            } else {
                PedAnimId::Walk
            }
        }
        PedState::Runs => {
            if shooting {
                match weapon {
                    WeaponKind::Fists => PedAnimId::PunchingWhileRunning,
                    WeaponKind::Pistol => PedAnimId::ShootPistolWhileRunning,
                    WeaponKind::Machinegun => PedAnimId::ShootMachinegunWhileRunning,
                    WeaponKind::Flamethrower => PedAnimId::ShootFlamethrowerWhileRunning,
                    WeaponKind::RocketLauncher => PedAnimId::ShootRPGWhileRunning,
                }
            } else {
                PedAnimId::Run
            }
        }
        _ => PedAnimId::StandingStill,
    }
}

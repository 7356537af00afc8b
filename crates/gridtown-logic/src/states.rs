//! Behavior state identifiers and idle-state priority.

use serde::{Deserialize, Serialize};

use crate::control::ControlState;

/// Fixed set of pedestrian behavior states.
///
/// Exactly one is current per actor at any time. `Unspecified` exists only
/// as the pre-spawn guard value and is never entered or re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum PedState {
    Unspecified = 0,
    StandingStill,
    Walks,
    Runs,
    Falling,
    EnteringCar,
    ExitingCar,
    DrivingCar,
    SlideOnCar,
    Dead,
    Stunned,
    Drowning,
    Electrocuted,
}

/// Number of states, for table sizing.
pub const PED_STATE_COUNT: usize = 13;

impl PedState {
    /// Table index for jump-table dispatch.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Standing, walking or running — the states that share idle handling.
    pub fn is_idle(self) -> bool {
        matches!(self, Self::StandingStill | Self::Walks | Self::Runs)
    }

    /// Driving includes every seat, not only the wheel.
    pub fn is_car_passenger(self) -> bool {
        self == Self::DrivingCar
    }

    /// States from which death is already inevitable.
    pub fn is_dying(self) -> bool {
        self == Self::Electrocuted
    }
}

/// Which idle sub-state the control snapshot asks for: run > walk > standing.
pub fn next_idle_state(ctl: &ControlState) -> PedState {
    if ctl.run {
        return PedState::Runs;
    }
    if ctl.walk_forward || ctl.walk_backward {
        return PedState::Walks;
    }
    PedState::StandingStill
}

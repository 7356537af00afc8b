//! The pedestrian state machine.
//!
//! Dispatch is a const jump table indexed by `PedState`: each state wires
//! four slots (enter/exit/frame/event), unneeded slots point at no-ops.
//! Handlers live in the submodules grouped by concern; the damage router
//! sits apart because every state that accepts `ReceiveDamage` funnels
//! into it.

mod damage;
mod hazard;
mod idle;
mod vehicle;

use hecs::Entity;

use gridtown_logic::damage::DeathReason;
use gridtown_logic::math::Vec2;
use gridtown_logic::states::{PedState, PED_STATE_COUNT};

use crate::damage::DamageInfo;
use crate::engine::SimContext;
use crate::pedestrian::Pedestrian;
use crate::vehicle::{CarSeat, Vehicle};

pub(crate) use damage::try_process_damage;

/// Payload delivered with a state transition or routed event.
#[derive(Debug, Clone, Copy)]
pub enum StateEvent {
    None,
    Spawn,
    WeaponChange,
    ReceiveDamage(DamageInfo),
    EnterCar { car: Entity, seat: CarSeat },
    ExitCar,
    PullOutFromCar,
    FallFromHeightStart,
    FallFromHeightEnd,
    WaterContact,
    Die(DeathReason),
}

pub(crate) type StateEnterFn = fn(&mut Pedestrian, Entity, &mut SimContext<'_>, &StateEvent);
pub(crate) type StateExitFn = fn(&mut Pedestrian, Entity, &mut SimContext<'_>);
pub(crate) type StateFrameFn = fn(&mut Pedestrian, Entity, &mut SimContext<'_>);
pub(crate) type StateEventFn = fn(&mut Pedestrian, Entity, &mut SimContext<'_>, &StateEvent) -> bool;

/// Handler slots for one state.
pub(crate) struct StateFuncs {
    pub enter: StateEnterFn,
    pub exit: StateExitFn,
    pub frame: StateFrameFn,
    pub event: StateEventFn,
}

fn noop_enter(_ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>, _event: &StateEvent) {}
fn noop_exit(_ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>) {}
fn noop_frame(_ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>) {}
fn noop_event(_ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>, _event: &StateEvent) -> bool {
    false
}

const NOOP: StateFuncs = StateFuncs {
    enter: noop_enter,
    exit: noop_exit,
    frame: noop_frame,
    event: noop_event,
};

// Indexed by `PedState` discriminant; order must match the enum.
pub(crate) const STATE_TABLE: [StateFuncs; PED_STATE_COUNT] = [
    // Unspecified
    NOOP,
    // StandingStill
    StateFuncs {
        enter: idle::enter,
        frame: idle::frame,
        event: idle::event,
        ..NOOP
    },
    // Walks
    StateFuncs {
        enter: idle::enter,
        frame: idle::frame,
        event: idle::event,
        ..NOOP
    },
    // Runs
    StateFuncs {
        enter: idle::enter,
        frame: idle::frame,
        event: idle::event,
        ..NOOP
    },
    // Falling
    StateFuncs {
        enter: hazard::falling_enter,
        exit: hazard::falling_exit,
        event: hazard::falling_event,
        ..NOOP
    },
    // EnteringCar
    StateFuncs {
        enter: vehicle::enter_car_enter,
        frame: vehicle::enter_car_frame,
        ..NOOP
    },
    // ExitingCar
    StateFuncs {
        enter: vehicle::exit_car_enter,
        exit: vehicle::exit_car_exit,
        frame: vehicle::exit_car_frame,
        ..NOOP
    },
    // DrivingCar
    StateFuncs {
        enter: vehicle::drive_car_enter,
        exit: vehicle::drive_car_exit,
        event: vehicle::drive_car_event,
        ..NOOP
    },
    // SlideOnCar
    StateFuncs {
        enter: hazard::slide_car_enter,
        frame: hazard::slide_car_frame,
        event: hazard::slide_car_event,
        ..NOOP
    },
    // Dead
    StateFuncs {
        enter: hazard::dead_enter,
        ..NOOP
    },
    // Stunned
    StateFuncs {
        enter: hazard::stunned_enter,
        frame: hazard::stunned_frame,
        event: hazard::stunned_event,
        ..NOOP
    },
    // Drowning
    StateFuncs {
        enter: hazard::drowning_enter,
        frame: hazard::drowning_frame,
        ..NOOP
    },
    // Electrocuted
    StateFuncs {
        enter: hazard::electrocuted_enter,
        frame: hazard::electrocuted_frame,
        ..NOOP
    },
];

impl Pedestrian {
    /// Transition to `next`, running the exit and enter handlers. A
    /// self-transition is a no-op.
    pub(crate) fn change_state(
        &mut self,
        entity: Entity,
        next: PedState,
        event: &StateEvent,
        sim: &mut SimContext<'_>,
    ) {
        if next == self.state {
            return;
        }
        debug_assert!(next != PedState::Unspecified, "cannot return to Unspecified");

        log::debug!("ped {:?}: {:?} -> {:?}", entity, self.state, next);

        self.state_time = 0.0;
        (STATE_TABLE[self.state.index()].exit)(self, entity, sim);
        self.state = next;
        (STATE_TABLE[self.state.index()].enter)(self, entity, sim, event);
    }

    /// Route an event to the active state. Returns whether it was consumed.
    pub(crate) fn process_event(&mut self, entity: Entity, event: &StateEvent, sim: &mut SimContext<'_>) -> bool {
        (STATE_TABLE[self.state.index()].event)(self, entity, sim, event)
    }

    /// Run the active state's per-tick handler.
    pub(crate) fn process_frame(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        (STATE_TABLE[self.state.index()].frame)(self, entity, sim)
    }

    // ── Shared handler helpers ──────────────────────────────────────────

    /// Apply turn input to angular velocity. Sliding turns slower.
    pub(crate) fn process_rotate_actions(&mut self, sim: &SimContext<'_>) {
        if self.ctl.turn_left || self.ctl.turn_right {
            let turn_speed = if self.state == PedState::SlideOnCar {
                sim.params.ped_turn_speed_slide_on_car
            } else {
                sim.params.ped_turn_speed
            };
            let sign = if self.ctl.turn_left { -1.0 } else { 1.0 };
            self.body.set_angular_velocity(turn_speed * sign);
        } else {
            self.body.set_angular_velocity(0.0);
        }
    }

    /// Apply move input to linear velocity. No input forces a stop.
    pub(crate) fn process_motion_actions(&mut self, sim: &SimContext<'_>) {
        if self.state == PedState::SlideOnCar {
            let velocity = self.body.sign_vector() * sim.params.ped_slide_on_car_speed;
            self.body.set_linear_velocity(velocity);
            return;
        }

        let mut velocity = Vec2::ZERO;
        if self.ctl.wants_move() {
            let mut direction = self.body.sign_vector();
            let speed = if self.ctl.run {
                sim.params.ped_run_speed
            } else {
                if self.ctl.walk_backward {
                    direction = -direction;
                }
                sim.params.ped_walk_speed
            };
            velocity = direction * speed;
        }
        self.body.set_linear_velocity(velocity);
    }

    /// A slide can only start while standing on a vehicle.
    pub(crate) fn can_start_slide(&self) -> bool {
        self.body.contacting_cars > 0
    }

    /// Anchor to the door of the current seat; seat itself for doorless
    /// vehicles.
    pub(crate) fn set_in_car_position_to_door(&mut self, sim: &SimContext<'_>) {
        let Some((car, seat)) = self.current_car else {
            return;
        };
        if let Ok(vehicle) = sim.world.get::<&Vehicle>(car) {
            self.body.car_point_local = match vehicle.door_index_for_seat(seat) {
                Some(door) => vehicle.door_pos_local(door),
                None => vehicle.seat_pos_local(seat),
            };
        }
    }

    /// Anchor to the current seat.
    pub(crate) fn set_in_car_position_to_seat(&mut self, sim: &SimContext<'_>) {
        let Some((car, seat)) = self.current_car else {
            return;
        };
        if let Ok(vehicle) = sim.world.get::<&Vehicle>(car) {
            self.body.car_point_local = vehicle.seat_pos_local(seat);
        }
    }
}

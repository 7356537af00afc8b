//! Handlers for the vehicle states: entry and exit choreography plus the
//! passive riding state.

use hecs::Entity;

use gridtown_logic::anim::{AnimLoop, PedAnimId};
use gridtown_logic::states::PedState;

use crate::engine::SimContext;
use crate::pedestrian::Pedestrian;
use crate::states::StateEvent;
use crate::vehicle::Vehicle;

/// Copy out the vehicle facts a handler needs, dropping the borrow.
fn car_info(sim: &SimContext<'_>, car: Entity) -> Option<(bool, bool)> {
    sim.world
        .get::<&Vehicle>(car)
        .ok()
        .map(|v| (v.class.is_bike(), v.has_hard_top()))
}

fn close_seat_door(ped: &Pedestrian, sim: &mut SimContext<'_>) {
    let Some((car, seat)) = ped.current_car() else {
        return;
    };
    if let Ok(mut vehicle) = sim.world.get::<&mut Vehicle>(car) {
        if let Some(door) = vehicle.door_index_for_seat(seat) {
            if vehicle.has_door_animation(door) && vehicle.is_door_opened(door) {
                vehicle.close_door(door);
            }
        }
    }
}

fn open_seat_door(ped: &Pedestrian, sim: &mut SimContext<'_>) {
    let Some((car, seat)) = ped.current_car() else {
        return;
    };
    if let Ok(mut vehicle) = sim.world.get::<&mut Vehicle>(car) {
        if let Some(door) = vehicle.door_index_for_seat(seat) {
            if vehicle.has_door_animation(door) {
                vehicle.open_door(door);
            }
        }
    }
}

// ── EnteringCar ─────────────────────────────────────────────────────────

pub(super) fn enter_car_enter(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) {
    let StateEvent::EnterCar { car, seat } = *event else {
        debug_assert!(false, "EnteringCar without a target");
        return;
    };

    // Evict the current occupant before claiming the seat.
    let occupant = sim
        .world
        .get::<&Vehicle>(car)
        .ok()
        .and_then(|v| v.first_passenger(seat));
    if let Some(prev) = occupant {
        sim.send_ped_event(prev, &StateEvent::PullOutFromCar);
    }

    ped.set_car_entered(entity, car, seat, sim);

    let is_bike = car_info(sim, car).map(|(bike, _)| bike).unwrap_or(false);
    let anim = if is_bike { PedAnimId::EnterBike } else { PedAnimId::EnterCar };
    ped.set_animation(anim, AnimLoop::None);

    ped.set_in_car_position_to_door(sim);
    open_seat_door(ped, sim);
}

pub(super) fn enter_car_frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    close_seat_door(ped, sim);

    if ped.anim.is_last_frame() {
        ped.set_in_car_position_to_seat(sim);
    }

    if !ped.anim.is_active() {
        ped.change_state(entity, PedState::DrivingCar, &StateEvent::None, sim);
    }
}

// ── DrivingCar ──────────────────────────────────────────────────────────

pub(super) fn drive_car_enter(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, _event: &StateEvent) {
    let Some((car, _seat)) = ped.current_car() else {
        debug_assert!(false, "DrivingCar without a vehicle");
        return;
    };
    let (is_bike, hard_top) = car_info(sim, car).unwrap_or((false, false));

    let anim = if is_bike { PedAnimId::SittingOnBike } else { PedAnimId::SittingInCar };
    ped.set_animation(anim, AnimLoop::None);

    // Hidden inside a closed cabin.
    if hard_top {
        ped.visible = false;
    }
    ped.set_in_car_position_to_seat(sim);

    sim.hooks.on_start_car_drive(entity);
}

pub(super) fn drive_car_exit(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    if let Some((car, _seat)) = ped.current_car() {
        if car_info(sim, car).map(|(_, hard_top)| hard_top).unwrap_or(false) {
            ped.visible = true;
        }
    }
    sim.hooks.on_stop_car_drive(entity);
}

pub(super) fn drive_car_event(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) -> bool {
    if let StateEvent::PullOutFromCar = event {
        ped.change_state(entity, PedState::Stunned, event, sim);
        return true;
    }
    false
}

// ── ExitingCar ──────────────────────────────────────────────────────────

pub(super) fn exit_car_enter(ped: &mut Pedestrian, _entity: Entity, sim: &mut SimContext<'_>, _event: &StateEvent) {
    let Some((car, _seat)) = ped.current_car() else {
        debug_assert!(false, "ExitingCar without a vehicle");
        return;
    };
    let is_bike = car_info(sim, car).map(|(bike, _)| bike).unwrap_or(false);

    let anim = if is_bike { PedAnimId::ExitBike } else { PedAnimId::ExitCar };
    ped.set_animation(anim, AnimLoop::None);

    open_seat_door(ped, sim);
    ped.set_in_car_position_to_door(sim);
}

pub(super) fn exit_car_frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    close_seat_door(ped, sim);

    if !ped.anim.is_active() {
        ped.change_state(entity, PedState::StandingStill, &StateEvent::None, sim);
    }
}

pub(super) fn exit_car_exit(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    let Some((car, _seat)) = ped.current_car() else {
        return;
    };

    // Step away from the door: face slightly off the car's heading.
    let car_heading = sim
        .world
        .get::<&Vehicle>(car)
        .ok()
        .map(|v| v.body.rotation_angle());
    if let Some(heading) = car_heading {
        let offset = gridtown_logic::math::Angle::from_degrees(sim.params.vehicle_exit_heading_offset);
        ped.body.set_rotation_angle(heading - offset);
    }

    ped.set_car_exited(entity, sim);
}

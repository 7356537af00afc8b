//! Handlers for the hazard states: falling, sliding over a car hood,
//! knocked down, drowning, electrocuted and the terminal Dead state.

use hecs::Entity;

use gridtown_logic::anim::{AnimLoop, PedAnimId};
use gridtown_logic::damage::{death_spawns_blood, DamageCause, DeathReason};
use gridtown_logic::states::PedState;

use crate::audio::SoundId;
use crate::decoration::Decoration;
use crate::engine::SimContext;
use crate::pedestrian::Pedestrian;
use crate::states::{try_process_damage, StateEvent};

// ── Falling ─────────────────────────────────────────────────────────────

pub(super) fn falling_enter(ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>, _event: &StateEvent) {
    ped.set_animation(PedAnimId::FallLong, AnimLoop::FromStart);
}

pub(super) fn falling_exit(ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>) {
    // force stop on touchdown
    ped.body.set_linear_velocity(gridtown_logic::math::Vec2::ZERO);
}

pub(super) fn falling_event(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) -> bool {
    match event {
        StateEvent::FallFromHeightEnd => {
            ped.change_state(entity, PedState::StandingStill, event, sim);
            true
        }
        StateEvent::WaterContact => {
            ped.change_state(entity, PedState::Drowning, event, sim);
            true
        }
        _ => false,
    }
}

// ── SlideOnCar ──────────────────────────────────────────────────────────

pub(super) fn slide_car_enter(ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>, _event: &StateEvent) {
    ped.set_animation(PedAnimId::JumpOntoCar, AnimLoop::None);
}

pub(super) fn slide_car_frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    ped.process_rotate_actions(sim);
    ped.process_motion_actions(sim);

    // Three-phase choreography: jump on, slide while a car is underneath,
    // drop off.
    match ped.current_anim() {
        PedAnimId::JumpOntoCar => {
            if !ped.anim.is_active() {
                ped.set_animation(PedAnimId::SlideOnCar, AnimLoop::FromStart);
            }
        }
        PedAnimId::SlideOnCar => {
            if !ped.can_start_slide() {
                ped.set_animation(PedAnimId::DropOffCarSliding, AnimLoop::None);
            }
        }
        PedAnimId::DropOffCarSliding => {
            if !ped.anim.is_active() {
                ped.change_state(entity, PedState::StandingStill, &StateEvent::None, sim);
            }
        }
        _ => {}
    }
}

pub(super) fn slide_car_event(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) -> bool {
    match event {
        StateEvent::FallFromHeightStart => {
            ped.change_state(entity, PedState::Falling, event, sim);
            true
        }
        StateEvent::WaterContact => {
            ped.change_state(entity, PedState::Drowning, event, sim);
            true
        }
        StateEvent::ReceiveDamage(damage) => try_process_damage(ped, entity, sim, damage),
        _ => false,
    }
}

// ── Stunned ─────────────────────────────────────────────────────────────

pub(super) fn stunned_enter(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) {
    match event {
        // Yanked out of a seat by another pedestrian.
        StateEvent::PullOutFromCar => {
            ped.set_in_car_position_to_door(sim);
            if let Some((car, _seat)) = ped.current_car() {
                let anchor = sim
                    .world
                    .get::<&crate::vehicle::Vehicle>(car)
                    .ok()
                    .map(|v| (v.world_point(ped.body.car_point_local), v.body.rotation_angle()));
                if let Some((position, heading)) = anchor {
                    ped.body.set_position(position, heading);
                }
            }
            ped.set_car_exited(entity, sim);
        }
        StateEvent::ReceiveDamage(damage) => {
            if damage.cause == DamageCause::Punch {
                sim.audio.play(SoundId::Punch, ped.body.position, false);
            }
        }
        _ => {}
    }

    ped.set_animation(PedAnimId::FallShort, AnimLoop::None);
    let push = -ped.body.sign_vector() * sim.params.ped_stun_push_impulse;
    ped.body.set_linear_velocity(push);
}

pub(super) fn stunned_frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    if !ped.anim.is_active() && ped.current_anim() == PedAnimId::FallShort {
        ped.body.clear_forces();
        ped.set_animation(PedAnimId::LiesOnFloor, AnimLoop::FromStart);
        return;
    }

    if ped.current_anim() == PedAnimId::LiesOnFloor && ped.state_time() >= sim.params.ped_knocked_down_time {
        ped.change_state(entity, PedState::StandingStill, &StateEvent::None, sim);
    }
}

pub(super) fn stunned_event(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) -> bool {
    match event {
        StateEvent::FallFromHeightStart => {
            ped.change_state(entity, PedState::Falling, event, sim);
            true
        }
        StateEvent::WaterContact => {
            ped.change_state(entity, PedState::Drowning, event, sim);
            true
        }
        StateEvent::ReceiveDamage(damage) => try_process_damage(ped, entity, sim, damage),
        _ => false,
    }
}

// ── Drowning ────────────────────────────────────────────────────────────

pub(super) fn drowning_enter(ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>, _event: &StateEvent) {
    ped.set_animation(PedAnimId::Drowning, AnimLoop::FromStart);
}

pub(super) fn drowning_frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    if ped.state_time() > sim.params.ped_drowning_time {
        // sink under the surface
        ped.body.position.y -= 2.0;
        ped.die_from_damage(entity, DamageCause::Drowning, sim);
    }
}

// ── Electrocuted ────────────────────────────────────────────────────────

pub(super) fn electrocuted_enter(ped: &mut Pedestrian, _entity: Entity, sim: &mut SimContext<'_>, _event: &StateEvent) {
    ped.set_animation(PedAnimId::FallShort, AnimLoop::None);
    ped.body.clear_forces();
    let push = -ped.body.sign_vector() * sim.params.ped_electrocute_push_impulse;
    ped.body.set_linear_velocity(push);
}

pub(super) fn electrocuted_frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    if ped.anim.is_active() {
        return;
    }
    match ped.current_anim() {
        PedAnimId::FallShort => {
            ped.body.clear_forces();
            ped.set_animation(PedAnimId::Electrocuted, AnimLoop::None);
        }
        PedAnimId::Electrocuted => {
            ped.die_from_damage(entity, DamageCause::Electricity, sim);
        }
        _ => {}
    }
}

// ── Dead ────────────────────────────────────────────────────────────────

pub(super) fn dead_enter(ped: &mut Pedestrian, _entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) {
    let StateEvent::Die(reason) = *event else {
        debug_assert!(false, "Dead without a death reason");
        return;
    };

    ped.set_dead(reason);
    ped.body.clear_forces();

    let anim = if reason == DeathReason::Electrocuted {
        PedAnimId::LiesOnFloorBones
    } else {
        PedAnimId::LiesOnFloor
    };
    ped.set_animation(anim, AnimLoop::FromStart);

    // A corpse inside a car leaves no puddle on the pavement.
    if death_spawns_blood(reason, ped.current_car().is_some()) {
        sim.world.spawn((Decoration::first_blood(ped.body.position),));
    }

    if ped.is_human_player() {
        sim.audio.play(SoundId::PlayerDies, ped.body.position, false);
    }
}

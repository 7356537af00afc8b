//! Handlers for the on-foot states: StandingStill, Walks and Runs share
//! one set of slots and differ only through the control input.

use hecs::Entity;

use gridtown_logic::anim::{idle_animation, is_shooting, AnimLoop};
use gridtown_logic::states::{next_idle_state, PedState};

use crate::engine::SimContext;
use crate::pedestrian::Pedestrian;
use crate::states::{try_process_damage, StateEvent};

fn shooting_now(ped: &Pedestrian) -> bool {
    is_shooting(
        ped.state,
        ped.current_weapon,
        ped.ctl.shoot,
        !ped.weapon().is_out_of_ammunition(),
    )
}

pub(super) fn enter(ped: &mut Pedestrian, _entity: Entity, _sim: &mut SimContext<'_>, _event: &StateEvent) {
    let shooting = shooting_now(ped);
    let anim = idle_animation(ped.state, ped.current_weapon, shooting);
    ped.set_animation(anim, AnimLoop::FromStart);
}

pub(super) fn frame(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>) {
    let shooting = shooting_now(ped);

    // Shooting poses interrupt immediately; locomotion swaps wait for the
    // current cycle to finish.
    let anim = idle_animation(ped.state, ped.current_weapon, shooting);
    if anim != ped.current_anim() && (shooting || ped.anim.is_last_frame()) {
        ped.set_animation(anim, AnimLoop::FromStart);
    }

    ped.process_rotate_actions(sim);
    ped.process_motion_actions(sim);

    if shooting {
        ped.fire_current_weapon();
    }

    // Jump while moving forward hops onto a contacting car.
    if (ped.ctl.run || ped.ctl.walk_forward) && ped.ctl.jump && ped.can_start_slide() {
        ped.change_state(entity, PedState::SlideOnCar, &StateEvent::None, sim);
        return;
    }

    let next = next_idle_state(&ped.ctl);
    if next != ped.state {
        ped.change_state(entity, next, &StateEvent::None, sim);
    }
}

pub(super) fn event(ped: &mut Pedestrian, entity: Entity, sim: &mut SimContext<'_>, event: &StateEvent) -> bool {
    match event {
        StateEvent::WeaponChange => {
            let shooting = shooting_now(ped);
            let anim = idle_animation(ped.state, ped.current_weapon, shooting);
            ped.set_animation(anim, AnimLoop::FromStart);
            true
        }
        StateEvent::ReceiveDamage(damage) => try_process_damage(ped, entity, sim, damage),
        StateEvent::FallFromHeightStart => {
            ped.change_state(entity, PedState::Falling, event, sim);
            true
        }
        StateEvent::WaterContact => {
            ped.change_state(entity, PedState::Drowning, event, sim);
            true
        }
        _ => false,
    }
}

//! The damage router. Every state that accepts `ReceiveDamage` funnels
//! into [`try_process_damage`]; the return value reports whether the
//! damage had any effect.

use hecs::Entity;

use gridtown_logic::crash::{classify_impact, impact_speed, CrashOutcome};
use gridtown_logic::damage::{fall_is_lethal, DamageCause};
use gridtown_logic::states::PedState;

use crate::damage::DamageInfo;
use crate::engine::SimContext;
use crate::pedestrian::Pedestrian;
use crate::states::StateEvent;
use crate::vehicle::Vehicle;

pub(crate) fn try_process_damage(
    ped: &mut Pedestrian,
    entity: Entity,
    sim: &mut SimContext<'_>,
    damage: &DamageInfo,
) -> bool {
    let event = StateEvent::ReceiveDamage(*damage);

    match damage.cause {
        DamageCause::Punch => {
            ped.change_state(entity, PedState::Stunned, &event, sim);
            true
        }
        DamageCause::Gravity => {
            if fall_is_lethal(damage.fall_height, sim.params.ped_fall_death_height) {
                ped.die_from_damage(entity, DamageCause::Gravity, sim);
                return true;
            }
            false
        }
        DamageCause::Electricity => {
            ped.change_state(entity, PedState::Electrocuted, &event, sim);
            true
        }
        DamageCause::Burning => {
            if ped.is_burning() {
                return false;
            }
            ped.set_burn_effect_active(entity, true, sim);
            true
        }
        DamageCause::Drowning => {
            ped.die_from_damage(entity, DamageCause::Drowning, sim);
            true
        }
        DamageCause::Explosion => {
            ped.die_from_damage(entity, DamageCause::Explosion, sim);
            true
        }
        DamageCause::Bullet => {
            // todo: hit point and armor accounting
            ped.die_from_damage(entity, DamageCause::Bullet, sim);
            true
        }
        DamageCause::CarCrash => {
            let Some(car) = damage.source else {
                return false;
            };
            let Some((car_position, car_velocity)) = sim
                .world
                .get::<&Vehicle>(car)
                .ok()
                .map(|v| (v.body.position2(), v.body.linear_velocity))
            else {
                return false;
            };

            let speed = impact_speed(ped.body.position2(), car_position, car_velocity);
            match classify_impact(
                speed,
                sim.params.carcrash_kill_speed,
                sim.params.carcrash_slide_speed,
                ped.can_start_slide(),
            ) {
                CrashOutcome::Lethal => {
                    ped.die_from_damage(entity, DamageCause::CarCrash, sim);
                    true
                }
                CrashOutcome::StartSliding => {
                    ped.change_state(entity, PedState::SlideOnCar, &event, sim);
                    true
                }
                CrashOutcome::Ignored => false,
            }
        }
    }
}

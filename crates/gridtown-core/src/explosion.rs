//! Explosions: a short animated burst that deals one pulse of lethal
//! damage at close range and one ignition pulse further out, then leaves
//! a smoke cloud behind.

use hecs::Entity;

use gridtown_logic::anim::AnimLoop;
use gridtown_logic::math::Vec3;

use crate::anim::AnimState;
use crate::audio::SoundId;
use crate::damage::DamageInfo;
use crate::engine::SimContext;

const EXPLOSION_FRAME_COUNT: u32 = 10;
const EXPLOSION_FPS: f32 = 12.0;
const SMOKE_SPAWN_FRAME: u32 = 6;

/// One explosion in the world; stored as a single `hecs` component.
#[derive(Debug)]
pub struct Explosion {
    position: Vec3,
    anim: AnimState,
    primary_damage_done: bool,
    secondary_damage_done: bool,
    smoke_spawned: bool,
}

impl Explosion {
    pub fn new(position: Vec3) -> Self {
        let mut anim = AnimState::new();
        anim.play_raw(EXPLOSION_FRAME_COUNT, EXPLOSION_FPS, AnimLoop::None);
        Self {
            position,
            anim,
            primary_damage_done: false,
            secondary_damage_done: false,
            smoke_spawned: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_damage_done(&self) -> bool {
        self.primary_damage_done && self.secondary_damage_done
    }

    /// Suppress the lethal inner pulse (chained car explosions use this).
    pub fn disable_primary_damage(&mut self) {
        self.primary_damage_done = true;
    }

    pub(crate) fn play_spawn_sound(&self, sim: &mut SimContext<'_>) {
        sim.audio.play(SoundId::HugeExplosion, self.position, false);
    }

    /// Advance one tick. Returns false once the burst has played out and
    /// the entity should despawn.
    pub(crate) fn update_frame(&mut self, entity: Entity, sim: &mut SimContext<'_>) -> bool {
        let mut actions = Vec::new();
        self.anim.advance(sim.delta, &mut actions);

        if !self.smoke_spawned && self.anim.frame_cursor() >= SMOKE_SPAWN_FRAME {
            self.smoke_spawned = true;
            sim.world
                .spawn((crate::decoration::Decoration::big_smoke(self.position),));
        }

        if !self.is_damage_done() {
            self.process_primary_damage(entity, sim);
            self.process_secondary_damage(sim);
        }

        self.anim.is_active()
    }

    fn process_primary_damage(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        if self.primary_damage_done {
            return;
        }
        self.primary_damage_done = true;

        let damage = DamageInfo::from_explosion(sim.params.explosion_primary_damage, Some(entity));
        self.damage_peds_within(sim.params.explosion_primary_damage_distance, damage, sim);
    }

    fn process_secondary_damage(&mut self, sim: &mut SimContext<'_>) {
        if self.secondary_damage_done {
            return;
        }
        self.secondary_damage_done = true;

        // The outer ring sets victims on fire instead of killing outright.
        self.damage_peds_within(
            sim.params.explosion_secondary_damage_distance,
            DamageInfo::from_fire(),
            sim,
        );
    }

    fn damage_peds_within(&self, radius: f32, damage: DamageInfo, sim: &mut SimContext<'_>) {
        let center = self.position;
        let targets: Vec<Entity> = sim
            .world
            .query::<&crate::pedestrian::Pedestrian>()
            .iter()
            .filter(|(_, ped)| ped.body.position.distance(&center) <= radius)
            .map(|(e, _)| e)
            .collect();

        for target in targets {
            sim.send_ped_event(target, &crate::states::StateEvent::ReceiveDamage(damage));
        }
    }
}

//! The simulation engine.
//!
//! `GameWorld` owns the `hecs` world, the tunables and the pluggable
//! collaborators (audio, map queries, controller hooks). Each actor class
//! is one component; per-tick updates lift an actor out of the world, run
//! it with a [`SimContext`] over everything else, and put it back. That
//! keeps cross-actor event dispatch (seat evictions, explosion damage)
//! synchronous without fighting the borrow checker.

use hecs::{Entity, World};

use gridtown_logic::math::{Angle, Vec3};
use gridtown_logic::params::GameParams;

use crate::audio::{AudioSink, NullAudio};
use crate::damage::DamageInfo;
use crate::decoration::Decoration;
use crate::explosion::Explosion;
use crate::hooks::{ControllerHooks, NullHooks};
use crate::map::{FlatMap, MapInfo};
use crate::pedestrian::{PedKind, Pedestrian};
use crate::states::StateEvent;
use crate::vehicle::{CarSeat, Vehicle};

/// Borrowed view of the world handed to actor updates and state handlers.
///
/// The actor being updated is not in `world` while its handler runs, so
/// handlers may freely query and mutate every other object.
pub struct SimContext<'a> {
    pub world: &'a mut World,
    pub params: &'a GameParams,
    pub audio: &'a mut dyn AudioSink,
    pub map: &'a dyn MapInfo,
    pub hooks: &'a mut dyn ControllerHooks,
    /// Seconds of simulated time since the world was created.
    pub game_time: f64,
    /// Length of the current tick, seconds.
    pub delta: f32,
}

impl SimContext<'_> {
    /// Deliver an event to another pedestrian, synchronously. Returns
    /// whether the event was consumed; false if the target does not exist
    /// or is itself mid-dispatch.
    pub(crate) fn send_ped_event(&mut self, target: Entity, event: &StateEvent) -> bool {
        let Ok(mut ped) = self.world.remove_one::<Pedestrian>(target) else {
            return false;
        };
        let consumed = ped.process_event(target, event, self);
        if self.world.insert_one(target, ped).is_err() {
            log::error!("ped {:?} vanished during event dispatch", target);
        }
        consumed
    }
}

/// The simulation: world state plus collaborators.
pub struct GameWorld {
    pub world: World,
    pub params: GameParams,
    game_time: f64,
    audio: Box<dyn AudioSink>,
    map: Box<dyn MapInfo>,
    hooks: Box<dyn ControllerHooks>,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(GameParams::default())
    }
}

impl GameWorld {
    pub fn new(params: GameParams) -> Self {
        Self {
            world: World::new(),
            params,
            game_time: 0.0,
            audio: Box::new(NullAudio),
            map: Box::new(FlatMap),
            hooks: Box::new(NullHooks),
        }
    }

    pub fn set_audio_sink(&mut self, audio: Box<dyn AudioSink>) {
        self.audio = audio;
    }

    pub fn set_map_info(&mut self, map: Box<dyn MapInfo>) {
        self.map = map;
    }

    pub fn set_controller_hooks(&mut self, hooks: Box<dyn ControllerHooks>) {
        self.hooks = hooks;
    }

    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    fn ctx(&mut self, delta: f32) -> SimContext<'_> {
        SimContext {
            world: &mut self.world,
            params: &self.params,
            audio: self.audio.as_mut(),
            map: self.map.as_ref(),
            hooks: self.hooks.as_mut(),
            game_time: self.game_time,
            delta,
        }
    }

    /// Lift a pedestrian out of the world and run `f` on it.
    fn dispatch_ped<R>(
        &mut self,
        entity: Entity,
        delta: f32,
        f: impl FnOnce(&mut Pedestrian, Entity, &mut SimContext<'_>) -> R,
    ) -> Option<R> {
        let mut ped = self.world.remove_one::<Pedestrian>(entity).ok()?;
        let result = {
            let mut ctx = self.ctx(delta);
            f(&mut ped, entity, &mut ctx)
        };
        if self.world.insert_one(entity, ped).is_err() {
            log::error!("ped {:?} vanished during update", entity);
        }
        Some(result)
    }

    /// Advance the whole simulation by one tick.
    pub fn update(&mut self, delta: f32) {
        self.game_time += f64::from(delta);

        // Vehicles move first so attached pedestrians follow this tick's
        // transform.
        for (_entity, vehicle) in self.world.query_mut::<&mut Vehicle>() {
            vehicle.body.integrate(delta);
        }

        let peds: Vec<Entity> = self
            .world
            .query_mut::<&Pedestrian>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in peds {
            self.dispatch_ped(entity, delta, |ped, entity, ctx| {
                ped.update_frame(entity, ctx);
            });
        }

        self.update_explosions(delta);
        self.update_decorations(delta);
    }

    fn update_explosions(&mut self, delta: f32) {
        let explosions: Vec<Entity> = self
            .world
            .query_mut::<&Explosion>()
            .into_iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in explosions {
            let Ok(mut explosion) = self.world.remove_one::<Explosion>(entity) else {
                continue;
            };
            let alive = {
                let mut ctx = self.ctx(delta);
                explosion.update_frame(entity, &mut ctx)
            };
            if alive {
                let _ = self.world.insert_one(entity, explosion);
            } else {
                let _ = self.world.despawn(entity);
            }
        }
    }

    fn update_decorations(&mut self, delta: f32) {
        let mut expired = Vec::new();
        let mut follows = Vec::new();
        for (entity, decoration) in self.world.query_mut::<&mut Decoration>() {
            if let Some(life) = decoration.life_remaining.as_mut() {
                *life -= delta;
                if *life <= 0.0 {
                    expired.push(entity);
                    continue;
                }
            }
            if let Some(parent) = decoration.attached_to {
                follows.push((entity, parent));
            }
        }

        for (entity, parent) in follows {
            let anchor = self
                .world
                .get::<&Pedestrian>(parent)
                .ok()
                .map(|ped| (ped.body.position, ped.body.heading));
            match anchor {
                Some((position, heading)) => {
                    if let Ok(mut decoration) = self.world.get::<&mut Decoration>(entity) {
                        decoration.position = position;
                        decoration.heading = heading;
                    }
                }
                // Parent is gone; the effect dies with it.
                None => expired.push(entity),
            }
        }

        for entity in expired {
            let _ = self.world.despawn(entity);
        }
    }

    // ── Spawning ────────────────────────────────────────────────────────

    pub fn spawn_pedestrian(&mut self, kind: PedKind, position: Vec3, heading: Angle) -> Entity {
        let entity = self.world.spawn(());
        let mut ped = Pedestrian::new(kind);
        {
            let mut ctx = self.ctx(0.0);
            ped.spawn(entity, position, heading, &mut ctx);
        }
        let _ = self.world.insert_one(entity, ped);
        log::info!("spawned {:?} pedestrian {:?}", kind, entity);
        entity
    }

    pub fn spawn_vehicle(&mut self, vehicle: Vehicle) -> Entity {
        let entity = self.world.spawn((vehicle,));
        log::info!("spawned vehicle {:?}", entity);
        entity
    }

    pub fn spawn_explosion(&mut self, position: Vec3) -> Entity {
        let explosion = Explosion::new(position);
        {
            let mut ctx = self.ctx(0.0);
            explosion.play_spawn_sound(&mut ctx);
        }
        let entity = self.world.spawn((explosion,));
        log::info!("spawned explosion {:?}", entity);
        entity
    }

    // ── Pedestrian commands ─────────────────────────────────────────────

    /// Deliver damage to a pedestrian. Returns whether it had any effect.
    pub fn receive_damage(&mut self, ped: Entity, damage: DamageInfo) -> bool {
        self.dispatch_ped(ped, 0.0, |ped, entity, ctx| ped.receive_damage(entity, damage, ctx))
            .unwrap_or(false)
    }

    pub fn enter_car(&mut self, ped: Entity, car: Entity, seat: CarSeat) {
        self.dispatch_ped(ped, 0.0, |ped, entity, ctx| ped.enter_car(entity, car, seat, ctx));
    }

    pub fn leave_car(&mut self, ped: Entity) {
        self.dispatch_ped(ped, 0.0, |ped, entity, ctx| ped.leave_car(entity, ctx));
    }

    pub fn put_inside_car(&mut self, ped: Entity, car: Entity, seat: CarSeat) {
        self.dispatch_ped(ped, 0.0, |ped, entity, ctx| {
            ped.put_inside_car(entity, car, seat, ctx)
        });
    }

    pub fn put_on_foot(&mut self, ped: Entity) {
        self.dispatch_ped(ped, 0.0, |ped, entity, ctx| ped.put_on_foot(entity, ctx));
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn ped(&self, entity: Entity) -> Option<hecs::Ref<'_, Pedestrian>> {
        self.world.get::<&Pedestrian>(entity).ok()
    }

    pub fn ped_mut(&mut self, entity: Entity) -> Option<hecs::RefMut<'_, Pedestrian>> {
        self.world.get::<&mut Pedestrian>(entity).ok()
    }

    pub fn vehicle(&self, entity: Entity) -> Option<hecs::Ref<'_, Vehicle>> {
        self.world.get::<&Vehicle>(entity).ok()
    }

    pub fn vehicle_mut(&mut self, entity: Entity) -> Option<hecs::RefMut<'_, Vehicle>> {
        self.world.get::<&mut Vehicle>(entity).ok()
    }
}

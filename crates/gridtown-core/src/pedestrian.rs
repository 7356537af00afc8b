//! The pedestrian actor.
//!
//! A pedestrian owns its physics body, animation channel, weapon slots and
//! behavior state machine. Per-frame order matters and mirrors the engine
//! contract: advance animation, update weapons, apply a pending weapon
//! change, accumulate state time, run hazard timers, synthesize
//! contact-flag edge events, then dispatch the active state's frame
//! handler and finally the burn-effect timer.

use hecs::Entity;
use rand::Rng;

use gridtown_logic::anim::{AnimLoop, PedAnimId};
use gridtown_logic::control::ControlState;
use gridtown_logic::damage::{death_reason_for, DamageCause, DeathReason};
use gridtown_logic::math::{Angle, Vec3};
use gridtown_logic::states::PedState;
use gridtown_logic::weapons::{WeaponKind, WEAPON_COUNT};

use crate::anim::{AnimAction, AnimState};
use crate::audio::SoundId;
use crate::damage::DamageInfo;
use crate::decoration::Decoration;
use crate::engine::SimContext;
use crate::physics::PedBody;
use crate::states::StateEvent;
use crate::vehicle::{CarSeat, Vehicle};
use crate::weapon::Weapon;

/// Number of civilian sprite remap palettes.
pub const MAX_PED_REMAPS: u32 = 16;

/// Who drives this pedestrian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedKind {
    Player,
    Civilian,
}

/// One pedestrian in the world; stored as a single `hecs` component.
#[derive(Debug)]
pub struct Pedestrian {
    pub kind: PedKind,
    pub body: PedBody,
    pub ctl: ControlState,

    pub(crate) anim: AnimState,
    pub(crate) weapons: [Weapon; WEAPON_COUNT],
    pub(crate) current_weapon: WeaponKind,
    pub(crate) change_weapon: WeaponKind,
    pub(crate) armor_hit_points: i32,

    // Behavior state machine (the controller lives in `states`).
    pub(crate) state: PedState,
    pub(crate) state_time: f32,

    pub(crate) current_car: Option<(Entity, CarSeat)>,
    pub(crate) death_reason: Option<DeathReason>,
    pub(crate) burn_effect: Option<Entity>,
    pub(crate) burn_start_time: f64,
    pub(crate) railways_timer: f32,
    pub(crate) remap_index: Option<u32>,
    pub(crate) visible: bool,

    prev_falling: bool,
    prev_water: bool,
}

impl Pedestrian {
    pub fn new(kind: PedKind) -> Self {
        Self {
            kind,
            body: PedBody::default(),
            ctl: ControlState::default(),
            anim: AnimState::new(),
            weapons: WeaponKind::ALL.map(Weapon::new),
            current_weapon: WeaponKind::Fists,
            change_weapon: WeaponKind::Fists,
            armor_hit_points: 0,
            state: PedState::Unspecified,
            state_time: 0.0,
            current_car: None,
            death_reason: None,
            burn_effect: None,
            burn_start_time: 0.0,
            railways_timer: 0.0,
            remap_index: None,
            visible: true,
            prev_falling: false,
            prev_water: false,
        }
    }

    /// Set up initial state when placed on the level. Forces idle.
    pub fn spawn(&mut self, entity: Entity, position: Vec3, heading: Angle, sim: &mut SimContext<'_>) {
        self.ctl.clear();
        self.clear_ammunition();
        self.current_weapon = WeaponKind::Fists;
        self.change_weapon = WeaponKind::Fists;
        self.body = PedBody::new(position, heading);
        self.state_time = 0.0;
        self.railways_timer = 0.0;
        self.death_reason = None;
        self.anim = AnimState::new();
        self.prev_falling = false;
        self.prev_water = false;
        self.visible = true;

        self.remap_index = match self.kind {
            PedKind::Player => None,
            PedKind::Civilian => Some(rand::thread_rng().gen_range(0..MAX_PED_REMAPS)),
        };

        self.change_state(entity, PedState::StandingStill, &StateEvent::Spawn, sim);
        self.set_car_exited(entity, sim);
        self.set_burn_effect_active(entity, false, sim);
    }

    /// Process one simulation tick.
    pub fn update_frame(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        let delta = sim.delta;

        let mut actions: Vec<(u32, AnimAction)> = Vec::new();
        self.anim.advance(delta, &mut actions);
        for (frame, action) in actions {
            self.on_anim_frame_action(frame, action, sim);
        }

        for weapon in &mut self.weapons {
            weapon.update(delta);
        }

        // Apply a pending weapon change once the active weapon allows it.
        if self.current_weapon != self.change_weapon
            && (self.weapon().is_out_of_ammunition() || self.weapon().is_ready_to_fire())
        {
            self.current_weapon = self.change_weapon;
            self.process_event(entity, &StateEvent::WeaponChange, sim);
        }

        self.state_time += delta;

        self.update_damage_from_railways(entity, sim);

        // Contact-flag edges arrive as events, like the physics listener
        // would deliver them.
        if self.body.falling && !self.prev_falling {
            self.process_event(entity, &StateEvent::FallFromHeightStart, sim);
        } else if !self.body.falling && self.prev_falling {
            self.process_event(entity, &StateEvent::FallFromHeightEnd, sim);
        }
        self.prev_falling = self.body.falling;

        if self.body.water_contact && !self.prev_water {
            self.process_event(entity, &StateEvent::WaterContact, sim);
        }
        self.prev_water = self.body.water_contact;

        self.process_frame(entity, sim);

        self.update_burn_effect(entity, sim);

        if let Some((car, _seat)) = self.current_car {
            // Ride the vehicle: world position follows the local anchor.
            let anchor = sim
                .world
                .get::<&Vehicle>(car)
                .ok()
                .map(|v| (v.world_point(self.body.car_point_local), v.body.rotation_angle()));
            if let Some((position, heading)) = anchor {
                self.body.set_position(position, heading);
            }
        } else {
            self.body.integrate(delta);
        }
    }

    /// Process damage; may be ignored depending on cause and current state.
    /// Returns false if the damage was ignored.
    pub fn receive_damage(&mut self, entity: Entity, damage: DamageInfo, sim: &mut SimContext<'_>) -> bool {
        self.process_event(entity, &StateEvent::ReceiveDamage(damage), sim)
    }

    /// Begin entering a vehicle seat, if the situation allows it.
    pub fn enter_car(&mut self, entity: Entity, car: Entity, seat: CarSeat, sim: &mut SimContext<'_>) {
        let Some((wrecked, speed)) = sim
            .world
            .get::<&Vehicle>(car)
            .ok()
            .map(|v| (v.is_wrecked(), v.body.current_speed()))
        else {
            return;
        };

        if wrecked {
            log::warn!("ped {:?}: refusing to enter wrecked vehicle {:?}", entity, car);
            return;
        }
        if speed >= sim.params.vehicle_speed_passenger_can_enter {
            return;
        }
        if self.is_burning() {
            return;
        }
        if self.state.is_idle() {
            self.change_state(entity, PedState::EnteringCar, &StateEvent::EnterCar { car, seat }, sim);
        }
    }

    /// Begin stepping out of the current vehicle.
    pub fn leave_car(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        let Some((car, _seat)) = self.current_car else {
            return;
        };
        if !self.is_car_passenger() {
            return;
        }
        let speed = sim
            .world
            .get::<&Vehicle>(car)
            .ok()
            .map(|v| v.body.current_speed())
            .unwrap_or(0.0);
        if speed >= sim.params.vehicle_speed_passenger_can_enter {
            return;
        }
        self.change_state(entity, PedState::ExitingCar, &StateEvent::ExitCar, sim);
    }

    /// Teleport into a seat, skipping the entry choreography.
    pub fn put_inside_car(&mut self, entity: Entity, car: Entity, seat: CarSeat, sim: &mut SimContext<'_>) {
        if self.current_car.map(|(c, _)| c) == Some(car) {
            return;
        }
        if self.current_car.is_some() {
            self.set_car_exited(entity, sim);
        }
        self.set_car_entered(entity, car, seat, sim);
        self.body.car_point_local = sim
            .world
            .get::<&Vehicle>(car)
            .ok()
            .map(|v| v.seat_pos_local(seat))
            .unwrap_or_default();
        if !self.is_dead() {
            self.change_state(entity, PedState::DrivingCar, &StateEvent::None, sim);
        }
    }

    /// Teleport out of the current vehicle, skipping the exit choreography.
    pub fn put_on_foot(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        if self.current_car.is_none() {
            return;
        }
        if !self.is_dead() {
            self.change_state(entity, PedState::StandingStill, &StateEvent::None, sim);
        }
        self.set_car_exited(entity, sim);
    }

    /// Bind to a vehicle seat. The actor must not already be in a vehicle.
    pub(crate) fn set_car_entered(&mut self, entity: Entity, car: Entity, seat: CarSeat, sim: &mut SimContext<'_>) {
        debug_assert!(self.current_car.is_none(), "already in a vehicle");
        self.current_car = Some((car, seat));
        self.body.clear_forces();
        if let Ok(mut vehicle) = sim.world.get::<&mut Vehicle>(car) {
            vehicle.register_passenger(entity, seat);
        }
    }

    /// Release the vehicle binding. Safe to call twice.
    pub(crate) fn set_car_exited(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        let Some((car, _seat)) = self.current_car.take() else {
            return;
        };
        if let Ok(mut vehicle) = sim.world.get::<&mut Vehicle>(car) {
            vehicle.unregister_passenger(entity);
        }
    }

    /// Record the death reason. Death is set exactly once.
    pub(crate) fn set_dead(&mut self, reason: DeathReason) {
        debug_assert!(self.death_reason.is_none(), "death reason already set");
        debug_assert!(reason != DeathReason::Unknown);
        self.death_reason = Some(reason);
    }

    /// Terminal transition into the Dead state for a lethal cause.
    pub(crate) fn die_from_damage(&mut self, entity: Entity, cause: DamageCause, sim: &mut SimContext<'_>) {
        let reason = death_reason_for(cause);
        self.change_state(entity, PedState::Dead, &StateEvent::Die(reason), sim);
    }

    /// Attach or detach the burn effect decoration.
    pub fn set_burn_effect_active(&mut self, entity: Entity, active: bool, sim: &mut SimContext<'_>) {
        if active == self.is_burning() {
            return;
        }
        if active {
            let effect = sim
                .world
                .spawn((Decoration::fire(self.body.position, self.body.heading, entity),));
            self.burn_effect = Some(effect);
            self.burn_start_time = sim.game_time;
        } else if let Some(effect) = self.burn_effect.take() {
            let _ = sim.world.despawn(effect);
        }
    }

    fn update_burn_effect(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        if self.burn_effect.is_none() {
            return;
        }
        if self.is_dead() || !self.is_on_ground() {
            return;
        }
        if sim.game_time > self.burn_start_time + f64::from(sim.params.ped_burn_duration) {
            self.die_from_damage(entity, DamageCause::Burning, sim);
        }
    }

    fn update_damage_from_railways(&mut self, entity: Entity, sim: &mut SimContext<'_>) {
        if self.is_dead() || self.state.is_dying() {
            return;
        }
        if !self.is_on_ground() {
            self.railways_timer = 0.0;
            return;
        }
        if sim.map.is_railway(self.body.position) {
            self.railways_timer += sim.delta;
            if self.railways_timer > sim.params.railways_damage_delay {
                self.receive_damage(entity, DamageInfo::from_electricity(), sim);
            }
        } else {
            self.railways_timer = 0.0;
        }
    }

    fn on_anim_frame_action(&mut self, _frame: u32, action: AnimAction, sim: &mut SimContext<'_>) {
        // Footsteps are audible only for the player character on foot.
        if action == AnimAction::Footstep && self.kind == PedKind::Player {
            let sound = match self.state {
                PedState::Runs => Some(SoundId::FootStep2),
                PedState::Walks => Some(SoundId::FootStep1),
                _ => None,
            };
            if let Some(sound) = sound {
                sim.audio.play(sound, self.body.position, false);
            }
        }
    }

    /// Switch the current animation, restarting only when the clip changes
    /// or has run out.
    pub(crate) fn set_animation(&mut self, anim: PedAnimId, loop_mode: AnimLoop) {
        if self.anim.current_anim() == anim {
            if self.anim.is_active() {
                self.anim.set_current_loop(loop_mode);
            } else {
                self.anim.restart(loop_mode);
            }
            return;
        }
        self.anim.play(anim, loop_mode);
    }

    pub(crate) fn fire_current_weapon(&mut self) -> bool {
        self.weapons[self.current_weapon.index()].fire()
    }

    // ── Weapons ─────────────────────────────────────────────────────────

    pub fn weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon.index()]
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.current_weapon.index()]
    }

    pub fn weapon_slot_mut(&mut self, kind: WeaponKind) -> &mut Weapon {
        &mut self.weapons[kind.index()]
    }

    pub fn current_weapon(&self) -> WeaponKind {
        self.current_weapon
    }

    /// Request a weapon switch; it applies on the next frame the active
    /// weapon allows it.
    pub fn request_weapon(&mut self, kind: WeaponKind) {
        self.change_weapon = kind;
    }

    pub fn clear_ammunition(&mut self) {
        for weapon in &mut self.weapons {
            weapon.set_ammunition(0);
        }
        self.armor_hit_points = 0;
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn state(&self) -> PedState {
        self.state
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn current_anim(&self) -> PedAnimId {
        self.anim.current_anim()
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn current_car(&self) -> Option<(Entity, CarSeat)> {
        self.current_car
    }

    pub fn remap_index(&self) -> Option<u32> {
        self.remap_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_human_player(&self) -> bool {
        self.kind == PedKind::Player
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn is_car_passenger(&self) -> bool {
        self.state.is_car_passenger()
    }

    pub fn is_car_driver(&self) -> bool {
        self.state == PedState::DrivingCar
            && self.current_car.map(|(_, seat)| seat == CarSeat::Driver).unwrap_or(false)
    }

    pub fn is_entering_or_exiting_car(&self) -> bool {
        matches!(self.state, PedState::EnteringCar | PedState::ExitingCar)
    }

    pub fn is_stunned(&self) -> bool {
        self.state == PedState::Stunned
    }

    pub fn is_dead(&self) -> bool {
        self.state == PedState::Dead
    }

    pub fn is_burning(&self) -> bool {
        self.burn_effect.is_some()
    }

    pub fn is_on_ground(&self) -> bool {
        !self.body.falling
    }

    pub fn is_in_water(&self) -> bool {
        self.body.water_contact
    }
}

//! End-to-end behavior tests driving the engine through whole scenarios:
//! damage outcomes, hazard sequences, vehicle entry/exit choreography and
//! the audio side effects they produce.

use gridtown_core::prelude::*;
use gridtown_core::map::RailwayStrip;
use gridtown_logic::anim::PedAnimId;
use gridtown_logic::math::{Angle, Vec3};
use gridtown_logic::params::GameParams;

const DT: f32 = 0.1;

fn world_with_audio() -> (GameWorld, MemoryAudio) {
    let audio = MemoryAudio::new();
    let mut game = GameWorld::new(GameParams::default());
    game.set_audio_sink(Box::new(audio.clone()));
    (game, audio)
}

fn run(game: &mut GameWorld, seconds: f32) {
    let ticks = (seconds / DT).round() as u32;
    for _ in 0..ticks {
        game.update(DT);
    }
}

fn decoration_count(game: &mut GameWorld, kind: DecorationKind) -> usize {
    game.world
        .query_mut::<&Decoration>()
        .into_iter()
        .filter(|(_, d)| d.kind == kind)
        .count()
}

// ── Damage outcomes ─────────────────────────────────────────────────────

#[test]
fn test_punch_knocks_down_and_recovers() {
    let (mut game, audio) = world_with_audio();
    let victim = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    let attacker = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(1.0, 0.0, 0.0), Angle::ZERO);

    assert!(game.receive_damage(victim, DamageInfo::from_punch(attacker)));
    assert_eq!(game.ped(victim).unwrap().state(), PedState::Stunned);
    assert_eq!(audio.count_of(SoundId::Punch), 1);

    // FallShort plays out, then the knocked-down timer runs.
    let knocked_down_time = game.params.ped_knocked_down_time;
    run(&mut game, knocked_down_time + 1.0);
    assert_eq!(game.ped(victim).unwrap().state(), PedState::StandingStill);
    assert!(game.ped(victim).unwrap().death_reason().is_none());
}

#[test]
fn test_bullet_is_lethal() {
    let (mut game, _audio) = world_with_audio();
    let victim = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    let shooter = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(2.0, 0.0, 0.0), Angle::ZERO);

    assert!(game.receive_damage(victim, DamageInfo::from_bullet(shooter)));
    let ped = game.ped(victim).unwrap();
    assert_eq!(ped.state(), PedState::Dead);
    assert_eq!(ped.death_reason(), Some(DeathReason::Shot));
    drop(ped);

    assert_eq!(decoration_count(&mut game, DecorationKind::FirstBlood), 1);
}

#[test]
fn test_dead_ignores_further_damage() {
    let (mut game, _audio) = world_with_audio();
    let victim = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    let shooter = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(2.0, 0.0, 0.0), Angle::ZERO);

    game.receive_damage(victim, DamageInfo::from_bullet(shooter));
    assert!(!game.receive_damage(victim, DamageInfo::from_punch(shooter)));
    assert!(!game.receive_damage(victim, DamageInfo::from_electricity()));
    // the first reason sticks
    assert_eq!(game.ped(victim).unwrap().death_reason(), Some(DeathReason::Shot));
}

#[test]
fn test_fall_height_threshold() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    // Below the death height the landing is shrugged off.
    assert!(!game.receive_damage(ped, DamageInfo::from_fall(1.9)));
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);

    // At the death height exactly, it kills.
    assert!(game.receive_damage(ped, DamageInfo::from_fall(2.0)));
    let ped = game.ped(ped).unwrap();
    assert_eq!(ped.state(), PedState::Dead);
    assert_eq!(ped.death_reason(), Some(DeathReason::FallFromHeight));
}

#[test]
fn test_electrocution_runs_to_death() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    assert!(game.receive_damage(ped, DamageInfo::from_electricity()));
    assert_eq!(game.ped(ped).unwrap().state(), PedState::Electrocuted);

    // FallShort, then the shocked pose, then death.
    run(&mut game, 2.0);
    let ped = game.ped(ped).unwrap();
    assert_eq!(ped.state(), PedState::Dead);
    assert_eq!(ped.death_reason(), Some(DeathReason::Electrocuted));
    assert_eq!(ped.current_anim(), PedAnimId::LiesOnFloorBones);
    drop(ped);

    // Electrocution leaves no blood.
    assert_eq!(decoration_count(&mut game, DecorationKind::FirstBlood), 0);
}

#[test]
fn test_burning_kills_after_duration() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    assert!(game.receive_damage(ped, DamageInfo::from_fire()));
    assert!(game.ped(ped).unwrap().is_burning());
    assert_eq!(decoration_count(&mut game, DecorationKind::Fire), 1);

    // Fire does not stack.
    assert!(!game.receive_damage(ped, DamageInfo::from_fire()));

    let burn_duration = game.params.ped_burn_duration;
    run(&mut game, burn_duration + 0.5);
    let ped = game.ped(ped).unwrap();
    assert_eq!(ped.state(), PedState::Dead);
    assert_eq!(ped.death_reason(), Some(DeathReason::Fried));
}

// ── Hazard sequences ────────────────────────────────────────────────────

#[test]
fn test_fall_start_and_landing() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    game.ped_mut(ped).unwrap().body.falling = true;
    game.update(DT);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::Falling);

    game.ped_mut(ped).unwrap().body.falling = false;
    game.update(DT);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);
}

#[test]
fn test_water_contact_drowns() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(0.0, 0.0, 5.0), Angle::ZERO);

    game.ped_mut(ped).unwrap().body.water_contact = true;
    game.update(DT);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::Drowning);

    let drowning_time = game.params.ped_drowning_time;
    run(&mut game, drowning_time + 0.5);
    let ped = game.ped(ped).unwrap();
    assert_eq!(ped.state(), PedState::Dead);
    assert_eq!(ped.death_reason(), Some(DeathReason::Drowned));
    // the body sinks under the surface
    assert!(ped.body.position.y < -1.0);
    drop(ped);

    // Drowning leaves no blood.
    assert_eq!(decoration_count(&mut game, DecorationKind::FirstBlood), 0);
}

#[test]
fn test_railway_ground_electrocutes() {
    let (mut game, _audio) = world_with_audio();
    game.set_map_info(Box::new(RailwayStrip { min_x: -1.0, max_x: 1.0 }));
    let on_rails = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    let off_rails = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(5.0, 0.0, 0.0), Angle::ZERO);

    run(&mut game, 3.0);
    assert_eq!(game.ped(on_rails).unwrap().death_reason(), Some(DeathReason::Electrocuted));
    assert!(game.ped(off_rails).unwrap().death_reason().is_none());
}

// ── Car crash ───────────────────────────────────────────────────────────

fn crash_with_speed(game: &mut GameWorld, ped: hecs::Entity, speed: f32) -> bool {
    let car = game.spawn_vehicle(Vehicle::sedan(Vec3::new(-1.0, 0.0, 0.0), Angle::ZERO));
    game.vehicle_mut(car)
        .unwrap()
        .body
        .linear_velocity
        .x = speed;
    game.receive_damage(ped, DamageInfo::from_car_crash(car))
}

#[test]
fn test_fast_car_kills() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    assert!(crash_with_speed(&mut game, ped, 7.0));
    let ped = game.ped(ped).unwrap();
    assert_eq!(ped.state(), PedState::Dead);
    assert_eq!(ped.death_reason(), Some(DeathReason::Smashed));
}

#[test]
fn test_medium_crash_starts_slide_only_on_contact() {
    let (mut game, _audio) = world_with_audio();

    // No car underneath: the shove is ignored.
    let grounded = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    assert!(!crash_with_speed(&mut game, grounded, 2.0));
    assert_eq!(game.ped(grounded).unwrap().state(), PedState::StandingStill);

    // Standing on the hood: thrown into a slide.
    let on_hood = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(0.0, 0.0, 10.0), Angle::ZERO);
    game.ped_mut(on_hood).unwrap().body.contacting_cars = 1;
    assert!(crash_with_speed(&mut game, on_hood, 2.0));
    assert_eq!(game.ped(on_hood).unwrap().state(), PedState::SlideOnCar);
}

#[test]
fn test_slow_nudge_is_ignored() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    game.ped_mut(ped).unwrap().body.contacting_cars = 1;

    assert!(!crash_with_speed(&mut game, ped, 0.5));
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);
}

#[test]
fn test_slide_choreography_plays_out() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    game.ped_mut(ped).unwrap().body.contacting_cars = 1;
    crash_with_speed(&mut game, ped, 2.0);

    assert_eq!(game.ped(ped).unwrap().current_anim(), PedAnimId::JumpOntoCar);

    // Jump-on finishes, the looping slide takes over while a car remains
    // underneath.
    run(&mut game, 1.0);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::SlideOnCar);
    assert_eq!(game.ped(ped).unwrap().current_anim(), PedAnimId::SlideOnCar);

    // The car drives away; drop off and recover.
    game.ped_mut(ped).unwrap().body.contacting_cars = 0;
    run(&mut game, 1.5);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);
}

// ── Vehicles ────────────────────────────────────────────────────────────

#[test]
fn test_enter_drive_exit_round_trip() {
    let (mut game, _audio) = world_with_audio();
    let car_heading = Angle::from_degrees(90.0);
    let car = game.spawn_vehicle(Vehicle::sedan(Vec3::new(3.0, 0.0, 0.0), car_heading));
    let ped = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    game.enter_car(ped, car, CarSeat::Driver);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::EnteringCar);

    // Entry animation plays out, then the ped sits.
    run(&mut game, 1.5);
    {
        let ped_ref = game.ped(ped).unwrap();
        assert_eq!(ped_ref.state(), PedState::DrivingCar);
        assert_eq!(ped_ref.current_car().map(|(c, _)| c), Some(car));
        // hidden inside the closed cabin
        assert!(!ped_ref.is_visible());
    }
    assert_eq!(game.vehicle(car).unwrap().first_passenger(CarSeat::Driver), Some(ped));

    game.leave_car(ped);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::ExitingCar);

    run(&mut game, 1.5);
    let ped_ref = game.ped(ped).unwrap();
    assert_eq!(ped_ref.state(), PedState::StandingStill);
    assert!(ped_ref.current_car().is_none());
    assert!(ped_ref.is_visible());
    // facing slightly off the car's heading after stepping out
    let expected = car_heading - Angle::from_degrees(game.params.vehicle_exit_heading_offset);
    assert!((ped_ref.body.heading.degrees() - expected.degrees()).abs() < 1e-3);
    drop(ped_ref);

    assert_eq!(game.vehicle(car).unwrap().passenger_count(), 0);
}

#[test]
fn test_cannot_enter_wrecked_or_moving_car() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    let wreck = game.spawn_vehicle(Vehicle::sedan(Vec3::new(1.0, 0.0, 0.0), Angle::ZERO));
    game.vehicle_mut(wreck).unwrap().set_wrecked();
    game.enter_car(ped, wreck, CarSeat::Driver);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);

    let moving = game.spawn_vehicle(Vehicle::sedan(Vec3::new(2.0, 0.0, 0.0), Angle::ZERO));
    game.vehicle_mut(moving).unwrap().body.linear_velocity.x = 5.0;
    game.enter_car(ped, moving, CarSeat::Driver);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);
}

#[test]
fn test_entering_occupied_seat_evicts_driver() {
    let (mut game, _audio) = world_with_audio();
    let car = game.spawn_vehicle(Vehicle::sedan(Vec3::new(1.0, 0.0, 0.0), Angle::ZERO));
    let owner = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    let thief = game.spawn_pedestrian(PedKind::Player, Vec3::new(0.5, 0.0, 0.0), Angle::ZERO);

    game.put_inside_car(owner, car, CarSeat::Driver);
    assert_eq!(game.ped(owner).unwrap().state(), PedState::DrivingCar);

    game.enter_car(thief, car, CarSeat::Driver);

    // The previous driver is pulled out and knocked down; the seat now
    // belongs to the thief.
    let owner_ref = game.ped(owner).unwrap();
    assert_eq!(owner_ref.state(), PedState::Stunned);
    assert!(owner_ref.current_car().is_none());
    assert!(owner_ref.is_visible());
    drop(owner_ref);

    assert_eq!(game.ped(thief).unwrap().state(), PedState::EnteringCar);
    assert_eq!(game.vehicle(car).unwrap().first_passenger(CarSeat::Driver), Some(thief));

    run(&mut game, 1.5);
    assert_eq!(game.ped(thief).unwrap().state(), PedState::DrivingCar);
}

#[test]
fn test_put_inside_and_on_foot_shortcuts() {
    let (mut game, _audio) = world_with_audio();
    let car = game.spawn_vehicle(Vehicle::motorcycle(Vec3::new(1.0, 0.0, 0.0), Angle::ZERO));
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    game.put_inside_car(ped, car, CarSeat::Driver);
    {
        let ped_ref = game.ped(ped).unwrap();
        assert_eq!(ped_ref.state(), PedState::DrivingCar);
        // no roof on a bike
        assert!(ped_ref.is_visible());
        assert_eq!(ped_ref.current_anim(), PedAnimId::SittingOnBike);
    }

    game.put_on_foot(ped);
    assert_eq!(game.ped(ped).unwrap().state(), PedState::StandingStill);
    assert!(game.ped(ped).unwrap().current_car().is_none());

    // Calling again is harmless.
    game.put_on_foot(ped);
    assert_eq!(game.vehicle(car).unwrap().passenger_count(), 0);
}

// ── On-foot locomotion and combat ───────────────────────────────────────

#[test]
fn test_walking_with_fists_does_not_punch() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    {
        let mut ped_ref = game.ped_mut(ped).unwrap();
        ped_ref.ctl.walk_forward = true;
        ped_ref.ctl.shoot = true;
    }
    run(&mut game, 1.0);

    let ped_ref = game.ped(ped).unwrap();
    assert_eq!(ped_ref.state(), PedState::Walks);
    // fists cannot be used while walking
    assert_eq!(ped_ref.current_anim(), PedAnimId::Walk);
}

#[test]
fn test_held_walk_does_not_reenter_state() {
    // The idle frame handler re-requests Walks every tick while the stick is
    // held; a same-state request must not fire exit/enter or reset the
    // state-elapsed clock.
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);

    game.ped_mut(ped).unwrap().ctl.walk_forward = true;
    run(&mut game, 1.0);

    let ped_ref = game.ped(ped).unwrap();
    assert_eq!(ped_ref.state(), PedState::Walks);
    assert!(ped_ref.state_time() > 0.8);
}

#[test]
fn test_running_with_fists_punches() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    {
        let mut ped_ref = game.ped_mut(ped).unwrap();
        ped_ref.ctl.walk_forward = true;
        ped_ref.ctl.run = true;
        ped_ref.ctl.shoot = true;
    }
    run(&mut game, 1.0);

    let ped_ref = game.ped(ped).unwrap();
    assert_eq!(ped_ref.state(), PedState::Runs);
    assert_eq!(ped_ref.current_anim(), PedAnimId::PunchingWhileRunning);
}

#[test]
fn test_player_footsteps_are_audible() {
    let (mut game, audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    {
        let mut ped_ref = game.ped_mut(ped).unwrap();
        ped_ref.ctl.walk_forward = true;
        ped_ref.ctl.run = true;
    }
    run(&mut game, 2.0);
    assert!(audio.count_of(SoundId::FootStep2) > 0);
}

#[test]
fn test_weapon_change_applies_next_frame() {
    let (mut game, _audio) = world_with_audio();
    let ped = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    {
        let mut ped_ref = game.ped_mut(ped).unwrap();
        ped_ref.weapon_slot_mut(WeaponKind::Pistol).set_ammunition(10);
        ped_ref.request_weapon(WeaponKind::Pistol);
        assert_eq!(ped_ref.current_weapon(), WeaponKind::Fists);
    }

    game.update(DT);
    assert_eq!(game.ped(ped).unwrap().current_weapon(), WeaponKind::Pistol);
}

#[test]
fn test_player_death_is_voiced() {
    let (mut game, audio) = world_with_audio();
    let player = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);
    let civilian = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(3.0, 0.0, 0.0), Angle::ZERO);

    game.receive_damage(civilian, DamageInfo::from_water());
    assert_eq!(audio.count_of(SoundId::PlayerDies), 0);

    game.receive_damage(player, DamageInfo::from_water());
    assert_eq!(audio.count_of(SoundId::PlayerDies), 1);
}

// ── Explosions ──────────────────────────────────────────────────────────

#[test]
fn test_explosion_damage_rings() {
    let (mut game, audio) = world_with_audio();
    let close = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(1.0, 0.0, 0.0), Angle::ZERO);
    let near = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(0.0, 0.0, 3.0), Angle::ZERO);
    let far = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(10.0, 0.0, 0.0), Angle::ZERO);

    game.spawn_explosion(Vec3::ZERO);
    assert_eq!(audio.count_of(SoundId::HugeExplosion), 1);

    game.update(DT);
    assert_eq!(game.ped(close).unwrap().death_reason(), Some(DeathReason::BlownUp));
    assert!(game.ped(near).unwrap().is_burning());
    assert!(game.ped(far).unwrap().death_reason().is_none());
    assert!(!game.ped(far).unwrap().is_burning());
}

#[test]
fn test_explosion_leaves_smoke_and_despawns() {
    let (mut game, _audio) = world_with_audio();
    game.spawn_explosion(Vec3::ZERO);

    run(&mut game, 1.5);
    assert_eq!(game.world.query_mut::<&Explosion>().into_iter().count(), 0);
    assert_eq!(decoration_count(&mut game, DecorationKind::BigSmoke), 1);
}

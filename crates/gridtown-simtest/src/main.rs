//! Gridtown Headless Simulation Harness
//!
//! Drives scripted pedestrian scenarios through the full engine — no
//! rendering, no real audio, no physics backend. Every scenario spawns a
//! world, feeds control input and events tick by tick, and checks the
//! observable outcomes.
//!
//! Usage:
//!   cargo run -p gridtown-simtest
//!   cargo run -p gridtown-simtest -- --verbose

use gridtown_core::map::RailwayStrip;
use gridtown_core::prelude::*;
use gridtown_logic::anim::PedAnimId;
use gridtown_logic::crash::{classify_impact, CrashOutcome};
use gridtown_logic::damage::death_reason_for;
use gridtown_logic::math::{Angle, Vec3};
use gridtown_logic::params::GameParams;

const DT: f32 = 1.0 / 30.0;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Gridtown Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Parameter table sanity and persistence
    results.extend(validate_params(verbose));

    // 2. Pure logic sweep
    results.extend(validate_crash_logic(verbose));

    // 3. Commute scenario: walk, enter car, drive off, step out
    results.extend(scenario_commute(verbose));

    // 4. Carjacking scenario
    results.extend(scenario_carjacking(verbose));

    // 5. Hazard gauntlet: rails, water, explosion
    results.extend(scenario_hazards(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn run(game: &mut GameWorld, seconds: f32) {
    let ticks = (seconds / DT).round() as u32;
    for _ in 0..ticks {
        game.update(DT);
    }
}

// ── 1. Parameters ───────────────────────────────────────────────────────

fn validate_params(_verbose: bool) -> Vec<TestResult> {
    println!("--- Parameters ---");
    let mut results = Vec::new();

    let params = GameParams::default();
    results.push(TestResult {
        name: "params_speed_ordering".into(),
        passed: params.ped_walk_speed < params.ped_run_speed
            && params.carcrash_slide_speed < params.carcrash_kill_speed,
        detail: format!(
            "walk={} run={} slide={} kill={}",
            params.ped_walk_speed,
            params.ped_run_speed,
            params.carcrash_slide_speed,
            params.carcrash_kill_speed
        ),
    });

    // A sparse parameter file merges over the defaults.
    let sparse = r#"{ "ped_run_speed": 2.5 }"#;
    let loaded = gridtown_core::config::load_params(sparse.as_bytes());
    let merged = match loaded {
        Ok(p) => p.ped_run_speed == 2.5 && p.ped_walk_speed == params.ped_walk_speed,
        Err(_) => false,
    };
    results.push(TestResult {
        name: "params_sparse_file".into(),
        passed: merged,
        detail: "missing fields fall back to defaults".into(),
    });

    let mut buffer = Vec::new();
    let roundtrip = gridtown_core::config::save_params(&mut buffer, &params).is_ok()
        && serde_json::from_slice::<GameParams>(&buffer).is_ok();
    results.push(TestResult {
        name: "params_json_roundtrip".into(),
        passed: roundtrip,
        detail: format!("{} bytes of JSON", buffer.len()),
    });

    results
}

// ── 2. Crash logic sweep ────────────────────────────────────────────────

fn validate_crash_logic(verbose: bool) -> Vec<TestResult> {
    println!("--- Crash Logic ---");
    let mut results = Vec::new();

    let params = GameParams::default();
    let cases = [
        (7.0, true, CrashOutcome::Lethal),
        (7.0, false, CrashOutcome::Lethal),
        (2.0, true, CrashOutcome::StartSliding),
        (2.0, false, CrashOutcome::Ignored),
        (0.5, true, CrashOutcome::Ignored),
        (0.5, false, CrashOutcome::Ignored),
    ];
    let mut all_match = true;
    for (speed, contact, expected) in cases {
        let outcome = classify_impact(
            speed,
            params.carcrash_kill_speed,
            params.carcrash_slide_speed,
            contact,
        );
        if outcome != expected {
            all_match = false;
        }
        if verbose {
            println!("  impact {speed} m/s contact={contact} -> {outcome:?}");
        }
    }
    results.push(TestResult {
        name: "crash_classification_sweep".into(),
        passed: all_match,
        detail: format!("{} speed/contact cases", cases.len()),
    });

    let reasons_distinct = death_reason_for(DamageCause::Electricity)
        != death_reason_for(DamageCause::Drowning)
        && death_reason_for(DamageCause::CarCrash) != death_reason_for(DamageCause::Explosion);
    results.push(TestResult {
        name: "crash_death_reasons".into(),
        passed: reasons_distinct,
        detail: "each cause maps to its own reason".into(),
    });

    results
}

// ── 3. Commute scenario ─────────────────────────────────────────────────

fn scenario_commute(verbose: bool) -> Vec<TestResult> {
    println!("--- Commute Scenario ---");
    let mut results = Vec::new();

    let audio = MemoryAudio::new();
    let mut game = GameWorld::new(GameParams::default());
    game.set_audio_sink(Box::new(audio.clone()));

    let car = game.spawn_vehicle(Vehicle::sedan(Vec3::new(5.0, 0.0, 0.0), Angle::ZERO));
    let ped = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    // Walk east for a while.
    if let Some(mut p) = game.ped_mut(ped) {
        p.ctl.walk_forward = true;
        p.ctl.run = true;
    }
    run(&mut game, 2.0);

    let moved = game.ped(ped).map(|p| p.body.position.x).unwrap_or(0.0);
    results.push(TestResult {
        name: "commute_run_moves".into(),
        passed: moved > 2.0,
        detail: format!("ran {:.2} m in 2 s", moved),
    });
    results.push(TestResult {
        name: "commute_footsteps".into(),
        passed: audio.count_of(SoundId::FootStep2) > 0,
        detail: format!("{} running footsteps heard", audio.count_of(SoundId::FootStep2)),
    });

    // Stop and get in.
    if let Some(mut p) = game.ped_mut(ped) {
        p.ctl.clear();
    }
    run(&mut game, 0.5);
    game.enter_car(ped, car, CarSeat::Driver);
    run(&mut game, 2.0);

    let driving = game.ped(ped).map(|p| p.state() == PedState::DrivingCar).unwrap_or(false);
    let hidden = game.ped(ped).map(|p| !p.is_visible()).unwrap_or(false);
    results.push(TestResult {
        name: "commute_enters_car".into(),
        passed: driving && hidden,
        detail: format!("driving={} hidden_in_cabin={}", driving, hidden),
    });

    // Drive east, then stop and step out.
    if let Some(mut v) = game.vehicle_mut(car) {
        v.body.linear_velocity.x = 8.0;
    }
    run(&mut game, 2.0);
    let rode_along = game
        .ped(ped)
        .map(|p| p.body.position.x > 10.0)
        .unwrap_or(false);
    results.push(TestResult {
        name: "commute_rides_along".into(),
        passed: rode_along,
        detail: "pedestrian follows the car transform".into(),
    });

    if let Some(mut v) = game.vehicle_mut(car) {
        v.body.linear_velocity.x = 0.0;
    }
    game.leave_car(ped);
    run(&mut game, 2.0);

    let on_foot = game
        .ped(ped)
        .map(|p| p.state() == PedState::StandingStill && p.current_car().is_none())
        .unwrap_or(false);
    let seat_empty = game
        .vehicle(car)
        .map(|v| v.passenger_count() == 0)
        .unwrap_or(false);
    results.push(TestResult {
        name: "commute_steps_out".into(),
        passed: on_foot && seat_empty,
        detail: format!("on_foot={} seat_empty={}", on_foot, seat_empty),
    });

    if verbose {
        println!("  sounds played: {:?}", audio.played().len());
    }

    results
}

// ── 4. Carjacking scenario ──────────────────────────────────────────────

fn scenario_carjacking(_verbose: bool) -> Vec<TestResult> {
    println!("--- Carjacking Scenario ---");
    let mut results = Vec::new();

    let mut game = GameWorld::new(GameParams::default());
    let car = game.spawn_vehicle(Vehicle::sedan(Vec3::new(2.0, 0.0, 0.0), Angle::ZERO));
    let owner = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(1.0, 0.0, 0.0), Angle::ZERO);
    let thief = game.spawn_pedestrian(PedKind::Player, Vec3::ZERO, Angle::ZERO);

    game.put_inside_car(owner, car, CarSeat::Driver);
    game.enter_car(thief, car, CarSeat::Driver);

    let owner_out = game
        .ped(owner)
        .map(|p| p.state() == PedState::Stunned && p.current_car().is_none())
        .unwrap_or(false);
    results.push(TestResult {
        name: "carjack_owner_evicted".into(),
        passed: owner_out,
        detail: "previous driver pulled out and knocked down".into(),
    });

    run(&mut game, 1.5);
    let thief_drives = game
        .ped(thief)
        .map(|p| p.state() == PedState::DrivingCar)
        .unwrap_or(false);
    let seat_owner = game.vehicle(car).and_then(|v| v.first_passenger(CarSeat::Driver));
    results.push(TestResult {
        name: "carjack_thief_drives".into(),
        passed: thief_drives && seat_owner == Some(thief),
        detail: format!("thief_drives={} seat_taken={}", thief_drives, seat_owner == Some(thief)),
    });

    // The owner eventually gets back up.
    run(&mut game, 4.0);
    let owner_recovered = game
        .ped(owner)
        .map(|p| p.state() == PedState::StandingStill && p.death_reason().is_none())
        .unwrap_or(false);
    results.push(TestResult {
        name: "carjack_owner_recovers".into(),
        passed: owner_recovered,
        detail: "knocked-down timer expires".into(),
    });

    results
}

// ── 5. Hazard gauntlet ──────────────────────────────────────────────────

fn scenario_hazards(_verbose: bool) -> Vec<TestResult> {
    println!("--- Hazard Gauntlet ---");
    let mut results = Vec::new();

    // Railway corridor.
    let mut game = GameWorld::new(GameParams::default());
    game.set_map_info(Box::new(RailwayStrip { min_x: -1.0, max_x: 1.0 }));
    let on_rails = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    run(&mut game, 3.0);
    let fried_on_rails = game
        .ped(on_rails)
        .map(|p| p.death_reason() == Some(DeathReason::Electrocuted))
        .unwrap_or(false);
    results.push(TestResult {
        name: "hazard_railway".into(),
        passed: fried_on_rails,
        detail: "standing on live rails electrocutes".into(),
    });

    // Deep water.
    let mut game = GameWorld::new(GameParams::default());
    let swimmer = game.spawn_pedestrian(PedKind::Civilian, Vec3::ZERO, Angle::ZERO);
    if let Some(mut p) = game.ped_mut(swimmer) {
        p.body.water_contact = true;
    }
    run(&mut game, 3.0);
    let drowned = game
        .ped(swimmer)
        .map(|p| p.death_reason() == Some(DeathReason::Drowned))
        .unwrap_or(false);
    results.push(TestResult {
        name: "hazard_water".into(),
        passed: drowned,
        detail: "water contact ends in drowning".into(),
    });

    // Explosion rings.
    let mut game = GameWorld::new(GameParams::default());
    let close = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(1.0, 0.0, 0.0), Angle::ZERO);
    let near = game.spawn_pedestrian(PedKind::Civilian, Vec3::new(3.0, 0.0, 0.0), Angle::ZERO);
    game.spawn_explosion(Vec3::ZERO);
    game.update(DT);

    let close_dead = game
        .ped(close)
        .map(|p| p.death_reason() == Some(DeathReason::BlownUp))
        .unwrap_or(false);
    let near_burning = game.ped(near).map(|p| p.is_burning()).unwrap_or(false);
    results.push(TestResult {
        name: "hazard_explosion_rings".into(),
        passed: close_dead && near_burning,
        detail: format!("inner_lethal={} outer_ignites={}", close_dead, near_burning),
    });

    // The corpse wears the right pose.
    let lies = game
        .ped(close)
        .map(|p| p.current_anim() == PedAnimId::LiesOnFloor)
        .unwrap_or(false);
    results.push(TestResult {
        name: "hazard_corpse_pose".into(),
        passed: lies,
        detail: "blown-up corpse lies on the floor".into(),
    });

    results
}

//! Headless skirmish runner
//!
//! Runs the deterministic simulation for a fixed number of ticks and prints a
//! summary. Usage:
//!
//! ```text
//! skirmish [config.json] [ticks]
//! ```
//!
//! With no arguments the default scenario runs for 600 ticks (10 seconds at
//! 60 Hz): two friendlies, two enemies and two obstacles. Per-tick events are
//! reported through the `log` facade (`RUST_LOG=debug` for behavior changes).

use glam::Vec2;

use skirmish::consts::SIM_DT;
use skirmish::sim::{Obstacle, SkirmishEvent, SkirmishState, Team, TickInput, tick};
use skirmish::{ConfigError, SimConfig};

const DEFAULT_TICKS: u64 = 600;

fn parse_args() -> Result<(SimConfig, u64), String> {
    let mut config = None;
    let mut ticks = DEFAULT_TICKS;
    for arg in std::env::args().skip(1) {
        if let Ok(n) = arg.parse::<u64>() {
            ticks = n;
        } else {
            let src = std::fs::read_to_string(&arg)
                .map_err(|e| format!("failed to read {arg}: {e}"))?;
            let parsed = SimConfig::from_json(&src).map_err(|e| format!("{arg}: {e}"))?;
            config = Some(parsed);
        }
    }
    Ok((config.unwrap_or_default(), ticks))
}

fn build_scenario(config: SimConfig) -> Result<SkirmishState, ConfigError> {
    let mut state = SkirmishState::new(config)?;

    state.spawn_unit(Team::Friendly, Vec2::new(100.0, 100.0));
    state.spawn_unit(Team::Friendly, Vec2::new(150.0, 150.0));
    state.spawn_unit(Team::Enemy, Vec2::new(700.0, 500.0));
    state.spawn_unit(Team::Enemy, Vec2::new(650.0, 450.0));

    state
        .obstacles
        .push(Obstacle::new(Vec2::new(300.0, 200.0), Vec2::new(200.0, 50.0)));
    state
        .obstacles
        .push(Obstacle::new(Vec2::new(500.0, 400.0), Vec2::new(50.0, 200.0)));

    Ok(state)
}

fn report(event: &SkirmishEvent) {
    match event {
        SkirmishEvent::UnitSpawned { id, team } => log::info!("unit {id} ({team:?}) spawned"),
        SkirmishEvent::ProjectileFired { shooter, team } => {
            log::debug!("unit {shooter} ({team:?}) fired");
        }
        SkirmishEvent::UnitKilled { id, team } => log::info!("unit {id} ({team:?}) killed"),
    }
}

fn run() -> Result<(), String> {
    let (config, ticks) = parse_args()?;
    let mut state = build_scenario(config).map_err(|e| e.to_string())?;
    log::info!(
        "running {} ticks on a {}x{} influence grid",
        ticks,
        state.field.cols(),
        state.field.rows()
    );

    let input = TickInput::default();
    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            report(&event);
        }
    }

    println!(
        "after {} ticks: {} friendly, {} enemy alive, {} projectiles in flight",
        state.time_ticks,
        state.live_count(Team::Friendly),
        state.live_count(Team::Enemy),
        state.projectiles.len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(message) = run() {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

//! Void Drift - headless native driver
//!
//! Runs the simulation thread with a scripted pilot on a second thread,
//! logging the HUD once per simulated second. Set `RUST_LOG=debug` to see
//! lifecycle and sound cues.

use std::thread;
use std::time::Duration;

use void_drift::audio::{AudioManager, LogBackend};
use void_drift::consts::{ANIMATION_DELAY_MS, FRAMES_PER_SECOND};
use void_drift::settings::SETTINGS_FILE;
use void_drift::sim::{
    Command, Controller, FrameSink, Runner, Snapshot, TickSummary, TurnState, World,
    command_channel,
};
use void_drift::{Error, Settings};

/// Logs the HUD every second of simulated time
struct HudLogger {
    show_frame_counter: bool,
}

impl FrameSink for HudLogger {
    fn on_frame(&mut self, world: &World, summary: &TickSummary) {
        if summary.level_changed {
            log::info!("Entered {} universe", world.universe.name());
        }
        if world.frame % FRAMES_PER_SECOND != 0 {
            return;
        }

        let snapshot = Snapshot::capture(world);
        let hud = &snapshot.telemetry;
        match serde_json::to_string(hud) {
            Ok(json) if self.show_frame_counter => log::info!("{}", json),
            Ok(_) => log::info!("{}  {}", hud.level_text(), hud.score_text()),
            Err(e) => log::warn!("Failed to serialize telemetry: {}", e),
        }
        for line in &hud.status_lines {
            log::debug!("  {}", line);
        }
    }
}

/// Scripted stand-in for keyboard input
fn fly(controller: &Controller, ticks: u64) {
    let interval = Duration::from_millis(ANIMATION_DELAY_MS);
    for t in 0..ticks {
        let command = match t % 50 {
            0 => Some(Command::Turn(TurnState::Left)),
            6 => Some(Command::Turn(TurnState::Idle)),
            10 => Some(Command::Thrust(true)),
            16 => Some(Command::Thrust(false)),
            20 | 24 | 28 | 32 => Some(Command::Fire),
            40 => Some(Command::FireNuke),
            45 => Some(Command::Restart),
            _ => None,
        };
        if let Some(command) = command {
            controller.send(command);
        }
        thread::sleep(interval);
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();
    log::info!("Void Drift (headless) starting...");

    let settings = Settings::load(SETTINGS_FILE)?;
    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut world = World::new(seed);
    world.radar = settings.radar_on_start;

    let (controller, commands) = command_channel();
    if settings.theme_music {
        controller.send(Command::ToggleMusic);
    }

    let audio = AudioManager::from_settings(LogBackend, &settings);
    let hud = HudLogger {
        show_frame_counter: settings.show_frame_counter,
    };
    let sim = Runner::new(world, commands, audio, hud).spawn()?;

    let pilot = controller.clone();
    let ticks = settings.demo_seconds * FRAMES_PER_SECOND;
    let input = thread::Builder::new()
        .name("input".to_string())
        .spawn(move || fly(&pilot, ticks))?;
    input.join().map_err(|_| Error::ThreadPanicked)?;

    controller.send(Command::Quit);
    drop(controller);

    let world = sim.join()?;
    log::info!(
        "Finished after {} frames: level {}, score {}, lives {}",
        world.frame,
        world.level,
        world.score,
        world.lives
    );
    Ok(())
}

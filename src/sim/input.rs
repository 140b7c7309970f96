//! Discrete player commands
//!
//! Every command becomes either a direct field change on the world or a
//! request on the mutation queue. Nothing else derives from input.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::events::{EventSink, GameEvent};
use super::ship::TurnState;
use super::state::World;
use crate::consts::*;
use crate::heading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Turn(TurnState),
    Thrust(bool),
    /// Fire a bullet
    Fire,
    /// Fire the nuke (only deploys while the meter is charged)
    FireNuke,
    TogglePause,
    ToggleRadar,
    ToggleMusic,
    /// Start over; only honoured once the game is over
    Restart,
    /// Stop the simulation loop
    Quit,
}

/// Apply one command to the world
pub fn apply_command(world: &mut World, command: Command, sink: &mut impl EventSink) {
    let active = !world.paused && !world.is_game_over();

    match command {
        Command::Turn(state) => {
            if let Some(ship) = world.ship_mut().ship_state_mut() {
                ship.turn_state = state;
            }
        }
        Command::Thrust(on) => {
            let Some(ship) = world.ship_mut().ship_state_mut() else {
                return;
            };
            if ship.thrusting == on {
                return;
            }
            ship.thrusting = on;
            sink.on_event(if on {
                &GameEvent::ThrustStarted
            } else {
                &GameEvent::ThrustStopped
            });
        }
        Command::Fire if active => {
            let bullet = Entity::bullet(world.queue().next_id(), world.ship());
            world.queue().add(bullet);
            // Recoil
            let ship = world.ship_mut();
            ship.velocity -= heading(ship.orientation) * BULLET_FIRE_POWER / BULLET_KICK_BACK_DIVISOR;
        }
        Command::FireNuke if active => {
            let nuke = Entity::nuke(world.queue().next_id(), world.ship());
            world.queue().add(nuke);
        }
        Command::Fire | Command::FireNuke => {
            log::trace!("Ignoring {:?} while inactive", command);
        }
        Command::TogglePause => {
            world.paused = !world.paused;
            log::info!("{}", if world.paused { "Paused" } else { "Resumed" });
            sink.on_event(if world.paused {
                &GameEvent::Paused
            } else {
                &GameEvent::Resumed
            });
        }
        Command::ToggleRadar => world.radar = !world.radar,
        Command::ToggleMusic => {
            world.theme_music = !world.theme_music;
            sink.on_event(if world.theme_music {
                &GameEvent::MusicStarted
            } else {
                &GameEvent::MusicStopped
            });
        }
        Command::Restart => {
            if world.is_game_over() {
                let was_thrusting = world.ship_state().thrusting;
                world.init_game();
                // The fresh ship starts idle; close the thruster loop it dropped
                if was_thrusting {
                    sink.on_event(&GameEvent::ThrustStopped);
                }
            } else {
                log::debug!("Restart ignored while the game is running");
            }
        }
        Command::Quit => log::info!("Quit requested"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityKind, Projectile};
    use crate::sim::events::EventLog;
    use crate::sim::queue::GameOp;
    use glam::DVec2;

    fn world() -> World {
        let mut world = World::new(21);
        world.process_ops(&mut EventLog::new());
        world
    }

    #[test]
    fn test_fire_enqueues_bullet_and_recoils() {
        let mut world = world();
        world.ship_mut().orientation = 0;
        world.ship_mut().velocity = DVec2::ZERO;

        apply_command(&mut world, Command::Fire, &mut EventLog::new());
        let ops = world.queue().drain_all();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], GameOp::Add(e) if e.kind == EntityKind::Projectile(Projectile::Bullet)));
        assert!((world.ship().velocity.x + 35.0 / 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_fire_ignored_while_paused() {
        let mut world = world();
        apply_command(&mut world, Command::TogglePause, &mut EventLog::new());
        apply_command(&mut world, Command::Fire, &mut EventLog::new());
        apply_command(&mut world, Command::FireNuke, &mut EventLog::new());
        assert!(world.queue().is_empty());
    }

    #[test]
    fn test_thrust_events_on_change_only() {
        let mut world = world();
        let mut log = EventLog::new();
        apply_command(&mut world, Command::Thrust(true), &mut log);
        apply_command(&mut world, Command::Thrust(true), &mut log);
        apply_command(&mut world, Command::Thrust(false), &mut log);
        assert_eq!(log.events, vec![GameEvent::ThrustStarted, GameEvent::ThrustStopped]);
    }

    #[test]
    fn test_turn_sets_state() {
        let mut world = world();
        apply_command(&mut world, Command::Turn(TurnState::Left), &mut EventLog::new());
        assert_eq!(world.ship_state().turn_state, TurnState::Left);
    }

    #[test]
    fn test_toggles() {
        let mut world = world();
        let mut log = EventLog::new();
        apply_command(&mut world, Command::ToggleRadar, &mut log);
        assert!(world.radar);
        apply_command(&mut world, Command::ToggleMusic, &mut log);
        apply_command(&mut world, Command::ToggleMusic, &mut log);
        assert!(!world.theme_music);
        assert_eq!(log.events, vec![GameEvent::MusicStarted, GameEvent::MusicStopped]);
    }

    #[test]
    fn test_restart_only_when_game_over() {
        let mut world = world();
        world.score = 99;
        apply_command(&mut world, Command::Restart, &mut EventLog::new());
        assert_eq!(world.score, 99);

        world.lives = 0;
        apply_command(&mut world, Command::Restart, &mut EventLog::new());
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, STARTING_LIVES);
    }

    #[test]
    fn test_restart_while_thrusting_stops_thruster() {
        let mut world = world();
        let mut log = EventLog::new();
        apply_command(&mut world, Command::Thrust(true), &mut log);
        world.lives = 0;
        apply_command(&mut world, Command::Restart, &mut log);
        assert!(!world.ship_state().thrusting);

        // Releasing the key afterwards is a no-op, not a second stop
        apply_command(&mut world, Command::Thrust(false), &mut log);
        assert_eq!(log.count(|e| *e == GameEvent::ThrustStarted), 1);
        assert_eq!(log.count(|e| *e == GameEvent::ThrustStopped), 1);
    }
}

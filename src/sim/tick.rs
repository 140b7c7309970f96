//! Fixed-cadence simulation tick
//!
//! One call advances the world by one animation frame.

use super::collision::{self, CollisionReport};
use super::events::EventSink;
use super::input::{Command, apply_command};
use super::level;
use super::state::World;

/// Commands gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Collisions, physics and spawns ran (not paused, not game over)
    pub simulated: bool,
    pub collisions: CollisionReport,
    pub level_changed: bool,
    /// Queue requests applied during the drain
    pub ops_applied: usize,
}

/// Advance the world by one tick
///
/// Order: commands, then (unless paused or over) collisions, physics,
/// level check and timed spawns, then the queue drain and frame count.
pub fn tick(world: &mut World, input: &TickInput, sink: &mut impl EventSink) -> TickSummary {
    let mut summary = TickSummary::default();

    for command in &input.commands {
        apply_command(world, *command, sink);
    }

    if !world.paused && !world.is_game_over() {
        summary.simulated = true;
        summary.collisions = collision::detect(
            &world.ships,
            &world.hazards,
            &world.pickups,
            world.ship(),
            world.queue(),
        );
        world.step_physics();
        summary.level_changed = level::check_new_level(world, sink);
        level::spawn_floaters(world);
    }

    summary.ops_applied = world.process_ops(sink);
    world.frame = world.frame.wrapping_add(1);

    log::trace!("Frame {}: {:?}", world.frame, summary);
    summary
}

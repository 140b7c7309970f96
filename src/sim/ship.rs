//! The player's ship
//!
//! Thrust, turning, per-tick timers and the respawn rules. The ship is a
//! regular [`Entity`] whose kind carries a [`Ship`].

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use crate::consts::*;
use crate::{heading, normalize_degrees};

/// Which way the ship is turning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Idle,
    Left,
    Right,
}

/// Ship-only state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Ticks of protection left; a shielded ship survives collisions
    pub shield: u32,
    /// Ticks left on the special-weapon meter (nuke ready while > 0)
    pub nuke_meter: u32,
    /// Ticks the ship stays undrawn after a spawn
    pub invisible: u32,
    /// Ticks the "Level" banner stays up
    pub show_level: u32,
    /// Last thrust was rejected for exceeding the speed limit
    pub max_speed_attained: bool,
    pub turn_state: TurnState,
    pub thrusting: bool,
}

impl Ship {
    /// Count down every per-tick timer
    pub fn tick_timers(&mut self) {
        self.invisible = self.invisible.saturating_sub(1);
        self.shield = self.shield.saturating_sub(1);
        self.nuke_meter = self.nuke_meter.saturating_sub(1);
        self.show_level = self.show_level.saturating_sub(1);
    }

    /// Shield meter as 0-100
    pub fn shield_percent(&self) -> u32 {
        (self.shield / 2).min(100)
    }

    /// Nuke meter as 0-100
    pub fn nuke_percent(&self) -> u32 {
        (self.nuke_meter / 6).min(100)
    }
}

/// Orientation after one tick of turning
pub fn turn(orientation: i32, state: TurnState) -> i32 {
    match state {
        TurnState::Idle => orientation,
        TurnState::Left => normalize_degrees(orientation - TURN_STEP),
        TurnState::Right => normalize_degrees(orientation + TURN_STEP),
    }
}

/// Apply one tick of thrust along `orientation`
///
/// Thrust is rejected outright (velocity unchanged) when the resulting speed
/// would reach the limit; the ship then raises its max-speed flag. Accepted
/// thrust grows the radius with speed.
pub fn thrust(ship: &mut Ship, velocity: &mut DVec2, radius: &mut i32, orientation: i32) {
    let force = heading(orientation) * SHIP_THRUST;
    let speed = (*velocity + force).length() as i32;

    if speed < SHIP_MAX_VELOCITY {
        *velocity += force;
        *radius = SHIP_MIN_RADIUS + speed / 3;
        ship.max_speed_attained = false;
    } else {
        ship.max_speed_attained = true;
    }
}

/// Per-tick ship update that runs whether or not its position integrates
pub fn steer(entity: &mut Entity) {
    let Entity {
        kind,
        velocity,
        radius,
        orientation,
        ..
    } = entity;
    let EntityKind::Ship(ship) = kind else {
        return;
    };

    ship.tick_timers();
    if ship.thrusting {
        thrust(ship, velocity, radius, *orientation);
    }
    *orientation = turn(*orientation, ship.turn_state);
}

/// Reset the ship for a fresh life: protected, stopped, random heading
pub fn respawn(entity: &mut Entity, rng: &mut impl Rng) {
    entity.orientation = rng.random_range(0..360 / TURN_STEP) * TURN_STEP;
    entity.velocity = DVec2::ZERO;
    entity.radius = SHIP_MIN_RADIUS;
    if let EntityKind::Ship(ship) = &mut entity.kind {
        ship.shield = INITIAL_SPAWN_TIME;
        ship.invisible = INITIAL_SPAWN_TIME / 5;
        ship.max_speed_attained = false;
        ship.nuke_meter = 0;
    }
}

//! Per-entity physics
//!
//! Integrates position, expiry and spin once per tick. Positions live in an
//! oversized toroidal field: `multiplier x screen` in each axis. In
//! frame-fixed universes the ship stays pinned and everything else scrolls
//! against its velocity.

use glam::{DVec2, IVec2};

use super::entity::{Entity, EntityKind, Projectile};
use super::queue::MutationQueue;
use super::ship;
use crate::consts::*;
use crate::normalize_degrees;

/// Everything an entity needs from the world to move one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionContext {
    /// Play-field extents in pixels
    pub bounds: IVec2,
    /// Ship pinned to the screen center, world scrolls under it
    pub frame_fixed: bool,
    /// Ship velocity at the start of the tick (parallax reference)
    pub ship_velocity: DVec2,
}

impl MotionContext {
    pub fn new(multiplier: IVec2, frame_fixed: bool, ship_velocity: DVec2) -> Self {
        Self {
            bounds: multiplier * IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            frame_fixed,
            ship_velocity,
        }
    }

    fn parallax(&self) -> DVec2 {
        if self.frame_fixed {
            self.ship_velocity
        } else {
            DVec2::ZERO
        }
    }
}

/// Wrap an out-of-bounds position, or integrate one tick of displacement
///
/// Only one axis is corrected per tick and a wrapping entity does not also
/// move that tick.
fn wrap_or_integrate(center: IVec2, displacement: DVec2, bounds: IVec2) -> IVec2 {
    if center.x > bounds.x {
        IVec2::new(1, center.y)
    } else if center.x < 0 {
        IVec2::new(bounds.x - 1, center.y)
    } else if center.y > bounds.y {
        IVec2::new(center.x, 1)
    } else if center.y < 0 {
        IVec2::new(center.x, bounds.y - 1)
    } else {
        // Halves round toward positive infinity
        (center.as_dvec2() + displacement + 0.5).floor().as_ivec2()
    }
}

/// Count down a mortal entity; requests its removal exactly once, at 1
fn expire(entity: &mut Entity, queue: &MutationQueue) {
    if entity.expiry == 0 {
        return;
    }
    if entity.expiry == 1 {
        queue.remove(entity.handle());
    }
    entity.expiry -= 1;
}

/// Blast animation: every 10 ticks of expiry the stage advances
fn animate_nuke(entity: &mut Entity) {
    let EntityKind::Projectile(Projectile::Nuke { stage }) = &mut entity.kind else {
        return;
    };
    if entity.expiry % (NUKE_EXPIRY / 6) == 0 {
        *stage += 1;
    }
    entity.radius = match *stage {
        0 => NUKE_TRAVEL_RADIUS,
        1..=3 => entity.radius + NUKE_GROW_STEP,
        _ => (entity.radius - NUKE_SHRINK_STEP).max(0),
    };
}

/// Standard sprite motion: wrap/integrate, expire, spin
fn sprite_move(entity: &mut Entity, ctx: &MotionContext, queue: &MutationQueue) {
    let displacement = entity.velocity - ctx.parallax();
    entity.center = wrap_or_integrate(entity.center, displacement, ctx.bounds);

    expire(entity, queue);

    if entity.spin != 0 {
        entity.orientation = normalize_degrees(entity.orientation + entity.spin);
    }
}

/// Advance one entity by one tick
pub fn step(entity: &mut Entity, ctx: &MotionContext, queue: &MutationQueue) {
    match entity.kind {
        EntityKind::Ship(_) => {
            if !ctx.frame_fixed {
                sprite_move(entity, ctx, queue);
            }
            ship::steer(entity);
        }
        EntityKind::Star { .. } => {
            // Stars sit still unless the world scrolls, and always live on one screen
            if ctx.frame_fixed {
                let screen = IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
                entity.center = wrap_or_integrate(entity.center, -ctx.ship_velocity, screen);
            }
        }
        EntityKind::Projectile(Projectile::Nuke { .. }) => {
            sprite_move(entity, ctx, queue);
            animate_nuke(entity);
        }
        _ => sprite_move(entity, ctx, queue),
    }
}

/// Advance every entity in a partition
pub fn step_all(entities: &mut [Entity], ctx: &MotionContext, queue: &MutationQueue) {
    for entity in entities {
        step(entity, ctx, queue);
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed cadence only (one tick per animation frame)
//! - Seeded RNG only
//! - Partitions change only when the mutation queue is drained
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod events;
pub mod geometry;
pub mod input;
pub mod level;
pub mod motion;
pub mod queue;
pub mod runner;
pub mod ship;
pub mod state;
pub mod telemetry;
pub mod tick;

pub use collision::{CollisionReport, circles_overlap, detect};
pub use entity::{
    Entity, EntityId, EntityKind, EntityRef, PickupKind, Projectile, SHIP_ID, SpriteKey, Team, Tier,
};
pub use events::{EventLog, EventSink, GameEvent, NullSink};
pub use geometry::{AspectRatio, PolarPoint, render_polygon};
pub use input::{Command, apply_command};
pub use level::Universe;
pub use motion::MotionContext;
pub use queue::{Action, GameOp, MutationQueue, QueueHandle};
pub use runner::{Cadence, Controller, FrameSink, Runner, SimulationThread, command_channel};
pub use ship::{Ship, TurnState};
pub use state::World;
pub use telemetry::{Radar, RenderItem, Snapshot, Telemetry};
pub use tick::{TickInput, TickSummary, tick};

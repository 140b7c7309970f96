//! Lifecycle events
//!
//! The world reports everything an outside collaborator (audio, UI) may react
//! to through an [`EventSink`]. Events are emitted synchronously, exactly once,
//! inside the tick that caused them.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, PickupKind, Team, Tier};
use super::level::Universe;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An entity became live in its partition
    EntityAdded { id: EntityId, team: Team },
    /// An entity left its partition
    EntityRemoved { id: EntityId, team: Team },
    BulletFired,
    NukeDeployed,
    /// An asteroid was removed and scored
    HazardDestroyed { tier: Tier, points: i64 },
    PickupCollected(PickupKind),
    ShipRespawned { lives: i32 },
    GameOver,
    LevelStarted { level: u32, universe: Universe },
    ThrustStarted,
    ThrustStopped,
    MusicStarted,
    MusicStopped,
    Paused,
    Resumed,
}

/// Receiver of simulation events
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Keeps every event, in order
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(*event);
    }
}

/// Fan one event stream out to two sinks
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

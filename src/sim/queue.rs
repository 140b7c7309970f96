//! Deferred mutation queue
//!
//! Collision detection, expiry and spawning never touch the entity
//! partitions directly. They enqueue [`GameOp`]s here, and the world applies
//! them in FIFO order once per tick (see [`super::state::World::process_ops`]).
//!
//! Enqueueing never blocks and may happen from any thread through a
//! [`QueueHandle`]; draining happens only on the simulation thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};

use super::entity::{Entity, EntityId, EntityRef};

/// Requested change to the partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
}

/// A pending add or remove
#[derive(Debug, Clone, PartialEq)]
pub enum GameOp {
    Add(Box<Entity>),
    Remove(EntityRef),
}

impl GameOp {
    pub fn action(&self) -> Action {
        match self {
            GameOp::Add(_) => Action::Add,
            GameOp::Remove(_) => Action::Remove,
        }
    }

    pub fn target(&self) -> EntityRef {
        match self {
            GameOp::Add(entity) => entity.handle(),
            GameOp::Remove(target) => *target,
        }
    }
}

/// Cloneable producer side of the queue, safe to move to other threads
#[derive(Debug, Clone)]
pub struct QueueHandle {
    tx: Sender<GameOp>,
    ids: Arc<AtomicU64>,
}

impl QueueHandle {
    pub fn enqueue(&self, op: GameOp) {
        if self.tx.send(op).is_err() {
            log::warn!("Mutation queue closed; dropping request");
        }
    }

    pub fn add(&self, entity: Entity) {
        self.enqueue(GameOp::Add(Box::new(entity)));
    }

    pub fn remove(&self, target: EntityRef) {
        self.enqueue(GameOp::Remove(target));
    }

    /// Allocate a fresh entity id
    pub fn next_id(&self) -> EntityId {
        EntityId(self.ids.fetch_add(1, Ordering::Relaxed))
    }
}

/// The queue itself; owned by the world
#[derive(Debug)]
pub struct MutationQueue {
    handle: QueueHandle,
    rx: Receiver<GameOp>,
}

impl Default for MutationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            // Id 0 belongs to the ship
            handle: QueueHandle {
                tx,
                ids: Arc::new(AtomicU64::new(1)),
            },
            rx,
        }
    }

    /// A producer handle for another thread
    pub fn handle(&self) -> QueueHandle {
        self.handle.clone()
    }

    pub fn enqueue(&self, op: GameOp) {
        self.handle.enqueue(op);
    }

    pub fn add(&self, entity: Entity) {
        self.handle.add(entity);
    }

    pub fn remove(&self, target: EntityRef) {
        self.handle.remove(target);
    }

    pub fn next_id(&self) -> EntityId {
        self.handle.next_id()
    }

    /// Take every pending request, oldest first
    pub fn drain_all(&self) -> Vec<GameOp> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

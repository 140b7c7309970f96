//! World state and lifecycle dispatch
//!
//! The [`World`] owns every live entity, partitioned by team, plus the
//! counters the game loop reads. Partitions change in exactly one place:
//! [`World::process_ops`], which drains the mutation queue and runs the
//! add/remove rules for each entity kind.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind, EntityRef, PickupKind, Projectile, Team};
use super::events::{EventSink, GameEvent};
use super::level::Universe;
use super::motion::{self, MotionContext};
use super::queue::{GameOp, MutationQueue, QueueHandle};
use super::ship::{self, Ship};
use crate::consts::*;

/// Complete simulation state, owned by the simulation thread
#[derive(Debug)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Ship team: the player ship (always index 0) and its projectiles
    pub ships: Vec<Entity>,
    /// Asteroids
    pub hazards: Vec<Entity>,
    /// Floaters
    pub pickups: Vec<Entity>,
    /// Clouds and stars
    pub debris: Vec<Entity>,
    /// Ticks since start; wraps on overflow
    pub frame: u64,
    /// Current level; 0 until the first clear check
    pub level: u32,
    /// Points from destroyed asteroids and level bonuses
    pub score: i64,
    /// Remaining lives; the game is over below 1
    pub lives: i32,
    /// Paused worlds drain requests but do not move
    pub paused: bool,
    /// Playfield mode for the current level
    pub universe: Universe,
    /// Whether the mini-map is shown
    pub radar: bool,
    /// Whether the theme loop is playing
    pub theme_music: bool,
    rng: Pcg32,
    queue: MutationQueue,
}

impl World {
    /// Create a world with the given seed, ready for its first tick
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            seed,
            ships: Vec::new(),
            hazards: Vec::new(),
            pickups: Vec::new(),
            debris: Vec::new(),
            frame: 0,
            level: 0,
            score: 0,
            lives: 0,
            paused: false,
            universe: Universe::default(),
            radar: false,
            theme_music: false,
            rng: Pcg32::seed_from_u64(seed),
            queue: MutationQueue::new(),
        };
        world.init_game();
        world
    }

    /// Reset to the start of a game
    ///
    /// Pending requests from the previous game are discarded. The ship is
    /// placed directly; the star field goes through the queue.
    pub fn init_game(&mut self) {
        let stale = self.queue.drain_all().len();
        if stale > 0 {
            log::debug!("Discarded {} pending requests", stale);
        }
        for team in Team::ALL {
            self.partition_mut(team).clear();
        }

        let mut ship = Entity::ship();
        ship::respawn(&mut ship, &mut self.rng);
        self.ships.push(ship);

        for _ in 0..STAR_COUNT {
            let star = Entity::star(self.queue.next_id(), &mut self.rng);
            self.queue.add(star);
        }

        self.level = 0;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.paused = false;
        self.universe = Universe::default();
        log::info!("New game (seed {})", self.seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.lives < 1
    }

    /// The player ship
    pub fn ship(&self) -> &Entity {
        &self.ships[0]
    }

    pub fn ship_mut(&mut self) -> &mut Entity {
        &mut self.ships[0]
    }

    /// Ship-only state of the player ship
    pub fn ship_state(&self) -> Ship {
        self.ship().ship_state().cloned().unwrap_or_default()
    }

    pub fn queue(&self) -> &MutationQueue {
        &self.queue
    }

    /// Producer handle for another thread
    pub fn queue_handle(&self) -> QueueHandle {
        self.queue.handle()
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn partition(&self, team: Team) -> &[Entity] {
        match team {
            Team::Ship => &self.ships,
            Team::Hazard => &self.hazards,
            Team::Pickup => &self.pickups,
            Team::Debris => &self.debris,
        }
    }

    pub fn partition_mut(&mut self, team: Team) -> &mut Vec<Entity> {
        match team {
            Team::Ship => &mut self.ships,
            Team::Hazard => &mut self.hazards,
            Team::Pickup => &mut self.pickups,
            Team::Debris => &mut self.debris,
        }
    }

    pub fn find(&self, target: EntityRef) -> Option<&Entity> {
        self.partition(target.team).iter().find(|e| e.id == target.id)
    }

    pub fn contains(&self, target: EntityRef) -> bool {
        self.find(target).is_some()
    }

    /// Every live entity, back to front (debris, pickups, hazards, ships)
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        Team::ALL.into_iter().flat_map(|team| self.partition(team).iter())
    }

    pub fn entity_count(&self) -> usize {
        Team::ALL.iter().map(|team| self.partition(*team).len()).sum()
    }

    /// Motion parameters for this tick
    pub fn motion_context(&self) -> MotionContext {
        MotionContext::new(
            self.universe.multiplier(),
            self.universe.is_ship_fixed(),
            self.ship().velocity,
        )
    }

    /// Move every live entity one tick
    ///
    /// The parallax reference is the ship velocity before this step.
    pub fn step_physics(&mut self) {
        let ctx = self.motion_context();
        let queue = &self.queue;
        for partition in [
            &mut self.debris,
            &mut self.pickups,
            &mut self.hazards,
            &mut self.ships,
        ] {
            motion::step_all(partition, &ctx, queue);
        }
    }

    /// Drain the mutation queue and apply every request in FIFO order
    ///
    /// Requests enqueued while applying (fragments, clouds) are applied in
    /// the same call. Returns the number of requests processed.
    pub fn process_ops(&mut self, sink: &mut impl EventSink) -> usize {
        let mut processed = 0;
        loop {
            let ops = self.queue.drain_all();
            if ops.is_empty() {
                break;
            }
            processed += ops.len();
            for op in ops {
                self.apply(op, sink);
            }
        }
        processed
    }

    /// Apply a single request
    pub fn apply(&mut self, op: GameOp, sink: &mut impl EventSink) {
        match op {
            GameOp::Add(entity) => self.add_entity(*entity, sink),
            GameOp::Remove(target) => self.remove_entity(target, sink),
        }
    }

    fn add_entity(&mut self, entity: Entity, sink: &mut impl EventSink) {
        let handle = entity.handle();
        if self.contains(handle) {
            log::warn!("Ignoring add of live entity {:?}", handle);
            return;
        }

        match entity.kind {
            EntityKind::Projectile(Projectile::Nuke { .. }) => {
                let Some(ship) = self.ships[0].ship_state_mut() else {
                    return;
                };
                if ship.nuke_meter == 0 {
                    log::debug!("Nuke not armed; launch dropped");
                    return;
                }
                ship.nuke_meter = 0;
                sink.on_event(&GameEvent::NukeDeployed);
            }
            EntityKind::Projectile(Projectile::Bullet) => sink.on_event(&GameEvent::BulletFired),
            _ => {}
        }

        self.partition_mut(handle.team).push(entity);
        sink.on_event(&GameEvent::EntityAdded {
            id: handle.id,
            team: handle.team,
        });
    }

    fn remove_entity(&mut self, target: EntityRef, sink: &mut impl EventSink) {
        let partition = self.partition(target.team);
        let Some(index) = partition.iter().position(|e| e.id == target.id) else {
            return;
        };

        let found = &partition[index];
        let is_ship = found.is_ship();
        // A nuke only dies of old age
        let armed_nuke = matches!(found.kind, EntityKind::Projectile(Projectile::Nuke { .. }))
            && found.expiry > 0;
        if is_ship {
            self.kill_ship(index, sink);
            return;
        }
        if armed_nuke {
            return;
        }

        let entity = self.partition_mut(target.team).remove(index);
        match entity.kind {
            EntityKind::Hazard(tier) => {
                self.explode(&entity);
                self.score += tier.points();
                sink.on_event(&GameEvent::HazardDestroyed {
                    tier,
                    points: tier.points(),
                });
            }
            EntityKind::Pickup(kind) if entity.expiry > 0 => {
                self.collect(kind);
                sink.on_event(&GameEvent::PickupCollected(kind));
            }
            _ => {}
        }
        sink.on_event(&GameEvent::EntityRemoved {
            id: target.id,
            team: target.team,
        });
    }

    /// The ship is never removed; an unshielded hit costs a life instead
    fn kill_ship(&mut self, index: usize, sink: &mut impl EventSink) {
        let shielded = self.ships[index]
            .ship_state()
            .is_some_and(|ship| ship.shield > 0);
        if shielded || self.is_game_over() {
            return;
        }

        self.lives -= 1;
        if self.is_game_over() {
            log::info!("Game over: score {} at level {}", self.score, self.level);
            sink.on_event(&GameEvent::GameOver);
            return;
        }

        ship::respawn(&mut self.ships[index], &mut self.rng);
        log::debug!("Ship respawned, {} lives left", self.lives);
        sink.on_event(&GameEvent::ShipRespawned { lives: self.lives });
    }

    /// Replace a destroyed asteroid with smaller ones, or a cloud for the smallest
    fn explode(&mut self, parent: &Entity) {
        let Some(tier) = parent.tier() else {
            return;
        };
        match tier.smaller() {
            Some(smaller) => {
                for _ in 0..tier.index() + 2 {
                    let id = self.queue.next_id();
                    let fragment = Entity::fragment(id, parent, smaller, &mut self.rng);
                    self.queue.add(fragment);
                }
            }
            None => {
                let cloud = Entity::cloud(self.queue.next_id(), parent);
                self.queue.add(cloud);
            }
        }
    }

    fn collect(&mut self, kind: PickupKind) {
        let Some(ship) = self.ships[0].ship_state_mut() else {
            return;
        };
        match kind {
            PickupKind::Shield => ship.shield = MAX_SHIELD,
            PickupKind::Nuke => ship.nuke_meter = MAX_NUKE,
        }
    }
}

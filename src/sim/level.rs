//! Level progression and timed spawns
//!
//! A level is cleared once no asteroid remains. Clearing it scores a bonus,
//! recenters the ship, switches to the next universe and spawns one more
//! large asteroid than the previous level had. Pickups spawn on fixed frame
//! periods independent of the level.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, PickupKind, Tier};
use super::events::{EventSink, GameEvent};
use super::state::World;
use crate::consts::*;

/// Play-field profile, cycled with the level number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Universe {
    /// Ship flies freely over a single screen
    #[default]
    FreeFly,
    Center,
    Big,
    Horizontal,
    Vertical,
    Dark,
}

impl Universe {
    pub const ALL: [Universe; 6] = [
        Universe::FreeFly,
        Universe::Center,
        Universe::Big,
        Universe::Horizontal,
        Universe::Vertical,
        Universe::Dark,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::ALL[ordinal % Self::ALL.len()]
    }

    /// Universe size in screens (width x height)
    pub fn multiplier(self) -> IVec2 {
        match self {
            Universe::FreeFly | Universe::Center => IVec2::new(1, 1),
            Universe::Big => IVec2::new(2, 2),
            Universe::Horizontal => IVec2::new(3, 1),
            Universe::Vertical => IVec2::new(1, 3),
            Universe::Dark => IVec2::new(4, 4),
        }
    }

    /// Ship pinned to the screen center in every universe but free fly
    pub fn is_ship_fixed(self) -> bool {
        self != Universe::FreeFly
    }

    pub fn name(self) -> &'static str {
        match self {
            Universe::FreeFly => "FREE FLY",
            Universe::Center => "CENTER",
            Universe::Big => "BIG",
            Universe::Horizontal => "HORIZONTAL",
            Universe::Vertical => "VERTICAL",
            Universe::Dark => "DARK",
        }
    }
}

/// No asteroid left in the hazard partition
pub fn is_level_clear(hazards: &[Entity]) -> bool {
    !hazards
        .iter()
        .any(|e| matches!(e.kind, EntityKind::Hazard(_)))
}

/// Advance to the next level if the current one is cleared
///
/// Returns true when a transition happened. New asteroids go through the
/// mutation queue like every other spawn.
pub fn check_new_level(world: &mut World, sink: &mut impl EventSink) -> bool {
    if !is_level_clear(&world.hazards) {
        return false;
    }

    let cleared = world.level;
    world.score += LEVEL_CLEAR_BONUS * i64::from(cleared);

    let universe = Universe::from_ordinal(cleared as usize + 1);
    world.universe = universe;
    if universe.ordinal() >= 2 {
        world.radar = true;
    }

    world.level = cleared + 1;
    for _ in 0..world.level {
        let id = world.queue().next_id();
        let asteroid = Entity::asteroid(id, Tier::Large, world.rng_mut());
        world.queue().add(asteroid);
    }

    let ship = world.ship_mut();
    ship.center = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
    if let Some(state) = ship.ship_state_mut() {
        state.shield = INITIAL_SPAWN_TIME;
        state.show_level = INITIAL_SPAWN_TIME;
    }

    log::info!(
        "Level {} cleared (+{}), entering level {} in {} universe",
        cleared,
        LEVEL_CLEAR_BONUS * i64::from(cleared),
        world.level,
        universe.name()
    );
    sink.on_event(&GameEvent::LevelStarted {
        level: world.level,
        universe,
    });
    true
}

/// Enqueue the periodic pickups due on the current frame
pub fn spawn_floaters(world: &mut World) {
    let due = [
        (PickupKind::Shield, SHIELD_SPAWN_PERIOD),
        (PickupKind::Nuke, NUKE_SPAWN_PERIOD),
    ];
    for (kind, period) in due {
        if world.frame % period == 0 {
            let id = world.queue().next_id();
            let floater = Entity::floater(id, kind, world.rng_mut());
            log::debug!("Spawning {:?} floater on frame {}", kind, world.frame);
            world.queue().add(floater);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;
    use crate::sim::events::EventLog;
    use crate::sim::queue::GameOp;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_universe_cycle() {
        assert_eq!(Universe::from_ordinal(1), Universe::Center);
        assert_eq!(Universe::from_ordinal(6), Universe::FreeFly);
        assert_eq!(Universe::from_ordinal(11), Universe::Dark);
        assert_eq!(Universe::Horizontal.multiplier(), IVec2::new(3, 1));
        assert!(!Universe::FreeFly.is_ship_fixed());
        assert!(Universe::Dark.is_ship_fixed());
    }

    #[test]
    fn test_level_clear_only_counts_asteroids() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(is_level_clear(&[]));
        let rock = Entity::asteroid(EntityId(1), Tier::Small, &mut rng);
        assert!(!is_level_clear(&[rock]));
    }

    #[test]
    fn test_first_clear() {
        let mut world = World::new(42);
        let _ = world.queue().drain_all();
        let mut log = EventLog::new();

        assert!(check_new_level(&mut world, &mut log));
        assert_eq!(world.level, 1);
        assert_eq!(world.score, 0);
        assert_eq!(world.universe, Universe::Center);
        assert!(!world.radar);

        let adds: Vec<_> = world.queue().drain_all();
        assert_eq!(adds.len(), 1);
        assert!(matches!(&adds[0], GameOp::Add(e) if e.tier() == Some(Tier::Large)));
        assert_eq!(
            log.events,
            vec![GameEvent::LevelStarted {
                level: 1,
                universe: Universe::Center
            }]
        );
    }

    #[test]
    fn test_later_clear_scores_and_enables_radar() {
        let mut world = World::new(42);
        let _ = world.queue().drain_all();
        world.level = 1;
        world.score = 500;
        world.ship_mut().center = IVec2::new(3, 4);

        assert!(check_new_level(&mut world, &mut EventLog::new()));
        assert_eq!(world.level, 2);
        assert_eq!(world.score, 10_500);
        assert_eq!(world.universe, Universe::Big);
        assert!(world.radar);
        assert_eq!(world.ship().center, IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2));
        let ship = world.ship().ship_state().cloned().unwrap_or_default();
        assert_eq!(ship.shield, INITIAL_SPAWN_TIME);
        assert_eq!(ship.show_level, INITIAL_SPAWN_TIME);
        assert_eq!(world.queue().drain_all().len(), 2);
    }

    #[test]
    fn test_no_transition_while_asteroids_remain() {
        let mut world = World::new(42);
        let _ = world.queue().drain_all();
        let id = world.queue().next_id();
        let rock = Entity::asteroid(id, Tier::Medium, world.rng_mut());
        world.hazards.push(rock);

        assert!(!check_new_level(&mut world, &mut EventLog::new()));
        assert_eq!(world.level, 0);
        assert!(world.queue().is_empty());
    }

    #[test]
    fn test_floater_periods() {
        let mut world = World::new(5);
        let _ = world.queue().drain_all();

        world.frame = 0;
        spawn_floaters(&mut world);
        assert_eq!(world.queue().drain_all().len(), 2);

        world.frame = NUKE_SPAWN_PERIOD;
        spawn_floaters(&mut world);
        let ops = world.queue().drain_all();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], GameOp::Add(e) if e.kind == EntityKind::Pickup(PickupKind::Nuke)));

        world.frame = SHIELD_SPAWN_PERIOD;
        spawn_floaters(&mut world);
        let ops = world.queue().drain_all();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], GameOp::Add(e) if e.kind == EntityKind::Pickup(PickupKind::Shield)));

        world.frame = 7;
        spawn_floaters(&mut world);
        assert!(world.queue().is_empty());
    }
}

//! Collision detection between opposing teams
//!
//! A pure read over the live partitions. Every overlap becomes Remove
//! requests on the mutation queue; nothing is mutated during the scan.
//! Duplicate requests for the same entity are expected and harmless.

use glam::IVec2;

use super::entity::Entity;
use super::geometry::distance;
use super::queue::MutationQueue;

/// Tally of the overlaps found in one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Ship-team vs hazard pairs
    pub hazard_hits: usize,
    /// Ship vs pickup pairs
    pub pickups_touched: usize,
}

impl CollisionReport {
    pub fn total(&self) -> usize {
        self.hazard_hits + self.pickups_touched
    }
}

/// Circle overlap; exactly tangent circles do not collide
#[inline]
pub fn circles_overlap(a: IVec2, radius_a: i32, b: IVec2, radius_b: i32) -> bool {
    distance(a, b) < f64::from(radius_a + radius_b)
}

#[inline]
fn overlapping(a: &Entity, b: &Entity) -> bool {
    circles_overlap(a.center, a.radius, b.center, b.radius)
}

/// Scan for collisions and enqueue the resulting removals
///
/// Pass 1 checks every ship-team entity against every hazard and removes
/// both. Pass 2 checks the player ship against every pickup and removes
/// only the pickup.
pub fn detect(
    ship_team: &[Entity],
    hazards: &[Entity],
    pickups: &[Entity],
    ship: &Entity,
    queue: &MutationQueue,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    for friend in ship_team {
        for hazard in hazards {
            if overlapping(friend, hazard) {
                queue.remove(friend.handle());
                queue.remove(hazard.handle());
                report.hazard_hits += 1;
            }
        }
    }

    for pickup in pickups {
        if overlapping(ship, pickup) {
            queue.remove(pickup.handle());
            report.pickups_touched += 1;
        }
    }

    if report.total() > 0 {
        log::trace!("Collisions: {:?}", report);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, PickupKind, SHIP_ID, Tier};
    use crate::sim::queue::GameOp;
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn at(mut entity: Entity, x: i32, y: i32) -> Entity {
        entity.center = IVec2::new(x, y);
        entity.velocity = DVec2::ZERO;
        entity
    }

    fn removed_ids(queue: &MutationQueue) -> Vec<u64> {
        queue
            .drain_all()
            .into_iter()
            .map(|op| match op {
                GameOp::Remove(target) => target.id.0,
                GameOp::Add(_) => panic!("collision must only remove"),
            })
            .collect()
    }

    #[test]
    fn test_tangent_circles_do_not_collide() {
        assert!(!circles_overlap(IVec2::new(0, 0), 28, IVec2::new(138, 0), 110));
        assert!(circles_overlap(IVec2::new(0, 0), 28, IVec2::new(137, 0), 110));
    }

    #[test]
    fn test_tangent_pair_then_one_unit_closer() {
        let mut rng = Pcg32::seed_from_u64(4);
        let ship = at(Entity::ship(), 500, 500);
        let rock = Entity::asteroid(EntityId(7), Tier::Large, &mut rng);

        let queue = MutationQueue::new();
        let tangent = at(rock.clone(), 500 + 28 + 110, 500);
        let report = detect(std::slice::from_ref(&ship), &[tangent], &[], &ship, &queue);
        assert_eq!(report.total(), 0);
        assert!(queue.is_empty());

        let closer = at(rock, 500 + 28 + 110 - 1, 500);
        let report = detect(std::slice::from_ref(&ship), &[closer], &[], &ship, &queue);
        assert_eq!(report.hazard_hits, 1);
        assert_eq!(removed_ids(&queue), vec![SHIP_ID.0, 7]);
    }

    #[test]
    fn test_multiple_matches_enqueue_duplicates() {
        let mut rng = Pcg32::seed_from_u64(9);
        let ship = at(Entity::ship(), 100, 100);
        let bullet = at(Entity::bullet(EntityId(2), &ship), 150, 100);
        let rock = at(Entity::asteroid(EntityId(3), Tier::Large, &mut rng), 120, 100);

        let queue = MutationQueue::new();
        let report = detect(&[ship.clone(), bullet], &[rock], &[], &ship, &queue);
        assert_eq!(report.hazard_hits, 2);
        let ids = removed_ids(&queue);
        assert_eq!(ids.iter().filter(|id| **id == 3).count(), 2);
    }

    #[test]
    fn test_pickup_removes_only_pickup() {
        let mut rng = Pcg32::seed_from_u64(12);
        let ship = at(Entity::ship(), 300, 300);
        let near = at(Entity::floater(EntityId(4), PickupKind::Shield, &mut rng), 320, 300);
        let far = at(Entity::floater(EntityId(5), PickupKind::Nuke, &mut rng), 900, 300);

        let queue = MutationQueue::new();
        let report = detect(std::slice::from_ref(&ship), &[], &[near, far], &ship, &queue);
        assert_eq!(report.pickups_touched, 1);
        assert_eq!(removed_ids(&queue), vec![4]);
    }

    #[test]
    fn test_bullets_do_not_collect_pickups() {
        let mut rng = Pcg32::seed_from_u64(13);
        let ship = at(Entity::ship(), 100, 100);
        let bullet = at(Entity::bullet(EntityId(2), &ship), 800, 800);
        let pickup = at(Entity::floater(EntityId(6), PickupKind::Shield, &mut rng), 800, 800);

        let queue = MutationQueue::new();
        let report = detect(&[ship.clone(), bullet], &[], &[pickup], &ship, &queue);
        assert_eq!(report.total(), 0);
    }
}

//! Entities and teams
//!
//! Every simulated object is an [`Entity`]: shared motion fields plus an
//! [`EntityKind`] carrying the variant-specific state.

use glam::{DVec2, IVec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::asteroid_outline;
use super::ship::Ship;
use crate::consts::*;
use crate::heading;

/// Stable identity of an entity across queue requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// The player ship always carries this id
pub const SHIP_ID: EntityId = EntityId(0);

/// Collision category; also selects the registry partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Player ship and its projectiles
    Ship,
    /// Asteroids
    Hazard,
    /// Floaters the ship can collect
    Pickup,
    /// Inert scenery (clouds, stars)
    Debris,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::Debris, Team::Pickup, Team::Hazard, Team::Ship];
}

/// Asteroid size classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Large,
    Medium,
    Small,
}

impl Tier {
    pub fn index(self) -> u32 {
        match self {
            Tier::Large => 0,
            Tier::Medium => 1,
            Tier::Small => 2,
        }
    }

    pub fn radius(self) -> i32 {
        match self {
            Tier::Large => ASTEROID_LARGE_RADIUS,
            Tier::Medium => ASTEROID_LARGE_RADIUS / 2,
            Tier::Small => ASTEROID_LARGE_RADIUS / 4,
        }
    }

    /// Next smaller tier, `None` for the smallest
    pub fn smaller(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }

    /// Points awarded whenever an asteroid of this tier is removed
    pub fn points(self) -> i64 {
        ASTEROID_POINTS * (i64::from(self.index()) + 1)
    }
}

/// Player weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projectile {
    Bullet,
    /// Special weapon; `stage` drives the blast radius animation
    Nuke { stage: u32 },
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Shield,
    Nuke,
}

impl PickupKind {
    pub fn expiry(self) -> u32 {
        match self {
            PickupKind::Shield => SHIELD_FLOATER_EXPIRY,
            PickupKind::Nuke => NUKE_FLOATER_EXPIRY,
        }
    }
}

/// Variant-specific entity state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship(Ship),
    Projectile(Projectile),
    Hazard(Tier),
    Pickup(PickupKind),
    /// Explosion cloud left by the smallest asteroids
    Debris,
    /// Background star
    Star { brightness: u8 },
}

/// Key an external renderer uses to pick an image or outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKey {
    Ship { shielded: bool, thrusting: bool, invisible: bool },
    Bullet,
    Nuke,
    Asteroid(Tier),
    ShieldFloater,
    NukeFloater,
    /// Animation frame of the debris cloud (0..DEBRIS_FRAMES)
    Cloud { frame: u32 },
    Star { brightness: u8 },
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub center: IVec2,
    /// Displacement added each tick
    pub velocity: DVec2,
    /// Degrees, [0, 360)
    pub orientation: i32,
    /// Degrees added to orientation each tick
    pub spin: i32,
    pub radius: i32,
    /// 0 = immortal; otherwise ticks left to live
    pub expiry: u32,
    /// Raw cartesian outline for vector rendering (empty for raster sprites)
    pub outline: Vec<IVec2>,
}

/// What a queue request needs to find an entity again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub team: Team,
}

/// Random magnitude in [0, seed), negated when odd
pub fn some_pos_neg(rng: &mut impl Rng, seed: i32) -> i32 {
    let n = rng.random_range(0..seed);
    if n % 2 == 0 { n } else { -n }
}

/// Random point on the screen
fn random_screen_point(rng: &mut impl Rng) -> IVec2 {
    IVec2::new(
        rng.random_range(0..SCREEN_WIDTH),
        rng.random_range(0..SCREEN_HEIGHT),
    )
}

fn floater_outline() -> Vec<IVec2> {
    [
        (5, 5),
        (4, 0),
        (5, -5),
        (0, -4),
        (-5, -5),
        (-4, 0),
        (-5, 5),
        (0, 4),
    ]
    .into_iter()
    .map(|(x, y)| IVec2::new(x, y))
    .collect()
}

fn bullet_outline() -> Vec<IVec2> {
    [(0, 3), (1, -1), (0, 0), (-1, -1)]
        .into_iter()
        .map(|(x, y)| IVec2::new(x, y))
        .collect()
}

impl Entity {
    fn base(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            center: IVec2::ZERO,
            velocity: DVec2::ZERO,
            orientation: 0,
            spin: 0,
            radius: 0,
            expiry: 0,
            outline: Vec::new(),
        }
    }

    /// The player ship, centered on screen and at rest
    pub fn ship() -> Self {
        Self {
            center: IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
            radius: SHIP_MIN_RADIUS,
            ..Self::base(SHIP_ID, EntityKind::Ship(Ship::default()))
        }
    }

    /// A bullet leaving the ship along its heading, inheriting its inertia
    pub fn bullet(id: EntityId, ship: &Entity) -> Self {
        let fire = heading(ship.orientation) * BULLET_FIRE_POWER;
        Self {
            center: ship.center,
            velocity: ship.velocity + fire,
            orientation: ship.orientation,
            radius: BULLET_RADIUS,
            expiry: BULLET_EXPIRY,
            outline: bullet_outline(),
            ..Self::base(id, EntityKind::Projectile(Projectile::Bullet))
        }
    }

    /// A nuke launched from the ship; deployment is decided when it is added
    pub fn nuke(id: EntityId, ship: &Entity) -> Self {
        let fire = heading(ship.orientation) * NUKE_FIRE_POWER;
        Self {
            center: ship.center,
            velocity: ship.velocity + fire,
            expiry: NUKE_EXPIRY,
            ..Self::base(id, EntityKind::Projectile(Projectile::Nuke { stage: 0 }))
        }
    }

    /// A fresh asteroid at a random screen position
    pub fn asteroid(id: EntityId, tier: Tier, rng: &mut impl Rng) -> Self {
        let center = random_screen_point(rng);
        let spin = some_pos_neg(rng, 10);
        let velocity = DVec2::new(
            f64::from(some_pos_neg(rng, 10)),
            f64::from(some_pos_neg(rng, 10)),
        );
        Self {
            center,
            velocity,
            spin,
            radius: tier.radius(),
            outline: asteroid_outline(rng),
            ..Self::base(id, EntityKind::Hazard(tier))
        }
    }

    /// A smaller asteroid thrown off an exploding one
    ///
    /// Keeps part of the parent's inertia; smaller fragments get more jitter.
    pub fn fragment(id: EntityId, parent: &Entity, tier: Tier, rng: &mut impl Rng) -> Self {
        let mut fragment = Self::asteroid(id, tier, rng);
        let jitter = 5 + tier.index() as i32 * 2;
        fragment.center = parent.center;
        fragment.velocity = DVec2::new(
            parent.velocity.x / 1.5 + f64::from(some_pos_neg(rng, jitter)),
            parent.velocity.y / 1.5 + f64::from(some_pos_neg(rng, jitter)),
        );
        fragment
    }

    /// A drifting, spinning pickup
    pub fn floater(id: EntityId, kind: PickupKind, rng: &mut impl Rng) -> Self {
        let center = random_screen_point(rng);
        let velocity = DVec2::new(
            f64::from(some_pos_neg(rng, 10)),
            f64::from(some_pos_neg(rng, 10)),
        );
        let spin = some_pos_neg(rng, 10);
        Self {
            center,
            velocity,
            spin,
            radius: FLOATER_RADIUS,
            expiry: kind.expiry(),
            outline: floater_outline(),
            ..Self::base(id, EntityKind::Pickup(kind))
        }
    }

    /// Inert cloud replacing an exploded sprite
    pub fn cloud(id: EntityId, parent: &Entity) -> Self {
        Self {
            center: parent.center,
            velocity: parent.velocity,
            spin: parent.spin,
            radius: (f64::from(parent.radius) * DEBRIS_RADIUS_SCALE) as i32,
            expiry: DEBRIS_FRAMES * DEBRIS_SLOW_MO,
            ..Self::base(id, EntityKind::Debris)
        }
    }

    /// Background star at a random screen position
    pub fn star(id: EntityId, rng: &mut impl Rng) -> Self {
        let center = random_screen_point(rng);
        let brightness = rng.random_range(0..=STAR_MAX_BRIGHTNESS);
        Self {
            center,
            radius: 1,
            ..Self::base(id, EntityKind::Star { brightness })
        }
    }

    pub fn team(&self) -> Team {
        match self.kind {
            EntityKind::Ship(_) | EntityKind::Projectile(_) => Team::Ship,
            EntityKind::Hazard(_) => Team::Hazard,
            EntityKind::Pickup(_) => Team::Pickup,
            EntityKind::Debris | EntityKind::Star { .. } => Team::Debris,
        }
    }

    pub fn handle(&self) -> EntityRef {
        EntityRef {
            id: self.id,
            team: self.team(),
        }
    }

    /// Asteroid tier, if this is an asteroid
    pub fn tier(&self) -> Option<Tier> {
        match self.kind {
            EntityKind::Hazard(tier) => Some(tier),
            _ => None,
        }
    }

    pub fn is_ship(&self) -> bool {
        matches!(self.kind, EntityKind::Ship(_))
    }

    pub fn ship_state(&self) -> Option<&Ship> {
        match &self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn ship_state_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn sprite_key(&self) -> SpriteKey {
        match &self.kind {
            EntityKind::Ship(ship) => SpriteKey::Ship {
                shielded: ship.shield > 0,
                thrusting: ship.thrusting,
                invisible: ship.invisible > 0,
            },
            EntityKind::Projectile(Projectile::Bullet) => SpriteKey::Bullet,
            EntityKind::Projectile(Projectile::Nuke { .. }) => SpriteKey::Nuke,
            EntityKind::Hazard(tier) => SpriteKey::Asteroid(*tier),
            EntityKind::Pickup(PickupKind::Shield) => SpriteKey::ShieldFloater,
            EntityKind::Pickup(PickupKind::Nuke) => SpriteKey::NukeFloater,
            EntityKind::Debris => {
                let elapsed = (DEBRIS_FRAMES * DEBRIS_SLOW_MO).saturating_sub(self.expiry);
                SpriteKey::Cloud {
                    frame: (elapsed / DEBRIS_SLOW_MO).min(DEBRIS_FRAMES - 1),
                }
            }
            EntityKind::Star { brightness } => SpriteKey::Star {
                brightness: *brightness,
            },
        }
    }
}

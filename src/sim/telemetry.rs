//! Read-only view of the world for renderers and UI
//!
//! A [`Snapshot`] carries everything an external renderer needs to draw one
//! frame: HUD values, on-screen status lines, every live entity with its
//! sprite key (and screen polygon for vector shapes), and radar blips.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind, PickupKind, Projectile, SpriteKey, Team, Tier};
use super::geometry::{AspectRatio, render_polygon};
use super::state::World;
use crate::consts::*;

/// Lines shown on the game-over screen
const GAME_OVER_LINES: [&str; 8] = [
    "GAME OVER",
    "use the arrow keys to turn and thrust",
    "use the space bar to fire",
    "'S' to Start",
    "'P' to Pause",
    "'Q' to Quit",
    "'M' to toggle music",
    "'A' to toggle radar",
];

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub score: i64,
    pub level: u32,
    pub universe: String,
    pub lives: i32,
    pub shield_percent: u32,
    pub nuke_percent: u32,
    pub max_speed: bool,
    pub nuke_ready: bool,
    pub frame: u64,
    pub paused: bool,
    pub game_over: bool,
    pub radar: bool,
    /// Messages for the middle of the screen
    pub status_lines: Vec<String>,
}

impl Telemetry {
    pub fn capture(world: &World) -> Self {
        let ship = world.ship_state();
        Self {
            score: world.score,
            level: world.level,
            universe: world.universe.name().to_string(),
            lives: world.lives,
            shield_percent: ship.shield_percent(),
            nuke_percent: ship.nuke_percent(),
            max_speed: ship.max_speed_attained,
            nuke_ready: ship.nuke_meter > 0,
            frame: world.frame,
            paused: world.paused,
            game_over: world.is_game_over(),
            radar: world.radar,
            status_lines: status_lines(world),
        }
    }

    /// "Level : [n]  NAME"
    pub fn level_text(&self) -> String {
        format!("Level : [{}]  {}", self.level, self.universe)
    }

    /// "Score : 12,345"
    pub fn score_text(&self) -> String {
        format!("Score : {}", group_thousands(self.score))
    }
}

fn status_lines(world: &World) -> Vec<String> {
    if world.is_game_over() {
        return GAME_OVER_LINES.iter().map(|s| s.to_string()).collect();
    }
    if world.paused {
        return vec!["Game Paused".to_string()];
    }

    let ship = world.ship_state();
    let mut lines = Vec::new();
    if ship.show_level > 0 {
        lines.push(format!("Level : [{}]  {}", world.level, world.universe.name()));
    }
    if ship.max_speed_attained {
        lines.push("WARNING - SLOW DOWN".to_string());
    }
    if ship.nuke_meter > 0 {
        lines.push("PRESS F for NUKE".to_string());
    }
    lines
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub id: EntityId,
    pub team: Team,
    pub center: IVec2,
    pub radius: i32,
    pub orientation: i32,
    pub sprite: SpriteKey,
    /// Screen-space outline; empty for raster sprites
    pub polygon: Vec<IVec2>,
}

/// Radar blip category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlipKind {
    Debris,
    Asteroid(Tier),
    Pickup(PickupKind),
    Ship { shielded: bool },
    Nuke,
    Bullet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blip {
    pub kind: BlipKind,
    pub position: IVec2,
}

/// Minimap of the whole universe, anchored at the top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Radar {
    /// Whole-universe box
    pub size: IVec2,
    /// The one-screen viewport box
    pub viewport: IVec2,
    pub blips: Vec<Blip>,
}

impl Radar {
    pub fn capture(world: &World) -> Self {
        let multiplier = world.universe.multiplier();
        let aspect = AspectRatio::for_universe(multiplier).as_dvec2();
        let screen = IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT).as_dvec2();
        let size = (screen * MINI_MAP_PERCENT * aspect).round().as_ivec2();
        let scale = MINI_MAP_PERCENT * aspect / multiplier.as_dvec2();

        let blips = world
            .entities()
            .map(|entity| {
                let kind = match &entity.kind {
                    EntityKind::Ship(ship) => BlipKind::Ship {
                        shielded: ship.shield > 0,
                    },
                    EntityKind::Projectile(Projectile::Nuke { .. }) => BlipKind::Nuke,
                    EntityKind::Projectile(Projectile::Bullet) => BlipKind::Bullet,
                    EntityKind::Hazard(tier) => BlipKind::Asteroid(*tier),
                    EntityKind::Pickup(kind) => BlipKind::Pickup(*kind),
                    EntityKind::Debris | EntityKind::Star { .. } => BlipKind::Debris,
                };
                Blip {
                    kind,
                    position: (entity.center.as_dvec2() * scale).round().as_ivec2(),
                }
            })
            .collect();

        Self {
            size,
            viewport: size / multiplier,
            blips,
        }
    }
}

/// Everything needed to present one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub telemetry: Telemetry,
    /// Back to front
    pub items: Vec<RenderItem>,
    /// Present only while the radar is on
    pub radar: Option<Radar>,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        let items = world
            .entities()
            .map(|entity| RenderItem {
                id: entity.id,
                team: entity.team(),
                center: entity.center,
                radius: entity.radius,
                orientation: entity.orientation,
                sprite: entity.sprite_key(),
                polygon: if entity.outline.is_empty() {
                    Vec::new()
                } else {
                    render_polygon(&entity.outline, entity.center, entity.radius, entity.orientation)
                },
            })
            .collect();

        Self {
            telemetry: Telemetry::capture(world),
            items,
            radar: world.radar.then(|| Radar::capture(world)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::NullSink;
    use crate::sim::level::Universe;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-20000), "-20,000");
    }

    #[test]
    fn test_status_lines_after_level_start() {
        let mut world = World::new(3);
        tick(&mut world, &TickInput::default(), &mut NullSink);
        let telemetry = Telemetry::capture(&world);
        assert_eq!(telemetry.level, 1);
        assert_eq!(telemetry.universe, "CENTER");
        assert_eq!(telemetry.status_lines, vec!["Level : [1]  CENTER".to_string()]);
        assert_eq!(telemetry.level_text(), "Level : [1]  CENTER");
        assert!(!telemetry.nuke_ready);
    }

    #[test]
    fn test_nuke_and_speed_warnings() {
        let mut world = World::new(3);
        if let Some(ship) = world.ship_mut().ship_state_mut() {
            ship.show_level = 0;
            ship.nuke_meter = 300;
            ship.max_speed_attained = true;
        }
        let telemetry = Telemetry::capture(&world);
        assert_eq!(telemetry.nuke_percent, 50);
        assert!(telemetry.nuke_ready);
        assert!(telemetry.max_speed);
        assert_eq!(
            telemetry.status_lines,
            vec!["WARNING - SLOW DOWN".to_string(), "PRESS F for NUKE".to_string()]
        );
    }

    #[test]
    fn test_game_over_and_pause_screens() {
        let mut world = World::new(3);
        world.paused = true;
        assert_eq!(Telemetry::capture(&world).status_lines, vec!["Game Paused".to_string()]);
        world.lives = 0;
        let telemetry = Telemetry::capture(&world);
        assert!(telemetry.game_over);
        assert_eq!(telemetry.status_lines[0], "GAME OVER");
    }

    #[test]
    fn test_snapshot_items_and_radar() {
        let mut world = World::new(8);
        tick(&mut world, &TickInput::default(), &mut NullSink);

        let snapshot = Snapshot::capture(&world);
        assert_eq!(snapshot.items.len(), world.entity_count());
        assert!(snapshot.radar.is_none());
        // Ship drawn last
        assert_eq!(snapshot.items.last().map(|i| i.team), Some(Team::Ship));
        let rock = snapshot
            .items
            .iter()
            .find(|i| matches!(i.sprite, SpriteKey::Asteroid(_)));
        assert!(rock.is_some_and(|r| r.polygon.len() >= 25));

        world.radar = true;
        world.universe = Universe::Horizontal;
        let radar = Snapshot::capture(&world).radar.unwrap();
        assert_eq!(radar.blips.len(), world.entity_count());
        assert_eq!(radar.size, IVec2::new(698, 147));
        assert_eq!(radar.viewport, IVec2::new(232, 147));
    }

    #[test]
    fn test_telemetry_serializes() {
        let world = World::new(1);
        let json = serde_json::to_string(&Telemetry::capture(&world)).unwrap();
        assert!(json.contains("\"lives\":3"));
    }
}

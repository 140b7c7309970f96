//! Void Drift - an arcade space simulation core
//!
//! Core modules:
//! - `sim`: Fixed-cadence simulation (entities, motion, collisions, levels, world state)
//! - `audio`: Sound-effect sink driven by simulation lifecycle events
//! - `settings`: Persisted user preferences
//! - `error`: Errors from the fallible edges (settings I/O, simulation thread)

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Render-area (screen) dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 1500;
    pub const SCREEN_HEIGHT: i32 = 950;

    /// Milliseconds between simulation ticks
    pub const ANIMATION_DELAY_MS: u64 = 40;
    /// Nominal tick rate derived from the animation delay
    pub const FRAMES_PER_SECOND: u64 = 1000 / ANIMATION_DELAY_MS;

    /// Lives at the start of a game
    pub const STARTING_LIVES: i32 = 3;

    /// Degrees the ship turns per tick while turning
    pub const TURN_STEP: i32 = 11;
    /// Ticks of protection (and level banner) after a spawn or level clear
    pub const INITIAL_SPAWN_TIME: u32 = 48;
    /// Shield ticks granted by a shield pickup
    pub const MAX_SHIELD: u32 = 200;
    /// Nuke-meter ticks granted by a nuke pickup
    pub const MAX_NUKE: u32 = 600;
    /// Ship radius when at rest
    pub const SHIP_MIN_RADIUS: i32 = 28;
    /// Thrust added per tick along the ship's heading
    pub const SHIP_THRUST: f64 = 0.85;
    /// Thrust is rejected once the resulting speed would reach this
    pub const SHIP_MAX_VELOCITY: i32 = 39;

    /// Bullet defaults
    pub const BULLET_RADIUS: i32 = 6;
    pub const BULLET_EXPIRY: u32 = 20;
    pub const BULLET_FIRE_POWER: f64 = 35.0;
    /// Ship recoil is the fire vector divided by this
    pub const BULLET_KICK_BACK_DIVISOR: f64 = 36.0;

    /// Nuke defaults
    pub const NUKE_EXPIRY: u32 = 60;
    pub const NUKE_FIRE_POWER: f64 = 11.0;
    pub const NUKE_TRAVEL_RADIUS: i32 = 17;
    pub const NUKE_GROW_STEP: i32 = 8;
    pub const NUKE_SHRINK_STEP: i32 = 11;

    /// Radius of a tier-0 asteroid; smaller tiers divide it
    pub const ASTEROID_LARGE_RADIUS: i32 = 110;
    /// Points per asteroid removal are this times (tier + 1)
    pub const ASTEROID_POINTS: i64 = 10;
    /// Points per cleared level are this times the level just cleared
    pub const LEVEL_CLEAR_BONUS: i64 = 10_000;

    /// Floater (pickup) defaults
    pub const FLOATER_RADIUS: i32 = 50;
    pub const SHIELD_FLOATER_EXPIRY: u32 = 260;
    pub const NUKE_FLOATER_EXPIRY: u32 = 120;
    /// Shield pickups spawn every 25 seconds of simulated time
    pub const SHIELD_SPAWN_PERIOD: u64 = FRAMES_PER_SECOND * 25;
    /// Nuke pickups spawn every 12 seconds of simulated time
    pub const NUKE_SPAWN_PERIOD: u64 = FRAMES_PER_SECOND * 12;

    /// Debris cloud animation: frame count and ticks each frame is held
    pub const DEBRIS_FRAMES: u32 = 9;
    pub const DEBRIS_SLOW_MO: u32 = 3;
    pub const DEBRIS_RADIUS_SCALE: f64 = 1.3;

    /// Background star field
    pub const STAR_COUNT: usize = 100;
    pub const STAR_MAX_BRIGHTNESS: u8 = 225;

    /// Radar size as a fraction of the screen
    pub const MINI_MAP_PERCENT: f64 = 0.31;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Unit heading vector for an orientation in degrees
#[inline]
pub fn heading(degrees: i32) -> DVec2 {
    polar_to_cartesian(1.0, f64::from(degrees).to_radians())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0), 0);
        assert_eq!(normalize_degrees(360), 0);
        assert_eq!(normalize_degrees(-11), 349);
        assert_eq!(normalize_degrees(731), 11);
    }

    #[test]
    fn test_heading() {
        let east = heading(0);
        assert!((east.x - 1.0).abs() < 1e-9);
        assert!(east.y.abs() < 1e-9);

        let south = heading(90);
        assert!(south.x.abs() < 1e-9);
        assert!((south.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_polar_round_trip() {
        let p = polar_to_cartesian(10.0, std::f64::consts::FRAC_PI_4);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 10.0).abs() < 1e-9);
        assert!((theta - std::f64::consts::FRAC_PI_4).abs() < 1e-9);
    }
}

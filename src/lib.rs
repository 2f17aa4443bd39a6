//! Cube Dash - A side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, level scrolling, game state)
//! - `levels`: Pattern library (level definitions loaded from JSON/text or built in)
//! - `catalog`: Obstacle and gravity zone kind tables
//! - `renderer`: Drawing sink interface consumed by an external renderer
//! - `tuning`: Data-driven game balance
//! - `settings`: Cosmetic preferences

pub mod catalog;
pub mod error;
pub mod levels;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use catalog::{Catalog, CollisionProfile, ItemKind, ObstacleKind, ZoneKind};
pub use error::{ConfigError, LevelLoadError};
pub use levels::{LevelDefinition, LevelLibrary, PatternEntry};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Screen width (the ground line spans it)
    pub const SCREEN_WIDTH: f32 = 900.0;
    /// Y coordinate of the ground line (screen space, y grows downward)
    pub const GROUND_Y: f32 = 320.0;

    /// Physics
    pub const BASE_GRAVITY: f32 = 0.8;
    pub const BASE_JUMP_IMPULSE: f32 = -12.0;
    pub const SCROLL_SPEED: f32 = 6.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_X: f32 = 100.0;
    pub const MAX_JUMP_CHARGES: u8 = 2;

    /// Landing forgiveness: bottom edge may sit this far below a platform top (plus velocity)
    pub const LANDING_TOLERANCE: f32 = 10.0;
    /// Player bottom must sink this far below a platform top before it counts as a hit
    pub const PLATFORM_DEATH_DEPTH: f32 = 5.0;
    /// Tolerance used when deciding the player rests on the ground line
    pub const GROUND_EPSILON: f32 = 0.1;
    /// Feet probe: horizontal inset, height and top-proximity tolerance
    pub const FEET_INSET: f32 = 4.0;
    pub const FEET_HEIGHT: f32 = 3.0;
    pub const FEET_TOLERANCE: f32 = 6.0;
    /// Falling faster than this when hitting the ground counts as a landing
    pub const HARD_LANDING_SPEED: f32 = 2.0;

    /// Rotation rates (degrees per tick)
    pub const SPIN_RATE: f32 = 6.0;
    pub const TUMBLE_RATE: f32 = 8.0;
    /// Angle applied when the last jump charge is spent
    pub const TUMBLE_KICK: f32 = 30.0;

    /// Level layout
    pub const LEAD_DISTANCE: f32 = 1200.0;
    pub const ZONE_GAP: f32 = 50.0;
    pub const OBSTACLE_GAP: f32 = 70.0;
    pub const DEFAULT_SPACING: u32 = 200;
    /// Instances at or left of this x are retired
    pub const TRAILING_THRESHOLD: f32 = -100.0;

    /// Zone trigger region
    pub const ZONE_WIDTH: f32 = 40.0;
    pub const ZONE_HEIGHT: f32 = 60.0;
    pub const ZONE_LIFT: f32 = 20.0;
    /// Zone animation phase step (radians per tick)
    pub const ZONE_PHASE_STEP: f32 = 0.2;

    /// Cosmetic dust cadence (ticks of resting contact between puffs)
    pub const DUST_INTERVAL: u32 = 6;
}

/// Wrap an animation phase into [0, 2π)
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    phase.rem_euclid(std::f32::consts::TAU)
}

/// Clamp an index into `[0, len - 1]` (returns 0 for an empty range)
#[inline]
pub fn clamp_index(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.clamp(0, len as i64 - 1) as usize
}

//! Space Invader - a wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ships, projectiles, collisions, waves)
//! - `app`: Screen state machine and per-frame entry point
//! - `renderer`: Backend-agnostic render commands
//! - `platform`: Windowing/input collaborator seam and frame pacing
//! - `assets`: Validated sprite and collision mask table
//! - `settings`: Tuning and playfield configuration

pub mod app;
pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, FrameInput, Screen};
pub use assets::{AssetTable, SpriteKey};
pub use error::{GameError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame rate target; the simulation advances one tick per frame
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: i32 = 1280;
    pub const PLAYFIELD_HEIGHT: i32 = 720;

    /// Per-tick velocities (pixels)
    pub const PLAYER_VELOCITY: i32 = 8;
    pub const ENEMY_VELOCITY: i32 = 1;
    pub const LASER_VELOCITY: i32 = 4;

    /// Ticks between shots
    pub const COOLDOWN_LIMIT: u32 = 30;

    pub const SHIP_MAX_HEALTH: i32 = 100;
    pub const BODY_COLLISION_DAMAGE: i32 = 10;
    /// Gap below the player sprite reserved for its health bar
    pub const HEALTH_BAR_MARGIN: i32 = 20;

    /// Damage per projectile hit
    pub const NORMAL_DAMAGE: i32 = 10;
    pub const CHARGED_DAMAGE: i32 = 20;

    pub const INITIAL_LIVES: i32 = 3;
    pub const INITIAL_WAVE_LENGTH: u32 = 5;
    pub const WAVE_GROWTH: u32 = 5;
    pub const FINAL_LEVEL: u32 = 10;

    /// Level at which enemy fire rate stops scaling
    pub const FIRE_RATE_LEVEL_CAP: u32 = 11;

    /// Procedural sprite sizes (pixels)
    pub const SMALL_SHIP_SIZE: i32 = 60;
    pub const MEDIUM_SHIP_SIZE: i32 = 80;
    pub const LARGE_SHIP_SIZE: i32 = 100;
    pub const LASER_WIDTH: i32 = 10;
    pub const LASER_HEIGHT: i32 = 40;
}

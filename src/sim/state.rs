//! Game state and core simulation types
//!
//! Everything the Wave Director mutates between ticks lives on `GameState`.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ship::Ship;
use crate::assets::AssetTable;
use crate::consts::*;
use crate::error::{GameError, Result};
use crate::settings::Settings;

/// Which side a ship fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipSide {
    Player,
    Enemy,
}

impl ShipSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipSide::Player => "player",
            ShipSide::Enemy => "enemy",
        }
    }

    /// Sign of projectile travel along y: player shots go up, enemy shots down
    pub fn projectile_direction(&self) -> i32 {
        match self {
            ShipSide::Player => -1,
            ShipSide::Enemy => 1,
        }
    }
}

/// Enemy hull size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipTier {
    Small,
    Medium,
    Large,
}

impl ShipTier {
    pub const ALL: [ShipTier; 3] = [ShipTier::Small, ShipTier::Medium, ShipTier::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipTier::Small => "small",
            ShipTier::Medium => "medium",
            ShipTier::Large => "large",
        }
    }

    /// Edge length of the procedural sprite for this tier
    pub fn sprite_size(&self) -> i32 {
        match self {
            ShipTier::Small => SMALL_SHIP_SIZE,
            ShipTier::Medium => MEDIUM_SHIP_SIZE,
            ShipTier::Large => LARGE_SHIP_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectileKind {
    #[default]
    Normal,
    Charged,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 2] = [ProjectileKind::Normal, ProjectileKind::Charged];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::Normal => "normal",
            ProjectileKind::Charged => "charged",
        }
    }

    /// Health removed from the ship this projectile strikes
    pub fn damage(&self) -> i32 {
        match self {
            ProjectileKind::Normal => NORMAL_DAMAGE,
            ProjectileKind::Charged => CHARGED_DAMAGE,
        }
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives or health; frozen while the banner shows
    Lost,
    /// Final level cleared; frozen while the banner shows
    Won,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WaveSpawned { level: u32, enemies: u32 },
    /// A player projectile destroyed an enemy
    EnemyDestroyed { tier: ShipTier },
    /// An enemy projectile struck the player
    PlayerHit { damage: i32, health: i32 },
    /// An enemy flew into the player
    PlayerRammed { damage: i32, health: i32 },
    /// An enemy slipped past the bottom of the playfield
    LifeLost { lives: i32 },
    GameLost,
    GameWon,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    pub(crate) assets: AssetTable,
    /// Waves cleared so far; the wave in flight is `level`
    pub level: u32,
    pub lives: i32,
    /// Size of the most recently spawned wave
    pub wave_length: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks spent in the current Lost/Won phase
    pub phase_ticks: u32,
    pub player: Ship,
    pub enemies: Vec<Ship>,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run. Fails if the settings are invalid, the player sprite
    /// is missing, or the playfield cannot hold the player and its health bar.
    pub fn new(settings: Settings, assets: AssetTable, seed: u64) -> Result<Self> {
        settings.validate()?;

        let sprite = assets.ship(ShipTier::Large, ShipSide::Player)?;
        if settings.playfield_width < sprite.width() {
            return Err(GameError::invalid(
                "playfield_width",
                format!("{} is narrower than the player sprite", settings.playfield_width),
            ));
        }
        if settings.playfield_height < sprite.height() + settings.health_bar_margin {
            return Err(GameError::invalid(
                "playfield_height",
                format!(
                    "{} cannot fit the player sprite and its health bar",
                    settings.playfield_height
                ),
            ));
        }
        let start = IVec2::new(
            (settings.playfield_width - sprite.width()) / 2,
            settings.playfield_height - sprite.height() - settings.health_bar_margin,
        );
        let player = Ship::player(start, settings.player_max_health, &assets)?;

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 0,
            lives: settings.initial_lives,
            wave_length: settings.initial_wave_length,
            time_ticks: 0,
            phase: GamePhase::Playing,
            phase_ticks: 0,
            player,
            enemies: Vec::new(),
            events: Vec::new(),
            settings,
            assets,
        })
    }

    /// True once the run is over and its banner has been shown long enough
    pub fn outcome_expired(&self) -> bool {
        self.phase != GamePhase::Playing && self.phase_ticks >= self.settings.outcome_grace_ticks()
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn assets(&self) -> &AssetTable {
        &self.assets
    }
}

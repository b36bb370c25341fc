//! Game settings and tuning
//!
//! Loaded once at startup from an optional JSON file and validated before
//! any entity is built. Nothing here changes while a game is running.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// Simulation and playfield configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub playfield_width: i32,
    pub playfield_height: i32,
    /// Frame rate target; one tick per frame
    pub ticks_per_second: u32,

    // === Motion (pixels per tick) ===
    pub player_velocity: i32,
    pub enemy_velocity: i32,
    pub laser_velocity: i32,

    // === Ships ===
    /// Ticks a ship waits between shots
    pub cooldown_limit: u32,
    pub player_max_health: i32,
    pub enemy_health: i32,
    /// Damage dealt to the player when an enemy rams it
    pub body_collision_damage: i32,
    /// Space kept free below the player for the health bar
    pub health_bar_margin: i32,

    // === Waves ===
    pub initial_lives: i32,
    pub initial_wave_length: u32,
    pub wave_growth: u32,
    /// Left edge of the enemy spawn band
    pub spawn_margin_left: i32,
    /// Distance from the right edge the spawn band stops at
    pub spawn_margin_right: i32,
    /// Lowest spawn row, measured upward from the top of the playfield
    pub spawn_ceiling: i32,
    /// Clearing this level wins the game; `None` plays forever
    pub final_level: Option<u32>,

    // === Flow ===
    /// How long the game-over / victory banner stays up
    pub outcome_grace_seconds: u32,
    /// Any click on the menu starts a game, not just the Play button
    pub menu_any_click: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,

            player_velocity: PLAYER_VELOCITY,
            enemy_velocity: ENEMY_VELOCITY,
            laser_velocity: LASER_VELOCITY,

            cooldown_limit: COOLDOWN_LIMIT,
            player_max_health: SHIP_MAX_HEALTH,
            enemy_health: SHIP_MAX_HEALTH,
            body_collision_damage: BODY_COLLISION_DAMAGE,
            health_bar_margin: HEALTH_BAR_MARGIN,

            initial_lives: INITIAL_LIVES,
            initial_wave_length: INITIAL_WAVE_LENGTH,
            wave_growth: WAVE_GROWTH,
            spawn_margin_left: 50,
            spawn_margin_right: 100,
            spawn_ceiling: 100,
            final_level: Some(FINAL_LEVEL),

            outcome_grace_seconds: 3,
            menu_any_click: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing fields fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Ticks the Lost/Won banner is held before returning to the menu
    pub fn outcome_grace_ticks(&self) -> u32 {
        self.outcome_grace_seconds * self.ticks_per_second
    }

    /// Reject configurations that would produce undefined motion or an
    /// empty spawn band
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(GameError::invalid("ticks_per_second", "must be non-zero"));
        }
        for (field, value) in [
            ("player_velocity", self.player_velocity),
            ("enemy_velocity", self.enemy_velocity),
            ("laser_velocity", self.laser_velocity),
        ] {
            if value <= 0 {
                return Err(GameError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        if self.cooldown_limit == 0 {
            return Err(GameError::invalid("cooldown_limit", "must be non-zero"));
        }
        if self.player_max_health <= 0 {
            return Err(GameError::invalid("player_max_health", "must be positive"));
        }
        if self.enemy_health <= 0 {
            return Err(GameError::invalid("enemy_health", "must be positive"));
        }
        if self.body_collision_damage < 0 {
            return Err(GameError::invalid("body_collision_damage", "must not be negative"));
        }
        if self.initial_lives <= 0 {
            return Err(GameError::invalid("initial_lives", "must be positive"));
        }
        if self.health_bar_margin < 0 {
            return Err(GameError::invalid("health_bar_margin", "must not be negative"));
        }
        if self.spawn_ceiling < 0 {
            return Err(GameError::invalid("spawn_ceiling", "must not be negative"));
        }
        if self.playfield_height <= 0 {
            return Err(GameError::invalid("playfield_height", "must be positive"));
        }
        if self.playfield_width - self.spawn_margin_right < self.spawn_margin_left {
            return Err(GameError::invalid(
                "playfield_width",
                format!(
                    "{} leaves no room for the spawn band [{}, width - {}]",
                    self.playfield_width, self.spawn_margin_left, self.spawn_margin_right
                ),
            ));
        }
        if self.final_level == Some(0) {
            return Err(GameError::invalid("final_level", "must be at least 1"));
        }
        if self.outcome_grace_seconds == 0 {
            return Err(GameError::invalid("outcome_grace_seconds", "must be non-zero"));
        }
        if self
            .outcome_grace_seconds
            .checked_mul(self.ticks_per_second)
            .is_none()
        {
            return Err(GameError::invalid(
                "outcome_grace_seconds",
                "grace period in ticks overflows",
            ));
        }
        if self
            .ticks_per_second
            .checked_mul(FIRE_RATE_LEVEL_CAP)
            .is_none()
        {
            return Err(GameError::invalid("ticks_per_second", "too large"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.outcome_grace_ticks(), 180);
    }

    #[test]
    fn test_rejects_zero_frame_rate() {
        let settings = Settings {
            ticks_per_second: 0,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidSettings {
                field: "ticks_per_second",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_velocity() {
        let settings = Settings {
            laser_velocity: -4,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSettings {
                field: "laser_velocity",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_narrow_playfield() {
        let settings = Settings {
            playfield_width: 120,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_overflowing_tick_rate() {
        let settings = Settings {
            ticks_per_second: u32::MAX / 2,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSettings {
                field: "outcome_grace_seconds",
                ..
            })
        ));

        let settings = Settings {
            ticks_per_second: u32::MAX / 4,
            outcome_grace_seconds: 1,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(GameError::InvalidSettings {
                field: "ticks_per_second",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "playfield_width": 800, "final_level": null }"#).unwrap();
        assert_eq!(settings.playfield_width, 800);
        assert_eq!(settings.final_level, None);
        assert_eq!(settings.cooldown_limit, COOLDOWN_LIMIT);
    }
}

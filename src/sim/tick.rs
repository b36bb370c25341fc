//! Fixed timestep simulation tick
//!
//! The Wave Director: advances one frame of play, resolves collisions and
//! spawns the next wave once the field is clear.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Entity, overlaps};
use super::ship::Ship;
use super::state::{GameEvent, GamePhase, GameState, ProjectileKind, ShipTier};
use crate::consts::FIRE_RATE_LEVEL_CAP;
use crate::error::Result;

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<()> {
    // Lost/Won freeze everything but the banner timer
    if state.phase != GamePhase::Playing {
        state.phase_ticks = state.phase_ticks.saturating_add(1);
        return Ok(());
    }

    if update_outcome(state) {
        return Ok(());
    }

    state.time_ticks += 1;

    if state.enemies.is_empty() {
        generate_wave(state)?;
    }

    apply_input(state, input);
    update_enemies(state);
    update_player_projectiles(state);

    Ok(())
}

/// Enter Lost or Won if the run just ended. Returns true on transition.
fn update_outcome(state: &mut GameState) -> bool {
    if state.lives <= 0 || state.player.health <= 0 {
        log::info!(
            "Game lost at level {} (lives {}, health {})",
            state.level,
            state.lives,
            state.player.health
        );
        state.phase = GamePhase::Lost;
        state.phase_ticks = 0;
        state.events.push(GameEvent::GameLost);
        return true;
    }

    if state.settings.final_level == Some(state.level) && state.enemies.is_empty() {
        log::info!("Final level {} cleared", state.level);
        state.phase = GamePhase::Won;
        state.phase_ticks = 0;
        state.events.push(GameEvent::GameWon);
        return true;
    }

    false
}

/// Level up and spawn the next wave above the playfield
pub fn generate_wave(state: &mut GameState) -> Result<()> {
    state.level += 1;
    state.wave_length += state.settings.wave_growth;

    let settings = &state.settings;
    let x_range = settings.spawn_margin_left..=settings.playfield_width - settings.spawn_margin_right;
    // Higher levels spawn further back so the wave trickles in
    let ceiling = -settings.spawn_ceiling;
    let deepest = (-2 * settings.playfield_height * state.level as i32 / 5).min(ceiling);

    let mut wave = Vec::with_capacity(state.wave_length as usize);
    for _ in 0..state.wave_length {
        let x = state.rng.random_range(x_range.clone());
        let y = state.rng.random_range(deepest..=ceiling);
        let tier = ShipTier::ALL[state.rng.random_range(0..ShipTier::ALL.len())];
        let kind = match tier {
            ShipTier::Small | ShipTier::Large => ProjectileKind::Normal,
            ShipTier::Medium => {
                ProjectileKind::ALL[state.rng.random_range(0..ProjectileKind::ALL.len())]
            }
        };
        wave.push(Ship::enemy(
            IVec2::new(x, y),
            tier,
            kind,
            settings.enemy_health,
            &state.assets,
        )?);
    }

    log::info!(
        "Level {}: spawned {} enemies between y={} and y={}",
        state.level,
        wave.len(),
        deepest,
        ceiling
    );
    state.events.push(GameEvent::WaveSpawned {
        level: state.level,
        enemies: wave.len() as u32,
    });
    state.enemies.extend(wave);
    Ok(())
}

/// Move the player, clamped inside the playfield with room for the health
/// bar, and fire on request
fn apply_input(state: &mut GameState, input: &TickInput) {
    let settings = &state.settings;
    let player = &mut state.player;
    let v = settings.player_velocity;

    let mut delta = IVec2::ZERO;
    if input.left {
        delta.x -= v;
    }
    if input.right {
        delta.x += v;
    }
    if input.up {
        delta.y -= v;
    }
    if input.down {
        delta.y += v;
    }

    let max = IVec2::new(
        settings.playfield_width - player.width(),
        settings.playfield_height - player.height() - settings.health_bar_margin,
    )
    .max(IVec2::ZERO);
    player.pos = (player.pos + delta).clamp(IVec2::ZERO, max);

    if input.fire {
        player.shoot();
    }
}

/// Chance denominator for an enemy firing this tick
fn enemy_fire_odds(ticks_per_second: u32, level: u32) -> u32 {
    let remaining = FIRE_RATE_LEVEL_CAP.saturating_sub(level).max(1);
    ticks_per_second * remaining
}

/// Descend, shoot, and resolve every enemy against the player
fn update_enemies(state: &mut GameState) {
    let settings = &state.settings;
    let height = settings.playfield_height;
    let odds = enemy_fire_odds(settings.ticks_per_second, state.level);
    let player = std::slice::from_mut(&mut state.player);

    // Removal decisions are collected and applied after the pass
    let mut removed = vec![false; state.enemies.len()];

    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        enemy.move_by(settings.enemy_velocity);

        let hits = enemy.move_projectiles(
            settings.laser_velocity,
            height,
            settings.cooldown_limit,
            player,
        );
        for _ in hits {
            let damage = enemy.projectile_kind.damage();
            log::debug!("Player hit for {} (health {})", damage, player[0].health);
            state.events.push(GameEvent::PlayerHit {
                damage,
                health: player[0].health,
            });
        }

        if state.rng.random_range(0..odds) == 0 {
            enemy.shoot();
        }

        if overlaps(&*enemy, &player[0]) {
            player[0].health -= settings.body_collision_damage;
            log::debug!("Enemy rammed the player (health {})", player[0].health);
            state.events.push(GameEvent::PlayerRammed {
                damage: settings.body_collision_damage,
                health: player[0].health,
            });
            removed[i] = true;
        } else if enemy.bottom() > height {
            state.lives -= 1;
            log::debug!("Enemy escaped, {} lives left", state.lives);
            state.events.push(GameEvent::LifeLost { lives: state.lives });
            removed[i] = true;
        }
    }

    let mut removed = removed.into_iter();
    state.enemies.retain(|_| !removed.next().unwrap_or(false));
}

/// Fly the player's projectiles; any enemy they touch is destroyed
fn update_player_projectiles(state: &mut GameState) {
    let settings = &state.settings;
    let struck = state.player.move_projectiles(
        settings.laser_velocity,
        settings.playfield_height,
        settings.cooldown_limit,
        &mut state.enemies,
    );
    if struck.is_empty() {
        return;
    }

    let mut destroyed = vec![false; state.enemies.len()];
    for &i in &struck {
        destroyed[i] = true;
        if let Some(tier) = state.enemies[i].tier() {
            state.events.push(GameEvent::EnemyDestroyed { tier });
        }
    }
    log::debug!("Destroyed {} enemies", struck.len());

    let mut destroyed = destroyed.into_iter();
    state.enemies.retain(|_| !destroyed.next().unwrap_or(false));
}

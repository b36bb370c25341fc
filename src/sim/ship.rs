//! Ships and their projectiles
//!
//! Player and enemy ships share one record; the handful of behaviors that
//! differ (where shots spawn, what a hit does) match on `ShipVariant`.

use glam::IVec2;

use super::collision::{Entity, overlaps};
use super::state::{ProjectileKind, ShipSide, ShipTier};
use crate::assets::{AssetTable, SpriteAsset};
use crate::error::Result;

/// Variant-specific ship data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipVariant {
    Player { max_health: i32 },
    Enemy { tier: ShipTier },
}

/// A laser bolt owned by the ship that fired it
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: IVec2,
    pub kind: ProjectileKind,
    sprite: SpriteAsset,
}

impl Projectile {
    pub fn new(pos: IVec2, kind: ProjectileKind, sprite: SpriteAsset) -> Self {
        Self { pos, kind, sprite }
    }

    #[inline]
    pub fn move_by(&mut self, dy: i32) {
        self.pos.y += dy;
    }

    /// Outside `[0, playfield_height]`; both bounds count as on screen
    #[inline]
    pub fn is_off_screen(&self, playfield_height: i32) -> bool {
        self.pos.y < 0 || self.pos.y > playfield_height
    }

    #[inline]
    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }
}

impl Entity for Projectile {
    fn position(&self) -> IVec2 {
        self.pos
    }

    fn sprite(&self) -> &SpriteAsset {
        &self.sprite
    }
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: IVec2,
    pub health: i32,
    pub projectile_kind: ProjectileKind,
    /// 0 = ready to fire; counts up after a shot until the limit
    pub cooldown: u32,
    /// In firing order
    pub projectiles: Vec<Projectile>,
    pub variant: ShipVariant,
    sprite: SpriteAsset,
    projectile_sprite: SpriteAsset,
}

impl Ship {
    /// The player's ship: large hull, normal lasers, full health
    pub fn player(pos: IVec2, max_health: i32, assets: &AssetTable) -> Result<Self> {
        let side = ShipSide::Player;
        let kind = ProjectileKind::Normal;
        Ok(Self {
            pos,
            health: max_health,
            projectile_kind: kind,
            cooldown: 0,
            projectiles: Vec::new(),
            variant: ShipVariant::Player { max_health },
            sprite: assets.ship(ShipTier::Large, side)?.clone(),
            projectile_sprite: assets.projectile(kind, side)?.clone(),
        })
    }

    pub fn enemy(
        pos: IVec2,
        tier: ShipTier,
        kind: ProjectileKind,
        health: i32,
        assets: &AssetTable,
    ) -> Result<Self> {
        let side = ShipSide::Enemy;
        Ok(Self {
            pos,
            health,
            projectile_kind: kind,
            cooldown: 0,
            projectiles: Vec::new(),
            variant: ShipVariant::Enemy { tier },
            sprite: assets.ship(tier, side)?.clone(),
            projectile_sprite: assets.projectile(kind, side)?.clone(),
        })
    }

    pub fn side(&self) -> ShipSide {
        match self.variant {
            ShipVariant::Player { .. } => ShipSide::Player,
            ShipVariant::Enemy { .. } => ShipSide::Enemy,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.variant, ShipVariant::Player { .. })
    }

    pub fn tier(&self) -> Option<ShipTier> {
        match self.variant {
            ShipVariant::Enemy { tier } => Some(tier),
            ShipVariant::Player { .. } => None,
        }
    }

    pub fn max_health(&self) -> Option<i32> {
        match self.variant {
            ShipVariant::Player { max_health } => Some(max_health),
            ShipVariant::Enemy { .. } => None,
        }
    }

    /// Remaining health as a fraction of the maximum, for the health bar
    pub fn health_ratio(&self) -> f32 {
        match self.variant {
            ShipVariant::Player { max_health } if max_health > 0 => {
                (self.health as f32 / max_health as f32).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.sprite.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.sprite.height()
    }

    #[inline]
    pub fn can_shoot(&self) -> bool {
        self.cooldown == 0
    }

    /// Where a new projectile appears: centered horizontally, just outside
    /// the hull on the side the shot travels toward
    pub fn shooting_position(&self) -> IVec2 {
        let x = self.pos.x + (self.width() - self.projectile_sprite.width()) / 2;
        let y = match self.side() {
            ShipSide::Player => self.pos.y - self.projectile_sprite.height(),
            ShipSide::Enemy => self.pos.y + self.height(),
        };
        IVec2::new(x, y)
    }

    /// Fire if the cooldown allows. Returns whether a projectile spawned.
    pub fn shoot(&mut self) -> bool {
        if !self.can_shoot() {
            return false;
        }
        let projectile = Projectile::new(
            self.shooting_position(),
            self.projectile_kind,
            self.projectile_sprite.clone(),
        );
        self.projectiles.push(projectile);
        self.cooldown = 1;
        true
    }

    /// Step the cooldown once. After a shot, `limit` steps return it to 0.
    pub fn advance_cooldown(&mut self, limit: u32) {
        if self.cooldown >= limit {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
    }

    #[inline]
    pub fn move_by(&mut self, dy: i32) {
        self.pos.y += dy;
    }

    /// Advance the cooldown, then move every projectile `speed` pixels away
    /// from this ship's side and
    /// resolve it against `targets`.
    ///
    /// Off-screen projectiles are dropped. A projectile that overlaps a
    /// target is dropped and its damage is subtracted from that target's
    /// health; it strikes at most one target. Returns the index of the
    /// target struck by each hit, in projectile order.
    ///
    /// Player projectiles destroy what they hit, so a target struck by one
    /// cannot absorb a second projectile in the same pass.
    pub fn move_projectiles(
        &mut self,
        speed: i32,
        playfield_height: i32,
        cooldown_limit: u32,
        targets: &mut [Ship],
    ) -> Vec<usize> {
        self.advance_cooldown(cooldown_limit);

        let consumes_target = self.is_player();
        let velocity = self.side().projectile_direction() * speed;

        let mut struck: Vec<usize> = Vec::new();
        let mut spent = vec![false; self.projectiles.len()];

        for (i, projectile) in self.projectiles.iter_mut().enumerate() {
            projectile.move_by(velocity);
            if projectile.is_off_screen(playfield_height) {
                spent[i] = true;
                continue;
            }

            let hit = targets.iter().enumerate().position(|(t, target)| {
                !(consumes_target && struck.contains(&t)) && overlaps(projectile, target)
            });
            if let Some(t) = hit {
                targets[t].health -= projectile.damage();
                struck.push(t);
                spent[i] = true;
            }
        }

        let mut spent = spent.into_iter();
        self.projectiles.retain(|_| !spent.next().unwrap_or(false));
        struck
    }
}

impl Entity for Ship {
    fn position(&self) -> IVec2 {
        self.pos
    }

    fn sprite(&self) -> &SpriteAsset {
        &self.sprite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const HEIGHT: i32 = 720;

    fn assets() -> AssetTable {
        AssetTable::procedural()
    }

    fn enemy_at(x: i32, y: i32, kind: ProjectileKind) -> Ship {
        Ship::enemy(IVec2::new(x, y), ShipTier::Small, kind, 100, &assets()).unwrap()
    }

    fn player_at(x: i32, y: i32) -> Ship {
        Ship::player(IVec2::new(x, y), 100, &assets()).unwrap()
    }

    #[test]
    fn test_cooldown_cycle_reenables_shooting() {
        let mut ship = player_at(500, 500);
        assert!(ship.shoot());
        assert_eq!(ship.cooldown, 1);

        for _ in 0..COOLDOWN_LIMIT {
            assert!(!ship.can_shoot());
            ship.advance_cooldown(COOLDOWN_LIMIT);
        }
        assert_eq!(ship.cooldown, 0);
        assert!(ship.shoot());
        assert_eq!(ship.projectiles.len(), 2);
    }

    #[test]
    fn test_idle_cooldown_stays_ready() {
        let mut ship = player_at(500, 500);
        ship.advance_cooldown(COOLDOWN_LIMIT);
        assert_eq!(ship.cooldown, 0);
    }

    #[test]
    fn test_double_shot_in_window_fires_once() {
        let mut ship = player_at(500, 500);
        assert!(ship.shoot());
        assert!(!ship.shoot());
        assert_eq!(ship.projectiles.len(), 1);
    }

    #[test]
    fn test_player_shot_spawns_above_centered() {
        let mut ship = player_at(500, 500);
        ship.shoot();
        let p = &ship.projectiles[0];
        assert_eq!(p.pos.x, 500 + (LARGE_SHIP_SIZE - LASER_WIDTH) / 2);
        assert_eq!(p.pos.y, 500 - LASER_HEIGHT);
        assert_eq!(p.kind, ProjectileKind::Normal);
    }

    #[test]
    fn test_enemy_shot_spawns_below() {
        let mut ship = enemy_at(100, 50, ProjectileKind::Charged);
        ship.shoot();
        let p = &ship.projectiles[0];
        assert_eq!(p.pos.x, 100 + (SMALL_SHIP_SIZE - LASER_WIDTH) / 2);
        assert_eq!(p.pos.y, 50 + SMALL_SHIP_SIZE);
        assert_eq!(p.kind, ProjectileKind::Charged);
    }

    #[test]
    fn test_off_screen_bounds_are_inclusive() {
        let sprite = assets()
            .projectile(ProjectileKind::Normal, ShipSide::Player)
            .unwrap()
            .clone();
        let at = |y| Projectile::new(IVec2::new(0, y), ProjectileKind::Normal, sprite.clone());
        assert!(at(-1).is_off_screen(HEIGHT));
        assert!(!at(0).is_off_screen(HEIGHT));
        assert!(!at(HEIGHT).is_off_screen(HEIGHT));
        assert!(at(HEIGHT + 1).is_off_screen(HEIGHT));
    }

    #[test]
    fn test_projectiles_leaving_screen_are_dropped() {
        let mut ship = player_at(500, 45);
        ship.shoot();
        assert_eq!(ship.projectiles[0].pos.y, 5);
        let hits = ship.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut []);
        assert!(hits.is_empty());
        assert_eq!(ship.projectiles[0].pos.y, 1);
        ship.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut []);
        assert!(ship.projectiles.is_empty());
    }

    #[test]
    fn test_projectiles_travel_away_from_owner() {
        let mut player = player_at(500, 500);
        player.shoot();
        let player_shot = player.projectiles[0].pos.y;
        player.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut []);
        assert_eq!(player.projectiles[0].pos.y, player_shot - 4);

        let mut enemy = enemy_at(500, 100, ProjectileKind::Normal);
        enemy.shoot();
        let enemy_shot = enemy.projectiles[0].pos.y;
        enemy.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut []);
        assert_eq!(enemy.projectiles[0].pos.y, enemy_shot + 4);
    }

    #[test]
    fn test_move_projectiles_advances_cooldown() {
        let mut ship = player_at(500, 500);
        ship.shoot();
        ship.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut []);
        assert_eq!(ship.cooldown, 2);
    }

    #[test]
    fn test_enemy_projectile_damages_player() {
        let mut enemy = enemy_at(500, 300, ProjectileKind::Charged);
        enemy.shoot();
        let spawn = enemy.projectiles[0].pos;

        // Player hull directly under the shot
        let mut player = [player_at(spawn.x - 45, spawn.y + 10)];
        let hits = enemy.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut player);

        assert_eq!(hits, vec![0]);
        assert_eq!(player[0].health, 80);
        assert!(enemy.projectiles.is_empty());
    }

    #[test]
    fn test_player_projectile_strikes_one_enemy_once() {
        let mut player = player_at(500, 500);
        player.shoot();
        let spawn = player.projectiles[0].pos;

        // Two stacked enemies both under the bolt; only the first is struck
        let mut enemies = vec![
            enemy_at(spawn.x - 25, spawn.y - 50, ProjectileKind::Normal),
            enemy_at(spawn.x - 25, spawn.y - 40, ProjectileKind::Normal),
        ];
        let hits = player.move_projectiles(4, HEIGHT, COOLDOWN_LIMIT, &mut enemies);

        assert_eq!(hits, vec![0]);
        assert_eq!(enemies[0].health, 90);
        assert_eq!(enemies[1].health, 100);
        assert!(player.projectiles.is_empty());
    }

    #[test]
    fn test_struck_enemy_is_spent_for_the_pass() {
        let mut player = player_at(500, 500);
        let sprite = player.projectile_sprite.clone();
        let enemy = enemy_at(500, 300, ProjectileKind::Normal);
        let center = enemy.pos + IVec2::new(25, 10);
        player.projectiles = vec![
            Projectile::new(center, ProjectileKind::Normal, sprite.clone()),
            Projectile::new(center, ProjectileKind::Normal, sprite),
        ];

        let mut enemies = vec![enemy];
        let hits = player.move_projectiles(0, HEIGHT, COOLDOWN_LIMIT, &mut enemies);

        assert_eq!(hits, vec![0]);
        assert_eq!(player.projectiles.len(), 1);
    }

    #[test]
    fn test_health_ratio() {
        let mut player = player_at(0, 0);
        player.health = 40;
        assert!((player.health_ratio() - 0.4).abs() < f32::EPSILON);
        player.health = -10;
        assert_eq!(player.health_ratio(), 0.0);
        assert_eq!(player.max_health(), Some(100));
        assert_eq!(enemy_at(0, 0, ProjectileKind::Normal).max_health(), None);
    }
}

//! Sprite and collision mask table
//!
//! Images are decoded by the host; the core only sees an opaque texture
//! handle plus the mask derived from it. Every sprite the simulation can
//! ask for is resolved once, up front, so a missing asset fails at startup
//! instead of mid-game.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};
use crate::sim::mask::Mask;
use crate::sim::state::{ProjectileKind, ShipSide, ShipTier};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteClass {
    Ship(ShipTier),
    Projectile(ProjectileKind),
}

/// Lookup key for a sprite: (category, side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteKey {
    pub class: SpriteClass,
    pub side: ShipSide,
}

impl SpriteKey {
    pub const fn ship(tier: ShipTier, side: ShipSide) -> Self {
        Self {
            class: SpriteClass::Ship(tier),
            side,
        }
    }

    pub const fn projectile(kind: ProjectileKind, side: ShipSide) -> Self {
        Self {
            class: SpriteClass::Projectile(kind),
            side,
        }
    }

    /// Every key the simulation may request
    pub fn required() -> Vec<SpriteKey> {
        let mut keys = vec![
            // Player always flies the large hull with normal lasers
            SpriteKey::ship(ShipTier::Large, ShipSide::Player),
            SpriteKey::projectile(ProjectileKind::Normal, ShipSide::Player),
        ];
        for tier in ShipTier::ALL {
            keys.push(SpriteKey::ship(tier, ShipSide::Enemy));
        }
        for kind in ProjectileKind::ALL {
            keys.push(SpriteKey::projectile(kind, ShipSide::Enemy));
        }
        keys
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            SpriteClass::Ship(tier) => write!(f, "{}_{}_ship", tier.as_str(), self.side.as_str()),
            SpriteClass::Projectile(kind) => {
                write!(f, "{}_{}_laser", kind.as_str(), self.side.as_str())
            }
        }
    }
}

/// Opaque handle to a texture owned by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// A drawable paired with its collision mask
#[derive(Debug, Clone)]
pub struct SpriteAsset {
    pub key: SpriteKey,
    pub texture: TextureHandle,
    mask: Arc<Mask>,
}

impl SpriteAsset {
    pub fn new(key: SpriteKey, texture: TextureHandle, mask: Mask) -> Self {
        Self {
            key,
            texture,
            mask: Arc::new(mask),
        }
    }

    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.mask.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.mask.width() as i32
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.mask.height() as i32
    }
}

/// Validated sprite lookup table
#[derive(Debug, Clone)]
pub struct AssetTable {
    sprites: HashMap<SpriteKey, SpriteAsset>,
}

impl AssetTable {
    /// Build the table, failing if any required sprite is absent or has an
    /// empty mask
    pub fn new(sprites: impl IntoIterator<Item = SpriteAsset>) -> Result<Self> {
        let sprites: HashMap<_, _> = sprites.into_iter().map(|s| (s.key, s)).collect();

        for key in SpriteKey::required() {
            let sprite = sprites.get(&key).ok_or(GameError::MissingSprite(key))?;
            if sprite.mask.is_empty() {
                return Err(GameError::EmptyMask(key));
            }
        }

        log::debug!("Asset table ready with {} sprites", sprites.len());
        Ok(Self { sprites })
    }

    /// Sprite set drawn from code: tapered hulls sized per tier and solid
    /// laser bolts. Used by the headless host and tests.
    pub fn procedural() -> Self {
        let mut sprites = Vec::new();
        let mut next_texture = 0u32;
        let mut texture = || {
            next_texture += 1;
            TextureHandle(next_texture)
        };

        for key in SpriteKey::required() {
            let mask = match key.class {
                SpriteClass::Ship(tier) => {
                    let size = tier.sprite_size() as u32;
                    hull_mask(size, key.side)
                }
                SpriteClass::Projectile(_) => {
                    Mask::filled(LASER_WIDTH as u32, LASER_HEIGHT as u32)
                }
            };
            sprites.push(SpriteAsset::new(key, texture(), mask));
        }

        Self {
            sprites: sprites.into_iter().map(|s| (s.key, s)).collect(),
        }
    }

    /// Look up a sprite. Keys outside `SpriteKey::required()` may be absent.
    pub fn get(&self, key: SpriteKey) -> Result<&SpriteAsset> {
        self.sprites.get(&key).ok_or(GameError::MissingSprite(key))
    }

    pub fn ship(&self, tier: ShipTier, side: ShipSide) -> Result<&SpriteAsset> {
        self.get(SpriteKey::ship(tier, side))
    }

    pub fn projectile(&self, kind: ProjectileKind, side: ShipSide) -> Result<&SpriteAsset> {
        self.get(SpriteKey::projectile(kind, side))
    }
}

/// Triangle hull pointing away from its owner's side of the screen
fn hull_mask(size: u32, side: ShipSide) -> Mask {
    let half = size as f32 / 2.0;
    Mask::from_fn(size, size, |x, y| {
        // Row 0 is the nose for the player, the tail for an enemy
        let depth = match side {
            ShipSide::Player => y as f32 + 1.0,
            ShipSide::Enemy => (size - y) as f32,
        };
        let half_width = half * depth / size as f32;
        (x as f32 + 0.5 - half).abs() <= half_width
    })
}

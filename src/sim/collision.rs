//! Pixel-accurate hit detection
//!
//! Every hit in the game (ship against ship, projectile against ship) goes
//! through `overlaps`. There is no bounding-box approximation; the mask
//! scan only skips pixels outside the two sprites' shared rectangle.

use glam::IVec2;

use super::mask::Mask;
use crate::assets::SpriteAsset;

/// Anything placed on the playfield with a sprite
pub trait Entity {
    /// Top-left anchor
    fn position(&self) -> IVec2;

    fn sprite(&self) -> &SpriteAsset;

    #[inline]
    fn mask(&self) -> &Mask {
        self.sprite().mask()
    }

    #[inline]
    fn size(&self) -> IVec2 {
        self.sprite().size()
    }

    /// Y coordinate of the sprite's lower edge
    #[inline]
    fn bottom(&self) -> i32 {
        self.position().y + self.size().y
    }
}

/// True if any opaque pixel of `a` coincides with an opaque pixel of `b`
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    let offset = b.position() - a.position();
    a.mask().overlap(b.mask(), offset)
}

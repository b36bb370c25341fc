//! Per-pixel collision masks
//!
//! A mask is the opacity bitmap of a sprite. Rows are packed into 64-bit
//! words; a set bit is an opaque pixel.

use std::fmt;

use glam::IVec2;

/// Alpha values above this count as opaque
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Words per row
    stride: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Fully transparent mask
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            stride,
            bits: vec![0; stride * height as usize],
        }
    }

    /// Fully opaque mask
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    pub fn from_fn(width: u32, height: u32, opaque: impl Fn(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if opaque(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build from a row-major alpha channel. Returns `None` if the buffer
    /// length does not match the dimensions.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Option<Self> {
        if alpha.len() != width as usize * height as usize {
            return None;
        }
        Some(Self::from_fn(width, height, |x, y| {
            alpha[(y * width + x) as usize] > ALPHA_THRESHOLD
        }))
    }

    /// Build from ASCII art, `#` marks an opaque pixel. Short rows are
    /// padded with transparency.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut mask = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    mask.set(x as u32, y as u32, true);
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let word = y as usize * self.stride + x as usize / 64;
        let bit = 1u64 << (x % 64);
        if opaque {
            self.bits[word] |= bit;
        } else {
            self.bits[word] &= !bit;
        }
    }

    /// Opacity at `(x, y)`; anything outside the mask is transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        let word = y as usize * self.stride + x as usize / 64;
        self.bits[word] & (1u64 << (x as u32 % 64)) != 0
    }

    /// Number of opaque pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// True if any opaque pixel of `self` coincides with an opaque pixel of
    /// `other` placed at `offset` relative to `self`'s origin.
    ///
    /// Only the intersection of the two rectangles is scanned.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opaque", &self.count())
            .finish()
    }
}

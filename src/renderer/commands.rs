//! Draw commands handed to the rendering collaborator
//!
//! The core never touches a window. Each frame it emits a flat list of
//! commands in painter's order; the host turns them into real draws.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::assets::TextureHandle;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    /// Menu title, #04BBFF
    pub const TITLE: Color = [0.016, 0.733, 1.0, 1.0];
    /// Idle button label, #D7FCD4
    pub const BUTTON_BASE: Color = [0.843, 0.988, 0.831, 1.0];
    pub const BUTTON_HOVER: Color = WHITE;
}

/// Axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    pub fn centered(center: IVec2, size: IVec2) -> Self {
        Self {
            pos: center - size / 2,
            size,
        }
    }

    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: IVec2) -> bool {
        let end = self.pos + self.size;
        point.x >= self.pos.x && point.y >= self.pos.y && point.x < end.x && point.y < end.y
    }
}

/// Which backdrop to paint before anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    Menu,
    Game,
}

/// Where a text block is pinned; the collaborator measures the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    TopLeft(IVec2),
    TopRight(IVec2),
    Center(IVec2),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    Background(Background),
    Sprite {
        texture: TextureHandle,
        pos: IVec2,
    },
    Text {
        text: String,
        size: u32,
        color: Color,
        anchor: TextAnchor,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// Button backdrop plus its centered label
    Button {
        rect: Rect,
        label: String,
        size: u32,
        color: Color,
    },
}

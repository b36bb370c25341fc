//! Backend-agnostic rendering
//!
//! Produces draw commands only; the platform layer owns the actual window.

pub mod commands;
pub mod scene;

pub use commands::{Background, Color, Rect, RenderCommand, TextAnchor, colors};
pub use scene::{draw_game, draw_menu};

//! Main menu layout and hit testing

use glam::IVec2;

use crate::renderer::Rect;

/// Button backdrop size (pixels)
pub const BUTTON_SIZE: IVec2 = IVec2::new(400, 100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
}

impl Button {
    pub fn new(center: IVec2, label: &'static str) -> Self {
        Self {
            rect: Rect::centered(center, BUTTON_SIZE),
            label,
        }
    }

    #[inline]
    pub fn contains(&self, point: IVec2) -> bool {
        self.rect.contains(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Exit,
}

/// Title plus Play/Exit buttons, laid out for a given screen size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainMenu {
    pub title_center: IVec2,
    pub title_size: u32,
    pub play: Button,
    pub exit: Button,
}

impl MainMenu {
    pub fn layout(width: i32, height: i32) -> Self {
        let cx = width / 2;
        Self {
            title_center: IVec2::new(cx, height / 15),
            title_size: (width / 20).max(1) as u32,
            play: Button::new(IVec2::new(cx, 6 * height / 20), "PLAY"),
            exit: Button::new(IVec2::new(cx, 12 * height / 20), "EXIT"),
        }
    }

    pub fn buttons(&self) -> [(&Button, MenuAction); 2] {
        [(&self.play, MenuAction::Play), (&self.exit, MenuAction::Exit)]
    }

    /// Action under a click, if any
    pub fn hit(&self, point: IVec2) -> Option<MenuAction> {
        self.buttons()
            .into_iter()
            .find(|(button, _)| button.contains(point))
            .map(|(_, action)| action)
    }
}

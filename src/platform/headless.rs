//! Window-less host
//!
//! Feeds the app from a simple autopilot instead of real devices and keeps
//! the last presented frame for inspection. Used by the binary's demo mode
//! and by tests.

use glam::IVec2;

use super::{HeldKeys, Platform, PlatformEvent};
use crate::app::{App, Screen};
use crate::error::Result;
use crate::renderer::RenderCommand;
use crate::sim::collision::Entity;
use crate::sim::state::{GamePhase, GameState};

/// Steers under the lowest visible enemy and holds fire
#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn steer(&self, state: &GameState) -> HeldKeys {
        if state.phase != GamePhase::Playing {
            return HeldKeys::default();
        }

        let player = &state.player;
        let target = state
            .enemies
            .iter()
            .filter(|e| e.bottom() > 0)
            .max_by_key(|e| e.bottom());

        let mut keys = HeldKeys {
            fire: true,
            ..Default::default()
        };
        if let Some(enemy) = target {
            let dx = (enemy.pos.x + enemy.width() / 2) - (player.pos.x + player.width() / 2);
            let deadband = state.settings.player_velocity;
            keys.left = dx < -deadband;
            keys.right = dx > deadband;
        }
        keys
    }
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    autopilot: Autopilot,
    /// Quit after this many frames
    max_frames: Option<u64>,
    /// Quit after this many finished runs
    max_runs: Option<u32>,
    frames: u64,
    keys: HeldKeys,
    mouse: IVec2,
    pending: Vec<PlatformEvent>,
    last_frame: Vec<RenderCommand>,
}

impl HeadlessPlatform {
    pub fn new(max_frames: Option<u64>, max_runs: Option<u32>) -> Self {
        Self {
            max_frames,
            max_runs,
            ..Default::default()
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Commands from the most recent `present`
    pub fn last_frame(&self) -> &[RenderCommand] {
        &self.last_frame
    }
}

impl Platform for HeadlessPlatform {
    fn observe(&mut self, app: &App) {
        self.keys = HeldKeys::default();

        let frames_done = self.max_frames.is_some_and(|max| self.frames >= max);
        let runs_done = self.max_runs.is_some_and(|max| app.runs_finished() >= max);
        if frames_done || runs_done {
            self.pending.push(PlatformEvent::Quit);
            return;
        }

        match app.screen() {
            Screen::Menu(menu) => {
                self.mouse = menu.play.rect.center();
                self.pending.push(PlatformEvent::MouseDown(self.mouse));
            }
            Screen::Playing(state) => {
                self.keys = self.autopilot.steer(state);
            }
        }
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        std::mem::take(&mut self.pending)
    }

    fn held_keys(&self) -> HeldKeys {
        self.keys
    }

    fn mouse_position(&self) -> IVec2 {
        self.mouse
    }

    fn present(&mut self, commands: &[RenderCommand]) -> Result<()> {
        self.frames += 1;
        self.last_frame = commands.to_vec();
        Ok(())
    }
}

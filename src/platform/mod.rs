//! Platform abstraction layer
//!
//! The window, input devices and text/sprite drawing belong to the host.
//! The core reaches them only through `Platform`:
//! - Input events and held keys
//! - Mouse position (menu hover)
//! - Presenting a frame of render commands
//!
//! Frame pacing lives in `pacer`; `headless` is a window-less host used by
//! the binary and tests.

pub mod headless;
pub mod pacer;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::app::{App, FrameInput};
use crate::error::Result;
use crate::renderer::RenderCommand;
use crate::sim::TickInput;

pub use headless::{Autopilot, HeadlessPlatform};
pub use pacer::FramePacer;

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformEvent {
    /// Window closed
    Quit,
    MouseDown(IVec2),
}

/// Logical keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub quit: bool,
    /// Abandon the run and return to the menu
    pub menu: bool,
}

impl HeldKeys {
    /// The subset of keys the simulation consumes
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire,
        }
    }
}

/// Windowing/input/rendering collaborator
pub trait Platform {
    /// Called once per frame before input is read. Hosts that drive input
    /// from game state (autopilots, replays) inspect `app` here.
    fn observe(&mut self, _app: &App) {}

    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    fn held_keys(&self) -> HeldKeys;

    fn mouse_position(&self) -> IVec2;

    /// Draw one frame
    fn present(&mut self, commands: &[RenderCommand]) -> Result<()>;
}

/// Read this frame's input from the platform
pub fn gather_input<P: Platform + ?Sized>(platform: &mut P) -> FrameInput {
    FrameInput {
        events: platform.poll_events(),
        keys: platform.held_keys(),
        mouse: platform.mouse_position(),
    }
}

/// Drive `app` until it asks to quit. With a pacer, each frame waits for
/// the next tick boundary. Returns the number of frames run.
pub fn run<P: Platform + ?Sized>(
    app: &mut App,
    platform: &mut P,
    mut pacer: Option<FramePacer>,
) -> Result<u64> {
    let mut frames = 0u64;
    while !app.should_quit() {
        platform.observe(app);
        let input = gather_input(platform);
        let commands = app.frame(&input)?;
        if let Err(e) = platform.present(&commands) {
            log::warn!("Present failed on frame {}: {}", frames, e);
            return Err(e);
        }
        frames += 1;

        if let Some(pacer) = pacer.as_mut() {
            pacer.wait();
        }
    }
    log::info!("Host loop finished after {} frames", frames);
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetTable;
    use crate::error::GameError;
    use crate::settings::Settings;

    fn app() -> App {
        App::new(Settings::default(), AssetTable::procedural(), 5).unwrap()
    }

    #[test]
    fn test_headless_run_respects_frame_budget() {
        let mut app = app();
        let mut host = HeadlessPlatform::new(Some(120), None);
        let frames = run(&mut app, &mut host, None).unwrap();

        // The budget is checked before input, so the quitting frame is still presented
        assert_eq!(frames, 121);
        assert_eq!(host.frames(), 121);
        assert!(app.should_quit());
    }

    #[test]
    fn test_headless_autopilot_starts_a_run() {
        let mut app = app();
        let mut host = HeadlessPlatform::new(Some(10), None);
        run(&mut app, &mut host, None).unwrap();
        assert!(app.game().is_some());
        assert!(matches!(
            host.last_frame().first(),
            Some(RenderCommand::Background(crate::renderer::Background::Game))
        ));
    }

    struct Broken;

    impl Platform for Broken {
        fn poll_events(&mut self) -> Vec<PlatformEvent> {
            Vec::new()
        }

        fn held_keys(&self) -> HeldKeys {
            HeldKeys::default()
        }

        fn mouse_position(&self) -> IVec2 {
            IVec2::ZERO
        }

        fn present(&mut self, _commands: &[RenderCommand]) -> Result<()> {
            Err(GameError::Platform("surface lost".into()))
        }
    }

    #[test]
    fn test_present_error_stops_loop() {
        let mut app = app();
        assert!(matches!(
            run(&mut app, &mut Broken, None),
            Err(GameError::Platform(_))
        ));
    }

    #[test]
    fn test_tick_input_drops_host_keys() {
        let keys = HeldKeys {
            left: true,
            fire: true,
            quit: true,
            menu: true,
            ..Default::default()
        };
        assert_eq!(
            keys.tick_input(),
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            }
        );
    }
}

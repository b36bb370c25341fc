//! Screen state machine
//!
//! `App` owns the current screen and turns one frame of host input into one
//! frame of render commands. The menu starts runs; a finished run returns to
//! the menu once its banner has been shown for the grace period.

use glam::IVec2;
use serde::Serialize;

use crate::assets::AssetTable;
use crate::error::Result;
use crate::platform::{HeldKeys, PlatformEvent};
use crate::renderer::{RenderCommand, draw_game, draw_menu};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::ui::{MainMenu, MenuAction};

/// Input gathered from the host for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub events: Vec<PlatformEvent>,
    pub keys: HeldKeys,
    pub mouse: IVec2,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Menu(MainMenu),
    Playing(Box<GameState>),
}

/// Snapshot of the heads-up values, for hosts and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub level: u32,
    pub lives: i32,
    pub health: i32,
    pub max_health: i32,
    pub phase: GamePhase,
}

#[derive(Debug)]
pub struct App {
    settings: Settings,
    assets: AssetTable,
    screen: Screen,
    /// Seed for the next run; bumped each time a run starts
    next_seed: u64,
    quit: bool,
    runs_finished: u32,
    events: Vec<GameEvent>,
}

impl App {
    pub fn new(settings: Settings, assets: AssetTable, seed: u64) -> Result<Self> {
        settings.validate()?;
        let menu = MainMenu::layout(settings.playfield_width, settings.playfield_height);
        Ok(Self {
            settings,
            assets,
            screen: Screen::Menu(menu),
            next_seed: seed,
            quit: false,
            runs_finished: 0,
            events: Vec::new(),
        })
    }

    /// Advance one frame and return what to draw
    pub fn frame(&mut self, input: &FrameInput) -> Result<Vec<RenderCommand>> {
        if input.keys.quit || input.events.contains(&PlatformEvent::Quit) {
            log::info!("Quit requested");
            self.quit = true;
        }

        match &mut self.screen {
            Screen::Menu(menu) => {
                let clicks = input.events.iter().filter_map(|e| match e {
                    PlatformEvent::MouseDown(pos) => Some(*pos),
                    PlatformEvent::Quit => None,
                });
                let mut action = None;
                for pos in clicks {
                    action = match menu.hit(pos) {
                        Some(hit) => Some(hit),
                        None if self.settings.menu_any_click => Some(MenuAction::Play),
                        None => None,
                    };
                    if action.is_some() {
                        break;
                    }
                }

                match action {
                    Some(MenuAction::Play) if !self.quit => self.start_run()?,
                    Some(MenuAction::Exit) => {
                        log::info!("Exit selected from menu");
                        self.quit = true;
                    }
                    _ => {}
                }
            }
            Screen::Playing(state) => {
                if input.keys.menu && state.phase == GamePhase::Playing {
                    log::info!("Run abandoned at level {}", state.level);
                    self.to_menu();
                } else {
                    tick(state, &input.keys.tick_input())?;
                    self.events.extend(state.drain_events());
                    if state.outcome_expired() {
                        log::info!(
                            "Run finished: {:?} at level {} after {} ticks",
                            state.phase,
                            state.level,
                            state.time_ticks
                        );
                        self.runs_finished += 1;
                        self.to_menu();
                    }
                }
            }
        }

        Ok(match &self.screen {
            Screen::Menu(menu) => draw_menu(menu, input.mouse),
            Screen::Playing(state) => draw_game(state),
        })
    }

    fn start_run(&mut self) -> Result<()> {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        let state = GameState::new(self.settings.clone(), self.assets.clone(), seed)?;
        log::info!("Starting run with seed {}", seed);
        self.screen = Screen::Playing(Box::new(state));
        Ok(())
    }

    fn to_menu(&mut self) {
        self.screen = Screen::Menu(MainMenu::layout(
            self.settings.playfield_width,
            self.settings.playfield_height,
        ));
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The run in progress, if any
    pub fn game(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Playing(state) => Some(state),
            Screen::Menu(_) => None,
        }
    }

    pub fn hud(&self) -> Option<Hud> {
        self.game().map(|state| Hud {
            level: state.level,
            lives: state.lives,
            health: state.player.health,
            max_health: state.player.max_health().unwrap_or(state.settings.player_max_health),
            phase: state.phase,
        })
    }

    /// Take the simulation events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Runs that reached Lost or Won and returned to the menu
    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Settings::default(), AssetTable::procedural(), 11).unwrap()
    }

    fn click(pos: IVec2) -> FrameInput {
        FrameInput {
            events: vec![PlatformEvent::MouseDown(pos)],
            mouse: pos,
            ..Default::default()
        }
    }

    fn play_center(app: &App) -> IVec2 {
        match app.screen() {
            Screen::Menu(menu) => menu.play.rect.center(),
            Screen::Playing(_) => panic!("expected menu"),
        }
    }

    #[test]
    fn test_play_click_starts_run() {
        let mut app = app();
        assert!(app.game().is_none());

        let commands = app.frame(&click(play_center(&app))).unwrap();
        let state = app.game().expect("run started");
        assert_eq!(state.seed, 11);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            commands[0],
            RenderCommand::Background(crate::renderer::Background::Game)
        );
    }

    #[test]
    fn test_click_outside_buttons_is_ignored() {
        let mut app = app();
        app.frame(&click(IVec2::new(5, 5))).unwrap();
        assert!(app.game().is_none());

        let mut settings = Settings::default();
        settings.menu_any_click = true;
        let mut app = App::new(settings, AssetTable::procedural(), 1).unwrap();
        app.frame(&click(IVec2::new(5, 5))).unwrap();
        assert!(app.game().is_some());
    }

    #[test]
    fn test_exit_click_quits() {
        let mut app = app();
        let exit = match app.screen() {
            Screen::Menu(menu) => menu.exit.rect.center(),
            Screen::Playing(_) => unreachable!(),
        };
        app.frame(&click(exit)).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_quit_event_and_key() {
        let mut by_event = app();
        by_event
            .frame(&FrameInput {
                events: vec![PlatformEvent::Quit],
                ..Default::default()
            })
            .unwrap();
        assert!(by_event.should_quit());

        let mut by_key = app();
        by_key
            .frame(&FrameInput {
                keys: HeldKeys {
                    quit: true,
                    ..Default::default()
                },
                ..Default::default()
            })
            .unwrap();
        assert!(by_key.should_quit());
    }

    #[test]
    fn test_menu_key_abandons_run() {
        let mut app = app();
        app.frame(&click(play_center(&app))).unwrap();
        app.frame(&FrameInput {
            keys: HeldKeys {
                menu: true,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(app.screen(), Screen::Menu(_)));
        assert_eq!(app.runs_finished(), 0);
    }

    #[test]
    fn test_lost_run_returns_to_menu_after_grace() {
        let mut app = app();
        app.frame(&click(play_center(&app))).unwrap();
        if let Screen::Playing(state) = &mut app.screen {
            state.lives = 0;
        }

        // One tick to notice the loss, then the grace period
        let grace = app.settings.outcome_grace_ticks();
        for _ in 0..grace {
            app.frame(&FrameInput::default()).unwrap();
            assert!(app.game().is_some());
        }
        assert_eq!(app.hud().map(|h| h.phase), Some(GamePhase::Lost));

        app.frame(&FrameInput::default()).unwrap();
        assert!(app.game().is_none());
        assert_eq!(app.runs_finished(), 1);

        // Next run gets a fresh seed
        app.frame(&click(play_center(&app))).unwrap();
        assert_eq!(app.game().map(|s| s.seed), Some(12));
    }

    #[test]
    fn test_won_run_returns_to_menu_after_grace() {
        let mut app = app();
        app.frame(&click(play_center(&app))).unwrap();
        if let Screen::Playing(state) = &mut app.screen {
            state.level = 10;
            state.enemies.clear();
        }

        let grace = app.settings.outcome_grace_ticks();
        for _ in 0..grace {
            app.frame(&FrameInput::default()).unwrap();
            assert!(app.game().is_some());
        }
        assert_eq!(app.hud().map(|h| h.phase), Some(GamePhase::Won));
        assert!(app.take_events().contains(&GameEvent::GameWon));

        app.frame(&FrameInput::default()).unwrap();
        assert!(matches!(app.screen(), Screen::Menu(_)));
        assert_eq!(app.runs_finished(), 1);
    }

    #[test]
    fn test_events_are_forwarded() {
        let mut app = app();
        app.frame(&click(play_center(&app))).unwrap();
        app.frame(&FrameInput::default()).unwrap();
        let events = app.take_events();
        assert!(matches!(
            events.first(),
            Some(GameEvent::WaveSpawned { level: 1, .. })
        ));
        assert!(app.take_events().is_empty());
    }

    #[test]
    fn test_hud_snapshot() {
        let mut app = app();
        assert!(app.hud().is_none());
        app.frame(&click(play_center(&app))).unwrap();
        let hud = app.hud().unwrap();
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.health, 100);
        assert_eq!(hud.max_health, 100);
    }
}

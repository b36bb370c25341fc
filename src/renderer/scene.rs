//! Scene and HUD command building

use glam::IVec2;

use super::commands::{Background, Color, Rect, RenderCommand, TextAnchor, colors};
use crate::sim::collision::Entity;
use crate::sim::ship::Ship;
use crate::sim::state::{GamePhase, GameState};
use crate::ui::MainMenu;

pub const HUD_TEXT_SIZE: u32 = 20;
pub const BANNER_TEXT_SIZE: u32 = 60;
pub const BUTTON_TEXT_SIZE: u32 = 50;
/// Inset of the HUD labels from the screen corners
const HUD_INSET: i32 = 10;
/// Gap between the player sprite and its health bar
const HEALTH_BAR_GAP: i32 = 10;
const HEALTH_BAR_HEIGHT: i32 = 5;

/// Menu screen; the button under `mouse` is highlighted
pub fn draw_menu(menu: &MainMenu, mouse: IVec2) -> Vec<RenderCommand> {
    let mut commands = vec![
        RenderCommand::Background(Background::Menu),
        RenderCommand::Text {
            text: "MAIN MENU".to_string(),
            size: menu.title_size,
            color: colors::TITLE,
            anchor: TextAnchor::Center(menu.title_center),
        },
    ];
    for (button, _) in menu.buttons() {
        let color = if button.contains(mouse) {
            colors::BUTTON_HOVER
        } else {
            colors::BUTTON_BASE
        };
        commands.push(RenderCommand::Button {
            rect: button.rect,
            label: button.label.to_string(),
            size: BUTTON_TEXT_SIZE,
            color,
        });
    }
    commands
}

/// Game screen: HUD labels, enemies, player, health bar, outcome banner
pub fn draw_game(state: &GameState) -> Vec<RenderCommand> {
    let width = state.settings.playfield_width;
    let height = state.settings.playfield_height;

    let mut commands = vec![
        RenderCommand::Background(Background::Game),
        RenderCommand::Text {
            text: format!("Lives: {}", state.lives),
            size: HUD_TEXT_SIZE,
            color: colors::WHITE,
            anchor: TextAnchor::TopLeft(IVec2::splat(HUD_INSET)),
        },
        RenderCommand::Text {
            text: format!("Level: {}", state.level),
            size: HUD_TEXT_SIZE,
            color: colors::WHITE,
            anchor: TextAnchor::TopRight(IVec2::new(width - HUD_INSET, HUD_INSET)),
        },
    ];

    for enemy in &state.enemies {
        draw_ship(&mut commands, enemy);
    }
    draw_ship(&mut commands, &state.player);
    draw_health_bar(&mut commands, &state.player);

    let center = IVec2::new(width / 2, height / 2);
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Lost => commands.push(banner("Game over! Try again", colors::RED, center)),
        GamePhase::Won => {
            commands.push(banner(
                "Congratulation!",
                colors::GREEN,
                center - IVec2::new(0, 40),
            ));
            commands.push(banner(
                "You finished the game",
                colors::GREEN,
                center + IVec2::new(0, 40),
            ));
        }
    }

    commands
}

/// Hull first, then its projectiles
fn draw_ship(commands: &mut Vec<RenderCommand>, ship: &Ship) {
    commands.push(RenderCommand::Sprite {
        texture: ship.sprite().texture,
        pos: ship.pos,
    });
    commands.extend(ship.projectiles.iter().map(|p| RenderCommand::Sprite {
        texture: p.sprite().texture,
        pos: p.pos,
    }));
}

fn draw_health_bar(commands: &mut Vec<RenderCommand>, player: &Ship) {
    let width = player.width();
    let pos = IVec2::new(player.pos.x, player.bottom() + HEALTH_BAR_GAP);
    let filled = (width as f32 * player.health_ratio()).round() as i32;

    commands.push(RenderCommand::FillRect {
        rect: Rect::new(pos.x, pos.y, width, HEALTH_BAR_HEIGHT),
        color: colors::RED,
    });
    commands.push(RenderCommand::FillRect {
        rect: Rect::new(pos.x, pos.y, filled, HEALTH_BAR_HEIGHT),
        color: colors::GREEN,
    });
}

fn banner(text: &str, color: Color, center: IVec2) -> RenderCommand {
    RenderCommand::Text {
        text: text.to_string(),
        size: BANNER_TEXT_SIZE,
        color,
        anchor: TextAnchor::Center(center),
    }
}

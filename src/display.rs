/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::assets::{Assets, Sprite};
use space_shooter::config::GameConfig;
use space_shooter::entities::{GameState, GameStatus, Outcome};
use space_shooter::viewport::{Viewport, HUD_ROWS};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_HUD_HP_LOW: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const C_ENEMIES: [Color; 3] = [Color::Green, Color::Yellow, Color::Red];

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
    assets: &Assets,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let level = &config.levels[state.level];
    if let Some(bg) = assets.background(&level.background) {
        draw_background(out, bg, view)?;
    }

    match state.status {
        GameStatus::Playing => {
            for enemy in &state.enemies {
                let color = C_ENEMIES[enemy.sprite % C_ENEMIES.len()];
                draw_sprite(out, assets.enemy(enemy.sprite), (enemy.x, enemy.y), color, config, view)?;
            }
            for bullet in &state.bullets {
                draw_sprite(out, &assets.bullet, (bullet.x, bullet.y), C_BULLET_PLAYER, config, view)?;
            }
            for bullet in &state.enemy_bullets {
                draw_sprite(out, &assets.enemy_bullet, (bullet.x, bullet.y), C_BULLET_ENEMY, config, view)?;
            }
            let p = &state.player;
            draw_sprite(out, &assets.player, (p.x, p.y), C_PLAYER, config, view)?;
            draw_controls_hint(out, view)?;
        }
        GameStatus::Ended(outcome) => draw_end_screen(out, outcome, view)?,
    }

    draw_hud(out, state, config, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Print `sprite` centred on a world point, clipped to the playfield.
fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    at: (f64, f64),
    color: Color,
    config: &GameConfig,
    view: &Viewport,
) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(at.0, at.1, config) else {
        return Ok(());
    };
    let left = col as i32 - sprite.width() as i32 / 2;
    let top = row as i32 - sprite.height() as i32 / 2;

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.lines.iter().enumerate() {
        let y = top + i as i32;
        if y < HUD_ROWS as i32 || y >= view.rows as i32 {
            continue;
        }
        draw_clipped(out, line, left, y as u16, view)?;
    }
    Ok(())
}

fn draw_clipped<W: Write>(
    out: &mut W,
    line: &str,
    left: i32,
    row: u16,
    view: &Viewport,
) -> std::io::Result<()> {
    let skip = (-left).max(0) as usize;
    let start = left.max(0);
    let room = (view.cols as i32 - start).max(0) as usize;
    let visible: String = line.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row))?;
    out.queue(Print(visible))?;
    Ok(())
}

/// Backgrounds sit on the bottom edge of the playfield, centred.
fn draw_background<W: Write>(out: &mut W, bg: &Sprite, view: &Viewport) -> std::io::Result<()> {
    let left = (view.cols as i32 - bg.width() as i32) / 2;
    let top = view.rows as i32 - 1 - bg.height() as i32;

    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    for (i, line) in bg.lines.iter().enumerate() {
        let y = top + i as i32;
        if y < HUD_ROWS as i32 {
            continue;
        }
        draw_clipped(out, line, left, y as u16, view)?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    config: &GameConfig,
    view: &Viewport,
) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Score: {}", state.score as u64)))?;

    // Level title, centre
    let title = &config.levels[state.level].title;
    let tx = (view.cols / 2).saturating_sub(title.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(Print(title))?;

    // Hit points, right
    let hp_str = format!("HP: {}", state.player.hp);
    let hx = view.cols.saturating_sub(hp_str.chars().count() as u16 + 1);
    let hp_color = if state.player.hp * 4 <= config.ship_hp {
        C_HUD_HP_LOW
    } else {
        C_HUD
    };
    out.queue(cursor::MoveTo(hx, 0))?;
    out.queue(style::SetForegroundColor(hp_color))?;
    out.queue(Print(hp_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse : Move   Click : Shoot   Q : Quit"))?;
    Ok(())
}

// ── End-of-game overlay ───────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(out: &mut W, outcome: Outcome, view: &Viewport) -> std::io::Result<()> {
    let (detail, color) = match outcome {
        Outcome::Victory => ("Every level cleared.", Color::Green),
        Outcome::Defeat => ("Your ship was destroyed.", Color::Red),
    };
    let lines: &[(&str, Color)] = &[
        ("Thanks for playing!", Color::White),
        (detail, color),
        ("Q - Quit", Color::DarkGrey),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

//! Terminal presentation
//!
//! Draws the active screen with crossterm commands. Everything is queued and
//! flushed once per frame inside a synchronized update.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
    terminal::{self, ClearType},
};

use super::playfield::{self, Grid};
use crate::game::{Game, GameMode, Screen};
use crate::sim::Player;
use crate::skins::{self, Rgb};
use crate::ui::{self, Ui};

const TITLE: &str = "LANE DASH";
const MAX_FIELD_COLS: u16 = 40;
const HUD_ROWS: u16 = 4;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn text<W: Write>(out: &mut W, x: u16, y: u16, s: &str, fg: Rgb) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(x, y),
        style::SetForegroundColor(color(fg)),
        style::Print(s),
        style::ResetColor
    )
}

fn centered<W: Write>(out: &mut W, cols: u16, y: u16, s: &str, fg: Rgb) -> io::Result<()> {
    let width = s.chars().count() as u16;
    text(out, cols.saturating_sub(width) / 2, y, s, fg)
}

/// Draw a grid with its top-left cell at (`x`, `y`)
fn blit<W: Write>(out: &mut W, grid: &Grid, x: u16, y: u16) -> io::Result<()> {
    for row in 0..grid.rows {
        queue!(out, cursor::MoveTo(x, y + row as u16))?;
        let mut prev: Option<(Rgb, Rgb)> = None;
        for cell in grid.row(row) {
            if prev != Some((cell.fg, cell.bg)) {
                queue!(
                    out,
                    style::SetForegroundColor(color(cell.fg)),
                    style::SetBackgroundColor(color(cell.bg))
                )?;
                prev = Some((cell.fg, cell.bg));
            }
            queue!(out, style::Print(cell.ch))?;
        }
        queue!(out, style::ResetColor)?;
    }
    Ok(())
}

fn menu<W: Write>(out: &mut W, cols: u16, y: u16, screen: Screen, cursor: usize) -> io::Result<()> {
    for (i, item) in ui::items(screen).iter().enumerate() {
        let (line, fg) = if i == cursor {
            (format!("> {}. {} <", i + 1, item.label), skins::YELLOW)
        } else {
            (format!("  {}. {}  ", i + 1, item.label), skins::WHITE)
        };
        centered(out, cols, y + 2 * i as u16, &line, fg)?;
    }
    Ok(())
}

fn hud<W: Write>(out: &mut W, player: &Player, x: u16, y: u16) -> io::Result<()> {
    let skin = player.skins.current_skin();
    text(
        out,
        x,
        y,
        &format!("{}  SCORE {}", player.display_name(), player.score()),
        skins::WHITE,
    )?;
    text(
        out,
        x,
        y + 1,
        &format!(
            "LEVEL {}  SPEED x{:.1}",
            player.level().name,
            player.speed_multiplier()
        ),
        skins::CYAN,
    )?;
    text(out, x, y + 2, &format!("SKIN {}", skin.name), skin.body)?;
    if let Some(note) = player.skins.notification() {
        text(out, x, y + 3, note, skins::GOLD)?;
    }
    Ok(())
}

fn race<W: Write>(out: &mut W, game: &Game, cols: u16, rows: u16) -> io::Result<()> {
    let players = game.players();
    let count = players.len().max(1) as u16;
    let field_cols = (cols.saturating_sub(2 * (count - 1)) / count).clamp(10, MAX_FIELD_COLS);
    let field_rows = rows.saturating_sub(HUD_ROWS + 1).max(5);

    let hint = match game.mode() {
        GameMode::Single => "ARROWS move   ESC menu",
        GameMode::Multi => "P1 ARROWS   P2 A/D   ESC menu",
    };
    text(out, 0, 0, hint, skins::SILVER)?;

    for (i, player) in players.iter().enumerate() {
        let x = i as u16 * (field_cols + 2);
        let grid = playfield::rasterize(player, field_cols as usize, field_rows as usize);
        blit(out, &grid, x, 1)?;
        hud(out, player, x, field_rows + 1)?;
    }
    Ok(())
}

fn main_menu<W: Write>(out: &mut W, ui: &Ui, cols: u16, rows: u16) -> io::Result<()> {
    let top = rows / 4;
    centered(out, cols, top, TITLE, skins::YELLOW)?;
    centered(out, cols, top + 2, "Dodge the traffic", skins::SILVER)?;
    menu(out, cols, top + 5, Screen::Menu, ui.cursor())
}

fn scores<W: Write>(out: &mut W, game: &Game, ui: &Ui, cols: u16, rows: u16) -> io::Result<()> {
    let top = rows / 4;
    centered(out, cols, top, "TOP SCORES", skins::GOLD)?;
    let table = game.high_scores();
    if table.is_empty() {
        centered(out, cols, top + 3, "NO SCORES YET", skins::SILVER)?;
    }
    for (i, entry) in table.entries.iter().enumerate() {
        let line = format!(
            "{}. {:<10} {:>6}   {}",
            i + 1,
            entry.name,
            entry.score,
            entry.date
        );
        centered(out, cols, top + 3 + i as u16, &line, skins::WHITE)?;
    }
    let below = top + 4 + table.capacity() as u16;
    menu(out, cols, below, Screen::Scores, ui.cursor())
}

fn shop<W: Write>(out: &mut W, game: &Game, ui: &Ui, cols: u16, rows: u16) -> io::Result<()> {
    let top = rows / 6;
    let player = game.shop_player();
    let unlocked = game.shop_unlocked_count();
    centered(out, cols, top, &format!("SKIN SHOP - PLAYER {player}"), skins::GOLD)?;
    centered(
        out,
        cols,
        top + 1,
        &format!("TOTAL POINTS {}", game.totals().for_player(player)),
        skins::WHITE,
    )?;
    for (i, skin) in skins::palette_for(player).iter().enumerate() {
        let y = top + 3 + i as u16;
        if i < unlocked {
            centered(out, cols, y, &format!("[x] {}", skin.name), skin.body)?;
        } else {
            let line = format!("[ ] {} (LOCKED)", skin.name);
            centered(out, cols, y, &line, skins::DARK_GRAY)?;
        }
    }
    let below = top + 4 + skins::palette_for(player).len() as u16;
    centered(out, cols, below, "1/2 switch player", skins::SILVER)?;
    menu(out, cols, below + 2, Screen::Shop, ui.cursor())
}

fn game_over<W: Write>(out: &mut W, game: &Game, ui: &Ui, cols: u16, rows: u16) -> io::Result<()> {
    let top = rows / 4;
    centered(out, cols, top, "GAME OVER", skins::RED)?;
    for (i, player) in game.players().iter().enumerate() {
        let state = if player.alive { "" } else { "  CRASHED" };
        let line = format!("{}: {} pts{}", player.display_name(), player.score(), state);
        centered(out, cols, top + 2 + i as u16, &line, skins::WHITE)?;
    }
    menu(out, cols, top + 5, Screen::GameOver, ui.cursor())
}

/// Draw one full frame for the controller's current screen
pub fn draw<W: Write>(
    out: &mut W,
    game: &Game,
    ui: &Ui,
    fps: Option<f32>,
    (cols, rows): (u16, u16),
) -> io::Result<()> {
    queue!(
        out,
        terminal::BeginSynchronizedUpdate,
        terminal::Clear(ClearType::All)
    )?;

    match game.screen() {
        Screen::Menu => main_menu(out, ui, cols, rows)?,
        Screen::Game => race(out, game, cols, rows)?,
        Screen::Scores => scores(out, game, ui, cols, rows)?,
        Screen::Shop => shop(out, game, ui, cols, rows)?,
        Screen::GameOver => game_over(out, game, ui, cols, rows)?,
    }

    if let Some(fps) = fps {
        let label = format!("{fps:.0} FPS");
        text(
            out,
            cols.saturating_sub(label.len() as u16),
            0,
            &label,
            skins::LIME,
        )?;
    }

    queue!(out, terminal::EndSynchronizedUpdate)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::MenuAction;
    use crate::highscores::MemoryStore;
    use crate::platform::Key;

    fn game() -> Game {
        Game::new(GameConfig::default(), Box::new(MemoryStore::default()), 5)
    }

    fn frame(game: &Game, ui: &Ui, fps: Option<f32>) -> String {
        let mut out = Vec::new();
        draw(&mut out, game, ui, fps, (80, 40)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_menu_frame() {
        let g = game();
        let s = frame(&g, &Ui::new(), None);
        assert!(s.contains(TITLE));
        assert!(s.contains("> 1. 1 PLAYER <"));
        assert!(s.contains("5. QUIT"));
        assert!(!s.contains("FPS"));
    }

    #[test]
    fn test_race_frame_has_hud_per_player() {
        let mut g = game();
        g.select(MenuAction::Play(GameMode::Multi));
        let s = frame(&g, &Ui::new(), Some(60.0));
        assert!(s.contains("Player 1  SCORE 0"));
        assert!(s.contains("Player 2  SCORE 0"));
        assert!(s.contains("LEVEL EASY"));
        assert!(s.contains("60 FPS"));
    }

    #[test]
    fn test_scores_frame() {
        let mut store = MemoryStore::default();
        store.scores.add_score("Player 2", 90, "2024-05-01");
        let mut g = Game::new(GameConfig::default(), Box::new(store), 5);
        g.select(MenuAction::Scores);
        let s = frame(&g, &Ui::new(), None);
        assert!(s.contains("TOP SCORES"));
        assert!(s.contains("Player 2"));
        assert!(s.contains("2024-05-01"));
        assert!(!s.contains("NO SCORES YET"));
    }

    #[test]
    fn test_shop_frame() {
        let mut g = game();
        let mut ui = Ui::new();
        ui.handle_key(&mut g, Key::Char('4'));
        ui.handle_key(&mut g, Key::Char('2'));
        let s = frame(&g, &ui, None);
        assert!(s.contains("SKIN SHOP - PLAYER 2"));
        assert!(s.contains("[x] CLASSIC"));
        assert!(s.contains("[ ] SILVER RACING (LOCKED)"));
    }
}

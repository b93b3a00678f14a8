//! Menu model and key dispatch
//!
//! Screens other than `Game` show a short list of items with a cursor.
//! Keys move the cursor (wrapping), Enter activates the highlighted item,
//! and digits activate an item directly.

use crate::game::{Game, GameMode, GameOverAction, MenuAction, Screen};
use crate::platform::Key;

/// What activating a menu item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Menu(MenuAction),
    GameOver(GameOverAction),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: Command,
}

const fn item(label: &'static str, command: Command) -> MenuItem {
    MenuItem { label, command }
}

const MAIN_MENU: [MenuItem; 5] = [
    item("1 PLAYER", Command::Menu(MenuAction::Play(GameMode::Single))),
    item("2 PLAYERS", Command::Menu(MenuAction::Play(GameMode::Multi))),
    item("TOP SCORES", Command::Menu(MenuAction::Scores)),
    item("SKIN SHOP", Command::Menu(MenuAction::Shop)),
    item("QUIT", Command::Menu(MenuAction::Quit)),
];

const GAME_OVER_MENU: [MenuItem; 2] = [
    item("MAIN MENU", Command::GameOver(GameOverAction::Menu)),
    item("PLAY AGAIN", Command::GameOver(GameOverAction::Restart)),
];

const BACK_MENU: [MenuItem; 1] = [item("BACK", Command::Back)];

/// Items shown on `screen` (empty while racing)
pub fn items(screen: Screen) -> &'static [MenuItem] {
    match screen {
        Screen::Menu => &MAIN_MENU,
        Screen::GameOver => &GAME_OVER_MENU,
        Screen::Scores | Screen::Shop => &BACK_MENU,
        Screen::Game => &[],
    }
}

/// Cursor state for the current screen
#[derive(Debug, Clone)]
pub struct Ui {
    screen: Screen,
    cursor: usize,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu,
            cursor: 0,
        }
    }

    /// Index of the highlighted item
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reset the cursor whenever the controller changed screens
    pub fn sync(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.cursor = 0;
        }
    }

    fn step(&mut self, forward: bool) {
        let len = items(self.screen).len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    /// Route one key press to the controller
    pub fn handle_key(&mut self, game: &mut Game, key: Key) {
        self.sync(game.screen());

        match (self.screen, key) {
            (_, Key::Escape) => game.escape(),
            (Screen::Game, key) => game.handle_key(key),
            (Screen::Shop, Key::Char(c @ ('1' | '2'))) => {
                game.shop_select_player(if c == '1' { 1 } else { 2 });
            }
            (_, Key::Up) => self.step(false),
            (_, Key::Down) => self.step(true),
            (screen, Key::Enter) => {
                if let Some(item) = items(screen).get(self.cursor) {
                    run(game, item.command);
                }
            }
            (screen, Key::Char(c)) => {
                let picked = c
                    .to_digit(10)
                    .and_then(|d| (d as usize).checked_sub(1))
                    .and_then(|i| items(screen).get(i).map(|item| (i, item.command)));
                if let Some((index, command)) = picked {
                    self.cursor = index;
                    run(game, command);
                }
            }
            _ => {}
        }

        self.sync(game.screen());
    }
}

fn run(game: &mut Game, command: Command) {
    match command {
        Command::Menu(action) => game.select(action),
        Command::GameOver(action) => game.game_over_select(action),
        Command::Back => game.back(),
    }
}

//! Game controller
//!
//! Owns the screen state machine and the 1–2 player simulations, turns
//! simulation events into audio cues, and records high scores when a run
//! ends.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioCue;
use crate::config::GameConfig;
use crate::highscores::{self, HighScores, ScoreStore};
use crate::platform::Key;
use crate::sim::{GameEvent, Player};
use crate::skins;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
    Scores,
    Shop,
    GameOver,
}

/// Number of participants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Single,
    Multi,
}

impl GameMode {
    pub fn player_count(self) -> u8 {
        match self {
            GameMode::Single => 1,
            GameMode::Multi => 2,
        }
    }
}

/// Main menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play(GameMode),
    Scores,
    Shop,
    Quit,
}

/// Game-over screen choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverAction {
    Menu,
    Restart,
}

/// Lifetime (per process) totals per player slot, shown in the shop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub player_one: u64,
    pub player_two: u64,
}

impl Totals {
    pub fn for_player(&self, player: u8) -> u64 {
        if player == 2 {
            self.player_two
        } else {
            self.player_one
        }
    }

    fn add(&mut self, player: u8, score: u32) {
        let slot = if player == 2 {
            &mut self.player_two
        } else {
            &mut self.player_one
        };
        *slot += u64::from(score);
    }
}

/// Top-level controller
pub struct Game {
    config: Arc<GameConfig>,
    screen: Screen,
    mode: GameMode,
    players: Vec<Player>,
    store: Box<dyn ScoreStore>,
    leaderboard: HighScores,
    rng: Pcg32,
    cues: Vec<AudioCue>,
    events: Vec<(u8, GameEvent)>,
    totals: Totals,
    shop_player: u8,
    quit: bool,
}

impl Game {
    /// Create a controller on the main menu
    ///
    /// An invalid `config` is replaced with the defaults.
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid game config: {e}; using defaults");
                GameConfig::default()
            }
        };
        log::info!("Game initialized with seed: {seed}");
        let leaderboard = store.load();
        Self {
            config: Arc::new(config),
            screen: Screen::Menu,
            mode: GameMode::Single,
            players: Vec::new(),
            store,
            leaderboard,
            rng: Pcg32::seed_from_u64(seed),
            cues: Vec::new(),
            events: Vec::new(),
            totals: Totals::default(),
            shop_player: 1,
            quit: false,
        }
    }

    // === Queries ===

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Player slot shown in the shop (1 or 2)
    pub fn shop_player(&self) -> u8 {
        self.shop_player
    }

    /// Skins owned by the shop's selected player slot
    pub fn shop_unlocked_count(&self) -> usize {
        skins::shop_unlocked_count(
            self.totals.for_player(self.shop_player),
            self.config.skin_unlock_score,
        )
    }

    /// Leaderboard as of the last time it was read or written
    pub fn high_scores(&self) -> &HighScores {
        &self.leaderboard
    }

    /// Take the audio cues produced since the last drain
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    /// Take simulation events (tagged with player slot) since the last drain
    pub fn drain_events(&mut self) -> Vec<(u8, GameEvent)> {
        std::mem::take(&mut self.events)
    }

    // === Transitions ===

    /// Main menu selection
    pub fn select(&mut self, action: MenuAction) {
        if self.screen != Screen::Menu {
            return;
        }
        match action {
            MenuAction::Play(mode) => self.start_game(mode),
            MenuAction::Scores => {
                self.leaderboard = self.store.load();
                self.set_screen(Screen::Scores);
            }
            MenuAction::Shop => self.set_screen(Screen::Shop),
            MenuAction::Quit => self.quit = true,
        }
    }

    /// Back action on the scores and shop screens
    pub fn back(&mut self) {
        if matches!(self.screen, Screen::Scores | Screen::Shop) {
            self.set_screen(Screen::Menu);
        }
    }

    /// Choose the player slot shown in the shop
    pub fn shop_select_player(&mut self, player: u8) {
        if self.screen == Screen::Shop && (player == 1 || player == 2) {
            self.shop_player = player;
        }
    }

    /// Game-over screen selection
    pub fn game_over_select(&mut self, action: GameOverAction) {
        if self.screen != Screen::GameOver {
            return;
        }
        match action {
            GameOverAction::Menu => {
                self.players.clear();
                self.set_screen(Screen::Menu);
            }
            GameOverAction::Restart => self.start_game(self.mode),
        }
    }

    /// Escape: leave a running game without recording it, otherwise quit
    pub fn escape(&mut self) {
        match self.screen {
            Screen::Game => {
                log::info!("Run abandoned");
                self.players.clear();
                self.cues.push(AudioCue::MusicStop);
                self.set_screen(Screen::Menu);
            }
            _ => self.quit = true,
        }
    }

    /// Begin a fresh run with 1 or 2 players
    pub fn start_game(&mut self, mode: GameMode) {
        self.mode = mode;
        self.players = (1..=mode.player_count())
            .map(|n| Player::new(n, Arc::clone(&self.config), self.rng.random()))
            .collect();
        self.events.clear();
        self.cues.push(AudioCue::MusicStart);
        self.set_screen(Screen::Game);
    }

    /// Edge-triggered key press during a run
    pub fn handle_key(&mut self, key: Key) {
        if self.screen != Screen::Game {
            return;
        }
        for player in self.players.iter_mut().filter(|p| p.alive) {
            if key == player.controls.left {
                player.move_left();
            } else if key == player.controls.right {
                player.move_right();
            }
        }
    }

    /// Advance every player one frame; ends the run if anyone crashed
    pub fn tick(&mut self) -> Screen {
        if self.screen != Screen::Game {
            return self.screen;
        }

        let mut all_alive = true;
        for player in &mut self.players {
            if !player.update() {
                all_alive = false;
            }
            for event in player.drain_events() {
                if matches!(event, GameEvent::ObstaclePassed { .. }) {
                    self.cues.push(AudioCue::Point);
                }
                self.events.push((player.number, event));
            }
        }

        if !all_alive {
            self.enter_game_over();
        }
        self.screen
    }

    fn enter_game_over(&mut self) {
        self.cues.push(AudioCue::MusicStop);
        self.cues.push(AudioCue::Collision);

        let date = highscores::today();
        for player in &self.players {
            let name = player.display_name();
            let score = player.score();
            self.totals.add(player.number, score);
            if let Err(e) = self.store.record(&name, score, &date) {
                log::warn!("Could not save score for {name}: {e}");
            }
        }
        self.leaderboard = self.store.load();
        self.set_screen(Screen::GameOver);
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }
}

//! Lane Dash - A retro lane-dodge racing game
//!
//! Core modules:
//! - `sim`: Deterministic per-player simulation (spawning, passing, collisions)
//! - `game`: Screen state machine and session controller
//! - `renderer`: Terminal rendering
//! - `platform`: Keyboard input mapping
//! - `persistence`: Atomic JSON save/load
//! - `config`: Data-driven game balance

pub mod audio;
pub mod config;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod skins;
pub mod ui;

pub use config::{GameConfig, Level};
pub use game::{Game, GameMode, Screen};
pub use highscores::{HighScores, JsonFileStore, ScoreStore};
pub use settings::Settings;

//! Lane Dash entry point
//!
//! Sets up the terminal and runs the fixed-rate game loop. Logs go to
//! stderr, so redirect it when raising the level:
//! `RUST_LOG=info lane-dash 2> lane-dash.log`

use std::io::{self, Stdout, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event},
    execute, terminal,
};

use lane_dash::audio::AudioManager;
use lane_dash::config::GameConfig;
use lane_dash::game::Game;
use lane_dash::highscores::{self, JsonFileStore};
use lane_dash::platform::input::map_key_event;
use lane_dash::renderer;
use lane_dash::settings::Settings;
use lane_dash::ui::Ui;

const SETTINGS_FILE: &str = "settings.json";

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Lane Dash starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let config = match &settings.config_file {
        Some(path) => GameConfig::load(Path::new(path)),
        None => GameConfig::default(),
    };
    let store = JsonFileStore::new(&settings.scores_file, config.max_high_scores);
    let seed = highscores::now_ms() as u64;
    let mut game = Game::new(config, Box::new(store), seed);

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    let result = execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )
    .and_then(|_| run(&mut out, &mut game, &settings));

    // Restore the terminal even when the loop failed
    let restored = execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )
    .and_then(|_| terminal::disable_raw_mode());

    match &result {
        Ok(()) => log::info!("Lane Dash exiting"),
        Err(e) => log::error!("Game loop failed: {e}"),
    }
    result.and(restored)
}

fn run(out: &mut Stdout, game: &mut Game, settings: &Settings) -> io::Result<()> {
    let mut ui = Ui::new();
    let mut audio = AudioManager::new(Some(stdout()), settings);
    let frame_dur = Duration::from_micros(settings.frame_micros());
    let mut size = terminal::size()?;

    let mut fps = 0.0_f32;
    let mut last_frame = Instant::now();

    while !game.should_quit() {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(key) = map_key_event(&key) {
                        ui.handle_key(game, key);
                    }
                }
                Event::Resize(cols, rows) => size = (cols, rows),
                _ => {}
            }
        }
        if game.should_quit() {
            break;
        }

        // Update
        game.tick();
        ui.sync(game.screen());
        audio.play_all(game.drain_cues());
        for (player, event) in game.drain_events() {
            log::trace!("P{player}: {event:?}");
        }

        // Render
        let dt = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();
        if dt > 0.0 {
            fps = fps * 0.9 + 0.1 / dt;
        }
        let shown = settings.show_fps.then_some(fps);
        renderer::draw(out, game, &ui, shown, size)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }

    Ok(())
}

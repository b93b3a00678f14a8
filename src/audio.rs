//! Audio cues
//!
//! The controller emits discrete cues; an `AudioManager` decides what, if
//! anything, to do with them. The simulation never depends on playback.

use std::io::Write;

use crate::settings::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// A car crashed (run over)
    Collision,
    /// An obstacle was passed
    Point,
    /// Background music should begin looping
    MusicStart,
    /// Background music should stop
    MusicStop,
}

/// Audio manager for the game
pub struct AudioManager<W: Write> {
    out: Option<W>,
    sfx_volume: f32,
    music_volume: f32,
    bell: bool,
    music_playing: bool,
}

impl<W: Write> AudioManager<W> {
    /// `out` receives terminal bell bytes; `None` disables output entirely
    pub fn new(out: Option<W>, settings: &Settings) -> Self {
        if out.is_none() {
            log::warn!("No audio output available - audio disabled");
        }
        Self {
            out,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            bell: settings.terminal_bell,
            music_playing: false,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Play a cue (best effort)
    pub fn play(&mut self, cue: AudioCue) {
        log::debug!("audio cue {cue:?}");
        match cue {
            AudioCue::MusicStart => self.music_playing = self.music_volume > 0.0,
            AudioCue::MusicStop => self.music_playing = false,
            AudioCue::Collision => self.ring(),
            // A bell per pass is too noisy at speed; only crashes ring
            AudioCue::Point => {}
        }
    }

    /// Play every cue in order
    pub fn play_all(&mut self, cues: impl IntoIterator<Item = AudioCue>) {
        for cue in cues {
            self.play(cue);
        }
    }

    fn ring(&mut self) {
        if !self.bell || self.sfx_volume <= 0.0 {
            return;
        }
        let Some(out) = self.out.as_mut() else { return };
        if out.write_all(b"\x07").and_then(|_| out.flush()).is_err() {
            log::warn!("Audio output failed - audio disabled");
            self.out = None;
        }
    }
}

//! Car skins
//!
//! Each player slot has its own palette. Skin 0 is always unlocked; the
//! others unlock one at a time, at random, when a run first crosses the
//! unlock score.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const CYAN: Rgb = Rgb(0, 255, 255);
pub const DARK_GREEN: Rgb = Rgb(0, 51, 0);
pub const GRAY: Rgb = Rgb(51, 51, 51);
pub const DARK_GRAY: Rgb = Rgb(33, 33, 33);
pub const BLUE: Rgb = Rgb(0, 100, 255);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PURPLE: Rgb = Rgb(200, 0, 255);
pub const PINK: Rgb = Rgb(255, 105, 180);
pub const LIME: Rgb = Rgb(50, 255, 50);
pub const GOLD: Rgb = Rgb(255, 215, 0);
pub const SILVER: Rgb = Rgb(192, 192, 192);
pub const BRONZE: Rgb = Rgb(205, 127, 50);

/// Paint job for a car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub name: &'static str,
    pub body: Rgb,
    pub window: Rgb,
    pub wheels: Rgb,
    /// 0 means always available
    pub unlock_score: u32,
}

const fn skin(name: &'static str, body: Rgb, window: Rgb, wheels: Rgb, unlock_score: u32) -> Skin {
    Skin {
        name,
        body,
        window,
        wheels,
        unlock_score,
    }
}

pub const PLAYER_ONE_SKINS: [Skin; 6] = [
    skin("CLASSIC", GREEN, CYAN, BLACK, 0),
    skin("BLUE SPORT", BLUE, WHITE, BLACK, 500),
    skin("FIRE ORANGE", ORANGE, YELLOW, BLACK, 500),
    skin("NEON PURPLE", PURPLE, PINK, BLACK, 500),
    skin("ELECTRIC LIME", LIME, YELLOW, BLACK, 500),
    skin("GOLD CHAMPION", GOLD, WHITE, BRONZE, 500),
];

pub const PLAYER_TWO_SKINS: [Skin; 6] = [
    skin("CLASSIC", YELLOW, CYAN, BLACK, 0),
    skin("SILVER RACING", SILVER, CYAN, BLACK, 500),
    skin("NEON PINK", PINK, WHITE, BLACK, 500),
    skin("FERRARI RED", RED, BLACK, DARK_GRAY, 500),
    skin("ELECTRIC BLUE", CYAN, BLUE, BLACK, 500),
    skin("CLASSIC BRONZE", BRONZE, ORANGE, BLACK, 500),
];

/// Palette for a player slot (1-based)
pub fn palette_for(player: u8) -> &'static [Skin] {
    if player == 2 {
        &PLAYER_TWO_SKINS
    } else {
        &PLAYER_ONE_SKINS
    }
}

/// Number of skins the shop shows as owned for a lifetime total
pub fn shop_unlocked_count(total_score: u64, unlock_score: u32) -> usize {
    let unlock_score = u64::from(unlock_score.max(1));
    if total_score < unlock_score {
        1
    } else {
        (1 + total_score / unlock_score).min(4) as usize
    }
}

/// Frames an unlock banner stays on screen (3 s at 60 fps)
pub const NOTIFICATION_FRAMES: u32 = 180;

/// Per-run skin selection and unlock bookkeeping
#[derive(Debug, Clone)]
pub struct SkinState {
    pub palette: &'static [Skin],
    pub current: usize,
    pub unlocked: Vec<usize>,
    /// Banner text and frames left to show it
    notification: Option<(String, u32)>,
}

impl SkinState {
    pub fn new(palette: &'static [Skin]) -> Self {
        Self {
            palette,
            current: 0,
            unlocked: vec![0],
            notification: None,
        }
    }

    pub fn current_skin(&self) -> &Skin {
        &self.palette[self.current]
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.contains(&index)
    }

    /// Unlock one random locked skin and wear it
    ///
    /// Returns the unlocked index, or `None` once every skin is owned.
    pub fn unlock_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        let locked: Vec<usize> = (0..self.palette.len())
            .filter(|&i| !self.is_unlocked(i) && self.palette[i].unlock_score > 0)
            .collect();
        let &index = locked.choose(rng)?;

        self.unlocked.push(index);
        self.current = index;
        let text = format!("NEW SKIN: {}!", self.palette[index].name);
        self.notification = Some((text, NOTIFICATION_FRAMES));
        Some(index)
    }

    /// Unlock banner currently on screen, if any
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_ref().map(|(text, _)| text.as_str())
    }

    /// Count one frame off the banner, clearing it when its time is up
    pub fn tick_notification(&mut self) {
        if let Some((_, frames)) = self.notification.as_mut() {
            *frames = frames.saturating_sub(1);
            if *frames == 0 {
                self.notification = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_always_unlocked() {
        let skins = SkinState::new(palette_for(1));
        assert!(skins.is_unlocked(0));
        assert_eq!(skins.current_skin().name, "CLASSIC");
        assert!(skins.notification().is_none());
    }

    #[test]
    fn test_unlock_never_repeats() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut skins = SkinState::new(palette_for(2));

        let mut seen = Vec::new();
        while let Some(index) = skins.unlock_random(&mut rng) {
            assert_ne!(index, 0);
            assert!(!seen.contains(&index));
            assert_eq!(skins.current, index);
            seen.push(index);
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(skins.unlocked.len(), 6);
    }

    #[test]
    fn test_notification_expires() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut skins = SkinState::new(palette_for(1));
        let index = skins.unlock_random(&mut rng).unwrap();

        let message = skins.notification().unwrap().to_string();
        assert!(message.contains(PLAYER_ONE_SKINS[index].name));

        for _ in 1..NOTIFICATION_FRAMES {
            skins.tick_notification();
        }
        assert_eq!(skins.notification(), Some(message.as_str()));
        skins.tick_notification();
        assert!(skins.notification().is_none());

        // Nothing pending is a no-op
        skins.tick_notification();
        assert!(skins.notification().is_none());
    }

    #[test]
    fn test_shop_unlocked_count() {
        assert_eq!(shop_unlocked_count(0, 500), 1);
        assert_eq!(shop_unlocked_count(499, 500), 1);
        assert_eq!(shop_unlocked_count(500, 500), 2);
        assert_eq!(shop_unlocked_count(1499, 500), 3);
        assert_eq!(shop_unlocked_count(10_000, 500), 4);
    }
}

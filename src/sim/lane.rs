//! Lane geometry
//!
//! The playfield is split into `lanes` equal integer-width slots. A car is
//! centred in its slot using integer division, matching the pixel layout the
//! renderer expects:
//! - slot width: `canvas_width / lanes`
//! - lane x: `lane * slot + (slot - car_width) / 2`

use crate::config::GameConfig;

/// Maps lane indices to x coordinates and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneGeometry {
    pub lanes: u32,
    pub slot_width: u32,
    pub car_width: u32,
}

impl LaneGeometry {
    pub fn new(canvas_width: u32, lanes: u32, car_width: u32) -> Self {
        Self {
            lanes,
            slot_width: canvas_width / lanes.max(1),
            car_width,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.canvas_width, config.lanes, config.player_width)
    }

    /// Left edge of a car centred in `lane`
    #[inline]
    pub fn lane_to_x(&self, lane: u32) -> f32 {
        (lane * self.slot_width + (self.slot_width - self.car_width) / 2) as f32
    }

    /// Lane containing `x` (floor division, no tolerance)
    #[inline]
    pub fn x_to_lane(&self, x: f32) -> u32 {
        (x / self.slot_width as f32).floor().max(0.0) as u32
    }

    /// Index of the right-most lane
    #[inline]
    pub fn last_lane(&self) -> u32 {
        self.lanes.saturating_sub(1)
    }
}

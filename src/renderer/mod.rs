//! Terminal rendering module
//!
//! `playfield` turns simulation state into cells; `terminal` writes screens.

pub mod playfield;
pub mod terminal;

pub use playfield::{Cell, Grid, rasterize};
pub use terminal::draw;

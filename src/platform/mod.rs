//! Platform abstraction layer
//!
//! Handles terminal differences for:
//! - Input events (key presses → game keys)

pub mod input;

pub use input::{Controls, Key};

//! Platform abstraction layer
//!
//! Turns raw key presses and clicks into deterministic `TickInput`s so the
//! frame loop stays a thin wrapper around whatever windowing it uses.

pub mod input;

pub use input::{Command, FrameInput, Key};

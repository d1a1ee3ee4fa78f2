//! Keyboard/mouse mapping

use std::collections::VecDeque;

use glam::Vec2;

use crate::layout::Layout;
use crate::settings::ArraySize;
use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    R,
    Num1,
    Num2,
    Num3,
    Space,
    Escape,
    Q,
    Other,
}

impl Key {
    /// Map a character as typed (case-insensitive)
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'r' => Key::R,
            '1' => Key::Num1,
            '2' => Key::Num2,
            '3' => Key::Num3,
            ' ' => Key::Space,
            'q' => Key::Q,
            '\u{1b}' => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Game-level command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    SetSize(ArraySize),
    TogglePause,
    Quit,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::R => Some(Command::Restart),
            Key::Num1 => Some(Command::SetSize(ArraySize::Small)),
            Key::Num2 => Some(Command::SetSize(ArraySize::Medium)),
            Key::Num3 => Some(Command::SetSize(ArraySize::Large)),
            Key::Space => Some(Command::TogglePause),
            Key::Escape | Key::Q => Some(Command::Quit),
            Key::Other => None,
        }
    }
}

/// Input gathered during one frame
///
/// Clicks are queued and handed out one per tick, so a select-then-swap that
/// lands between two updates is not collapsed into a single click.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub input: TickInput,
    pub quit: bool,
    clicks: VecDeque<usize>,
}

impl FrameInput {
    pub fn new(idle_mode: bool) -> Self {
        Self {
            input: TickInput {
                idle_mode,
                ..Default::default()
            },
            quit: false,
            clicks: VecDeque::new(),
        }
    }

    pub fn key(&mut self, key: Key) {
        match Command::from_key(key) {
            Some(Command::Restart) => self.input.restart = true,
            Some(Command::SetSize(size)) => self.input.size = Some(size),
            // Two presses in one frame cancel out
            Some(Command::TogglePause) => self.input.toggle_pause = !self.input.toggle_pause,
            Some(Command::Quit) => self.quit = true,
            None => {}
        }
    }

    /// Left click at `pos`; only the player's panel is interactive
    pub fn click(&mut self, layout: &Layout, pos: Vec2, bars: usize) {
        if let Some(index) = layout.bar_index_at(pos, bars) {
            self.clicks.push_back(index);
        }
    }

    /// Clicks not yet handed to a tick
    pub fn pending_clicks(&self) -> usize {
        self.clicks.len()
    }

    /// Input for the next tick: one-shot keys consumed, at most one queued click
    pub fn take(&mut self) -> TickInput {
        let idle_mode = self.input.idle_mode;
        let mut input = std::mem::replace(
            &mut self.input,
            TickInput {
                idle_mode,
                ..Default::default()
            },
        );
        // A restart tick ignores clicks, keep them for the new round
        if input.restart || input.size.is_some() {
            return input;
        }
        if input.click.is_none() {
            input.click = self.clicks.pop_front();
        }
        input
    }
}

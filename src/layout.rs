//! Panel geometry and bar hit-testing
//!
//! Screen coordinates, y pointing down. Left panel is the player's, right
//! panel is QuickSort's.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MARGIN, PANEL_GAP, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half-open containment (right/bottom edges excluded)
    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmplt(self.max).all()
    }

    /// Shrink by `horizontal` on both sides, `top` and `bottom` vertically
    pub fn inset(&self, horizontal: f32, top: f32, bottom: f32) -> Self {
        Self {
            min: self.min + Vec2::new(horizontal, top),
            max: self.max - Vec2::new(horizontal, bottom),
        }
    }
}

/// Bar area inset inside a panel (room for title and HUD)
const BAR_INSET_X: f32 = 12.0;
const BAR_INSET_TOP: f32 = 40.0;
const BAR_INSET_BOTTOM: f32 = 28.0;
/// Gap between neighbouring bars
const BAR_PADDING: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub size: Vec2,
    pub player_panel: Rect,
    pub algorithm_panel: Rect,
    pub player_bars: Rect,
    pub algorithm_bars: Rect,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let panel_w = ((width - 2.0 * MARGIN - PANEL_GAP) / 2.0).floor();
        let panel_h = height - 2.0 * MARGIN;
        let player_panel = Rect::new(MARGIN, MARGIN, panel_w, panel_h);
        let algorithm_panel = Rect::new(MARGIN + panel_w + PANEL_GAP, MARGIN, panel_w, panel_h);

        Self {
            size: Vec2::new(width, height),
            player_panel,
            algorithm_panel,
            player_bars: player_panel.inset(BAR_INSET_X, BAR_INSET_TOP, BAR_INSET_BOTTOM),
            algorithm_bars: algorithm_panel.inset(BAR_INSET_X, BAR_INSET_TOP, BAR_INSET_BOTTOM),
        }
    }

    /// Bar under `pos` in the player's panel, clamped to `0..bars`
    pub fn bar_index_at(&self, pos: Vec2, bars: usize) -> Option<usize> {
        if bars == 0 || !self.player_bars.contains(pos) {
            return None;
        }
        let w = self.player_bars.width() / bars as f32;
        let idx = ((pos.x - self.player_bars.min.x) / w).floor() as usize;
        Some(idx.min(bars - 1))
    }

    /// Rectangle for bar `idx` of `bars`, height scaled between `min` and `max`
    pub fn bar_rect(area: &Rect, idx: usize, bars: usize, value: u32, min: u32, max: u32) -> Rect {
        let w = area.width() / bars.max(1) as f32;
        let range = max.saturating_sub(min) as f32 + 1.0;
        let unit = (area.height() - 8.0) / range;
        let h = (value.saturating_sub(min) as f32 + 1.0) * unit;
        let x = area.min.x + idx as f32 * w;
        Rect::new(
            x + BAR_PADDING,
            area.max.y - h,
            (w - 2.0 * BAR_PADDING).max(1.0),
            h,
        )
    }
}

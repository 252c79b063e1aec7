//! Utility functions for color names and geometry.
//!
//! This module provides:
//! - Color name lookup for config files and scripts
//! - The [`Rect`] helper used for dirty region tracking
//! - Small point helpers shared by the shape rules

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and gesture scripts to parse color names.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black", "transparent"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Euclidean distance between two points.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// Midpoint of the segment `a`-`b`.
pub fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Clamps a point into `[0, width) x [0, height)`.
pub fn clamp_point(x: i32, y: i32, width: u32, height: u32) -> (i32, i32) {
    let max_x = (width.min(i32::MAX as u32) as i32 - 1).max(0);
    let max_y = (height.min(i32::MAX as u32) as i32 - 1).max(0);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Clips the rectangle to `[0, width) x [0, height)`; `None` if nothing remains.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if the pixel `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

//! Active drawing style set by the color and opacity pickers.

use crate::draw::{Color, Hsl, Rgba};

/// Color, opacity and fill toggle read at the start of every operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveStyle {
    /// Picker color
    pub color: Hsl,
    /// Opacity in `0.0..=1.0`, independent of the color
    pub opacity: f64,
    /// Whether closed shapes are filled instead of outlined
    pub fill_enabled: bool,
}

impl Default for ActiveStyle {
    /// Opaque `hsl(0, 100%, 50%)` with fill off.
    fn default() -> Self {
        Self {
            color: Hsl::new(0.0, 100.0, 50.0),
            opacity: 1.0,
            fill_enabled: false,
        }
    }
}

impl ActiveStyle {
    pub fn new(color: Hsl, opacity: f64, fill_enabled: bool) -> Self {
        Self {
            color,
            opacity: clamp_opacity(opacity),
            fill_enabled,
        }
    }

    /// Stroke/shape color with the opacity applied as alpha.
    pub fn paint_color(&self) -> Color {
        self.color.to_color(self.opacity)
    }

    /// Bucket color: the style as it would look on an opaque white page.
    pub fn fill_rgba(&self) -> Rgba {
        self.paint_color().over_white()
    }

    pub fn set_color(&mut self, color: Hsl) {
        self.color = color;
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = clamp_opacity(opacity);
    }
}

fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

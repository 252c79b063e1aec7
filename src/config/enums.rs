//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, transparent
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Returns the color if the specification is valid.
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            }),
        }
    }

    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to `fallback` with a warning.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        self.resolve().unwrap_or_else(|| {
            warn!("Unknown color {:?}, using fallback", self);
            fallback
        })
    }

    /// Converts the color specification, defaulting unknown names to red.
    pub fn to_color(&self) -> Color {
        self.to_color_or(RED)
    }
}

//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{DEFAULT_STAR_POINTS, DEFAULT_TOLERANCE, FillStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas size and background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Buffer width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Buffer height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Initial fill of a new buffer; "transparent" starts with an empty page
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Drawing-related settings.
///
/// Controls the tool and style selected when a drawing surface is created.
/// The host can change color, opacity, fill and tool at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub default_opacity: f64,

    /// Pen stroke width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_pen_width")]
    pub pen_width: f64,

    /// Eraser brush width in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,

    /// Outline width of unfilled shapes (valid range: 1.0 - 50.0)
    #[serde(default = "default_shape_line_width")]
    pub shape_line_width: f64,

    /// Fill closed shapes instead of outlining them
    #[serde(default)]
    pub fill_shapes: bool,

    /// Initial tool: pen, eraser, bucket, line, rectangle, circle, triangle,
    /// pentagon, hexagon or star
    #[serde(default = "default_tool")]
    pub default_tool: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_opacity: default_opacity(),
            pen_width: default_pen_width(),
            eraser_width: default_eraser_width(),
            shape_line_width: default_shape_line_width(),
            fill_shapes: false,
            default_tool: default_tool(),
        }
    }
}

/// Bucket tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FillConfig {
    /// Maximum per-channel difference still treated as the target color (0 - 255)
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,

    /// Traversal strategy: "stack" (pixel by pixel) or "scanline" (run by run)
    #[serde(default)]
    pub strategy: FillStrategy,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            strategy: FillStrategy::default(),
        }
    }
}

/// Shape tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapesConfig {
    /// Number of tips on the star tool (valid range: 2 - 32)
    #[serde(default = "default_star_points")]
    pub star_points: u32,
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self {
            star_points: default_star_points(),
        }
    }
}

/// Where exported drawings go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for exported PNG files (supports ~ for home directory)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template (chrono format specifiers, without extension)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    500
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_opacity() -> f64 {
    1.0
}

fn default_pen_width() -> f64 {
    4.0
}

fn default_eraser_width() -> f64 {
    20.0
}

fn default_shape_line_width() -> f64 {
    2.0
}

fn default_tool() -> String {
    "pen".to_string()
}

fn default_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

fn default_star_points() -> u32 {
    DEFAULT_STAR_POINTS
}

fn default_export_directory() -> String {
    "~/Pictures/Rasterpad".to_string()
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S".to_string()
}

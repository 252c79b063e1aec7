//! Configuration file support for rasterpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/rasterpad/config.toml`. Settings include the canvas size, the
//! initial tool and style, brush widths, bucket tolerance and export location.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, ExportConfig, FillConfig, ShapesConfig};

use crate::draw::{Hsl, Rgba, color::WHITE};
use crate::input::{ActiveStyle, ToolMode, ToolSettings};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 500
/// background = "white"
///
/// [drawing]
/// default_color = "red"
/// default_opacity = 1.0
/// pen_width = 4.0
/// default_tool = "pen"
///
/// [fill]
/// tolerance = 12
/// strategy = "scanline"
///
/// [shapes]
/// star_points = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Initial tool, style and brush widths
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Bucket tool settings
    #[serde(default)]
    pub fill: FillConfig,

    /// Shape tool settings
    #[serde(default)]
    pub shapes: ShapesConfig,

    /// PNG export location
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default when they cannot be interpreted) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width` / `canvas.height`: 1 - 16384
    /// - `default_opacity`: 0.0 - 1.0
    /// - `pen_width`: 1.0 - 100.0
    /// - `eraser_width`: 1.0 - 200.0
    /// - `shape_line_width`: 1.0 - 50.0
    /// - `star_points`: 2 - 32
    fn validate_and_clamp(&mut self) {
        // Canvas: 1 - 16384 per side
        if !(1..=16384).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-16384 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, 16384);
        }
        if !(1..=16384).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-16384 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, 16384);
        }

        self.drawing.default_opacity =
            clamp_setting("default_opacity", self.drawing.default_opacity, 0.0, 1.0, 1.0);
        self.drawing.pen_width = clamp_setting("pen_width", self.drawing.pen_width, 1.0, 100.0, 4.0);
        self.drawing.eraser_width =
            clamp_setting("eraser_width", self.drawing.eraser_width, 1.0, 200.0, 20.0);
        self.drawing.shape_line_width = clamp_setting(
            "shape_line_width",
            self.drawing.shape_line_width,
            1.0,
            50.0,
            2.0,
        );

        // Star points: 2 - 32
        if !(2..=32).contains(&self.shapes.star_points) {
            log::warn!(
                "Invalid star_points {}, clamping to 2-32 range",
                self.shapes.star_points
            );
            self.shapes.star_points = self.shapes.star_points.clamp(2, 32);
        }

        if self.drawing.default_color.resolve().is_none() {
            log::warn!(
                "Invalid default_color {:?}, falling back to 'red'",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::Name("red".to_string());
        }

        if self.canvas.background.resolve().is_none() {
            log::warn!(
                "Invalid canvas background {:?}, falling back to 'white'",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::Name("white".to_string());
        }

        if self.drawing.default_tool.parse::<ToolMode>().is_err() {
            log::warn!(
                "Invalid default_tool '{}', falling back to 'pen'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = "pen".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export filename_template, using the default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/rasterpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("rasterpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at `~/.config/rasterpad/config.toml`.
    /// If the file doesn't exist, returns a Config with default values. All loaded values
    /// are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml_str(config_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }

    /// Saves the current configuration to the default config path.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Serializes the config to TOML and writes it to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema of the configuration file, for editors and external tools.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Initial pixel value of a new buffer.
    pub fn background(&self) -> Rgba {
        self.canvas.background.to_color_or(WHITE).to_rgba()
    }

    /// Style the drawing surface starts with.
    pub fn initial_style(&self) -> ActiveStyle {
        ActiveStyle::new(
            Hsl::from_color(self.drawing.default_color.to_color()),
            self.drawing.default_opacity,
            self.drawing.fill_shapes,
        )
    }

    /// Tool the drawing surface starts with; unknown names mean the pen.
    pub fn initial_tool(&self) -> ToolMode {
        self.drawing.default_tool.parse().unwrap_or_default()
    }

    /// Brush widths, star points and bucket settings.
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            pen_width: self.drawing.pen_width,
            eraser_width: self.drawing.eraser_width,
            shape_line_width: self.drawing.shape_line_width,
            star_points: self.shapes.star_points,
            tolerance: self.fill.tolerance,
            fill_strategy: self.fill.strategy,
        }
    }
}

/// Clamps a float setting, replacing non-finite values with `default`.
fn clamp_setting(name: &str, value: f64, min: f64, max: f64, default: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("Invalid {name} {value}, using {default:.1}");
        return default;
    }
    if !(min..=max).contains(&value) {
        log::warn!("Invalid {name} {value:.1}, clamping to {min:.1}-{max:.1} range");
        return value.clamp(min, max);
    }
    value
}

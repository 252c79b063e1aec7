//! Gesture scripts: TOML files that replay picker and pointer input.
//!
//! A script is a list of `[[step]]` tables applied in order to a
//! [`DrawingSurfaceController`]. It lets a host (or a test) reproduce a drawing
//! session without a pointer device.
//!
//! ```toml
//! [[step]]
//! op = "shape"
//! kind = "rectangle"
//!
//! [[step]]
//! op = "drag"
//! from = [10, 10]
//! to = [50, 50]
//!
//! [[step]]
//! op = "tool"
//! name = "bucket"
//!
//! [[step]]
//! op = "start"
//! x = 30
//! y = 30
//! ```

use crate::draw::{DrawError, ShapeKind};
use crate::input::{DrawingSurfaceController, ToolMode};
use crate::util;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Step {step}: {source}")]
    Draw {
        step: usize,
        #[source]
        source: DrawError,
    },

    #[error("Step {step}: unknown color '{name}'")]
    UnknownColor { step: usize, name: String },
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    /// Select a tool by picker name (pen, eraser, bucket or a shape name)
    Tool { name: String },
    /// Select a shape tool
    Shape { kind: String },
    /// Set the color from picker values
    Color {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
    /// Set the color by name (red, blue, ...)
    NamedColor { name: String },
    /// Set the opacity (0.0 - 1.0)
    Opacity { value: f64 },
    /// Toggle shape filling
    Fill { enabled: bool },
    /// Pointer pressed
    Start { x: i32, y: i32 },
    /// Pointer dragged
    Move { x: i32, y: i32 },
    /// Pointer released
    End,
    /// Gesture aborted
    Cancel,
    /// Start, evenly spaced moves, end
    Drag {
        from: [i32; 2],
        to: [i32; 2],
        #[serde(default = "default_drag_steps")]
        steps: u32,
    },
    /// Reset the whole buffer (white unless a color name is given)
    Clear {
        #[serde(default)]
        color: Option<String>,
    },
}

fn default_drag_steps() -> u32 {
    1
}

/// A parsed gesture script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a script from TOML text.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path)?;
        let script = Self::parse(&source)?;
        log::info!(
            "Loaded script with {} steps from {}",
            script.steps.len(),
            path.display()
        );
        Ok(script)
    }

    /// Applies every step in order, stopping at the first failure.
    ///
    /// Steps are numbered from 1 in errors.
    pub fn apply(&self, controller: &mut DrawingSurfaceController) -> Result<(), ScriptError> {
        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("Script step {}: {:?}", index + 1, step);
            step.apply(controller, index + 1)?;
        }
        Ok(())
    }
}

impl Step {
    fn apply(
        &self,
        controller: &mut DrawingSurfaceController,
        step: usize,
    ) -> Result<(), ScriptError> {
        let draw = |source: DrawError| ScriptError::Draw { step, source };

        match self {
            Step::Tool { name } => controller.set_tool_mode(name.parse().map_err(draw)?),
            Step::Shape { kind } => {
                let kind: ShapeKind = kind.parse().map_err(draw)?;
                controller.set_tool_mode(ToolMode::Shape(kind));
            }
            Step::Color {
                hue,
                saturation,
                lightness,
            } => controller.set_active_color(*hue, *saturation, *lightness),
            Step::NamedColor { name } => {
                let color = util::name_to_color(name).ok_or_else(|| ScriptError::UnknownColor {
                    step,
                    name: name.clone(),
                })?;
                controller.set_active_rgb(color);
            }
            Step::Opacity { value } => controller.set_active_opacity(*value),
            Step::Fill { enabled } => controller.set_fill_enabled(*enabled),
            Step::Start { x, y } => controller.gesture_start(*x, *y).map_err(draw)?,
            Step::Move { x, y } => controller.gesture_move(*x, *y).map_err(draw)?,
            Step::End => controller.gesture_end(),
            Step::Cancel => controller.gesture_cancel().map_err(draw)?,
            Step::Drag { from, to, steps } => {
                controller.gesture_start(from[0], from[1]).map_err(draw)?;
                let count = (*steps).max(1);
                for i in 1..=count {
                    let t = i as f64 / count as f64;
                    let x = from[0] as f64 + (to[0] as f64 - from[0] as f64) * t;
                    let y = from[1] as f64 + (to[1] as f64 - from[1] as f64) * t;
                    controller
                        .gesture_move(x.round() as i32, y.round() as i32)
                        .map_err(draw)?;
                }
                controller.gesture_end();
            }
            Step::Clear { color } => {
                let rgba = match color {
                    Some(name) => util::name_to_color(name)
                        .ok_or_else(|| ScriptError::UnknownColor {
                            step,
                            name: name.clone(),
                        })?
                        .to_rgba(),
                    None => crate::draw::Rgba::WHITE,
                };
                controller.clear(rgba);
            }
        }
        Ok(())
    }
}

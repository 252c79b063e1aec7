//! Drawing tool selection.

use crate::draw::{DrawError, ShapeKind};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what a gesture does to the pixel buffer.
/// Tools are chosen by the host's tool picker between gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolMode {
    /// Freehand drawing - follows the pointer path (default)
    #[default]
    Pen,
    /// Clears pixels under a wide round brush
    Eraser,
    /// Flood fill on press, no drag
    Bucket,
    /// Live-previewed shape from anchor to pointer
    Shape(ShapeKind),
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Pen => "pen",
            ToolMode::Eraser => "eraser",
            ToolMode::Bucket => "bucket",
            ToolMode::Shape(kind) => kind.name(),
        }
    }

    /// Shape tools preview against a snapshot of the buffer.
    pub fn needs_preview(&self) -> bool {
        matches!(self, ToolMode::Shape(_))
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolMode {
    type Err = DrawError;

    /// Parses a tool picker name (`pen`, `eraser`, `bucket`, or any shape name).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pen" => Ok(ToolMode::Pen),
            "eraser" => Ok(ToolMode::Eraser),
            "bucket" => Ok(ToolMode::Bucket),
            _ => s
                .parse::<ShapeKind>()
                .map(ToolMode::Shape)
                .map_err(|_| DrawError::UnknownTool(s.trim().to_string())),
        }
    }
}

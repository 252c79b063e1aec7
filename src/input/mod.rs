//! Gesture handling and tool state machine.
//!
//! This module translates host pointer gestures into pixel buffer operations.
//! It holds the current tool, the active style (color, opacity, fill toggle),
//! and the state machine that tracks a gesture from press to release.

pub mod events;
pub mod state;
pub mod style;
pub mod tool;

// Re-export commonly used types at module level
pub use events::GestureEvent;
pub use state::{DrawingState, DrawingSurfaceController, PreviewSnapshot, ToolSettings};
pub use style::ActiveStyle;
pub use tool::ToolMode;

mod core;
mod gesture;
#[cfg(test)]
mod tests;

pub use core::{DrawingState, DrawingSurfaceController, PreviewSnapshot, ToolSettings};

//! Pixel buffer, rasterization and flood fill.
//!
//! This module defines the core drawing types:
//! - [`Color`], [`Hsl`], [`Rgba`]: color values from picker to pixel
//! - [`PixelBuffer`]: the RGBA raster that is the drawing itself
//! - [`ShapeKind`] / [`ShapePath`]: geometry rules for the shape tools
//! - Rasterization functions writing strokes and shapes into the buffer
//! - [`flood_fill`]: the bucket tool

pub mod buffer;
pub mod color;
pub mod dirty;
pub mod error;
pub mod fill;
pub mod raster;
pub mod shape;

// Re-export commonly used types at module level
pub use buffer::PixelBuffer;
pub use color::{Color, Hsl, Rgba};
pub use dirty::DirtyTracker;
pub use error::DrawError;
pub use fill::{DEFAULT_TOLERANCE, FillReport, FillStrategy, flood_fill};
pub use raster::{
    Paint, StrokeMask, fill_path, render_shape, stroke_path, stroke_segment, stroke_segment_once,
};
pub use shape::{DEFAULT_STAR_POINTS, ShapeKind, ShapePath};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};

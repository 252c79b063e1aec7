//! Pixel-buffer drawing core.
//!
//! Exposes the drawing surface controller alongside the raster, fill and
//! configuration modules it relies on, so hosts (a windowing front end, the
//! `rasterpad` script runner, tests) share one implementation of every tool.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use input::DrawingSurfaceController;

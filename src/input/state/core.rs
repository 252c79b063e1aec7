//! Drawing state machine and controller state.

use crate::config::Config;
use crate::draw::{
    Color, DEFAULT_STAR_POINTS, DEFAULT_TOLERANCE, DirtyTracker, DrawError, FillStrategy, Hsl,
    PixelBuffer, Rgba, StrokeMask,
};
use crate::input::{style::ActiveStyle, tool::ToolMode};
use crate::util::{self, Rect};

/// Full copy of the buffer taken when a shape gesture starts.
///
/// Every preview frame restores this copy before drawing, so only the latest
/// frame is ever visible. Dropped when the gesture ends.
#[derive(Debug, Clone)]
pub struct PreviewSnapshot {
    pixels: PixelBuffer,
}

impl PreviewSnapshot {
    pub fn capture(buffer: &PixelBuffer) -> Self {
        Self {
            pixels: buffer.clone(),
        }
    }

    /// Writes the captured pixels back into `buffer`.
    pub fn restore(&self, buffer: &mut PixelBuffer) -> Result<(), DrawError> {
        buffer.restore_from(&self.pixels)
    }
}

/// Current gesture state machine.
///
/// Tracks whether the user is idle or in the middle of a drag.
#[derive(Debug)]
pub enum DrawingState {
    /// No gesture in progress
    Idle,
    /// Pointer is down
    Drawing {
        /// Tool captured when the gesture started
        tool: ToolMode,
        /// Where the pointer went down
        anchor: (i32, i32),
        /// Most recent pointer position (start of the next pen/eraser segment)
        last: (i32, i32),
        /// Buffer copy for shape previews (`None` for pen and eraser)
        preview: Option<PreviewSnapshot>,
        /// Pixels the pen has painted so far (`None` for other tools)
        stroke: Option<StrokeMask>,
    },
}

/// Fixed tool parameters that do not come from the style pickers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    /// Freehand stroke width in pixels
    pub pen_width: f64,
    /// Eraser brush width in pixels
    pub eraser_width: f64,
    /// Outline width for unfilled shapes
    pub shape_line_width: f64,
    /// Tips on the star tool
    pub star_points: u32,
    /// Per-channel bucket tolerance
    pub tolerance: u8,
    /// Bucket traversal
    pub fill_strategy: FillStrategy,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            pen_width: 4.0,
            eraser_width: 20.0,
            shape_line_width: 2.0,
            star_points: DEFAULT_STAR_POINTS,
            tolerance: DEFAULT_TOLERANCE,
            fill_strategy: FillStrategy::Stack,
        }
    }
}

/// Owns the pixel buffer and routes gestures to the active tool.
///
/// Style and tool setters can be called at any time; the style is read again
/// on every event, the tool is captured when a gesture starts.
pub struct DrawingSurfaceController {
    /// The drawing itself
    pub(crate) buffer: PixelBuffer,
    /// Tool chosen by the tool picker
    pub(crate) tool_mode: ToolMode,
    /// Color, opacity and fill toggle
    pub(crate) style: ActiveStyle,
    /// Brush widths, star points, bucket tolerance
    pub(crate) settings: ToolSettings,
    /// Current gesture state machine
    pub(crate) state: DrawingState,
    /// Tracks dirty regions between blits
    pub(crate) dirty_tracker: DirtyTracker,
    /// Bounds of the shape preview currently in the buffer (if any)
    pub(crate) last_preview_bounds: Option<Rect>,
}

impl DrawingSurfaceController {
    /// Creates a white `width` x `height` surface with default style and settings.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_settings(
            PixelBuffer::new(width, height, Rgba::WHITE),
            ActiveStyle::default(),
            ToolMode::default(),
            ToolSettings::default(),
        )
    }

    /// Creates a controller around an existing buffer.
    pub fn with_settings(
        buffer: PixelBuffer,
        style: ActiveStyle,
        tool_mode: ToolMode,
        settings: ToolSettings,
    ) -> Self {
        let mut dirty_tracker = DirtyTracker::new();
        dirty_tracker.mark_full();
        Self {
            buffer,
            tool_mode,
            style,
            settings,
            state: DrawingState::Idle,
            dirty_tracker,
            last_preview_bounds: None,
        }
    }

    /// Creates a controller sized, styled and tuned from the configuration.
    pub fn from_config(config: &Config) -> Self {
        let buffer = PixelBuffer::new(
            config.canvas.width,
            config.canvas.height,
            config.background(),
        );
        Self::from_config_with_buffer(config, buffer)
    }

    /// Like [`from_config`](Self::from_config) but drawing on an existing image.
    pub fn from_config_with_buffer(config: &Config, buffer: PixelBuffer) -> Self {
        Self::with_settings(
            buffer,
            config.initial_style(),
            config.initial_tool(),
            config.tool_settings(),
        )
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Consumes the controller, handing the finished drawing to the caller.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    pub fn active_style(&self) -> &ActiveStyle {
        &self.style
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Returns true while a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Selects the tool for the next gesture.
    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if self.is_drawing() && mode != self.tool_mode {
            log::debug!("Tool changed to {mode} mid-gesture; applies from the next gesture");
        }
        self.tool_mode = mode;
    }

    /// Sets the active color from picker values (degrees, percent, percent).
    pub fn set_active_color(&mut self, hue: f64, saturation: f64, lightness: f64) {
        self.style.set_color(Hsl::new(hue, saturation, lightness));
    }

    /// Sets the active color from an RGB value (its alpha is ignored).
    pub fn set_active_rgb(&mut self, color: Color) {
        self.style.set_color(Hsl::from_color(color));
    }

    /// Sets the opacity, clamped to `0.0..=1.0`.
    pub fn set_active_opacity(&mut self, opacity: f64) {
        self.style.set_opacity(opacity);
    }

    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.style.fill_enabled = enabled;
    }

    pub fn set_settings(&mut self, settings: ToolSettings) {
        self.settings = settings;
    }

    /// Drains pending dirty rectangles for the current buffer size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = self.buffer.width().min(i32::MAX as u32) as i32;
        let height = self.buffer.height().min(i32::MAX as u32) as i32;
        self.dirty_tracker.take_regions(width, height)
    }

    /// Resets the whole buffer to `color`, abandoning any gesture in progress.
    pub fn clear(&mut self, color: Rgba) {
        if self.is_drawing() {
            log::debug!("Clearing buffer during a gesture; gesture dropped");
        }
        self.state = DrawingState::Idle;
        self.last_preview_bounds = None;
        self.buffer.fill(color);
        self.dirty_tracker.mark_full();
    }

    pub(crate) fn clamp_point(&self, x: i32, y: i32) -> (i32, i32) {
        util::clamp_point(x, y, self.buffer.width(), self.buffer.height())
    }

    /// Records the bounds of a new preview frame, dirtying the old and new areas.
    pub(crate) fn update_preview_dirty(&mut self, bounds: Option<Rect>) {
        if let Some(prev) = self.last_preview_bounds.take() {
            self.dirty_tracker.mark_rect(prev);
        }
        self.dirty_tracker.mark_optional_rect(bounds);
        self.last_preview_bounds = bounds;
    }
}

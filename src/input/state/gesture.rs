use crate::draw::{
    DrawError, Paint, StrokeMask, flood_fill, render_shape, stroke_segment, stroke_segment_once,
};
use crate::input::{events::GestureEvent, tool::ToolMode};
use log::{debug, trace, warn};

use super::core::PreviewSnapshot;
use super::{DrawingState, DrawingSurfaceController};

impl DrawingSurfaceController {
    /// Dispatches one gesture event to the matching handler.
    pub fn handle_event(&mut self, event: GestureEvent) -> Result<(), DrawError> {
        match event {
            GestureEvent::Start { x, y } => self.gesture_start(x, y),
            GestureEvent::Move { x, y } => self.gesture_move(x, y),
            GestureEvent::End => {
                self.gesture_end();
                Ok(())
            }
            GestureEvent::Cancel => self.gesture_cancel(),
        }
    }

    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Bucket: fills at the point; the gesture ends immediately
    /// - Pen/Eraser: remembers the point as the start of the first segment
    /// - Shape: remembers the anchor and snapshots the buffer for previews
    ///
    /// # Errors
    /// [`DrawError::GestureInProgress`] if a gesture is already active. The
    /// running gesture and the buffer are left untouched.
    pub fn gesture_start(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        if self.is_drawing() {
            warn!("Ignoring gesture start at ({x}, {y}): a gesture is already in progress");
            return Err(DrawError::GestureInProgress);
        }

        let point = self.clamp_point(x, y);
        let tool = self.tool_mode;

        if tool == ToolMode::Bucket {
            let report = flood_fill(
                &mut self.buffer,
                point.0,
                point.1,
                self.style.fill_rgba(),
                self.settings.tolerance,
                self.settings.fill_strategy,
            );
            self.dirty_tracker.mark_optional_rect(report.bounds);
            return Ok(());
        }

        let preview = tool
            .needs_preview()
            .then(|| PreviewSnapshot::capture(&self.buffer));
        let stroke = (tool == ToolMode::Pen).then(|| StrokeMask::new(&self.buffer));

        debug!("Gesture started with {tool} at {point:?}");
        self.state = DrawingState::Drawing {
            tool,
            anchor: point,
            last: point,
            preview,
            stroke,
        };
        Ok(())
    }

    /// Processes pointer motion while pressed. Does nothing when idle.
    ///
    /// # Behavior
    /// - Pen: strokes from the previous point with the current style; pixels
    ///   this gesture already painted are not blended again
    /// - Eraser: clears a wide segment from the previous point
    /// - Shape: restores the snapshot, then draws the shape anchor-to-pointer
    ///
    /// # Errors
    /// [`DrawError::UnsupportedShapeKind`] when the configured star has too few
    /// points; the previous preview frame stays in place.
    pub fn gesture_move(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        let DrawingState::Drawing {
            tool, anchor, last, ..
        } = self.state
        else {
            return Ok(());
        };

        let point = self.clamp_point(x, y);
        trace!("Gesture move to {point:?} with {tool}");

        match tool {
            ToolMode::Pen => {
                let paint = Paint::Source(self.style.paint_color());
                if let DrawingState::Drawing {
                    stroke: Some(stroke),
                    ..
                } = &mut self.state
                {
                    let touched = stroke_segment_once(
                        &mut self.buffer,
                        last,
                        point,
                        self.settings.pen_width,
                        paint,
                        stroke,
                    );
                    self.dirty_tracker.mark_optional_rect(touched);
                }
            }
            ToolMode::Eraser => {
                let touched = stroke_segment(
                    &mut self.buffer,
                    last,
                    point,
                    self.settings.eraser_width,
                    Paint::Clear,
                );
                self.dirty_tracker.mark_optional_rect(touched);
            }
            ToolMode::Shape(kind) => {
                let path = kind.path(anchor, point, self.settings.star_points)?;
                if let DrawingState::Drawing {
                    preview: Some(snapshot),
                    ..
                } = &self.state
                {
                    snapshot.restore(&mut self.buffer)?;
                }

                let filled = self.style.fill_enabled && kind.is_fillable();
                let touched = render_shape(
                    &mut self.buffer,
                    &path,
                    filled,
                    self.settings.shape_line_width,
                    Paint::Source(self.style.paint_color()),
                );
                self.update_preview_dirty(touched);
            }
            // Bucket gestures never enter the drawing state.
            ToolMode::Bucket => {}
        }

        if let DrawingState::Drawing { last, .. } = &mut self.state {
            *last = point;
        }
        Ok(())
    }

    /// Processes pointer release. The buffer already holds the committed result.
    pub fn gesture_end(&mut self) {
        if let DrawingState::Drawing { tool, anchor, last, .. } = &self.state {
            debug!("Gesture with {tool} ended ({anchor:?} -> {last:?})");
        }
        self.state = DrawingState::Idle;
        self.last_preview_bounds = None;
    }

    /// Aborts the current gesture.
    ///
    /// A shape preview is removed by restoring the snapshot. Pen and eraser
    /// segments already drawn stay in the buffer.
    pub fn gesture_cancel(&mut self) -> Result<(), DrawError> {
        let state = std::mem::replace(&mut self.state, DrawingState::Idle);
        if let DrawingState::Drawing { tool, preview, .. } = state {
            debug!("Gesture with {tool} cancelled");
            if let Some(snapshot) = preview {
                snapshot.restore(&mut self.buffer)?;
                self.update_preview_dirty(None);
            }
        }
        self.last_preview_bounds = None;
        Ok(())
    }
}

//! Software rasterization of strokes and shape paths into a [`PixelBuffer`].
//!
//! Coverage is binary and sampled at pixel centers. Each primitive first
//! collects the pixels it covers into a mask and then composites every covered
//! pixel exactly once, so overlapping segments of one outline do not build up
//! translucent colors. Freehand strokes are drawn one segment per pointer move;
//! a [`StrokeMask`] carries that guarantee across the segments of a gesture.

use super::buffer::PixelBuffer;
use super::color::{Color, Rgba};
use super::shape::ShapePath;
use crate::util::Rect;

/// How covered pixels are written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Source-over compositing with the given color (alpha included)
    Source(Color),
    /// Destination pixels become fully transparent
    Clear,
}

/// Pixels already painted by the current freehand stroke.
///
/// Segments drawn through [`stroke_segment_once`] skip these, so the round
/// joints between consecutive segments are composited a single time.
#[derive(Debug, Clone)]
pub struct StrokeMask {
    width: i32,
    painted: Vec<bool>,
}

impl StrokeMask {
    /// Empty mask sized to `buffer`.
    pub fn new(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width() as i32,
            painted: vec![false; buffer.width() as usize * buffer.height() as usize],
        }
    }

    /// Marks `(x, y)` painted; returns false if it already was.
    fn claim(&mut self, x: i32, y: i32) -> bool {
        let Some(slot) = self.painted.get_mut((y * self.width + x) as usize) else {
            return false;
        };
        !std::mem::replace(slot, true)
    }
}

/// Pixel mask over a window of the buffer.
struct Coverage {
    x0: i32,
    y0: i32,
    width: i32,
    height: i32,
    mask: Vec<bool>,
}

impl Coverage {
    /// Window covering `bounds` grown by `pad`, clipped to the buffer.
    fn new(buffer: &PixelBuffer, bounds: (f64, f64, f64, f64), pad: f64) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = bounds;
        // Clip in f64: coordinates may sit anywhere in the i32 range.
        let x0 = ((min_x - pad).floor() - 1.0).max(0.0);
        let y0 = ((min_y - pad).floor() - 1.0).max(0.0);
        let x1 = ((max_x + pad).ceil() + 1.0).min(buffer.width() as f64);
        let y1 = ((max_y + pad).ceil() + 1.0).min(buffer.height() as f64);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        let (x0, y0, x1, y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
        let width = x1 - x0;
        let height = y1 - y0;
        Some(Self {
            x0,
            y0,
            width,
            height,
            mask: vec![false; width as usize * height as usize],
        })
    }

    fn mark(&mut self, x: i32, y: i32) {
        let (lx, ly) = (x - self.x0, y - self.y0);
        if lx >= 0 && ly >= 0 && lx < self.width && ly < self.height {
            self.mask[(ly * self.width + lx) as usize] = true;
        }
    }

    /// Marks every pixel whose center lies within `half_width` of segment `a`-`b`.
    fn cover_segment(&mut self, a: (f64, f64), b: (f64, f64), half_width: f64) {
        let min_x = ((a.0.min(b.0) - half_width).floor() as i32).max(self.x0);
        let max_x = ((a.0.max(b.0) + half_width).ceil() as i32).min(self.x0 + self.width - 1);
        let min_y = ((a.1.min(b.1) - half_width).floor() as i32).max(self.y0);
        let max_y = ((a.1.max(b.1) + half_width).ceil() as i32).min(self.y0 + self.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = (x as f64 + 0.5, y as f64 + 0.5);
                if distance_to_segment(center, a, b) <= half_width {
                    self.mark(x, y);
                }
            }
        }
    }

    /// Marks pixel centers inside the polygon (even-odd rule, path implicitly closed).
    fn cover_polygon(&mut self, points: &[(f64, f64)]) {
        if points.len() < 3 {
            return;
        }
        let mut crossings = Vec::new();
        for y in self.y0..self.y0 + self.height {
            let sample_y = y as f64 + 0.5;
            crossings.clear();
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let spans = (a.1 <= sample_y && sample_y < b.1) || (b.1 <= sample_y && sample_y < a.1);
                if spans {
                    let t = (sample_y - a.1) / (b.1 - a.1);
                    crossings.push(a.0 + t * (b.0 - a.0));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i32;
                let end = (pair[1] - 0.5).ceil() as i32;
                for x in start.max(self.x0)..end.min(self.x0 + self.width) {
                    self.mark(x, y);
                }
            }
        }
    }

    fn cover_disc(&mut self, cx: f64, cy: f64, radius: f64) {
        self.cover_where(|px, py| (px - cx).hypot(py - cy) <= radius);
    }

    fn cover_ring(&mut self, cx: f64, cy: f64, radius: f64, half_width: f64) {
        self.cover_where(|px, py| ((px - cx).hypot(py - cy) - radius).abs() <= half_width);
    }

    fn cover_where(&mut self, inside: impl Fn(f64, f64) -> bool) {
        for y in self.y0..self.y0 + self.height {
            for x in self.x0..self.x0 + self.width {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    self.mark(x, y);
                }
            }
        }
    }

    /// Writes covered pixels and returns the touched bounds.
    fn apply(self, buffer: &mut PixelBuffer, paint: Paint) -> Option<Rect> {
        self.apply_masked(buffer, paint, None)
    }

    /// Like [`apply`](Self::apply), skipping pixels the stroke already painted.
    fn apply_masked(
        self,
        buffer: &mut PixelBuffer,
        paint: Paint,
        mut stroke: Option<&mut StrokeMask>,
    ) -> Option<Rect> {
        let mut touched: Option<Rect> = None;
        for ly in 0..self.height {
            for lx in 0..self.width {
                if !self.mask[(ly * self.width + lx) as usize] {
                    continue;
                }
                let (x, y) = (self.x0 + lx, self.y0 + ly);
                if let Some(stroke) = stroke.as_deref_mut()
                    && !stroke.claim(x, y)
                {
                    continue;
                }
                match paint {
                    Paint::Source(color) => buffer.blend(x, y, color),
                    Paint::Clear => buffer.set(x, y, Rgba::TRANSPARENT),
                }
                let pixel = Rect {
                    x,
                    y,
                    width: 1,
                    height: 1,
                };
                touched = Some(touched.map_or(pixel, |r| r.union(pixel)));
            }
        }
        touched
    }
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    (p.0 - (a.0 + t * dx)).hypot(p.1 - (a.1 + t * dy))
}

/// Strokes one round-capped segment, as used by the pen and the eraser.
pub fn stroke_segment(
    buffer: &mut PixelBuffer,
    from: (i32, i32),
    to: (i32, i32),
    width: f64,
    paint: Paint,
) -> Option<Rect> {
    segment_coverage(buffer, from, to, width)?.apply(buffer, paint)
}

/// Strokes one segment of a freehand stroke, leaving pixels recorded in
/// `stroke` untouched and recording the ones it paints.
pub fn stroke_segment_once(
    buffer: &mut PixelBuffer,
    from: (i32, i32),
    to: (i32, i32),
    width: f64,
    paint: Paint,
    stroke: &mut StrokeMask,
) -> Option<Rect> {
    segment_coverage(buffer, from, to, width)?.apply_masked(buffer, paint, Some(stroke))
}

fn segment_coverage(
    buffer: &PixelBuffer,
    from: (i32, i32),
    to: (i32, i32),
    width: f64,
) -> Option<Coverage> {
    let a = (from.0 as f64, from.1 as f64);
    let b = (to.0 as f64, to.1 as f64);
    let half = width.max(1.0) / 2.0;
    let bounds = (a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1));
    let mut coverage = Coverage::new(buffer, bounds, half)?;
    coverage.cover_segment(a, b, half);
    Some(coverage)
}

/// Strokes the outline of a path with the given line width.
pub fn stroke_path(
    buffer: &mut PixelBuffer,
    path: &ShapePath,
    width: f64,
    paint: Paint,
) -> Option<Rect> {
    let half = width.max(1.0) / 2.0;
    let mut coverage = Coverage::new(buffer, path.bounds()?, half)?;
    match path {
        ShapePath::Polygon { points, .. } => {
            if let [only] = points.as_slice() {
                coverage.cover_segment(*only, *only, half);
            }
            for (a, b) in path.segments() {
                coverage.cover_segment(a, b, half);
            }
        }
        ShapePath::Circle { cx, cy, radius } => coverage.cover_ring(*cx, *cy, *radius, half),
    }
    coverage.apply(buffer, paint)
}

/// Fills the interior of a closed path.
pub fn fill_path(buffer: &mut PixelBuffer, path: &ShapePath, paint: Paint) -> Option<Rect> {
    let mut coverage = Coverage::new(buffer, path.bounds()?, 0.0)?;
    match path {
        ShapePath::Polygon { points, .. } => coverage.cover_polygon(points),
        ShapePath::Circle { cx, cy, radius } => coverage.cover_disc(*cx, *cy, *radius),
    }
    coverage.apply(buffer, paint)
}

/// Renders a shape either filled or outlined. Open paths are always outlined.
pub fn render_shape(
    buffer: &mut PixelBuffer,
    path: &ShapePath,
    filled: bool,
    line_width: f64,
    paint: Paint,
) -> Option<Rect> {
    if filled && path.is_closed() {
        fill_path(buffer, path, paint)
    } else {
        stroke_path(buffer, path, line_width, paint)
    }
}

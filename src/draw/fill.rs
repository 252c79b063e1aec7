//! Bucket fill: 4-connected flood fill with per-channel color tolerance.

use super::buffer::PixelBuffer;
use super::color::Rgba;
use crate::util::Rect;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-channel tolerance used when none is configured.
pub const DEFAULT_TOLERANCE: u8 = 12;

/// Traversal used by [`flood_fill`]. Both repaint the same pixel set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FillStrategy {
    /// One stack entry per pixel; simple, memory grows with the region
    #[default]
    Stack,
    /// One stack entry per horizontal run; far fewer pushes on large regions
    Scanline,
}

/// Result of a fill operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Number of pixels repainted
    pub painted: usize,
    /// Bounds of the repainted pixels, if any
    pub bounds: Option<Rect>,
}

impl FillReport {
    fn record(&mut self, x: i32, y: i32, len: i32) {
        self.painted += len as usize;
        let run = Rect {
            x,
            y,
            width: len,
            height: 1,
        };
        self.bounds = Some(self.bounds.map_or(run, |b| b.union(run)));
    }
}

/// Flood-fills the region 4-connected to `(x, y)` with `fill`.
///
/// The region is every pixel reachable through neighbors whose color is within
/// `tolerance` of the start pixel's color. Nothing happens when the start is out
/// of bounds or already within tolerance of `fill`.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    fill: Rgba,
    tolerance: u8,
    strategy: FillStrategy,
) -> FillReport {
    let Some(target) = buffer.get(x, y) else {
        log::debug!("Fill start ({x}, {y}) is outside the buffer");
        return FillReport::default();
    };

    if target.matches(&fill, tolerance) {
        log::debug!("Fill at ({x}, {y}) skipped: {target:?} already matches {fill:?}");
        return FillReport::default();
    }

    let report = match strategy {
        FillStrategy::Stack => stack_fill(buffer, x, y, target, fill, tolerance),
        FillStrategy::Scanline => scanline_fill(buffer, x, y, target, fill, tolerance),
    };

    log::debug!(
        "Filled {} pixels from ({x}, {y}) with {fill:?} ({strategy:?})",
        report.painted
    );
    report
}

fn stack_fill(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    target: Rgba,
    fill: Rgba,
    tolerance: u8,
) -> FillReport {
    let mut report = FillReport::default();
    let mut stack = vec![(x, y)];

    while let Some((x, y)) = stack.pop() {
        match buffer.get(x, y) {
            Some(px) if px.matches(&target, tolerance) => {}
            _ => continue,
        }

        buffer.set(x, y, fill);
        report.record(x, y, 1);

        for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
            if buffer.contains(nx, ny) {
                stack.push((nx, ny));
            }
        }
    }

    report
}

fn scanline_fill(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    target: Rgba,
    fill: Rgba,
    tolerance: u8,
) -> FillReport {
    let mut report = FillReport::default();
    let mut seeds = vec![(x, y)];
    let in_region = |buffer: &PixelBuffer, x: i32, y: i32| {
        buffer
            .get(x, y)
            .is_some_and(|px| px.matches(&target, tolerance))
    };

    while let Some((x, y)) = seeds.pop() {
        if !in_region(buffer, x, y) {
            continue;
        }

        let mut left = x;
        while in_region(buffer, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while in_region(buffer, right + 1, y) {
            right += 1;
        }

        for px in left..=right {
            buffer.set(px, y, fill);
        }
        report.record(left, y, right - left + 1);

        for ny in [y - 1, y + 1] {
            let mut in_run = false;
            for px in left..=right {
                if in_region(buffer, px, ny) {
                    if !in_run {
                        seeds.push((px, ny));
                        in_run = true;
                    }
                } else {
                    in_run = false;
                }
            }
        }
    }

    report
}

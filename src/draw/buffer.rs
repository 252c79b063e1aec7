//! RGBA pixel buffer owned by the drawing controller.

use super::color::{Color, Rgba};
use super::error::DrawError;

/// Row-major grid of non-premultiplied RGBA pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Creates a buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    /// Builds a buffer from tightly packed RGBA8 bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, DrawError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(DrawError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Returns true if `(x, y)` addresses a pixel of this buffer.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Reads a pixel; `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Overwrites a pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Composites `color` onto a pixel with source-over.
    pub fn blend(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = self.pixels[idx].blend(color);
        }
    }

    /// Resets every pixel to `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Copies all pixels from a buffer of identical dimensions.
    pub fn restore_from(&mut self, other: &PixelBuffer) -> Result<(), DrawError> {
        if other.width != self.width || other.height != self.height {
            return Err(DrawError::BufferSizeMismatch {
                expected: self.pixels.len() * 4,
                actual: other.pixels.len() * 4,
            });
        }
        self.pixels.copy_from_slice(&other.pixels);
        Ok(())
    }

    /// Packs the buffer as row-major RGBA8 bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            bytes.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        bytes
    }

    /// Counts pixels equal to `color`.
    pub fn count(&self, color: Rgba) -> usize {
        self.pixels.iter().filter(|px| **px == color).count()
    }
}

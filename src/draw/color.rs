//! Color types: floating-point RGBA, HSL picker values, and 8-bit pixel quads.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use rasterpad::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let semi_transparent_blue = Color { r: 0.0, g: 0.0, b: 1.0, a: 0.5 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Quantizes the color to an 8-bit pixel without compositing.
    pub fn to_rgba(&self) -> Rgba {
        Rgba::new(
            to_channel(self.r),
            to_channel(self.g),
            to_channel(self.b),
            to_channel(self.a),
        )
    }

    /// Resolves the color at its alpha against an opaque white backdrop.
    ///
    /// The result is always opaque. This is the color the bucket tool paints with,
    /// so a fill matches what a stroke of the same style looks like on a blank page.
    pub fn over_white(&self) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |c: f64| c.clamp(0.0, 1.0) * a + (1.0 - a);
        Rgba::new(to_channel(mix(self.r)), to_channel(mix(self.g)), to_channel(mix(self.b)), 255)
    }
}

fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Hue/saturation/lightness triple as produced by the color picker.
///
/// Hue is in degrees (wrapped into `0..360`), saturation and lightness are
/// percentages in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Builds an HSL value, wrapping the hue and clamping the percentages.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hue = if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 };
        Self {
            hue,
            saturation: clamp_percent(saturation),
            lightness: clamp_percent(lightness),
        }
    }

    /// Converts to RGB using the CSS `hsl()` formula.
    pub fn to_color(&self, alpha: f64) -> Color {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue / 60.0;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Color::new(r + m, g + m, b + m, alpha.clamp(0.0, 1.0))
    }

    /// Converts an RGB color back to HSL, ignoring alpha.
    pub fn from_color(color: Color) -> Self {
        let r = color.r.clamp(0.0, 1.0);
        let g = color.g.clamp(0.0, 1.0);
        let b = color.b.clamp(0.0, 1.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self::new(h, s * 100.0, l * 100.0)
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// One 8-bit RGBA pixel, stored non-premultiplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, what the eraser leaves behind.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque white, the default page color.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Tolerance match: every channel differs by at most `tolerance`.
    pub fn matches(&self, other: &Rgba, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
            && self.a.abs_diff(other.a) <= tolerance
    }

    /// Source-over compositing of `src` (at its own alpha) onto this pixel.
    pub fn blend(self, src: Color) -> Rgba {
        let sa = src.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let da = self.a as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: f64, d: u8| (s.clamp(0.0, 1.0) * sa + (d as f64 / 255.0) * da * (1.0 - sa)) / out_a;
        Rgba::new(
            to_channel(mix(src.r, self.r)),
            to_channel(mix(src.g, self.g)),
            to_channel(mix(src.b, self.b)),
            to_channel(out_a),
        )
    }

    pub fn to_color(&self) -> Color {
        Color::new(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        )
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

pub const ORANGE: Color = Color {
    r: 1.0,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

pub const PINK: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

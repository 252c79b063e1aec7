//! Shape kinds and the geometry rules that turn a drag into a path.
//!
//! Every rule takes the gesture anchor (where the pointer went down) and the
//! current pointer position. The result is a [`ShapePath`] in buffer
//! coordinates, independent of any pixel buffer.

use super::error::DrawError;
use crate::util;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Default number of points for the star tool.
pub const DEFAULT_STAR_POINTS: u32 = 5;

/// Shapes available from the shape tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Straight segment from anchor to pointer (always stroked)
    Line,
    /// Axis-aligned rectangle with anchor and pointer as opposite corners
    Rectangle,
    /// Circle centered on the anchor, passing through the pointer
    Circle,
    /// Isosceles triangle with its base on the pointer's row
    Triangle,
    /// Regular pentagon inscribed in the drag diameter
    Pentagon,
    /// Regular hexagon inscribed in the drag diameter
    Hexagon,
    /// Star with alternating outer and inner radii
    Star,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Star,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Star => "star",
        }
    }

    /// Whether the fill toggle applies. Lines are stroked regardless.
    pub fn is_fillable(&self) -> bool {
        !matches!(self, ShapeKind::Line)
    }

    /// Builds the path for a drag from `anchor` to `current`.
    ///
    /// `star_points` only affects [`ShapeKind::Star`].
    pub fn path(
        &self,
        anchor: (i32, i32),
        current: (i32, i32),
        star_points: u32,
    ) -> Result<ShapePath, DrawError> {
        let (x1, y1) = (anchor.0 as f64, anchor.1 as f64);
        let (x2, y2) = (current.0 as f64, current.1 as f64);

        match self {
            ShapeKind::Line => Ok(ShapePath::Polygon {
                points: vec![(x1, y1), (x2, y2)],
                closed: false,
            }),
            ShapeKind::Rectangle => Ok(rectangle_path((x1, y1), (x2, y2))),
            ShapeKind::Circle => Ok(ShapePath::Circle {
                cx: x1,
                cy: y1,
                radius: util::distance((x1, y1), (x2, y2)),
            }),
            // The base sits on the pointer's row (y2) for both base vertices.
            ShapeKind::Triangle => Ok(ShapePath::Polygon {
                points: vec![(x1, y2), (x2, y2), ((x1 + x2) / 2.0, y1)],
                closed: true,
            }),
            ShapeKind::Pentagon => regular_polygon((x1, y1), (x2, y2), 5),
            ShapeKind::Hexagon => regular_polygon((x1, y1), (x2, y2), 6),
            ShapeKind::Star => star((x1, y1), (x2, y2), star_points),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| DrawError::UnsupportedShapeKind(s.trim().to_string()))
    }
}

/// Geometry produced by a shape rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePath {
    /// Straight segments through `points`; `closed` joins the last point back to the first.
    Polygon { points: Vec<(f64, f64)>, closed: bool },
    /// Exact circle.
    Circle { cx: f64, cy: f64, radius: f64 },
}

impl ShapePath {
    /// Vertices of a polygon path (empty for circles).
    pub fn vertices(&self) -> &[(f64, f64)] {
        match self {
            ShapePath::Polygon { points, .. } => points,
            ShapePath::Circle { .. } => &[],
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            ShapePath::Polygon { closed, .. } => *closed,
            ShapePath::Circle { .. } => true,
        }
    }

    /// Segments of the path, including the closing segment when closed.
    pub fn segments(&self) -> Vec<((f64, f64), (f64, f64))> {
        match self {
            ShapePath::Polygon { points, closed } => {
                let mut segments: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();
                if *closed && points.len() > 2 {
                    segments.push((points[points.len() - 1], points[0]));
                }
                segments
            }
            ShapePath::Circle { .. } => Vec::new(),
        }
    }

    /// Floating-point bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            ShapePath::Polygon { points, .. } => {
                let first = points.first()?;
                Some(points.iter().fold(
                    (first.0, first.1, first.0, first.1),
                    |(min_x, min_y, max_x, max_y), &(x, y)| {
                        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                    },
                ))
            }
            ShapePath::Circle { cx, cy, radius } => {
                Some((cx - radius, cy - radius, cx + radius, cy + radius))
            }
        }
    }
}

/// Rectangle with corners `a` and `b`, normalized so it is drawn top-left first.
pub fn rectangle_path(a: (f64, f64), b: (f64, f64)) -> ShapePath {
    let (min_x, max_x) = (a.0.min(b.0), a.0.max(b.0));
    let (min_y, max_y) = (a.1.min(b.1), a.1.max(b.1));
    ShapePath::Polygon {
        points: vec![
            (min_x, min_y),
            (max_x, min_y),
            (max_x, max_y),
            (min_x, max_y),
        ],
        closed: true,
    }
}

/// Regular polygon centered on the midpoint of `a`-`b`, first vertex pointing up.
pub fn regular_polygon(a: (f64, f64), b: (f64, f64), sides: u32) -> Result<ShapePath, DrawError> {
    if sides < 3 {
        return Err(DrawError::UnsupportedShapeKind(format!(
            "polygon with {sides} sides"
        )));
    }

    let (cx, cy) = util::midpoint(a, b);
    let radius = util::distance(a, b) / 2.0;
    let step = TAU / sides as f64;

    let points = (0..sides)
        .map(|i| {
            let angle = i as f64 * step - FRAC_PI_2;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();

    Ok(ShapePath::Polygon {
        points,
        closed: true,
    })
}

/// Star with `points` tips; inner vertices sit at half the outer radius.
pub fn star(a: (f64, f64), b: (f64, f64), points: u32) -> Result<ShapePath, DrawError> {
    if points < 2 {
        return Err(DrawError::UnsupportedShapeKind(format!(
            "star with {points} points"
        )));
    }

    let (cx, cy) = util::midpoint(a, b);
    let outer = util::distance(a, b) / 2.0;
    let inner = outer / 2.0;
    let step = PI / points as f64;

    let vertices = (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f64 * step - FRAC_PI_2;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();

    Ok(ShapePath::Polygon {
        points: vertices,
        closed: true,
    })
}

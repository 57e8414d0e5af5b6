use crate::foundation::error::{VecVidError, VecVidResult};

/// A point in source-frame pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate in pixels.
    pub x: f32,
    /// Vertical coordinate in pixels (y grows downwards).
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Fill tag of a contour, derived from nesting-depth parity.
///
/// Top-level contours are [`Color::White`], their holes [`Color::Black`], the islands inside
/// those holes white again, and so on. Consumers fill in contour order so nested shapes paint
/// over their parents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    /// Even nesting depth (wire value `0`).
    #[default]
    White,
    /// Odd nesting depth (wire value `1`).
    Black,
}

impl Color {
    /// Color for a contour with `depth` ancestors.
    pub fn from_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Self::White } else { Self::Black }
    }

    /// Wire representation.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Parse the wire representation; anything but `0`/`1` is corrupt.
    pub fn from_u8(raw: u8) -> VecVidResult<Self> {
        match raw {
            0 => Ok(Self::White),
            1 => Ok(Self::Black),
            other => Err(VecVidError::corrupt(format!(
                "contour color must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// One polygon: a color tag plus an open point sequence.
///
/// The loop is implicitly closed; use [`Contour::closed_points`] to iterate with the first point
/// revisited. Empty contours are valid and preserved.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contour {
    /// Fill tag.
    pub color: Color,
    /// Ordered polyline vertices.
    pub points: Vec<Point>,
}

impl Contour {
    /// Create a contour.
    pub fn new(color: Color, points: Vec<Point>) -> Self {
        Self { color, points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Return `true` for a degenerate contour with no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the points followed by the first point again, closing the polygon.
    ///
    /// Yields nothing for an empty contour.
    pub fn closed_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .copied()
            .chain(self.points.first().copied())
    }

    /// Unsigned polygon area (shoelace formula) in square pixels.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self
            .points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| f64::from(a.x) * f64::from(b.y) - f64::from(b.x) * f64::from(a.y))
            .sum();
        twice.abs() * 0.5
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/contour.rs"]
mod tests;

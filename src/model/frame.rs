use crate::model::contour::Contour;

/// One frame: contours in extraction order.
///
/// Order is significant; it is the fill order a renderer must follow.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Contours in insertion order.
    pub contours: Vec<Contour>,
}

/// Per-frame size summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameStats {
    /// Total contours, including empty ones.
    pub contours: usize,
    /// Contours with at least one point.
    pub drawable_contours: usize,
    /// Total points across all contours.
    pub points: usize,
}

impl Frame {
    /// Create a frame from contours.
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    /// An empty frame (used as the trimmed placeholder).
    pub const fn empty() -> Self {
        Self {
            contours: Vec::new(),
        }
    }

    /// Number of contours.
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    /// Return `true` when the frame holds no contours.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Iterate contours in fill order.
    pub fn iter(&self) -> std::slice::Iter<'_, Contour> {
        self.contours.iter()
    }

    /// Count contours and points.
    pub fn stats(&self) -> FrameStats {
        self.contours
            .iter()
            .fold(FrameStats::default(), |mut acc, c| {
                acc.contours += 1;
                acc.points += c.len();
                if !c.is_empty() {
                    acc.drawable_contours += 1;
                }
                acc
            })
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Contour;
    type IntoIter = std::slice::Iter<'a, Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.contours.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/frame.rs"]
mod tests;

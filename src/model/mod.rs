//! In-memory data model: points, contours, frames and the frame-indexed video arena.

pub(crate) mod contour;
pub(crate) mod frame;
pub(crate) mod video;

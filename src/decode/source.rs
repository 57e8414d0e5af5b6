use crate::encode::encoder::RawContours;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{VecVidError, VecVidResult};

/// Pull-based supplier of extracted contours, e.g. a thresholding + contour-finding stage over
/// a video capture.
///
/// `seek` takes an absolute frame number; relative positioning is resolved by the caller.
pub trait ContourSource {
    /// Index of the next frame [`ContourSource::next_contours`] will produce.
    fn current_frame(&self) -> u64;

    /// Frames per second of the underlying video.
    fn framerate(&self) -> f32;

    /// Total frames the source can produce.
    fn total_frames(&self) -> u64;

    /// Source pixel dimensions.
    fn dimensions(&self) -> Dimensions;

    /// Reposition to absolute frame `frame` (`0..=total_frames`).
    fn seek(&mut self, frame: u64) -> VecVidResult<()>;

    /// Extract the current frame's contours and advance by one frame.
    fn next_contours(&mut self) -> VecVidResult<RawContours>;
}

/// Source that replays pre-extracted contour units from memory.
#[derive(Clone, Debug)]
pub struct InMemorySource {
    framerate: f32,
    dimensions: Dimensions,
    frames: Vec<RawContours>,
    cursor: u64,
    pulls: u64,
}

impl InMemorySource {
    /// Create a source over `frames`.
    pub fn new(framerate: f32, dimensions: Dimensions, frames: Vec<RawContours>) -> Self {
        Self {
            framerate,
            dimensions,
            frames,
            cursor: 0,
            pulls: 0,
        }
    }

    /// Number of successful [`ContourSource::next_contours`] calls so far.
    pub fn pulls(&self) -> u64 {
        self.pulls
    }
}

impl ContourSource for InMemorySource {
    fn current_frame(&self) -> u64 {
        self.cursor
    }

    fn framerate(&self) -> f32 {
        self.framerate
    }

    fn total_frames(&self) -> u64 {
        self.frames.len() as u64
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn seek(&mut self, frame: u64) -> VecVidResult<()> {
        if frame > self.total_frames() {
            return Err(VecVidError::value(format!(
                "seek target {frame} is outside 0..={}",
                self.total_frames()
            )));
        }
        self.cursor = frame;
        Ok(())
    }

    fn next_contours(&mut self) -> VecVidResult<RawContours> {
        let raw = self
            .frames
            .get(self.cursor as usize)
            .cloned()
            .ok_or_else(|| {
                VecVidError::end_of_stream(format!("source exhausted at frame {}", self.cursor))
            })?;
        self.cursor += 1;
        self.pulls += 1;
        Ok(raw)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/source.rs"]
mod tests;

use crate::foundation::core::Dimensions;
use crate::model::frame::Frame;

static EMPTY_FRAME: Frame = Frame::empty();

/// State of one frame-indexed slot in a [`Video`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FrameSlot {
    /// Known to exist but not decoded yet.
    #[default]
    Vacant,
    /// Resident frame content.
    Loaded(Frame),
    /// Evicted after being flushed; reads back as an empty frame.
    Trimmed,
}

/// In-memory frame cache for one encode/decode session.
///
/// Slots are never removed or reordered, so frame number `n` always maps to slot `n`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Video {
    framerate: f32,
    dimensions: Dimensions,
    slots: Vec<FrameSlot>,
}

impl Video {
    /// Create an empty video.
    pub fn new(framerate: f32, dimensions: Dimensions) -> Self {
        Self {
            framerate,
            dimensions,
            slots: Vec::new(),
        }
    }

    /// Frames per second of the source.
    pub fn framerate(&self) -> f32 {
        self.framerate
    }

    /// Source pixel dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of slots (resident or not).
    pub fn frame_count(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when the arena has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append a frame and return its index.
    pub fn push(&mut self, frame: Frame) -> usize {
        self.slots.push(FrameSlot::Loaded(frame));
        self.slots.len() - 1
    }

    /// Store `frame` at `index`, growing the arena with vacant slots as needed.
    pub fn insert(&mut self, index: usize, frame: Frame) {
        self.reserve_slots(index + 1);
        self.slots[index] = FrameSlot::Loaded(frame);
    }

    /// Grow the arena to at least `len` slots. Never shrinks.
    pub fn reserve_slots(&mut self, len: usize) {
        if self.slots.len() < len {
            self.slots.resize(len, FrameSlot::Vacant);
        }
    }

    /// Slot state at `index`.
    pub fn slot(&self, index: usize) -> Option<&FrameSlot> {
        self.slots.get(index)
    }

    /// Frame content at `index`.
    ///
    /// Trimmed slots yield an empty frame; vacant or out-of-range slots yield `None`.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        match self.slots.get(index)? {
            FrameSlot::Loaded(frame) => Some(frame),
            FrameSlot::Trimmed => Some(&EMPTY_FRAME),
            FrameSlot::Vacant => None,
        }
    }

    /// Return `true` when slot `index` holds decoded content.
    pub fn is_loaded(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(FrameSlot::Loaded(_)))
    }

    /// Return `true` when any slot has been trimmed.
    pub fn has_trimmed(&self) -> bool {
        self.slots.iter().any(|s| matches!(s, FrameSlot::Trimmed))
    }

    /// Replace a loaded frame with the trimmed marker. Vacant slots stay vacant.
    pub fn trim(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index)
            && matches!(slot, FrameSlot::Loaded(_))
        {
            *slot = FrameSlot::Trimmed;
        }
    }

    /// Last slot's frame content, if any.
    pub fn last(&self) -> Option<&Frame> {
        self.slots.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate slots as frame content (`None` for vacant slots).
    pub fn iter(&self) -> impl Iterator<Item = Option<&Frame>> + '_ {
        (0..self.slots.len()).map(|i| self.get(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/video.rs"]
mod tests;

//! Decoders over the container format and over live contour sources.
//!
//! Both decoders implement [`Decoder`], so playback and export code can be written once and
//! driven either by a persisted file ([`FileDecoder`]) or by a capture device
//! ([`LiveDecoder`]).

use crate::foundation::core::{Dimensions, Whence};
use crate::foundation::error::VecVidResult;
use crate::model::frame::Frame;
use crate::model::video::Video;

/// File-backed, seekable decoder.
pub mod file;
/// Decoder wrapping a pull-based [`ContourSource`].
pub mod live;
/// Contour source contract and an in-memory implementation.
pub mod source;

pub use file::{DecoderState, FileDecoder};
pub use live::LiveDecoder;
pub use source::{ContourSource, InMemorySource};

/// Capability set shared by every decoder.
pub trait Decoder {
    /// Return the frame at the frame pointer and advance the pointer by one.
    fn read(&mut self) -> VecVidResult<&Frame>;

    /// Move the frame pointer. `End` offsets count back from [`Decoder::total_frames`].
    fn seek(&mut self, offset: i64, whence: Whence) -> VecVidResult<()>;

    /// Index of the next frame [`Decoder::read`] will return.
    fn current_frame(&self) -> u64;

    /// Total number of frames in the stream.
    fn total_frames(&self) -> u64;

    /// Frames per second of the source.
    fn framerate(&self) -> f32;

    /// Source pixel dimensions.
    fn dimensions(&self) -> Dimensions;

    /// Frames decoded so far.
    fn video(&self) -> &Video;

    /// Return `true` while [`Decoder::read`] has frames left.
    fn has_next(&self) -> bool {
        self.current_frame() < self.total_frames()
    }
}

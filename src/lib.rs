//! vecvid stores per-frame vector contours extracted from video in a compact, append-friendly
//! binary container.
//!
//! # Pipeline overview
//!
//! 1. **Extract** (external): a [`ContourSource`] yields point sequences plus a parent hierarchy
//! 2. **Encode**: [`VideoEncoder`] colors contours by nesting parity and appends length-prefixed
//!    frame records to any `io::Write` sink
//! 3. **Decode**: [`FileDecoder`] streams records back with frame-level seeking;
//!    [`LiveDecoder`] serves frames straight from a source through the same [`Decoder`] trait
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Append-only output**: the encoder never seeks its sink.
//! - **Bounded memory**: decoders cache lazily; encoders can trim flushed frames.
//!
//! See [`crate::guide`] for the byte layout and worked examples.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod foundation;
mod model;

/// Decoders and contour sources.
pub mod decode;
/// Streaming encoder.
pub mod encode;
/// Standalone documentation for the container format and API.
pub mod guide;
/// Capture and transcode loops built on the encoder and decoders.
pub mod pipeline;

pub use crate::codec::color::{NO_PARENT, derive_colors, derive_depths};
pub use crate::codec::format::{
    FORMAT_VERSION, HEADER_SIZE, Header, SUPPORTED_VERSIONS, check_version,
};
pub use crate::codec::record::{RECORD_PREFIX_SIZE, decode_record, encode_record, record_body_len};
pub use crate::foundation::core::{Dimensions, Whence};
pub use crate::foundation::error::{VecVidError, VecVidResult};
pub use crate::model::contour::{Color, Contour, Point};
pub use crate::model::frame::{Frame, FrameStats};
pub use crate::model::video::{FrameSlot, Video};

pub use crate::decode::{
    ContourSource, Decoder, DecoderState, FileDecoder, InMemorySource, LiveDecoder,
};
pub use crate::encode::encoder::{EncoderOpts, RawContours, VideoEncoder};
pub use crate::pipeline::{CaptureOpts, CaptureStats, capture, transcode};

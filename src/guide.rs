//! # vecvid guide
//!
//! A walkthrough of the container format and the public API. Read this before extending the
//! codec or writing a new [`ContourSource`](crate::ContourSource).
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Point`](crate::Point): `f32` pixel coordinates in source-frame space
//! - [`Contour`](crate::Contour): a [`Color`](crate::Color) plus an open point sequence; the
//!   polygon closes implicitly back to its first point
//! - [`Frame`](crate::Frame): contours in fill order
//! - [`Video`](crate::Video): framerate, dimensions and a frame-indexed arena of slots
//!
//! Colors are not pixel values. They come from the contour hierarchy: a contour with an even
//! number of ancestors is [`Color::White`](crate::Color::White), odd is
//! [`Color::Black`](crate::Color::Black). Painting in frame order then produces holes and islands
//! correctly.
//!
//! ---
//!
//! ## Byte layout
//!
//! Everything is little-endian.
//!
//! ```text
//! header (16 bytes)
//!   u32 version   = 1
//!   f32 framerate
//!   u32 width
//!   u32 height
//! frame record, repeated
//!   u32 record_size          bytes after this field
//!   u32 contour_count
//!   contour, repeated
//!     u8  color              0 | 1
//!     u32 point_count
//!     f32 x, f32 y           point_count times
//! ```
//!
//! There is no frame count and no index. Appending a record never rewrites earlier bytes, which
//! is what makes [`VideoEncoder::dump_continue`](crate::VideoEncoder::dump_continue) safe to call
//! after every captured frame. Readers derive the frame count by hopping over `record_size`
//! prefixes once at open time.
//!
//! ---
//!
//! ## Encoding
//!
//! ```no_run
//! use vecvid::{Dimensions, Point, VideoEncoder};
//!
//! # fn main() -> vecvid::VecVidResult<()> {
//! let mut out = std::fs::File::create("clip.vvid").map_err(anyhow::Error::from)?;
//! let mut enc = VideoEncoder::new(30.0, Dimensions::new(480, 360));
//!
//! let outer = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
//! let hole = vec![Point::new(2.0, 2.0), Point::new(4.0, 2.0), Point::new(4.0, 4.0)];
//! enc.feed_frame(vec![outer, hole], &[-1, 0])?;
//!
//! enc.dump_continue(&mut out)?; // header + frame 0
//! enc.trim_dumped(); // frame 0 is on disk; drop it from memory
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Decoding
//!
//! [`FileDecoder`](crate::FileDecoder) reads lazily. The frame pointer and the file cursor move
//! together; seeking backwards rewinds to the first record and skips forward, since records
//! carry only a forward length.
//!
//! ```no_run
//! use vecvid::{Decoder, FileDecoder, Whence};
//!
//! # fn main() -> vecvid::VecVidResult<()> {
//! let mut dec = FileDecoder::open_path("clip.vvid")?;
//! while dec.has_next() {
//!     let frame = dec.read()?;
//!     println!("{} contours", frame.len());
//! }
//! dec.seek(1, Whence::End)?; // last frame
//! let peek = dec.read_specific(0)?.stats(); // pointer untouched
//! # let _ = peek;
//! # Ok(())
//! # }
//! ```
//!
//! The decoder is released by [`FileDecoder::close`](crate::FileDecoder::close) or when it is
//! dropped, so early returns and `?` never leak the file handle.
//!
//! ---
//!
//! ## Live sources
//!
//! [`LiveDecoder`](crate::LiveDecoder) wraps a [`ContourSource`](crate::ContourSource) (a capture
//! device plus a contour extractor) and exposes the same [`Decoder`](crate::Decoder) surface. Every
//! frame it returns also lands in its internal encoder, so playback and export can run in one
//! loop; [`capture`](crate::capture) packages that loop.

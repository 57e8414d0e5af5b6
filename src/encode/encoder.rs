use std::io::Write;
use std::ops::Range;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::codec::color::derive_colors;
use crate::codec::format::{HEADER_SIZE, Header};
use crate::codec::record::encode_record;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{VecVidError, VecVidResult};
use crate::model::contour::{Contour, Point};
use crate::model::frame::Frame;
use crate::model::video::Video;

/// One unit of contour-extraction output: point sequences plus their parent-index hierarchy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawContours {
    /// Point sequence per contour, in extraction order.
    pub contours: Vec<Vec<Point>>,
    /// Parent index per contour (`-1` for top-level). Same length as `contours`.
    pub hierarchy: Vec<i32>,
}

/// Options controlling how [`VideoEncoder`] serializes pending frames.
#[derive(Clone, Debug)]
pub struct EncoderOpts {
    /// Encode pending frames in parallel (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Frames encoded per batch before the batch is written to the sink.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for EncoderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Streaming encoder for contour video.
///
/// Frames are fed one at a time and flushed incrementally with [`VideoEncoder::dump_continue`].
/// The flush cursor only moves forward; [`VideoEncoder::trim_dumped`] drops already-written
/// frame content to bound memory during long captures.
#[derive(Debug)]
pub struct VideoEncoder {
    video: Video,
    flushed: usize,
    header_written: bool,
    opts: EncoderOpts,
    pool: Option<rayon::ThreadPool>,
}

impl VideoEncoder {
    /// Create a sequential encoder for a source with the given framerate and dimensions.
    pub fn new(framerate: f32, dimensions: Dimensions) -> Self {
        Self {
            video: Video::new(framerate, dimensions),
            flushed: 0,
            header_written: false,
            opts: EncoderOpts::default(),
            pool: None,
        }
    }

    /// Create an encoder with explicit options.
    pub fn with_opts(
        framerate: f32,
        dimensions: Dimensions,
        opts: EncoderOpts,
    ) -> VecVidResult<Self> {
        if opts.chunk_size == 0 {
            return Err(VecVidError::validation("encoder 'chunk_size' must be >= 1"));
        }
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self {
            opts,
            pool,
            ..Self::new(framerate, dimensions)
        })
    }

    /// Borrow the in-memory video.
    pub fn video(&self) -> &Video {
        &self.video
    }

    /// Options in effect.
    pub fn opts(&self) -> &EncoderOpts {
        &self.opts
    }

    /// Index of the next frame not yet written to a sink.
    pub fn flushed_frames(&self) -> usize {
        self.flushed
    }

    /// Number of fed frames not yet written to a sink.
    pub fn pending_frames(&self) -> usize {
        self.video.frame_count() - self.flushed
    }

    /// Header describing this stream.
    pub fn header(&self) -> Header {
        Header::new(self.video.framerate(), self.video.dimensions())
    }

    /// Append one frame built from raw contours, coloring each by its nesting depth.
    ///
    /// Returns the new frame's index. Existing frames are never modified.
    pub fn feed_frame(
        &mut self,
        contours: Vec<Vec<Point>>,
        hierarchy: &[i32],
    ) -> VecVidResult<usize> {
        if contours.len() != hierarchy.len() {
            return Err(VecVidError::validation(format!(
                "hierarchy has {} entries for {} contours",
                hierarchy.len(),
                contours.len()
            )));
        }
        let colors = derive_colors(hierarchy)?;
        let frame = Frame::new(
            contours
                .into_iter()
                .zip(colors)
                .map(|(points, color)| Contour::new(color, points))
                .collect(),
        );
        Ok(self.video.push(frame))
    }

    /// [`VideoEncoder::feed_frame`] for one [`RawContours`] unit.
    pub fn feed_raw(&mut self, raw: RawContours) -> VecVidResult<usize> {
        self.feed_frame(raw.contours, &raw.hierarchy)
    }

    /// Append an already-colored frame. Returns its index.
    pub fn push_frame(&mut self, frame: Frame) -> usize {
        self.video.push(frame)
    }

    /// Fixed-size container header bytes.
    pub fn encode_header(&self) -> [u8; HEADER_SIZE] {
        self.header().to_bytes()
    }

    /// Serialize frame `index` to its length-prefixed record.
    ///
    /// Trimmed frames encode as empty frames.
    pub fn encode_frame(&self, index: usize) -> VecVidResult<Vec<u8>> {
        let frame = self.video.get(index).ok_or_else(|| {
            VecVidError::value(format!(
                "frame {index} out of range (have {})",
                self.video.frame_count()
            ))
        })?;
        encode_record(frame)
    }

    /// Write everything not yet written: the header on first use, then every pending frame in
    /// index order. Returns the number of bytes written by this call.
    ///
    /// If a write fails, the flush cursor stays after the last fully written record.
    pub fn dump_continue<W: Write + ?Sized>(&mut self, sink: &mut W) -> VecVidResult<u64> {
        let mut written = 0u64;
        if !self.header_written {
            sink.write_all(&self.encode_header())
                .context("failed to write container header")?;
            self.header_written = true;
            written += HEADER_SIZE as u64;
        }

        let start = self.flushed;
        let total = self.video.frame_count();
        while self.flushed < total {
            let end = total.min(self.flushed + self.opts.chunk_size);
            let records = self.encode_range(self.flushed..end)?;
            for record in records {
                sink.write_all(&record)
                    .with_context(|| format!("failed to write frame record {}", self.flushed))?;
                self.flushed += 1;
                written += record.len() as u64;
            }
        }

        if total > start {
            tracing::debug!(
                first = start,
                frames = total - start,
                bytes = written,
                "flushed frame records"
            );
        }
        Ok(written)
    }

    /// Write the header and every frame, independent of the flush cursor.
    ///
    /// Fails if any frame has been trimmed, since its content is no longer available.
    pub fn dump<W: Write + ?Sized>(&self, sink: &mut W) -> VecVidResult<u64> {
        if self.video.has_trimmed() {
            return Err(VecVidError::validation(
                "cannot dump the full video after trim_dumped discarded frames",
            ));
        }
        sink.write_all(&self.encode_header())
            .context("failed to write container header")?;
        let mut written = HEADER_SIZE as u64;
        for record in self.encode_range(0..self.video.frame_count())? {
            sink.write_all(&record).context("failed to write frame record")?;
            written += record.len() as u64;
        }
        Ok(written)
    }

    /// Replace every flushed frame with an empty placeholder. Indices and the flush cursor are
    /// unchanged.
    pub fn trim_dumped(&mut self) {
        for index in 0..self.flushed {
            self.video.trim(index);
        }
    }

    fn encode_range(&self, range: Range<usize>) -> VecVidResult<Vec<Vec<u8>>> {
        match &self.pool {
            Some(pool) if range.len() > 1 => pool.install(|| {
                range
                    .into_par_iter()
                    .map(|i| self.encode_frame(i))
                    .collect()
            }),
            _ => range.map(|i| self.encode_frame(i)).collect(),
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> VecVidResult<rayon::ThreadPool> {
    let builder = match threads {
        Some(0) => {
            return Err(VecVidError::validation(
                "encoder thread count must be at least 1",
            ));
        }
        Some(n) => rayon::ThreadPoolBuilder::new().num_threads(n),
        None => rayon::ThreadPoolBuilder::new(),
    };
    let pool = builder
        .thread_name(|i| format!("vecvid-encode-{i}"))
        .build()
        .context("failed to start encoder thread pool")?;
    Ok(pool)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/encoder.rs"]
mod tests;

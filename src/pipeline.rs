use std::io::Write;

use crate::decode::Decoder;
use crate::decode::live::LiveDecoder;
use crate::decode::source::ContourSource;
use crate::encode::encoder::VideoEncoder;
use crate::foundation::core::Whence;
use crate::foundation::error::{VecVidError, VecVidResult};
use crate::model::frame::FrameStats;

/// Frame range and memory policy for [`capture`] and [`transcode`].
#[derive(Clone, Debug)]
pub struct CaptureOpts {
    /// First frame to export.
    pub start: u64,
    /// Exclusive end frame. `None` exports through the last frame.
    pub end: Option<u64>,
    /// Drop frame content from memory once it has been written.
    pub trim_after_flush: bool,
}

impl Default for CaptureOpts {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            trim_after_flush: true,
        }
    }
}

/// Export statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Frames written.
    pub frames: u64,
    /// Contours across written frames.
    pub contours: u64,
    /// Points across written frames.
    pub points: u64,
    /// Bytes written to the sink, header included.
    pub bytes_written: u64,
}

impl CaptureStats {
    fn add_frame(&mut self, stats: FrameStats) {
        self.frames += 1;
        self.contours += stats.contours as u64;
        self.points += stats.points as u64;
    }
}

fn resolve_range(opts: &CaptureOpts, total: u64) -> VecVidResult<(i64, u64)> {
    let end = opts.end.unwrap_or(total);
    if opts.start > end || end > total {
        return Err(VecVidError::value(format!(
            "capture range {}..{end} is outside 0..{total}",
            opts.start
        )));
    }
    let start = i64::try_from(opts.start)
        .map_err(|_| VecVidError::value(format!("capture start {} is too large", opts.start)))?;
    Ok((start, end))
}

/// Pull frames `start..end` from a live source and stream them to `sink` as they are extracted.
///
/// Each frame is flushed right after it is read, so an interrupted capture leaves a valid
/// container holding every completed frame.
///
/// The capture streams through the decoder's own encoder, which must not hold any frames yet:
/// a decoder that has already been read from (or captured once) fails with
/// [`VecVidError::State`] and nothing is written.
#[tracing::instrument(skip(decoder, sink))]
pub fn capture<S: ContourSource, W: Write + ?Sized>(
    decoder: &mut LiveDecoder<S>,
    sink: &mut W,
    opts: &CaptureOpts,
) -> VecVidResult<CaptureStats> {
    let fed = decoder.encoder().video().frame_count();
    if fed > 0 {
        return Err(VecVidError::state(format!(
            "capture needs a fresh live decoder, {fed} frames were already read"
        )));
    }
    let (start, end) = resolve_range(opts, decoder.total_frames())?;
    decoder.seek(start, Whence::Absolute)?;

    let mut stats = CaptureStats {
        bytes_written: decoder.encoder_mut().dump_continue(sink)?,
        ..CaptureStats::default()
    };
    while decoder.current_frame() < end {
        stats.add_frame(decoder.read()?.stats());
        stats.bytes_written += decoder.encoder_mut().dump_continue(sink)?;
        if opts.trim_after_flush {
            decoder.encoder_mut().trim_dumped();
        }
    }

    tracing::debug!(
        frames = stats.frames,
        points = stats.points,
        bytes = stats.bytes_written,
        "capture complete"
    );
    Ok(stats)
}

/// Re-encode frames `start..end` of any decoder into a fresh container on `sink`.
#[tracing::instrument(skip(decoder, sink))]
pub fn transcode<D: Decoder + ?Sized, W: Write + ?Sized>(
    decoder: &mut D,
    sink: &mut W,
    opts: &CaptureOpts,
) -> VecVidResult<CaptureStats> {
    let (start, end) = resolve_range(opts, decoder.total_frames())?;
    decoder.seek(start, Whence::Absolute)?;

    let mut encoder = VideoEncoder::new(decoder.framerate(), decoder.dimensions());
    let mut stats = CaptureStats {
        bytes_written: encoder.dump_continue(sink)?,
        ..CaptureStats::default()
    };
    while decoder.current_frame() < end {
        let frame = decoder.read()?;
        stats.add_frame(frame.stats());
        encoder.push_frame(frame.clone());
        stats.bytes_written += encoder.dump_continue(sink)?;
        if opts.trim_after_flush {
            encoder.trim_dumped();
        }
    }

    tracing::debug!(
        frames = stats.frames,
        bytes = stats.bytes_written,
        "transcode complete"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;

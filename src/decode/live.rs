use crate::decode::Decoder;
use crate::decode::source::ContourSource;
use crate::encode::encoder::{EncoderOpts, VideoEncoder};
use crate::foundation::core::{Dimensions, Whence, resolve_seek_target};
use crate::foundation::error::{VecVidError, VecVidResult};
use crate::model::frame::Frame;
use crate::model::video::Video;

/// Decoder that extracts frames on demand from a [`ContourSource`].
///
/// Each [`Decoder::read`] pulls one unit from the source and feeds it through an internal
/// [`VideoEncoder`], so the frames seen during playback can be flushed to a sink at the same time
/// through [`LiveDecoder::encoder_mut`]. The cached [`Video`] is in read order, which differs from
/// source order after a seek.
#[derive(Debug)]
pub struct LiveDecoder<S> {
    source: S,
    encoder: VideoEncoder,
}

impl<S: ContourSource> LiveDecoder<S> {
    /// Wrap `source` with a sequential encoder.
    pub fn new(source: S) -> Self {
        let encoder = VideoEncoder::new(source.framerate(), source.dimensions());
        Self { source, encoder }
    }

    /// Wrap `source` with an encoder built from `opts`.
    pub fn with_opts(source: S, opts: EncoderOpts) -> VecVidResult<Self> {
        let encoder = VideoEncoder::with_opts(source.framerate(), source.dimensions(), opts)?;
        Ok(Self { source, encoder })
    }

    /// Borrow the source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Borrow the internal encoder.
    pub fn encoder(&self) -> &VideoEncoder {
        &self.encoder
    }

    /// Mutably borrow the internal encoder, e.g. to `dump_continue` captured frames.
    pub fn encoder_mut(&mut self) -> &mut VideoEncoder {
        &mut self.encoder
    }

    /// Split into the source and the encoder.
    pub fn into_parts(self) -> (S, VideoEncoder) {
        (self.source, self.encoder)
    }
}

impl<S: ContourSource> Decoder for LiveDecoder<S> {
    fn read(&mut self) -> VecVidResult<&Frame> {
        let current = self.source.current_frame();
        let total = self.source.total_frames();
        if current >= total {
            return Err(VecVidError::end_of_stream(format!(
                "no frame {current} (total {total})"
            )));
        }
        let raw = self.source.next_contours()?;
        let index = self.encoder.feed_raw(raw)?;
        self.encoder
            .video()
            .get(index)
            .ok_or_else(|| VecVidError::state(format!("frame {index} is not resident")))
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> VecVidResult<()> {
        let target = resolve_seek_target(
            self.source.current_frame(),
            self.source.total_frames(),
            offset,
            whence,
        )?;
        self.source.seek(target)
    }

    fn current_frame(&self) -> u64 {
        self.source.current_frame()
    }

    fn total_frames(&self) -> u64 {
        self.source.total_frames()
    }

    fn framerate(&self) -> f32 {
        self.source.framerate()
    }

    fn dimensions(&self) -> Dimensions {
        self.source.dimensions()
    }

    fn video(&self) -> &Video {
        self.encoder.video()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/live.rs"]
mod tests;

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::Context as _;

use crate::codec::format::{HEADER_SIZE, Header};
use crate::codec::record::{RECORD_PREFIX_SIZE, read_prefix, read_record, skip_record};
use crate::decode::Decoder;
use crate::foundation::core::{Dimensions, Whence, resolve_seek_target};
use crate::foundation::error::{VecVidError, VecVidResult};
use crate::model::frame::Frame;
use crate::model::video::Video;

/// Lifecycle of a [`FileDecoder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderState {
    /// Constructed; header not read yet.
    Unopened,
    /// Header validated and frames counted; reads and seeks are allowed.
    Open,
    /// Reader released. Terminal.
    Closed,
}

/// Decoder streaming frames from a persisted container.
///
/// Frames are decoded lazily and cached in a frame-indexed [`Video`]. The file cursor always sits
/// at the start of record [`Decoder::current_frame`], so cached reads still step over their
/// record on disk.
///
/// The reader is released by [`FileDecoder::close`] or on drop, whichever comes first.
#[derive(Debug)]
pub struct FileDecoder<R> {
    reader: Option<R>,
    state: DecoderState,
    header: Option<Header>,
    total_frames: u64,
    frame: u64,
    video: Video,
}

impl FileDecoder<BufReader<File>> {
    /// Open `path` and read its header.
    pub fn open_path(path: impl AsRef<Path>) -> VecVidResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open vector file '{}'", path.display()))?;
        let mut decoder = Self::new(BufReader::new(file));
        decoder.open()?;
        Ok(decoder)
    }
}

impl<R: Read + Seek> FileDecoder<R> {
    /// Wrap `reader` without touching it. Call [`FileDecoder::open`] before reading.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            state: DecoderState::Unopened,
            header: None,
            total_frames: 0,
            frame: 0,
            video: Video::new(0.0, Dimensions::default()),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Parsed header, once open.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Validate the header and count frames.
    ///
    /// On failure the decoder stays [`DecoderState::Unopened`] and publishes no metadata.
    #[tracing::instrument(skip(self))]
    pub fn open(&mut self) -> VecVidResult<()> {
        match self.state {
            DecoderState::Unopened => {}
            DecoderState::Open => return Err(VecVidError::state("decoder is already open")),
            DecoderState::Closed => return Err(VecVidError::state("decoder is closed")),
        }
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| VecVidError::state("decoder has no reader"))?;

        reader
            .seek(SeekFrom::Start(0))
            .context("failed to rewind vector file")?;
        let header = Header::read_from(reader)?;
        let total_frames = count_frames(reader)?;

        let mut video = Video::new(header.framerate, header.dimensions);
        video.reserve_slots(total_frames as usize);

        tracing::debug!(
            version = header.version,
            framerate = header.framerate,
            width = header.dimensions.width,
            height = header.dimensions.height,
            total_frames,
            "opened vector file"
        );

        self.header = Some(header);
        self.total_frames = total_frames;
        self.frame = 0;
        self.video = video;
        self.state = DecoderState::Open;
        Ok(())
    }

    /// Release the reader. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(frame = self.frame, "closed vector file");
        }
        self.state = DecoderState::Closed;
    }

    /// Read frame `frame_num` without moving the frame pointer or the file cursor.
    ///
    /// Resident frames are returned without touching the reader. Position is restored even when
    /// the lookup fails.
    pub fn read_specific(&mut self, frame_num: u64) -> VecVidResult<&Frame> {
        open_reader(self.state, &mut self.reader, "read_specific")?;
        if frame_num >= self.total_frames {
            return Err(VecVidError::value(format!(
                "frame {frame_num} out of range (total {})",
                self.total_frames
            )));
        }
        let index = frame_num as usize;

        if !self.video.is_loaded(index) {
            let saved_frame = self.frame;
            let saved_pos = open_reader(self.state, &mut self.reader, "read_specific")?
                .stream_position()
                .context("failed to query vector file position")?;

            let result = self
                .seek(frame_num as i64, Whence::Absolute)
                .and_then(|()| self.read().map(|_| ()));

            open_reader(self.state, &mut self.reader, "read_specific")?
                .seek(SeekFrom::Start(saved_pos))
                .context("failed to restore vector file position")?;
            self.frame = saved_frame;
            result?;
        }

        cached(&self.video, index)
    }

    /// Read every remaining frame and return the fully populated video.
    #[tracing::instrument(skip(self))]
    pub fn read_all(&mut self) -> VecVidResult<&Video> {
        while self.frame < self.total_frames {
            self.read()?;
        }
        Ok(&self.video)
    }
}

impl<R: Read + Seek> Decoder for FileDecoder<R> {
    fn read(&mut self) -> VecVidResult<&Frame> {
        let reader = open_reader(self.state, &mut self.reader, "read")?;
        if self.frame >= self.total_frames {
            return Err(VecVidError::end_of_stream(format!(
                "no frame {} (total {})",
                self.frame, self.total_frames
            )));
        }
        let index = self.frame as usize;
        let record_start = reader
            .stream_position()
            .context("failed to query vector file position")?;

        let step = if self.video.is_loaded(index) {
            skip_record(reader).map(|_| ())
        } else {
            read_record(reader).map(|frame| self.video.insert(index, frame))
        };
        if let Err(e) = step {
            reader
                .seek(SeekFrom::Start(record_start))
                .context("failed to rewind after bad record")?;
            return Err(e);
        }

        self.frame += 1;
        cached(&self.video, index)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> VecVidResult<()> {
        let reader = open_reader(self.state, &mut self.reader, "seek")?;
        let target = resolve_seek_target(self.frame, self.total_frames, offset, whence)?;

        let saved_pos = reader
            .stream_position()
            .context("failed to query vector file position")?;
        let mut skip = target as i128 - self.frame as i128;
        // Records can only be walked forward; go back to the first record and skip from there.
        if skip < 0 {
            reader
                .seek(SeekFrom::Start(HEADER_SIZE as u64))
                .context("failed to rewind vector file")?;
            skip = i128::from(target);
        }

        for _ in 0..skip {
            if let Err(e) = skip_record(reader) {
                reader
                    .seek(SeekFrom::Start(saved_pos))
                    .context("failed to restore vector file position")?;
                return Err(e);
            }
        }
        self.frame = target;
        Ok(())
    }

    fn current_frame(&self) -> u64 {
        self.frame
    }

    fn total_frames(&self) -> u64 {
        self.total_frames
    }

    fn framerate(&self) -> f32 {
        self.video.framerate()
    }

    fn dimensions(&self) -> Dimensions {
        self.video.dimensions()
    }

    fn video(&self) -> &Video {
        &self.video
    }
}

fn open_reader<'a, R>(
    state: DecoderState,
    reader: &'a mut Option<R>,
    op: &str,
) -> VecVidResult<&'a mut R> {
    match (state, reader.as_mut()) {
        (DecoderState::Open, Some(reader)) => Ok(reader),
        (DecoderState::Unopened, _) => Err(VecVidError::state(format!(
            "{op} called before open"
        ))),
        _ => Err(VecVidError::state(format!("{op} called after close"))),
    }
}

fn cached(video: &Video, index: usize) -> VecVidResult<&Frame> {
    video
        .get(index)
        .ok_or_else(|| VecVidError::state(format!("frame {index} is not resident")))
}

/// Count records by walking their length prefixes, then restore the cursor.
///
/// A trailing partial record is counted so that reading it reports the truncation.
fn count_frames<R: Read + Seek>(reader: &mut R) -> VecVidResult<u64> {
    let resume = reader
        .stream_position()
        .context("failed to query vector file position")?;
    let len = reader
        .seek(SeekFrom::End(0))
        .context("failed to measure vector file")?;
    reader
        .seek(SeekFrom::Start(HEADER_SIZE as u64))
        .context("failed to seek to first frame record")?;

    let mut pos = HEADER_SIZE as u64;
    let mut frames = 0u64;
    while pos < len {
        frames += 1;
        if len - pos < RECORD_PREFIX_SIZE as u64 {
            tracing::warn!(offset = pos, "vector file ends inside a record size prefix");
            break;
        }
        let body = read_prefix(reader)?;
        pos += RECORD_PREFIX_SIZE as u64 + u64::from(body);
        if pos > len {
            tracing::warn!(
                frame = frames - 1,
                missing = pos - len,
                "vector file ends inside a frame record"
            );
            break;
        }
        reader
            .seek(SeekFrom::Start(pos))
            .context("failed to skip frame record")?;
    }

    reader
        .seek(SeekFrom::Start(resume))
        .context("failed to restore vector file position")?;
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/decode/file.rs"]
mod tests;

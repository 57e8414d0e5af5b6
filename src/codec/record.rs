//! Frame record layout.
//!
//! ```text
//! u32 record_size        bytes following this field
//! u32 contour_count
//! contour_count x {
//!     u8  color          0 | 1
//!     u32 point_count
//!     point_count x { f32 x, f32 y }
//! }
//! ```

use std::io::{Read, Seek, SeekFrom};

use anyhow::Context as _;

use crate::foundation::error::{VecVidError, VecVidResult};
use crate::model::contour::{Color, Contour, Point};
use crate::model::frame::Frame;

/// Size of the `record_size` prefix.
pub const RECORD_PREFIX_SIZE: usize = 4;

const CONTOUR_HEADER_SIZE: usize = 1 + 4;
const POINT_SIZE: usize = 8;

fn wire_u32(n: usize, what: &str) -> VecVidResult<u32> {
    u32::try_from(n).map_err(|_| {
        VecVidError::validation(format!("{what} {n} does not fit the u32 wire field"))
    })
}

/// Byte length of the record body (everything after the prefix).
pub fn record_body_len(frame: &Frame) -> VecVidResult<u32> {
    let body = frame.iter().fold(4usize, |acc, c| {
        acc.saturating_add(CONTOUR_HEADER_SIZE)
            .saturating_add(c.len().saturating_mul(POINT_SIZE))
    });
    wire_u32(body, "frame record size")
}

/// Serialize one frame to a length-prefixed record.
pub fn encode_record(frame: &Frame) -> VecVidResult<Vec<u8>> {
    let body_len = record_body_len(frame)?;
    let contour_count = wire_u32(frame.len(), "contour count")?;

    let mut out = Vec::with_capacity(RECORD_PREFIX_SIZE + body_len as usize);
    out.extend_from_slice(&body_len.to_le_bytes());
    out.extend_from_slice(&contour_count.to_le_bytes());
    for contour in frame {
        out.push(contour.color.to_u8());
        out.extend_from_slice(&wire_u32(contour.len(), "point count")?.to_le_bytes());
        for p in &contour.points {
            out.extend_from_slice(&p.x.to_le_bytes());
            out.extend_from_slice(&p.y.to_le_bytes());
        }
    }
    debug_assert_eq!(out.len(), RECORD_PREFIX_SIZE + body_len as usize);
    Ok(out)
}

/// Decode one record from the front of `bytes`, returning the frame and bytes consumed.
pub fn decode_record(bytes: &[u8]) -> VecVidResult<(Frame, usize)> {
    let mut cur = BodyCursor::new(bytes);
    let body_len = cur.u32("record size")? as usize;
    let body = bytes
        .get(RECORD_PREFIX_SIZE..RECORD_PREFIX_SIZE + body_len)
        .ok_or_else(|| {
            VecVidError::corrupt(format!(
                "record declares {body_len} bytes but only {} remain",
                bytes.len() - RECORD_PREFIX_SIZE
            ))
        })?;
    Ok((parse_record_body(body)?, RECORD_PREFIX_SIZE + body_len))
}

/// Parse a record body. The body must be consumed exactly.
pub(crate) fn parse_record_body(body: &[u8]) -> VecVidResult<Frame> {
    let mut cur = BodyCursor::new(body);
    let contour_count = cur.u32("contour count")? as usize;

    // Each contour needs at least its 5-byte header; reject impossible counts before allocating.
    if contour_count > cur.remaining() / CONTOUR_HEADER_SIZE {
        return Err(VecVidError::corrupt(format!(
            "record claims {contour_count} contours in {} bytes",
            cur.remaining()
        )));
    }

    let mut contours = Vec::with_capacity(contour_count);
    for _ in 0..contour_count {
        let color = Color::from_u8(cur.u8("contour color")?)?;
        let point_count = cur.u32("point count")? as usize;
        if point_count > cur.remaining() / POINT_SIZE {
            return Err(VecVidError::corrupt(format!(
                "contour claims {point_count} points in {} bytes",
                cur.remaining()
            )));
        }
        let mut points = Vec::with_capacity(point_count);
        for _ in 0..point_count {
            let x = cur.f32("point x")?;
            let y = cur.f32("point y")?;
            points.push(Point::new(x, y));
        }
        contours.push(Contour::new(color, points));
    }

    if cur.remaining() != 0 {
        return Err(VecVidError::corrupt(format!(
            "{} trailing bytes after last contour",
            cur.remaining()
        )));
    }
    Ok(Frame::new(contours))
}

/// `read_exact` that reports a short read as [`VecVidError::CorruptData`].
pub(crate) fn read_exact_or_corrupt<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    what: &str,
) -> VecVidResult<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(VecVidError::corrupt(
            format!("stream ended while reading {what} ({} bytes)", buf.len()),
        )),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("failed to read {what}"))
            .into()),
    }
}

/// Read the `record_size` prefix at the current position.
pub(crate) fn read_prefix<R: Read + ?Sized>(reader: &mut R) -> VecVidResult<u32> {
    let mut prefix = [0u8; RECORD_PREFIX_SIZE];
    read_exact_or_corrupt(reader, &mut prefix, "record size")?;
    Ok(u32::from_le_bytes(prefix))
}

/// Read and parse one full record at the current position.
///
/// The body buffer grows with the bytes actually present, so a corrupt `record_size` cannot
/// force an allocation larger than the stream.
pub(crate) fn read_record<R: Read + ?Sized>(reader: &mut R) -> VecVidResult<Frame> {
    let body_len = read_prefix(reader)?;
    let mut body = Vec::new();
    Read::take(&mut *reader, u64::from(body_len))
        .read_to_end(&mut body)
        .context("failed to read frame record body")?;
    if body.len() as u64 != u64::from(body_len) {
        return Err(VecVidError::corrupt(format!(
            "stream ended while reading record body ({} of {body_len} bytes)",
            body.len()
        )));
    }
    parse_record_body(&body)
}

/// Skip one record using only its prefix. Returns the total bytes skipped.
pub(crate) fn skip_record<R: Read + Seek + ?Sized>(reader: &mut R) -> VecVidResult<u64> {
    let body_len = read_prefix(reader)?;
    reader
        .seek(SeekFrom::Current(i64::from(body_len)))
        .context("failed to skip frame record")?;
    Ok(RECORD_PREFIX_SIZE as u64 + u64::from(body_len))
}

struct BodyCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BodyCursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take<const N: usize>(&mut self, what: &str) -> VecVidResult<[u8; N]> {
        let bytes: [u8; N] = self
            .buf
            .get(self.pos..self.pos + N)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| {
                VecVidError::corrupt(format!("record ended while reading {what}"))
            })?;
        self.pos += N;
        Ok(bytes)
    }

    fn u8(&mut self, what: &str) -> VecVidResult<u8> {
        Ok(self.take::<1>(what)?[0])
    }

    fn u32(&mut self, what: &str) -> VecVidResult<u32> {
        Ok(u32::from_le_bytes(self.take(what)?))
    }

    fn f32(&mut self, what: &str) -> VecVidResult<f32> {
        Ok(f32::from_le_bytes(self.take(what)?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/record.rs"]
mod tests;

//! Container header.
//!
//! ```text
//! 0x00: version   u32 (see SUPPORTED_VERSIONS)
//! 0x04: framerate f32
//! 0x08: width     u32
//! 0x0C: height    u32
//! 0x10: frame records ...
//! ```
//!
//! All fields are little-endian. The frame count is not stored; readers derive it by walking the
//! record length prefixes.

use std::io::Read;

use crate::codec::record::read_exact_or_corrupt;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{VecVidError, VecVidResult};

/// Version written by the encoder.
pub const FORMAT_VERSION: u32 = 1;

/// Versions accepted by decoders.
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Header size in bytes; the first frame record starts here.
pub const HEADER_SIZE: usize = 16;

/// Container header.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    /// Format version.
    pub version: u32,
    /// Frames per second of the source video.
    pub framerate: f32,
    /// Source pixel dimensions.
    pub dimensions: Dimensions,
}

impl Header {
    /// Header for the current [`FORMAT_VERSION`].
    pub fn new(framerate: f32, dimensions: Dimensions) -> Self {
        Self {
            version: FORMAT_VERSION,
            framerate,
            dimensions,
        }
    }

    /// Serialize to the fixed 16-byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.version.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.framerate.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.dimensions.width.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.dimensions.height.to_le_bytes());
        bytes
    }

    /// Parse a header, validating the version before anything else.
    pub fn from_bytes(bytes: &[u8]) -> VecVidResult<Self> {
        let word = |at: usize| -> VecVidResult<[u8; 4]> {
            bytes
                .get(at..at + 4)
                .and_then(|s| s.try_into().ok())
                .ok_or_else(|| {
                    VecVidError::corrupt(format!(
                        "header truncated: {} of {HEADER_SIZE} bytes",
                        bytes.len()
                    ))
                })
        };

        let version = u32::from_le_bytes(word(0)?);
        check_version(version)?;

        Ok(Self {
            version,
            framerate: f32::from_le_bytes(word(4)?),
            dimensions: Dimensions {
                width: u32::from_le_bytes(word(8)?),
                height: u32::from_le_bytes(word(12)?),
            },
        })
    }

    /// Read and validate a header from the start of `reader`.
    ///
    /// The version is checked before the remaining fields are read, so a short file with an
    /// unknown version still reports a format error.
    pub(crate) fn read_from<R: Read>(reader: &mut R) -> VecVidResult<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        read_exact_or_corrupt(reader, &mut bytes[0..4], "header version")?;
        check_version(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))?;
        read_exact_or_corrupt(reader, &mut bytes[4..], "header fields")?;
        Self::from_bytes(&bytes)
    }
}

/// Fail with [`VecVidError::Format`] unless `version` is in [`SUPPORTED_VERSIONS`].
pub fn check_version(version: u32) -> VecVidResult<()> {
    if SUPPORTED_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(VecVidError::format(format!(
            "unsupported format version {version} (supported: {SUPPORTED_VERSIONS:?})"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/format.rs"]
mod tests;

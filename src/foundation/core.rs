use crate::foundation::error::{VecVidError, VecVidResult};

/// Source frame dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions from a width/height pair.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Reference point for a frame seek, mirroring `io::SeekFrom` at frame granularity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Whence {
    /// Offset is an absolute frame number.
    #[default]
    Absolute,
    /// Offset is relative to the current frame pointer.
    Current,
    /// Offset counts back from the end: `total_frames - offset`.
    End,
}

impl TryFrom<i32> for Whence {
    type Error = VecVidError;

    /// Map the numeric `0 | 1 | 2` convention onto [`Whence`].
    fn try_from(raw: i32) -> VecVidResult<Self> {
        match raw {
            0 => Ok(Self::Absolute),
            1 => Ok(Self::Current),
            2 => Ok(Self::End),
            other => Err(VecVidError::value(format!(
                "invalid whence ({other}, should be 0, 1 or 2)"
            ))),
        }
    }
}

/// Resolve a `(offset, whence)` pair into an absolute frame number in `0..=total`.
pub(crate) fn resolve_seek_target(
    current: u64,
    total: u64,
    offset: i64,
    whence: Whence,
) -> VecVidResult<u64> {
    let base = match whence {
        Whence::Absolute => 0i128,
        Whence::Current => i128::from(current),
        Whence::End => i128::from(total),
    };
    let target = match whence {
        Whence::End => base - i128::from(offset),
        Whence::Absolute | Whence::Current => base + i128::from(offset),
    };

    if target < 0 || target > i128::from(total) {
        return Err(VecVidError::value(format!(
            "seek target {target} is outside 0..={total}"
        )));
    }
    Ok(target as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

/// Convenience result type used across vecvid.
pub type VecVidResult<T> = Result<T, VecVidError>;

/// Top-level error taxonomy used by encoder and decoder APIs.
#[derive(thiserror::Error, Debug)]
pub enum VecVidError {
    /// Unsupported or unrecognized container version.
    #[error("format error: {0}")]
    Format(String),

    /// A record is truncated or its contents disagree with its length prefix.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// A read was attempted past the last frame of the stream.
    #[error("end of stream: {0}")]
    EndOfStream(String),

    /// An argument value is out of its accepted domain (e.g. an unknown `whence`).
    #[error("invalid value: {0}")]
    Value(String),

    /// The operation is not allowed in the current lifecycle state.
    #[error("invalid state: {0}")]
    State(String),

    /// Invalid caller-provided data (hierarchy shape, counts exceeding the wire format, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VecVidError {
    /// Build a [`VecVidError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`VecVidError::CorruptData`] value.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptData(msg.into())
    }

    /// Build a [`VecVidError::EndOfStream`] value.
    pub fn end_of_stream(msg: impl Into<String>) -> Self {
        Self::EndOfStream(msg.into())
    }

    /// Build a [`VecVidError::Value`] value.
    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    /// Build a [`VecVidError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`VecVidError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

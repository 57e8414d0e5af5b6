//! Contour-to-container encoding.
//!
//! The encoder owns a [`crate::Video`] arena and appends frame records to any `io::Write` sink in
//! frame order. Sinks are append-only; no position is ever revisited.

/// Streaming encoder and its options.
pub mod encoder;

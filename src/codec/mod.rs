//! Container byte layout and hierarchy-derived contour colors.

pub(crate) mod color;
pub(crate) mod format;
pub(crate) mod record;

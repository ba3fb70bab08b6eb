//! Text format definitions for HeRCM files
//!
//! This module contains the header codec and the closed set of body markers.
//! Nothing here touches files; callers pass lines of text in.

pub mod constants;
pub mod header;
pub mod marker;

pub use header::{FormatTag, FormatVariant, Header, MatrixFormat, Symmetry};
pub use marker::{Field, Marker};

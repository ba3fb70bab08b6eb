//! Validation utilities for HeRCM data
//!
//! This module contains pure validation functions with no I/O dependencies:
//! tokenizing and scalar parsing, array shape checks and the verification sum.

pub mod bounds;
pub mod checksum;
pub mod parsing;

pub use bounds::{validate_indices, validate_length, validate_row_ptr};
pub use checksum::{verification_matches, verification_sum};
pub use parsing::{parse_index, parse_value, tokenize, ScalarError};

//! Verification sum stored in COO variant headers
//!
//! The sum adds every value, column index and row index and reduces it
//! modulo the entry count. It guards against truncated or shuffled fields,
//! not against deliberate tampering.

/// Relative tolerance used when comparing verification sums
pub const VERIFICATION_TOLERANCE: f64 = 1e-4;

/// Compute the verification sum of a triple list
///
/// Returns `0.0` for an empty list. The remainder is never negative.
pub fn verification_sum(row: &[usize], col: &[usize], val: &[f32]) -> f64 {
    if val.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0f64;
    for &value in val {
        sum += value as f64;
    }
    for &index in col {
        sum += index as f64;
    }
    for &index in row {
        sum += index as f64;
    }

    let modulus = val.len() as f64;
    let remainder = sum % modulus;
    if remainder < 0.0 {
        remainder + modulus
    } else {
        remainder
    }
}

/// Compare a stored sum with a recomputed one
///
/// Values are parsed as `f32`, so sums written by higher-precision tools
/// differ in the last digits.
pub fn verification_matches(stored: f64, computed: f64) -> bool {
    let diff = if stored > computed {
        stored - computed
    } else {
        computed - stored
    };
    let magnitude = if stored < 0.0 { -stored } else { stored };
    let scale = if magnitude > 1.0 { magnitude } else { 1.0 };
    diff <= VERIFICATION_TOLERANCE * scale
}

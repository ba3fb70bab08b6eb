//! Error types for HeRCM operations

use crate::format::Field;

/// Detail for a rejected header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
    /// No header line at all
    Empty,
    /// Leading tag is not an accepted format literal
    Tag,
    /// Wrong number of whitespace-separated tokens
    FieldCount { expected: usize, found: usize },
    /// Token at `position` (0-based) is not a valid number
    Numeric { position: usize },
    /// Sub-tag does not name a known matrix layout
    Layout,
    /// Symmetry token is neither `SYM` nor `ASYM`
    Symmetry,
    /// The variant stores a verification sum but none was supplied
    Verification,
}

/// Errors that can occur during HeRCM operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HercmError {
    /// Header line rejected
    MalformedHeader(HeaderFault),
    /// A token inside an active field could not be parsed
    MalformedField { field: Field, line: usize },
    /// Too many lines passed without a field marker
    MarkerNotFound { line: usize },
    /// Body ended before a field was filled to its declared size
    IncompleteField {
        field: Field,
        expected: usize,
        found: usize,
    },
    /// More values than the destination buffer can hold
    BufferOverflow { field: Field, capacity: usize },
    /// Symmetry tag is neither `SYM` nor `ASYM`
    InvalidSymmetry,
    /// Stored verification sum does not match the data
    VerificationMismatch,
    /// Parallel arrays or buffers have inconsistent lengths
    LengthMismatch { expected: usize, found: usize },
    /// Row or column index outside the matrix
    IndexOutOfBounds { index: usize, bound: usize },
    /// Row pointer array decreases or does not span the values
    InvalidRowPtr { position: usize },
    /// Triples are not in row-major order
    NotRowMajor { position: usize },
    /// Buffers belong to a different format variant than the header
    WrongVariant,
    /// Declared size cannot be allocated
    TooLarge { field: Field, capacity: usize },
    /// Remark word would be read back as a marker or split into several words
    InvalidRemark { index: usize },
    /// The text sink refused a write
    Sink,
}

/// Coarse classification of [`HercmError`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// File missing, unopenable or unwritable
    Io,
    /// Bad tag, field count, numeric field or symmetry in the header
    MalformedHeader,
    /// Bad token in a field, or a required field never found
    MalformedField,
    /// More values than the declared capacity
    BufferOverflow,
    /// Write-time symmetry guard
    InvalidSymmetry,
    /// Verification sum mismatch
    Verification,
    /// Caller broke an input contract (lengths, ordering, variant)
    Precondition,
}

impl HercmError {
    /// Map this error onto its category
    pub const fn category(&self) -> ErrorCategory {
        match self {
            HercmError::MalformedHeader(_) | HercmError::TooLarge { .. } => {
                ErrorCategory::MalformedHeader
            }
            HercmError::MalformedField { .. }
            | HercmError::MarkerNotFound { .. }
            | HercmError::IncompleteField { .. }
            | HercmError::InvalidRowPtr { .. } => ErrorCategory::MalformedField,
            HercmError::BufferOverflow { .. } => ErrorCategory::BufferOverflow,
            HercmError::InvalidSymmetry => ErrorCategory::InvalidSymmetry,
            HercmError::VerificationMismatch => ErrorCategory::Verification,
            HercmError::LengthMismatch { .. }
            | HercmError::IndexOutOfBounds { .. }
            | HercmError::NotRowMajor { .. }
            | HercmError::WrongVariant
            | HercmError::InvalidRemark { .. } => ErrorCategory::Precondition,
            HercmError::Sink => ErrorCategory::Io,
        }
    }
}

impl core::fmt::Display for HeaderFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HeaderFault::Empty => write!(f, "missing header line"),
            HeaderFault::Tag => write!(f, "not a HeRCM header"),
            HeaderFault::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            HeaderFault::Numeric { position } => {
                write!(f, "field {position} is not a valid number")
            }
            HeaderFault::Layout => write!(f, "unknown matrix layout"),
            HeaderFault::Symmetry => write!(f, "symmetry must be SYM or ASYM"),
            HeaderFault::Verification => write!(f, "missing verification sum"),
        }
    }
}

impl core::fmt::Display for HercmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HercmError::MalformedHeader(fault) => write!(f, "Malformed header: {fault}"),
            HercmError::MalformedField { field, line } => {
                write!(f, "Malformed {field} field at line {line}")
            }
            HercmError::MarkerNotFound { line } => {
                write!(f, "No field marker found before line {line}")
            }
            HercmError::IncompleteField {
                field,
                expected,
                found,
            } => write!(f, "{field} field holds {found} of {expected} values"),
            HercmError::BufferOverflow { field, capacity } => {
                write!(f, "{field} field exceeds its capacity of {capacity}")
            }
            HercmError::InvalidSymmetry => write!(f, "Symmetry must be SYM or ASYM"),
            HercmError::VerificationMismatch => write!(f, "Verification sum mismatch"),
            HercmError::LengthMismatch { expected, found } => {
                write!(f, "Expected length {expected}, found {found}")
            }
            HercmError::IndexOutOfBounds { index, bound } => {
                write!(f, "Index {index} out of bounds (limit {bound})")
            }
            HercmError::InvalidRowPtr { position } => {
                write!(f, "Invalid row pointer at position {position}")
            }
            HercmError::NotRowMajor { position } => {
                write!(f, "Entries not in row-major order at position {position}")
            }
            HercmError::WrongVariant => write!(f, "Buffers do not match the file variant"),
            HercmError::TooLarge { field, capacity } => {
                write!(f, "{field} field of {capacity} values cannot be allocated")
            }
            HercmError::InvalidRemark { index } => {
                write!(f, "Remark {index} cannot be written as a plain word")
            }
            HercmError::Sink => write!(f, "Text sink rejected a write"),
        }
    }
}

impl core::error::Error for HercmError {}

/// Result type for HeRCM operations
pub type Result<T> = core::result::Result<T, HercmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            HercmError::MalformedHeader(HeaderFault::Tag).category(),
            ErrorCategory::MalformedHeader
        );
        assert_eq!(
            HercmError::MarkerNotFound { line: 3 }.category(),
            ErrorCategory::MalformedField
        );
        assert_eq!(
            HercmError::IncompleteField {
                field: Field::Val,
                expected: 3,
                found: 1
            }
            .category(),
            ErrorCategory::MalformedField
        );
        assert_eq!(
            HercmError::BufferOverflow {
                field: Field::ColInd,
                capacity: 2
            }
            .category(),
            ErrorCategory::BufferOverflow
        );
        assert_eq!(
            HercmError::TooLarge {
                field: Field::Val,
                capacity: usize::MAX
            }
            .category(),
            ErrorCategory::MalformedHeader
        );
        assert_eq!(
            HercmError::InvalidRemark { index: 0 }.category(),
            ErrorCategory::Precondition
        );
        assert_eq!(
            HercmError::NotRowMajor { position: 1 }.category(),
            ErrorCategory::Precondition
        );
    }
}

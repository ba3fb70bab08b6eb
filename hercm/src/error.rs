//! Error type for HeRCM file operations

use hercm_core::{ErrorCategory, HercmError};
use thiserror::Error;

/// All errors that can occur when reading or writing HeRCM files
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header, body or matrix rejected by the format layer
    #[error("{0}")]
    Format(#[from] HercmError),

    /// A line is not valid UTF-8
    #[error("Line {line} is not valid UTF-8")]
    Encoding { line: usize },

    /// A Matrix Market or valcol file was rejected
    #[error("{format} line {line}: {reason}")]
    Exchange {
        format: &'static str,
        line: usize,
        reason: &'static str,
    },
}

impl Error {
    /// Map this error onto the format's error taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Io(_) => ErrorCategory::Io,
            Error::Format(err) => err.category(),
            Error::Encoding { line: 1 } => ErrorCategory::MalformedHeader,
            Error::Encoding { .. } | Error::Exchange { .. } => ErrorCategory::MalformedField,
        }
    }

    /// The format-level error, if this is one
    pub fn format_error(&self) -> Option<HercmError> {
        match self {
            Error::Format(err) => Some(*err),
            _ => None,
        }
    }
}

/// Result type for HeRCM file operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use hercm_core::HeaderFault;
    use std::io;

    #[test]
    fn test_categories() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.category(), ErrorCategory::Io);

        let err = Error::from(HercmError::MalformedHeader(HeaderFault::Symmetry));
        assert_eq!(err.category(), ErrorCategory::MalformedHeader);
        assert_eq!(
            err.format_error(),
            Some(HercmError::MalformedHeader(HeaderFault::Symmetry))
        );

        assert_eq!(
            Error::Encoding { line: 1 }.category(),
            ErrorCategory::MalformedHeader
        );
        assert_eq!(
            Error::Encoding { line: 4 }.category(),
            ErrorCategory::MalformedField
        );
    }

    #[test]
    fn test_display() {
        let err = Error::from(HercmError::InvalidSymmetry);
        assert_eq!(err.to_string(), "Symmetry must be SYM or ASYM");
        assert_eq!(
            Error::Encoding { line: 3 }.to_string(),
            "Line 3 is not valid UTF-8"
        );

        let err = Error::Exchange {
            format: "valcol",
            line: 2,
            reason: "column indices start at 1",
        };
        assert_eq!(err.to_string(), "valcol line 2: column indices start at 1");
        assert_eq!(err.category(), ErrorCategory::MalformedField);
    }
}

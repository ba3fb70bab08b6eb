//! Body field markers
//!
//! Markers are decoded once per line into a closed type so the body parser
//! can match on them exhaustively.

use super::constants::markers;
use super::header::FormatVariant;

/// A data field of a HeRCM body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Nonzero values (floats)
    Val,
    /// CSR row pointers
    RowPtr,
    /// CSR column indices
    ColInd,
    /// COO row indices
    Row,
    /// COO column indices
    Col,
}

impl Field {
    /// Number of distinct fields
    pub const COUNT: usize = 5;

    /// Dense index used for per-field cursors
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Marker literal that opens this field
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Val => markers::VAL,
            Field::RowPtr => markers::ROWPTR,
            Field::ColInd => markers::COLIND,
            Field::Row => markers::ROW,
            Field::Col => markers::COL,
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Start of a data field
    Field(Field),
    /// Start of a free-text remarks field
    Remarks,
    /// Closes the current field
    EndField,
    /// Terminates the body
    End,
}

impl Marker {
    /// Decode the first token of a line for the given variant
    ///
    /// Tokens that are not markers of `variant` return `None`, so a `ROWPTR`
    /// line in a COO body is treated as data.
    pub fn decode(token: &str, variant: FormatVariant) -> Option<Self> {
        let marker = match token {
            markers::VAL => Marker::Field(Field::Val),
            markers::ROWPTR => Marker::Field(Field::RowPtr),
            markers::COLIND => Marker::Field(Field::ColInd),
            markers::ROW => Marker::Field(Field::Row),
            markers::COL => Marker::Field(Field::Col),
            markers::REMARKS => Marker::Remarks,
            markers::ENDFIELD => Marker::EndField,
            markers::END => Marker::End,
            _ => return None,
        };

        variant.accepts(marker).then_some(marker)
    }
}

//! HeRCM header line codec
//!
//! This module contains the header structure, the format variants it selects
//! and the symmetry and layout enums decoded from it.

use super::constants::{
    self, BXF_TAG, COO_HEADER_TOKENS, CSR_HEADER_TOKENS, HERCM_FILE_TAG, HERCM_TAG,
};
use super::marker::{Field, Marker};
use crate::error::{HeaderFault, HercmError, Result};
use crate::validation::parsing::{parse_index, parse_verification, tokenize};

/// Parsed first line of a HeRCM file
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Leading format literal
    pub tag: FormatTag,
    /// Layout sub-tag (CSR variant only)
    pub layout: Option<MatrixFormat>,
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Number of stored entries
    pub nnz: usize,
    /// Whether one triangle or the whole matrix is stored
    pub symmetry: Symmetry,
    /// Verification sum (COO variant only)
    pub verification: Option<f64>,
}

impl Header {
    /// Create a CSR variant header
    pub const fn csr(width: usize, height: usize, nnz: usize, symmetry: Symmetry) -> Self {
        Self {
            tag: FormatTag::HercmFile,
            layout: Some(MatrixFormat::Csr),
            width,
            height,
            nnz,
            symmetry,
            verification: None,
        }
    }

    /// Create a COO variant header
    pub const fn coo(
        tag: FormatTag,
        width: usize,
        height: usize,
        nnz: usize,
        symmetry: Symmetry,
        verification: f64,
    ) -> Self {
        Self {
            tag,
            layout: None,
            width,
            height,
            nnz,
            symmetry,
            verification: Some(verification),
        }
    }

    /// Format variant selected by the leading tag
    pub const fn variant(&self) -> FormatVariant {
        self.tag.variant()
    }

    /// Number of slots the caller must allocate for `field`
    pub const fn capacity(&self, field: Field) -> usize {
        match field {
            Field::RowPtr => self.height.saturating_add(1),
            Field::Val | Field::ColInd | Field::Row | Field::Col => self.nnz,
        }
    }

    /// Buffer lengths `(val, row_ptr, col_index)` for a CSR body
    pub const fn csr_capacities(&self) -> (usize, usize, usize) {
        (self.nnz, self.height.saturating_add(1), self.nnz)
    }

    /// Buffer lengths `(row, col, val)` for a COO body
    pub const fn coo_capacities(&self) -> (usize, usize, usize) {
        (self.nnz, self.nnz, self.nnz)
    }

    /// Smallest body, in bytes, that could hold every declared value
    ///
    /// Each value takes at least one character and is separated from the
    /// next by at least one whitespace character.
    pub fn min_body_len(&self) -> u64 {
        self.variant()
            .fields()
            .iter()
            .map(|&field| match self.capacity(field) as u64 {
                0 => 0,
                n => n.saturating_mul(2) - 1,
            })
            .fold(0, u64::saturating_add)
    }

    /// Parse a header line, detecting the variant from its leading tag
    pub fn parse(line: &str) -> Result<Self> {
        let variant =
            FormatVariant::detect(line).ok_or(HercmError::MalformedHeader(HeaderFault::Tag))?;
        Self::parse_as(line, variant)
    }

    /// Parse a header line that must belong to `variant`
    pub fn parse_as(line: &str, variant: FormatVariant) -> Result<Self> {
        let mut tokens = [""; CSR_HEADER_TOKENS];
        let mut count = 0;
        for token in tokenize(line) {
            if let Some(slot) = tokens.get_mut(count) {
                *slot = token;
            }
            count += 1;
        }

        if count == 0 {
            return Err(HercmError::MalformedHeader(HeaderFault::Empty));
        }

        let tag = match variant {
            FormatVariant::Csr if tokens[0] == HERCM_TAG && tokens[1] == "FILE" => {
                FormatTag::HercmFile
            }
            FormatVariant::Csr => return Err(HercmError::MalformedHeader(HeaderFault::Tag)),
            FormatVariant::Coo => match tokens[0] {
                HERCM_TAG => FormatTag::Hercm,
                BXF_TAG => FormatTag::Bxf,
                _ => return Err(HercmError::MalformedHeader(HeaderFault::Tag)),
            },
        };

        let expected = variant.header_tokens();
        if count != expected {
            return Err(HercmError::MalformedHeader(HeaderFault::FieldCount {
                expected,
                found: count,
            }));
        }

        let mut position = tag.token_count();
        let layout = match variant {
            FormatVariant::Csr => {
                let layout = MatrixFormat::from_token(tokens[position])
                    .ok_or(HercmError::MalformedHeader(HeaderFault::Layout))?;
                position += 1;
                Some(layout)
            }
            FormatVariant::Coo => None,
        };

        let numeric = |position: usize| {
            parse_index(tokens[position])
                .map_err(|_| HercmError::MalformedHeader(HeaderFault::Numeric { position }))
        };
        let width = numeric(position)?;
        let height = numeric(position + 1)?;
        if height.checked_add(1).is_none() {
            return Err(HercmError::MalformedHeader(HeaderFault::Numeric {
                position: position + 1,
            }));
        }
        let nnz = numeric(position + 2)?;

        let symmetry = Symmetry::from_token(tokens[position + 3])
            .ok_or(HercmError::MalformedHeader(HeaderFault::Symmetry))?;

        let verification = match variant {
            FormatVariant::Coo => {
                let position = position + 4;
                let value = parse_verification(tokens[position])
                    .map_err(|_| HercmError::MalformedHeader(HeaderFault::Numeric { position }))?;
                Some(value)
            }
            FormatVariant::Csr => None,
        };

        Ok(Self {
            tag,
            layout,
            width,
            height,
            nnz,
            symmetry,
            verification,
        })
    }

    /// Serialize this header as a single line without the line break
    pub fn write_to<W: core::fmt::Write>(&self, out: &mut W) -> Result<()> {
        let written = match self.variant() {
            FormatVariant::Csr => write!(
                out,
                "{} {} {} {} {} {}",
                self.tag,
                self.layout.unwrap_or(MatrixFormat::Csr),
                self.width,
                self.height,
                self.nnz,
                self.symmetry
            ),
            FormatVariant::Coo => {
                let verification = self
                    .verification
                    .ok_or(HercmError::MalformedHeader(HeaderFault::Verification))?;
                write!(
                    out,
                    "{} {} {} {} {} {}",
                    self.tag, self.width, self.height, self.nnz, self.symmetry, verification
                )
            }
        };

        written.map_err(|_| HercmError::Sink)
    }
}

/// Accepted leading tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatTag {
    /// `HERCM FILE`, the CSR variant
    HercmFile,
    /// `HERCM`, the COO variant
    Hercm,
    /// `BXF`, the COO variant as written by the BXF tooling
    Bxf,
}

impl FormatTag {
    /// Literal text of this tag
    pub const fn literal(self) -> &'static str {
        match self {
            FormatTag::HercmFile => HERCM_FILE_TAG,
            FormatTag::Hercm => HERCM_TAG,
            FormatTag::Bxf => BXF_TAG,
        }
    }

    /// Number of whitespace-separated tokens in the literal
    pub const fn token_count(self) -> usize {
        match self {
            FormatTag::HercmFile => 2,
            FormatTag::Hercm | FormatTag::Bxf => 1,
        }
    }

    /// Variant this tag selects
    pub const fn variant(self) -> FormatVariant {
        match self {
            FormatTag::HercmFile => FormatVariant::Csr,
            FormatTag::Hercm | FormatTag::Bxf => FormatVariant::Coo,
        }
    }
}

impl core::fmt::Display for FormatTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.literal())
    }
}

/// The two layouts of a HeRCM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatVariant {
    /// `HERCM FILE` header, `VAL`/`ROWPTR`/`COLIND` fields, `END` terminator
    Csr,
    /// `HERCM`/`BXF` header with verification sum, `VAL`/`ROW`/`COL` fields
    /// each closed by `ENDFIELD`
    Coo,
}

impl FormatVariant {
    /// Detect the variant from the leading tokens of a header line
    pub fn detect(line: &str) -> Option<Self> {
        let mut tokens = tokenize(line);
        match (tokens.next(), tokens.next()) {
            (Some(HERCM_TAG), Some("FILE")) => Some(FormatVariant::Csr),
            (Some(HERCM_TAG | BXF_TAG), _) => Some(FormatVariant::Coo),
            _ => None,
        }
    }

    /// Exact number of header tokens
    pub const fn header_tokens(self) -> usize {
        match self {
            FormatVariant::Csr => CSR_HEADER_TOKENS,
            FormatVariant::Coo => COO_HEADER_TOKENS,
        }
    }

    /// Data fields of this variant in the order they are written
    pub const fn fields(self) -> &'static [Field] {
        match self {
            FormatVariant::Csr => &[Field::Val, Field::RowPtr, Field::ColInd],
            FormatVariant::Coo => &[Field::Val, Field::Row, Field::Col],
        }
    }

    /// Whether `marker` belongs to this variant
    pub const fn accepts(self, marker: Marker) -> bool {
        match (self, marker) {
            (FormatVariant::Csr, Marker::Field(Field::Val | Field::RowPtr | Field::ColInd)) => {
                true
            }
            (FormatVariant::Csr, Marker::End) => true,
            (FormatVariant::Coo, Marker::Field(Field::Val | Field::Row | Field::Col)) => true,
            (FormatVariant::Coo, Marker::Remarks | Marker::EndField) => true,
            _ => false,
        }
    }
}

/// Matrix storage layouts named by the CSR variant's sub-tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixFormat {
    /// Coordinate (COO) format - row, col, value triplets
    Coo,
    /// Compressed Sparse Row (CSR) format
    Csr,
}

impl MatrixFormat {
    /// Decode a sub-tag token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "COO" => Some(MatrixFormat::Coo),
            "CSR" => Some(MatrixFormat::Csr),
            _ => None,
        }
    }
}

impl core::fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixFormat::Coo => write!(f, "COO"),
            MatrixFormat::Csr => write!(f, "CSR"),
        }
    }
}

/// Symmetry flag of a stored matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symmetry {
    /// Only the upper triangle of a symmetric matrix is stored
    Sym,
    /// All entries are stored
    #[default]
    Asym,
}

impl Symmetry {
    /// Decode a symmetry token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            constants::symmetry::SYM => Some(Symmetry::Sym),
            constants::symmetry::ASYM => Some(Symmetry::Asym),
            _ => None,
        }
    }

    /// Literal text of this flag
    pub const fn as_str(self) -> &'static str {
        match self {
            Symmetry::Sym => constants::symmetry::SYM,
            Symmetry::Asym => constants::symmetry::ASYM,
        }
    }
}

impl core::str::FromStr for Symmetry {
    type Err = HercmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s).ok_or(HercmError::InvalidSymmetry)
    }
}

impl core::fmt::Display for Symmetry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

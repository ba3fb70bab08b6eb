//! Text serialization of HeRCM bodies
//!
//! Output goes to any [`core::fmt::Write`] sink. Every shape check runs
//! before the first byte is written, so a rejected matrix leaves the sink
//! untouched.

use core::fmt::{Display, Write};

use crate::error::{HercmError, Result};
use crate::format::constants::{descriptors, markers};
use crate::format::{Field, FormatVariant, Header, Marker};
use crate::validation::validate_length;

/// Line wrapping of field data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextLayout {
    /// Scalars per line; `0` writes each field on a single line
    pub values_per_line: usize,
}

impl TextLayout {
    /// Wrap after `values_per_line` scalars
    pub const fn wrapped(values_per_line: usize) -> Self {
        Self { values_per_line }
    }
}

/// Write a CSR variant file: header, `VAL`, `ROWPTR`, `COLIND`, `END`
pub fn write_csr_body<W: Write>(
    out: &mut W,
    header: &Header,
    val: &[f32],
    row_ptr: &[usize],
    col_index: &[usize],
    layout: TextLayout,
) -> Result<()> {
    if header.variant() != FormatVariant::Csr {
        return Err(HercmError::WrongVariant);
    }
    validate_length(header.capacity(Field::Val), val.len())?;
    validate_length(header.capacity(Field::RowPtr), row_ptr.len())?;
    validate_length(header.capacity(Field::ColInd), col_index.len())?;

    header.write_to(out)?;
    newline(out)?;
    write_field(out, markers::VAL, val, layout)?;
    write_field(out, markers::ROWPTR, row_ptr, layout)?;
    write_field(out, markers::COLIND, col_index, layout)?;
    out.write_str(markers::END).map_err(|_| HercmError::Sink)?;
    newline(out)
}

/// Write a COO variant file: header, `REMARKS`, `VAL`, `ROW`, `COL`
///
/// Each field is introduced by a descriptor marker line and closed by
/// `ENDFIELD`. Remarks are written as whitespace-separated words; a word
/// that is empty, contains whitespace or is itself a marker is rejected
/// with [`HercmError::InvalidRemark`].
pub fn write_coo_body<W: Write>(
    out: &mut W,
    header: &Header,
    row: &[usize],
    col: &[usize],
    val: &[f32],
    remarks: &[&str],
    layout: TextLayout,
) -> Result<()> {
    if header.variant() != FormatVariant::Coo {
        return Err(HercmError::WrongVariant);
    }
    validate_length(header.nnz, row.len())?;
    validate_length(header.nnz, col.len())?;
    validate_length(header.nnz, val.len())?;
    validate_remarks(remarks)?;

    header.write_to(out)?;
    newline(out)?;

    write_coo_field(out, markers::REMARKS, descriptors::STRING_LIST, remarks, layout)?;
    write_coo_field(out, markers::VAL, descriptors::FLOAT_LIST, val, layout)?;
    write_coo_field(out, markers::ROW, descriptors::INT_LIST, row, layout)?;
    write_coo_field(out, markers::COL, descriptors::INT_LIST, col, layout)
}

/// Every remark must read back as exactly one non-marker token
fn validate_remarks(remarks: &[&str]) -> Result<()> {
    for (index, word) in remarks.iter().enumerate() {
        let plain = !word.is_empty()
            && !word.contains(|c: char| c.is_ascii_whitespace())
            && Marker::decode(word, FormatVariant::Coo).is_none();
        if !plain {
            return Err(HercmError::InvalidRemark { index });
        }
    }
    Ok(())
}

fn write_coo_field<W: Write, T: Display>(
    out: &mut W,
    marker: &str,
    descriptor: &str,
    items: &[T],
    layout: TextLayout,
) -> Result<()> {
    writeln!(out, "{marker} {descriptor}").map_err(|_| HercmError::Sink)?;
    write_data(out, items, layout)?;
    out.write_str(markers::ENDFIELD).map_err(|_| HercmError::Sink)?;
    newline(out)
}

fn write_field<W: Write, T: Display>(
    out: &mut W,
    marker: &str,
    items: &[T],
    layout: TextLayout,
) -> Result<()> {
    out.write_str(marker).map_err(|_| HercmError::Sink)?;
    newline(out)?;
    write_data(out, items, layout)
}

fn write_data<W: Write, T: Display>(out: &mut W, items: &[T], layout: TextLayout) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    let per_line = match layout.values_per_line {
        0 => items.len(),
        n => n,
    };
    for chunk in items.chunks(per_line) {
        for (i, item) in chunk.iter().enumerate() {
            if i > 0 {
                out.write_char(' ').map_err(|_| HercmError::Sink)?;
            }
            write!(out, "{item}").map_err(|_| HercmError::Sink)?;
        }
        newline(out)?;
    }
    Ok(())
}

fn newline<W: Write>(out: &mut W) -> Result<()> {
    out.write_char('\n').map_err(|_| HercmError::Sink)
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use crate::body::{parse_document, BodyLimits};
    use crate::format::{FormatTag, Symmetry};
    use crate::traits::{CooBuffers, CsrBuffers};
    use alloc::string::String;

    #[test]
    fn test_write_csr_layout() {
        let header = Header::csr(3, 3, 9, Symmetry::Asym);
        let val = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let col_index = [0, 1, 2, 0, 1, 2, 0, 1, 2];
        let row_ptr = [0, 3, 6, 9];

        let mut text = String::new();
        write_csr_body(&mut text, &header, &val, &row_ptr, &col_index, TextLayout::default())
            .unwrap();
        assert_eq!(
            text,
            "HERCM FILE CSR 3 3 9 ASYM\n\
             VAL\n1 2 3 4 5 6 7 8 9\n\
             ROWPTR\n0 3 6 9\n\
             COLIND\n0 1 2 0 1 2 0 1 2\n\
             END\n"
        );
    }

    #[test]
    fn test_wrapping() {
        let header = Header::csr(1, 4, 4, Symmetry::Sym);
        let mut text = String::new();
        write_csr_body(
            &mut text,
            &header,
            &[1.5, 2.5, 3.5, 4.5],
            &[0, 1, 2, 3, 4],
            &[0, 0, 0, 0],
            TextLayout::wrapped(2),
        )
        .unwrap();
        assert!(text.contains("VAL\n1.5 2.5\n3.5 4.5\nROWPTR\n0 1\n2 3\n4\n"));
    }

    #[test]
    fn test_shape_checked_before_writing() {
        let header = Header::csr(3, 3, 2, Symmetry::Asym);
        let mut text = String::new();
        assert_eq!(
            write_csr_body(&mut text, &header, &[1.0, 2.0], &[0, 1, 2], &[0, 1], TextLayout::default()),
            Err(HercmError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert!(text.is_empty());

        let coo = Header::coo(FormatTag::Hercm, 3, 3, 2, Symmetry::Asym, 0.0);
        assert_eq!(
            write_csr_body(&mut text, &coo, &[1.0, 2.0], &[0, 1, 2, 2], &[0, 1], TextLayout::default()),
            Err(HercmError::WrongVariant)
        );
        assert!(text.is_empty());
    }

    #[test]
    fn test_csr_text_parses_back() {
        let header = Header::csr(4, 3, 4, Symmetry::Asym);
        let val = [0.25f32, -1.0, 3.0e-7, 1.0e10];
        let row_ptr = [0, 2, 2, 4];
        let col_index = [1, 3, 0, 2];

        let mut text = String::new();
        write_csr_body(&mut text, &header, &val, &row_ptr, &col_index, TextLayout::wrapped(3))
            .unwrap();

        let mut out_val = [0.0f32; 4];
        let mut out_row_ptr = [0usize; 4];
        let mut out_col_index = [0usize; 4];
        let mut sink = CsrBuffers::new(&mut out_val, &mut out_row_ptr, &mut out_col_index);
        let (parsed, _) = parse_document(&text, &mut sink, BodyLimits::default()).unwrap();

        assert_eq!(parsed, header);
        assert_eq!(out_val, val);
        assert_eq!(out_row_ptr, row_ptr);
        assert_eq!(out_col_index, col_index);
    }

    #[test]
    fn test_coo_text_parses_back() {
        let row = [1usize, 0, 1];
        let col = [0usize, 1, 1];
        let val = [2.0f32, 1.0, 3.0];
        let header = Header::coo(FormatTag::Bxf, 2, 2, 3, Symmetry::Asym, 0.0);

        let mut text = String::new();
        write_coo_body(&mut text, &header, &row, &col, &val, &["hand", "made"], TextLayout::default())
            .unwrap();
        assert!(text.starts_with("BXF 2 2 3 ASYM 0\nREMARKS LIST STRING\nhand made\nENDFIELD\n"));
        assert!(text.contains("VAL LIST FLOAT\n2 1 3\nENDFIELD\nROW LIST INT\n1 0 1\nENDFIELD\n"));

        let mut out_row = [0usize; 3];
        let mut out_col = [0usize; 3];
        let mut out_val = [0.0f32; 3];
        let mut sink = CooBuffers::new(&mut out_row, &mut out_col, &mut out_val);
        let (parsed, summary) = parse_document(&text, &mut sink, BodyLimits::default()).unwrap();

        assert_eq!(parsed, header);
        assert_eq!(summary.remarks, 2);
        assert_eq!((out_row, out_col, out_val), (row, col, val));
    }

    #[test]
    fn test_marker_remarks_rejected_before_writing() {
        let header = Header::coo(FormatTag::Hercm, 1, 1, 1, Symmetry::Asym, 0.0);
        let rejected: [(&[&str], usize); 5] = [
            (&["ENDFIELD", "early"], 0),
            (&["note", "VAL"], 1),
            (&["ROW"], 0),
            (&["two words"], 0),
            (&["ok", ""], 1),
        ];

        for (remarks, index) in rejected {
            let mut text = String::new();
            assert_eq!(
                write_coo_body(&mut text, &header, &[0], &[0], &[1.0], remarks, TextLayout::wrapped(1)),
                Err(HercmError::InvalidRemark { index })
            );
            assert!(text.is_empty());
        }

        // Only markers of the COO variant are reserved
        let mut text = String::new();
        write_coo_body(
            &mut text,
            &header,
            &[0],
            &[0],
            &[1.0],
            &["END", "ROWPTR", "val"],
            TextLayout::wrapped(1),
        )
        .unwrap();

        let mut row = [9usize];
        let mut col = [9usize];
        let mut val = [9.0f32];
        let mut sink = CooBuffers::new(&mut row, &mut col, &mut val);
        let (_, summary) = parse_document(&text, &mut sink, BodyLimits::default()).unwrap();
        assert_eq!(summary.remarks, 3);
        assert_eq!((row, col, val), ([0], [0], [1.0]));
    }
}

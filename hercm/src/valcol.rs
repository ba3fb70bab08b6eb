//! Valcol files
//!
//! A terse CSR layout for square matrices: an `order nnz` line, one
//! `value column` line per entry with 1-based columns, then one row pointer
//! per line.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use hercm_core::validation::parsing::{parse_index, parse_value, tokenize};
use hercm_core::{CsrMatrix, HercmError, Symmetry};
use log::debug;

use crate::config::WriteConfig;
use crate::error::{Error, Result};
use crate::reader::next_line;
use crate::writer::persist;

const FORMAT: &str = "valcol";

fn fault(line: usize, reason: &'static str) -> Error {
    Error::Exchange {
        format: FORMAT,
        line,
        reason,
    }
}

/// Read a valcol stream
///
/// The symmetry is reported as [`Symmetry::Sym`] when nothing is stored
/// below the diagonal.
pub fn read_valcol_from<R: BufRead + ?Sized>(reader: &mut R) -> Result<(CsrMatrix, Symmetry)> {
    let mut buf = Vec::new();
    let (order, nnz) = {
        let text = next_line(reader, &mut buf, 1)?.ok_or_else(|| fault(1, "missing header"))?;
        let mut tokens = tokenize(text).map(parse_index);
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(Ok(order)), Some(Ok(nnz)), None) => (order, nnz),
            _ => return Err(fault(1, "header needs the order and entry count")),
        }
    };
    let rows = order.saturating_add(1);

    let mut val = Vec::new();
    let mut col_index = Vec::new();
    let mut row_ptr = Vec::new();
    let mut number = 1;

    while let Some(text) = next_line(reader, &mut buf, number + 1)? {
        number += 1;
        let mut tokens = tokenize(text);
        match (tokens.next(), tokens.next(), tokens.next()) {
            (None, ..) => {}
            (Some(value), Some(col), None) => {
                if !row_ptr.is_empty() {
                    return Err(fault(number, "entry after the row pointers"));
                }
                if val.len() == nnz {
                    return Err(fault(number, "more entries than declared"));
                }
                let value = parse_value(value).map_err(|_| fault(number, "invalid value"))?;
                let col = match parse_index(col) {
                    Ok(0) => return Err(fault(number, "column indices start at 1")),
                    Ok(col) => col - 1,
                    Err(_) => return Err(fault(number, "invalid column index")),
                };
                val.push(value);
                col_index.push(col);
            }
            (Some(pointer), None, _) => {
                if row_ptr.len() == rows {
                    return Err(fault(number, "more row pointers than rows"));
                }
                let pointer =
                    parse_index(pointer).map_err(|_| fault(number, "invalid row pointer"))?;
                row_ptr.push(pointer);
            }
            _ => return Err(fault(number, "expected one or two fields")),
        }
    }

    if val.len() != nnz {
        return Err(fault(number, "fewer entries than declared"));
    }
    if row_ptr.len() != rows {
        return Err(fault(number, "fewer row pointers than rows"));
    }

    let matrix = CsrMatrix::new(order, order, val, col_index, row_ptr)?;
    let symmetry = if matrix.to_coo()?.lower_triangle_is_empty() {
        debug!("valcol: lower triangle is empty, reading as SYM");
        Symmetry::Sym
    } else {
        Symmetry::Asym
    };
    Ok((matrix, symmetry))
}

/// Read a valcol file
pub fn read_valcol<P: AsRef<Path>>(path: P) -> Result<(CsrMatrix, Symmetry)> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    read_valcol_from(&mut reader)
}

/// Render a square CSR matrix as valcol text
pub fn render_valcol(matrix: &CsrMatrix) -> Result<String> {
    if matrix.width != matrix.height {
        return Err(HercmError::LengthMismatch {
            expected: matrix.height,
            found: matrix.width,
        }
        .into());
    }
    matrix.validate()?;

    let mut text = String::new();
    writeln!(text, "{} {}", matrix.height, matrix.val.len()).map_err(|_| HercmError::Sink)?;
    for (value, col) in matrix.val.iter().zip(&matrix.col_index) {
        writeln!(text, "{value} {}", col + 1).map_err(|_| HercmError::Sink)?;
    }
    for pointer in &matrix.row_ptr {
        writeln!(text, "{pointer}").map_err(|_| HercmError::Sink)?;
    }
    Ok(text)
}

/// Write a square CSR matrix as valcol text to any byte sink
pub fn write_valcol_to<W: Write>(mut out: W, matrix: &CsrMatrix) -> Result<()> {
    let text = render_valcol(matrix)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write a square CSR matrix to a valcol file
pub fn write_valcol<P: AsRef<Path>>(path: P, matrix: &CsrMatrix, config: &WriteConfig) -> Result<()> {
    let text = render_valcol(matrix)?;
    persist(path.as_ref(), &text, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<(CsrMatrix, Symmetry)> {
        read_valcol_from(&mut text.as_bytes())
    }

    fn reason(err: Error) -> (usize, &'static str) {
        match err {
            Error::Exchange { line, reason, .. } => (line, reason),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_layout() {
        let csr = CsrMatrix::from_dense(&[[1.0f32, 0.0], [2.5, 3.0]]).unwrap();
        let text = render_valcol(&csr).unwrap();
        assert_eq!(text, "2 3\n1 1\n2.5 1\n3 2\n0\n1\n3\n");

        let (back, symmetry) = read(&text).unwrap();
        assert_eq!(back, csr);
        assert_eq!(symmetry, Symmetry::Asym);
    }

    #[test]
    fn test_upper_triangle_reads_as_sym() {
        let (csr, symmetry) = read("2 3\n4 1\n1 2\n5 2\n0\n2\n3\n").unwrap();
        assert_eq!(symmetry, Symmetry::Sym);
        assert_eq!(csr.col_index, [0, 1, 1]);
        assert_eq!(csr.row_ptr, [0, 2, 3]);
    }

    #[test]
    fn test_non_square_rejected() {
        let csr = CsrMatrix::from_dense(&[[1.0f32, 2.0]]).unwrap();
        assert_eq!(
            render_valcol(&csr).unwrap_err().format_error(),
            Some(HercmError::LengthMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_rejected_inputs() {
        let cases = [
            ("", (1, "missing header")),
            ("2\n", (1, "header needs the order and entry count")),
            ("1 1\n1 0\n0\n1\n", (2, "column indices start at 1")),
            ("1 1\nx 1\n0\n1\n", (2, "invalid value")),
            ("1 1\n1 1\n1 1\n0\n1\n", (3, "more entries than declared")),
            ("1 1\n1 1\n0\n1 1\n", (4, "entry after the row pointers")),
            ("1 1\n1 1\n0\n1\n1\n", (5, "more row pointers than rows")),
            ("1 1\n1 1\n0\n", (3, "fewer row pointers than rows")),
            ("1 2\n1 1\n0\n1\n", (4, "fewer entries than declared")),
            ("1 1\n1 1 1\n", (2, "expected one or two fields")),
        ];

        for (text, expected) in cases {
            assert_eq!(reason(read(text).unwrap_err()), expected, "{text:?}");
        }

        // Shape checks of the assembled matrix still apply
        assert_eq!(
            read("1 1\n1 2\n0\n1\n").unwrap_err().format_error(),
            Some(HercmError::IndexOutOfBounds { index: 1, bound: 1 })
        );
    }
}

//! Matrix Market coordinate files
//!
//! Only the `coordinate` layout is handled, with `real`, `integer` or
//! `pattern` values and `general` or `symmetric` symmetry. Indices are
//! 1-based on disk. A symmetric file stores the lower triangle, which is read
//! into the upper triangle so the result matches `SYM` storage.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use hercm_core::validation::parsing::{parse_index, parse_value, tokenize};
use hercm_core::{CooMatrix, HercmError, Symmetry};
use log::debug;

use crate::config::WriteConfig;
use crate::error::{Error, Result};
use crate::reader::{next_line, BodySource, HercmFile};
use crate::writer::{persist, write_csr};

const BANNER: &str = "%%MatrixMarket";
const FORMAT: &str = "MatrixMarket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Real,
    Pattern,
}

fn fault(line: usize, reason: &'static str) -> Error {
    Error::Exchange {
        format: FORMAT,
        line,
        reason,
    }
}

fn parse_banner(text: &str) -> Option<(ValueKind, Symmetry)> {
    let mut tokens = tokenize(text).skip(1);
    let object = tokens.next()?;
    let layout = tokens.next()?;
    let field = tokens.next()?;
    let symmetry = tokens.next()?;
    if tokens.next().is_some()
        || !object.eq_ignore_ascii_case("matrix")
        || !layout.eq_ignore_ascii_case("coordinate")
    {
        return None;
    }

    let values = match field.to_ascii_lowercase().as_str() {
        "real" | "integer" => ValueKind::Real,
        "pattern" => ValueKind::Pattern,
        _ => return None,
    };
    let symmetry = match symmetry.to_ascii_lowercase().as_str() {
        "general" => Symmetry::Asym,
        "symmetric" => Symmetry::Sym,
        _ => return None,
    };
    Some((values, symmetry))
}

/// Parse a 1-based index no larger than `bound`
fn one_based(token: Option<&str>, bound: usize, line: usize) -> Result<usize> {
    let index = token
        .and_then(|token| parse_index(token).ok())
        .ok_or_else(|| fault(line, "missing or invalid index"))?;
    if index == 0 || index > bound {
        return Err(fault(line, "index outside the matrix"));
    }
    Ok(index - 1)
}

/// Empty matrix and declared entry count from the size line
fn read_size<'t>(
    mut tokens: impl Iterator<Item = &'t str>,
    line: usize,
) -> Result<(CooMatrix, usize)> {
    let mut size = || {
        tokens
            .next()
            .and_then(|token| parse_index(token).ok())
            .ok_or_else(|| fault(line, "size line needs rows, columns and entries"))
    };
    let height = size()?;
    let width = size()?;
    let declared = size()?;
    if tokens.next().is_some() {
        return Err(fault(line, "size line needs rows, columns and entries"));
    }

    let coo = CooMatrix {
        width,
        height,
        ..CooMatrix::default()
    };
    Ok((coo, declared))
}

/// Read a coordinate Matrix Market stream
///
/// Lines starting with `%` and blank lines are skipped. A missing banner is
/// read as `real general`.
pub fn read_mtx_from<R: BufRead + ?Sized>(reader: &mut R) -> Result<(CooMatrix, Symmetry)> {
    let mut buf = Vec::new();
    let mut number = 0;
    let mut values = ValueKind::Real;
    let mut symmetry = Symmetry::Asym;
    let mut matrix: Option<(CooMatrix, usize)> = None;

    while let Some(text) = next_line(reader, &mut buf, number + 1)? {
        number += 1;
        if number == 1 && text.starts_with(BANNER) {
            (values, symmetry) =
                parse_banner(text).ok_or_else(|| fault(number, "unsupported banner"))?;
            continue;
        }

        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        let mut tokens = tokenize(text);
        let Some((coo, declared)) = matrix.as_mut() else {
            matrix = Some(read_size(tokens, number)?);
            continue;
        };

        if coo.val.len() == *declared {
            return Err(fault(number, "more entries than declared"));
        }
        let row = one_based(tokens.next(), coo.height, number)?;
        let col = one_based(tokens.next(), coo.width, number)?;
        let value = match values {
            ValueKind::Pattern => 1.0,
            ValueKind::Real => tokens
                .next()
                .and_then(|token| parse_value(token).ok())
                .ok_or_else(|| fault(number, "missing or invalid value"))?,
        };
        if tokens.next().is_some() {
            return Err(fault(number, "unexpected trailing field"));
        }

        match symmetry {
            Symmetry::Sym if row < col => {
                return Err(fault(number, "symmetric entry above the diagonal"));
            }
            Symmetry::Sym => coo.push(col, row, value),
            Symmetry::Asym => coo.push(row, col, value),
        }
    }

    let (coo, declared) = matrix.ok_or_else(|| fault(number, "missing size line"))?;
    if coo.val.len() != declared {
        return Err(fault(number, "fewer entries than declared"));
    }
    debug!(
        "matrix market: {}x{} with {} entries, {}",
        coo.height,
        coo.width,
        declared,
        symmetry
    );
    Ok((coo, symmetry))
}

/// Read a coordinate Matrix Market file
pub fn read_mtx<P: AsRef<Path>>(path: P) -> Result<(CooMatrix, Symmetry)> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    read_mtx_from(&mut reader)
}

/// Render a matrix as coordinate Matrix Market text
///
/// With [`Symmetry::Sym`] every entry is written into the lower triangle.
pub fn render_mtx(matrix: &CooMatrix, symmetry: Symmetry) -> Result<String> {
    matrix.validate()?;

    let kind = match symmetry {
        Symmetry::Sym => "symmetric",
        Symmetry::Asym => "general",
    };
    let mut text = String::new();
    writeln!(text, "{BANNER} matrix coordinate real {kind}").map_err(|_| HercmError::Sink)?;
    writeln!(text, "{} {} {}", matrix.height, matrix.width, matrix.val.len())
        .map_err(|_| HercmError::Sink)?;
    for (row, col, value) in matrix.entries() {
        let (row, col) = match symmetry {
            Symmetry::Sym => (row.max(col), row.min(col)),
            Symmetry::Asym => (row, col),
        };
        writeln!(text, "{} {} {value}", row + 1, col + 1).map_err(|_| HercmError::Sink)?;
    }
    Ok(text)
}

/// Write a matrix as coordinate Matrix Market text to any byte sink
pub fn write_mtx_to<W: Write>(mut out: W, matrix: &CooMatrix, symmetry: Symmetry) -> Result<()> {
    let text = render_mtx(matrix, symmetry)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write a matrix to a coordinate Matrix Market file
pub fn write_mtx<P: AsRef<Path>>(
    path: P,
    matrix: &CooMatrix,
    symmetry: Symmetry,
    config: &WriteConfig,
) -> Result<()> {
    let text = render_mtx(matrix, symmetry)?;
    persist(path.as_ref(), &text, config)
}

/// Convert a Matrix Market file into a CSR variant HeRCM file
pub fn mtx_to_hercm<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &WriteConfig,
) -> Result<()> {
    let (coo, symmetry) = read_mtx(input)?;
    write_csr(output, &coo.into_csr()?, symmetry, config)
}

/// Convert a HeRCM file of either variant into a Matrix Market file
pub fn hercm_to_mtx<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &WriteConfig,
) -> Result<()> {
    let file = HercmFile::open(input)?;
    let coo = file.read_as_csr()?.to_coo()?;
    write_mtx(output, &coo, file.header.symmetry, config)
}

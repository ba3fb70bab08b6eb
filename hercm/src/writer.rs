//! Writing HeRCM files
//!
//! Text is rendered completely in memory before the destination is opened,
//! so a matrix that fails validation never leaves a partial file behind.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use hercm_core::{write_coo_body, write_csr_body, CooMatrix, CsrMatrix, Symmetry};
use log::debug;

use crate::config::WriteConfig;
use crate::error::Result;

/// Render a CSR matrix as CSR variant text
pub fn render_csr(matrix: &CsrMatrix, symmetry: Symmetry, config: &WriteConfig) -> Result<String> {
    let header = matrix.header(symmetry);
    let mut text = String::new();
    write_csr_body(
        &mut text,
        &header,
        &matrix.val,
        &matrix.row_ptr,
        &matrix.col_index,
        config.layout(),
    )?;
    Ok(text)
}

/// Render a COO matrix as COO variant text with its verification sum
pub fn render_coo(
    matrix: &CooMatrix,
    symmetry: Symmetry,
    remarks: &[&str],
    config: &WriteConfig,
) -> Result<String> {
    let header = matrix.header(config.coo_tag, symmetry);
    let mut text = String::new();
    write_coo_body(
        &mut text,
        &header,
        &matrix.row,
        &matrix.col,
        &matrix.val,
        remarks,
        config.layout(),
    )?;
    Ok(text)
}

/// Write a CSR matrix to any byte sink
pub fn write_csr_to<W: Write>(
    mut out: W,
    matrix: &CsrMatrix,
    symmetry: Symmetry,
    config: &WriteConfig,
) -> Result<()> {
    let text = render_csr(matrix, symmetry, config)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write a CSR matrix to `path`
pub fn write_csr<P: AsRef<Path>>(
    path: P,
    matrix: &CsrMatrix,
    symmetry: Symmetry,
    config: &WriteConfig,
) -> Result<()> {
    let text = render_csr(matrix, symmetry, config)?;
    persist(path.as_ref(), &text, config)
}

/// Write a COO matrix to `path`
pub fn write_coo<P: AsRef<Path>>(
    path: P,
    matrix: &CooMatrix,
    symmetry: Symmetry,
    config: &WriteConfig,
) -> Result<()> {
    let text = render_coo(matrix, symmetry, &[], config)?;
    persist(path.as_ref(), &text, config)
}

pub(crate) fn persist(path: &Path, text: &str, config: &WriteConfig) -> Result<()> {
    debug!("writing {} bytes to {}", text.len(), path.display());
    let mut file = create(path, config.overwrite)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn create(path: &Path, overwrite: bool) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hercm_core::{HercmError, Header};

    #[test]
    fn test_render_csr() {
        let matrix = CsrMatrix::from_dense(&[[1.0f32, 0.0], [0.0, 2.0]]).unwrap();
        let text = render_csr(&matrix, Symmetry::Sym, &WriteConfig::default()).unwrap();
        assert_eq!(
            text,
            "HERCM FILE CSR 2 2 2 SYM\nVAL\n1 2\nROWPTR\n0 1 2\nCOLIND\n0 1\nEND\n"
        );
    }

    #[test]
    fn test_render_coo_uses_configured_tag() {
        let matrix = CooMatrix::from_dense(&[[0.0f32, 3.0], [4.0, 0.0]]).unwrap();
        let text = render_coo(&matrix, Symmetry::Asym, &["note"], &WriteConfig::bxf()).unwrap();
        let header = Header::parse(text.lines().next().unwrap()).unwrap();
        assert_eq!(header.tag, hercm_core::FormatTag::Bxf);
        assert_eq!(header.verification, Some(matrix.verification_sum()));
        assert!(text.contains("REMARKS LIST STRING\nnote\nENDFIELD\n"));
    }

    #[test]
    fn test_invalid_shape_writes_nothing() {
        let mut matrix = CsrMatrix::from_dense(&[[1.0f32]]).unwrap();
        matrix.row_ptr.push(1);

        let mut out = Vec::new();
        let err = write_csr_to(&mut out, &matrix, Symmetry::Asym, &WriteConfig::default())
            .unwrap_err();
        assert_eq!(
            err.format_error(),
            Some(HercmError::LengthMismatch {
                expected: 2,
                found: 3
            })
        );
        assert!(out.is_empty());
    }
}

//! Owned COO and CSR matrices
//!
//! These wrap the slice-level routines of [`crate::canonical`] and
//! [`crate::convert`] for callers that are happy to allocate.

use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::canonical;
use crate::convert::{coo_to_csr, csr_to_coo_rows};
use crate::error::{HercmError, Result};
use crate::format::{Field, FormatTag, Header, Symmetry};
use crate::traits::{CooBuffers, CsrBuffers, MatrixOperations, SparseMatrix};
use crate::validation::{
    validate_indices, validate_length, validate_row_ptr, verification_matches, verification_sum,
};

/// Coordinate matrix: parallel row, column and value arrays in any order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CooMatrix {
    pub width: usize,
    pub height: usize,
    pub row: Vec<usize>,
    pub col: Vec<usize>,
    pub val: Vec<f32>,
}

impl CooMatrix {
    /// Build a matrix from triples, checking lengths and bounds
    pub fn new(
        width: usize,
        height: usize,
        row: Vec<usize>,
        col: Vec<usize>,
        val: Vec<f32>,
    ) -> Result<Self> {
        let matrix = Self {
            width,
            height,
            row,
            col,
            val,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Zero-filled arrays sized exactly as `header` declares
    pub fn zeroed_for(header: &Header) -> Result<Self> {
        let (row, col, val) = header.coo_capacities();
        Ok(Self {
            width: header.width,
            height: header.height,
            row: zeroed(row, 0, Field::Row)?,
            col: zeroed(col, 0, Field::Col)?,
            val: zeroed(val, 0.0, Field::Val)?,
        })
    }

    /// Collect the nonzero entries of a dense row-major matrix
    pub fn from_dense<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut matrix = Self {
            width,
            height: rows.len(),
            ..Self::default()
        };

        for (r, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            validate_length(width, values.len())?;
            for (c, &value) in values.iter().enumerate() {
                if value != 0.0 {
                    matrix.push(r, c, value);
                }
            }
        }

        Ok(matrix)
    }

    /// Append one entry without any ordering or bounds check
    pub fn push(&mut self, row: usize, col: usize, val: f32) {
        self.row.push(row);
        self.col.push(col);
        self.val.push(val);
    }

    /// Lend the arrays to the body parser
    pub fn buffers(&mut self) -> CooBuffers<'_> {
        CooBuffers::new(&mut self.row, &mut self.col, &mut self.val)
    }

    /// Check array lengths and that every index lies inside the matrix
    pub fn validate(&self) -> Result<()> {
        validate_length(self.val.len(), self.row.len())?;
        validate_length(self.val.len(), self.col.len())?;
        validate_indices(&self.row, self.height)?;
        validate_indices(&self.col, self.width)
    }

    /// Whether entries are sorted by row, then column
    pub fn is_row_major(&self) -> bool {
        canonical::is_row_major(&self.row, &self.col)
    }

    /// Sort entries into row-major order
    pub fn canonicalize(&mut self) -> Result<()> {
        canonical::canonicalize(&mut self.row, &mut self.col, &mut self.val)
    }

    /// Convert into CSR, sorting first if needed
    pub fn into_csr(mut self) -> Result<CsrMatrix> {
        self.validate()?;
        self.canonicalize()?;

        let mut row_ptr = zeroed(self.height.saturating_add(1), 0, Field::RowPtr)?;
        coo_to_csr(&self.row, self.height, &mut row_ptr)?;

        Ok(CsrMatrix {
            width: self.width,
            height: self.height,
            val: self.val,
            col_index: self.col,
            row_ptr,
        })
    }

    /// Convert a copy into CSR
    pub fn to_csr(&self) -> Result<CsrMatrix> {
        self.clone().into_csr()
    }

    /// Drop entries whose value is exactly zero
    pub fn remove_zeros(&mut self) {
        self.retain(|_, _, value| value != 0.0);
    }

    /// Keep only entries for which `keep(row, col, val)` holds
    pub fn retain(&mut self, mut keep: impl FnMut(usize, usize, f32) -> bool) {
        let mut kept = 0;
        for i in 0..self.val.len() {
            if keep(self.row[i], self.col[i], self.val[i]) {
                self.row[kept] = self.row[i];
                self.col[kept] = self.col[i];
                self.val[kept] = self.val[i];
                kept += 1;
            }
        }
        self.row.truncate(kept);
        self.col.truncate(kept);
        self.val.truncate(kept);
    }

    /// Swap rows and columns
    pub fn transpose(&mut self) {
        core::mem::swap(&mut self.row, &mut self.col);
        core::mem::swap(&mut self.width, &mut self.height);
    }

    /// Whether no nonzero entry lies below the diagonal
    pub fn lower_triangle_is_empty(&self) -> bool {
        self.entries()
            .all(|(row, col, value)| row <= col || value == 0.0)
    }

    /// Whether the matrix equals its transpose
    ///
    /// A matrix stored as [`Symmetry::Sym`] with an empty lower triangle is
    /// symmetric by definition. Otherwise every off-diagonal entry must be
    /// matched by its mirror image; duplicate coordinates are summed.
    pub fn is_symmetric(&self, stored: Symmetry) -> bool {
        if stored == Symmetry::Sym && self.lower_triangle_is_empty() {
            return true;
        }

        let mut off_diagonal: HashMap<(usize, usize), f32> = HashMap::new();
        for (row, col, value) in self.entries() {
            if row != col {
                *off_diagonal.entry((row, col)).or_insert(0.0) += value;
            }
        }

        off_diagonal.iter().all(|(&(row, col), &value)| {
            let mirror = off_diagonal.get(&(col, row)).copied().unwrap_or(0.0);
            mirror == value
        })
    }

    /// Discard the lower triangle, leaving the storage used by `SYM` files
    pub fn truncate_lower_triangle(&mut self) {
        self.retain(|row, col, _| row <= col);
    }

    /// Expand `SYM` storage into the full matrix
    ///
    /// Anything already in the lower triangle is replaced by the mirror of
    /// the upper triangle. The result is in row-major order.
    pub fn mirror_upper_triangle(&mut self) -> Result<()> {
        self.truncate_lower_triangle();

        let upper = self.val.len();
        for i in 0..upper {
            if self.row[i] < self.col[i] {
                self.push(self.col[i], self.row[i], self.val[i]);
            }
        }

        self.canonicalize()
    }

    /// Verification sum over the stored entries
    pub fn verification_sum(&self) -> f64 {
        verification_sum(&self.row, &self.col, &self.val)
    }

    /// Whether `header`'s stored verification sum matches these entries
    pub fn verify(&self, header: &Header) -> Result<()> {
        match header.verification {
            Some(stored) if !verification_matches(stored, self.verification_sum()) => {
                Err(HercmError::VerificationMismatch)
            }
            _ => Ok(()),
        }
    }

    /// COO variant header describing this matrix
    pub fn header(&self, tag: FormatTag, symmetry: Symmetry) -> Header {
        Header::coo(
            tag,
            self.width,
            self.height,
            self.val.len(),
            symmetry,
            self.verification_sum(),
        )
    }

    /// Iterate `(row, col, val)` triples in storage order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.val)
            .map(|((&row, &col), &val)| (row, col, val))
    }
}

impl SparseMatrix for CooMatrix {
    type Element = f32;

    fn get_element(&self, row: usize, col: usize) -> Option<f32> {
        self.entries()
            .find(|&(r, c, _)| r == row && c == col)
            .map(|(_, _, value)| value)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn nnz(&self) -> usize {
        self.val.len()
    }
}

impl MatrixOperations for CooMatrix {
    fn get_row(&self, row_index: usize) -> Vec<f32> {
        let mut found: Vec<(usize, f32)> = self
            .entries()
            .filter(|&(r, _, _)| r == row_index)
            .map(|(_, c, value)| (c, value))
            .collect();
        found.sort_by_key(|&(c, _)| c);
        found.into_iter().map(|(_, value)| value).collect()
    }

    fn get_col(&self, col_index: usize) -> Vec<f32> {
        let mut found: Vec<(usize, f32)> = self
            .entries()
            .filter(|&(_, c, _)| c == col_index)
            .map(|(r, _, value)| (r, value))
            .collect();
        found.sort_by_key(|&(r, _)| r);
        found.into_iter().map(|(_, value)| value).collect()
    }
}

/// Compressed sparse row matrix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsrMatrix {
    pub width: usize,
    pub height: usize,
    pub val: Vec<f32>,
    pub col_index: Vec<usize>,
    pub row_ptr: Vec<usize>,
}

impl CsrMatrix {
    /// Build a matrix from CSR arrays, checking the row pointer invariants
    pub fn new(
        width: usize,
        height: usize,
        val: Vec<f32>,
        col_index: Vec<usize>,
        row_ptr: Vec<usize>,
    ) -> Result<Self> {
        let matrix = Self {
            width,
            height,
            val,
            col_index,
            row_ptr,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Zero-filled arrays sized exactly as `header` declares
    pub fn zeroed_for(header: &Header) -> Result<Self> {
        let (val, row_ptr, col_index) = header.csr_capacities();
        Ok(Self {
            width: header.width,
            height: header.height,
            val: zeroed(val, 0.0, Field::Val)?,
            col_index: zeroed(col_index, 0, Field::ColInd)?,
            row_ptr: zeroed(row_ptr, 0, Field::RowPtr)?,
        })
    }

    /// Compress a dense row-major matrix
    pub fn from_dense<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        CooMatrix::from_dense(rows)?.into_csr()
    }

    /// Lend the arrays to the body parser
    pub fn buffers(&mut self) -> CsrBuffers<'_> {
        CsrBuffers::new(&mut self.val, &mut self.row_ptr, &mut self.col_index)
    }

    /// Check shapes, row pointers and column bounds
    pub fn validate(&self) -> Result<()> {
        validate_length(self.val.len(), self.col_index.len())?;
        validate_length(self.height.saturating_add(1), self.row_ptr.len())?;
        validate_row_ptr(&self.row_ptr, self.val.len())?;
        validate_indices(&self.col_index, self.width)
    }

    /// Column indices and values of one row
    pub fn row_entries(&self, row: usize) -> Option<(&[usize], &[f32])> {
        let start = *self.row_ptr.get(row)?;
        let end = *self.row_ptr.get(row + 1)?;
        Some((self.col_index.get(start..end)?, self.val.get(start..end)?))
    }

    /// Expand into row-major COO triples
    pub fn to_coo(&self) -> Result<CooMatrix> {
        let mut row = vec![0; self.val.len()];
        csr_to_coo_rows(&self.row_ptr, &mut row)?;

        Ok(CooMatrix {
            width: self.width,
            height: self.height,
            row,
            col: self.col_index.clone(),
            val: self.val.clone(),
        })
    }

    /// Materialize as dense rows; duplicate coordinates are summed
    pub fn to_dense(&self) -> Result<Vec<Vec<f32>>> {
        self.validate()?;

        let mut dense = vec![vec![0.0; self.width]; self.height];
        for (r, dense_row) in dense.iter_mut().enumerate() {
            if let Some((cols, values)) = self.row_entries(r) {
                for (&c, &value) in cols.iter().zip(values) {
                    dense_row[c] += value;
                }
            }
        }
        Ok(dense)
    }

    /// CSR variant header describing this matrix
    pub fn header(&self, symmetry: Symmetry) -> Header {
        Header::csr(self.width, self.height, self.val.len(), symmetry)
    }
}

impl SparseMatrix for CsrMatrix {
    type Element = f32;

    fn get_element(&self, row: usize, col: usize) -> Option<f32> {
        let (cols, values) = self.row_entries(row)?;
        cols.iter().position(|&c| c == col).map(|i| values[i])
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn nnz(&self) -> usize {
        self.val.len()
    }
}

impl MatrixOperations for CsrMatrix {
    fn get_row(&self, row_index: usize) -> Vec<f32> {
        self.row_entries(row_index)
            .map(|(_, values)| values.to_vec())
            .unwrap_or_default()
    }

    fn get_col(&self, col_index: usize) -> Vec<f32> {
        (0..self.height)
            .filter_map(|r| self.get_element(r, col_index))
            .collect()
    }
}

/// `len` copies of `value`, or [`HercmError::TooLarge`] if that cannot be allocated
fn zeroed<T: Clone>(len: usize, value: T, field: Field) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| HercmError::TooLarge {
            field,
            capacity: len,
        })?;
    buf.resize(len, value);
    Ok(buf)
}

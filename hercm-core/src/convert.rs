//! Conversion between COO row indices and CSR row pointers
//!
//! Every function here expects triples already in row-major order; none of
//! them sorts.

use crate::error::{HercmError, Result};
use crate::format::Field;
use crate::validation::bounds::{first_descent, validate_indices, validate_row_ptr};

/// Record the start offset of every row change in `row`
///
/// This is the bare scan: the current row starts at 0, and each time the row
/// index changes the scan index is written to the next slot, beginning at
/// `row_ptr[1]`. It never writes `row_ptr[0]` or the final sentinel, so the
/// caller must set `row_ptr[0] = 0` and finish with [`finish_row_ptr`]. Empty
/// rows get no slot of their own.
///
/// Returns the number of slots written.
pub fn scan_row_starts(row: &[usize], row_ptr: &mut [usize]) -> Result<usize> {
    let capacity = row_ptr.len().saturating_sub(1);
    let mut current_row = 0;
    let mut slot = 1;

    for (i, &r) in row.iter().enumerate() {
        if r != current_row {
            if slot >= capacity {
                return Err(HercmError::BufferOverflow {
                    field: Field::RowPtr,
                    capacity,
                });
            }
            row_ptr[slot] = i;
            slot += 1;
            current_row = r;
        }
    }

    Ok(slot - 1)
}

/// Write the `nnz` sentinel into the last row pointer slot
pub fn finish_row_ptr(row_ptr: &mut [usize], nnz: usize) -> Result<()> {
    let last = row_ptr.last_mut().ok_or(HercmError::LengthMismatch {
        expected: 1,
        found: 0,
    })?;
    *last = nnz;
    Ok(())
}

/// Derive a complete row pointer array from row-major row indices
///
/// Every slot is written: `row_ptr[0] == 0`, `row_ptr[height] == row.len()`,
/// and an empty row `r` has `row_ptr[r] == row_ptr[r + 1]`.
pub fn coo_to_csr(row: &[usize], height: usize, row_ptr: &mut [usize]) -> Result<()> {
    if row_ptr.len() != height + 1 {
        return Err(HercmError::LengthMismatch {
            expected: height + 1,
            found: row_ptr.len(),
        });
    }
    if let Some(position) = first_descent(row) {
        return Err(HercmError::NotRowMajor { position });
    }
    validate_indices(row, height)?;

    let mut next = 0;
    for (i, &r) in row.iter().enumerate() {
        while next <= r {
            row_ptr[next] = i;
            next += 1;
        }
    }
    for slot in &mut row_ptr[next..] {
        *slot = row.len();
    }

    Ok(())
}

/// Expand CSR row pointers into one row index per stored entry
pub fn csr_to_coo_rows(row_ptr: &[usize], row: &mut [usize]) -> Result<()> {
    validate_row_ptr(row_ptr, row.len())?;

    for (r, span) in row_ptr.windows(2).enumerate() {
        for slot in &mut row[span[0]..span[1]] {
            *slot = r;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_one_entry_per_row() {
        let row = [0, 1, 2];
        let mut row_ptr = [0usize; 4];
        assert_eq!(scan_row_starts(&row, &mut row_ptr), Ok(2));
        assert_eq!(row_ptr, [0, 1, 2, 0]);

        finish_row_ptr(&mut row_ptr, row.len()).unwrap();
        assert_eq!(row_ptr, [0, 1, 2, 3]);
    }

    #[test]
    fn test_scan_leaves_first_slot_alone() {
        let row = [0, 0, 1, 1, 1];
        let mut row_ptr = [usize::MAX; 3];
        scan_row_starts(&row, &mut row_ptr).unwrap();
        assert_eq!(row_ptr, [usize::MAX, 2, usize::MAX]);
    }

    #[test]
    fn test_scan_collapses_empty_rows() {
        // Row 1 is empty, so row 2's start lands in slot 1
        let row = [0, 2, 2];
        let mut row_ptr = [0usize; 4];
        assert_eq!(scan_row_starts(&row, &mut row_ptr), Ok(1));
        assert_eq!(row_ptr, [0, 1, 0, 0]);
    }

    #[test]
    fn test_scan_leading_empty_row() {
        // The first row change is recorded at index 0
        let row = [1, 1];
        let mut row_ptr = [0usize; 3];
        assert_eq!(scan_row_starts(&row, &mut row_ptr), Ok(1));
        assert_eq!(row_ptr, [0, 0, 0]);
    }

    #[test]
    fn test_scan_overflow() {
        let row = [0, 1, 2, 3];
        let mut row_ptr = [0usize; 3];
        assert_eq!(
            scan_row_starts(&row, &mut row_ptr),
            Err(HercmError::BufferOverflow {
                field: Field::RowPtr,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_coo_to_csr_dense() {
        let row = [0, 0, 0, 1, 1, 1, 2, 2, 2];
        let mut row_ptr = [usize::MAX; 4];
        coo_to_csr(&row, 3, &mut row_ptr).unwrap();
        assert_eq!(row_ptr, [0, 3, 6, 9]);
    }

    #[test]
    fn test_coo_to_csr_empty_rows() {
        let mut row_ptr = [usize::MAX; 5];
        coo_to_csr(&[1, 1, 3], 4, &mut row_ptr).unwrap();
        assert_eq!(row_ptr, [0, 0, 2, 2, 3]);

        let mut row_ptr = [usize::MAX; 4];
        coo_to_csr(&[0], 3, &mut row_ptr).unwrap();
        assert_eq!(row_ptr, [0, 1, 1, 1]);

        let mut row_ptr = [usize::MAX; 3];
        coo_to_csr(&[], 2, &mut row_ptr).unwrap();
        assert_eq!(row_ptr, [0, 0, 0]);
    }

    #[test]
    fn test_coo_to_csr_rejects_bad_input() {
        let mut row_ptr = [0usize; 3];
        assert_eq!(
            coo_to_csr(&[0, 1], 3, &mut row_ptr),
            Err(HercmError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            coo_to_csr(&[1, 0], 2, &mut row_ptr),
            Err(HercmError::NotRowMajor { position: 1 })
        );
        assert_eq!(
            coo_to_csr(&[0, 2], 2, &mut row_ptr),
            Err(HercmError::IndexOutOfBounds { index: 2, bound: 2 })
        );
    }

    #[test]
    fn test_csr_to_coo_rows() {
        let mut row = [usize::MAX; 4];
        csr_to_coo_rows(&[0, 2, 2, 4], &mut row).unwrap();
        assert_eq!(row, [0, 0, 2, 2]);

        assert_eq!(
            csr_to_coo_rows(&[0, 2, 3], &mut row),
            Err(HercmError::InvalidRowPtr { position: 2 })
        );
    }
}

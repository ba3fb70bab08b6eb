//! Array shape and index validation for HeRCM matrices

use crate::error::{HercmError, Result};

/// Check that a buffer has exactly the expected length
pub const fn validate_length(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(HercmError::LengthMismatch { expected, found });
    }
    Ok(())
}

/// Check that every index is below `bound`
pub fn validate_indices(indices: &[usize], bound: usize) -> Result<()> {
    match indices.iter().find(|&&index| index >= bound) {
        Some(&index) => Err(HercmError::IndexOutOfBounds { index, bound }),
        None => Ok(()),
    }
}

/// Check a CSR row pointer array against the number of stored entries
///
/// The array must start at 0, never decrease, and end at `nnz`.
pub fn validate_row_ptr(row_ptr: &[usize], nnz: usize) -> Result<()> {
    let Some(&last) = row_ptr.last() else {
        return Err(HercmError::LengthMismatch {
            expected: 1,
            found: 0,
        });
    };

    if row_ptr[0] != 0 {
        return Err(HercmError::InvalidRowPtr { position: 0 });
    }

    if let Some(position) = row_ptr.windows(2).position(|pair| pair[0] > pair[1]) {
        return Err(HercmError::InvalidRowPtr {
            position: position + 1,
        });
    }

    if last != nnz {
        return Err(HercmError::InvalidRowPtr {
            position: row_ptr.len() - 1,
        });
    }

    Ok(())
}

/// Position of the first entry smaller than its predecessor
pub fn first_descent(values: &[usize]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| pair[0] > pair[1])
        .map(|position| position + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        assert_eq!(validate_length(3, 3), Ok(()));
        assert_eq!(
            validate_length(3, 4),
            Err(HercmError::LengthMismatch {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn test_validate_indices() {
        assert_eq!(validate_indices(&[0, 2, 1], 3), Ok(()));
        assert_eq!(validate_indices(&[], 0), Ok(()));
        assert_eq!(
            validate_indices(&[0, 3, 5], 3),
            Err(HercmError::IndexOutOfBounds { index: 3, bound: 3 })
        );
    }

    #[test]
    fn test_validate_row_ptr() {
        assert_eq!(validate_row_ptr(&[0, 3, 6, 9], 9), Ok(()));
        assert_eq!(validate_row_ptr(&[0, 0, 0], 0), Ok(()));
        assert_eq!(validate_row_ptr(&[0, 1, 1, 2], 2), Ok(()));

        assert_eq!(
            validate_row_ptr(&[], 0),
            Err(HercmError::LengthMismatch {
                expected: 1,
                found: 0
            })
        );
        assert_eq!(
            validate_row_ptr(&[1, 2], 2),
            Err(HercmError::InvalidRowPtr { position: 0 })
        );
        assert_eq!(
            validate_row_ptr(&[0, 3, 2, 4], 4),
            Err(HercmError::InvalidRowPtr { position: 2 })
        );
        assert_eq!(
            validate_row_ptr(&[0, 1, 2], 3),
            Err(HercmError::InvalidRowPtr { position: 2 })
        );
    }

    #[test]
    fn test_first_descent() {
        assert_eq!(first_descent(&[]), None);
        assert_eq!(first_descent(&[0, 0, 1, 4]), None);
        assert_eq!(first_descent(&[0, 2, 1, 4]), Some(2));
    }
}

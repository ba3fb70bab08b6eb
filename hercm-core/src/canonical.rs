//! Row-major ordering of COO triples

use alloc::vec::Vec;

use crate::error::{HercmError, Result};

/// Whether the triples are sorted by row, then by column within a row
pub fn is_row_major(row: &[usize], col: &[usize]) -> bool {
    let keys = || row.iter().zip(col).map(|(&r, &c)| (r, c));
    keys().zip(keys().skip(1)).all(|(a, b)| a <= b)
}

/// Reorder three parallel arrays into row-major order
///
/// The same permutation is applied to every array. Duplicate coordinates are
/// kept and retain their relative order.
pub fn canonicalize(row: &mut [usize], col: &mut [usize], val: &mut [f32]) -> Result<()> {
    let n = row.len();
    check_len(n, col.len())?;
    check_len(n, val.len())?;

    if is_row_major(row, col) {
        return Ok(());
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (row[i], col[i]));

    apply(&order, row);
    apply(&order, col);
    apply(&order, val);
    Ok(())
}

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(HercmError::LengthMismatch { expected, found });
    }
    Ok(())
}

fn apply<T: Copy>(order: &[usize], data: &mut [T]) {
    let gathered: Vec<T> = order.iter().map(|&i| data[i]).collect();
    data.copy_from_slice(&gathered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn triples(row: &[usize], col: &[usize], val: &[f32]) -> Vec<(usize, usize, u32)> {
        let mut out: Vec<_> = row
            .iter()
            .zip(col)
            .zip(val)
            .map(|((&r, &c), &v)| (r, c, v.to_bits()))
            .collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn test_is_row_major() {
        assert!(is_row_major(&[], &[]));
        assert!(is_row_major(&[0, 0, 1, 2], &[0, 3, 1, 0]));
        assert!(is_row_major(&[1, 1], &[2, 2]));
        assert!(!is_row_major(&[0, 1, 0], &[0, 0, 1]));
        assert!(!is_row_major(&[0, 0], &[2, 1]));
    }

    #[test]
    fn test_canonicalize_orders_rows_then_columns() {
        let mut row = vec![2, 0, 1, 0, 2];
        let mut col = vec![1, 2, 0, 0, 0];
        let mut val = vec![5.0, 2.0, 3.0, 1.0, 4.0];
        canonicalize(&mut row, &mut col, &mut val).unwrap();

        assert_eq!(row, [0, 0, 1, 2, 2]);
        assert_eq!(col, [0, 2, 0, 0, 1]);
        assert_eq!(val, [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let mut row = vec![1, 0, 1];
        let mut col = vec![1, 0, 1];
        let mut val = vec![7.0, 1.0, 8.0];
        canonicalize(&mut row, &mut col, &mut val).unwrap();

        assert_eq!(row, [0, 1, 1]);
        assert_eq!(val, [1.0, 7.0, 8.0]);
    }

    #[test]
    fn test_empty_and_mismatched() {
        canonicalize(&mut [], &mut [], &mut []).unwrap();

        let mut row = [0usize, 1];
        let mut col = [0usize];
        let mut val = [1.0f32, 2.0];
        assert_eq!(
            canonicalize(&mut row, &mut col, &mut val),
            Err(HercmError::LengthMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_random_triples() {
        let mut rng = StdRng::seed_from_u64(0x4845_5243);

        for _ in 0..50 {
            let n = rng.gen_range(0..200);
            let mut row: Vec<usize> = (0..n).map(|_| rng.gen_range(0..20)).collect();
            let mut col: Vec<usize> = (0..n).map(|_| rng.gen_range(0..20)).collect();
            let mut val: Vec<f32> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let before = triples(&row, &col, &val);

            canonicalize(&mut row, &mut col, &mut val).unwrap();
            assert!(is_row_major(&row, &col));
            assert_eq!(triples(&row, &col, &val), before);

            let snapshot = (row.clone(), col.clone(), val.clone());
            canonicalize(&mut row, &mut col, &mut val).unwrap();
            assert_eq!((row, col, val), snapshot);
        }
    }
}

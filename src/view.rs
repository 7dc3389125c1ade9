//! Allocation-free views over [`MatrixMut`] storage.

use crate::traits::{MatrixMut, MatrixRef};

/// Transposed view of a matrix: element `(i, j)` of the view is element
/// `(j, i)` of the underlying storage.
///
/// Lets a driver that rotates *columns* of an accumulator update the *rows*
/// of a matrix kept in the opposite orientation, e.g. building `Vᵀ` in place
/// of `V` for real matrices.
///
/// ```
/// use condensed::{Mat, MatrixRef, Transposed};
///
/// let mut m = Mat::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let t = Transposed(&mut m);
/// assert_eq!(t.nrows(), 3);
/// assert_eq!(*t.get(2, 0), 3.0);
/// ```
#[derive(Debug)]
pub struct Transposed<'a, M: ?Sized>(pub &'a mut M);

impl<T, M: MatrixRef<T> + ?Sized> MatrixRef<T> for Transposed<'_, M> {
    #[inline]
    fn nrows(&self) -> usize {
        self.0.ncols()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.0.nrows()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        self.0.get(col, row)
    }
}

impl<T, M: MatrixMut<T> + ?Sized> MatrixMut<T> for Transposed<'_, M> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        self.0.get_mut(col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{bidiagonal_qr, QrSettings};

    /// Fixed-size row-major storage, standing in for a no-alloc caller.
    struct RowMajor<const N: usize>([[f64; N]; N]);

    impl<const N: usize> MatrixRef<f64> for RowMajor<N> {
        fn nrows(&self) -> usize {
            N
        }

        fn ncols(&self) -> usize {
            N
        }

        fn get(&self, row: usize, col: usize) -> &f64 {
            &self.0[row][col]
        }
    }

    impl<const N: usize> MatrixMut<f64> for RowMajor<N> {
        fn get_mut(&mut self, row: usize, col: usize) -> &mut f64 {
            &mut self.0[row][col]
        }
    }

    #[test]
    fn view_swaps_indices() {
        let mut m = RowMajor([[1.0, 2.0], [3.0, 4.0]]);
        let mut t = Transposed(&mut m);
        assert_eq!(*t.get(0, 1), 3.0);
        *t.get_mut(1, 0) = 5.0;
        assert_eq!(m.0[0][1], 5.0);
    }

    #[test]
    fn accumulate_vt_in_fixed_storage() {
        let mut d = [3.0_f64, 1.0];
        let mut e = [4.0];
        let mut vt = RowMajor([[1.0, 0.0], [0.0, 1.0]]);
        let mut view = Transposed(&mut vt);
        bidiagonal_qr::<f64, RowMajor<2>, _>(
            &mut d,
            &mut e,
            None,
            Some(&mut view),
            &QrSettings::default(),
        )
        .unwrap();

        // Rows of Vᵀ are orthonormal.
        let [r0, r1] = vt.0;
        let dot = r0[0] * r1[0] + r0[1] * r1[1];
        assert!(dot.abs() < 1e-15);
        assert!((r0[0] * r0[0] + r0[1] * r0[1] - 1.0).abs() < 1e-15);
        // B·V has columns of norm σ: B·V = U·Σ, and B = [[3, 4], [0, 1]].
        for (k, &s) in d.iter().enumerate() {
            let (v0, v1) = (vt.0[k][0], vt.0[k][1]);
            let bv = [3.0 * v0 + 4.0 * v1, v1];
            assert!(((bv[0] * bv[0] + bv[1] * bv[1]).sqrt() - s.abs()).abs() < 1e-13);
        }
    }
}

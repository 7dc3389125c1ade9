//! Heap-allocated dense matrix used for accumulators and wrapper outputs.

mod norm;
mod ops;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{LinalgScalar, MatrixMut, MatrixRef, Scalar};

/// Dense column-major matrix with runtime dimensions.
///
/// Column-major `Vec<T>` storage. Implements [`MatrixRef`] and [`MatrixMut`],
/// so it can be handed to the reducers and QR drivers as an accumulator.
///
/// # Examples
///
/// ```
/// use condensed::Mat;
///
/// let a = Mat::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let id = Mat::<f64>::identity(3);
/// assert_eq!(id[(1, 1)], 1.0);
/// assert_eq!(id[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mat<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Scalar> Mat<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// `I_n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Build from entries listed row by row.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use condensed::Mat;
    /// let m = Mat::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Upper bidiagonal `n x n` matrix with `d` on the diagonal and `e` on the
    /// superdiagonal.
    pub fn from_bidiagonal(d: &[T], e: &[T]) -> Self {
        let n = d.len();
        assert_eq!(e.len(), n.saturating_sub(1), "bidiagonal needs len(e) = len(d) - 1");
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = d[i];
            if i + 1 < n {
                m[(i, i + 1)] = e[i];
            }
        }
        m
    }

    /// Symmetric tridiagonal `n x n` matrix with `d` on the diagonal and `e`
    /// on both off-diagonals.
    pub fn from_tridiagonal(d: &[T], e: &[T]) -> Self {
        let n = d.len();
        assert_eq!(e.len(), n.saturating_sub(1), "tridiagonal needs len(e) = len(d) - 1");
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = d[i];
            if i + 1 < n {
                m[(i, i + 1)] = e[i];
                m[(i + 1, i)] = e[i];
            }
        }
        m
    }
}

impl<T> Mat<T> {
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Entry `(i, j)` is `f(i, j)`, evaluated in column-major order.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Column-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar> Mat<T> {
    /// Transpose (no conjugation).
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

impl<T: LinalgScalar> Mat<T> {
    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }

    /// `self * diag(d)`: scales column `j` by the real value `d[j]`.
    ///
    /// Panics if `d.len() != self.ncols()`.
    pub fn mul_diag(&self, d: &[T::Real]) -> Self {
        assert_eq!(d.len(), self.ncols, "diagonal length must match column count");
        Self::from_fn(self.nrows, self.ncols, |i, j| self[(i, j)].scale(d[j]))
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for Mat<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for Mat<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Mat<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.nrows && col < self.ncols);
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for Mat<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.nrows && col < self.ncols);
        &mut self.data[col * self.nrows + row]
    }
}

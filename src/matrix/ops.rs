use alloc::vec;
use core::ops::{Mul, Sub};

use crate::traits::Scalar;

use super::Mat;

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub<&Mat<T>> for &Mat<T> {
    type Output = Mat<T>;

    fn sub(self, rhs: &Mat<T>) -> Mat<T> {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows,
            self.ncols,
            rhs.nrows,
            rhs.ncols,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        Mat {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T: Scalar> Sub for Mat<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> Mul<&Mat<T>> for &Mat<T> {
    type Output = Mat<T>;

    fn mul(self, rhs: &Mat<T>) -> Mat<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        // Column-major: accumulate column j of the product as a combination
        // of the columns of `self`.
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                if b_kj == T::zero() {
                    continue;
                }
                for i in 0..m {
                    data[j * m + i] = data[j * m + i] + self.data[k * m + i] * b_kj;
                }
            }
        }
        Mat {
            data,
            nrows: m,
            ncols: p,
        }
    }
}

impl<T: Scalar> Mul for Mat<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&Mat<T>> for Mat<T> {
    type Output = Mat<T>;

    fn mul(self, rhs: &Mat<T>) -> Mat<T> {
        &self * rhs
    }
}

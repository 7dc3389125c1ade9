use num_traits::{Float, Zero};

use crate::traits::LinalgScalar;

use super::Mat;

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: LinalgScalar> Mat<T> {
    /// Frobenius norm, scaled by the largest modulus so it neither overflows
    /// nor underflows for extreme entries.
    ///
    /// ```
    /// use condensed::Mat;
    /// let m = Mat::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
    /// assert!((m.norm_fro() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm_fro(&self) -> T::Real {
        let zero = <T::Real as Zero>::zero();
        let scale = self.norm_max();
        if scale == zero || !scale.is_finite() {
            return scale;
        }
        let mut sum = zero;
        for &x in &self.data {
            let r = x.modulus() / scale;
            sum = sum + r * r;
        }
        scale * sum.sqrt()
    }

    /// Largest entry modulus.
    pub fn norm_max(&self) -> T::Real {
        self.data
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, x| acc.max(x.modulus()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_fro_extreme_scale() {
        let big = Mat::from_rows(1, 2, &[3.0e300_f64, 4.0e300]);
        assert!((big.norm_fro() / 5.0e300 - 1.0).abs() < 1e-14);

        let small = Mat::from_rows(1, 2, &[3.0e-300_f64, 4.0e-300]);
        assert!((small.norm_fro() / 5.0e-300 - 1.0).abs() < 1e-14);
    }

    #[test]
    fn norm_of_zero_matrix() {
        assert_eq!(Mat::<f64>::zeros(3, 2).norm_fro(), 0.0);
    }
}

use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Element type of a [`MatrixRef`] accumulator or a `Mat<T>`.
///
/// Any `Copy` numeric type with `Zero`/`One` qualifies via the blanket impl.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point elements.
///
/// The diagonal and off-diagonal of a condensed form, shifts and rotation
/// cosines all live in a `FloatScalar`.
/// Every `FloatScalar` is its own `Real` type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Trait for matrix elements that support the decompositions.
///
/// Implemented for `f32`, `f64` and, with the `complex` feature, for
/// `Complex<f32>` / `Complex<f64>`.
pub trait LinalgScalar: Scalar {
    /// Type of the condensed-form entries: `Self` for reals, `T` for `Complex<T>`.
    type Real: FloatScalar;

    /// `|z|`.
    fn modulus(self) -> Self::Real;

    /// `conj(z)`; a no-op on reals.
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Multiply by a real factor.
    fn scale(self, r: Self::Real) -> Self;

    /// Divide by a real factor, component-wise for complex values.
    ///
    /// Unlike `self / from_real(r)` this never squares `r`, so it is safe for
    /// tiny or huge divisors.
    fn unscale(self, r: Self::Real) -> Self;

    /// Embed a real value.
    fn from_real(r: Self::Real) -> Self;

    /// Unit-modulus phase `z / |z|`, with `phase(0) = 1`.
    #[inline]
    fn phase(self) -> Self {
        let m = self.modulus();
        if m == <Self::Real as Zero>::zero() {
            Self::one()
        } else {
            self.unscale(m)
        }
    }
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn scale(self, r: $t) -> $t { self * r }
                #[inline] fn unscale(self, r: $t) -> $t { self / r }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn scale(self, r: T) -> Self {
        Complex::scale(&self, r)
    }

    #[inline]
    fn unscale(self, r: T) -> Self {
        Complex::unscale(&self, r)
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}

/// Storage-agnostic read access to a 2-D array.
///
/// The kernel never assumes a storage layout: row-major, column-major and
/// strided containers all work through `get`.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Storage-agnostic write access: what a rotation accumulator needs.
///
/// Extends `MatrixRef` with mutable element access, which is all the
/// accumulators of the QR drivers need.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Exchange columns `a` and `b`.
    fn swap_cols(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for row in 0..self.nrows() {
            let tmp = *self.get(row, a);
            *self.get_mut(row, a) = *self.get(row, b);
            *self.get_mut(row, b) = tmp;
        }
    }

    /// Multiply column `col` by `factor`.
    fn scale_col(&mut self, col: usize, factor: T)
    where
        T: Copy + core::ops::Mul<Output = T>,
    {
        for row in 0..self.nrows() {
            let val = *self.get(row, col);
            *self.get_mut(row, col) = val * factor;
        }
    }
}

impl<T, M: MatrixRef<T> + ?Sized> MatrixRef<T> for &M {
    #[inline]
    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        (**self).ncols()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        (**self).get(row, col)
    }
}

impl<T, M: MatrixRef<T> + ?Sized> MatrixRef<T> for &mut M {
    #[inline]
    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        (**self).ncols()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        (**self).get(row, col)
    }
}

impl<T, M: MatrixMut<T> + ?Sized> MatrixMut<T> for &mut M {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        (**self).get_mut(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_phase_is_sign() {
        assert_eq!((-3.0_f64).phase(), -1.0);
        assert_eq!(2.5_f64.phase(), 1.0);
        assert_eq!(0.0_f64.phase(), 1.0);
    }

    #[test]
    fn unscale_tiny_divisor() {
        let tiny = f64::MIN_POSITIVE / 4.0;
        assert_eq!(tiny.unscale(tiny), 1.0);
    }
}

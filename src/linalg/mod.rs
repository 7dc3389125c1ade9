//! Implicit-shift QR kernels for condensed forms, and the decompositions
//! built on them.
//!
//! The kernel layers, bottom-up:
//!
//! - [`PlaneRotation`]: Givens rotations with a real, non-negative cosine.
//! - [`chop_small`] / [`find_active_block`]: deflation of negligible entries
//!   and location of the trailing unreduced block.
//! - [`wilkinson_shift`]: shift selection from the trailing 2×2.
//! - [`bidiagonal_sweep`] / [`tridiagonal_sweep`]: one bulge chase, plus the
//!   closed-form 2×2 steps and the zero-diagonal chases.
//! - [`bidiagonal_qr`] / [`tridiagonal_qr`]: the drivers.
//!
//! All of these work on plain `&mut [R]` slices and any [`MatrixMut`]
//! accumulator, without allocating. With the `alloc` feature the Householder
//! reducers and the [`Svd`] / [`SymmetricEigen`] wrappers are available too.
//!
//! [`MatrixMut`]: crate::MatrixMut

pub(crate) mod deflate;
pub(crate) mod driver;
pub(crate) mod exact;
#[cfg(feature = "alloc")]
pub(crate) mod householder;
#[cfg(feature = "alloc")]
pub(crate) mod reduce;
pub(crate) mod rotation;
pub(crate) mod shift;
pub(crate) mod sort;
#[cfg(feature = "alloc")]
pub(crate) mod svd;
pub(crate) mod sweep;
#[cfg(feature = "alloc")]
pub(crate) mod symmetric_eigen;

pub use deflate::{chop_small, condensed_norm, find_active_block};
pub use driver::{bidiagonal_qr, tridiagonal_qr, QrSettings, QrStats};
pub use exact::{bidiagonal_2x2, symmetric_2x2, BidiagonalSvd2, SymmetricSchur2};
#[cfg(feature = "alloc")]
pub use reduce::{bidiagonalize, tridiagonalize};
pub use rotation::PlaneRotation;
pub use shift::{bidiagonal_shift, tridiagonal_shift, wilkinson_shift};
pub use sort::{sort_eigenvalues, sort_singular_values};
#[cfg(feature = "alloc")]
pub use svd::Svd;
pub use sweep::{
    bidiagonal_exact_step, bidiagonal_sweep, chase_zero_diagonal_col, chase_zero_diagonal_row,
    tridiagonal_exact_step, tridiagonal_sweep,
};
#[cfg(feature = "alloc")]
pub use symmetric_eigen::SymmetricEigen;

/// Errors from the QR drivers and the decompositions built on them.
///
/// Shape and length mismatches are programming errors and panic instead.
///
/// ```
/// use condensed::linalg::{tridiagonal_qr, LinalgError, QrSettings};
/// use condensed::Mat;
///
/// let mut d = [1.0_f64, f64::NAN, 2.0];
/// let mut e = [1.0, 1.0];
/// let err = tridiagonal_qr::<f64, Mat<f64>>(&mut d, &mut e, None, &QrSettings::default());
/// assert_eq!(err.unwrap_err(), LinalgError::ConvergenceFailure);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

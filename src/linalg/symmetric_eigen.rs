use alloc::vec;
use alloc::vec::Vec;

use num_traits::Zero;

use crate::linalg::driver::{tridiagonal_qr, QrSettings};
use crate::linalg::reduce::tridiagonalize;
use crate::linalg::sort::sort_eigenvalues;
use crate::linalg::LinalgError;
use crate::traits::LinalgScalar;
use crate::Mat;

/// Eigendecomposition of a symmetric (Hermitian) matrix.
///
/// Computes real eigenvalues `λ` and unitary eigenvectors `Q` such that
/// `A = Q · diag(λ) · Qᴴ`. Eigenvalues are sorted by descending absolute
/// value, and the columns of `Q` are the matching eigenvectors.
///
/// Only the Hermitian part of the input is used.
///
/// # Example
///
/// ```
/// use condensed::Mat;
/// use condensed::linalg::SymmetricEigen;
///
/// let a = Mat::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 2.0]);
/// let eig = SymmetricEigen::new(&a).unwrap();
/// assert!((eig.eigenvalues()[0] - 3.0).abs() < 1e-14);
/// assert!((eig.eigenvalues()[1] - 1.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T: LinalgScalar> {
    eigenvalues: Vec<T::Real>,
    eigenvectors: Mat<T>,
}

fn hermitian_eig<T: LinalgScalar>(
    a: &Mat<T>,
    mut q: Option<&mut Mat<T>>,
    settings: &QrSettings<T::Real>,
) -> Result<Vec<T::Real>, LinalgError> {
    assert!(a.is_square(), "symmetric eigendecomposition requires a square matrix");
    let n = a.nrows();
    let mut work = a.clone();
    let mut d = vec![<T::Real as Zero>::zero(); n];
    let mut e = vec![<T::Real as Zero>::zero(); n.saturating_sub(1)];

    tridiagonalize::<T, _, _>(&mut work, &mut d, &mut e, q.as_deref_mut());
    tridiagonal_qr::<T, _>(&mut d, &mut e, q.as_deref_mut(), settings)?;
    sort_eigenvalues::<T, _>(&mut d, q);
    Ok(d)
}

impl<T: LinalgScalar> SymmetricEigen<T> {
    /// Decompose with default [`QrSettings`].
    ///
    /// # Panics
    ///
    /// If `a` is not square.
    pub fn new(a: &Mat<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &QrSettings::default())
    }

    /// Decompose with explicit QR settings.
    pub fn with_settings(a: &Mat<T>, settings: &QrSettings<T::Real>) -> Result<Self, LinalgError> {
        let mut q = Mat::zeros(a.nrows(), a.nrows());
        let eigenvalues = hermitian_eig(a, Some(&mut q), settings)?;
        Ok(Self {
            eigenvalues,
            eigenvectors: q,
        })
    }

    /// Eigenvalues only, skipping eigenvector accumulation.
    pub fn eigenvalues_only(a: &Mat<T>) -> Result<Vec<T::Real>, LinalgError> {
        hermitian_eig(a, None, &QrSettings::default())
    }

    /// Eigenvalues, sorted by descending absolute value.
    #[inline]
    pub fn eigenvalues(&self) -> &[T::Real] {
        &self.eigenvalues
    }

    /// Eigenvectors as columns, in the order of [`eigenvalues`](Self::eigenvalues).
    #[inline]
    pub fn eigenvectors(&self) -> &Mat<T> {
        &self.eigenvectors
    }
}

impl<T: LinalgScalar> Mat<T> {
    /// Symmetric (Hermitian) eigendecomposition.
    ///
    /// ```
    /// use condensed::Mat;
    ///
    /// let a = Mat::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
    /// let eig = a.eig_symmetric().unwrap();
    /// assert!((eig.eigenvalues()[0] - 1.0).abs() < 1e-14);
    /// assert!((eig.eigenvalues()[1] + 1.0).abs() < 1e-14);
    /// ```
    pub fn eig_symmetric(&self) -> Result<SymmetricEigen<T>, LinalgError> {
        SymmetricEigen::new(self)
    }

    /// Eigenvalues of a symmetric (Hermitian) matrix, by descending
    /// absolute value.
    pub fn eigenvalues_symmetric(&self) -> Result<Vec<T::Real>, LinalgError> {
        SymmetricEigen::eigenvalues_only(self)
    }
}

use alloc::vec;
use alloc::vec::Vec;

use num_traits::{Float, One, Zero};

use crate::linalg::driver::{bidiagonal_qr, QrSettings};
use crate::linalg::reduce::bidiagonalize;
use crate::linalg::sort::sort_singular_values;
use crate::linalg::LinalgError;
use crate::traits::LinalgScalar;
use crate::Mat;

/// Singular value decomposition of a dense matrix of any shape.
///
/// Computes unitary `U` (M×M), singular values `σ` (length `min(M, N)`,
/// non-negative, sorted descending), and unitary `Vᴴ` (N×N) such that
/// `A = U · Σ · Vᴴ`.
///
/// The matrix is first reduced to a real bidiagonal form by Householder
/// reflections, which implicit-shift QR iteration then diagonalizes. Wide
/// matrices are decomposed through their adjoint.
///
/// # Example
///
/// ```
/// use condensed::Mat;
/// use condensed::linalg::Svd;
///
/// let a = Mat::from_rows(2, 3, &[3.0_f64, 2.0, 2.0, 2.0, 3.0, -2.0]);
/// let svd = Svd::new(&a).unwrap();
/// let s = svd.singular_values();
/// assert!((s[0] - 5.0).abs() < 1e-12);
/// assert!((s[1] - 3.0).abs() < 1e-12);
/// assert_eq!(svd.u().nrows(), 2);
/// assert_eq!(svd.vt().nrows(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Svd<T: LinalgScalar> {
    u: Mat<T>,
    singular_values: Vec<T::Real>,
    vt: Mat<T>,
}

/// Bidiagonalize and diagonalize a tall matrix, returning sorted `σ`.
fn tall_svd<T: LinalgScalar>(
    a: &Mat<T>,
    mut u: Option<&mut Mat<T>>,
    mut v: Option<&mut Mat<T>>,
    settings: &QrSettings<T::Real>,
) -> Result<Vec<T::Real>, LinalgError> {
    let n = a.ncols();
    let mut work = a.clone();
    let mut d = vec![<T::Real as Zero>::zero(); n];
    let mut e = vec![<T::Real as Zero>::zero(); n.saturating_sub(1)];

    bidiagonalize::<T, _, _, _>(&mut work, &mut d, &mut e, u.as_deref_mut(), v.as_deref_mut());
    bidiagonal_qr::<T, _, _>(&mut d, &mut e, u.as_deref_mut(), v.as_deref_mut(), settings)?;
    sort_singular_values::<T, _, _>(&mut d, u, v);
    Ok(d)
}

impl<T: LinalgScalar> Svd<T> {
    /// Compute the SVD with default [`QrSettings`].
    ///
    /// Returns `Err(ConvergenceFailure)` if the bidiagonal QR iteration
    /// exhausts its sweep budget (non-finite input).
    pub fn new(a: &Mat<T>) -> Result<Self, LinalgError> {
        Self::with_settings(a, &QrSettings::default())
    }

    /// Compute the SVD with explicit QR settings.
    pub fn with_settings(a: &Mat<T>, settings: &QrSettings<T::Real>) -> Result<Self, LinalgError> {
        let (m, n) = (a.nrows(), a.ncols());
        if m >= n {
            let mut u = Mat::zeros(m, m);
            let mut v = Mat::zeros(n, n);
            let singular_values = tall_svd(a, Some(&mut u), Some(&mut v), settings)?;
            Ok(Self {
                u,
                singular_values,
                vt: v.adjoint(),
            })
        } else {
            // Aᴴ = U' Σ V'ᴴ  ⇒  A = V' Σ U'ᴴ
            let mut u = Mat::zeros(n, n);
            let mut v = Mat::zeros(m, m);
            let singular_values = tall_svd(&a.adjoint(), Some(&mut u), Some(&mut v), settings)?;
            Ok(Self {
                u: v,
                singular_values,
                vt: u.adjoint(),
            })
        }
    }

    /// Compute only the singular values (no U/V accumulation).
    pub fn singular_values_only(a: &Mat<T>) -> Result<Vec<T::Real>, LinalgError> {
        let settings = QrSettings::default();
        if a.nrows() >= a.ncols() {
            tall_svd(a, None, None, &settings)
        } else {
            tall_svd(&a.adjoint(), None, None, &settings)
        }
    }

    /// The singular values, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[T::Real] {
        &self.singular_values
    }

    /// The left singular vectors `U` (M×M).
    #[inline]
    pub fn u(&self) -> &Mat<T> {
        &self.u
    }

    /// The right singular vectors as the rows of `Vᴴ` (N×N).
    #[inline]
    pub fn vt(&self) -> &Mat<T> {
        &self.vt
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: T::Real) -> usize {
        self.singular_values.iter().filter(|&&s| s > tol).count()
    }

    /// Condition number `σ_max / σ_min`.
    ///
    /// Returns infinity if the smallest singular value is zero.
    pub fn condition_number(&self) -> T::Real {
        let (first, last) = match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return <T::Real as One>::one(),
        };
        if last == <T::Real as Zero>::zero() {
            <T::Real as Float>::infinity()
        } else {
            first / last
        }
    }
}

impl<T: LinalgScalar> Mat<T> {
    /// Singular value decomposition.
    ///
    /// ```
    /// use condensed::Mat;
    ///
    /// let a = Mat::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 2.0, 0.0, 0.0]);
    /// let svd = a.svd().unwrap();
    /// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-14);
    /// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-14);
    /// ```
    pub fn svd(&self) -> Result<Svd<T>, LinalgError> {
        Svd::new(self)
    }

    /// Singular values only, sorted descending.
    ///
    /// ```
    /// use condensed::Mat;
    ///
    /// let a = Mat::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
    /// let s = a.singular_values().unwrap();
    /// assert!((s[0] - 4.0).abs() < 1e-14);
    /// assert!((s[1] - 3.0).abs() < 1e-14);
    /// ```
    pub fn singular_values(&self) -> Result<Vec<T::Real>, LinalgError> {
        Svd::singular_values_only(self)
    }
}

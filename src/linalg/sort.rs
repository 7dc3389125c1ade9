use num_traits::{Float, Zero};

use crate::traits::{LinalgScalar, MatrixMut};

/// Make the diagonal of a converged bidiagonal QR non-negative and sort it
/// in descending order.
///
/// A negative entry is flipped together with its column of `U`, and every
/// exchange of two entries exchanges the matching columns of `U` and `V`,
/// so `U · diag(s) · Vᴴ` is unchanged.
///
/// ```
/// use condensed::linalg::sort_singular_values;
/// use condensed::Mat;
///
/// let mut s = [1.0_f64, -3.0, 2.0];
/// let mut u = Mat::<f64>::identity(3);
/// sort_singular_values::<f64, _, Mat<f64>>(&mut s, Some(&mut u), None);
/// assert_eq!(s, [3.0, 2.0, 1.0]);
/// assert_eq!(u[(1, 0)], -1.0);
/// ```
pub fn sort_singular_values<T, U, V>(s: &mut [T::Real], mut u: Option<&mut U>, mut v: Option<&mut V>)
where
    T: LinalgScalar,
    U: MatrixMut<T> + ?Sized,
    V: MatrixMut<T> + ?Sized,
{
    let zero = <T::Real as Zero>::zero();
    for (i, x) in s.iter_mut().enumerate() {
        if *x < zero {
            *x = -*x;
            if let Some(u) = u.as_deref_mut() {
                u.scale_col(i, T::zero() - T::one());
            }
        }
    }

    // Selection sort: at most n - 1 column exchanges.
    for i in 0..s.len() {
        let mut best = i;
        for j in (i + 1)..s.len() {
            if s[j] > s[best] {
                best = j;
            }
        }
        if best != i {
            s.swap(i, best);
            if let Some(u) = u.as_deref_mut() {
                u.swap_cols(i, best);
            }
            if let Some(v) = v.as_deref_mut() {
                v.swap_cols(i, best);
            }
        }
    }
}

/// Sort eigenvalues by descending magnitude, positive before negative on
/// ties, exchanging the matching columns of `Q`.
pub fn sort_eigenvalues<T, Q>(l: &mut [T::Real], mut q: Option<&mut Q>)
where
    T: LinalgScalar,
    Q: MatrixMut<T> + ?Sized,
{
    let before = |a: T::Real, b: T::Real| a.abs() > b.abs() || (a.abs() == b.abs() && a > b);
    for i in 0..l.len() {
        let mut best = i;
        for j in (i + 1)..l.len() {
            if before(l[j], l[best]) {
                best = j;
            }
        }
        if best != i {
            l.swap(i, best);
            if let Some(q) = q.as_deref_mut() {
                q.swap_cols(i, best);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mat;

    #[test]
    fn singular_values_keep_product() {
        let mut s = [0.5_f64, -4.0, 2.0, 0.0];
        let mut u = Mat::from_fn(4, 4, |i, j| (i * 4 + j) as f64);
        let mut v = Mat::from_fn(4, 4, |i, j| (j * 4 + i) as f64 - 3.0);
        let before = &u.mul_diag(&s) * &v.transpose();

        sort_singular_values::<f64, _, _>(&mut s, Some(&mut u), Some(&mut v));
        assert_eq!(s, [4.0, 2.0, 0.5, 0.0]);
        let after = &u.mul_diag(&s) * &v.transpose();
        assert_eq!(after, before);
    }

    #[test]
    fn eigenvalues_by_magnitude() {
        let mut l = [1.0_f64, -5.0, 3.0, 5.0, -0.5];
        let mut q = Mat::from_fn(2, 5, |_, j| j as f64);
        sort_eigenvalues::<f64, _>(&mut l, Some(&mut q));
        assert_eq!(l, [5.0, -5.0, 3.0, 1.0, -0.5]);
        assert_eq!(q[(0, 0)], 3.0);
        assert_eq!(q[(1, 1)], 1.0);
        assert_eq!(q[(0, 4)], 4.0);
    }
}

//! Householder reduction of dense matrices to real condensed form.

use alloc::vec::Vec;

use num_traits::{One, Zero};

use crate::linalg::householder::{make_reflector, reflect_cols, reflect_rows};
use crate::traits::{LinalgScalar, MatrixMut};

fn set_identity<T: LinalgScalar, M: MatrixMut<T> + ?Sized>(m: &mut M) {
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            *m.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }
}

/// Householder bidiagonalization of an M×N matrix, M ≥ N.
///
/// Computes `A = U · B · Vᴴ` with `B = bidiag(d, e)` upper bidiagonal and
/// **real**: for complex input the phases of the reduced entries are moved
/// into the columns of `U` and `V`, so `d ≥ 0` and `e ≥ 0`.
///
/// `a` is overwritten with scratch data. `U` must be M×M and `V` N×N; each
/// is optional and is set to the identity before accumulation.
///
/// # Panics
///
/// If M < N, `d.len() != N`, `e.len() != N - 1` (for N > 0), or an
/// accumulator has the wrong shape.
///
/// # Example
///
/// ```
/// use condensed::linalg::bidiagonalize;
/// use condensed::Mat;
///
/// let mut a = Mat::from_rows(3, 2, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let mut d = [0.0; 2];
/// let mut e = [0.0; 1];
/// bidiagonalize::<f64, Mat<f64>, Mat<f64>, Mat<f64>>(&mut a, &mut d, &mut e, None, None);
/// // ‖A‖²_F = ‖B‖²_F = 91
/// assert!((d[0] * d[0] + d[1] * d[1] + e[0] * e[0] - 91.0).abs() < 1e-12);
/// ```
pub fn bidiagonalize<T, A, U, V>(
    a: &mut A,
    d: &mut [T::Real],
    e: &mut [T::Real],
    mut u: Option<&mut U>,
    mut v: Option<&mut V>,
) where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
    U: MatrixMut<T> + ?Sized,
    V: MatrixMut<T> + ?Sized,
{
    let m = a.nrows();
    let n = a.ncols();
    assert!(m >= n, "bidiagonalize requires M >= N, got {}x{}", m, n);
    assert_eq!(d.len(), n, "d must have N entries");
    assert_eq!(e.len(), n.saturating_sub(1), "e must have N - 1 entries");
    if let Some(u) = u.as_deref_mut() {
        assert!(u.nrows() == m && u.ncols() == m, "U must be {}x{}", m, m);
        set_identity(u);
    }
    if let Some(v) = v.as_deref_mut() {
        assert!(v.nrows() == n && v.ncols() == n, "V must be {}x{}", n, n);
        set_identity(v);
    }

    let mut dc: Vec<T> = Vec::with_capacity(n);
    let mut ec: Vec<T> = Vec::with_capacity(n.saturating_sub(1));
    let mut x: Vec<T> = Vec::with_capacity(m);

    for k in 0..n {
        // Left reflector: zero a[k+1.., k].
        x.clear();
        x.extend((k..m).map(|i| *a.get(i, k)));
        let (tau, beta) = make_reflector(&mut x);
        dc.push(beta);
        reflect_rows(a, &x[1..], tau, k, (k + 1)..n);
        if let Some(u) = u.as_deref_mut() {
            reflect_cols(u, &x[1..], tau, k, 0..m);
        }

        if k + 1 < n {
            // Right reflector: zero a[k, k+2..]. Built from the conjugated
            // row so that row · H = conj(β) e₀ᵀ.
            x.clear();
            x.extend(((k + 1)..n).map(|j| a.get(k, j).conj()));
            let (tau, beta) = make_reflector(&mut x);
            ec.push(beta.conj());
            reflect_cols(a, &x[1..], tau, k + 1, (k + 1)..m);
            if let Some(v) = v.as_deref_mut() {
                reflect_cols(v, &x[1..], tau, k + 1, 0..n);
            }
        }
    }

    // B = diag(α) · B_real · diag(β)ᴴ with β₀ = 1.
    let mut beta = T::one();
    for k in 0..n {
        let z = dc[k] * beta;
        let alpha = z.phase();
        d[k] = z.modulus();
        if let Some(u) = u.as_deref_mut() {
            u.scale_col(k, alpha);
        }
        if k + 1 < n {
            let w = alpha.conj() * ec[k];
            beta = w.phase().conj();
            e[k] = w.modulus();
            if let Some(v) = v.as_deref_mut() {
                v.scale_col(k + 1, beta);
            }
        }
    }
}

/// Householder tridiagonalization of a Hermitian N×N matrix.
///
/// Computes `A = Q · T · Qᴴ` with `T = tridiag(e, d, e)` symmetric and
/// **real**; complex phases of the subdiagonal are moved into `Q`, so
/// `e ≥ 0`. Only the Hermitian part of `a` matters. `a` is overwritten with
/// scratch data. `Q` (N×N) is optional and set to the identity first.
///
/// # Panics
///
/// If `a` is not square, `d.len() != N`, `e.len() != N - 1` (for N > 0),
/// or `Q` has the wrong shape.
pub fn tridiagonalize<T, A, Q>(a: &mut A, d: &mut [T::Real], e: &mut [T::Real], mut q: Option<&mut Q>)
where
    T: LinalgScalar,
    A: MatrixMut<T> + ?Sized,
    Q: MatrixMut<T> + ?Sized,
{
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "tridiagonalize requires a square matrix");
    assert_eq!(d.len(), n, "d must have N entries");
    assert_eq!(e.len(), n.saturating_sub(1), "e must have N - 1 entries");
    if let Some(q) = q.as_deref_mut() {
        assert!(q.nrows() == n && q.ncols() == n, "Q must be {}x{}", n, n);
        set_identity(q);
    }

    let half = <T::Real as One>::one() / (<T::Real as One>::one() + <T::Real as One>::one());
    let mut zc: Vec<T> = Vec::with_capacity(n.saturating_sub(1));
    let mut x: Vec<T> = Vec::with_capacity(n);
    let mut p: Vec<T> = Vec::with_capacity(n);

    for k in 0..n.saturating_sub(1) {
        x.clear();
        x.extend(((k + 1)..n).map(|i| *a.get(i, k)));
        let (tau, beta) = make_reflector(&mut x);
        zc.push(beta);
        if tau == <T::Real as Zero>::zero() {
            continue;
        }
        let sub = n - k - 1;
        let vi = |i: usize| if i == 0 { T::one() } else { x[i] };

        // p = τ A v on the trailing block
        p.clear();
        for i in 0..sub {
            let mut s = T::zero();
            for j in 0..sub {
                s = s + *a.get(k + 1 + i, k + 1 + j) * vi(j);
            }
            p.push(s.scale(tau));
        }

        // w = p - (τ vᴴp / 2) v, then A ← A - v wᴴ - w vᴴ
        let mut vhp = T::zero();
        for i in 0..sub {
            vhp = vhp + vi(i).conj() * p[i];
        }
        let kk = vhp.scale(tau * half);
        for i in 0..sub {
            p[i] = p[i] - kk * vi(i);
        }
        for j in 0..sub {
            for i in 0..sub {
                let (r, c) = (k + 1 + i, k + 1 + j);
                *a.get_mut(r, c) = *a.get(r, c) - vi(i) * p[j].conj() - p[i] * vi(j).conj();
            }
        }

        if let Some(q) = q.as_deref_mut() {
            reflect_cols(q, &x[1..], tau, k + 1, 0..n);
        }
    }

    for k in 0..n {
        d[k] = a.get(k, k).re();
    }

    // T = D · T_real · Dᴴ with D = diag(δ), δ₀ = 1.
    let mut delta = T::one();
    for k in 0..n.saturating_sub(1) {
        let z = zc[k] * delta;
        delta = z.phase();
        e[k] = z.modulus();
        if let Some(q) = q.as_deref_mut() {
            q.scale_col(k + 1, delta);
        }
    }
}

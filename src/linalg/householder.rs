use core::ops::Range;

use num_traits::{Float, One, Zero};

use crate::traits::{LinalgScalar, MatrixMut};

/// Euclidean norm, scaled by the largest modulus so it neither overflows
/// nor underflows.
pub(crate) fn norm2<T: LinalgScalar>(x: &[T]) -> T::Real {
    let zero = <T::Real as Zero>::zero();
    let scale = x.iter().fold(zero, |acc, v| acc.max(v.modulus()));
    if scale == zero || !scale.is_finite() {
        return scale;
    }
    let mut sum = zero;
    for &v in x {
        let r = v.modulus() / scale;
        sum = sum + r * r;
    }
    scale * sum.sqrt()
}

/// Build a Hermitian Householder reflector `H = I - τ v vᴴ` with `v[0] = 1`
/// such that `H · x = β e₀`.
///
/// On return `x[1..]` holds the tail of `v`; `x[0]` is left unchanged.
/// Returns `(τ, β)`. `β` carries the negated phase of `x[0]`, which avoids
/// cancellation in `v[0] = x[0] - β`. When the tail is already zero,
/// `H = I` (`τ = 0`) and `β = x[0]`.
pub(crate) fn make_reflector<T: LinalgScalar>(x: &mut [T]) -> (T::Real, T) {
    debug_assert!(!x.is_empty());
    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();

    let x0 = x[0];
    let tail_norm = norm2(&x[1..]);
    if tail_norm == zero {
        return (zero, x0);
    }

    let a0 = x0.modulus();
    let norm = a0.hypot(tail_norm);
    let sigma = x0.phase().scale(norm);
    let v0 = x0 + sigma;
    for xi in &mut x[1..] {
        *xi = *xi / v0;
    }

    // vᴴv = 1 + ‖tail‖² / |v0|², and |v0| = |x0| + ‖x‖.
    let ratio = tail_norm / (a0 + norm);
    let tau = (one + one) / (one + ratio * ratio);
    (tau, T::zero() - sigma)
}

/// `M ← H · M` on rows `first_row..first_row + 1 + tail.len()` and columns
/// `cols`, where `H = I - τ v vᴴ` with `v = [1, tail...]`.
pub(crate) fn reflect_rows<T, M>(
    m: &mut M,
    tail: &[T],
    tau: T::Real,
    first_row: usize,
    cols: Range<usize>,
) where
    T: LinalgScalar,
    M: MatrixMut<T> + ?Sized,
{
    if tau == <T::Real as Zero>::zero() {
        return;
    }
    for j in cols {
        let mut w = *m.get(first_row, j);
        for (i, &vi) in tail.iter().enumerate() {
            w = w + vi.conj() * *m.get(first_row + 1 + i, j);
        }
        let w = w.scale(tau);

        *m.get_mut(first_row, j) = *m.get(first_row, j) - w;
        for (i, &vi) in tail.iter().enumerate() {
            let r = first_row + 1 + i;
            *m.get_mut(r, j) = *m.get(r, j) - w * vi;
        }
    }
}

/// `M ← M · H` on columns `first_col..first_col + 1 + tail.len()` and rows
/// `rows`.
pub(crate) fn reflect_cols<T, M>(
    m: &mut M,
    tail: &[T],
    tau: T::Real,
    first_col: usize,
    rows: Range<usize>,
) where
    T: LinalgScalar,
    M: MatrixMut<T> + ?Sized,
{
    if tau == <T::Real as Zero>::zero() {
        return;
    }
    for r in rows {
        let mut w = *m.get(r, first_col);
        for (j, &vj) in tail.iter().enumerate() {
            w = w + *m.get(r, first_col + 1 + j) * vj;
        }
        let w = w.scale(tau);

        *m.get_mut(r, first_col) = *m.get(r, first_col) - w;
        for (j, &vj) in tail.iter().enumerate() {
            let c = first_col + 1 + j;
            *m.get_mut(r, c) = *m.get(r, c) - w * vj.conj();
        }
    }
}

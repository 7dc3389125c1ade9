use core::ops::Range;

use crate::traits::FloatScalar;

/// Norm estimate `sqrt(Σ dᵢ² + 2 Σ eᵢ²)` of a condensed form.
///
/// This is the Frobenius norm of the symmetric tridiagonal matrix with this
/// diagonal and off-diagonal, and an upper bound for the bidiagonal one.
/// Entries are scaled by the largest magnitude before squaring.
pub fn condensed_norm<R: FloatScalar>(d: &[R], e: &[R]) -> R {
    let scale = d.iter().chain(e.iter()).fold(R::zero(), |acc, x| acc.max(x.abs()));
    if scale == R::zero() || !scale.is_finite() {
        return scale;
    }
    let two = R::one() + R::one();
    let mut sum = R::zero();
    for &x in d {
        let r = x / scale;
        sum = sum + r * r;
    }
    for &x in e {
        let r = x / scale;
        sum = sum + two * r * r;
    }
    scale * sum.sqrt()
}

/// Set negligible entries of a condensed form to exactly zero.
///
/// With `τ = eps · sqrt(Σ dᵢ² + 2 Σ eᵢ²)`:
/// - `dᵢ = 0` when `|dᵢ| < τ`,
/// - `eᵢ = 0` when `|eᵢ| < τ`, when `|eᵢ| < eps · (|dᵢ| + |dᵢ₊₁|)`, or when
///   `eᵢ` is subnormal.
///
/// The absolute floor on `eᵢ` matches the one on `dᵢ`: a run of chopped
/// diagonal entries joined by couplings below `τ` has to split, otherwise
/// the relative test is vacuous there and the block never deflates.
///
/// All diagonal entries are chopped before any off-diagonal one, so the
/// off-diagonal test sees the final diagonal and a second call is a no-op.
/// Returns the number of entries that were set to zero.
pub fn chop_small<R: FloatScalar>(d: &mut [R], e: &mut [R], eps: R) -> usize {
    assert_eq!(
        e.len(),
        d.len().saturating_sub(1),
        "condensed form needs len(e) = len(d) - 1"
    );
    let zero = R::zero();
    let tau = eps * condensed_norm(d, e);
    let mut chopped = 0;

    for x in d.iter_mut() {
        if *x != zero && x.abs() < tau {
            *x = zero;
            chopped += 1;
        }
    }

    for i in 0..e.len() {
        let ei = e[i].abs();
        let negligible = ei < tau
            || ei < eps * (d[i].abs() + d[i + 1].abs())
            || ei < R::min_positive_value();
        if e[i] != zero && negligible {
            e[i] = zero;
            chopped += 1;
        }
    }

    chopped
}

/// Locate the last unreduced block among the first `end` diagonal entries.
///
/// Returns the half-open range `p..q` of diagonal indices such that every
/// `e[i]` with `p ≤ i < q - 1` is nonzero and `e[q - 1]` (if inside `end`)
/// is zero. Entries at or past `q` are already diagonal. An empty range
/// means the first `end` entries are fully diagonal.
pub fn find_active_block<R: FloatScalar>(e: &[R], end: usize) -> Range<usize> {
    debug_assert!(end <= e.len() + 1);
    let zero = R::zero();

    let mut q = end;
    while q >= 2 && e[q - 2] == zero {
        q -= 1;
    }
    if q < 2 {
        return 0..0;
    }

    let mut p = q - 1;
    while p >= 1 && e[p - 1] != zero {
        p -= 1;
    }
    p..q
}

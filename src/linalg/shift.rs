use core::ops::Range;

use crate::traits::FloatScalar;

/// Eigenvalue of the symmetric 2×2 matrix `[[a, b], [b, c]]` closer to `c`.
///
/// With `d = (c - a) / 2` the eigenvalues are `c - d ± sqrt(d² + b²)`. The
/// root nearer `c` is evaluated without the cancellation of the textbook
/// formula: for `|b| ≤ |d|` as `c + sign(d) · b·b' / (1 + sqrt(1 + b'²))`
/// with `b' = b / |d|`, otherwise through the bounded ratio `d / |b|`.
/// When `d == 0` both roots are equally close and `c + |b|` is returned.
pub fn wilkinson_shift<R: FloatScalar>(a: R, b: R, c: R) -> R {
    let one = R::one();
    let half = one / (one + one);
    let d = (c - a) * half;
    if d == R::zero() {
        return c + b.abs();
    }

    let ad = d.abs();
    if ad >= b.abs() {
        let bp = b / ad;
        c + d.signum() * b * bp / (one + (one + bp * bp).sqrt())
    } else {
        let t = d / b.abs();
        c - d + d.signum() * b.abs() * (one + t * t).sqrt()
    }
}

/// Wilkinson shift for the active block `block` of the bidiagonal matrix
/// `B = bidiag(d, e)`, taken from the trailing 2×2 of `BᵀB` restricted to
/// the block.
pub fn bidiagonal_shift<R: FloatScalar>(d: &[R], e: &[R], block: Range<usize>) -> R {
    debug_assert!(block.len() >= 2);
    let n = block.end;
    let prev = if n - 2 > block.start { e[n - 3] } else { R::zero() };

    let a = d[n - 2] * d[n - 2] + prev * prev;
    let b = d[n - 2] * e[n - 2];
    let c = d[n - 1] * d[n - 1] + e[n - 2] * e[n - 2];
    wilkinson_shift(a, b, c)
}

/// Wilkinson shift for the active block `block` of the symmetric
/// tridiagonal matrix `T = tridiag(e, d, e)`.
pub fn tridiagonal_shift<R: FloatScalar>(d: &[R], e: &[R], block: Range<usize>) -> R {
    debug_assert!(block.len() >= 2);
    let n = block.end;
    wilkinson_shift(d[n - 2], e[n - 2], d[n - 1])
}

//! Closed-form diagonalization of 2×2 condensed blocks.

use num_traits::Float;

use crate::linalg::rotation::PlaneRotation;
use crate::traits::FloatScalar;

/// Newton corrections allowed in the near-degenerate branch of
/// [`symmetric_2x2`]. One step already reaches full precision from the
/// closed-form estimate; the cap only bounds pathological inputs.
const MAX_REFINEMENT_STEPS: usize = 4;

/// Diagonalization of a symmetric 2×2 block `M = [[a, b], [b, c]]`.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricSchur2<R: FloatScalar> {
    /// Rotation `J` with `J · M · Jᵀ = diag(l0, l1)`.
    pub rot: PlaneRotation<R>,
    pub l0: R,
    pub l1: R,
}

/// Singular value decomposition of an upper bidiagonal 2×2 block
/// `M = [[f, g], [0, h]]`.
#[derive(Debug, Clone, Copy)]
pub struct BidiagonalSvd2<R: FloatScalar> {
    /// Rotation `L` applied from the left.
    pub left: PlaneRotation<R>,
    /// Rotation `J` whose transpose is applied from the right:
    /// `L · M · Jᵀ = diag(s0, s1)`.
    pub right: PlaneRotation<R>,
    /// Signed singular values; the magnitudes are the singular values of `M`.
    pub s0: R,
    pub s1: R,
}

/// Exact diagonalization of the symmetric 2×2 matrix `[[a, b], [b, c]]`.
///
/// The rotation tangent `t` solves `t² - 2τt - 1 = 0` with `τ = d / b`,
/// `d = (c - a) / 2`; the root of smaller magnitude is taken so `|t| ≤ 1`.
/// Two branches keep every intermediate bounded:
/// - `|d| > |b|`: `t = -r / (1 + sqrt(1 + r²))` with `r = b / d`.
/// - `|d| ≤ |b|` (nearly degenerate): `t = -sign(τ) / (|τ| + sqrt(1 + τ²))`,
///   then corrected with Newton steps on the quadratic.
///
/// The eigenvalues follow as `a + t·b` and `c - t·b`.
pub fn symmetric_2x2<R: FloatScalar>(a: R, b: R, c: R) -> SymmetricSchur2<R> {
    let zero = R::zero();
    let one = R::one();
    let two = one + one;

    if b == zero {
        return SymmetricSchur2 {
            rot: PlaneRotation::identity(),
            l0: a,
            l1: c,
        };
    }

    let d = (c - a) / two;
    let t = if d.abs() > b.abs() {
        let r = b / d;
        -r / (one + (one + r * r).sqrt())
    } else {
        let tau = d / b;
        let sign = if tau < zero { -one } else { one };
        let mut t = -sign / (tau.abs() + (one + tau * tau).sqrt());
        for _ in 0..MAX_REFINEMENT_STEPS {
            let f = t * t - two * tau * t - one;
            let step = f / (two * (t - tau));
            t = t - step;
            if step.abs() <= R::epsilon() * t.abs() {
                break;
            }
        }
        t
    };

    let cs = one / (one + t * t).sqrt();
    SymmetricSchur2 {
        rot: PlaneRotation { c: cs, s: t * cs },
        l0: a + t * b,
        l1: c - t * b,
    }
}

/// Exact SVD of the upper bidiagonal 2×2 block `[[f, g], [0, h]]`.
///
/// A first left rotation makes the block symmetric without squaring any
/// entry, and [`symmetric_2x2`] finishes it. The two left rotations are
/// merged into one.
pub fn bidiagonal_2x2<R: FloatScalar>(f: R, g: R, h: R) -> BidiagonalSvd2<R> {
    // G·M is symmetric iff s/c = -g/(f + h).
    let (sym, _) = PlaneRotation::make(f + h, -g);
    let a = sym.c * f;
    let b = sym.c * g + sym.s * h;
    let c = -sym.s * g + sym.c * h;

    let jac = symmetric_2x2(a, b, c);
    BidiagonalSvd2 {
        left: jac.rot * sym,
        right: jac.rot,
        s0: jac.l0,
        s1: jac.l1,
    }
}

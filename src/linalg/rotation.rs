use core::ops::Mul;

use num_traits::{Float, One, Zero};

use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

/// Plane (Givens) rotation
///
/// ```text
/// G = [  c        s ]
///     [ -conj(s)  c ]
/// ```
///
/// with real `c` and `c² + |s|² = 1`. [`make`](Self::make) picks the unique
/// such `G` with `c ≥ 0` that maps `[x; y]` to `[r; 0]`.
///
/// ```
/// use condensed::linalg::PlaneRotation;
///
/// let (g, r) = PlaneRotation::make(3.0_f64, 4.0);
/// assert!((r - 5.0).abs() < 1e-15);
/// let (x, y) = g.apply(3.0, 4.0);
/// assert!((x - 5.0).abs() < 1e-15);
/// assert!(y.abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneRotation<T: LinalgScalar> {
    pub c: T::Real,
    pub s: T,
}

impl<T: LinalgScalar> PlaneRotation<T> {
    #[inline]
    pub fn identity() -> Self {
        Self {
            c: <T::Real as One>::one(),
            s: T::zero(),
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.c == <T::Real as One>::one() && self.s == T::zero()
    }

    /// Rotation `G` with `G · [x; y] = [r; 0]`, returned together with `r`.
    ///
    /// `c = |x| / ‖(x, y)‖` is real and non-negative, and `r` carries the
    /// phase of `x`. Both entries are divided by the larger modulus before
    /// the norm is formed, so huge inputs do not overflow and subnormal
    /// inputs still give `c² + |s|² = 1` to working precision.
    pub fn make(x: T, y: T) -> (Self, T) {
        let zero = <T::Real as Zero>::zero();
        let ax = x.modulus();
        let ay = y.modulus();

        if ay == zero {
            return (Self::identity(), x);
        }
        if ax == zero {
            let rot = Self {
                c: zero,
                s: y.conj().unscale(ay),
            };
            return (rot, T::from_real(ay));
        }

        // Work relative to the larger modulus: the unit-scale norm is never
        // subnormal, so c and s keep full precision for tiny inputs.
        let m = ax.max(ay);
        let (xs, ys) = (ax / m, ay / m);
        let norm = xs.hypot(ys);
        let phase = x.unscale(ax);
        let rot = Self {
            c: xs / norm,
            s: (phase * y.unscale(m).conj()).unscale(norm),
        };
        (rot, phase.scale(norm * m))
    }

    /// `G · [x; y]`.
    #[inline]
    pub fn apply(&self, x: T, y: T) -> (T, T) {
        (
            x.scale(self.c) + self.s * y,
            y.scale(self.c) - self.s.conj() * x,
        )
    }

    /// `Gᴴ`, the inverse rotation.
    #[inline]
    pub fn adjoint(&self) -> Self {
        Self {
            c: self.c,
            s: T::zero() - self.s,
        }
    }

    /// `Gᵀ`.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self {
            c: self.c,
            s: T::zero() - self.s.conj(),
        }
    }

    /// Entry-wise conjugate of `G`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            c: self.c,
            s: self.s.conj(),
        }
    }

    /// Left-multiply rows `p` and `q` of `m` by `G`:
    /// `[row_p; row_q] ← G · [row_p; row_q]`.
    pub fn apply_on_the_left<M: MatrixMut<T> + ?Sized>(&self, m: &mut M, p: usize, q: usize) {
        debug_assert_ne!(p, q);
        if self.is_identity() {
            return;
        }
        for j in 0..m.ncols() {
            let (x, y) = self.apply(*m.get(p, j), *m.get(q, j));
            *m.get_mut(p, j) = x;
            *m.get_mut(q, j) = y;
        }
    }

    /// Right-multiply columns `p` and `q` of `m` by `G`:
    /// `[col_p, col_q] ← [col_p, col_q] · G`.
    pub fn apply_on_the_right<M: MatrixMut<T> + ?Sized>(&self, m: &mut M, p: usize, q: usize) {
        debug_assert_ne!(p, q);
        if self.is_identity() {
            return;
        }
        // [a b] · G = (Gᵀ · [a; b])ᵀ
        let t = self.transpose();
        for i in 0..m.nrows() {
            let (x, y) = t.apply(*m.get(i, p), *m.get(i, q));
            *m.get_mut(i, p) = x;
            *m.get_mut(i, q) = y;
        }
    }
}

impl<R: FloatScalar> PlaneRotation<R> {
    /// View a real rotation as one acting on `T` (e.g. complex accumulators).
    #[inline]
    pub fn lift<T: LinalgScalar<Real = R>>(self) -> PlaneRotation<T> {
        PlaneRotation {
            c: self.c,
            s: T::from_real(self.s),
        }
    }
}

/// Product of two real rotations, `self · rhs`.
///
/// The product of two rotations is again a rotation, but its cosine may be
/// negative.
impl<R: FloatScalar> Mul for PlaneRotation<R> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            c: self.c * rhs.c - self.s * rhs.s,
            s: self.c * rhs.s + self.s * rhs.c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mat;

    const TOL: f64 = 1e-14;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn check_make(x: f64, y: f64) {
        let (g, r) = PlaneRotation::make(x, y);
        let scale = x.abs().max(y.abs()).max(1e-300);
        assert!(g.c >= 0.0, "c must be non-negative for ({}, {})", x, y);
        assert_near(g.c * g.c + g.s * g.s, 1.0, TOL, "c²+s²");
        assert_near((g.c * x + g.s * y) / scale, r / scale, TOL, "first component");
        assert_near((-g.s * x + g.c * y) / scale, 0.0, TOL, "second component");
    }

    #[test]
    fn make_generic_pairs() {
        for &(x, y) in &[
            (3.0, 4.0),
            (-3.0, 4.0),
            (3.0, -4.0),
            (-1.0, -1.0),
            (1e-3, 7.0),
            (7.0, 1e-3),
        ] {
            check_make(x, y);
        }
    }

    #[test]
    fn make_degenerate_pairs() {
        let (g, r) = PlaneRotation::make(0.0_f64, 0.0);
        assert!(g.is_identity());
        assert_eq!(r, 0.0);

        let (g, r) = PlaneRotation::make(-2.0_f64, 0.0);
        assert!(g.is_identity());
        assert_eq!(r, -2.0);

        let (g, r) = PlaneRotation::make(0.0_f64, -2.0);
        assert_eq!(g.c, 0.0);
        assert_eq!(g.s, -1.0);
        assert_eq!(r, 2.0);
    }

    #[test]
    fn make_extreme_magnitudes() {
        check_make(1e300, 1e300);
        check_make(1e-300, 3e-300);
        check_make(1e300, 1e-300);
    }

    #[test]
    fn make_subnormal_pairs() {
        for &(x, y) in &[
            (1.5e-323, 3.5e-323),
            (1e-320, 3e-321),
            (-4e-322, 1e-310),
            (5e-324, -5e-324),
        ] {
            let (g, r) = PlaneRotation::make(x, y);
            assert!(g.c >= 0.0);
            assert_near(g.c * g.c + g.s * g.s, 1.0, 4.0 * f64::EPSILON, "c²+s²");
            // r itself is subnormal, so it is only as exact as its last bit.
            let norm = x.hypot(y);
            assert!((r.abs() - norm).abs() <= 2.0 * f64::from_bits(1), "r for ({}, {})", x, y);
        }

        let (g, _) = PlaneRotation::make(1.5e-323_f64, 3.5e-323);
        assert_near(g.c, 3.0 / 58f64.sqrt(), TOL, "c");
        assert_near(g.s, 7.0 / 58f64.sqrt(), TOL, "s");
    }

    #[test]
    fn adjoint_inverts() {
        let (g, _) = PlaneRotation::make(2.0_f64, -5.0);
        let (x, y) = g.apply(0.3, -1.7);
        let (x0, y0) = g.adjoint().apply(x, y);
        assert_near(x0, 0.3, TOL, "x");
        assert_near(y0, -1.7, TOL, "y");
    }

    #[test]
    fn left_and_right_application() {
        let (g, _) = PlaneRotation::make(1.0_f64, 2.0);
        let a = Mat::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);

        // Embed G into a 3×3 identity acting on indices 0 and 2.
        let mut full = Mat::<f64>::identity(3);
        full[(0, 0)] = g.c;
        full[(0, 2)] = g.s;
        full[(2, 0)] = -g.s;
        full[(2, 2)] = g.c;

        let mut left = a.clone();
        g.apply_on_the_left(&mut left, 0, 2);
        let mut right = a.clone();
        g.apply_on_the_right(&mut right, 0, 2);

        let expected_left = &full * &a;
        let expected_right = &a * &full;
        for i in 0..3 {
            for j in 0..3 {
                assert_near(left[(i, j)], expected_left[(i, j)], 1e-13, "G·A");
                assert_near(right[(i, j)], expected_right[(i, j)], 1e-13, "A·G");
            }
        }
    }

    #[test]
    fn product_matches_sequential_application() {
        let (g1, _) = PlaneRotation::make(1.0_f64, 3.0);
        let (g2, _) = PlaneRotation::make(-2.0_f64, 0.5);
        let (x, y) = g2.apply(0.7, 1.1);
        let (x, y) = g1.apply(x, y);
        let (px, py) = (g1 * g2).apply(0.7, 1.1);
        assert_near(px, x, TOL, "x");
        assert_near(py, y, TOL, "y");
    }
}

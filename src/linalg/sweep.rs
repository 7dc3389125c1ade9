//! Implicit-shift QR steps on condensed forms.
//!
//! Every routine here updates `d` / `e` in place and mirrors each rotation
//! into the optional accumulators so that the product
//! `U · (condensed form) · Vᵀ` (bidiagonal) or `Q · T · Qᵀ` (tridiagonal)
//! is preserved. Accumulators only ever see column operations, so they can
//! have more rows than the condensed form has entries.

use core::ops::Range;

use num_traits::{One, Zero};

use crate::linalg::exact::{bidiagonal_2x2, symmetric_2x2};
use crate::linalg::rotation::PlaneRotation;
use crate::traits::{LinalgScalar, MatrixMut};

// ── Bidiagonal ──────────────────────────────────────────────────────

/// One Golub-Kahan step on the unreduced block `block` of the upper
/// bidiagonal matrix `B = bidiag(d, e)` with shift `shift` (a shift for
/// `BᵀB`).
///
/// The first right rotation is the one that would start a QR step on
/// `BᵀB - shift·I`. It leaves a bulge below the diagonal, which alternating
/// left and right rotations chase off the bottom of the block.
///
/// `U` receives the left rotations and `V` the right ones, both as column
/// operations: `U ← U·Gᵀ`, `V ← V·Jᵀ`.
pub fn bidiagonal_sweep<T, U, V>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    block: Range<usize>,
    shift: T::Real,
    mut u: Option<&mut U>,
    mut v: Option<&mut V>,
) where
    T: LinalgScalar,
    U: MatrixMut<T> + ?Sized,
    V: MatrixMut<T> + ?Sized,
{
    if block.len() < 2 {
        return;
    }
    let (start, last) = (block.start, block.end - 1);

    let mut y = d[start] * d[start] - shift;
    let mut z = d[start] * e[start];

    for k in start..last {
        // Right rotation on columns k, k+1: zero z against y in row k-1
        // (or in the first row of BᵀB - shift·I when k == start).
        let (rot, r) = PlaneRotation::make(y, z);
        if k > start {
            e[k - 1] = r;
        }

        let (dk, ek) = rot.apply(d[k], e[k]);
        let bulge = rot.s * d[k + 1];
        d[k + 1] = rot.c * d[k + 1];

        if let Some(v) = v.as_deref_mut() {
            rot.transpose().lift::<T>().apply_on_the_right(v, k, k + 1);
        }

        // Left rotation on rows k, k+1: zero the bulge at (k+1, k).
        let (rot, r) = PlaneRotation::make(dk, bulge);
        d[k] = r;
        let (ek, dk1) = rot.apply(ek, d[k + 1]);
        e[k] = ek;
        d[k + 1] = dk1;

        if k + 1 < last {
            // The left rotation pushes the bulge to (k, k+2).
            y = e[k];
            z = rot.s * e[k + 1];
            e[k + 1] = rot.c * e[k + 1];
        }

        if let Some(u) = u.as_deref_mut() {
            rot.transpose().lift::<T>().apply_on_the_right(u, k, k + 1);
        }
    }
}

/// Diagonalize the 2×2 block starting at `start` in closed form.
pub fn bidiagonal_exact_step<T, U, V>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    start: usize,
    u: Option<&mut U>,
    v: Option<&mut V>,
) where
    T: LinalgScalar,
    U: MatrixMut<T> + ?Sized,
    V: MatrixMut<T> + ?Sized,
{
    let svd = bidiagonal_2x2(d[start], e[start], d[start + 1]);
    d[start] = svd.s0;
    d[start + 1] = svd.s1;
    e[start] = <T::Real as Zero>::zero();

    if let Some(u) = u {
        svd.left.transpose().lift::<T>().apply_on_the_right(u, start, start + 1);
    }
    if let Some(v) = v {
        svd.right.transpose().lift::<T>().apply_on_the_right(v, start, start + 1);
    }
}

/// Annihilate row `i` of `B` when `d[i] == 0` and `i` is not the last index
/// of the block ending at `end`.
///
/// `e[i]` is chased to the right with left rotations mixing rows `j` and
/// `i`. Afterwards `e[i] == 0` and the block splits after index `i`.
pub fn chase_zero_diagonal_row<T, U>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    i: usize,
    end: usize,
    mut u: Option<&mut U>,
) where
    T: LinalgScalar,
    U: MatrixMut<T> + ?Sized,
{
    debug_assert!(i + 1 < end);
    let zero = <T::Real as Zero>::zero();

    let mut f = e[i];
    e[i] = zero;
    for j in (i + 1)..end {
        // Rows (j, i): [d_j; f] → [r; 0]
        let (rot, r) = PlaneRotation::make(d[j], f);
        d[j] = r;
        if j + 1 < end {
            f = -rot.s * e[j];
            e[j] = rot.c * e[j];
        }
        if let Some(u) = u.as_deref_mut() {
            rot.transpose().lift::<T>().apply_on_the_right(u, j, i);
        }
    }
}

/// Annihilate the last column of the block `block` when its last diagonal
/// entry is zero.
///
/// `e[last - 1]` is chased upward with right rotations mixing columns `j`
/// and `last`. Afterwards `e[last - 1] == 0` and the zero singular value
/// deflates.
pub fn chase_zero_diagonal_col<T, V>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    block: Range<usize>,
    mut v: Option<&mut V>,
) where
    T: LinalgScalar,
    V: MatrixMut<T> + ?Sized,
{
    debug_assert!(block.len() >= 2);
    let zero = <T::Real as Zero>::zero();
    let last = block.end - 1;

    let mut f = e[last - 1];
    e[last - 1] = zero;
    for j in (block.start..last).rev() {
        // Columns (j, last): row j is [d_j, f] → [r, 0]
        let (rot, r) = PlaneRotation::make(d[j], f);
        d[j] = r;
        if j > block.start {
            f = -rot.s * e[j - 1];
            e[j - 1] = rot.c * e[j - 1];
        }
        if let Some(v) = v.as_deref_mut() {
            rot.transpose().lift::<T>().apply_on_the_right(v, j, last);
        }
    }
}

// ── Symmetric tridiagonal ───────────────────────────────────────────

/// One implicit symmetric QR step with shift `shift` on the unreduced block
/// `block` of `T = tridiag(e, d, e)`.
///
/// Each rotation is applied as a similarity `G · T · Gᵀ` in closed form and
/// `Q ← Q·Gᵀ`.
pub fn tridiagonal_sweep<T, Q>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    block: Range<usize>,
    shift: T::Real,
    mut q: Option<&mut Q>,
) where
    T: LinalgScalar,
    Q: MatrixMut<T> + ?Sized,
{
    if block.len() < 2 {
        return;
    }
    let (start, last) = (block.start, block.end - 1);
    let two = <T::Real as One>::one() + <T::Real as One>::one();

    let mut x = d[start] - shift;
    let mut z = e[start];

    for k in start..last {
        let (rot, r) = PlaneRotation::make(x, z);
        if k > start {
            e[k - 1] = r;
        }
        let (c, s) = (rot.c, rot.s);

        let (dk, dk1, ek) = (d[k], d[k + 1], e[k]);
        d[k] = c * c * dk + two * c * s * ek + s * s * dk1;
        d[k + 1] = s * s * dk - two * c * s * ek + c * c * dk1;
        e[k] = c * s * (dk1 - dk) + (c * c - s * s) * ek;

        if k + 1 < last {
            // Bulge at (k, k+2)
            x = e[k];
            z = s * e[k + 1];
            e[k + 1] = c * e[k + 1];
        }

        if let Some(q) = q.as_deref_mut() {
            rot.transpose().lift::<T>().apply_on_the_right(q, k, k + 1);
        }
    }
}

/// Diagonalize the symmetric 2×2 block starting at `start` in closed form.
pub fn tridiagonal_exact_step<T, Q>(
    d: &mut [T::Real],
    e: &mut [T::Real],
    start: usize,
    q: Option<&mut Q>,
) where
    T: LinalgScalar,
    Q: MatrixMut<T> + ?Sized,
{
    let schur = symmetric_2x2(d[start], e[start], d[start + 1]);
    d[start] = schur.l0;
    d[start + 1] = schur.l1;
    e[start] = <T::Real as Zero>::zero();

    if let Some(q) = q {
        schur.rot.transpose().lift::<T>().apply_on_the_right(q, start, start + 1);
    }
}
